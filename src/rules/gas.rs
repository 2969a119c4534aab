//! Per-opcode gas price schedules.
//!
//! Each fork owns one flattened, immutable [`GasSchedule`]: a fork's table
//! is built from its parent's with struct-update syntax at construction
//! time, so a live lookup never walks the fork chain.

/// The price table consulted once per executed opcode. All prices are
/// non-negative and fixed for the lifetime of the fork that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasSchedule {
    // Tier prices shared by large opcode groups.
    pub zero: u64,
    pub base: u64,
    pub very_low: u64,
    pub low: u64,
    pub mid: u64,
    pub high: u64,
    pub ext: u64,

    // Account and storage access.
    pub balance: u64,
    pub sload: u64,
    pub sstore_set: u64,
    pub sstore_reset: u64,
    pub sstore_refund: u64,
    pub ext_code_size: u64,
    pub ext_code_copy: u64,

    // Hashing.
    pub sha3: u64,
    pub sha3_word: u64,

    // Calls and creation.
    pub call: u64,
    pub call_stipend: u64,
    pub call_value: u64,
    pub new_account: u64,
    pub create: u64,
    pub create_data: u64,
    pub self_destruct: u64,
    pub self_destruct_new_account: u64,
    pub self_destruct_refund: u64,

    // Memory and copying.
    pub memory: u64,
    pub quad_coeff_div: u64,
    pub copy: u64,

    // Logging.
    pub log: u64,
    pub log_topic: u64,
    pub log_data: u64,

    // Arithmetic specials.
    pub exp: u64,
    pub exp_byte: u64,
    pub jumpdest: u64,

    // Intrinsic transaction costs.
    pub tx: u64,
    pub tx_create: u64,
    pub tx_zero_data: u64,
    pub tx_non_zero_data: u64,
}

impl GasSchedule {
    /// The genesis price table. Every later fork derives its own table
    /// from an ancestor's with only the repriced entries changed.
    pub fn frontier() -> Self {
        GasSchedule {
            zero: 0,
            base: 2,
            very_low: 3,
            low: 5,
            mid: 8,
            high: 10,
            ext: 20,
            balance: 20,
            sload: 50,
            sstore_set: 20_000,
            sstore_reset: 5_000,
            sstore_refund: 15_000,
            ext_code_size: 20,
            ext_code_copy: 20,
            sha3: 30,
            sha3_word: 6,
            call: 40,
            call_stipend: 2_300,
            call_value: 9_000,
            new_account: 25_000,
            create: 32_000,
            create_data: 200,
            self_destruct: 0,
            self_destruct_new_account: 0,
            self_destruct_refund: 24_000,
            memory: 3,
            quad_coeff_div: 512,
            copy: 3,
            log: 375,
            log_topic: 375,
            log_data: 8,
            exp: 10,
            exp_byte: 10,
            jumpdest: 1,
            tx: 21_000,
            tx_create: 53_000,
            tx_zero_data: 4,
            tx_non_zero_data: 68,
        }
    }
}

/// The "all but one 64th" cap on gas forwarded into sub-calls:
/// `available - floor(available / 64)`. Bounds how much of the remaining
/// budget a frame may hand to a child, so a caller always retains enough
/// gas to finish its own frame.
pub fn all_but_one_64th(available: u64) -> u64 {
    available - available / 64
}
