//! Scalar network constants carried by each fork rule set.

use primitive_types::U256;

/// One ether, in wei.
const ETHER: u64 = 1_000_000_000_000_000_000;

/// Network-wide scalar parameters. Like the gas tables these are flattened
/// per fork at construction; a fork that changes one value copies its
/// parent's struct and updates only that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constants {
    pub maximum_extra_data_size: usize,
    pub minimum_difficulty: U256,
    pub difficulty_bound_divisor: U256,
    /// Seconds between blocks below which difficulty adjusts upward.
    pub duration_limit: u64,
    /// Block-count period of the difficulty bomb exponent.
    pub exp_difficulty_period: u64,
    pub block_reward: U256,
    pub max_contract_size: usize,
    /// Pre-homestead quirk: an out-of-gas CREATE still leaves an empty
    /// contract behind.
    pub create_empty_contract_on_oog: bool,
    pub has_delegate_call: bool,
}

impl Constants {
    pub fn frontier() -> Self {
        Constants {
            maximum_extra_data_size: 32,
            minimum_difficulty: U256::from(131_072),
            difficulty_bound_divisor: U256::from(2_048),
            duration_limit: 13,
            exp_difficulty_period: 100_000,
            block_reward: U256::from(5) * U256::from(ETHER),
            max_contract_size: usize::MAX,
            create_empty_contract_on_oog: true,
            has_delegate_call: false,
        }
    }
}

/// Seal-engine selection. The engine itself lives outside this crate; the
/// rules only name which one a fork expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningAlgorithm {
    Ethash,
}

/// A one-off balance move applied when a hard fork activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkTransfer {
    pub from: [u8; 20],
    pub to: [u8; 20],
}

/// A pinned (height, hash) pair the header validator must match, used to
/// reject stale side chains around contentious forks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheckpoint {
    pub number: u64,
    pub hash: [u8; 32],
}
