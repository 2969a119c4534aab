//! Transaction views consumed by the consensus rules
//!
//! The full transaction codec lives outside this crate; the rules only see
//! the fields that matter to them, assembled here.

use primitive_types::U256;

/// The secp256k1 group order N.
pub const SECP256K1N: U256 = U256([
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
]);

/// Floor of N / 2, the ceiling for canonical (low) s values.
pub const SECP256K1N_HALF: U256 = U256([
    0xdfe92f46681b20a0,
    0x5d576e7357a4501d,
    0xffffffffffffffff,
    0x7fffffffffffffff,
]);

/// Lowest canonical recovery value; 27 and 28 are the untagged forms.
const LOWER_REAL_V: u64 = 27;

/// Chain-tagged v values start here: raw v = chain_id * 2 + 35 + parity.
const CHAIN_ID_V_OFFSET: u64 = 35;

/// ECDSA signature fields of a transaction, with v normalized to 27/28.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// Normalized recovery value, 27 or 28 for a well-formed signature.
    pub v: u64,
}

impl TxSignature {
    /// Splits a raw wire v into the normalized signature and the optional
    /// replay-protection chain id. 27 and 28 carry no tag; values from 35
    /// upwards encode `chain_id * 2 + 35 + parity`.
    pub fn from_raw_v(r: [u8; 32], s: [u8; 32], raw_v: u64) -> (Self, Option<u64>) {
        if raw_v >= CHAIN_ID_V_OFFSET {
            let chain_id = (raw_v - CHAIN_ID_V_OFFSET) / 2;
            let v = LOWER_REAL_V + (1 - raw_v % 2);
            return (TxSignature { r, s, v }, Some(chain_id));
        }
        // 27/28 pass through; anything else is kept as-is and fails the
        // component check downstream.
        (TxSignature { r, s, v: raw_v }, None)
    }

    /// True when v is canonical and r and s are both inside (0, N).
    pub fn has_valid_components(&self) -> bool {
        let r = U256::from_big_endian(&self.r);
        let s = U256::from_big_endian(&self.s);
        (self.v == LOWER_REAL_V || self.v == LOWER_REAL_V + 1)
            && !r.is_zero()
            && !s.is_zero()
            && r < SECP256K1N
            && s < SECP256K1N
    }

    /// True when s sits in the lower half of the group order.
    pub fn has_low_s(&self) -> bool {
        U256::from_big_endian(&self.s) <= SECP256K1N_HALF
    }
}

/// The consensus-relevant slice of a decoded transaction, assembled by the
/// (external) transaction decoder.
#[derive(Debug, Clone)]
pub struct TxView<'a> {
    /// Call data or init code carried by the transaction.
    pub data: &'a [u8],
    /// True when the receiver field is empty (contract creation).
    pub is_contract_creation: bool,
    /// Replay-protection tag extracted from the raw v value, if any.
    pub chain_id: Option<u64>,
    pub signature: Option<TxSignature>,
}

impl TxView<'_> {
    pub fn zero_data_bytes(&self) -> u64 {
        self.data.iter().filter(|b| **b == 0).count() as u64
    }

    pub fn non_zero_data_bytes(&self) -> u64 {
        self.data.len() as u64 - self.zero_data_bytes()
    }
}
