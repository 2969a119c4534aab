//! Block-level value types: the compact block identifier exchanged during
//! sync, and the header view the difficulty rules read.

use primitive_types::U256;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};

/// A (hash, number) pair naming one block on the wire. The 32-byte hash
/// width is carried by the type; nothing is validated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId {
    pub hash: [u8; 32],
    pub number: u64,
}

impl BlockId {
    pub fn new(hash: [u8; 32], number: u64) -> Self {
        BlockId { hash, number }
    }

    /// Wire form: a 2-element list `[hash, number]`, the number in minimal
    /// big-endian.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        rlp::decode(bytes).map_err(ChainError::from)
    }
}

impl Encodable for BlockId {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.hash.to_vec());
        s.append(&self.number);
    }
}

impl Decodable for BlockId {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        if rlp.item_count()? < 2 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let hash_bytes: Vec<u8> = rlp.val_at(0)?;
        let hash: [u8; 32] = hash_bytes
            .try_into()
            .map_err(|_| DecoderError::Custom("block hash must be 32 bytes"))?;
        let number = rlp.val_at(1)?;
        Ok(BlockId { hash, number })
    }
}

/// The header fields consensus rules inspect when computing the difficulty
/// of a new block. Assembled by the (external) block validator.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub number: u64,
    pub timestamp: u64,
    pub difficulty: U256,
    pub has_uncles: bool,
}
