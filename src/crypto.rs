//! Cryptographic primitives for the Mchain core

use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use secp256k1::{
    constants::{SECRET_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE},
    All, PublicKey, Secp256k1, SecretKey,
};
use sha3::{Digest, Keccak256};

use crate::error::ChainError;

/// A thread-safe, lazily initialized Secp256k1 context.
/// This prevents repeated, unnecessary context creation.
static SECP256K1_CONTEXT: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Length in bytes of a node id: an uncompressed secp256k1 public key with
/// the 0x04 prefix byte stripped.
pub const NODE_ID_SIZE: usize = UNCOMPRESSED_PUBLIC_KEY_SIZE - 1;

/// Raw node id bytes as they travel in discovery packets and enode URLs.
pub type NodeId = [u8; NODE_ID_SIZE];

/// Keccak-256 digest of the input bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The identity key of a local node. The public half, in node-id form, is
/// what peers see during discovery and handshakes.
#[derive(Debug, Clone)]
pub struct NodeKey {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl NodeKey {
    /// Generates a new random NodeKey using the OS random number generator.
    pub fn generate() -> Self {
        let secret_key = SecretKey::new(&mut OsRng);
        Self::from_secret_key(secret_key)
    }

    /// Creates a NodeKey from an existing SecretKey.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        // Using the context from the static Lazy
        let public_key = PublicKey::from_secret_key(&SECP256K1_CONTEXT, &secret_key);
        NodeKey {
            secret_key,
            public_key,
        }
    }

    /// Creates a NodeKey from raw secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        let secret_key = SecretKey::from_slice(bytes).map_err(|e| {
            if bytes.len() != SECRET_KEY_SIZE {
                ChainError::Crypto(format!(
                    "Secret key must be {} bytes, got {}",
                    SECRET_KEY_SIZE,
                    bytes.len()
                ))
            } else {
                ChainError::Crypto(format!("Invalid secret key bytes: {}", e))
            }
        })?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Creates a NodeKey from a 32-byte seed, typically a digest of some
    /// stable text. Fails if the seed falls outside the curve order.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, ChainError> {
        let secret_key = SecretKey::from_slice(seed)
            .map_err(|e| ChainError::Crypto(format!("Seed is not a usable secret key: {}", e)))?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// The node id: the uncompressed public key with the leading 0x04 byte
    /// stripped.
    pub fn node_id(&self) -> NodeId {
        let uncompressed = self.public_key.serialize_uncompressed();
        let mut id = [0u8; NODE_ID_SIZE];
        id.copy_from_slice(&uncompressed[1..]);
        id
    }

    /// Raw secret key bytes, for persistence by the caller.
    pub fn secret_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret_key.secret_bytes()
    }
}

/// Derives the synthetic node id for identity text that carries no key
/// material: the text is hashed and the digest is read as a secret key.
/// The same text yields a byte-identical id on every call.
pub fn synthetic_node_id(text: &str) -> Result<NodeId, ChainError> {
    NodeKey::from_seed(&keccak256(text.as_bytes())).map(|key| key.node_id())
}
