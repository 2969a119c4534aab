//! Error types for the Mchain core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Malformed identity text or wire record. Detected eagerly at the
    /// parse/decode boundary, never deferred to later use.
    #[error("Format error: {0}")]
    Format(String),
    /// Invalid fork activation table or unusable settings file. Fatal at
    /// startup; nothing recoverable once a schedule is running.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Key material that cannot be used with the curve.
    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl From<rlp::DecoderError> for ChainError {
    fn from(err: rlp::DecoderError) -> Self {
        ChainError::Format(err.to_string())
    }
}

impl From<hex::FromHexError> for ChainError {
    fn from(err: hex::FromHexError) -> Self {
        ChainError::Format(format!("Invalid hex: {}", err))
    }
}

impl From<secp256k1::Error> for ChainError {
    fn from(err: secp256k1::Error) -> Self {
        ChainError::Crypto(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Config(format!("Invalid settings file: {}", err))
    }
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Config(format!("Cannot read settings file: {}", err))
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
