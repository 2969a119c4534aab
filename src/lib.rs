//! Mchain core — consensus rules and identity primitives for an Mchain node
//!
//! This crate answers two questions the rest of the node depends on:
//! which protocol rules apply at block N, and how peer and block
//! identities are represented on the wire.
//!
//! # Architecture
//!
//! ## Consensus Rules
//! - [`rules`] - Fork rule sets (the decorator chain), gas schedules,
//!   network constants, and the activation schedule that maps block
//!   heights to rule sets
//!
//! ## Identity & Wire Types
//! - [`node`] - Peer identity: enode URLs, synthetic-id fallback, wire
//!   records
//! - [`block`] - Block identifiers and the header view the difficulty
//!   rules read
//! - [`transaction`] - The signature/chain-tag view of a transaction the
//!   rules inspect
//!
//! ## Cryptography
//! - [`crypto`] - Keccak-256 and secp256k1 node keys
//!
//! ## Configuration & Utilities
//! - [`config`] - Network settings and fork-schedule assembly
//! - [`error`] - Error types
//!
//! Everything here is immutable after construction and shared by reference
//! across validation and execution workers; no operation blocks or
//! performs I/O (settings loading excepted).

#![forbid(unsafe_code)]

// ============================================================================
// Consensus Rules
// ============================================================================
pub mod rules;

// ============================================================================
// Identity & Wire Types
// ============================================================================
pub mod block;
pub mod node;
pub mod transaction;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
