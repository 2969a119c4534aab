//! Consensus rule sets, one per protocol fork.
//!
//! Each fork is a decorator over its predecessor: a concrete struct holding
//! `parent: Arc<dyn ForkRules>` that hard-codes the policies the fork
//! changed and forwards the rest one hop to the parent. The genesis fork
//! ([`Frontier`]) has no parent and answers every policy itself, so
//! delegation always terminates. Hot-path state (gas tables, constants) is
//! flattened into each fork at construction; per-opcode queries never walk
//! the chain.
//!
//! Which fork applies at a given block height is decided exclusively by the
//! [`ForkSchedule`]; a rule set always reports itself as applicable.

use std::fmt;

use primitive_types::U256;

use crate::block::HeaderView;
use crate::transaction::TxView;

pub mod constants;
pub mod gas;

mod byzantium;
mod frontier;
mod homestead;
mod schedule;
mod spurious;
mod tangerine;

pub use byzantium::Byzantium;
pub use constants::{Constants, ForkTransfer, HeaderCheckpoint, MiningAlgorithm};
pub use frontier::Frontier;
pub use gas::{all_but_one_64th, GasSchedule};
pub use homestead::Homestead;
pub use schedule::ForkSchedule;
pub use spurious::SpuriousDragon;
pub use tangerine::TangerineWhistle;

/// The opcode family requesting gas for a child frame. The gas-forwarding
/// formula is currently uniform across kinds, but the caller states its
/// intent and a future fork may differentiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Call,
    CallCode,
    DelegateCall,
    StaticCall,
}

/// The consensus rules in force from one fork activation.
///
/// Immutable after construction and shared by reference across validation
/// and execution workers; no method blocks, performs I/O, or mutates state.
/// Numeric inputs (gas amounts, header fields) are preconditions owned by
/// the caller and are not re-validated here.
///
/// Trait defaults model the policies of the abstract base configuration:
/// feature toggles default to off, hard-fork transfers and header
/// checkpoints to empty, extra-data formatting to the identity, and the
/// difficulty formula to the shared adjustment-plus-bomb computation, which
/// dispatches back into the receiving fork for its multiplier and bomb
/// exponent.
pub trait ForkRules: Send + Sync + fmt::Debug {
    /// Upgrade name, for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Gas granted to a child call frame, given the gas the caller
    /// requested and the gas it has available.
    fn call_gas(&self, kind: CallKind, requested: u64, available: u64) -> u64;

    /// Gas granted to a CREATE frame out of the available budget.
    fn create_gas(&self, available: u64) -> u64;

    /// This fork's flattened opcode price table.
    fn gas_schedule(&self) -> &GasSchedule;

    /// Whether a transaction's signature shape is acceptable under this
    /// fork's replay-protection and canonicality policy.
    fn accepts_transaction_signature(&self, tx: &TxView<'_>) -> bool;

    /// Intrinsic gas charged before any code runs.
    fn transaction_cost(&self, tx: &TxView<'_>) -> u64;

    /// Replay-protection tag for outgoing signatures; `None` before the
    /// tagging fork.
    fn chain_id(&self) -> Option<u64> {
        None
    }

    /// Always the receiver: mapping heights to rule sets is the
    /// [`ForkSchedule`]'s job, never the rule set's.
    fn rules_for(&self, height: u64) -> &dyn ForkRules;

    fn constants(&self) -> &Constants;

    fn mining_algorithm(&self) -> MiningAlgorithm;

    /// Difficulty of a block given its header and its parent's.
    fn calc_difficulty(&self, header: &HeaderView, parent: &HeaderView) -> U256 {
        let constants = self.constants();
        let quotient = parent.difficulty / constants.difficulty_bound_divisor;
        let multiplier = self.difficulty_multiplier(header, parent);
        let adjusted = if multiplier >= 0 {
            parent.difficulty + quotient * U256::from(multiplier as u64)
        } else {
            parent
                .difficulty
                .saturating_sub(quotient * U256::from(multiplier.unsigned_abs()))
        };
        let mut difficulty = std::cmp::max(constants.minimum_difficulty, adjusted);
        let bomb = self.difficulty_bomb_exponent(header);
        if bomb >= 0 {
            difficulty = std::cmp::max(
                constants.minimum_difficulty,
                difficulty + (U256::one() << bomb as usize),
            );
        }
        difficulty
    }

    /// Sign and step of the difficulty adjustment for one block interval.
    fn difficulty_multiplier(&self, header: &HeaderView, parent: &HeaderView) -> i64;

    /// Exponent of the difficulty-bomb term; negative disables the bomb
    /// for this block.
    fn difficulty_bomb_exponent(&self, header: &HeaderView) -> i64 {
        (header.number / self.constants().exp_difficulty_period) as i64 - 2
    }

    /// One-off balance moves applied when this fork activates at `height`.
    fn hard_fork_transfers(&self, _height: u64) -> &[ForkTransfer] {
        &[]
    }

    /// Header extra-data formatting; the default keeps the proposed bytes.
    fn extra_data(&self, proposed: Vec<u8>, _height: u64) -> Vec<u8> {
        proposed
    }

    /// Pinned (height, hash) pairs headers must match.
    fn header_checkpoints(&self) -> &[HeaderCheckpoint] {
        &[]
    }

    // Feature toggles. Off unless a fork switches them on or forwards a
    // parent's decision.

    /// Empty accounts are deleted when touched.
    fn clears_empty_accounts(&self) -> bool {
        false
    }

    /// Modular-exponentiation precompile.
    fn has_modexp_precompile(&self) -> bool {
        false
    }

    /// REVERT opcode.
    fn has_revert_opcode(&self) -> bool {
        false
    }

    /// RETURNDATASIZE / RETURNDATACOPY opcodes.
    fn has_return_data_opcodes(&self) -> bool {
        false
    }

    /// Pairing-check precompile.
    fn has_pairing_precompile(&self) -> bool {
        false
    }

    /// Curve addition / scalar multiplication precompiles.
    fn has_ec_arith_precompiles(&self) -> bool {
        false
    }

    /// STATICCALL opcode.
    fn has_static_call(&self) -> bool {
        false
    }

    /// Receipts carry a status byte instead of a state root.
    fn has_receipt_status(&self) -> bool {
        false
    }
}
