//! The gas-repricing fork. Introduces the all-but-one-64th cap on gas
//! forwarded into sub-frames and raises the prices of the state-access
//! opcodes whose old prices made cheap denial-of-service spam possible.

use std::sync::Arc;

use primitive_types::U256;

use crate::block::HeaderView;
use crate::rules::constants::{Constants, ForkTransfer, HeaderCheckpoint, MiningAlgorithm};
use crate::rules::gas::{all_but_one_64th, GasSchedule};
use crate::rules::{CallKind, ForkRules};
use crate::transaction::TxView;

#[derive(Debug)]
pub struct TangerineWhistle {
    parent: Arc<dyn ForkRules>,
    schedule: GasSchedule,
}

impl TangerineWhistle {
    pub fn new(parent: Arc<dyn ForkRules>) -> Self {
        let schedule = GasSchedule {
            balance: 400,
            ext_code_size: 700,
            ext_code_copy: 700,
            sload: 200,
            call: 700,
            self_destruct: 5_000,
            self_destruct_new_account: 25_000,
            ..parent.gas_schedule().clone()
        };
        TangerineWhistle { parent, schedule }
    }
}

impl ForkRules for TangerineWhistle {
    fn name(&self) -> &'static str {
        "tangerine_whistle"
    }

    /// Grants at most all-but-one-64th of the available gas, so a caller
    /// can no longer strand itself by forwarding its whole budget.
    fn call_gas(&self, _kind: CallKind, requested: u64, available: u64) -> u64 {
        std::cmp::min(requested, all_but_one_64th(available))
    }

    /// Creation always forwards the capped amount.
    fn create_gas(&self, available: u64) -> u64 {
        all_but_one_64th(available)
    }

    fn gas_schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    /// This fork predates replay tagging: a chain-tagged transaction is
    /// rejected outright, whatever the parent would have said.
    fn accepts_transaction_signature(&self, tx: &TxView<'_>) -> bool {
        self.parent.accepts_transaction_signature(tx) && tx.chain_id.is_none()
    }

    fn transaction_cost(&self, tx: &TxView<'_>) -> u64 {
        self.parent.transaction_cost(tx)
    }

    fn chain_id(&self) -> Option<u64> {
        None
    }

    fn rules_for(&self, _height: u64) -> &dyn ForkRules {
        self
    }

    fn constants(&self) -> &Constants {
        self.parent.constants()
    }

    fn mining_algorithm(&self) -> MiningAlgorithm {
        self.parent.mining_algorithm()
    }

    fn calc_difficulty(&self, header: &HeaderView, parent: &HeaderView) -> U256 {
        self.parent.calc_difficulty(header, parent)
    }

    fn difficulty_multiplier(&self, header: &HeaderView, parent: &HeaderView) -> i64 {
        self.parent.difficulty_multiplier(header, parent)
    }

    fn difficulty_bomb_exponent(&self, header: &HeaderView) -> i64 {
        self.parent.difficulty_bomb_exponent(header)
    }

    fn hard_fork_transfers(&self, height: u64) -> &[ForkTransfer] {
        self.parent.hard_fork_transfers(height)
    }

    fn extra_data(&self, proposed: Vec<u8>, height: u64) -> Vec<u8> {
        self.parent.extra_data(proposed, height)
    }

    fn header_checkpoints(&self) -> &[HeaderCheckpoint] {
        self.parent.header_checkpoints()
    }

    // Toggles the fork predates are pinned off; the rest follow the parent.

    fn clears_empty_accounts(&self) -> bool {
        self.parent.clears_empty_accounts()
    }

    fn has_modexp_precompile(&self) -> bool {
        self.parent.has_modexp_precompile()
    }

    fn has_revert_opcode(&self) -> bool {
        false
    }

    fn has_return_data_opcodes(&self) -> bool {
        false
    }

    fn has_pairing_precompile(&self) -> bool {
        self.parent.has_pairing_precompile()
    }

    fn has_ec_arith_precompiles(&self) -> bool {
        self.parent.has_ec_arith_precompiles()
    }

    fn has_static_call(&self) -> bool {
        false
    }

    fn has_receipt_status(&self) -> bool {
        false
    }
}
