//! The genesis rule set. Every policy is answered locally; there is no
//! parent to delegate to.

use crate::block::HeaderView;
use crate::rules::constants::{Constants, MiningAlgorithm};
use crate::rules::gas::GasSchedule;
use crate::rules::{CallKind, ForkRules};
use crate::transaction::TxView;

#[derive(Debug)]
pub struct Frontier {
    schedule: GasSchedule,
    constants: Constants,
}

impl Frontier {
    pub fn new() -> Self {
        Frontier {
            schedule: GasSchedule::frontier(),
            constants: Constants::frontier(),
        }
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl ForkRules for Frontier {
    fn name(&self) -> &'static str {
        "frontier"
    }

    /// No forwarding cap yet: the caller gets what it asked for, and the
    /// execution engine owns the out-of-gas check against availability.
    fn call_gas(&self, _kind: CallKind, requested: u64, _available: u64) -> u64 {
        requested
    }

    fn create_gas(&self, available: u64) -> u64 {
        available
    }

    fn gas_schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    /// A signature is acceptable when present and its components are in
    /// range; no canonicality or replay constraints yet.
    fn accepts_transaction_signature(&self, tx: &TxView<'_>) -> bool {
        match &tx.signature {
            Some(sig) => sig.has_valid_components(),
            None => false,
        }
    }

    /// Flat base cost plus per-byte data charges; creation carries no
    /// surcharge in this fork.
    fn transaction_cost(&self, tx: &TxView<'_>) -> u64 {
        let g = &self.schedule;
        g.tx + tx.zero_data_bytes() * g.tx_zero_data + tx.non_zero_data_bytes() * g.tx_non_zero_data
    }

    fn rules_for(&self, _height: u64) -> &dyn ForkRules {
        self
    }

    fn constants(&self) -> &Constants {
        &self.constants
    }

    fn mining_algorithm(&self) -> MiningAlgorithm {
        MiningAlgorithm::Ethash
    }

    fn difficulty_multiplier(&self, header: &HeaderView, parent: &HeaderView) -> i64 {
        if header.timestamp >= parent.timestamp.saturating_add(self.constants.duration_limit) {
            -1
        } else {
            1
        }
    }
}
