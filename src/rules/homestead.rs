//! The first planned upgrade: graded difficulty adjustment, canonical
//! (low-s) signatures, a CREATE-transaction surcharge, and DELEGATECALL.

use std::sync::Arc;

use crate::block::HeaderView;
use crate::rules::constants::{Constants, MiningAlgorithm};
use crate::rules::gas::GasSchedule;
use crate::rules::{CallKind, ForkRules};
use crate::transaction::TxView;

#[derive(Debug)]
pub struct Homestead {
    parent: Arc<dyn ForkRules>,
    constants: Constants,
}

impl Homestead {
    pub fn new(parent: Arc<dyn ForkRules>) -> Self {
        let constants = Constants {
            create_empty_contract_on_oog: false,
            has_delegate_call: true,
            ..parent.constants().clone()
        };
        Homestead { parent, constants }
    }
}

impl ForkRules for Homestead {
    fn name(&self) -> &'static str {
        "homestead"
    }

    fn call_gas(&self, kind: CallKind, requested: u64, available: u64) -> u64 {
        self.parent.call_gas(kind, requested, available)
    }

    fn create_gas(&self, available: u64) -> u64 {
        self.parent.create_gas(available)
    }

    fn gas_schedule(&self) -> &GasSchedule {
        self.parent.gas_schedule()
    }

    /// Parent's checks plus the low-s canonicality rule, closing the
    /// signature-malleability hole.
    fn accepts_transaction_signature(&self, tx: &TxView<'_>) -> bool {
        if !self.parent.accepts_transaction_signature(tx) {
            return false;
        }
        match &tx.signature {
            Some(sig) => sig.has_low_s(),
            None => false,
        }
    }

    /// Creation transactions now pay the dedicated base cost.
    fn transaction_cost(&self, tx: &TxView<'_>) -> u64 {
        let g = self.gas_schedule();
        let base = if tx.is_contract_creation {
            g.tx_create
        } else {
            g.tx
        };
        base + tx.zero_data_bytes() * g.tx_zero_data
            + tx.non_zero_data_bytes() * g.tx_non_zero_data
    }

    fn rules_for(&self, _height: u64) -> &dyn ForkRules {
        self
    }

    fn constants(&self) -> &Constants {
        &self.constants
    }

    fn mining_algorithm(&self) -> MiningAlgorithm {
        self.parent.mining_algorithm()
    }

    /// Graded adjustment: the step shrinks as the interval approaches the
    /// target and is clamped at -99.
    fn difficulty_multiplier(&self, header: &HeaderView, parent: &HeaderView) -> i64 {
        let interval = header.timestamp.saturating_sub(parent.timestamp);
        std::cmp::max(1 - (interval / 10) as i64, -99)
    }
}
