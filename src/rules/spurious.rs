//! The replay-protection fork: transactions may carry the network's chain
//! id in their signature, empty accounts are cleared on touch, EXP is
//! repriced, and contract code size is capped.

use std::sync::Arc;

use crate::block::HeaderView;
use crate::rules::constants::{Constants, MiningAlgorithm};
use crate::rules::gas::{all_but_one_64th, GasSchedule};
use crate::rules::{CallKind, ForkRules};
use crate::transaction::TxView;

/// EIP-170 contract code size ceiling.
const MAX_CONTRACT_SIZE: usize = 0x6000;

#[derive(Debug)]
pub struct SpuriousDragon {
    parent: Arc<dyn ForkRules>,
    chain_id: u64,
    schedule: GasSchedule,
    constants: Constants,
}

impl SpuriousDragon {
    pub fn new(parent: Arc<dyn ForkRules>, chain_id: u64) -> Self {
        let schedule = GasSchedule {
            exp_byte: 50,
            ..parent.gas_schedule().clone()
        };
        let constants = Constants {
            max_contract_size: MAX_CONTRACT_SIZE,
            ..parent.constants().clone()
        };
        SpuriousDragon {
            parent,
            chain_id,
            schedule,
            constants,
        }
    }
}

impl ForkRules for SpuriousDragon {
    fn name(&self) -> &'static str {
        "spurious_dragon"
    }

    // The forwarding cap is restated locally so the per-opcode path stays
    // a single virtual call.

    fn call_gas(&self, _kind: CallKind, requested: u64, available: u64) -> u64 {
        std::cmp::min(requested, all_but_one_64th(available))
    }

    fn create_gas(&self, available: u64) -> u64 {
        all_but_one_64th(available)
    }

    fn gas_schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    /// Full restatement rather than a parent call: the immediate parent
    /// rejects every tagged transaction, and this fork's whole point is to
    /// accept tags that match the network.
    fn accepts_transaction_signature(&self, tx: &TxView<'_>) -> bool {
        let sig = match &tx.signature {
            Some(sig) => sig,
            None => return false,
        };
        if !sig.has_valid_components() || !sig.has_low_s() {
            return false;
        }
        match tx.chain_id {
            None => true,
            Some(tag) => Some(tag) == self.chain_id(),
        }
    }

    fn transaction_cost(&self, tx: &TxView<'_>) -> u64 {
        self.parent.transaction_cost(tx)
    }

    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
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

    fn difficulty_multiplier(&self, header: &HeaderView, parent: &HeaderView) -> i64 {
        self.parent.difficulty_multiplier(header, parent)
    }

    fn clears_empty_accounts(&self) -> bool {
        true
    }

    fn has_modexp_precompile(&self) -> bool {
        self.parent.has_modexp_precompile()
    }

    fn has_revert_opcode(&self) -> bool {
        self.parent.has_revert_opcode()
    }

    fn has_return_data_opcodes(&self) -> bool {
        self.parent.has_return_data_opcodes()
    }

    fn has_pairing_precompile(&self) -> bool {
        self.parent.has_pairing_precompile()
    }

    fn has_ec_arith_precompiles(&self) -> bool {
        self.parent.has_ec_arith_precompiles()
    }

    fn has_static_call(&self) -> bool {
        self.parent.has_static_call()
    }

    fn has_receipt_status(&self) -> bool {
        self.parent.has_receipt_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Frontier, Homestead, TangerineWhistle};
    use crate::transaction::{TxSignature, SECP256K1N_HALF};
    use primitive_types::U256;

    fn rules() -> SpuriousDragon {
        let chain = TangerineWhistle::new(Arc::new(Homestead::new(Arc::new(Frontier::new()))));
        SpuriousDragon::new(Arc::new(chain), 1)
    }

    fn view(chain_id: Option<u64>, s: U256) -> TxView<'static> {
        let mut s_bytes = [0u8; 32];
        s.to_big_endian(&mut s_bytes);
        TxView {
            data: &[],
            is_contract_creation: false,
            chain_id,
            signature: Some(TxSignature {
                r: [1u8; 32],
                s: s_bytes,
                v: 27,
            }),
        }
    }

    #[test]
    fn test_chain_tag_policy() {
        let rules = rules();
        assert_eq!(rules.chain_id(), Some(1));
        // Untagged legacy transactions stay valid.
        assert!(rules.accepts_transaction_signature(&view(None, U256::one())));
        // The network's own tag is accepted, a foreign tag is not.
        assert!(rules.accepts_transaction_signature(&view(Some(1), U256::one())));
        assert!(!rules.accepts_transaction_signature(&view(Some(3), U256::one())));
    }

    #[test]
    fn test_low_s_still_enforced() {
        let rules = rules();
        assert!(!rules.accepts_transaction_signature(&view(
            None,
            SECP256K1N_HALF + U256::one()
        )));
    }

    #[test]
    fn test_missing_signature_rejected() {
        let rules = rules();
        let unsigned = TxView {
            data: &[],
            is_contract_creation: false,
            chain_id: None,
            signature: None,
        };
        assert!(!rules.accepts_transaction_signature(&unsigned));
    }

    #[test]
    fn test_exp_repricing_keeps_earlier_table() {
        let rules = rules();
        assert_eq!(rules.gas_schedule().exp_byte, 50);
        // The gas-repricing fork's entries are still in force.
        assert_eq!(rules.gas_schedule().balance, 400);
        assert_eq!(rules.gas_schedule().sload, 200);
    }

    #[test]
    fn test_cap_restated_locally() {
        let rules = rules();
        assert_eq!(rules.call_gas(CallKind::Call, u64::MAX, 6_400_000), 6_300_000);
        assert_eq!(rules.create_gas(6_400_000), 6_300_000);
    }

    #[test]
    fn test_state_clearing_and_contract_cap() {
        let rules = rules();
        assert!(rules.clears_empty_accounts());
        assert_eq!(rules.constants().max_contract_size, 0x6000);
    }
}
