//! The feature fork: the new precompiles and opcodes switch on, receipts
//! carry a status byte, the block reward drops, and the difficulty bomb is
//! pushed back three million blocks.

use std::sync::Arc;

use primitive_types::U256;

use crate::block::HeaderView;
use crate::rules::constants::{Constants, MiningAlgorithm};
use crate::rules::gas::{all_but_one_64th, GasSchedule};
use crate::rules::{CallKind, ForkRules};
use crate::transaction::TxView;

/// How far the difficulty bomb is pushed back.
const BOMB_DELAY: u64 = 3_000_000;

/// One ether, in wei.
const ETHER: u64 = 1_000_000_000_000_000_000;

#[derive(Debug)]
pub struct Byzantium {
    parent: Arc<dyn ForkRules>,
    constants: Constants,
}

impl Byzantium {
    pub fn new(parent: Arc<dyn ForkRules>) -> Self {
        let constants = Constants {
            block_reward: U256::from(3) * U256::from(ETHER),
            ..parent.constants().clone()
        };
        Byzantium { parent, constants }
    }
}

impl ForkRules for Byzantium {
    fn name(&self) -> &'static str {
        "byzantium"
    }

    fn call_gas(&self, _kind: CallKind, requested: u64, available: u64) -> u64 {
        std::cmp::min(requested, all_but_one_64th(available))
    }

    fn create_gas(&self, available: u64) -> u64 {
        all_but_one_64th(available)
    }

    fn gas_schedule(&self) -> &GasSchedule {
        self.parent.gas_schedule()
    }

    fn accepts_transaction_signature(&self, tx: &TxView<'_>) -> bool {
        self.parent.accepts_transaction_signature(tx)
    }

    fn transaction_cost(&self, tx: &TxView<'_>) -> u64 {
        self.parent.transaction_cost(tx)
    }

    fn chain_id(&self) -> Option<u64> {
        self.parent.chain_id()
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

    /// Uncle-aware adjustment over a 9-second target window.
    fn difficulty_multiplier(&self, header: &HeaderView, parent: &HeaderView) -> i64 {
        let base: i64 = if parent.has_uncles { 2 } else { 1 };
        let interval = header.timestamp.saturating_sub(parent.timestamp);
        std::cmp::max(base - (interval / 9) as i64, -99)
    }

    /// The bomb runs against the block height minus the delay, never below
    /// zero.
    fn difficulty_bomb_exponent(&self, header: &HeaderView) -> i64 {
        let effective = header.number.saturating_sub(BOMB_DELAY);
        (effective / self.constants.exp_difficulty_period) as i64 - 2
    }

    fn clears_empty_accounts(&self) -> bool {
        self.parent.clears_empty_accounts()
    }

    fn has_modexp_precompile(&self) -> bool {
        true
    }

    fn has_revert_opcode(&self) -> bool {
        true
    }

    fn has_return_data_opcodes(&self) -> bool {
        true
    }

    fn has_pairing_precompile(&self) -> bool {
        true
    }

    fn has_ec_arith_precompiles(&self) -> bool {
        true
    }

    fn has_static_call(&self) -> bool {
        true
    }

    fn has_receipt_status(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Frontier, Homestead, SpuriousDragon, TangerineWhistle};

    fn rules() -> Byzantium {
        let chain: Arc<dyn ForkRules> = Arc::new(SpuriousDragon::new(
            Arc::new(TangerineWhistle::new(Arc::new(Homestead::new(Arc::new(
                Frontier::new(),
            ))))),
            1,
        ));
        Byzantium::new(chain)
    }

    fn header(number: u64, timestamp: u64, has_uncles: bool) -> HeaderView {
        HeaderView {
            number,
            timestamp,
            difficulty: U256::from(131_072),
            has_uncles,
        }
    }

    #[test]
    fn test_all_features_on() {
        let rules = rules();
        assert!(rules.has_modexp_precompile());
        assert!(rules.has_revert_opcode());
        assert!(rules.has_return_data_opcodes());
        assert!(rules.has_pairing_precompile());
        assert!(rules.has_ec_arith_precompiles());
        assert!(rules.has_static_call());
        assert!(rules.has_receipt_status());
        // Forwarded: the parent already clears empty accounts.
        assert!(rules.clears_empty_accounts());
    }

    #[test]
    fn test_reward_drop() {
        let rules = rules();
        assert_eq!(
            rules.constants().block_reward,
            U256::from_dec_str("3000000000000000000").unwrap()
        );
        // Other constants ride through.
        assert_eq!(rules.constants().max_contract_size, 0x6000);
    }

    #[test]
    fn test_uncle_aware_multiplier() {
        let rules = rules();
        let parent_plain = header(4_369_999, 1_000, false);
        let parent_uncled = header(4_369_999, 1_000, true);
        assert_eq!(
            rules.difficulty_multiplier(&header(4_370_000, 1_005, false), &parent_plain),
            1
        );
        assert_eq!(
            rules.difficulty_multiplier(&header(4_370_000, 1_005, false), &parent_uncled),
            2
        );
        assert_eq!(
            rules.difficulty_multiplier(&header(4_370_000, 1_018, false), &parent_plain),
            -1
        );
    }

    #[test]
    fn test_bomb_delay() {
        let rules = rules();
        // Below the delay the bomb is fully disarmed.
        assert_eq!(rules.difficulty_bomb_exponent(&header(2_999_999, 0, false)), -2);
        // At delay + two periods the exponent reaches zero.
        assert_eq!(rules.difficulty_bomb_exponent(&header(3_200_000, 0, false)), 0);
        assert_eq!(rules.difficulty_bomb_exponent(&header(4_370_000, 0, false)), 11);
    }

    #[test]
    fn test_inherited_policies() {
        let rules = rules();
        assert_eq!(rules.chain_id(), Some(1));
        assert_eq!(rules.gas_schedule().exp_byte, 50);
        assert_eq!(rules.call_gas(CallKind::StaticCall, u64::MAX, 6_400_000), 6_300_000);
    }
}
