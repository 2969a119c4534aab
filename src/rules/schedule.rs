//! The fork activation table: which rule set is in force at which height.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ChainError, Result};
use crate::rules::constants::Constants;
use crate::rules::ForkRules;

/// Ordered (activation height, rule set) table. Validated once at startup;
/// afterwards every lookup is infallible and read-only, so the schedule is
/// shared by reference across all validation workers.
#[derive(Debug)]
pub struct ForkSchedule {
    entries: Vec<(u64, Arc<dyn ForkRules>)>,
}

impl ForkSchedule {
    /// Validates and adopts the activation table. Fails with
    /// [`ChainError::Config`] if the table is empty, does not start at
    /// height 0, or is not strictly increasing; a bad table must abort
    /// startup rather than leave rule selection undefined.
    pub fn new(entries: Vec<(u64, Arc<dyn ForkRules>)>) -> Result<Self> {
        let first = match entries.first() {
            Some(first) => first,
            None => {
                return Err(ChainError::Config(
                    "Fork schedule must contain at least one entry".to_string(),
                ))
            }
        };
        if first.0 != 0 {
            return Err(ChainError::Config(format!(
                "Fork schedule must start at height 0, got {}",
                first.0
            )));
        }
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ChainError::Config(format!(
                    "Fork activation heights must be strictly increasing: {} then {}",
                    pair[0].0, pair[1].0
                )));
            }
        }
        for (height, rules) in &entries {
            debug!(height, fork = rules.name(), "fork activation");
        }
        info!(forks = entries.len(), "fork schedule assembled");
        Ok(ForkSchedule { entries })
    }

    /// The rule set of the last entry activated at or below `height`.
    /// Total for every `u64` once construction has succeeded.
    pub fn rules_at(&self, height: u64) -> &Arc<dyn ForkRules> {
        let idx = self.entries.partition_point(|(at, _)| *at <= height);
        // idx >= 1: entry 0 activates at height 0.
        &self.entries[idx - 1].1
    }

    /// Constants shared by the whole network, read from the genesis entry.
    pub fn common_constants(&self) -> &Constants {
        self.entries[0].1.constants()
    }

    /// Activation heights in order, for diagnostics.
    pub fn activations(&self) -> impl Iterator<Item = (u64, &str)> + '_ {
        self.entries.iter().map(|(at, rules)| (*at, rules.name()))
    }
}
