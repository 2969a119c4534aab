//! Network settings: chain id, fork activation heights, and boot nodes.
//!
//! Settings come from a TOML file or from the built-in mainnet preset, and
//! are turned into the runtime objects the rest of the node consumes: a
//! validated [`ForkSchedule`] and parsed boot [`Node`]s.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::error::{ChainError, Result};
use crate::node::Node;
use crate::rules::{
    Byzantium, ForkRules, ForkSchedule, Frontier, Homestead, SpuriousDragon, TangerineWhistle,
};

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default)]
    pub forks: ForkHeights,
    #[serde(default)]
    pub boot_nodes: Vec<String>,
}

/// Activation heights of the named upgrades. An absent height means the
/// network never schedules that fork.
#[derive(Debug, Default, Deserialize)]
pub struct ForkHeights {
    pub homestead: Option<u64>,
    pub tangerine_whistle: Option<u64>,
    pub spurious_dragon: Option<u64>,
    pub byzantium: Option<u64>,
}

fn default_name() -> String {
    "mainnet".to_string()
}

fn default_chain_id() -> u64 {
    1
}

impl NetworkConfig {
    /// Loads settings from a TOML file and validates critical values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: NetworkConfig = toml::from_str(&text)?;

        if config.name.is_empty() {
            return Err(ChainError::Config(
                "network name must not be empty".to_string(),
            ));
        }
        if config.chain_id == 0 {
            return Err(ChainError::Config("chain_id must be non-zero".to_string()));
        }

        info!(network = %config.name, chain_id = config.chain_id, "loaded network settings");
        Ok(config)
    }

    /// The built-in main-network preset.
    pub fn mainnet() -> Self {
        NetworkConfig {
            name: default_name(),
            chain_id: default_chain_id(),
            forks: ForkHeights {
                homestead: Some(1_150_000),
                tangerine_whistle: Some(2_463_000),
                spurious_dragon: Some(2_675_000),
                byzantium: Some(4_370_000),
            },
            boot_nodes: Vec::new(),
        }
    }

    /// Assembles the fork decorator chain in activation order and wraps it
    /// in a validated schedule. Each scheduled fork wraps the newest fork
    /// before it; skipped forks simply drop out of the chain.
    pub fn fork_schedule(&self) -> Result<ForkSchedule> {
        let genesis: Arc<dyn ForkRules> = Arc::new(Frontier::new());
        let mut entries: Vec<(u64, Arc<dyn ForkRules>)> = vec![(0, genesis.clone())];
        let mut tip = genesis;

        if let Some(height) = self.forks.homestead {
            tip = Arc::new(Homestead::new(tip));
            entries.push((height, tip.clone()));
        }
        if let Some(height) = self.forks.tangerine_whistle {
            tip = Arc::new(TangerineWhistle::new(tip));
            entries.push((height, tip.clone()));
        }
        if let Some(height) = self.forks.spurious_dragon {
            tip = Arc::new(SpuriousDragon::new(tip, self.chain_id));
            entries.push((height, tip.clone()));
        }
        if let Some(height) = self.forks.byzantium {
            tip = Arc::new(Byzantium::new(tip));
            entries.push((height, tip.clone()));
        }

        ForkSchedule::new(entries)
    }

    /// Parses every configured boot node, failing fast on the first
    /// malformed entry.
    pub fn boot_nodes(&self) -> Result<Vec<Node>> {
        self.boot_nodes.iter().map(|text| Node::parse(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mainnet_schedule() {
        let schedule = NetworkConfig::mainnet().fork_schedule().unwrap();
        assert_eq!(schedule.rules_at(0).name(), "frontier");
        assert_eq!(schedule.rules_at(1_150_000).name(), "homestead");
        assert_eq!(schedule.rules_at(2_463_000).name(), "tangerine_whistle");
        assert_eq!(schedule.rules_at(2_675_000).name(), "spurious_dragon");
        assert_eq!(schedule.rules_at(4_370_000).name(), "byzantium");
        assert_eq!(schedule.rules_at(2_675_000).chain_id(), Some(1));
    }

    #[test]
    fn test_absent_forks_drop_out() {
        let config = NetworkConfig {
            name: "devnet".to_string(),
            chain_id: 1337,
            forks: ForkHeights {
                homestead: Some(10),
                tangerine_whistle: None,
                spurious_dragon: Some(20),
                byzantium: None,
            },
            boot_nodes: Vec::new(),
        };
        let schedule = config.fork_schedule().unwrap();
        assert_eq!(schedule.rules_at(9).name(), "frontier");
        assert_eq!(schedule.rules_at(10).name(), "homestead");
        assert_eq!(schedule.rules_at(20).name(), "spurious_dragon");
        // Spurious wraps homestead directly when the repricing fork was
        // never scheduled, and still reports the configured tag.
        assert_eq!(schedule.rules_at(20).chain_id(), Some(1337));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name = "testnet"
chain_id = 3
boot_nodes = ["127.0.0.1:30303"]

[forks]
homestead = 0
spurious_dragon = 10
"#
        )
        .unwrap();
        let config = NetworkConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "testnet");
        assert_eq!(config.chain_id, 3);
        assert_eq!(config.forks.homestead, Some(0));
        assert_eq!(config.forks.tangerine_whistle, None);
        assert_eq!(config.boot_nodes.len(), 1);
    }

    #[test]
    fn test_load_defaults_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"minimal\"").unwrap();
        let config = NetworkConfig::load(file.path()).unwrap();
        assert_eq!(config.chain_id, 1);
        assert!(config.boot_nodes.is_empty());
        assert_eq!(config.forks.byzantium, None);
    }

    #[test]
    fn test_load_rejects_missing_file_and_bad_toml() {
        assert!(matches!(
            NetworkConfig::load("/nonexistent/settings.toml"),
            Err(ChainError::Config(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chain_id = \"not a number\"").unwrap();
        assert!(matches!(
            NetworkConfig::load(file.path()),
            Err(ChainError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_zero_chain_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"bad\"\nchain_id = 0").unwrap();
        assert!(matches!(
            NetworkConfig::load(file.path()),
            Err(ChainError::Config(_))
        ));
    }

    #[test]
    fn test_boot_nodes_fail_fast() {
        let mut config = NetworkConfig::mainnet();
        config.boot_nodes = vec![
            "127.0.0.1:30303".to_string(),
            "not an address".to_string(),
        ];
        assert!(matches!(config.boot_nodes(), Err(ChainError::Format(_))));

        config.boot_nodes.pop();
        let nodes = config.boot_nodes().unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_synthetic());
    }
}
