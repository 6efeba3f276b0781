//! Sampling configuration, loaded from JSON and clamped into supported ranges.

use crate::classify::ClassificationTable;
use crate::error::{KinemeterError, Result};
use crate::scheduler::NoTargetPolicy;
use kinemeter_api::ExplorationBudget;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SAMPLE_EVERY_TICKS_RANGE: RangeInclusive<u32> = 1..=200;
pub const MAX_BFS_NODES_RANGE: RangeInclusive<u32> = 64..=20_000;
pub const CACHE_TTL_TICKS_RANGE: RangeInclusive<u32> = 1..=200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Minimum ticks between two exploration attempts.
    pub sample_every_ticks: u32,
    /// Node budget for one exploration.
    pub max_bfs_nodes: u32,
    /// Ticks a snapshot is served from cache.
    pub cache_ttl_ticks: u32,
    pub no_target: NoTargetPolicy,
    pub classification: ClassificationTable,
    /// Whether renderers show the origin's RPM.
    pub show_rpm: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_every_ticks: 5,
            max_bfs_nodes: ExplorationBudget::DEFAULT_MAX_NODES,
            cache_ttl_ticks: 5,
            no_target: NoTargetPolicy::default(),
            classification: ClassificationTable::default(),
            show_rpm: true,
        }
    }
}

fn clamp_field(name: &str, value: u32, range: &RangeInclusive<u32>) -> u32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        warn!(
            "Config value {}={} out of range {}..={}, using {}",
            name,
            value,
            range.start(),
            range.end(),
            clamped
        );
    }
    clamped
}

impl SamplingConfig {
    pub fn budget(&self) -> ExplorationBudget {
        ExplorationBudget::new(self.max_bfs_nodes)
    }

    /// Clamps every tunable into its supported range.
    pub fn validated(mut self) -> Self {
        self.sample_every_ticks = clamp_field(
            "sample_every_ticks",
            self.sample_every_ticks,
            &SAMPLE_EVERY_TICKS_RANGE,
        );
        self.max_bfs_nodes = clamp_field("max_bfs_nodes", self.max_bfs_nodes, &MAX_BFS_NODES_RANGE);
        self.cache_ttl_ticks =
            clamp_field("cache_ttl_ticks", self.cache_ttl_ticks, &CACHE_TTL_TICKS_RANGE);
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: SamplingConfig = serde_json::from_str(content)?;
        Ok(config.validated())
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| match e {
            KinemeterError::Json(err) => {
                KinemeterError::Config(format!("{}: {}", path.display(), err))
            }
            other => other,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// `$HOME/.kinemeter/config.json`
pub fn default_config_path() -> PathBuf {
    crate::logging::home_dir().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::NodeCategory;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = SamplingConfig::default();
        assert_eq!(config.sample_every_ticks, 5);
        assert_eq!(config.max_bfs_nodes, 2048);
        assert_eq!(config.cache_ttl_ticks, 5);
        assert_eq!(config.no_target, NoTargetPolicy::Retain);
        assert!(config.show_rpm);
        assert_eq!(config.budget().max_nodes, 2048);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SamplingConfig::from_json_str(r#"{"cache_ttl_ticks": 20, "show_rpm": false}"#).unwrap();
        assert_eq!(config.cache_ttl_ticks, 20);
        assert!(!config.show_rpm);
        assert_eq!(config.sample_every_ticks, 5);
        assert_eq!(config.classification, ClassificationTable::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = SamplingConfig::from_json_str(
            r#"{"sample_every_ticks": 0, "max_bfs_nodes": 1000000, "cache_ttl_ticks": 500}"#,
        )
        .unwrap();
        assert_eq!(config.sample_every_ticks, 1);
        assert_eq!(config.max_bfs_nodes, 20_000);
        assert_eq!(config.cache_ttl_ticks, 200);
    }

    #[test]
    fn test_policy_and_rules_parse() {
        let config = SamplingConfig::from_json_str(
            r#"{"no_target": "clear", "classification": [{"pattern": "engine", "category": "generator"}]}"#,
        )
        .unwrap();
        assert_eq!(config.no_target, NoTargetPolicy::Clear);
        assert_eq!(
            config.classification.category_of("create:steam_engine"),
            NodeCategory::Generator
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = SamplingConfig::default();
        config.max_bfs_nodes = 512;
        config.save(&path).unwrap();

        assert_eq!(SamplingConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SamplingConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, SamplingConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SamplingConfig::load(&path),
            Err(KinemeterError::Config(_))
        ));
    }
}
