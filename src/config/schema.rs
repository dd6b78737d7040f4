//! Configuration schema for stagecache
//!
//! Configuration is stored at `~/.config/stagecache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Artifact cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl GeneralConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Artifact cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Durable tier directory (default: platform data dir)
    pub root_dir: Option<PathBuf>,

    /// Pretty-print artifact files
    pub pretty: bool,
}

impl CacheConfig {
    /// The configured root, or the platform default
    pub fn resolved_root(&self) -> PathBuf {
        self.root_dir
            .clone()
            .unwrap_or_else(default_artifacts_dir)
    }
}

/// Default durable tier location
pub fn default_artifacts_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stagecache")
        .join("artifacts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.log_format, "text");
        assert!(config.cache.root_dir.is_none());
        assert!(!config.cache.pretty);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            root_dir = "/srv/pipeline/artifacts"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.cache.resolved_root(),
            PathBuf::from("/srv/pipeline/artifacts")
        );
        assert!(!config.general.json_logs()); // default preserved
    }

    #[test]
    fn default_root_is_under_stagecache() {
        let root = CacheConfig::default().resolved_root();
        assert!(root.ends_with("stagecache/artifacts"));
    }

    #[test]
    fn json_log_format() {
        let config: Config = toml::from_str("[general]\nlog_format = \"JSON\"").unwrap();
        assert!(config.general.json_logs());
    }
}
