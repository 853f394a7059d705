use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

// Extraction settings live in nalja_extract so the library stays usable
// without this crate.
use nalja_extract::ExtractorConfig;

const CONFIG_DIR: &str = "nalja";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_pretty_json")]
    pub pretty_json: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pretty_json: Self::default_pretty_json(),
        }
    }
}

impl DisplayConfig {
    const fn default_pretty_json() -> bool {
        true
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Read the config file; a missing file means built-in defaults.
    /// A file that exists and does not parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join(CONFIG_FILE);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        Ok(config_path)
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "extractor": {
    "default_hour": 9,
    "default_minute": 0,
    "english_enabled": true,
    "korean_enabled": true,
    "max_input_len": 65536
  },
  "display": {
    "pretty_json": true
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_template_matches_defaults() {
        let parsed: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_missing_sections_use_defaults() {
        let parsed: Config =
            serde_json::from_str(r#"{"extractor": {"default_hour": 8}}"#).expect("should parse");
        assert_eq!(parsed.extractor.default_hour, 8);
        assert_eq!(parsed.extractor.default_minute, 0);
        assert!(parsed.extractor.korean_enabled);
        assert!(parsed.display.pretty_json);
    }

    #[test]
    fn test_load_from_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("nalja-config-{}.json", std::process::id()));
        let written = std::fs::write(&path, "{ not json");
        assert!(written.is_ok());
        assert!(Config::load_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
