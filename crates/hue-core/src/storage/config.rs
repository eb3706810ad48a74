//! Bridge configuration file.
//!
//! A small YAML document listing known bridges and the username issued by
//! each one:
//!
//! ```yaml
//! bridges:
//!   - ipaddress: "10.0.0.5"
//!     user: "abc123"
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ConfigError;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hue-cli.yaml";

/// One known bridge and its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    pub user: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub bridges: Vec<BridgeConfig>,
}

impl ConfigFile {
    /// A document holding exactly one bridge.
    pub fn single(ip_address: &str, user: &str) -> Self {
        Self {
            bridges: vec![BridgeConfig {
                ip_address: ip_address.to_string(),
                user: user.to_string(),
            }],
        }
    }

    /// The bridge used when no flags say otherwise.
    pub fn default_bridge(&self) -> Option<&BridgeConfig> {
        self.bridges.first()
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Read and parse the file at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        Self::from_yaml(&content)
    }

    /// Like [`ConfigFile::load`], but a missing or broken file only gets logged.
    pub async fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        match Self::load(path).await {
            Ok(config) => {
                tracing::debug!(
                    path = %path.display(),
                    bridges = config.bridges.len(),
                    "loaded config file"
                );
                Some(config)
            }
            Err(ConfigError::NotFound(_)) => {
                tracing::debug!(path = %path.display(), "no config file");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load config file: {}", e);
                None
            }
        }
    }

    /// Write the document to `path`, replacing any existing file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_yaml()?;

        fs::write(path, content).await.map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BRIDGES: &str = r#"
bridges:
  - ipaddress: "10.0.0.5"
    user: "abc123"
  - ipaddress: "10.0.0.9"
    user: "def456"
"#;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[tokio::test]
    async fn test_load_and_reserialize_first_entry() {
        let (_tmp, path) = write_config(TWO_BRIDGES);

        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config.bridges.len(), 2);

        let first = config.default_bridge().unwrap();
        let yaml = ConfigFile::single(&first.ip_address, &first.user).to_yaml().unwrap();
        let reloaded = ConfigFile::from_yaml(&yaml).unwrap();

        assert_eq!(reloaded.bridges[0].ip_address, "10.0.0.5");
        assert_eq!(reloaded.bridges[0].user, "abc123");
    }

    #[tokio::test]
    async fn test_save_then_load_is_identity() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.yaml");
        let config = ConfigFile::single("192.168.1.20", "Xy7-token_1");

        config.save(&path).await.unwrap();
        let loaded = ConfigFile::load(&path).await.unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_uses_wire_keys() {
        let yaml = ConfigFile::single("10.0.0.5", "abc123").to_yaml().unwrap();
        assert!(yaml.starts_with("bridges:"));
        assert!(yaml.contains("ipaddress:"));
        assert!(yaml.contains("10.0.0.5"));
        assert!(yaml.contains("user: abc123"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.yaml");

        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(ConfigFile::load_optional(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let (_tmp, path) = write_config("bridges: [ipaddress: ");

        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(ConfigFile::load_optional(&path).await.is_none());
    }

    #[test]
    fn test_empty_documents() {
        assert_eq!(ConfigFile::from_yaml("").unwrap(), ConfigFile::default());
        assert_eq!(ConfigFile::from_yaml("bridges: []").unwrap(), ConfigFile::default());
        assert!(ConfigFile::from_yaml("bridges: []").unwrap().default_bridge().is_none());
    }
}
