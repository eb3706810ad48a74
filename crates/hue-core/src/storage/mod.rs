//! Local storage for bridge credentials.

pub mod config;

pub use config::{BridgeConfig, ConfigFile, CONFIG_FILE_NAME};
