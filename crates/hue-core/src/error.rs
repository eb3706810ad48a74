//! Error types for hue-core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

/// Errors reported by, or while talking to, a bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to connect to bridge {ip} ({message})")]
    Connection { ip: String, message: String },

    #[error("invalid bridge address '{0}'")]
    InvalidAddress(String),

    #[error("unauthorized user on bridge {ip}: {description}")]
    Unauthorized { ip: String, description: String },

    #[error("link button on bridge {ip} not pressed, press it and retry within 30 seconds")]
    LinkButtonNotPressed { ip: String },

    #[error("bridge {ip} rejected request to {address} (type {code}): {description}")]
    Api {
        ip: String,
        code: u16,
        address: String,
        description: String,
    },

    #[error("Invalid response from {ip}: {message}")]
    InvalidResponse { ip: String, message: String },

    #[error("not logged in on bridge {ip}")]
    NotAuthenticated { ip: String },

    #[error("no light named '{0}'")]
    LightNotFound(String),

    #[error("no light with index {0}")]
    LightIndexNotFound(u32),

    #[error("no group named '{0}'")]
    GroupNotFound(String),

    #[error("no sensor with index {0}")]
    SensorNotFound(u32),

    #[error("bridge discovery failed: {0}")]
    Discovery(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config not found: {0}")]
    NotFound(String),

    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("failed to convert config to yaml ({0})")]
    Serialize(#[source] serde_yaml::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing bridge address: pass --bridge=<ip-address> or add it to the config file")]
    MissingBridgeAddress,

    #[error("missing username: pass --username=<username> or add it to the config file")]
    MissingUsername,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
