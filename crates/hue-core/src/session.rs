//! Bridge session resolution.
//!
//! Bridge address and username come from two layers, in order of precedence:
//! explicit flags, then the first entry of the config file. There is no
//! built-in default for either. A flag that was given wins over the file even
//! when it is empty.

use crate::bridge::{BridgeApi, BridgeConnector};
use crate::error::{ConfigError, Result};
use crate::storage::ConfigFile;

/// Where to find a bridge and how to authenticate to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeOptions {
    pub ip_address: Option<String>,
    pub username: Option<String>,
}

impl BridgeOptions {
    pub fn new(ip_address: Option<String>, username: Option<String>) -> Self {
        Self {
            ip_address,
            username,
        }
    }

    /// Values of the default bridge in a config file.
    pub fn from_config(config: &ConfigFile) -> Self {
        match config.default_bridge() {
            Some(bridge) => Self::new(Some(bridge.ip_address.clone()), Some(bridge.user.clone())),
            None => Self::default(),
        }
    }

    /// Layer `flags` over the config file, field by field.
    pub fn layered(flags: BridgeOptions, config: Option<&ConfigFile>) -> Self {
        let file = config.map(Self::from_config).unwrap_or_default();

        Self {
            ip_address: flags.ip_address.or(file.ip_address),
            username: flags.username.or(file.username),
        }
    }

    /// The bridge address, if set and non-empty.
    pub fn address(&self) -> std::result::Result<&str, ConfigError> {
        non_empty(&self.ip_address).ok_or(ConfigError::MissingBridgeAddress)
    }

    /// Address and username. The address is checked first.
    pub fn credentials(&self) -> std::result::Result<(&str, &str), ConfigError> {
        let address = self.address()?;
        let username = non_empty(&self.username).ok_or(ConfigError::MissingUsername)?;
        Ok((address, username))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Connect to the configured bridge and log in.
///
/// A single attempt: connection and authentication failures are returned as
/// reported by the connector.
pub async fn resolve<C: BridgeConnector>(connector: &C, options: &BridgeOptions) -> Result<C::Bridge> {
    let (address, username) = options.credentials()?;

    tracing::debug!(bridge = %address, "connecting to bridge");
    let mut bridge = connector.connect(address).await?;
    bridge.login(username).await?;

    Ok(bridge)
}

/// Connect to the configured bridge without logging in.
pub async fn resolve_unauthenticated<C: BridgeConnector>(
    connector: &C,
    options: &BridgeOptions,
) -> Result<C::Bridge> {
    let address = options.address()?;

    tracing::debug!(bridge = %address, "connecting to bridge");
    connector.connect(address).await
}
