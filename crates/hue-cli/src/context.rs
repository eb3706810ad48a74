//! Per-invocation state shared by the command handlers.

use hue_core::bridge::{HttpBridge, HttpConnector};
use hue_core::session::{self, BridgeOptions};
use hue_core::storage::ConfigFile;

use crate::cli::Cli;
use crate::error::Result;
use crate::output::{get_formatter, OutputFormatter};

pub struct Context {
    /// Flags layered over the config file.
    pub options: BridgeOptions,
    pub json: bool,
    connector: HttpConnector,
}

impl Context {
    /// Read the config file (if any) and merge the global flags over it.
    pub async fn from_cli(cli: &Cli) -> Result<Self> {
        let config = ConfigFile::load_optional(&cli.config).await;
        let flags = BridgeOptions::new(cli.bridge.clone(), cli.username.clone());

        Ok(Self {
            options: BridgeOptions::layered(flags, config.as_ref()),
            json: cli.json,
            connector: HttpConnector::new()?,
        })
    }

    pub fn connector(&self) -> &HttpConnector {
        &self.connector
    }

    /// Connect to the configured bridge and log in.
    pub async fn bridge(&self) -> Result<HttpBridge> {
        Ok(session::resolve(&self.connector, &self.options).await?)
    }

    /// Connect to the configured bridge; only the address is needed.
    pub async fn unauthenticated_bridge(&self) -> Result<HttpBridge> {
        Ok(session::resolve_unauthenticated(&self.connector, &self.options).await?)
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.json)
    }
}
