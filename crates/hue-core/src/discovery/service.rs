//! Cloud bridge discovery.
//!
//! Bridges register their internal address with the Hue portal; asking the
//! portal returns every bridge seen behind the caller's public IP.

use std::net::IpAddr;

use reqwest::Client;

use crate::bridge::http::build_client;
use crate::error::{BridgeError, Result};
use crate::types::DiscoveredBridge;

/// Hue portal discovery endpoint
pub const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

pub struct DiscoveryService {
    client: Client,
    url: String,
}

impl DiscoveryService {
    pub fn new() -> Result<Self> {
        Ok(Self::with_url(build_client()?, DISCOVERY_URL))
    }

    pub fn with_url(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Ask the portal for known bridges. Duplicate addresses are dropped and
    /// the result is sorted by address.
    pub async fn discover(&self) -> Result<Vec<DiscoveredBridge>> {
        tracing::debug!(url = %self.url, "requesting bridge discovery");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BridgeError::Discovery(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Discovery(format!("HTTP {} from {}", status, self.url)).into());
        }

        let mut bridges: Vec<DiscoveredBridge> = response
            .json()
            .await
            .map_err(|e| BridgeError::Discovery(format!("invalid response: {}", e)))?;

        bridges.sort_by(|a, b| address_key(&a.ip_address).cmp(&address_key(&b.ip_address)));
        bridges.dedup_by(|a, b| a.ip_address == b.ip_address);

        tracing::debug!(count = bridges.len(), "bridges discovered");
        Ok(bridges)
    }
}

/// Numeric order for IP addresses; anything unparsable sorts first, by text.
fn address_key(address: &str) -> (Option<IpAddr>, &str) {
    (address.parse().ok(), address)
}
