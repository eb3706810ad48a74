//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use serde::Serialize;

use hue_core::bridge::BridgeApi;
use hue_core::storage::ConfigFile;
use hue_core::types::{BridgeConfiguration, BridgeInfo, Group, Light, NewDevices, Sensor};

/// One row of `discover-bridges` output.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeReport {
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<BridgeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeReport {
    pub fn from_bridge<B: BridgeApi>(bridge: &B, id: Option<String>) -> Self {
        Self {
            ip_address: bridge.ip_address().to_string(),
            id,
            info: Some(bridge.info().clone()),
            error: None,
        }
    }

    pub fn unreachable(ip_address: &str, id: Option<String>, error: String) -> Self {
        Self {
            ip_address: ip_address.to_string(),
            id,
            info: None,
            error: Some(error),
        }
    }
}

/// Output formatter trait
pub trait OutputFormatter {
    fn format_lights(&self, lights: &[Light]) -> String;

    /// Format groups; `lights` resolves member indexes to names.
    fn format_groups(&self, groups: &[Group], lights: &[Light]) -> String;

    fn format_sensors(&self, sensors: &[Sensor]) -> String;

    /// Format the result of the last search for new lights or sensors.
    fn format_new_devices(&self, kind: &str, found: &NewDevices) -> String;

    fn format_bridges(&self, bridges: &[BridgeReport]) -> String;

    fn format_bridge_config(&self, ip: &str, config: &BridgeConfiguration) -> String;

    /// Format the config document produced by `create-user`.
    fn format_new_config(&self, config: &ConfigFile, yaml: &str) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}

/// Name of a group member, falling back to its index.
pub(crate) fn light_name(lights: &[Light], index: &str) -> String {
    index
        .parse::<u32>()
        .ok()
        .and_then(|i| lights.iter().find(|l| l.index == i))
        .map(|l| l.name.clone())
        .unwrap_or_else(|| format!("#{}", index))
}
