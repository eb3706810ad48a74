//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use super::{light_name, BridgeReport, OutputFormatter};
use hue_core::storage::ConfigFile;
use hue_core::types::{BridgeConfiguration, Group, Light, NewDevices, Sensor};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_lights(&self, lights: &[Light]) -> String {
        Self::to_json(&json!({
            "lights": lights,
            "count": lights.len()
        }))
    }

    fn format_groups(&self, groups: &[Group], lights: &[Light]) -> String {
        let items: Vec<Value> = groups
            .iter()
            .map(|group| {
                let mut value = serde_json::to_value(group).unwrap_or(json!({}));
                if let Value::Object(ref mut map) = value {
                    let names: Vec<String> = group.lights.iter().map(|l| light_name(lights, l)).collect();
                    map.insert("status".to_string(), json!(group.power()));
                    map.insert("light_names".to_string(), json!(names));
                }
                value
            })
            .collect();

        Self::to_json(&json!({
            "groups": items,
            "count": groups.len()
        }))
    }

    fn format_sensors(&self, sensors: &[Sensor]) -> String {
        Self::to_json(&json!({
            "sensors": sensors,
            "count": sensors.len()
        }))
    }

    fn format_new_devices(&self, kind: &str, found: &NewDevices) -> String {
        Self::to_json(&json!({
            "kind": kind,
            "last_scan": found.last_scan,
            "devices": found.devices
        }))
    }

    fn format_bridges(&self, bridges: &[BridgeReport]) -> String {
        Self::to_json(&json!({
            "bridges": bridges,
            "count": bridges.len()
        }))
    }

    fn format_bridge_config(&self, ip: &str, config: &BridgeConfiguration) -> String {
        let mut value = serde_json::to_value(config).unwrap_or(json!({}));
        if let Value::Object(ref mut map) = value {
            map.insert("bridge".to_string(), json!(ip));
        }
        Self::to_json(&value)
    }

    fn format_new_config(&self, config: &ConfigFile, _yaml: &str) -> String {
        Self::to_json(config)
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}
