//! Response parsing for the Hue REST API.
//!
//! The bridge answers most requests with HTTP 200 and reports failures in the
//! body as `[{"error": {"type": .., "address": .., "description": ..}}]`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::BridgeError;
use crate::types::{Indexed, LastScan, NewDevice, NewDevices};

/// Error type for a whitelisted username the bridge does not know.
pub const ERROR_UNAUTHORIZED_USER: u16 = 1;

/// Error type for `create-user` before the link button was pressed.
pub const ERROR_LINK_BUTTON_NOT_PRESSED: u16 = 101;

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    code: u16,
    #[serde(default)]
    address: String,
    #[serde(default)]
    description: String,
}

/// Return the first error entry in a bridge response, if any.
pub fn check_api_error(value: &Value, bridge_ip: &str) -> Result<(), BridgeError> {
    let Some(entries) = value.as_array() else {
        return Ok(());
    };

    for entry in entries {
        let Some(error) = entry.get("error") else {
            continue;
        };

        let body: ApiErrorBody =
            serde_json::from_value(error.clone()).map_err(|e| BridgeError::InvalidResponse {
                ip: bridge_ip.to_string(),
                message: format!("Malformed error entry: {}", e),
            })?;

        return Err(match body.code {
            ERROR_UNAUTHORIZED_USER => BridgeError::Unauthorized {
                ip: bridge_ip.to_string(),
                description: body.description,
            },
            ERROR_LINK_BUTTON_NOT_PRESSED => BridgeError::LinkButtonNotPressed {
                ip: bridge_ip.to_string(),
            },
            code => BridgeError::Api {
                ip: bridge_ip.to_string(),
                code,
                address: body.address,
                description: body.description,
            },
        });
    }

    Ok(())
}

/// Check for bridge errors, then decode the body as `T`.
pub fn parse_response<T: DeserializeOwned>(value: Value, bridge_ip: &str) -> Result<T, BridgeError> {
    check_api_error(&value, bridge_ip)?;

    serde_json::from_value(value).map_err(|e| BridgeError::InvalidResponse {
        ip: bridge_ip.to_string(),
        message: format!("Failed to parse JSON: {}", e),
    })
}

/// Payload of the first `success` entry of a modifying request.
pub fn parse_success(value: Value, bridge_ip: &str) -> Result<Value, BridgeError> {
    check_api_error(&value, bridge_ip)?;

    value
        .as_array()
        .and_then(|entries| entries.iter().find_map(|e| e.get("success")))
        .cloned()
        .ok_or_else(|| BridgeError::InvalidResponse {
            ip: bridge_ip.to_string(),
            message: "No success entry in response".to_string(),
        })
}

/// Decode an index-keyed object into a list ordered by numeric index.
pub fn parse_indexed<T>(value: Value, bridge_ip: &str) -> Result<Vec<T>, BridgeError>
where
    T: DeserializeOwned + Indexed,
{
    let map: BTreeMap<String, T> = parse_response(value, bridge_ip)?;

    let mut items: Vec<T> = map
        .into_iter()
        .filter_map(|(key, mut item)| match key.parse::<u32>() {
            Ok(index) => {
                item.set_index(index);
                Some(item)
            }
            Err(_) => {
                tracing::debug!(key = %key, "skipping non-numeric entry");
                None
            }
        })
        .collect();

    items.sort_by_key(|item| item.index());
    Ok(items)
}

/// Decode a `/lights/new` or `/sensors/new` response.
pub fn parse_new_devices(value: Value, bridge_ip: &str) -> Result<NewDevices, BridgeError> {
    check_api_error(&value, bridge_ip)?;

    let Value::Object(map) = value else {
        return Err(BridgeError::InvalidResponse {
            ip: bridge_ip.to_string(),
            message: "Expected an object for new devices".to_string(),
        });
    };

    let mut last_scan = LastScan::None;
    let mut devices = Vec::new();

    for (key, entry) in map {
        if key == "lastscan" {
            last_scan = LastScan::parse(entry.as_str().unwrap_or_default());
            continue;
        }

        let Ok(index) = key.parse::<u32>() else {
            continue;
        };

        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        devices.push(NewDevice { index, name });
    }

    devices.sort_by_key(|d| d.index);

    Ok(NewDevices { last_scan, devices })
}
