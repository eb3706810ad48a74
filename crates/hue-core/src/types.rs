//! Hue domain types as reported by the bridge REST API (v1).
//!
//! The bridge keys lights, groups and sensors by a numeric string index. The
//! index is not part of the JSON object itself, so it is skipped on
//! deserialization and filled in by the response parser.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// Items the bridge reports in an index-keyed map.
pub trait Indexed {
    fn index(&self) -> u32;
    fn set_index(&mut self, index: u32);
}

macro_rules! impl_indexed {
    ($($ty:ty),*) => {
        $(impl Indexed for $ty {
            fn index(&self) -> u32 {
                self.index
            }

            fn set_index(&mut self, index: u32) {
                self.index = index;
            }
        })*
    };
}

// ==================== Lights ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Light {
    #[serde(skip_deserializing)]
    pub index: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub light_type: String,
    #[serde(rename = "modelid", default)]
    pub model_id: String,
    #[serde(rename = "manufacturername", default)]
    pub manufacturer_name: Option<String>,
    #[serde(rename = "productname", default)]
    pub product_name: Option<String>,
    #[serde(rename = "uniqueid", default)]
    pub unique_id: String,
    #[serde(rename = "swversion", default)]
    pub sw_version: Option<String>,
    #[serde(default)]
    pub state: LightState,
}

/// Current state of a light
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightState {
    pub on: bool,
    /// Brightness, 1..=254
    pub bri: Option<u8>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
    /// Colour temperature in mireds
    pub ct: Option<u16>,
    pub effect: Option<String>,
    pub alert: Option<String>,
    pub colormode: Option<String>,
    pub reachable: bool,
}

impl LightState {
    pub fn color_loop_active(&self) -> bool {
        self.effect.as_deref() == Some("colorloop")
    }
}

// ==================== Groups ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(skip_deserializing)]
    pub index: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub group_type: String,
    #[serde(default)]
    pub class: Option<String>,
    /// Indexes of the member lights, as strings the way the bridge reports them.
    #[serde(default)]
    pub lights: Vec<String>,
    #[serde(default)]
    pub state: GroupState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupState {
    pub all_on: bool,
    pub any_on: bool,
}

/// Aggregated power state of the lights in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPower {
    AllOn,
    SomeOn,
    Off,
}

impl GroupPower {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupPower::AllOn => "lights are on",
            GroupPower::SomeOn => "some lights are on",
            GroupPower::Off => "lights are off",
        }
    }
}

impl Group {
    pub fn power(&self) -> GroupPower {
        if self.state.all_on {
            GroupPower::AllOn
        } else if self.state.any_on {
            GroupPower::SomeOn
        } else {
            GroupPower::Off
        }
    }

    /// Member light indexes that parse as numbers.
    pub fn light_indexes(&self) -> Vec<u32> {
        self.lights.iter().filter_map(|l| l.parse().ok()).collect()
    }
}

// ==================== Sensors ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(skip_deserializing)]
    pub index: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub sensor_type: String,
    #[serde(rename = "modelid", default)]
    pub model_id: String,
    #[serde(rename = "manufacturername", default)]
    pub manufacturer_name: Option<String>,
    #[serde(rename = "productname", default)]
    pub product_name: Option<String>,
    #[serde(rename = "uniqueid", default)]
    pub unique_id: Option<String>,
    #[serde(rename = "swversion", default)]
    pub sw_version: Option<String>,
    /// Sensor-type specific state (presence, buttonevent, daylight, ...).
    #[serde(default)]
    pub state: serde_json::Value,
    #[serde(default)]
    pub config: serde_json::Value,
}

impl_indexed!(Light, Group, Sensor);

// ==================== Search results ====================

/// State of the last search for new lights or sensors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastScan {
    /// No search has been run since the bridge booted.
    None,
    /// A search is running right now.
    Active,
    At(NaiveDateTime),
    Unknown(String),
}

impl LastScan {
    pub fn parse(value: &str) -> Self {
        match value {
            "none" => LastScan::None,
            "active" => LastScan::Active,
            other => NaiveDateTime::parse_from_str(other, "%Y-%m-%dT%H:%M:%S")
                .map(LastScan::At)
                .unwrap_or_else(|_| LastScan::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for LastScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastScan::None => write!(f, "none"),
            LastScan::Active => write!(f, "active"),
            LastScan::At(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S")),
            LastScan::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for LastScan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDevice {
    pub index: u32,
    pub name: String,
}

/// Devices found by the last search, from `/lights/new` or `/sensors/new`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDevices {
    pub last_scan: LastScan,
    pub devices: Vec<NewDevice>,
}

// ==================== Bridge ====================

/// Public bridge description, available without a username.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeInfo {
    pub name: String,
    #[serde(rename = "bridgeid")]
    pub bridge_id: String,
    #[serde(rename = "modelid")]
    pub model_id: String,
    pub mac: String,
    #[serde(rename = "swversion")]
    pub sw_version: String,
    #[serde(rename = "apiversion")]
    pub api_version: String,
    #[serde(rename = "datastoreversion")]
    pub datastore_version: Option<String>,
    #[serde(rename = "factorynew")]
    pub factory_new: bool,
}

/// Full bridge configuration, requires a whitelisted username.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfiguration {
    pub name: String,
    #[serde(rename = "bridgeid")]
    pub bridge_id: String,
    #[serde(rename = "modelid")]
    pub model_id: String,
    pub mac: String,
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
    pub dhcp: Option<bool>,
    #[serde(rename = "zigbeechannel")]
    pub zigbee_channel: Option<u8>,
    #[serde(rename = "swversion")]
    pub sw_version: String,
    #[serde(rename = "apiversion")]
    pub api_version: String,
    pub timezone: Option<String>,
    #[serde(rename = "UTC")]
    pub utc: Option<String>,
    #[serde(rename = "localtime")]
    pub local_time: Option<String>,
    #[serde(rename = "linkbutton")]
    pub link_button: Option<bool>,
    #[serde(rename = "portalservices")]
    pub portal_services: Option<bool>,
    pub whitelist: BTreeMap<String, WhitelistEntry>,
}

/// An application registered on the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistEntry {
    pub name: String,
    #[serde(rename = "create date")]
    pub create_date: Option<String>,
    #[serde(rename = "last use date")]
    pub last_use_date: Option<String>,
}

/// A bridge reported by the cloud discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredBridge {
    pub id: String,
    #[serde(rename = "internalipaddress")]
    pub ip_address: String,
    #[serde(default)]
    pub port: Option<u16>,
}
