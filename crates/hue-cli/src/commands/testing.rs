//! In-process bridge for command handler tests.

use std::cell::RefCell;

use hue_core::bridge::{BridgeApi, BridgeConnector};
use hue_core::error::{BridgeError, Result};
use hue_core::protocol::requests::{LightStateChange, NewGroup};
use hue_core::types::{
    BridgeConfiguration, BridgeInfo, Group, GroupState, LastScan, Light, LightState, NewDevice, NewDevices,
    Sensor,
};

use super::Printer;

/// Collects printed reports in order.
impl Printer for Vec<String> {
    fn print(&mut self, text: String) {
        self.push(text);
    }
}

/// Serves canned data and records every call that changes state.
pub struct FakeBridge {
    pub ip: String,
    pub info: BridgeInfo,
    pub lights: Vec<Light>,
    pub groups: Vec<Group>,
    pub sensors: Vec<Sensor>,
    pub new_devices: NewDevices,
    /// Reject logins and reads with a connection error.
    pub offline: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self {
            ip: "10.0.0.5".to_string(),
            info: BridgeInfo {
                name: "Philips hue".to_string(),
                model_id: "BSB002".to_string(),
                ..Default::default()
            },
            lights: vec![light(1, "Desk", true), light(2, "Hall", false), light(4, "Porch", false)],
            groups: vec![
                group(1, "Living", &["1", "2"], true),
                group(2, "Garden", &["4"], false),
            ],
            sensors: vec![Sensor {
                index: 3,
                name: "Hue Tap 1".to_string(),
                sensor_type: "ZGPSwitch".to_string(),
                model_id: "ZGPSWITCH".to_string(),
                ..Default::default()
            }],
            new_devices: NewDevices {
                last_scan: LastScan::Active,
                devices: vec![NewDevice {
                    index: 7,
                    name: "Hue color lamp 7".to_string(),
                }],
            },
            offline: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(BridgeError::Connection {
                ip: self.ip.clone(),
                message: "connection refused".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

pub fn light(index: u32, name: &str, on: bool) -> Light {
    Light {
        index,
        name: name.to_string(),
        light_type: "Extended color light".to_string(),
        model_id: "LCT015".to_string(),
        state: LightState {
            on,
            reachable: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn group(index: u32, name: &str, lights: &[&str], any_on: bool) -> Group {
    Group {
        index,
        name: name.to_string(),
        group_type: "Room".to_string(),
        class: Some("Other".to_string()),
        lights: lights.iter().map(|l| l.to_string()).collect(),
        state: GroupState {
            all_on: false,
            any_on,
        },
    }
}

impl BridgeApi for FakeBridge {
    fn ip_address(&self) -> &str {
        &self.ip
    }

    fn info(&self) -> &BridgeInfo {
        &self.info
    }

    async fn login(&mut self, username: &str) -> Result<()> {
        self.check_online()?;
        self.record(format!("login {}", username));
        Ok(())
    }

    async fn configuration(&self) -> Result<BridgeConfiguration> {
        self.check_online()?;
        Ok(BridgeConfiguration {
            name: self.info.name.clone(),
            ip_address: self.ip.clone(),
            ..Default::default()
        })
    }

    async fn create_user(&self, device: &str) -> Result<String> {
        self.check_online()?;
        self.record(format!("create_user {}", device));
        Ok("new-user-token".to_string())
    }

    async fn lights(&self) -> Result<Vec<Light>> {
        self.check_online()?;
        Ok(self.lights.clone())
    }

    async fn set_light_state(&self, index: u32, change: &LightStateChange) -> Result<()> {
        self.check_online()?;
        let body = serde_json::to_string(change).unwrap_or_default();
        self.record(format!("light {} {}", index, body));
        Ok(())
    }

    async fn find_new_lights(&self) -> Result<()> {
        self.check_online()?;
        self.record("find_new_lights".to_string());
        Ok(())
    }

    async fn new_lights(&self) -> Result<NewDevices> {
        self.check_online()?;
        Ok(self.new_devices.clone())
    }

    async fn groups(&self) -> Result<Vec<Group>> {
        self.check_online()?;
        Ok(self.groups.clone())
    }

    async fn create_group(&self, group: &NewGroup) -> Result<u32> {
        self.check_online()?;
        self.record(format!("create_group {} {}", group.name, group.lights.join(",")));
        Ok(9)
    }

    async fn delete_group(&self, index: u32) -> Result<()> {
        self.check_online()?;
        self.record(format!("delete_group {}", index));
        Ok(())
    }

    async fn set_group_power(&self, index: u32, on: bool) -> Result<()> {
        self.check_online()?;
        self.record(format!("group {} on={}", index, on));
        Ok(())
    }

    async fn sensors(&self) -> Result<Vec<Sensor>> {
        self.check_online()?;
        Ok(self.sensors.clone())
    }

    async fn rename_sensor(&self, index: u32, name: &str) -> Result<()> {
        self.check_online()?;
        self.record(format!("rename_sensor {} {}", index, name));
        Ok(())
    }

    async fn find_new_sensors(&self) -> Result<()> {
        self.check_online()?;
        self.record("find_new_sensors".to_string());
        Ok(())
    }

    async fn new_sensors(&self) -> Result<NewDevices> {
        self.check_online()?;
        Ok(self.new_devices.clone())
    }
}

/// Hands out [`FakeBridge`]s; addresses listed in `offline` fail to connect.
#[derive(Default)]
pub struct FakeConnector {
    pub offline: Vec<String>,
    pub connects: RefCell<Vec<String>>,
}

impl BridgeConnector for FakeConnector {
    type Bridge = FakeBridge;

    async fn connect(&self, ip: &str) -> Result<FakeBridge> {
        self.connects.borrow_mut().push(ip.to_string());

        if self.offline.iter().any(|o| o == ip) {
            return Err(BridgeError::Connection {
                ip: ip.to_string(),
                message: "no route to host".to_string(),
            }
            .into());
        }

        Ok(FakeBridge {
            ip: ip.to_string(),
            ..FakeBridge::new()
        })
    }
}
