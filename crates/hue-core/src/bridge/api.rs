//! The operations a bridge handle offers to callers.
//!
//! `BridgeApi` is implemented over HTTP by [`super::http::HttpBridge`]; the
//! provided methods build the lookups and compound actions on top of the
//! primitive calls so every implementation shares them.

use std::time::Duration;

use crate::error::{BridgeError, Result};
use crate::protocol::requests::{Alert, LightStateChange, NewGroup};
use crate::types::{BridgeConfiguration, BridgeInfo, Group, Light, NewDevices, Sensor};

/// A single `lselect` alert runs for at most this long on the bridge.
pub const MAX_ALERT_DURATION: Duration = Duration::from_secs(15);

/// A handle to one bridge.
#[allow(async_fn_in_trait)]
pub trait BridgeApi {
    fn ip_address(&self) -> &str;

    fn info(&self) -> &BridgeInfo;

    /// Friendly name of the bridge.
    fn name(&self) -> &str {
        &self.info().name
    }

    /// Authenticate with a whitelisted username.
    async fn login(&mut self, username: &str) -> Result<()>;

    async fn configuration(&self) -> Result<BridgeConfiguration>;

    /// Register a new user; the link button must have been pressed. Returns
    /// the username issued by the bridge.
    async fn create_user(&self, device: &str) -> Result<String>;

    async fn lights(&self) -> Result<Vec<Light>>;

    async fn set_light_state(&self, index: u32, change: &LightStateChange) -> Result<()>;

    /// Start a search for new lights (runs for about a minute on the bridge).
    async fn find_new_lights(&self) -> Result<()>;

    async fn new_lights(&self) -> Result<NewDevices>;

    async fn groups(&self) -> Result<Vec<Group>>;

    /// Returns the index of the created group.
    async fn create_group(&self, group: &NewGroup) -> Result<u32>;

    async fn delete_group(&self, index: u32) -> Result<()>;

    async fn set_group_power(&self, index: u32, on: bool) -> Result<()>;

    async fn sensors(&self) -> Result<Vec<Sensor>>;

    async fn rename_sensor(&self, index: u32, name: &str) -> Result<()>;

    async fn find_new_sensors(&self) -> Result<()>;

    async fn new_sensors(&self) -> Result<NewDevices>;

    async fn light_by_name(&self, name: &str) -> Result<Light> {
        self.lights()
            .await?
            .into_iter()
            .find(|l| l.name == name)
            .ok_or_else(|| BridgeError::LightNotFound(name.to_string()).into())
    }

    async fn light_by_index(&self, index: u32) -> Result<Light> {
        self.lights()
            .await?
            .into_iter()
            .find(|l| l.index == index)
            .ok_or_else(|| BridgeError::LightIndexNotFound(index).into())
    }

    async fn group_by_name(&self, name: &str) -> Result<Group> {
        self.groups()
            .await?
            .into_iter()
            .find(|g| g.name == name)
            .ok_or_else(|| BridgeError::GroupNotFound(name.to_string()).into())
    }

    async fn sensor_by_index(&self, index: u32) -> Result<Sensor> {
        self.sensors()
            .await?
            .into_iter()
            .find(|s| s.index == index)
            .ok_or_else(|| BridgeError::SensorNotFound(index).into())
    }

    /// Flip a light on or off. Returns the new power state.
    async fn toggle_light(&self, light: &Light) -> Result<bool> {
        let on = !light.state.on;
        self.set_light_state(light.index, &LightStateChange::power(on))
            .await?;
        Ok(on)
    }

    async fn set_color_loop(&self, light: &Light, enabled: bool) -> Result<()> {
        self.set_light_state(light.index, &LightStateChange::color_loop(enabled))
            .await
    }

    /// Let a light breathe for `duration`, then stop the alert.
    async fn blink(&self, light: &Light, duration: Duration) -> Result<()> {
        let mut remaining = duration;

        while !remaining.is_zero() {
            self.set_light_state(light.index, &LightStateChange::alert(Alert::LSelect))
                .await?;
            let step = remaining.min(MAX_ALERT_DURATION);
            tokio::time::sleep(step).await;
            remaining -= step;
        }

        self.set_light_state(light.index, &LightStateChange::alert(Alert::None))
            .await
    }

    /// Turn a group off if any of its lights is on, otherwise on. Returns the
    /// new power state.
    async fn toggle_group(&self, group: &Group) -> Result<bool> {
        let on = !group.state.any_on;
        self.set_group_power(group.index, on).await?;
        Ok(on)
    }
}

/// Opens handles to bridges by address.
#[allow(async_fn_in_trait)]
pub trait BridgeConnector {
    type Bridge: BridgeApi;

    /// Construct a handle and fetch the public bridge description. No
    /// username is involved.
    async fn connect(&self, ip: &str) -> Result<Self::Bridge>;
}
