//! Request bodies for the Hue REST API.

use serde::Serialize;

/// Maximum length of the device part of a `devicetype`.
pub const MAX_DEVICE_NAME_LEN: usize = 19;

/// Application prefix used when registering a user.
pub const APPLICATION_NAME: &str = "hue-cli";

/// Partial light state for `PUT /lights/<n>/state`; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LightStateChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

impl LightStateChange {
    pub fn power(on: bool) -> Self {
        Self {
            on: Some(on),
            ..Default::default()
        }
    }

    /// A colour loop only runs on a light that is on.
    pub fn color_loop(enabled: bool) -> Self {
        Self {
            on: enabled.then_some(true),
            effect: Some(if enabled { Effect::ColorLoop } else { Effect::None }),
            ..Default::default()
        }
    }

    pub fn alert(alert: Alert) -> Self {
        Self {
            alert: Some(alert),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    None,
    ColorLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alert {
    None,
    /// A single breathe cycle.
    Select,
    /// Breathe cycles for 15 seconds, or until `none` is sent.
    LSelect,
}

/// Body of `POST /groups`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub class: String,
    pub lights: Vec<String>,
}

impl NewGroup {
    pub fn room(name: &str, class: &str, lights: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            group_type: "Room".to_string(),
            class: class.to_string(),
            lights: lights.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupAction {
    pub on: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorRename {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUser {
    #[serde(rename = "devicetype")]
    pub device_type: String,
}

impl CreateUser {
    /// Builds `hue-cli#<device>`, truncating the device part to the bridge limit.
    pub fn for_device(device: &str) -> Self {
        let device: String = device.chars().take(MAX_DEVICE_NAME_LEN).collect();
        Self {
            device_type: format!("{}#{}", APPLICATION_NAME, device),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_loop_body() {
        let on = serde_json::to_value(LightStateChange::color_loop(true)).unwrap();
        assert_eq!(on, json!({"on": true, "effect": "colorloop"}));

        let off = serde_json::to_value(LightStateChange::color_loop(false)).unwrap();
        assert_eq!(off, json!({"effect": "none"}));
    }

    #[test]
    fn test_alert_body() {
        let body = serde_json::to_value(LightStateChange::alert(Alert::LSelect)).unwrap();
        assert_eq!(body, json!({"alert": "lselect"}));
    }

    #[test]
    fn test_new_group_body() {
        let body = serde_json::to_value(NewGroup::room("Study", "Office", &[2, 3])).unwrap();
        assert_eq!(
            body,
            json!({"name": "Study", "type": "Room", "class": "Office", "lights": ["2", "3"]})
        );
    }

    #[test]
    fn test_device_type_truncated() {
        let user = CreateUser::for_device("a-very-long-workstation-name");
        assert_eq!(user.device_type, "hue-cli#a-very-long-worksta");
        assert_eq!(user.device_type.len(), APPLICATION_NAME.len() + 1 + MAX_DEVICE_NAME_LEN);
    }
}
