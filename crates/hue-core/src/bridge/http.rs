//! HTTP client for the Hue REST API (v1).

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::{json, Value};

use super::api::{BridgeApi, BridgeConnector};
use crate::error::{BridgeError, CoreError, Result};
use crate::protocol::requests::{CreateUser, GroupAction, LightStateChange, NewGroup, SensorRename};
use crate::protocol::response::{parse_indexed, parse_new_devices, parse_response, parse_success};
use crate::types::{BridgeConfiguration, BridgeInfo, Group, Light, NewDevices, Sensor};

/// Per-request timeout applied by the shared client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| CoreError::Other(format!("HTTP client error: {}", e)))
}

/// Opens [`HttpBridge`] handles sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: Client,
}

impl HttpConnector {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(build_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl BridgeConnector for HttpConnector {
    type Bridge = HttpBridge;

    async fn connect(&self, ip: &str) -> Result<HttpBridge> {
        let mut bridge = HttpBridge::new(self.client.clone(), ip)?;
        bridge.refresh_info().await?;
        Ok(bridge)
    }
}

/// Handle to a bridge at a known address.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: Client,
    ip: String,
    base_url: String,
    username: Option<String>,
    info: BridgeInfo,
}

impl HttpBridge {
    /// Create a handle without touching the network.
    pub fn new(client: Client, ip: &str) -> Result<Self> {
        let ip = ip.trim();
        let valid = !ip.is_empty()
            && !ip.contains('/')
            && Url::parse(&format!("http://{}/api", ip))
                .map(|url| url.host_str().is_some())
                .unwrap_or(false);

        if !valid {
            return Err(BridgeError::InvalidAddress(ip.to_string()).into());
        }

        Ok(Self {
            client,
            ip: ip.to_string(),
            base_url: format!("http://{}/api", ip),
            username: None,
            info: BridgeInfo::default(),
        })
    }

    /// Fetch the public bridge description (`GET /api/config`).
    pub async fn refresh_info(&mut self) -> Result<&BridgeInfo> {
        let url = format!("{}/config", self.base_url);
        let value = self.request(Method::GET, &url, "config", None::<&Value>).await?;
        self.info = parse_response(value, &self.ip)?;
        Ok(&self.info)
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn user_url(&self, path: &str) -> Result<String> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| BridgeError::NotAuthenticated { ip: self.ip.clone() })?;
        Ok(format!("{}/{}/{}", self.base_url, username, path))
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        tracing::debug!(bridge = %self.ip, method = %method, path, "bridge request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| BridgeError::Connection {
            ip: self.ip.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::InvalidResponse {
                ip: self.ip.clone(),
                message: format!("HTTP {}: {}", status, body),
            }
            .into());
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| BridgeError::InvalidResponse {
                ip: self.ip.clone(),
                message: format!("Failed to parse JSON: {}", e),
            })?;

        Ok(value)
    }

    async fn get_user(&self, path: &str) -> Result<Value> {
        let url = self.user_url(path)?;
        self.request(Method::GET, &url, path, None::<&Value>).await
    }

    async fn send_user<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<Value> {
        let url = self.user_url(path)?;
        let value = self.request(method, &url, path, Some(body)).await?;
        Ok(parse_success(value, &self.ip)?)
    }
}

impl BridgeApi for HttpBridge {
    fn ip_address(&self) -> &str {
        &self.ip
    }

    fn info(&self) -> &BridgeInfo {
        &self.info
    }

    async fn login(&mut self, username: &str) -> Result<()> {
        // Group 0 always exists and is small; an unknown user gets error type 1.
        let url = format!("{}/{}/groups/0", self.base_url, username);
        let value = self
            .request(Method::GET, &url, "groups/0", None::<&Value>)
            .await?;
        parse_response::<Value>(value, &self.ip)?;

        self.username = Some(username.to_string());
        Ok(())
    }

    async fn configuration(&self) -> Result<BridgeConfiguration> {
        let value = self.get_user("config").await?;
        Ok(parse_response(value, &self.ip)?)
    }

    async fn create_user(&self, device: &str) -> Result<String> {
        let body = CreateUser::for_device(device);
        let value = self
            .request(Method::POST, &self.base_url, "", Some(&body))
            .await?;
        let success = parse_success(value, &self.ip)?;

        success
            .get("username")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                BridgeError::InvalidResponse {
                    ip: self.ip.clone(),
                    message: "No username in response".to_string(),
                }
                .into()
            })
    }

    async fn lights(&self) -> Result<Vec<Light>> {
        let value = self.get_user("lights").await?;
        Ok(parse_indexed(value, &self.ip)?)
    }

    async fn set_light_state(&self, index: u32, change: &LightStateChange) -> Result<()> {
        self.send_user(Method::PUT, &format!("lights/{}/state", index), change)
            .await?;
        Ok(())
    }

    async fn find_new_lights(&self) -> Result<()> {
        self.send_user(Method::POST, "lights", &json!({})).await?;
        Ok(())
    }

    async fn new_lights(&self) -> Result<NewDevices> {
        let value = self.get_user("lights/new").await?;
        Ok(parse_new_devices(value, &self.ip)?)
    }

    async fn groups(&self) -> Result<Vec<Group>> {
        let value = self.get_user("groups").await?;
        Ok(parse_indexed(value, &self.ip)?)
    }

    async fn create_group(&self, group: &NewGroup) -> Result<u32> {
        let success = self.send_user(Method::POST, "groups", group).await?;

        success
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| {
                BridgeError::InvalidResponse {
                    ip: self.ip.clone(),
                    message: "No group id in response".to_string(),
                }
                .into()
            })
    }

    async fn delete_group(&self, index: u32) -> Result<()> {
        let path = format!("groups/{}", index);
        let url = self.user_url(&path)?;
        let value = self
            .request(Method::DELETE, &url, &path, None::<&Value>)
            .await?;
        parse_success(value, &self.ip)?;
        Ok(())
    }

    async fn set_group_power(&self, index: u32, on: bool) -> Result<()> {
        self.send_user(Method::PUT, &format!("groups/{}/action", index), &GroupAction { on })
            .await?;
        Ok(())
    }

    async fn sensors(&self) -> Result<Vec<Sensor>> {
        let value = self.get_user("sensors").await?;
        Ok(parse_indexed(value, &self.ip)?)
    }

    async fn rename_sensor(&self, index: u32, name: &str) -> Result<()> {
        let body = SensorRename {
            name: name.to_string(),
        };
        self.send_user(Method::PUT, &format!("sensors/{}", index), &body)
            .await?;
        Ok(())
    }

    async fn find_new_sensors(&self) -> Result<()> {
        self.send_user(Method::POST, "sensors", &json!({})).await?;
        Ok(())
    }

    async fn new_sensors(&self) -> Result<NewDevices> {
        let value = self.get_user("sensors/new").await?;
        Ok(parse_new_devices(value, &self.ip)?)
    }
}
