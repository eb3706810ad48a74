//! Bridge communication layer.
//!
//! `api` defines the operations a bridge handle offers, `http` implements
//! them against the bridge REST API.

pub mod api;
pub mod http;

pub use api::{BridgeApi, BridgeConnector};
pub use http::{HttpBridge, HttpConnector};
