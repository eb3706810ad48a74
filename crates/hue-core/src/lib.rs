//! Shared core library for Philips Hue bridge access.
//!
//! Provides the bridge client (`bridge`), cloud discovery (`discovery`), the
//! YAML credential store (`storage`) and the session resolver (`session`)
//! used by `hue-cli`.

pub mod bridge;
pub mod discovery;
pub mod error;
pub mod protocol;
pub mod session;
pub mod storage;
pub mod types;

pub use error::{BridgeError, ConfigError, CoreError, Result};
