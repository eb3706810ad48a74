//! Command implementations.
//!
//! Each `run_*` function connects through the [`Context`](crate::context::Context)
//! and hands the bridge to a handler that is generic over
//! [`BridgeApi`](hue_core::bridge::BridgeApi), so the handlers run against
//! an in-process bridge in tests.

pub mod bridge;
pub mod discover;
pub mod groups;
pub mod lights;
pub mod sensors;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::run_bridge_config;
pub use discover::{run_discover_bridges, run_discover_lights, run_discover_sensors};
pub use groups::{run_delete_group, run_list_groups, run_new_group, run_toggle_group};
pub use lights::{run_lights, run_list_lights};
pub use sensors::{run_list_sensors, run_sensor_set};
pub use user::run_create_user;

use crate::error::CliError;

/// Destination for command output.
pub trait Printer {
    fn print(&mut self, text: String);
}

/// Prints each report on its own line of standard output.
pub struct Stdout;

impl Printer for Stdout {
    fn print(&mut self, text: String) {
        println!("{}", text);
    }
}

/// Value of a required string flag; empty counts as missing.
pub(crate) fn required<'a>(value: &'a Option<String>, usage: &str) -> Result<&'a str, CliError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::missing_flag(usage))
}
