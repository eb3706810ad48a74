//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use hue_core::storage::CONFIG_FILE_NAME;

/// hue-cli - Command-line interface for Philips Hue bridges
#[derive(Parser, Debug)]
#[command(name = "hue-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// IP-address of the bridge (overrides the config file)
    #[arg(long, global = true, env = "HUE_BRIDGE")]
    pub bridge: Option<String>,

    /// Username for authentication to the bridge (overrides the config file)
    #[arg(long, global = true, env = "HUE_USERNAME")]
    pub username: Option<String>,

    /// Config file listing known bridges
    #[arg(long, global = true, env = "HUE_CLI_CONFIG", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detailed bridge configuration
    BridgeConfig,

    /// Discover bridges in this network (via https://discovery.meethue.com/)
    DiscoverBridges,

    /// Ask the bridge to probe for new lights
    DiscoverLights(DiscoverArgs),

    /// Ask the bridge to probe for new sensors
    DiscoverSensors(DiscoverArgs),

    /// List all groups on the bridge
    ListGroups,

    /// Create a new group with selected lights
    NewGroup(NewGroupArgs),

    /// Delete a group
    DeleteGroup(GroupArgs),

    /// Toggle the light-switch for a group
    ToggleGroup(GroupArgs),

    /// List all lights attached to the bridge
    ListLights,

    /// Act on a single light
    Lights(LightsArgs),

    /// List all sensors attached to the bridge
    ListSensors,

    /// Set attributes of a sensor
    SensorSet(SensorSetArgs),

    /// Create a new user on the bridge (press the link button first)
    CreateUser(CreateUserArgs),
}

// ==================== Discover ====================

#[derive(Args, Debug, Default)]
pub struct DiscoverArgs {
    /// List what the last search found instead of starting a new one
    #[arg(long)]
    pub new: bool,
}

// ==================== Groups ====================

#[derive(Args, Debug)]
pub struct NewGroupArgs {
    /// Name of the new group
    #[arg(long)]
    pub name: Option<String>,

    /// Type of the room (Bedroom, Kitchen, ...)
    #[arg(long, default_value = "Other")]
    pub class: String,

    /// Comma-separated indexes of the lights to add, e.g. 2,3,4
    #[arg(long)]
    pub lights: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct GroupArgs {
    /// Name of the group
    #[arg(long)]
    pub name: Option<String>,
}

// ==================== Lights ====================

#[derive(Args, Debug, Default)]
pub struct LightsArgs {
    /// Act on the given light by name
    #[arg(long)]
    pub light: Option<String>,

    /// Toggle the light switch
    #[arg(long)]
    pub toggle: bool,

    /// Enable (or, when absent, disable) the color-loop effect
    #[arg(long)]
    pub colorloop: bool,

    /// Blink the light for the given number of seconds
    #[arg(long, value_name = "SECONDS")]
    pub blink: Option<u64>,
}

// ==================== Sensors ====================

#[derive(Args, Debug, Default)]
pub struct SensorSetArgs {
    /// Index of the sensor to modify
    #[arg(long)]
    pub index: Option<u32>,

    /// Name to set for the sensor
    #[arg(long)]
    pub name: Option<String>,
}

// ==================== User ====================

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    /// Name of the device hue-cli is running on
    #[arg(long, default_value_t = default_device_name())]
    pub device: String,

    /// Also write the new configuration to this file (replacing it)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Host name of this machine, or "unknown".
pub fn default_device_name() -> String {
    sysinfo::System::host_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
