//! Sensor commands.

use hue_core::bridge::BridgeApi;

use super::{required, Printer, Stdout};
use crate::cli::SensorSetArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormatter;

/// Run the list-sensors command
pub async fn run_list_sensors(ctx: &Context) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    list_sensors(&bridge, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Run the sensor-set command
pub async fn run_sensor_set(ctx: &Context, args: SensorSetArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    sensor_set(&bridge, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

pub async fn list_sensors<B: BridgeApi>(
    bridge: &B,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let sensors = bridge.sensors().await?;
    out.print(formatter.format_sensors(&sensors));
    Ok(())
}

pub async fn sensor_set<B: BridgeApi>(
    bridge: &B,
    args: &SensorSetArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let index = args
        .index
        .ok_or_else(|| CliError::missing_flag("--index=<index>"))?;
    let name = required(&args.name, "--name=<name>")?;

    let sensor = bridge.sensor_by_index(index).await?;
    bridge.rename_sensor(sensor.index, name).await?;

    out.print(formatter.format_message(&format!(
        "renamed sensor {} from '{}' to '{}'",
        index, sensor.name, name
    )));
    Ok(())
}
