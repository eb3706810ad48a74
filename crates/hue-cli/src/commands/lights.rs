//! Light commands.

use std::time::Duration;

use hue_core::bridge::BridgeApi;

use super::{required, Printer, Stdout};
use crate::cli::LightsArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormatter;

/// Run the list-lights command
pub async fn run_list_lights(ctx: &Context) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    list_lights(&bridge, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Run the lights command
pub async fn run_lights(ctx: &Context, args: LightsArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    lights(&bridge, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

pub async fn list_lights<B: BridgeApi>(
    bridge: &B,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let lights = bridge.lights().await?;
    out.print(formatter.format_lights(&lights));
    Ok(())
}

/// Act on one light by name.
///
/// `--toggle` only flips the power. Otherwise the colour loop is switched
/// according to `--colorloop`, followed by the optional blink.
pub async fn lights<B: BridgeApi>(
    bridge: &B,
    args: &LightsArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let name = required(&args.light, "--light=<name>")?;
    let light = bridge.light_by_name(name).await?;

    if args.toggle {
        let on = bridge.toggle_light(&light).await?;
        out.print(formatter.format_message(&format!(
            "turned '{}' {}",
            light.name,
            if on { "on" } else { "off" }
        )));
        return Ok(());
    }

    bridge.set_color_loop(&light, args.colorloop).await?;
    out.print(formatter.format_message(&format!(
        "{} color-loop for '{}'",
        if args.colorloop { "Activated" } else { "Deactivated" },
        light.name
    )));

    if let Some(seconds) = args.blink {
        out.print(formatter.format_message(&format!("blinking '{}' for {} seconds", light.name, seconds)));
        bridge.blink(&light, Duration::from_secs(seconds)).await?;
    }

    Ok(())
}
