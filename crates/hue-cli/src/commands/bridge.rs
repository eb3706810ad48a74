//! Bridge-config command implementation.

use hue_core::bridge::BridgeApi;

use super::{Printer, Stdout};
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormatter;

/// Run the bridge-config command
pub async fn run_bridge_config(ctx: &Context) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    bridge_config(&bridge, ctx.formatter().as_ref(), &mut Stdout).await
}

pub async fn bridge_config<B: BridgeApi>(
    bridge: &B,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let config = bridge.configuration().await?;
    out.print(formatter.format_bridge_config(bridge.ip_address(), &config));
    Ok(())
}
