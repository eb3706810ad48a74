//! Create-user command implementation.

use hue_core::bridge::BridgeApi;
use hue_core::storage::ConfigFile;

use super::{Printer, Stdout};
use crate::cli::CreateUserArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormatter;

/// Run the create-user command
pub async fn run_create_user(ctx: &Context, args: CreateUserArgs) -> Result<(), CliError> {
    let bridge = ctx.unauthenticated_bridge().await?;
    create_user(&bridge, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Register a user and print the config document that uses it.
pub async fn create_user<B: BridgeApi>(
    bridge: &B,
    args: &CreateUserArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let username = bridge.create_user(&args.device).await?;

    let config = ConfigFile::single(bridge.ip_address(), &username);
    let yaml = config.to_yaml()?;
    out.print(formatter.format_new_config(&config, &yaml));

    if let Some(path) = &args.output {
        config.save(path).await?;
        out.print(formatter.format_message(&format!("configuration written to {}", path.display())));
    }

    Ok(())
}
