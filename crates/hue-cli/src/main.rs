//! hue-cli - Command-line interface for Philips Hue bridges.
//!
//! Lists and switches lights, groups and sensors, discovers bridges and
//! registers new API users.

mod cli;
mod commands;
mod context;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::{exit_codes, CliError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(error::usage_exit_code(&e));
        }
    };

    init_tracing(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "hue_cli=debug,hue_core=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_cli(&cli).await?;

    match cli.command {
        Commands::BridgeConfig => commands::run_bridge_config(&ctx).await,
        Commands::DiscoverBridges => commands::run_discover_bridges(&ctx).await,
        Commands::DiscoverLights(args) => commands::run_discover_lights(&ctx, args).await,
        Commands::DiscoverSensors(args) => commands::run_discover_sensors(&ctx, args).await,
        Commands::ListGroups => commands::run_list_groups(&ctx).await,
        Commands::NewGroup(args) => commands::run_new_group(&ctx, args).await,
        Commands::DeleteGroup(args) => commands::run_delete_group(&ctx, args).await,
        Commands::ToggleGroup(args) => commands::run_toggle_group(&ctx, args).await,
        Commands::ListLights => commands::run_list_lights(&ctx).await,
        Commands::Lights(args) => commands::run_lights(&ctx, args).await,
        Commands::ListSensors => commands::run_list_sensors(&ctx).await,
        Commands::SensorSet(args) => commands::run_sensor_set(&ctx, args).await,
        Commands::CreateUser(args) => commands::run_create_user(&ctx, args).await,
    }
}
