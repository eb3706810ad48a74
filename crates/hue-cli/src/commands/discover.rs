//! Discovery commands: bridges on the network, new lights and sensors on a bridge.

use hue_core::bridge::{BridgeApi, BridgeConnector};
use hue_core::discovery::DiscoveryService;
use hue_core::session::BridgeOptions;
use hue_core::types::DiscoveredBridge;

use super::{Printer, Stdout};
use crate::cli::DiscoverArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{BridgeReport, OutputFormatter};

/// Run the discover-bridges command
///
/// With a bridge address configured, only that bridge is reported and any
/// failure is fatal. Otherwise every bridge known to the discovery portal is
/// described; bridges that cannot be reached are reported and skipped.
pub async fn run_discover_bridges(ctx: &Context) -> Result<(), CliError> {
    let formatter = ctx.formatter();

    let reports = if ctx.options.address().is_ok() {
        vec![probe_bridge(ctx.connector(), &ctx.options).await?]
    } else {
        let discovered = DiscoveryService::new()?.discover().await?;
        describe_bridges(ctx.connector(), &discovered).await
    };

    Stdout.print(formatter.format_bridges(&reports));
    Ok(())
}

/// Connect to the configured bridge, logging in when a username is set.
pub async fn probe_bridge<C: BridgeConnector>(
    connector: &C,
    options: &BridgeOptions,
) -> Result<BridgeReport, CliError> {
    let address = options.address()?;
    let mut bridge = connector.connect(address).await?;

    if let Some(username) = options.username.as_deref().filter(|u| !u.trim().is_empty()) {
        bridge.login(username).await?;
    }

    Ok(BridgeReport::from_bridge(&bridge, None))
}

pub async fn describe_bridges<C: BridgeConnector>(
    connector: &C,
    discovered: &[DiscoveredBridge],
) -> Vec<BridgeReport> {
    let mut reports = Vec::with_capacity(discovered.len());

    for found in discovered {
        let id = Some(found.id.clone());
        match connector.connect(&found.ip_address).await {
            Ok(bridge) => reports.push(BridgeReport::from_bridge(&bridge, id)),
            Err(e) => {
                tracing::warn!(bridge = %found.ip_address, "failed to get bridge info: {}", e);
                reports.push(BridgeReport::unreachable(&found.ip_address, id, e.to_string()));
            }
        }
    }

    reports
}

/// What a device search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Lights,
    Sensors,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Lights => "lights",
            DeviceKind::Sensors => "sensors",
        }
    }
}

/// Run the discover-lights command
pub async fn run_discover_lights(ctx: &Context, args: DiscoverArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    discover_devices(&bridge, DeviceKind::Lights, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Run the discover-sensors command
pub async fn run_discover_sensors(ctx: &Context, args: DiscoverArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    discover_devices(&bridge, DeviceKind::Sensors, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Start a search, or with `--new` list what the last search found.
pub async fn discover_devices<B: BridgeApi>(
    bridge: &B,
    kind: DeviceKind,
    args: &DiscoverArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    if args.new {
        let found = match kind {
            DeviceKind::Lights => bridge.new_lights().await?,
            DeviceKind::Sensors => bridge.new_sensors().await?,
        };
        out.print(formatter.format_new_devices(kind.as_str(), &found));
        return Ok(());
    }

    match kind {
        DeviceKind::Lights => bridge.find_new_lights().await?,
        DeviceKind::Sensors => bridge.find_new_sensors().await?,
    }

    out.print(formatter.format_message(&format!(
        "discovery for new {kind} on bridge {} started, check for new {kind} in 1 minute",
        bridge.name(),
        kind = kind.as_str()
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{FakeBridge, FakeConnector};
    use crate::output::TableOutput;
    use hue_core::error::{BridgeError, ConfigError, CoreError};

    fn discovered(id: &str, ip: &str) -> DiscoveredBridge {
        DiscoveredBridge {
            id: id.to_string(),
            ip_address: ip.to_string(),
            port: None,
        }
    }

    #[tokio::test]
    async fn test_start_light_search() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        discover_devices(&bridge, DeviceKind::Lights, &DiscoverArgs::default(), &TableOutput::new(), &mut out)
            .await
            .unwrap();

        assert_eq!(bridge.calls(), vec!["find_new_lights"]);
        assert_eq!(
            out,
            vec!["discovery for new lights on bridge Philips hue started, check for new lights in 1 minute"]
        );
    }

    #[tokio::test]
    async fn test_list_new_sensors() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();
        let args = DiscoverArgs { new: true };

        discover_devices(&bridge, DeviceKind::Sensors, &args, &TableOutput::new(), &mut out)
            .await
            .unwrap();

        assert!(bridge.calls().is_empty());
        assert!(out[0].contains("Last scan: active"));
        assert!(out[0].contains("Found 1 new sensors"));
    }

    #[tokio::test]
    async fn test_describe_skips_unreachable_bridges() {
        let connector = FakeConnector {
            offline: vec!["10.0.0.9".to_string()],
            ..Default::default()
        };
        let found = vec![discovered("001788fffe000001", "10.0.0.5"), discovered("001788fffe000002", "10.0.0.9")];

        let reports = describe_bridges(&connector, &found).await;

        assert_eq!(reports.len(), 2);
        assert!(reports[0].error.is_none());
        assert_eq!(reports[0].info.as_ref().unwrap().model_id, "BSB002");
        assert_eq!(reports[1].ip_address, "10.0.0.9");
        assert!(reports[1].error.as_deref().unwrap().contains("no route to host"));
        assert_eq!(reports[1].id.as_deref(), Some("001788fffe000002"));
    }

    #[tokio::test]
    async fn test_probe_configured_bridge_is_fatal_on_failure() {
        let connector = FakeConnector {
            offline: vec!["10.0.0.9".to_string()],
            ..Default::default()
        };
        let options = BridgeOptions::new(Some("10.0.0.9".to_string()), None);

        let err = probe_bridge(&connector, &options).await.unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::Bridge(BridgeError::Connection { .. }))));
    }

    #[tokio::test]
    async fn test_probe_configured_bridge() {
        let connector = FakeConnector::default();
        let options = BridgeOptions::new(Some("10.0.0.7".to_string()), Some("abc123".to_string()));

        let report = probe_bridge(&connector, &options).await.unwrap();
        assert_eq!(report.ip_address, "10.0.0.7");
        assert!(report.id.is_none());
        assert_eq!(*connector.connects.borrow(), vec!["10.0.0.7".to_string()]);
    }

    #[tokio::test]
    async fn test_probe_needs_address() {
        let connector = FakeConnector::default();

        let err = probe_bridge(&connector, &BridgeOptions::default()).await.unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::Config(ConfigError::MissingBridgeAddress))));
    }
}
