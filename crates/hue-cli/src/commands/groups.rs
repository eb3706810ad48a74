//! Group commands: list, create, delete and toggle.

use hue_core::bridge::BridgeApi;
use hue_core::error::BridgeError;
use hue_core::protocol::requests::NewGroup;

use super::{required, Printer, Stdout};
use crate::cli::{GroupArgs, NewGroupArgs};
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormatter;

const GROUP_FLAG: &str = "--name=<group>";
const LIGHTS_FLAG: &str = "--lights=<index>,<index>,...";

/// Run the list-groups command
pub async fn run_list_groups(ctx: &Context) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    list_groups(&bridge, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Run the new-group command
pub async fn run_new_group(ctx: &Context, args: NewGroupArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    new_group(&bridge, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Run the delete-group command
pub async fn run_delete_group(ctx: &Context, args: GroupArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    delete_group(&bridge, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

/// Run the toggle-group command
pub async fn run_toggle_group(ctx: &Context, args: GroupArgs) -> Result<(), CliError> {
    let bridge = ctx.bridge().await?;
    toggle_group(&bridge, &args, ctx.formatter().as_ref(), &mut Stdout).await
}

pub async fn list_groups<B: BridgeApi>(
    bridge: &B,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let groups = bridge.groups().await?;
    let lights = bridge.lights().await?;

    out.print(formatter.format_groups(&groups, &lights));
    Ok(())
}

/// Parse a comma-separated list of light indexes such as `2,3,4`.
pub fn parse_light_indexes(value: &str) -> Result<Vec<u32>, CliError> {
    value
        .split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<u32>().map_err(|_| {
                CliError::InvalidArgument(format!("invalid light index '{}' in --lights", part))
            })
        })
        .collect()
}

/// Create a room from existing lights. Every index is checked before the
/// group is created.
pub async fn new_group<B: BridgeApi>(
    bridge: &B,
    args: &NewGroupArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let name = required(&args.name, GROUP_FLAG)?;
    let indexes = parse_light_indexes(required(&args.lights, LIGHTS_FLAG)?)?;

    let lights = bridge.lights().await?;
    if let Some(missing) = indexes.iter().find(|i| !lights.iter().any(|l| l.index == **i)) {
        return Err(BridgeError::LightIndexNotFound(*missing).into());
    }

    let index = bridge
        .create_group(&NewGroup::room(name, &args.class, &indexes))
        .await?;
    tracing::debug!(group = %name, index, "group created");

    out.print(formatter.format_message(&format!("created group '{}' with index {}", name, index)));
    Ok(())
}

pub async fn delete_group<B: BridgeApi>(
    bridge: &B,
    args: &GroupArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let name = required(&args.name, GROUP_FLAG)?;
    let group = bridge.group_by_name(name).await?;

    bridge.delete_group(group.index).await?;

    out.print(formatter.format_message(&format!("deleted group '{}'", name)));
    Ok(())
}

/// Any light on turns the whole group off, otherwise everything goes on.
pub async fn toggle_group<B: BridgeApi>(
    bridge: &B,
    args: &GroupArgs,
    formatter: &dyn OutputFormatter,
    out: &mut impl Printer,
) -> Result<(), CliError> {
    let name = required(&args.name, GROUP_FLAG)?;
    let group = bridge.group_by_name(name).await?;

    let on = bridge.toggle_group(&group).await?;

    out.print(formatter.format_message(&format!(
        "turned group '{}' {}",
        name,
        if on { "on" } else { "off" }
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::FakeBridge;
    use crate::output::{JsonOutput, TableOutput};
    use hue_core::error::CoreError;

    fn group_args(name: &str) -> GroupArgs {
        GroupArgs {
            name: Some(name.to_string()),
        }
    }

    fn new_group_args(name: Option<&str>, lights: Option<&str>) -> NewGroupArgs {
        NewGroupArgs {
            name: name.map(str::to_string),
            class: "Other".to_string(),
            lights: lights.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_light_indexes() {
        assert_eq!(parse_light_indexes("2,3,4").unwrap(), vec![2, 3, 4]);
        assert_eq!(parse_light_indexes(" 1, 2 ").unwrap(), vec![1, 2]);
        assert!(parse_light_indexes("2,x").is_err());
        assert!(parse_light_indexes("2,,3").is_err());
        assert!(parse_light_indexes("-1").is_err());
    }

    #[tokio::test]
    async fn test_list_groups() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        list_groups(&bridge, &TableOutput::new(), &mut out).await.unwrap();
        assert!(out[0].starts_with("Found 2 groups"));
        assert!(out[0].contains("Living"));
        assert!(out[0].contains("Desk"));
        assert!(out[0].contains("lights are off"));
    }

    #[tokio::test]
    async fn test_list_groups_aborts_on_error() {
        let bridge = FakeBridge::offline();
        let mut out: Vec<String> = Vec::new();

        assert!(list_groups(&bridge, &TableOutput::new(), &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_new_group_creates_room() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        new_group(&bridge, &new_group_args(Some("Study"), Some("2,4")), &TableOutput::new(), &mut out)
            .await
            .unwrap();

        assert_eq!(bridge.calls(), vec!["create_group Study 2,4"]);
        assert_eq!(out, vec!["created group 'Study' with index 9"]);
    }

    #[tokio::test]
    async fn test_new_group_rejects_unknown_light() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        let err = new_group(&bridge, &new_group_args(Some("Study"), Some("2,3")), &TableOutput::new(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::Core(CoreError::Bridge(BridgeError::LightIndexNotFound(3)))
        ));
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_new_group_requires_flags() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        let err = new_group(&bridge, &new_group_args(None, Some("2")), &TableOutput::new(), &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "--name=<group> is required");

        let err = new_group(&bridge, &new_group_args(Some("Study"), None), &TableOutput::new(), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));

        let err = new_group(&bridge, &new_group_args(Some("Study"), Some("two")), &TableOutput::new(), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'two'"));
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_group_by_name() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        delete_group(&bridge, &group_args("Garden"), &TableOutput::new(), &mut out)
            .await
            .unwrap();
        assert_eq!(bridge.calls(), vec!["delete_group 2"]);

        let err = delete_group(&bridge, &group_args("Attic"), &TableOutput::new(), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::Bridge(BridgeError::GroupNotFound(_)))));
    }

    #[tokio::test]
    async fn test_toggle_group_turns_off_when_any_light_on() {
        let bridge = FakeBridge::new();
        let mut out: Vec<String> = Vec::new();

        toggle_group(&bridge, &group_args("Living"), &TableOutput::new(), &mut out)
            .await
            .unwrap();
        toggle_group(&bridge, &group_args("Garden"), &JsonOutput::new(), &mut out)
            .await
            .unwrap();

        assert_eq!(bridge.calls(), vec!["group 1 on=false", "group 2 on=true"]);
        assert_eq!(out[0], "turned group 'Living' off");
        assert!(out[1].contains("\"message\": \"turned group 'Garden' on\""));
    }
}
