//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use super::{light_name, BridgeReport, OutputFormatter};
use hue_core::storage::ConfigFile;
use hue_core::types::{BridgeConfiguration, BridgeInfo, Group, GroupPower, Light, NewDevices, Sensor};

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn table(header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(header);
        table
    }

    fn power_cell(on: bool) -> Cell {
        if on {
            Cell::new("on").fg(Color::Green)
        } else {
            Cell::new("off")
        }
    }

    fn yes_no(value: Option<bool>) -> &'static str {
        match value {
            Some(true) => "yes",
            Some(false) => "no",
            None => "?",
        }
    }

    fn info_lines(lines: &mut Vec<String>, info: &BridgeInfo) {
        lines.push("  Device Information:".to_string());
        lines.push(format!("    Name:        {}", info.name));
        lines.push(format!("    Bridge ID:   {}", info.bridge_id));
        lines.push(format!("    Model:       {}", info.model_id));
        lines.push(format!("    MAC:         {}", info.mac));
        lines.push(format!("    Software:    {}", info.sw_version));
        lines.push(format!("    API version: {}", info.api_version));
        if info.factory_new {
            lines.push(format!("    {}", "Factory new".yellow()));
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_lights(&self, lights: &[Light]) -> String {
        if lights.is_empty() {
            return "Found 0 lights".to_string();
        }

        let mut table = Self::table(vec!["Index", "Name", "Type", "Model", "Unique ID", "Power", "Reachable"]);

        for light in lights {
            let mut power = Self::power_cell(light.state.on);
            if light.state.color_loop_active() {
                power = Cell::new("on (color-loop)").fg(Color::Magenta);
            }

            table.add_row(vec![
                Cell::new(light.index),
                Cell::new(&light.name),
                Cell::new(&light.light_type),
                Cell::new(&light.model_id),
                Cell::new(&light.unique_id),
                power,
                Cell::new(Self::yes_no(Some(light.state.reachable))),
            ]);
        }

        format!("Found {} lights\n{}", lights.len(), table)
    }

    fn format_groups(&self, groups: &[Group], lights: &[Light]) -> String {
        if groups.is_empty() {
            return "Found 0 groups".to_string();
        }

        let mut table = Self::table(vec!["Index", "Name", "Status", "Type", "Class", "Lights"]);

        for group in groups {
            let power = group.power();
            let status = match power {
                GroupPower::AllOn => Cell::new(power.as_str()).fg(Color::Green),
                GroupPower::SomeOn => Cell::new(power.as_str()).fg(Color::Yellow),
                GroupPower::Off => Cell::new(power.as_str()),
            };

            let members: Vec<String> = group.lights.iter().map(|l| light_name(lights, l)).collect();

            table.add_row(vec![
                Cell::new(group.index),
                Cell::new(&group.name),
                status,
                Cell::new(&group.group_type),
                Cell::new(group.class.as_deref().unwrap_or("-")),
                Cell::new(members.join(", ")),
            ]);
        }

        format!("Found {} groups\n{}", groups.len(), table)
    }

    fn format_sensors(&self, sensors: &[Sensor]) -> String {
        if sensors.is_empty() {
            return "Found 0 sensors".to_string();
        }

        let mut table = Self::table(vec!["Index", "Name", "Type", "Model", "Product", "Unique ID"]);

        for sensor in sensors {
            table.add_row(vec![
                Cell::new(sensor.index),
                Cell::new(&sensor.name),
                Cell::new(&sensor.sensor_type),
                Cell::new(&sensor.model_id),
                Cell::new(sensor.product_name.as_deref().unwrap_or("-")),
                Cell::new(sensor.unique_id.as_deref().unwrap_or("-")),
            ]);
        }

        format!("Found {} sensors\n{}", sensors.len(), table)
    }

    fn format_new_devices(&self, kind: &str, found: &NewDevices) -> String {
        let mut lines = vec![format!("Last scan: {}", found.last_scan)];

        if found.devices.is_empty() {
            lines.push(format!("No new {} found", kind));
        } else {
            lines.push(format!("Found {} new {}", found.devices.len(), kind));
            for device in &found.devices {
                lines.push(format!("  {:>3}  {}", device.index, device.name));
            }
        }

        lines.join("\n")
    }

    fn format_bridges(&self, bridges: &[BridgeReport]) -> String {
        let mut lines = vec![format!("Found {} bridges", bridges.len())];

        for bridge in bridges {
            if let Some(error) = &bridge.error {
                lines.push(format!(
                    "{} failed to get info for bridge at {} ({})",
                    "ERROR:".red(),
                    bridge.ip_address,
                    error
                ));
            }

            lines.push("Bridge:".to_string());
            lines.push(format!("  IP-address: {}", bridge.ip_address));
            if let Some(id) = &bridge.id {
                lines.push(format!("  ID:         {}", id));
            }

            if let Some(info) = &bridge.info {
                Self::info_lines(&mut lines, info);
            }
        }

        lines.join("\n")
    }

    fn format_bridge_config(&self, ip: &str, config: &BridgeConfiguration) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Bridge: {} ({})", config.name, ip));
        lines.push(format!("  IP-address:     {}", config.ip_address));
        lines.push(format!("  Bridge ID:      {}", config.bridge_id));
        lines.push(format!("  Model:          {}", config.model_id));
        lines.push(format!("  MAC:            {}", config.mac));
        lines.push(format!(
            "  Software:       {} (API {})",
            config.sw_version, config.api_version
        ));

        if let Some(channel) = config.zigbee_channel {
            lines.push(format!("  Zigbee channel: {}", channel));
        }

        lines.push("  Network:".to_string());
        lines.push(format!("    DHCP:     {}", Self::yes_no(config.dhcp)));
        if let Some(netmask) = &config.netmask {
            lines.push(format!("    Netmask:  {}", netmask));
        }
        if let Some(gateway) = &config.gateway {
            lines.push(format!("    Gateway:  {}", gateway));
        }
        lines.push(format!("    Portal:   {}", Self::yes_no(config.portal_services)));

        if let Some(timezone) = &config.timezone {
            lines.push(format!("  Time zone:      {}", timezone));
        }
        if let Some(local_time) = &config.local_time {
            lines.push(format!("  Local time:     {}", local_time));
        }

        let link_button = match config.link_button {
            Some(true) => "pressed".green(),
            Some(false) => "not pressed".normal(),
            None => "unknown".yellow(),
        };
        lines.push(format!("  Link button:    {}", link_button));

        lines.push(format!("  Whitelist:      {} applications", config.whitelist.len()));
        for entry in config.whitelist.values() {
            lines.push(format!(
                "    - {} (created {}, last used {})",
                entry.name,
                entry.create_date.as_deref().unwrap_or("?"),
                entry.last_use_date.as_deref().unwrap_or("?")
            ));
        }

        lines.join("\n")
    }

    fn format_new_config(&self, _config: &ConfigFile, yaml: &str) -> String {
        format!("new configuration:\n{}", yaml.trim_end())
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
