//! Device inventory command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use apcon_core::{Console, Device, DeviceStatus, MacAddress, NewDevice};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_cell(status: DeviceStatus, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        DeviceStatus::Online => status.to_string().green().to_string(),
        DeviceStatus::Offline => status.to_string().red().to_string(),
        DeviceStatus::Unknown => status.to_string().dimmed().to_string(),
    }
}

fn row(device: &Device, color: bool) -> DeviceRow {
    DeviceRow {
        name: device.name.clone(),
        mac: device.mac.to_string(),
        description: device.description.clone().unwrap_or_default(),
        location: device.location.clone().unwrap_or_default(),
        status: status_cell(device.status, color),
    }
}

fn detail(device: &Device) -> String {
    let mut lines = vec![
        format!("Name:        {}", device.name),
        format!("MAC:         {}", device.mac),
        format!(
            "Description: {}",
            device.description.as_deref().unwrap_or("-")
        ),
        format!("Location:    {}", device.location.as_deref().unwrap_or("-")),
        format!("Status:      {}", device.status),
    ];
    if let Some(up) = device.uptime_secs {
        lines.push(format!("Uptime:      {up}s"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let pb = util::spinner("Loading devices...");
            let devices = console.list_devices().await;
            pb.finish_and_clear();
            let devices = devices?;

            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &devices,
                |d| row(d, color),
                |d| d.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { name } => {
            let device = console.get_device(&name).await?;
            let out = output::render_single(&global.output, &device, detail, |d| d.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Create {
            name,
            mac,
            description,
            location,
        } => {
            let device = NewDevice {
                name,
                mac_address: MacAddress::new(&mac).to_string(),
                description,
                location,
            };
            console.create_device(&device).await?;
            if !global.quiet {
                eprintln!("✓ Device '{}' registered", device.name);
            }
            Ok(())
        }

        DevicesCommand::Delete { name } => {
            if !util::confirm(&format!("Delete device {name}?"), global.yes)? {
                return Ok(());
            }
            console.delete_device(&name).await?;
            if !global.quiet {
                eprintln!("✓ Device '{name}' deleted");
            }
            Ok(())
        }
    }
}
