//! Device configuration handlers: show, history, interactive edit, push.
//!
//! `edit` is the CLI rendition of the console's configuration form: fetch
//! the latest stored document, normalize it (absent or malformed input
//! degrades to defaults), walk the form, preview the encoded document,
//! and submit it as a full replacement.

use chrono::DateTime;
use dialoguer::{Confirm, Input, Select};
use serde_json::Value;
use tabled::Tabled;

use apcon_core::{
    AuthMode, AuthSettings, Console, FormState, LogSettings, PlacementMode, PortalProfile,
    SystemSettings, WirelessInterface, normalize, serialize,
};
use apcon_core::model::form::{CIPHERS, DEFAULT_NTP_SERVERS, RADIOS};
use apcon_core::uci::timezone;

use crate::cli::{GlobalOpts, ProvisionArgs, ProvisionCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: ProvisionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProvisionCommand::Show { device, decoded } => show(console, &device, decoded, global).await,
        ProvisionCommand::History { device } => history(console, &device, global).await,
        ProvisionCommand::Edit { device } => edit(console, &device, global).await,
        ProvisionCommand::Push { device, from_file } => {
            let document = util::read_json_file(&from_file)?;
            push(console, &device, &document, global).await
        }
    }
}

// ── Show ────────────────────────────────────────────────────────────

async fn show(
    console: &Console,
    identifier: &str,
    decoded: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = util::resolve_device(console, identifier).await?;
    let Some(stored) = console.latest_config(&device.mac).await? else {
        if !global.quiet {
            eprintln!("No stored configuration for '{}'", device.name);
        }
        return Ok(());
    };

    if decoded {
        let form = normalize(Some(&stored), &device.name);
        let out = output::render_single(&global.output, &form, form_summary, |f| {
            f.system.hostname.clone()
        });
        output::print_output(&out, global.quiet);
    } else {
        let out = output::render_single(
            &global.output,
            &stored,
            |v| output::render_json_pretty(v),
            |_| device.name.clone(),
        );
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

/// Human-readable summary of normalized form state for table output.
fn form_summary(form: &FormState) -> String {
    let mut lines = vec![
        format!("Hostname:  {}", form.system.hostname),
        format!(
            "Timezone:  {} {}",
            if form.system.timezone.is_empty() {
                "-"
            } else {
                &form.system.timezone
            },
            form.system.tz_offset
        ),
        format!(
            "NTP:       {}",
            if form.system.ntp_enabled {
                form.system.ntp_servers.join(", ")
            } else {
                "disabled".into()
            }
        ),
        format!(
            "Logs:      size {}{}",
            form.logs.size,
            if form.logs.remote_enabled {
                format!(", remote {}:{} ({})", form.logs.host, form.logs.port, form.logs.proto)
            } else {
                String::new()
            }
        ),
        String::new(),
        format!("Interfaces ({}):", form.interfaces.len()),
    ];
    for (index, iface) in form.interfaces.iter().enumerate() {
        lines.push(format!(
            "  [{index}] {} on {} -- {} / {} -> {}",
            if iface.ssid.is_empty() { "(no ssid)" } else { &iface.ssid },
            iface.radio,
            iface.auth.mode(),
            iface.placement,
            iface.placement.network_name(index),
        ));
    }
    lines.join("\n")
}

// ── History ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Interfaces")]
    interfaces: usize,
    #[tabled(rename = "Created")]
    created: String,
}

/// Best-effort timestamp extraction; older backends don't stamp documents.
fn created_cell(entry: &Value) -> String {
    entry
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or_else(|| "-".into(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

async fn history(console: &Console, identifier: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let device = util::resolve_device(console, identifier).await?;
    let entries = console.config_history(&device.mac).await?;
    if entries.is_empty() {
        if !global.quiet {
            eprintln!("No stored configurations for '{}'", device.name);
        }
        return Ok(());
    }

    let rows: Vec<(usize, Value)> = entries.into_iter().enumerate().collect();
    let out = output::render_list(
        &global.output,
        &rows,
        |(index, entry)| HistoryRow {
            index: *index,
            hostname: entry
                .pointer("/system/0/values/hostname")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_owned(),
            interfaces: entry
                .get("wireless")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            created: created_cell(entry),
        },
        |(index, _)| index.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Push ────────────────────────────────────────────────────────────

async fn push(
    console: &Console,
    identifier: &str,
    document: &Value,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = util::resolve_device(console, identifier).await?;
    if !util::confirm(
        &format!("Replace the stored configuration for {}?", device.name),
        global.yes,
    )? {
        return Ok(());
    }
    console.save_raw_config(&device.mac, document).await?;
    if !global.quiet {
        eprintln!("✓ Configuration saved & queued.");
    }
    Ok(())
}

// ── Interactive edit ────────────────────────────────────────────────

async fn edit(console: &Console, identifier: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let device = util::resolve_device(console, identifier).await?;

    let pb = util::spinner("Fetching latest configuration...");
    let stored = console.latest_config(&device.mac).await;
    pb.finish_and_clear();
    let stored = stored?;

    let mut form = normalize(stored.as_ref(), &device.name);

    // Portal profiles enrich hotspot interfaces; the form works fine
    // without them if the endpoint is unavailable.
    let profiles = console.portal_profiles().await.unwrap_or_default();

    eprintln!("Configuring '{}' ({})\n", device.name, device.mac);
    edit_system(&mut form.system)?;
    edit_logs(&mut form.logs)?;
    edit_interfaces(&mut form.interfaces, &profiles)?;

    let document = serialize(&form, &device.name);

    if !global.quiet {
        eprintln!("\n{}", output::render_json_pretty(&document));
    }
    if !util::confirm("Save this configuration?", global.yes)? {
        return Ok(());
    }
    console.save_config(&device.mac, &document).await?;
    if !global.quiet {
        eprintln!("✓ Configuration saved & queued.");
    }
    Ok(())
}

// ── Form sections ───────────────────────────────────────────────────

fn text_input(prompt: &str, current: &str) -> Result<String, CliError> {
    Input::new()
        .with_prompt(prompt)
        .default(current.to_owned())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

fn edit_system(system: &mut SystemSettings) -> Result<(), CliError> {
    eprintln!("── System ──");
    system.hostname = text_input("Hostname", &system.hostname)?;

    system.timezone = text_input("Timezone (IANA name)", &system.timezone)?;
    // Offset is derived, never asked for.
    system.tz_offset = timezone::offset_for(&system.timezone)
        .unwrap_or_default()
        .to_owned();
    if !system.timezone.is_empty() && system.tz_offset.is_empty() {
        eprintln!("   (unknown timezone -- no offset will be emitted)");
    }

    system.ntp_enabled = Confirm::new()
        .with_prompt("Enable NTP?")
        .default(system.ntp_enabled)
        .interact()
        .map_err(prompt_err)?;
    if system.ntp_enabled {
        let joined = system.ntp_servers.join(", ");
        let raw = text_input("NTP servers (comma separated, first is primary)", &joined)?;
        let servers: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        system.ntp_servers = if servers.is_empty() {
            DEFAULT_NTP_SERVERS.iter().map(ToString::to_string).collect()
        } else {
            servers
        };
    }
    Ok(())
}

fn edit_logs(logs: &mut LogSettings) -> Result<(), CliError> {
    eprintln!("── Logs ──");
    logs.size = text_input("Log buffer size", &logs.size)?;
    logs.remote_enabled = Confirm::new()
        .with_prompt("Enable remote logging?")
        .default(logs.remote_enabled)
        .interact()
        .map_err(prompt_err)?;
    if logs.remote_enabled {
        logs.host = text_input("Remote host", &logs.host)?;
        logs.ip = text_input("Remote IP", &logs.ip)?;
        logs.port = text_input("Remote port", &logs.port)?;
        logs.proto = text_input("Protocol (udp/tcp)", &logs.proto)?;
    }
    Ok(())
}

fn edit_interfaces(
    interfaces: &mut Vec<WirelessInterface>,
    profiles: &[PortalProfile],
) -> Result<(), CliError> {
    eprintln!("── WiFi interfaces ──");
    loop {
        let mut items: Vec<String> = interfaces
            .iter()
            .map(|iface| {
                format!(
                    "Edit {} ({} / {})",
                    iface.id,
                    if iface.ssid.is_empty() { "(no ssid)" } else { &iface.ssid },
                    iface.auth.mode()
                )
            })
            .collect();
        let add_at = items.len();
        items.push("Add interface".into());
        let remove_at = if interfaces.len() > 1 {
            items.push("Remove interface".into());
            Some(items.len() - 1)
        } else {
            None
        };
        items.push("Done".into());

        let choice = Select::new()
            .with_prompt("Interfaces")
            .items(&items)
            .default(items.len() - 1)
            .interact()
            .map_err(prompt_err)?;

        if choice < add_at {
            edit_interface(&mut interfaces[choice], profiles)?;
        } else if choice == add_at {
            let mut iface = WirelessInterface::default_lan(interfaces.len());
            edit_interface(&mut iface, profiles)?;
            interfaces.push(iface);
        } else if Some(choice) == remove_at {
            let names: Vec<&str> = interfaces.iter().map(|i| i.id.as_str()).collect();
            let victim = Select::new()
                .with_prompt("Remove which interface?")
                .items(&names)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            interfaces.remove(victim);
        } else {
            return Ok(());
        }
    }
}

fn edit_interface(
    iface: &mut WirelessInterface,
    profiles: &[PortalProfile],
) -> Result<(), CliError> {
    let radio_idx = RADIOS.iter().position(|r| *r == iface.radio).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Radio")
        .items(RADIOS)
        .default(radio_idx)
        .interact()
        .map_err(prompt_err)?;
    iface.radio = RADIOS[choice].to_owned();

    iface.ssid = text_input("SSID", &iface.ssid)?;

    // Auth mode; switching resets the mode-conditional fields.
    let modes = [AuthMode::WpaPersonal, AuthMode::WpaEnterprise, AuthMode::Hotspot];
    let mode_labels = [
        "WPA Personal",
        "WPA Enterprise",
        "Hotspot (captive portal)",
    ];
    let current_mode = iface.auth.mode();
    let mode_idx = modes.iter().position(|m| *m == current_mode).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Auth mode")
        .items(&mode_labels)
        .default(mode_idx)
        .interact()
        .map_err(prompt_err)?;
    if modes[choice] != current_mode {
        iface.auth = AuthSettings::empty(modes[choice]);
    }

    let placements = [
        PlacementMode::Lan,
        PlacementMode::Guest,
        PlacementMode::Hotspot,
        PlacementMode::Corp,
    ];
    let placement_labels = [
        "LAN (bridge to lan)",
        "Guest (isolated)",
        "Hotspot (captive portal)",
        "Enterprise (corporate)",
    ];
    let placement_idx = placements
        .iter()
        .position(|p| *p == iface.placement)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Network mode")
        .items(&placement_labels)
        .default(placement_idx)
        .interact()
        .map_err(prompt_err)?;
    iface.placement = placements[choice];

    match &mut iface.auth {
        AuthSettings::Personal { encryption, key } => {
            let cipher_idx = CIPHERS.iter().position(|c| *c == *encryption).unwrap_or(0);
            let choice = Select::new()
                .with_prompt("Cipher")
                .items(CIPHERS)
                .default(cipher_idx)
                .interact()
                .map_err(prompt_err)?;
            *encryption = CIPHERS[choice].to_owned();
            *key = text_input("Pre-shared key", key)?;
        }

        AuthSettings::Enterprise {
            server,
            port,
            secret,
        } => {
            *server = text_input("RADIUS server", server)?;
            *port = text_input("RADIUS port", port)?;
            *secret = text_input("RADIUS secret", secret)?;
        }

        AuthSettings::CaptivePortal {
            portal_url,
            radius_server,
            radius_port,
            radius_secret,
            walled_garden,
            nas_id,
            max_clients,
        } => {
            if !profiles.is_empty() {
                let apply = Confirm::new()
                    .with_prompt("Apply a portal profile?")
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?;
                if apply {
                    let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
                    let choice = Select::new()
                        .with_prompt("Portal profile")
                        .items(&names)
                        .default(0)
                        .interact()
                        .map_err(prompt_err)?;
                    apply_portal_profile(
                        &profiles[choice],
                        portal_url,
                        radius_server,
                        radius_port,
                        radius_secret,
                        walled_garden,
                        nas_id,
                    );
                }
            }
            *portal_url = text_input("UAM server (portal URL)", portal_url)?;
            *radius_server = text_input("RADIUS server", radius_server)?;
            *radius_port = text_input("RADIUS port", radius_port)?;
            *radius_secret = text_input("RADIUS secret", radius_secret)?;
            *walled_garden = text_input("Walled garden (comma separated)", walled_garden)?;
            *nas_id = text_input("NAS ID (empty derives {device}-{network})", nas_id)?;
            *max_clients = text_input("Max associated clients", max_clients)?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn apply_portal_profile(
    profile: &PortalProfile,
    portal_url: &mut String,
    radius_server: &mut String,
    radius_port: &mut String,
    radius_secret: &mut String,
    walled_garden: &mut String,
    nas_id: &mut String,
) {
    let fill = |target: &mut String, source: &Option<String>| {
        if let Some(value) = source {
            *target = value.clone();
        }
    };
    fill(portal_url, &profile.uam_server);
    fill(radius_server, &profile.radius_server);
    fill(radius_port, &profile.radius_port);
    fill(radius_secret, &profile.radius_secret);
    fill(walled_garden, &profile.uam_allowed);
    fill(nas_id, &profile.nas_id);
}
