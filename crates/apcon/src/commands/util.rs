//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use apcon_core::{Console, Device, MacAddress};

use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// A stderr spinner for network round trips; hidden when stderr is piped.
pub fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Whether an identifier is plausibly a MAC address rather than a name.
fn looks_like_mac(identifier: &str) -> bool {
    let stripped: String = identifier
        .chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect();
    stripped.len() == 12 && stripped.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Resolve a device identifier (name or MAC) against the inventory.
///
/// Configuration endpoints key on the MAC, but operators mostly think in
/// device names; accept either.
pub async fn resolve_device(console: &Console, identifier: &str) -> Result<Device, CliError> {
    let devices = console.list_devices().await?;
    let wanted_mac = MacAddress::new(identifier);
    if let Some(device) = devices
        .into_iter()
        .find(|d| d.name == identifier || d.mac == wanted_mac)
    {
        return Ok(device);
    }
    if looks_like_mac(identifier) {
        // Not in the inventory, but a literal MAC is still addressable.
        return Ok(Device {
            name: identifier.to_owned(),
            mac: wanted_mac,
            description: None,
            location: None,
            status: apcon_core::DeviceStatus::Unknown,
            uptime_secs: None,
        });
    }
    Err(CliError::NotFound {
        resource_type: "device".into(),
        identifier: identifier.into(),
        list_command: "devices list".into(),
    })
}
