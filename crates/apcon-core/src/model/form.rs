// ── Provisioning form state ──
//
// The normalized, strongly-typed representation the interactive form
// edits. Mode-conditional credential fields live in the `AuthSettings`
// tagged union so an interface can only ever hold the fields of its
// active authentication mode; `FlatInterface` is the loose wire shape a
// previously normalized document uses, with an explicit projection step
// in both directions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uci::PlacementMode;

/// The physical radios an access point exposes.
pub const RADIOS: &[&str] = &["radio0", "radio1"];

/// Default NTP server pair; the first entry is the primary.
pub const DEFAULT_NTP_SERVERS: &[&str] = &["0.pool.ntp.org", "1.pool.ntp.org"];

/// Default cipher suite for personal-key interfaces.
pub const DEFAULT_CIPHER: &str = "psk2";

/// Cipher suites offered for personal-key auth.
pub const CIPHERS: &[&str] = &["psk2", "psk-mixed", "sae-mixed"];

// ── Authentication ──────────────────────────────────────────────────

/// Authentication mode discriminant for a wireless interface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AuthMode {
    /// WPA personal: pre-shared key + cipher suite.
    WpaPersonal,
    /// WPA enterprise: 802.1X against a RADIUS server.
    WpaEnterprise,
    /// Open wifi behind a third-party captive portal.
    Hotspot,
}

/// Mode-conditional credential fields. Exactly one variant is populated
/// per interface; fields of other modes cannot exist here by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSettings {
    Personal {
        /// Cipher suite (`psk2`, `psk-mixed`, `sae-mixed`).
        encryption: String,
        /// Pre-shared key; may be empty pending user input.
        key: String,
    },
    Enterprise {
        server: String,
        port: String,
        secret: String,
    },
    CaptivePortal {
        /// UAM portal URL.
        portal_url: String,
        radius_server: String,
        radius_port: String,
        radius_secret: String,
        /// Walled-garden allow-list, comma separated.
        walled_garden: String,
        /// NAS identifier; encode defaults it to `{device}-{network}` when empty.
        nas_id: String,
        /// Maximum associated clients.
        max_clients: String,
    },
}

impl AuthSettings {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Personal { .. } => AuthMode::WpaPersonal,
            Self::Enterprise { .. } => AuthMode::WpaEnterprise,
            Self::CaptivePortal { .. } => AuthMode::Hotspot,
        }
    }

    /// Empty settings for the given mode, used when the operator switches
    /// an interface's auth mode in the form.
    pub fn empty(mode: AuthMode) -> Self {
        match mode {
            AuthMode::WpaPersonal => Self::Personal {
                encryption: DEFAULT_CIPHER.into(),
                key: String::new(),
            },
            AuthMode::WpaEnterprise => Self::Enterprise {
                server: String::new(),
                port: String::new(),
                secret: String::new(),
            },
            AuthMode::Hotspot => Self::CaptivePortal {
                portal_url: String::new(),
                radius_server: String::new(),
                radius_port: String::new(),
                radius_secret: String::new(),
                walled_garden: String::new(),
                nas_id: String::new(),
                max_clients: String::new(),
            },
        }
    }
}

// ── Wireless interface ──────────────────────────────────────────────

/// One configured radio interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlatInterface", into = "FlatInterface")]
pub struct WirelessInterface {
    /// Opaque section identifier, unique per interface within a document.
    pub id: String,
    /// Physical radio this interface binds to (`radio0`, `radio1`).
    pub radio: String,
    /// SSID; may be empty pending user input.
    pub ssid: String,
    /// Network placement mode.
    pub placement: PlacementMode,
    /// Credentials for the active authentication mode.
    pub auth: AuthSettings,
}

impl WirelessInterface {
    /// Generate a fresh section identifier (`ap{n}_{4 hex chars}`).
    pub fn generate_id(index: usize) -> String {
        let tail = Uuid::new_v4().simple().to_string();
        format!("ap{index}_{}", &tail[..4])
    }

    /// The default LAN interface: personal-key auth with the default cipher.
    pub fn default_lan(index: usize) -> Self {
        Self {
            id: Self::generate_id(index),
            radio: RADIOS[0].into(),
            ssid: String::new(),
            placement: PlacementMode::Lan,
            auth: AuthSettings::Personal {
                encryption: DEFAULT_CIPHER.into(),
                key: String::new(),
            },
        }
    }
}

// ── Flat wire record ────────────────────────────────────────────────

/// The loose, camelCase interface shape of a previously normalized
/// document: every mode-conditional field is optional and key presence
/// depends on the auth mode that was active when it was written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatInterface {
    pub id: String,
    pub device: String,
    pub ssid: String,
    pub auth_mode: Option<AuthMode>,
    pub network_mode: Option<PlacementMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uam_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_server_hotspot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_port_hotspot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_secret_hotspot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uam_allowed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nas_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxassoc: Option<String>,
}

impl From<FlatInterface> for WirelessInterface {
    fn from(flat: FlatInterface) -> Self {
        let mode = flat.auth_mode.unwrap_or(AuthMode::WpaPersonal);
        let auth = match mode {
            AuthMode::WpaPersonal => AuthSettings::Personal {
                encryption: flat.encryption.unwrap_or_else(|| DEFAULT_CIPHER.into()),
                key: flat.key.unwrap_or_default(),
            },
            AuthMode::WpaEnterprise => AuthSettings::Enterprise {
                server: flat.radius_server.unwrap_or_default(),
                port: flat.radius_port.unwrap_or_default(),
                secret: flat.radius_secret.unwrap_or_default(),
            },
            AuthMode::Hotspot => AuthSettings::CaptivePortal {
                portal_url: flat.uam_server.unwrap_or_default(),
                radius_server: flat.radius_server_hotspot.unwrap_or_default(),
                radius_port: flat.radius_port_hotspot.unwrap_or_default(),
                radius_secret: flat.radius_secret_hotspot.unwrap_or_default(),
                walled_garden: flat.uam_allowed.unwrap_or_default(),
                nas_id: flat.nas_id.unwrap_or_default(),
                max_clients: flat.maxassoc.unwrap_or_default(),
            },
        };
        Self {
            id: if flat.id.is_empty() {
                WirelessInterface::generate_id(0)
            } else {
                flat.id
            },
            radio: if flat.device.is_empty() {
                RADIOS[0].into()
            } else {
                flat.device
            },
            ssid: flat.ssid,
            placement: flat.network_mode.unwrap_or(PlacementMode::Lan),
            auth,
        }
    }
}

impl From<WirelessInterface> for FlatInterface {
    fn from(iface: WirelessInterface) -> Self {
        let mut flat = FlatInterface {
            id: iface.id,
            device: iface.radio,
            ssid: iface.ssid,
            auth_mode: Some(iface.auth.mode()),
            network_mode: Some(iface.placement),
            ..FlatInterface::default()
        };
        match iface.auth {
            AuthSettings::Personal { encryption, key } => {
                flat.encryption = Some(encryption);
                flat.key = Some(key);
            }
            AuthSettings::Enterprise {
                server,
                port,
                secret,
            } => {
                flat.radius_server = Some(server);
                flat.radius_port = Some(port);
                flat.radius_secret = Some(secret);
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
                flat.uam_server = Some(portal_url);
                flat.radius_server_hotspot = Some(radius_server);
                flat.radius_port_hotspot = Some(radius_port);
                flat.radius_secret_hotspot = Some(radius_secret);
                flat.uam_allowed = Some(walled_garden);
                flat.nas_id = Some(nas_id);
                flat.maxassoc = Some(max_clients);
            }
        }
        flat
    }
}

// ── System & log settings ───────────────────────────────────────────

/// System-level settings: hostname, timezone, NTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSettings {
    pub hostname: String,
    /// IANA timezone name.
    pub timezone: String,
    /// UTC offset, derived from `timezone` via the static table. Read-only
    /// from the form's point of view.
    pub tz_offset: String,
    pub ntp_enabled: bool,
    /// Ordered NTP servers; the first entry is the primary.
    pub ntp_servers: Vec<String>,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            timezone: String::new(),
            tz_offset: String::new(),
            ntp_enabled: true,
            ntp_servers: DEFAULT_NTP_SERVERS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Log buffer and remote syslog settings. Remote fields only matter when
/// `remote_enabled` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogSettings {
    pub size: String,
    pub remote_enabled: bool,
    pub host: String,
    pub ip: String,
    pub port: String,
    pub proto: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            size: "64k".into(),
            remote_enabled: false,
            host: String::new(),
            ip: String::new(),
            port: String::new(),
            proto: "udp".into(),
        }
    }
}

// ── Form state ──────────────────────────────────────────────────────

/// The complete normalized form: what the interactive provisioning form
/// edits, and what `uci::serialize` turns into a backend document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub system: SystemSettings,
    pub logs: LogSettings,
    pub interfaces: Vec<WirelessInterface>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            system: SystemSettings::default(),
            logs: LogSettings::default(),
            interfaces: vec![WirelessInterface::default_lan(0)],
        }
    }
}

impl FormState {
    /// Hard-coded defaults for a device with no stored configuration:
    /// hostname prefilled from the device name, default NTP pair, one
    /// default LAN interface with personal-key auth.
    pub fn defaults(device_name: &str) -> Self {
        let mut form = Self::default();
        form.system.hostname = device_name.to_owned();
        form
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prefill_hostname_and_lan_interface() {
        let form = FormState::defaults("ap-lobby");
        assert_eq!(form.system.hostname, "ap-lobby");
        assert!(form.system.ntp_enabled);
        assert_eq!(form.system.ntp_servers, DEFAULT_NTP_SERVERS);
        assert_eq!(form.interfaces.len(), 1);
        let iface = &form.interfaces[0];
        assert_eq!(iface.placement, PlacementMode::Lan);
        assert_eq!(
            iface.auth,
            AuthSettings::Personal {
                encryption: "psk2".into(),
                key: String::new(),
            }
        );
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = WirelessInterface::generate_id(0);
        let b = WirelessInterface::generate_id(0);
        assert!(a.starts_with("ap0_"));
        assert_ne!(a, b);
    }

    #[test]
    fn flat_projection_round_trips_enterprise_fields() {
        let iface = WirelessInterface {
            id: "ap1_9f3c".into(),
            radio: "radio1".into(),
            ssid: "corp-net".into(),
            placement: PlacementMode::Corp,
            auth: AuthSettings::Enterprise {
                server: "10.0.0.9".into(),
                port: "1812".into(),
                secret: "s3cret".into(),
            },
        };
        let flat = FlatInterface::from(iface.clone());
        assert_eq!(flat.radius_server.as_deref(), Some("10.0.0.9"));
        assert!(flat.encryption.is_none(), "no personal fields on enterprise");
        assert!(flat.uam_server.is_none(), "no hotspot fields on enterprise");
        assert_eq!(WirelessInterface::from(flat), iface);
    }

    #[test]
    fn flat_interface_json_uses_camel_case() {
        let iface = WirelessInterface {
            id: "ap0_0001".into(),
            radio: "radio0".into(),
            ssid: "hs".into(),
            placement: PlacementMode::Hotspot,
            auth: AuthSettings::CaptivePortal {
                portal_url: "https://portal".into(),
                radius_server: "r".into(),
                radius_port: "1812".into(),
                radius_secret: "s".into(),
                walled_garden: "example.org".into(),
                nas_id: "nas".into(),
                max_clients: "32".into(),
            },
        };
        let value = serde_json::to_value(&iface).unwrap();
        assert_eq!(value["authMode"], "hotspot");
        assert_eq!(value["networkMode"], "hotspot");
        assert_eq!(value["uamServer"], "https://portal");
        assert_eq!(value["radiusServerHotspot"], "r");
        assert!(value.get("key").is_none());
    }
}
