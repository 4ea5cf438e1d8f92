// ── Device identity and inventory types ──
//
// The MAC address is the canonical device identity: configuration
// operations key on it. The unique device name is the human-facing label
// the device CRUD endpoints address.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address from any common format.
    /// Accepts colon-separated, dash-separated, or bare hex.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().to_lowercase().replace('-', ":");
        if raw.contains(':') {
            return Self(raw);
        }
        // Bare hex: re-insert separators when the length fits.
        if raw.len() == 12 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            let grouped: Vec<&str> = (0..6).map(|i| &raw[i * 2..i * 2 + 2]).collect();
            return Self(grouped.join(":"));
        }
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

// ── Device ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Unknown,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A managed access-point device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub mac: MacAddress,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: DeviceStatus,
    /// Seconds since last boot, when reported.
    pub uptime_secs: Option<u64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_normalizes_case_and_separators() {
        assert_eq!(
            MacAddress::new("AA-BB-CC-DD-EE-FF").as_str(),
            "aa:bb:cc:dd:ee:ff"
        );
        assert_eq!(
            MacAddress::new("aabbccddeeff").as_str(),
            "aa:bb:cc:dd:ee:ff"
        );
        assert_eq!(
            MacAddress::new("aa:bb:cc:dd:ee:ff").as_str(),
            "aa:bb:cc:dd:ee:ff"
        );
    }
}
