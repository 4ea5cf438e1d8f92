// ── Backend-facing configuration document ──
//
// The nested, section-oriented shape submitted for provisioning. Each
// named section is an ordered sequence of records; order is meaningful
// (the first system record is the canonical `@system[0]` slot).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker for the first system configuration slot.
pub const SYSTEM_SECTION: &str = "@system[0]";

/// One UCI-style record: `{ config, section, type?, values }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Config domain this record belongs to (`system`, `wireless`, ...).
    /// Defaulted so bare `{section, values}` pairs still decode.
    #[serde(default)]
    pub config: String,
    /// Section name within the domain.
    pub section: String,
    /// Section type (`wifi-iface`, `interface`, `zone`, ...); system
    /// records carry none.
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub section_type: Option<String>,
    /// Loose key/value payload; key presence depends on the record kind.
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl ConfigRecord {
    pub fn new(config: &str, section: impl Into<String>, section_type: Option<&str>) -> Self {
        Self {
            config: config.to_owned(),
            section: section.into(),
            section_type: section_type.map(str::to_owned),
            values: Map::new(),
        }
    }

    /// Set a string value, skipping empty strings (the backend treats a
    /// missing key and an empty value the same way, and the original
    /// documents omit empties).
    pub fn set_nonempty(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.values.insert(key.to_owned(), Value::String(value.to_owned()));
        }
        self
    }

    /// Set a string value unconditionally.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.to_owned(), Value::String(value.into()));
        self
    }

    /// Fetch a string value.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

/// The full document: named sections, each an ordered record list.
///
/// Network, firewall, and chilli sections are derived -- they exist only
/// for interfaces whose placement mode is not LAN. A document is never
/// mutated in place; every save produces a full replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub system: Vec<ConfigRecord>,
    #[serde(default)]
    pub wireless: Vec<ConfigRecord>,
    #[serde(default)]
    pub network: Vec<ConfigRecord>,
    #[serde(default)]
    pub firewall: Vec<ConfigRecord>,
    #[serde(default)]
    pub chilli: Vec<ConfigRecord>,
}
