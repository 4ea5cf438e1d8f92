// ── Decode: stored document → form state ──
//
// Accepts whatever the backend hands back: nothing at all, a previously
// normalized document, or a raw UCI-style document. Never fails outward:
// anything unparseable degrades to device-name defaults so the form
// always opens editable.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::model::document::{ConfigDocument, ConfigRecord, SYSTEM_SECTION};
use crate::model::form::{
    AuthSettings, DEFAULT_CIPHER, DEFAULT_NTP_SERVERS, FlatInterface, FormState, LogSettings,
    RADIOS, SystemSettings, WirelessInterface,
};
use crate::uci::placement::PlacementMode;
use crate::uci::timezone;

/// Reconstruct form state from a stored configuration.
pub fn normalize(input: Option<&Value>, device_name: &str) -> FormState {
    let Some(value) = input else {
        return FormState::defaults(device_name);
    };
    match try_normalize(value, device_name) {
        Some(form) => form,
        None => {
            warn!(device_name, "stored configuration is unparseable; using defaults");
            FormState::defaults(device_name)
        }
    }
}

fn try_normalize(value: &Value, device_name: &str) -> Option<FormState> {
    let obj = value.as_object()?;
    if obj.contains_key("interfaces") {
        parse_normalized(obj, device_name)
    } else {
        parse_raw(value, device_name)
    }
}

// ── Previously normalized shape ─────────────────────────────────────

fn parse_normalized(obj: &Map<String, Value>, device_name: &str) -> Option<FormState> {
    let mut system: SystemSettings = match obj.get("system") {
        Some(v) => serde_json::from_value(v.clone()).ok()?,
        None => SystemSettings::default(),
    };
    let logs: LogSettings = match obj.get("logs") {
        Some(v) => serde_json::from_value(v.clone()).ok()?,
        None => LogSettings::default(),
    };

    // A normalized document may still carry a chilli section when it was
    // produced from a raw one; keep the lookup available for pair-shaped
    // interface entries.
    let chilli = chilli_lookup(obj.get("chilli"));

    let mut interfaces = Vec::new();
    for entry in obj.get("interfaces")?.as_array()? {
        let iface = if entry.get("values").is_some() {
            // `{section, values}` pair: same path as a raw wireless record.
            let record: ConfigRecord = serde_json::from_value(entry.clone()).ok()?;
            interface_from_record(&record, &chilli)
        } else {
            let flat: FlatInterface = serde_json::from_value(entry.clone()).ok()?;
            WirelessInterface::from(flat)
        };
        interfaces.push(iface);
    }
    if interfaces.is_empty() {
        interfaces.push(WirelessInterface::default_lan(0));
    }

    finalize_system(&mut system, device_name);
    Some(FormState {
        system,
        logs,
        interfaces,
    })
}

// ── Raw backend shape ───────────────────────────────────────────────

fn parse_raw(value: &Value, device_name: &str) -> Option<FormState> {
    let doc: ConfigDocument = serde_json::from_value(value.clone()).ok()?;

    let mut system = system_from_records(&doc.system);
    let logs = logs_from_records(&doc.system);
    let chilli = chilli_lookup_from_records(&doc.chilli);

    let mut interfaces: Vec<WirelessInterface> = doc
        .wireless
        .iter()
        .map(|record| interface_from_record(record, &chilli))
        .collect();
    if interfaces.is_empty() {
        interfaces.push(WirelessInterface::default_lan(0));
    }

    finalize_system(&mut system, device_name);
    Some(FormState {
        system,
        logs,
        interfaces,
    })
}

/// Pick the system record: the canonical `@system[0]` slot wins, else the
/// first record that carries any values at all.
fn system_from_records(records: &[ConfigRecord]) -> SystemSettings {
    let record = records
        .iter()
        .find(|r| r.section == SYSTEM_SECTION)
        .or_else(|| records.iter().find(|r| !r.values.is_empty()));

    let mut system = SystemSettings::default();
    let Some(record) = record else {
        return system;
    };

    if let Some(hostname) = record.str_value("hostname") {
        system.hostname = hostname.to_owned();
    }
    if let Some(tz) = record.str_value("timezone") {
        system.timezone = tz.to_owned();
    }
    if let Some(offset) = record.str_value("tz_offset") {
        system.tz_offset = offset.to_owned();
    }

    match record.values.get("ntp") {
        Some(ntp) => {
            system.ntp_enabled = true;
            let servers: Vec<String> = ntp
                .get("servers")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default();
            if !servers.is_empty() {
                system.ntp_servers = servers;
            }
        }
        None => system.ntp_enabled = false,
    }
    system
}

/// The log block may ride a separate system record; find whichever one
/// carries a `logs` sub-map.
fn logs_from_records(records: &[ConfigRecord]) -> LogSettings {
    let mut logs = LogSettings::default();
    let Some(block) = records
        .iter()
        .find_map(|r| r.values.get("logs").and_then(Value::as_object))
    else {
        return logs;
    };

    if let Some(size) = block.get("size").and_then(Value::as_str) {
        logs.size = size.to_owned();
    }
    logs.remote_enabled = block.get("remote_enabled").and_then(Value::as_str) == Some("1");
    if let Some(host) = block.get("host").and_then(Value::as_str) {
        logs.host = host.to_owned();
    }
    if let Some(ip) = block.get("ip").and_then(Value::as_str) {
        logs.ip = ip.to_owned();
    }
    if let Some(port) = block.get("port").and_then(Value::as_str) {
        logs.port = port.to_owned();
    }
    if let Some(proto) = block.get("proto").and_then(Value::as_str) {
        logs.proto = proto.to_owned();
    }
    logs
}

// ── Chilli enrichment ───────────────────────────────────────────────

/// Build the network-name → chilli-values lookup from a JSON section.
fn chilli_lookup(section: Option<&Value>) -> HashMap<String, Map<String, Value>> {
    let Some(records) = section.and_then(Value::as_array) else {
        return HashMap::new();
    };
    records
        .iter()
        .filter_map(|entry| {
            let values = entry.get("values")?.as_object()?;
            let net = values.get("network")?.as_str()?;
            Some((net.to_owned(), values.clone()))
        })
        .collect()
}

fn chilli_lookup_from_records(records: &[ConfigRecord]) -> HashMap<String, Map<String, Value>> {
    records
        .iter()
        .filter_map(|record| {
            let net = record.str_value("network")?;
            Some((net.to_owned(), record.values.clone()))
        })
        .collect()
}

// ── Wireless record → interface ─────────────────────────────────────

/// Map one wireless record to an interface descriptor.
///
/// Placement is inferred from the network-name prefix, auth mode from the
/// value-map content: `encryption == "none"` means the interface sits
/// behind a captive portal, `ieee8021x == "1"` means 802.1X enterprise,
/// anything else is personal-key.
fn interface_from_record(
    record: &ConfigRecord,
    chilli: &HashMap<String, Map<String, Value>>,
) -> WirelessInterface {
    let net = record.str_value("network").unwrap_or("lan");
    let placement = PlacementMode::from_network_name(net);

    let auth = if record.str_value("encryption") == Some("none") {
        let portal = chilli.get(net);
        let field = |key: &str| -> String {
            portal
                .and_then(|values| values.get(key))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        AuthSettings::CaptivePortal {
            portal_url: field("uamserver"),
            radius_server: field("radiusserver1"),
            radius_port: field("radiusport1"),
            radius_secret: field("radiussecret"),
            walled_garden: field("uamallowed"),
            nas_id: field("nasid"),
            max_clients: record.str_value("maxassoc").unwrap_or_default().to_owned(),
        }
    } else if record.str_value("ieee8021x") == Some("1") {
        AuthSettings::Enterprise {
            server: record.str_value("auth_server").unwrap_or_default().to_owned(),
            port: record.str_value("auth_port").unwrap_or_default().to_owned(),
            secret: record.str_value("auth_secret").unwrap_or_default().to_owned(),
        }
    } else {
        AuthSettings::Personal {
            encryption: record
                .str_value("encryption")
                .unwrap_or(DEFAULT_CIPHER)
                .to_owned(),
            key: record.str_value("key").unwrap_or_default().to_owned(),
        }
    };

    WirelessInterface {
        id: record.section.clone(),
        radio: record.str_value("device").unwrap_or(RADIOS[0]).to_owned(),
        ssid: record.str_value("ssid").unwrap_or_default().to_owned(),
        placement,
        auth,
    }
}

// ── Shared fixups ───────────────────────────────────────────────────

fn finalize_system(system: &mut SystemSettings, device_name: &str) {
    if system.hostname.is_empty() {
        system.hostname = device_name.to_owned();
    }
    // The offset is derived; a known timezone name always wins over
    // whatever string was stored.
    if let Some(offset) = timezone::offset_for(&system.timezone) {
        system.tz_offset = offset.to_owned();
    }
    if system.ntp_servers.is_empty() {
        system.ntp_servers = DEFAULT_NTP_SERVERS.iter().map(ToString::to_string).collect();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::form::AuthMode;
    use crate::uci::encode::serialize;

    #[test]
    fn absent_input_yields_device_defaults() {
        let form = normalize(None, "ap-lobby");
        assert_eq!(form.system.hostname, "ap-lobby");
        assert!(form.system.ntp_enabled);
        assert_eq!(form.system.ntp_servers, DEFAULT_NTP_SERVERS);
        assert_eq!(form.interfaces.len(), 1);
        assert_eq!(form.interfaces[0].placement, PlacementMode::Lan);
        assert_eq!(
            form.interfaces[0].auth,
            AuthSettings::Personal {
                encryption: "psk2".into(),
                key: String::new(),
            }
        );
    }

    #[test]
    fn missing_wireless_section_falls_back_to_default_interface() {
        let doc = json!({
            "system": [{
                "config": "system",
                "section": "@system[0]",
                "values": { "hostname": "lobby-ap" }
            }]
        });
        let form = normalize(Some(&doc), "ap-lobby");
        assert_eq!(form.system.hostname, "lobby-ap");
        assert_eq!(form.interfaces.len(), 1);
        assert_eq!(form.interfaces[0].placement, PlacementMode::Lan);
        assert_eq!(form.interfaces[0].auth.mode(), AuthMode::WpaPersonal);
    }

    /// Interface ids are freshly generated, so default forms are compared
    /// field-by-field rather than as whole structs.
    fn assert_is_default_form(form: &FormState, context: &str) {
        assert_eq!(form.system.hostname, "ap-lobby", "{context}");
        assert_eq!(form.logs, LogSettings::default(), "{context}");
        assert_eq!(form.interfaces.len(), 1, "{context}");
        assert_eq!(form.interfaces[0].placement, PlacementMode::Lan, "{context}");
        assert_eq!(form.interfaces[0].auth.mode(), AuthMode::WpaPersonal, "{context}");
    }

    #[test]
    fn garbage_input_degrades_to_defaults() {
        for bad in [json!("not an object"), json!(42), json!([1, 2, 3])] {
            let form = normalize(Some(&bad), "ap-lobby");
            assert_is_default_form(&form, &bad.to_string());
        }
        // Structurally broken sections degrade too.
        let broken = json!({ "wireless": "should be an array" });
        assert_is_default_form(&normalize(Some(&broken), "ap-lobby"), "broken wireless");
    }

    #[test]
    fn raw_system_record_without_marker_still_parses() {
        let doc = json!({
            "system": [{
                "config": "system",
                "section": "main",
                "values": { "hostname": "attic-ap", "timezone": "Europe/Paris" }
            }],
            "wireless": []
        });
        let form = normalize(Some(&doc), "ap-lobby");
        assert_eq!(form.system.hostname, "attic-ap");
        assert_eq!(form.system.tz_offset, "+0100");
        assert!(!form.system.ntp_enabled, "no ntp block means disabled");
    }

    #[test]
    fn log_block_is_found_on_a_separate_record() {
        let doc = json!({
            "system": [
                {
                    "config": "system",
                    "section": "@system[0]",
                    "values": { "hostname": "ap" }
                },
                {
                    "config": "system",
                    "section": "@system[0]",
                    "values": {
                        "logs": {
                            "size": "128k",
                            "remote_enabled": "1",
                            "host": "logs.example.net",
                            "ip": "10.0.0.2",
                            "port": "514",
                            "proto": "tcp"
                        }
                    }
                }
            ]
        });
        let form = normalize(Some(&doc), "ap-lobby");
        assert!(form.logs.remote_enabled);
        assert_eq!(form.logs.size, "128k");
        assert_eq!(form.logs.host, "logs.example.net");
        assert_eq!(form.logs.proto, "tcp");
    }

    #[test]
    fn auth_mode_is_inferred_from_value_map_content() {
        let doc = json!({
            "wireless": [
                {
                    "config": "wireless", "section": "ap0_aaaa", "type": "wifi-iface",
                    "values": { "device": "radio0", "ssid": "open", "network": "hs0", "encryption": "none" }
                },
                {
                    "config": "wireless", "section": "ap1_bbbb", "type": "wifi-iface",
                    "values": {
                        "device": "radio1", "ssid": "corp", "network": "corp1",
                        "encryption": "wpa2", "ieee8021x": "1",
                        "auth_server": "10.0.0.9", "auth_port": "1812", "auth_secret": "s"
                    }
                },
                {
                    "config": "wireless", "section": "ap2_cccc", "type": "wifi-iface",
                    "values": { "device": "radio0", "ssid": "home", "network": "lan", "encryption": "psk2", "key": "pw" }
                }
            ]
        });
        let form = normalize(Some(&doc), "ap-lobby");
        assert_eq!(form.interfaces.len(), 3);
        assert_eq!(form.interfaces[0].auth.mode(), AuthMode::Hotspot);
        assert_eq!(form.interfaces[0].placement, PlacementMode::Hotspot);
        assert_eq!(form.interfaces[1].auth.mode(), AuthMode::WpaEnterprise);
        assert_eq!(form.interfaces[1].placement, PlacementMode::Corp);
        assert_eq!(form.interfaces[2].auth.mode(), AuthMode::WpaPersonal);
        assert_eq!(form.interfaces[2].placement, PlacementMode::Lan);
    }

    #[test]
    fn chilli_values_merge_into_hotspot_interfaces_by_network_name() {
        let doc = json!({
            "wireless": [{
                "config": "wireless", "section": "ap0_aaaa", "type": "wifi-iface",
                "values": {
                    "device": "radio0", "ssid": "city", "network": "hs0",
                    "encryption": "none", "maxassoc": "48"
                }
            }],
            "chilli": [{
                "config": "chilli", "section": "chilli0", "type": "chilli",
                "values": {
                    "network": "hs0",
                    "uamserver": "https://portal.example.net/uam",
                    "radiusserver1": "10.0.0.5",
                    "radiusport1": "1812",
                    "radiussecret": "radsecret",
                    "nasid": "ap-lobby-hs0",
                    "uamallowed": "portal.example.net"
                }
            }]
        });
        let form = normalize(Some(&doc), "ap-lobby");
        let AuthSettings::CaptivePortal {
            portal_url,
            radius_server,
            radius_port,
            radius_secret,
            walled_garden,
            nas_id,
            max_clients,
        } = &form.interfaces[0].auth
        else {
            panic!("expected captive-portal auth");
        };
        assert_eq!(portal_url, "https://portal.example.net/uam");
        assert_eq!(radius_server, "10.0.0.5");
        assert_eq!(radius_port, "1812");
        assert_eq!(radius_secret, "radsecret");
        assert_eq!(walled_garden, "portal.example.net");
        assert_eq!(nas_id, "ap-lobby-hs0");
        assert_eq!(max_clients, "48");
    }

    #[test]
    fn normalized_document_with_flat_interfaces_reads_directly() {
        let doc = json!({
            "system": {
                "hostname": "kiosk-ap",
                "timezone": "UTC",
                "tzOffset": "",
                "ntpEnabled": true,
                "ntpServers": ["ntp.example.net"]
            },
            "logs": { "size": "32k", "remoteEnabled": false, "host": "", "ip": "", "port": "", "proto": "udp" },
            "interfaces": [{
                "id": "ap0_1a2b",
                "device": "radio1",
                "ssid": "kiosk",
                "authMode": "wpa-personal",
                "networkMode": "guest",
                "encryption": "sae-mixed",
                "key": "kioskpass"
            }]
        });
        let form = normalize(Some(&doc), "ap-lobby");
        assert_eq!(form.system.hostname, "kiosk-ap");
        assert_eq!(form.system.tz_offset, "+0000", "offset re-derived from name");
        assert_eq!(form.logs.size, "32k");
        let iface = &form.interfaces[0];
        assert_eq!(iface.radio, "radio1");
        assert_eq!(iface.placement, PlacementMode::Guest);
        assert_eq!(
            iface.auth,
            AuthSettings::Personal {
                encryption: "sae-mixed".into(),
                key: "kioskpass".into(),
            }
        );
    }

    #[test]
    fn normalized_document_accepts_section_values_pairs() {
        let doc = json!({
            "interfaces": [{
                "section": "ap0_1a2b",
                "values": {
                    "device": "radio0", "ssid": "office", "network": "lan",
                    "encryption": "psk2", "key": "pw"
                }
            }]
        });
        let form = normalize(Some(&doc), "ap-lobby");
        assert_eq!(form.system.hostname, "ap-lobby", "system falls back to device name");
        let iface = &form.interfaces[0];
        assert_eq!(iface.id, "ap0_1a2b");
        assert_eq!(iface.ssid, "office");
        assert_eq!(iface.auth.mode(), AuthMode::WpaPersonal);
    }

    // ── Round-trip ──────────────────────────────────────────────────

    fn full_form() -> FormState {
        FormState {
            system: SystemSettings {
                hostname: "lobby-ap".into(),
                timezone: "Europe/Berlin".into(),
                tz_offset: "+0100".into(),
                ntp_enabled: true,
                ntp_servers: vec!["0.pool.ntp.org".into(), "ntp.example.net".into()],
            },
            logs: LogSettings {
                size: "128k".into(),
                remote_enabled: true,
                host: "logs.example.net".into(),
                ip: "10.0.0.2".into(),
                port: "514".into(),
                proto: "tcp".into(),
            },
            interfaces: vec![
                WirelessInterface {
                    id: "ap0_1111".into(),
                    radio: "radio0".into(),
                    ssid: "office".into(),
                    placement: PlacementMode::Lan,
                    auth: AuthSettings::Personal {
                        encryption: "psk2".into(),
                        key: "officepass".into(),
                    },
                },
                WirelessInterface {
                    id: "ap1_2222".into(),
                    radio: "radio1".into(),
                    ssid: "corp".into(),
                    placement: PlacementMode::Corp,
                    auth: AuthSettings::Enterprise {
                        server: "10.0.0.9".into(),
                        port: "1812".into(),
                        secret: "entsecret".into(),
                    },
                },
                WirelessInterface {
                    id: "ap2_3333".into(),
                    radio: "radio0".into(),
                    ssid: "city-free".into(),
                    placement: PlacementMode::Hotspot,
                    auth: AuthSettings::CaptivePortal {
                        portal_url: "https://portal.example.net/uam".into(),
                        radius_server: "10.0.0.5".into(),
                        radius_port: "1812".into(),
                        radius_secret: "radsecret".into(),
                        walled_garden: "portal.example.net".into(),
                        nas_id: "lobby-hs".into(),
                        max_clients: "64".into(),
                    },
                },
            ],
        }
    }

    #[test]
    fn serialize_then_normalize_round_trips() {
        let form = full_form();
        let doc = serialize(&form, "ap-lobby");
        let value = serde_json::to_value(&doc).unwrap();
        let reloaded = normalize(Some(&value), "ap-lobby");
        assert_eq!(reloaded, form);
    }

    #[test]
    fn round_trip_preserves_guest_placement_via_prefix() {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces[0].ssid = "visitors".into();
        form.interfaces[0].placement = PlacementMode::Guest;

        let doc = serialize(&form, "ap-lobby");
        let value = serde_json::to_value(&doc).unwrap();
        let reloaded = normalize(Some(&value), "ap-lobby");
        assert_eq!(reloaded.interfaces[0].placement, PlacementMode::Guest);
    }
}
