// ── Encode: form state → configuration document ──
//
// Deterministic and total: every call produces a complete replacement
// document. Interface records carry exactly the value-map keys of their
// active authentication mode; network/firewall/chilli records are derived
// per interface from the placement prefix table.

use serde_json::json;

use crate::model::document::{ConfigDocument, ConfigRecord, SYSTEM_SECTION};
use crate::model::form::{AuthSettings, FormState, LogSettings, SystemSettings, WirelessInterface};
use crate::uci::placement::PlacementMode;
use crate::uci::timezone;

/// Serialize form state into the backend-facing document.
pub fn serialize(form: &FormState, device_name: &str) -> ConfigDocument {
    let mut doc = ConfigDocument {
        system: vec![system_record(&form.system), log_record(&form.logs)],
        ..ConfigDocument::default()
    };

    for (index, iface) in form.interfaces.iter().enumerate() {
        let net = iface.placement.network_name(index);

        doc.wireless.push(wireless_record(iface, &net));

        if iface.placement.is_derived() {
            doc.network.push(network_record(iface.placement, &net));
            doc.firewall.push(zone_record(iface.placement, &net));
            doc.firewall.push(forwarding_record(&net));
        }

        if iface.placement == PlacementMode::Hotspot {
            doc.chilli.push(chilli_record(iface, index, &net, device_name));
        }
    }

    doc
}

// ── System section ──────────────────────────────────────────────────

fn system_record(system: &SystemSettings) -> ConfigRecord {
    let mut record = ConfigRecord::new("system", SYSTEM_SECTION, None);
    record.set_nonempty("hostname", &system.hostname);
    record.set_nonempty("timezone", &system.timezone);

    // The offset is always re-derived from the timezone name; the stored
    // form value is only a fallback for zones the table doesn't know.
    let offset = match timezone::offset_for(&system.timezone) {
        Some(known) => known,
        None => system.tz_offset.as_str(),
    };
    record.set_nonempty("tz_offset", offset);

    if system.ntp_enabled {
        record
            .values
            .insert("ntp".into(), json!({ "servers": system.ntp_servers }));
    }
    record
}

fn log_record(logs: &LogSettings) -> ConfigRecord {
    let mut record = ConfigRecord::new("system", SYSTEM_SECTION, None);
    record.values.insert(
        "logs".into(),
        json!({
            "size": logs.size,
            "remote_enabled": if logs.remote_enabled { "1" } else { "0" },
            "host": logs.host,
            "ip": logs.ip,
            "port": logs.port,
            "proto": logs.proto,
        }),
    );
    record
}

// ── Wireless section ────────────────────────────────────────────────

fn wireless_record(iface: &WirelessInterface, net: &str) -> ConfigRecord {
    let mut record = ConfigRecord::new("wireless", iface.id.clone(), Some("wifi-iface"));
    record.set("device", iface.radio.clone());
    record.set("mode", "ap");
    let ssid = if iface.ssid.is_empty() {
        format!("ssid_{}", iface.id)
    } else {
        iface.ssid.clone()
    };
    record.set("ssid", ssid);
    record.set("network", net);

    match &iface.auth {
        AuthSettings::Personal { encryption, key } => {
            record.set_nonempty("encryption", encryption);
            record.set_nonempty("key", key);
        }
        AuthSettings::Enterprise {
            server,
            port,
            secret,
        } => {
            record.set("encryption", "wpa2");
            record.set("ieee8021x", "1");
            record.set_nonempty("auth_server", server);
            record.set_nonempty("auth_port", port);
            record.set_nonempty("auth_secret", secret);
        }
        AuthSettings::CaptivePortal { max_clients, .. } => {
            // The portal itself handles auth; the radio stays open. Portal
            // parameters land in the chilli record, not here.
            record.set("encryption", "none");
            record.set_nonempty("maxassoc", max_clients);
        }
    }
    record
}

// ── Derived sections ────────────────────────────────────────────────

fn network_record(placement: PlacementMode, net: &str) -> ConfigRecord {
    let mut record = ConfigRecord::new("network", net, Some("interface"));
    record.set("proto", "none");
    if placement != PlacementMode::Hotspot {
        record.set("type", "bridge");
    }
    record
}

fn zone_record(placement: PlacementMode, net: &str) -> ConfigRecord {
    let mut record = ConfigRecord::new("firewall", format!("{net}_zone"), Some("zone"));
    record.set("name", net);
    record.set("network", net);
    // The hotspot zone accepts inbound so the portal daemon can intercept
    // clients; every other derived zone rejects it.
    let input = if placement == PlacementMode::Hotspot {
        "ACCEPT"
    } else {
        "REJECT"
    };
    record.set("input", input);
    record.set("output", "ACCEPT");
    record.set("forward", "REJECT");
    record.set("masq", if placement.masquerades() { "1" } else { "0" });
    record
}

fn forwarding_record(net: &str) -> ConfigRecord {
    let mut record = ConfigRecord::new("firewall", format!("{net}_to_wan"), Some("forwarding"));
    record.set("src", net);
    record.set("dest", "wan");
    record
}

fn chilli_record(
    iface: &WirelessInterface,
    index: usize,
    net: &str,
    device_name: &str,
) -> ConfigRecord {
    let mut record = ConfigRecord::new("chilli", format!("chilli{index}"), Some("chilli"));
    record.set("network", net);

    if let AuthSettings::CaptivePortal {
        portal_url,
        radius_server,
        radius_port,
        radius_secret,
        walled_garden,
        nas_id,
        ..
    } = &iface.auth
    {
        record.set("uamserver", portal_url.clone());
        record.set("radiusserver1", radius_server.clone());
        record.set("radiusport1", radius_port.clone());
        record.set("radiussecret", radius_secret.clone());
        let nasid = if nas_id.is_empty() {
            format!("{device_name}-{net}")
        } else {
            nas_id.clone()
        };
        record.set("nasid", nasid);
        record.set("uamallowed", walled_garden.clone());
    } else {
        // A hotspot placement with non-portal auth still needs a chilli
        // section for the network; leave portal fields empty.
        record.set("uamserver", "");
        record.set("radiusserver1", "");
        record.set("radiusport1", "");
        record.set("radiussecret", "");
        record.set("nasid", format!("{device_name}-{net}"));
        record.set("uamallowed", "");
    }
    record
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    fn hotspot_form() -> FormState {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces = vec![WirelessInterface {
            id: "ap0_1a2b".into(),
            radio: "radio0".into(),
            ssid: "city-free-wifi".into(),
            placement: PlacementMode::Hotspot,
            auth: AuthSettings::CaptivePortal {
                portal_url: "https://portal.example.net/uam".into(),
                radius_server: "10.0.0.5".into(),
                radius_port: "1812".into(),
                radius_secret: "radsecret".into(),
                walled_garden: "portal.example.net,pay.example.net".into(),
                nas_id: String::new(),
                max_clients: "64".into(),
            },
        }];
        form
    }

    #[test]
    fn system_record_carries_derived_offset() {
        let mut form = FormState::defaults("ap-lobby");
        form.system.timezone = "Asia/Kolkata".into();
        form.system.tz_offset = "stale".into();

        let doc = serialize(&form, "ap-lobby");
        let sys = &doc.system[0];
        assert_eq!(sys.section, "@system[0]");
        assert_eq!(sys.str_value("hostname"), Some("ap-lobby"));
        assert_eq!(sys.str_value("tz_offset"), Some("+0530"));
        assert_eq!(
            sys.values["ntp"]["servers"],
            serde_json::json!(["0.pool.ntp.org", "1.pool.ntp.org"])
        );
    }

    #[test]
    fn ntp_block_omitted_when_disabled() {
        let mut form = FormState::defaults("ap-lobby");
        form.system.ntp_enabled = false;
        let doc = serialize(&form, "ap-lobby");
        assert!(doc.system[0].values.get("ntp").is_none());
    }

    #[test]
    fn log_block_rides_its_own_system_record() {
        let mut form = FormState::defaults("ap-lobby");
        form.logs.remote_enabled = true;
        form.logs.host = "logs.example.net".into();
        form.logs.port = "514".into();

        let doc = serialize(&form, "ap-lobby");
        assert_eq!(doc.system.len(), 2);
        let logs = &doc.system[1].values["logs"];
        assert_eq!(logs["remote_enabled"], "1");
        assert_eq!(logs["host"], "logs.example.net");
        assert_eq!(logs["size"], "64k");
        assert_eq!(logs["proto"], "udp");
    }

    #[test]
    fn lan_interface_emits_no_derived_sections() {
        let form = FormState::defaults("ap-lobby");
        let doc = serialize(&form, "ap-lobby");
        assert_eq!(doc.wireless.len(), 1);
        assert!(doc.network.is_empty());
        assert!(doc.firewall.is_empty());
        assert!(doc.chilli.is_empty());
        assert_eq!(doc.wireless[0].str_value("network"), Some("lan"));
    }

    #[test]
    fn personal_record_has_no_foreign_mode_keys() {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces[0].ssid = "office".into();
        form.interfaces[0].auth = AuthSettings::Personal {
            encryption: "psk2".into(),
            key: "hunter22".into(),
        };

        let doc = serialize(&form, "ap-lobby");
        let wifi = &doc.wireless[0];
        assert_eq!(wifi.str_value("encryption"), Some("psk2"));
        assert_eq!(wifi.str_value("key"), Some("hunter22"));
        for foreign in [
            "ieee8021x",
            "auth_server",
            "auth_port",
            "auth_secret",
            "maxassoc",
        ] {
            assert!(
                wifi.values.get(foreign).is_none(),
                "personal record leaked {foreign}"
            );
        }
    }

    #[test]
    fn enterprise_record_is_8021x_and_nothing_else() {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces[0].auth = AuthSettings::Enterprise {
            server: "10.0.0.9".into(),
            port: "1812".into(),
            secret: "s3cret".into(),
        };

        let doc = serialize(&form, "ap-lobby");
        let wifi = &doc.wireless[0];
        assert_eq!(wifi.str_value("encryption"), Some("wpa2"));
        assert_eq!(wifi.str_value("ieee8021x"), Some("1"));
        assert_eq!(wifi.str_value("auth_server"), Some("10.0.0.9"));
        assert!(wifi.values.get("key").is_none(), "enterprise record leaked key");
    }

    #[test]
    fn guest_interface_fans_out_to_network_and_firewall() {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces.push(WirelessInterface {
            id: "ap1_2b3c".into(),
            radio: "radio1".into(),
            ssid: "visitors".into(),
            placement: PlacementMode::Guest,
            auth: AuthSettings::Personal {
                encryption: "psk2".into(),
                key: "guestpass".into(),
            },
        });

        let doc = serialize(&form, "ap-lobby");

        // Interface index 1 keys every derived section name.
        assert_eq!(doc.network.len(), 1);
        assert_eq!(doc.network[0].section, "guest1");
        assert_eq!(doc.network[0].str_value("type"), Some("bridge"));

        assert_eq!(doc.firewall.len(), 2);
        let zone = &doc.firewall[0];
        assert_eq!(zone.section, "guest1_zone");
        assert_eq!(zone.section_type.as_deref(), Some("zone"));
        assert_eq!(zone.str_value("masq"), Some("1"));
        assert_eq!(zone.str_value("input"), Some("REJECT"));
        assert_eq!(zone.str_value("forward"), Some("REJECT"));
        assert_eq!(zone.str_value("output"), Some("ACCEPT"));

        let forwarding = &doc.firewall[1];
        assert_eq!(forwarding.section, "guest1_to_wan");
        assert_eq!(forwarding.str_value("src"), Some("guest1"));
        assert_eq!(forwarding.str_value("dest"), Some("wan"));

        assert!(doc.chilli.is_empty());
    }

    #[test]
    fn corp_zone_does_not_masquerade() {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces[0].placement = PlacementMode::Corp;
        let doc = serialize(&form, "ap-lobby");
        assert_eq!(doc.firewall[0].section, "corp0_zone");
        assert_eq!(doc.firewall[0].str_value("masq"), Some("0"));
    }

    #[test]
    fn hotspot_interface_adds_chilli_record() {
        let doc = serialize(&hotspot_form(), "ap-lobby");

        let wifi = &doc.wireless[0];
        assert_eq!(wifi.str_value("encryption"), Some("none"));
        assert_eq!(wifi.str_value("maxassoc"), Some("64"));
        assert!(wifi.values.get("key").is_none());

        // Hotspot network is unbridged and its zone accepts inbound.
        assert_eq!(doc.network[0].section, "hs0");
        assert!(doc.network[0].values.get("type").is_none());
        assert_eq!(doc.firewall[0].str_value("input"), Some("ACCEPT"));
        assert_eq!(doc.firewall[0].str_value("masq"), Some("1"));

        assert_eq!(doc.chilli.len(), 1);
        let chilli = &doc.chilli[0];
        assert_eq!(chilli.section, "chilli0");
        assert_eq!(chilli.str_value("network"), Some("hs0"));
        assert_eq!(
            chilli.str_value("uamserver"),
            Some("https://portal.example.net/uam")
        );
        assert_eq!(chilli.str_value("radiusserver1"), Some("10.0.0.5"));
        // Empty NAS id falls back to {device}-{network}.
        assert_eq!(chilli.str_value("nasid"), Some("ap-lobby-hs0"));
    }

    #[test]
    fn empty_ssid_gets_a_section_derived_fallback() {
        let mut form = FormState::defaults("ap-lobby");
        form.interfaces[0].id = "ap0_1a2b".into();
        let doc = serialize(&form, "ap-lobby");
        assert_eq!(doc.wireless[0].str_value("ssid"), Some("ssid_ap0_1a2b"));
    }

    #[test]
    fn document_serializes_to_plain_json_sections() {
        let doc = serialize(&hotspot_form(), "ap-lobby");
        let value: Value = serde_json::to_value(&doc).unwrap();
        for section in ["system", "wireless", "network", "firewall", "chilli"] {
            assert!(value[section].is_array(), "missing section {section}");
        }
        assert_eq!(value["wireless"][0]["config"], "wireless");
        assert_eq!(value["wireless"][0]["type"], "wifi-iface");
        assert!(
            value["system"][0].get("type").is_none(),
            "system records carry no type key"
        );
    }
}
