// ── API-to-domain type conversions ──
//
// Bridges raw `apcon_api` wire types into canonical domain types:
// normalizes the MAC, parses the loose status string, and drops the
// inconsistently-populated fields of older backend payloads.

use apcon_api::models::DeviceRecord;

use crate::model::device::{Device, DeviceStatus, MacAddress};

/// Parse the backend's free-form status string.
fn parse_status(raw: Option<&str>) -> DeviceStatus {
    match raw.map(str::to_lowercase).as_deref() {
        Some("online" | "up" | "connected") => DeviceStatus::Online,
        Some("offline" | "down" | "disconnected") => DeviceStatus::Offline,
        _ => DeviceStatus::Unknown,
    }
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        let status = parse_status(record.status.as_deref());
        Device {
            name: record.name,
            mac: MacAddress::new(&record.mac_address),
            description: record.description.filter(|s| !s.is_empty()),
            location: record.location.filter(|s| !s.is_empty()),
            status,
            uptime_secs: record.uptime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_converts_with_normalized_mac_and_status() {
        let record = DeviceRecord {
            name: "ap-lobby".into(),
            mac_address: "AA:BB:CC:DD:EE:FF".into(),
            description: Some("lobby ceiling".into()),
            location: Some(String::new()),
            status: Some("Online".into()),
            uptime: Some(3600),
        };
        let device = Device::from(record);
        assert_eq!(device.mac.as_str(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(device.status, DeviceStatus::Online);
        assert_eq!(device.description.as_deref(), Some("lobby ceiling"));
        assert!(device.location.is_none(), "empty strings drop to None");
    }

    #[test]
    fn missing_status_is_unknown() {
        let record = DeviceRecord {
            name: "ap".into(),
            mac_address: "aa:bb:cc:dd:ee:ff".into(),
            description: None,
            location: None,
            status: None,
            uptime: None,
        };
        assert_eq!(Device::from(record).status, DeviceStatus::Unknown);
    }
}
