// ── Static timezone table ──
//
// The tz_offset field of the system section is derived, never edited:
// it is looked up here from the IANA name. Offsets are standard-time
// values; the provisioned device handles DST itself.

/// IANA timezone name → UTC offset string.
pub const TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "+0000"),
    ("Europe/London", "+0000"),
    ("Europe/Lisbon", "+0000"),
    ("Europe/Paris", "+0100"),
    ("Europe/Berlin", "+0100"),
    ("Europe/Madrid", "+0100"),
    ("Europe/Rome", "+0100"),
    ("Europe/Amsterdam", "+0100"),
    ("Europe/Warsaw", "+0100"),
    ("Europe/Athens", "+0200"),
    ("Europe/Helsinki", "+0200"),
    ("Europe/Kyiv", "+0200"),
    ("Africa/Cairo", "+0200"),
    ("Africa/Johannesburg", "+0200"),
    ("Europe/Moscow", "+0300"),
    ("Asia/Dubai", "+0400"),
    ("Asia/Karachi", "+0500"),
    ("Asia/Kolkata", "+0530"),
    ("Asia/Dhaka", "+0600"),
    ("Asia/Bangkok", "+0700"),
    ("Asia/Shanghai", "+0800"),
    ("Asia/Singapore", "+0800"),
    ("Asia/Hong_Kong", "+0800"),
    ("Asia/Tokyo", "+0900"),
    ("Asia/Seoul", "+0900"),
    ("Australia/Sydney", "+1000"),
    ("Pacific/Auckland", "+1200"),
    ("America/Sao_Paulo", "-0300"),
    ("America/Argentina/Buenos_Aires", "-0300"),
    ("America/New_York", "-0500"),
    ("America/Chicago", "-0600"),
    ("America/Denver", "-0700"),
    ("America/Phoenix", "-0700"),
    ("America/Los_Angeles", "-0800"),
    ("America/Anchorage", "-0900"),
    ("Pacific/Honolulu", "-1000"),
];

/// Look up the UTC offset for an IANA timezone name.
pub fn offset_for(name: &str) -> Option<&'static str> {
    TIMEZONES
        .iter()
        .find(|(tz, _)| *tz == name)
        .map(|(_, offset)| *offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_zones_resolve() {
        assert_eq!(offset_for("UTC"), Some("+0000"));
        assert_eq!(offset_for("Asia/Kolkata"), Some("+0530"));
        assert_eq!(offset_for("America/New_York"), Some("-0500"));
    }

    #[test]
    fn unknown_zones_yield_none() {
        assert_eq!(offset_for("Mars/Olympus_Mons"), None);
        assert_eq!(offset_for(""), None);
    }
}
