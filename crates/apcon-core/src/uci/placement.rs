// ── Network placement modes ──
//
// The prefix table below is used by both encode and decode; it is the
// only place that knows which network-name prefix belongs to which mode.

use serde::{Deserialize, Serialize};

/// Where an interface's traffic lands: the primary LAN bridge, an
/// isolated guest network, a captive-portal hotspot network, or a
/// corporate (enterprise) network.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlacementMode {
    Lan,
    Guest,
    Hotspot,
    Corp,
}

/// Name prefixes for derived networks, paired with their modes.
const PREFIXES: &[(PlacementMode, &str)] = &[
    (PlacementMode::Guest, "guest"),
    (PlacementMode::Hotspot, "hs"),
    (PlacementMode::Corp, "corp"),
];

impl PlacementMode {
    /// The network name an interface at `index` maps to. LAN interfaces
    /// all share the primary `lan` bridge; derived modes get a
    /// deterministic `{prefix}{index}` name.
    pub fn network_name(self, index: usize) -> String {
        match self.prefix() {
            Some(prefix) => format!("{prefix}{index}"),
            None => "lan".into(),
        }
    }

    /// Classify a network name by its literal prefix. Anything that
    /// matches no derived prefix is the primary LAN.
    pub fn from_network_name(name: &str) -> Self {
        PREFIXES
            .iter()
            .find(|(_, prefix)| name.starts_with(prefix))
            .map_or(Self::Lan, |(mode, _)| *mode)
    }

    fn prefix(self) -> Option<&'static str> {
        PREFIXES
            .iter()
            .find(|(mode, _)| *mode == self)
            .map(|(_, prefix)| *prefix)
    }

    /// Derived modes need their own network, firewall zone, and
    /// forwarding records; LAN rides the existing bridge.
    pub fn is_derived(self) -> bool {
        self != Self::Lan
    }

    /// Guest and hotspot zones masquerade (NAT) outbound traffic.
    pub fn masquerades(self) -> bool {
        matches!(self, Self::Guest | Self::Hotspot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_prefix_table() {
        for (mode, index) in [
            (PlacementMode::Lan, 0),
            (PlacementMode::Guest, 1),
            (PlacementMode::Hotspot, 2),
            (PlacementMode::Corp, 7),
        ] {
            let name = mode.network_name(index);
            assert_eq!(
                PlacementMode::from_network_name(&name),
                mode,
                "prefix table must recognize its own output ({name})"
            );
        }
    }

    #[test]
    fn unknown_names_classify_as_lan() {
        assert_eq!(PlacementMode::from_network_name("lan"), PlacementMode::Lan);
        assert_eq!(PlacementMode::from_network_name("wan"), PlacementMode::Lan);
        assert_eq!(PlacementMode::from_network_name(""), PlacementMode::Lan);
    }

    #[test]
    fn derived_names_are_indexed() {
        assert_eq!(PlacementMode::Guest.network_name(2), "guest2");
        assert_eq!(PlacementMode::Hotspot.network_name(0), "hs0");
        assert_eq!(PlacementMode::Corp.network_name(3), "corp3");
        assert_eq!(PlacementMode::Lan.network_name(5), "lan");
    }
}
