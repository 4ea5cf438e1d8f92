// ── Configuration document mapper ──
//
// Bidirectional transform between normalized form state and the nested,
// section-oriented document the backend consumes:
//
//   decode: `normalize(input, device_name)` accepts an absent document, a
//   previously normalized document, or a raw backend document, and
//   reconstructs form state. It never fails outward -- malformed input
//   degrades to device-name defaults.
//
//   encode: `serialize(form, device_name)` is deterministic and total.
//
// The placement prefix table is the single source of truth for the
// name <-> mode mapping; encode must produce prefixes decode recognizes
// or a saved-and-reloaded document silently reclassifies interfaces.

pub mod decode;
pub mod encode;
pub mod placement;
pub mod timezone;

pub use decode::normalize;
pub use encode::serialize;
pub use placement::PlacementMode;
pub use timezone::{TIMEZONES, offset_for};
