// apcon-core: Domain layer between apcon-api and the CLI.
//
// Owns the configuration document mapper (uci module) and the Console
// service that wraps the raw API client.

pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod model;
pub mod uci;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::{Console, Session};
pub use error::CoreError;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AuthMode, AuthSettings, ConfigDocument, ConfigRecord, Device, DeviceStatus, FlatInterface,
    FormState, LogSettings, MacAddress, SystemSettings, WirelessInterface,
};
pub use uci::{PlacementMode, normalize, serialize};

// Wire types the CLI needs verbatim.
pub use apcon_api::models::{NewDevice, PortalProfile};
