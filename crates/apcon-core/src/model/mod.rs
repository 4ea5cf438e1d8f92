// Domain model types.

pub mod device;
pub mod document;
pub mod form;

pub use device::{Device, DeviceStatus, MacAddress};
pub use document::{ConfigDocument, ConfigRecord};
pub use form::{
    AuthMode, AuthSettings, FlatInterface, FormState, LogSettings, SystemSettings,
    WirelessInterface,
};
