// apcon-api: Async Rust client for the apcon provisioning backend.

pub mod auth;
pub mod client;
pub mod configs;
pub mod devices;
pub mod error;
pub mod models;
pub mod portal;
pub mod transport;

pub use client::ConsoleClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
