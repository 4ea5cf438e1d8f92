// Console connection configuration.
//
// Built by apcon-config (profiles + session store) or directly from CLI
// flags, then handed to `Console::new`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification policy for the backend connection.
#[derive(Debug, Clone)]
pub enum TlsVerification {
    /// Use the system certificate store.
    SystemDefaults,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed backends).
    DangerAcceptInvalid,
}

/// Everything needed to talk to a provisioning backend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend root URL (e.g. `https://console.example.net`).
    pub url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Persisted session token from a previous login, replayed as the
    /// session cookie. `None` means the console starts unauthenticated.
    pub session_token: Option<SecretString>,
}

impl From<&TlsVerification> for apcon_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => apcon_api::TlsMode::System,
            TlsVerification::CustomCa(path) => apcon_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => apcon_api::TlsMode::DangerAcceptInvalid,
        }
    }
}
