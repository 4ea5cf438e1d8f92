// ── Core error types ──
//
// User-facing errors from apcon-core. Consumers never see raw HTTP
// failures directly -- the `From<apcon_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants. The document
// mapper itself has no error type: decode degrades to defaults and encode
// is total.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Entity not found: {entity_type} '{identifier}'")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<apcon_api::Error> for CoreError {
    fn from(err: apcon_api::Error) -> Self {
        match err {
            apcon_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            apcon_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            apcon_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid backend URL: {e}"),
            },
            apcon_api::Error::Tls(message) => CoreError::ConnectionFailed {
                url: "<backend>".into(),
                reason: message,
            },
            apcon_api::Error::Api {
                status,
                message,
                details: _,
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            apcon_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("unexpected backend response: {message}"))
            }
        }
    }
}
