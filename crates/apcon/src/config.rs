//! CLI configuration — thin wrapper around `apcon_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --insecure, ...).

use std::time::Duration;

use secrecy::SecretString;

use apcon_core::{ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use apcon_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, load_session, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ConsoleConfig` from the config file, profile, and CLI
/// overrides. When `with_session` is set, a persisted session token is
/// attached so the console resumes the logged-in session.
pub fn build_console_config(
    global: &GlobalOpts,
    with_session: bool,
) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut console_config = match cfg.profiles.get(&profile_name) {
        Some(profile) => resolve_profile(profile, global)?,
        None => {
            // No profile -- try to build from CLI flags / env vars alone.
            let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
                field: "server".into(),
                reason: format!("invalid URL: {url_str}"),
            })?;
            ConsoleConfig {
                url,
                tls: tls_from_flags(global, None),
                timeout: Duration::from_secs(global.timeout),
                session_token: None,
            }
        }
    };

    console_config.session_token = if with_session {
        load_session().map(|s| SecretString::from(s.token))
    } else {
        None
    };

    Ok(console_config)
}

/// Translate a `Profile` + global flags into a `ConsoleConfig`.
///
/// CLI flag overrides take priority over profile values.
fn resolve_profile(profile: &Profile, global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    // 1. Backend URL (flag > env > profile)
    let url_str = global.server.as_deref().unwrap_or(&profile.server);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. TLS verification
    let tls = tls_from_flags(global, Some(profile));

    // 3. Timeout
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(global.timeout));

    Ok(ConsoleConfig {
        url,
        tls,
        timeout,
        session_token: None,
    })
}

fn tls_from_flags(global: &GlobalOpts, profile: Option<&Profile>) -> TlsVerification {
    let profile_insecure = profile.and_then(|p| p.insecure).unwrap_or(false);
    if global.insecure || profile_insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca_path) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsVerification::CustomCa(ca_path)
    } else {
        TlsVerification::SystemDefaults
    }
}
