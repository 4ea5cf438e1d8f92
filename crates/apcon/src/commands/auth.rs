//! Login / logout / password handlers.
//!
//! Login persists the session (token + user object); every other
//! backend-bound command resumes it. Logout only clears the persisted
//! state -- the backend has no logout endpoint.

use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};

use apcon_config::{ConfigError, StoredSession, clear_session, save_session};
use apcon_core::Console;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config;
use crate::error::CliError;

use super::util::prompt_err;

pub async fn login(console: &Console, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // Username: flag > profile/env > prompt.
    let username = match args
        .username
        .or_else(|| profile.and_then(apcon_config::resolve_username))
    {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err)?,
    };

    // Password: configured chain (env > keyring > plaintext) > prompt.
    let password = match profile.map(|p| apcon_config::resolve_password(p, &profile_name)) {
        Some(Ok(pw)) => pw,
        Some(Err(ConfigError::NoCredentials { .. })) | None => {
            SecretString::from(rpassword::prompt_password("Password: ").map_err(prompt_err)?)
        }
        Some(Err(e)) => return Err(e.into()),
    };

    if username.is_empty() {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: "username cannot be empty".into(),
        });
    }

    let session = console.login(&username, &password).await?;
    save_session(&StoredSession {
        token: session.token.expose_secret().to_owned(),
        user: session.user,
    })?;

    if !global.quiet {
        eprintln!("✓ Logged in as {username}");
    }
    Ok(())
}

pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    clear_session()?;
    if !global.quiet {
        eprintln!("✓ Session cleared");
    }
    Ok(())
}

pub async fn change_password(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let old = SecretString::from(
        rpassword::prompt_password("Current password: ").map_err(prompt_err)?,
    );
    let new = SecretString::from(rpassword::prompt_password("New password: ").map_err(prompt_err)?);
    let repeat =
        SecretString::from(rpassword::prompt_password("Repeat new password: ").map_err(prompt_err)?);

    if new.expose_secret().is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "new password cannot be empty".into(),
        });
    }
    if new.expose_secret() != repeat.expose_secret() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "passwords do not match".into(),
        });
    }

    console.change_password(&old, &new).await?;
    if !global.quiet {
        eprintln!("✓ Password changed");
    }
    Ok(())
}
