// ── Persisted operator session ──
//
// The original console kept the logged-in user and session token in
// browser local storage under fixed keys; the CLI equivalent is a single
// JSON file in the platform data directory, written on login and removed
// on logout. The file holds exactly those two keys.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The persisted session: token + the opaque user object from login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: serde_json::Value,
}

/// Resolve the session file path.
pub fn session_path() -> PathBuf {
    ProjectDirs::from("io", "apcon", "apcon").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".local");
            p.push("share");
            p.push("apcon");
            p.push("session.json");
            p
        },
        |dirs| dirs.data_dir().join("session.json"),
    )
}

/// Load the persisted session, if any. A missing or unreadable file means
/// no session -- the caller decides whether that's an error.
pub fn load_session() -> Option<StoredSession> {
    let contents = std::fs::read_to_string(session_path()).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Persist a session, creating the data directory if needed.
pub fn save_session(session: &StoredSession) -> Result<(), ConfigError> {
    let path = session_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(session)?;
    std::fs::write(&path, contents)?;
    Ok(())
}

/// Remove the persisted session. Removing a session that doesn't exist is
/// not an error.
pub fn clear_session() -> Result<(), ConfigError> {
    match std::fs::remove_file(session_path()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_json() {
        let session = StoredSession {
            token: "tok123".into(),
            user: serde_json::json!({ "login": "admin", "role": "operator" }),
        };
        let text = serde_json::to_string(&session).unwrap();
        let reloaded: StoredSession = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded.token, "tok123");
        assert_eq!(reloaded.user["role"], "operator");
    }
}
