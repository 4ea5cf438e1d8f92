// Wire models for the provisioning backend.
//
// Field names mirror the backend JSON (snake_case except where noted).
// These are transport shapes only -- `apcon-core` converts them into
// domain types.

use serde::{Deserialize, Serialize};

// ── Auth ────────────────────────────────────────────────────────────

/// Body for `POST /admin/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Response from `POST /admin/login`.
///
/// `token` echoes the session cookie value; `user` is an opaque operator
/// object the backend defines (role, display name, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<serde_json::Value>,
}

/// Body for `POST /admin/password`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ── Devices ─────────────────────────────────────────────────────────

/// A managed device as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    pub mac_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Seconds since the device last booted, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}

/// Body for `POST /api/device/create`.
#[derive(Debug, Serialize)]
pub struct NewDevice {
    pub name: String,
    pub mac_address: String,
    pub description: String,
    pub location: String,
}

// ── Portal profiles ─────────────────────────────────────────────────

/// A captive-portal profile, used to prefill hotspot interface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uam_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uam_allowed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nas_id: Option<String>,
}
