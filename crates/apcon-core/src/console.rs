// ── Console service ──
//
// The single entry point consumers use: wraps the raw API client, maps
// transport errors into `CoreError`, and converts wire types into domain
// types. Calls are sequential and fire-once -- no caching, no retries, no
// in-flight deduplication; a save fully replaces the stored document
// (last write wins).

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};

use apcon_api::models::{NewDevice, PortalProfile};
use apcon_api::{ConsoleClient, TransportConfig};

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::model::device::{Device, MacAddress};
use crate::model::document::ConfigDocument;

/// A logged-in operator session: the token that gets persisted and the
/// opaque user object the backend returned alongside it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: Value,
}

/// High-level handle to one provisioning backend.
pub struct Console {
    client: ConsoleClient,
}

impl Console {
    /// Build a console from its config. If the config carries a persisted
    /// session token, the client resumes that session.
    pub fn new(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
            cookie_jar: None,
        };
        let client = match &config.session_token {
            Some(token) => ConsoleClient::with_session_token(
                config.url.clone(),
                &transport,
                token.expose_secret(),
            )?,
            None => ConsoleClient::new(config.url.clone(), &transport)?,
        };
        Ok(Self { client })
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Authenticate and return the session to persist.
    ///
    /// The token comes from the response body when the backend echoes it,
    /// else from the session cookie the login set.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Session, CoreError> {
        let resp = self.client.login(username, password).await?;
        let token = resp
            .token
            .or_else(|| self.client.session_cookie())
            .ok_or_else(|| CoreError::AuthenticationFailed {
                message: "backend returned no session token".into(),
            })?;
        info!(username, "logged in");
        Ok(Session {
            token: SecretString::from(token),
            user: resp.user.unwrap_or(Value::Null),
        })
    }

    /// Change the current operator's password.
    pub async fn change_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), CoreError> {
        self.client.change_password(old_password, new_password).await?;
        Ok(())
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        let records = self.client.list_devices().await?;
        Ok(records.into_iter().map(Device::from).collect())
    }

    pub async fn get_device(&self, name: &str) -> Result<Device, CoreError> {
        match self.client.get_device(name).await {
            Ok(record) => Ok(record.into()),
            Err(e) if e.is_not_found() => Err(CoreError::DeviceNotFound {
                identifier: name.to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create_device(&self, device: &NewDevice) -> Result<(), CoreError> {
        if device.name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "device name cannot be empty".into(),
            });
        }
        if device.mac_address.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "device MAC address cannot be empty".into(),
            });
        }
        self.client.create_device(device).await?;
        info!(name = %device.name, "device created");
        Ok(())
    }

    pub async fn delete_device(&self, name: &str) -> Result<(), CoreError> {
        match self.client.delete_device(name).await {
            Ok(()) => {
                info!(name, "device deleted");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(CoreError::DeviceNotFound {
                identifier: name.to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    // ── Portal profiles ──────────────────────────────────────────────

    pub async fn portal_profiles(&self) -> Result<Vec<PortalProfile>, CoreError> {
        Ok(self.client.portal_profiles().await?)
    }

    // ── Configuration documents ──────────────────────────────────────

    /// Fetch the latest stored document for a device. Absent (404 or JSON
    /// null) means the device was never configured -- the mapper turns
    /// that into defaults.
    pub async fn latest_config(&self, mac: &MacAddress) -> Result<Option<Value>, CoreError> {
        match self.client.latest_config(mac.as_str()).await {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => {
                debug!(mac = %mac, "no stored configuration");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every stored document for a device, as the backend returns them.
    pub async fn config_history(&self, mac: &MacAddress) -> Result<Vec<Value>, CoreError> {
        Ok(self.client.all_configs(mac.as_str()).await?)
    }

    /// Submit a document, fully replacing the backend's stored copy.
    pub async fn save_config(
        &self,
        mac: &MacAddress,
        document: &ConfigDocument,
    ) -> Result<(), CoreError> {
        self.client.save_config(mac.as_str(), document).await?;
        info!(mac = %mac, "configuration saved");
        Ok(())
    }

    /// Submit a raw JSON document (e.g. from `provision push --from-file`).
    pub async fn save_raw_config(&self, mac: &MacAddress, document: &Value) -> Result<(), CoreError> {
        self.client.save_config(mac.as_str(), document).await?;
        info!(mac = %mac, "configuration saved");
        Ok(())
    }
}
