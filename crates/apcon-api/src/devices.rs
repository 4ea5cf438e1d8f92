// Device inventory endpoints
//
// Devices are addressed by their unique name in CRUD paths; configuration
// endpoints (configs.rs) key on the MAC address instead.

use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::{DeviceRecord, NewDevice};

impl ConsoleClient {
    /// List all managed devices.
    ///
    /// `GET /api/device/get`
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, Error> {
        let url = self.endpoint(&["api", "device", "get"]);
        debug!("listing devices");
        self.get(url).await
    }

    /// Fetch a single device by name.
    ///
    /// `GET /api/device/{name}/get`
    pub async fn get_device(&self, name: &str) -> Result<DeviceRecord, Error> {
        let url = self.endpoint(&["api", "device", name, "get"]);
        debug!(name, "fetching device");
        self.get(url).await
    }

    /// Register a new device.
    ///
    /// `POST /api/device/create`
    pub async fn create_device(&self, device: &NewDevice) -> Result<(), Error> {
        let url = self.endpoint(&["api", "device", "create"]);
        debug!(name = %device.name, "creating device");
        let _: serde_json::Value = self.post(url, device).await?;
        Ok(())
    }

    /// Remove a device by name.
    ///
    /// `DELETE /api/device/{name}/delete`
    pub async fn delete_device(&self, name: &str) -> Result<(), Error> {
        let url = self.endpoint(&["api", "device", name, "delete"]);
        debug!(name, "deleting device");
        let _: serde_json::Value = self.delete(url).await?;
        Ok(())
    }
}
