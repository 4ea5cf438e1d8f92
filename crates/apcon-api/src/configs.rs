// Device configuration endpoints
//
// Documents are fetched and submitted as untyped JSON: the stored shape
// varies (raw UCI-style sections or a previously normalized form), and
// interpretation belongs to the mapper in `apcon-core`, not the transport.

use serde_json::Value;
use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;

impl ConsoleClient {
    /// Submit a configuration document for a device, replacing whatever
    /// the backend currently holds for it.
    ///
    /// `POST /api/config/{mac}/create`
    pub async fn save_config(
        &self,
        mac: &str,
        document: &(impl serde::Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.endpoint(&["api", "config", mac, "create"]);
        debug!(mac, "saving configuration");
        let _: Value = self.post(url, document).await?;
        Ok(())
    }

    /// Fetch the most recently stored configuration for a device.
    ///
    /// `GET /api/config/{mac}/latest`
    pub async fn latest_config(&self, mac: &str) -> Result<Value, Error> {
        let url = self.endpoint(&["api", "config", mac, "latest"]);
        debug!(mac, "fetching latest configuration");
        self.get(url).await
    }

    /// List every stored configuration for a device, newest first.
    ///
    /// `GET /api/config/{mac}/all`
    pub async fn all_configs(&self, mac: &str) -> Result<Vec<Value>, Error> {
        let url = self.endpoint(&["api", "config", mac, "all"]);
        debug!(mac, "fetching configuration history");
        self.get(url).await
    }
}
