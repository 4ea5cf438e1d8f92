// Captive-portal profile endpoint

use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::PortalProfile;

impl ConsoleClient {
    /// List the captive-portal profiles configured on the backend.
    ///
    /// `GET /api/portal/profiles`
    pub async fn portal_profiles(&self) -> Result<Vec<PortalProfile>, Error> {
        let url = self.endpoint(&["api", "portal", "profiles"]);
        debug!("listing portal profiles");
        self.get(url).await
    }
}
