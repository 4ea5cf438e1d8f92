// Operator authentication endpoints
//
// Login establishes the session cookie; there is no logout endpoint --
// ending a session is purely a client-side matter (drop the stored token).

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::{ChangePasswordRequest, LoginRequest, LoginResponse};

impl ConsoleClient {
    /// Authenticate an operator.
    ///
    /// `POST /admin/login` -- on success the backend sets the session
    /// cookie (captured by the jar) and returns the token + user object.
    pub async fn login(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let url = self.endpoint(&["admin", "login"]);
        debug!(login, "logging in");
        let body = LoginRequest {
            login: login.to_owned(),
            password: password.expose_secret().to_owned(),
        };
        self.post(url, &body).await
    }

    /// Change the current operator's password.
    ///
    /// `POST /admin/password`
    pub async fn change_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["admin", "password"]);
        debug!("changing password");
        let body = ChangePasswordRequest {
            old_password: old_password.expose_secret().to_owned(),
            new_password: new_password.expose_secret().to_owned(),
        };
        let _: serde_json::Value = self.post(url, &body).await?;
        Ok(())
    }
}
