// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and the backend's error
// contract. Endpoint groups (auth, devices, configs, portal) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Name of the session cookie the backend issues on login. The login
/// response body echoes its value as `token`, which is what gets persisted
/// and replayed across processes.
pub const SESSION_COOKIE: &str = "session";

/// Raw HTTP client for the provisioning backend.
///
/// The backend speaks plain JSON with no envelope: 2xx bodies deserialize
/// directly, and every non-2xx response is turned into a structured
/// [`Error::Api`] carrying status, message, and the raw body.
pub struct ConsoleClient {
    http: reqwest::Client,
    base_url: Url,
    /// Cookie jar reference, kept for extracting the session cookie after login.
    cookie_jar: Option<Arc<Jar>>,
}

impl ConsoleClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth requires cookies). `base_url` is the
    /// backend root, e.g. `https://console.example.net`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client that resumes a persisted session.
    ///
    /// Seeds the cookie jar with the stored session token so requests made
    /// by a fresh process carry the same credentials as the login that
    /// produced it.
    pub fn with_session_token(
        base_url: Url,
        transport: &TransportConfig,
        token: &str,
    ) -> Result<Self, Error> {
        let jar = Arc::new(Jar::default());
        jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}"), &base_url);
        let mut config = transport.clone();
        config.cookie_jar = Some(Arc::clone(&jar));
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar: Some(jar),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Extract the current session cookie value, if one is in the jar.
    pub fn session_cookie(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        let header = cookies.to_str().ok()?;
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| value.to_owned())
        })
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL from path segments, percent-encoding each one.
    ///
    /// Device names and MAC addresses land in the path, so segment-level
    /// encoding matters.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .expect("backend base URL cannot be opaque");
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the response per the backend contract.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        self.parse_response(resp).await
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_response(resp).await
    }

    /// Send a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_response(resp).await
    }

    /// Decode a response: 2xx bodies deserialize directly (empty body reads
    /// as JSON `null`), non-2xx becomes a structured error with the body's
    /// `message` field when present, else the HTTP status text.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let details: Option<serde_json::Value> = if body.is_empty() {
                None
            } else {
                Some(
                    serde_json::from_str(&body)
                        .unwrap_or_else(|_| serde_json::Value::String(body.clone())),
                )
            };
            let message = details
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(String::from)
                .or_else(|| status.canonical_reason().map(String::from))
                .unwrap_or_else(|| format!("HTTP {status}"));

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(Error::Authentication { message });
            }
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                details,
            });
        }

        let payload = if body.is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(payload).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
