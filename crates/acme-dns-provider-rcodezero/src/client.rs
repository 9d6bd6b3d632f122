//! HTTP transport for the RcodeZero ACME API
//!
//! [`RrsetApi`] is the seam between the reconciliation logic and the
//! network. [`RcodeZeroClient`] implements it with reqwest; tests implement
//! it in memory.
//!
//! ## API Calls
//!
//! ```http
//! GET   /api/v1/acme/zones/{zone}/rrsets?page=1&page_size=100
//! PATCH /api/v1/acme/zones/{zone}/rrsets
//! Authorization: Bearer <token>
//! Accept: application/json
//! ```

use crate::types::{ApiResponse, RrsetChange, RrsetPage};
use acme_dns_core::names::trim_zone;
use acme_dns_core::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Public RcodeZero endpoint
pub const DEFAULT_BASE_URL: &str = "https://my.rcodezero.at";

/// Default HTTP timeout for API requests (10 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend operations the reconciler needs
///
/// Implementations must not retry; every failure is returned as-is.
#[async_trait]
pub trait RrsetApi: Send + Sync {
    /// Fetch one page of the zone's RRsets (pages are 1-indexed)
    async fn get_rrsets(&self, zone: &str, page: u32, page_size: u32) -> Result<RrsetPage>;

    /// Submit RRset mutations
    ///
    /// An envelope whose status is not "ok" is returned as
    /// [`Error::ApiStatus`].
    async fn patch_rrsets(&self, zone: &str, changes: &[RrsetChange]) -> Result<ApiResponse>;
}

/// reqwest-based client for the ACME RRset endpoints
pub struct RcodeZeroClient {
    /// ⚠️ NEVER log this value
    api_token: String,
    base_url: Url,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for RcodeZeroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RcodeZeroClient")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl RcodeZeroClient {
    /// Create a new client
    ///
    /// # Parameters
    ///
    /// - `api_token`: API token with ACME permissions
    /// - `base_url`: Endpoint override (defaults to [`DEFAULT_BASE_URL`])
    /// - `timeout`: Per-request timeout
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the token is empty or the base URL cannot be used.
    pub fn new(api_token: impl Into<String>, base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::config("RcodeZero API token is required"));
        }

        let base_url = base_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL must be an http(s) URL: {}",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            base_url,
            client,
        })
    }

    /// The endpoint this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/v1/acme/zones/{zone}/rrsets`
    fn rrsets_url(&self, zone: &str) -> Result<Url> {
        let zone = trim_zone(zone);
        if zone.is_empty() {
            return Err(Error::invalid_input("empty zone"));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("Base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v1", "acme", "zones", zone, "rrsets"]);
        Ok(url)
    }

    /// Send an authenticated request and decode its JSON body
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            // Error payloads are not documented; pass the body through as-is
            return Err(Error::http(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::cancelled(format!("HTTP request timed out: {}", e))
    } else {
        Error::network(format!("HTTP request failed: {}", e))
    }
}

#[async_trait]
impl RrsetApi for RcodeZeroClient {
    async fn get_rrsets(&self, zone: &str, page: u32, page_size: u32) -> Result<RrsetPage> {
        let url = self.rrsets_url(zone)?;

        let mut query: Vec<(&str, u32)> = Vec::with_capacity(2);
        if page > 0 {
            query.push(("page", page));
        }
        if page_size > 0 {
            query.push(("page_size", page_size));
        }

        tracing::debug!("Fetching RRsets for zone {} (page {})", trim_zone(zone), page);
        self.execute(self.client.get(url).query(&query)).await
    }

    async fn patch_rrsets(&self, zone: &str, changes: &[RrsetChange]) -> Result<ApiResponse> {
        let url = self.rrsets_url(zone)?;
        let body = serde_json::to_vec(changes)?;

        let response: ApiResponse = self
            .execute(
                self.client
                    .patch(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body),
            )
            .await?;

        if !response.is_ok() {
            return Err(Error::api_status(response.status, response.message));
        }
        Ok(response)
    }
}
