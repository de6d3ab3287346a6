//! Authenticated HTTP transport for the solutions API
//!
//! Every request carries the user's API token as a bearer credential. The client
//! does not retry and does not interpret status codes; callers decide what a
//! response means.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Timeout for a single request (payload lookup or file fetch)
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one API token
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    token: String,
}

impl ApiClient {
    /// Create a client that authenticates with `token`
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Parse `url` as an absolute request URL
    pub fn request_url(&self, url: &str) -> Result<Url> {
        Url::parse(url).map_err(Error::InvalidUrl)
    }

    /// Issue a GET request for `url`
    ///
    /// Only transport failures are errors; any HTTP status is returned as-is.
    pub async fn get(&self, url: Url) -> Result<reqwest::Response> {
        let mut request = self.client.get(url.clone());
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        tracing::trace!(url = %url, "GET");
        let response = request.send().await?;
        tracing::trace!(url = %url, status = %response.status(), "response received");
        Ok(response)
    }
}
