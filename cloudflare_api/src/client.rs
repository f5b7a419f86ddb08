//! HTTP client for the Cloudflare v4 API.

use std::time::Duration;

use url::Url;

use crate::{
    auth::Credential,
    query::append_pairs,
    request::RequestSpec,
    response::{truncate_body, RawResponse},
    Error,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated transport for the API.
///
/// Sends one attempt of a [`RequestSpec`] with the bearer credential
/// attached and reads the full body. Status interpretation is left to
/// [`crate::envelope`]; retries, admission and timeouts live in the
/// orchestrating client built on top of this one.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    credential: Credential,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(credential: Credential) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, credential)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, credential: Credential) -> Result<Self, Error> {
        Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("cloudflare-rs/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network(e)
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, spec: &RequestSpec) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_api_url, spec.path()).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed for {}: {}", spec.path(), e);
                Error::InvalidUrl(e)
            })?;
        append_pairs(&mut url, spec.query_pairs());
        Ok(url)
    }

    /// Sends a single attempt and reads the whole body as text.
    ///
    /// Only transport failures are errors here; any HTTP status, including
    /// 429 and 5xx, comes back as a [`RawResponse`].
    pub async fn send(&self, spec: &RequestSpec) -> Result<RawResponse, Error> {
        let url = self.get_url(spec)?;
        let method = spec.method().clone();
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .credential
            .authorize(self.http.request(method.clone(), url.clone()));
        if let Some(body) = spec.body() {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, url, e);
            Error::Network(e)
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e)
        })?;
        tracing::debug!(
            "{} {} -> {} | body: {}",
            method,
            url,
            status,
            truncate_body(&body)
        );

        Ok(RawResponse {
            method,
            url,
            status,
            headers,
            body,
        })
    }
}
