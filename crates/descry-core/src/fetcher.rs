//! HTTP transport for the discovery chain.
//!
//! Two clients with distinct redirect policies back every discoverer: a
//! metadata client that follows nothing (so a `303 See Other` is observed
//! rather than silently followed) and a content client capped at three
//! redirects for the follow-up GETs. Both send the same Accept preference
//! list and user agent.

use crate::config::DiscoveryConfig;
use crate::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, LINK, LOCATION};
use reqwest::{Client, Method, redirect::Policy};
use tracing::debug;

/// Response metadata and body as consumed by the discovery chain.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// Final URL after any followed redirects.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Media type with parameters stripped, lowercased, if present.
    pub content_type: Option<String>,
    /// Raw `Location` header value, if present.
    pub location: Option<String>,
    /// Every `Link` header value, in response order.
    pub link_headers: Vec<String>,
    /// Decoded body; empty for HEAD requests.
    pub body: String,
}

impl FetchedResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the response is a `303 See Other`.
    #[must_use]
    pub const fn is_see_other(&self) -> bool {
        self.status == 303
    }
}

/// HTTP client pair used by a discoverer instance.
pub struct Fetcher {
    /// Zero-redirect client for the metadata probe.
    metadata: Client,
    /// Limited-redirect client for content GETs.
    content: Client,
    accept: String,
}

impl Fetcher {
    /// Builds the client pair from a discoverer configuration.
    pub fn new(config: &DiscoveryConfig) -> Result<Self> {
        let metadata = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(Error::Network)?;
        let content = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(3))
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            metadata,
            content,
            accept: config.accept.clone(),
        })
    }

    /// Issues a HEAD request without following redirects.
    ///
    /// This is the metadata probe: link headers, status, and content type
    /// are wanted, the body is not. Redirects are reported, not followed,
    /// so `303` responses stay visible to the caller.
    pub async fn head(&self, url: &str) -> Result<FetchedResponse> {
        debug!(url = %url, "HEAD (no redirects)");
        let response = self
            .metadata
            .request(Method::HEAD, url)
            .header(ACCEPT, &self.accept)
            .send()
            .await?;
        Self::read_response(response, false).await
    }

    /// Issues a GET request, following at most three redirects.
    pub async fn get(&self, url: &str) -> Result<FetchedResponse> {
        debug!(url = %url, "GET (limited redirects)");
        let response = self
            .content
            .get(url)
            .header(ACCEPT, &self.accept)
            .send()
            .await?;
        Self::read_response(response, true).await
    }

    async fn read_response(response: reqwest::Response, want_body: bool) -> Result<FetchedResponse> {
        let url = response.url().to_string();
        let status = response.status().as_u16();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(strip_parameters);

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(std::string::ToString::to_string);

        let link_headers = response
            .headers()
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(std::string::ToString::to_string)
            .collect();

        let body = if want_body {
            response.text().await?
        } else {
            String::new()
        };

        debug!(url = %url, status, content_type = ?content_type, "response read");

        Ok(FetchedResponse {
            url,
            status,
            content_type,
            location,
            link_headers,
            body,
        })
    }
}

/// Strips media-type parameters (`; charset=...`) and lowercases.
fn strip_parameters(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}
