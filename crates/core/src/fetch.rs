//! Page fetching over HTTP.
//!
//! This module retrieves a page and reports the URL it was finally served
//! from. Redirects are followed, and the final location (not the requested
//! URL) is what relative icon references must be resolved against.

use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

use crate::{IconicError, Result};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Iconic/1.0)".to_string() }
    }
}

impl FetchConfig {
    /// Builds a reqwest client honouring this configuration.
    pub fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(IconicError::HttpError)
    }

    pub(crate) fn map_send_error(&self, err: reqwest::Error) -> IconicError {
        if err.is_timeout() { IconicError::Timeout { timeout: self.timeout } } else { IconicError::HttpError(err) }
    }
}

/// A successfully retrieved page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL the page was served from after following redirects.
    pub final_url: Url,
    /// HTTP status code of the final response.
    pub status: u16,
    /// Decoded response body.
    pub body: String,
}

/// Fetches a page.
///
/// This function performs an HTTP GET request, follows redirects and
/// returns the body together with the final URL.
///
/// # Errors
///
/// - [`IconicError::InvalidUrl`] if `url` is not an absolute http(s) URL
/// - [`IconicError::Timeout`] if the request exceeds the configured timeout
/// - [`IconicError::HttpStatus`] if the final response is not a success
/// - [`IconicError::HttpError`] for any other network failure
pub async fn fetch_page(url: &str, config: &FetchConfig) -> Result<FetchedPage> {
    let parsed_url = Url::parse(url).map_err(|e| IconicError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(IconicError::InvalidUrl(
            "URL must use the http:// or https:// scheme".to_string(),
        ));
    }

    let client = config.client()?;

    let response = client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| config.map_send_error(e))?;

    let response = check_status(response)?;
    let final_url = response.url().clone();
    let status = response.status().as_u16();

    tracing::debug!(requested = url, final_url = %final_url, status, "fetched page");

    let body = response.text().await.map_err(|e| config.map_send_error(e))?;

    Ok(FetchedPage { final_url, status, body })
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(IconicError::HttpStatus { status: status.to_string() })
    }
}
