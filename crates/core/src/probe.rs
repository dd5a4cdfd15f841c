//! Existence checks for the `/favicon.ico` fallback.
//!
//! In probe mode the fallback is only appended once something confirms the
//! file is there. [`FaviconProbe`] is that seam; [`HttpProbe`] asks the server,
//! [`StaticProbe`] answers from a fixed value.

use std::future::Future;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::{FetchConfig, Result};

/// Decides whether a fallback icon location exists.
///
/// Probes never fail: anything that prevents a positive answer counts as
/// "not present".
pub trait FaviconProbe {
    /// Returns `true` if `url` is confirmed present.
    fn exists(&self, url: &Url) -> impl Future<Output = bool> + Send;
}

/// Probe backed by HTTP requests.
///
/// Sends `HEAD`, retrying with `GET` for servers that reject `HEAD`.
/// Any success status after redirects means present.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Creates a probe sharing the timeout and user agent of `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self { client: config.client()? })
    }
}

impl FaviconProbe for HttpProbe {
    async fn exists(&self, url: &Url) -> bool {
        let status = match self.client.head(url.clone()).send().await {
            Ok(response) => response.status(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "favicon probe failed");
                return false;
            }
        };

        let status = if matches!(status, StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED) {
            match self.client.get(url.clone()).send().await {
                Ok(response) => response.status(),
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "favicon probe failed");
                    return false;
                }
            }
        } else {
            status
        };

        tracing::debug!(url = %url, status = status.as_u16(), "favicon probe answered");
        status.is_success()
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticProbe(pub bool);

impl FaviconProbe for StaticProbe {
    async fn exists(&self, _url: &Url) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_probe() {
        let url = Url::parse("https://example.com/favicon.ico").unwrap();
        assert!(StaticProbe(true).exists(&url).await);
        assert!(!StaticProbe(false).exists(&url).await);
    }

    #[tokio::test]
    async fn test_http_probe_unreachable_host_is_absent() {
        let config = FetchConfig { timeout: 2, ..Default::default() };
        let probe = HttpProbe::new(&config).unwrap();
        let url = Url::parse("http://127.0.0.1:9/favicon.ico").unwrap();
        assert!(!probe.exists(&url).await);
    }
}
