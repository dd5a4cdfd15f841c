//! Icon discovery pipeline.
//!
//! This module ties the pieces together: fetch the page, extract candidates,
//! decide on the `/favicon.ico` fallback and resolve everything against the
//! URL the page was actually served from. The main entry point is
//! [`IconFinder`], along with the [`fetch_icons`] convenience function.
//!
//! # Example
//!
//! ```no_run
//! use iconic_core::{FallbackMode, FinderConfig, IconFinder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FinderConfig::builder().fallback(FallbackMode::Probe).timeout(10).build();
//! let finder = IconFinder::with_config(config)?;
//! let icons = finder.find("https://example.com/").await?;
//! println!("{:?}", icons);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;

use url::Url;

use crate::extract::extract_from_html;
use crate::fetch::{FetchConfig, FetchedPage, fetch_page};
use crate::probe::{FaviconProbe, HttpProbe};
use crate::resolve::{fallback_url, parse_base_url, resolve_icons_with_base};
use crate::Result;

/// Policy for appending the `/favicon.ico` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Always append the fallback, whether or not it exists.
    #[default]
    Always,
    /// Append the fallback only if the probe confirms it exists.
    Probe,
    /// Never append the fallback.
    Never,
}

impl FromStr for FallbackMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "probe" => Ok(Self::Probe),
            "never" | "none" => Ok(Self::Never),
            _ => Err(format!("Invalid fallback mode: {}. Valid options: always, probe, never", s)),
        }
    }
}

/// Configuration for [`IconFinder`].
///
/// # Example
///
/// ```rust
/// use iconic_core::{FallbackMode, FinderConfig};
///
/// let config = FinderConfig::builder()
///     .fallback(FallbackMode::Never)
///     .timeout(5)
///     .build();
/// assert_eq!(config.fetch.timeout, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Fallback policy (default: [`FallbackMode::Always`]).
    pub fallback: FallbackMode,

    /// HTTP settings for the page fetch and the favicon probe.
    pub fetch: FetchConfig,
}

impl FinderConfig {
    /// Creates a new builder for FinderConfig.
    pub fn builder() -> FinderConfigBuilder {
        FinderConfigBuilder::new()
    }
}

/// Builder for FinderConfig.
pub struct FinderConfigBuilder {
    config: FinderConfig,
}

impl FinderConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: FinderConfig::default() }
    }

    /// Sets the fallback policy.
    pub fn fallback(mut self, value: FallbackMode) -> Self {
        self.config.fallback = value;
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> FinderConfig {
        self.config
    }
}

impl Default for FinderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for icon discovery.
///
/// Generic over the [`FaviconProbe`] consulted in [`FallbackMode::Probe`];
/// by default that is an [`HttpProbe`] sharing the fetch settings.
pub struct IconFinder<P = HttpProbe> {
    config: FinderConfig,
    probe: P,
}

impl IconFinder<HttpProbe> {
    /// Creates a finder with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(FinderConfig::default())
    }

    /// Creates a finder with a custom configuration.
    pub fn with_config(config: FinderConfig) -> Result<Self> {
        let probe = HttpProbe::new(&config.fetch)?;
        Ok(Self { config, probe })
    }
}

impl<P: FaviconProbe> IconFinder<P> {
    /// Creates a finder with a custom configuration and probe.
    pub fn with_probe(config: FinderConfig, probe: P) -> Self {
        Self { config, probe }
    }

    /// Fetches a page and returns its icons.
    ///
    /// Relative candidates resolve against the final URL after redirects.
    pub async fn find(&self, url: &str) -> Result<Vec<String>> {
        let page = fetch_page(url, &self.config.fetch).await?;
        self.find_in_page(&page).await
    }

    /// Returns the icons of an already fetched page.
    pub async fn find_in_page(&self, page: &FetchedPage) -> Result<Vec<String>> {
        let candidates = extract_from_html(&page.body)?;
        self.finish(&candidates, &page.final_url).await
    }

    /// Returns the icons of an HTML document served from `base_url`.
    ///
    /// No network access happens here unless the fallback mode is
    /// [`FallbackMode::Probe`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::IconicError::InvalidUrl`] if `base_url` is unusable.
    pub async fn find_in_html(&self, html: &str, base_url: &str) -> Result<Vec<String>> {
        let base = parse_base_url(base_url)?;
        let candidates = extract_from_html(html)?;
        self.finish(&candidates, &base).await
    }

    /// Applies the fallback policy for a page served from `base`.
    pub async fn should_append_fallback(&self, base: &Url) -> Result<bool> {
        match self.config.fallback {
            FallbackMode::Always => Ok(true),
            FallbackMode::Never => Ok(false),
            FallbackMode::Probe => {
                let url = fallback_url(base)?;
                Ok(self.probe.exists(&url).await)
            }
        }
    }

    async fn finish(&self, candidates: &[String], base: &Url) -> Result<Vec<String>> {
        let append_fallback = self.should_append_fallback(base).await?;
        let icons = resolve_icons_with_base(candidates, base, append_fallback);
        tracing::debug!(
            base = %base,
            candidates = candidates.len(),
            icons = icons.len(),
            append_fallback,
            "resolved icons"
        );
        Ok(icons)
    }
}

/// Convenience function: fetch a page and list its icons with defaults.
///
/// # Example
///
/// ```no_run
/// use iconic_core::fetch_icons;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let icons = fetch_icons("https://example.com/").await?;
///     println!("{}", icons.join("\n"));
///     Ok(())
/// }
/// ```
pub async fn fetch_icons(url: &str) -> Result<Vec<String>> {
    IconFinder::new()?.find(url).await
}

/// Convenience function: fetch a page and list its icons with a custom configuration.
pub async fn fetch_icons_with_config(url: &str, config: &FinderConfig) -> Result<Vec<String>> {
    IconFinder::with_config(config.clone())?.find(url).await
}
