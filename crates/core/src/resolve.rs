//! Resolution of raw candidates into absolute URLs.
//!
//! Candidates come straight from markup and may be absolute
//! (`https://cdn.example.com/a.png`), scheme-relative (`//cdn.example.com/a.png`)
//! or path-relative (`/a.png`, `img/a.png`). Each one is turned into an
//! absolute URL against the base URL the page was actually served from.
//! Entries that are not valid URL references are dropped.
//!
//! # Example
//!
//! ```rust
//! use iconic_core::resolve_icons;
//!
//! let candidates = vec!["img/logo.png".to_string(), "//cdn.example.com/card.jpg".to_string()];
//! let icons = resolve_icons(&candidates, "https://example.com/blog/", true).unwrap();
//!
//! assert_eq!(
//!     icons,
//!     vec![
//!         "https://example.com/blog/img/logo.png",
//!         "https://cdn.example.com/card.jpg",
//!         "https://example.com/favicon.ico",
//!     ]
//! );
//! ```

use url::{ParseError, Url};

use crate::extract::extract_from_html;
use crate::{IconicError, Result};

/// Conventional favicon location, resolved against the site root.
pub const FALLBACK_PATH: &str = "/favicon.ico";

/// Parses a base URL.
///
/// # Errors
///
/// Returns [`IconicError::InvalidUrl`] if the URL does not parse or cannot
/// serve as a base for relative references (`mailto:`, `data:` and the like).
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let base = Url::parse(base_url).map_err(|e| IconicError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if base.cannot_be_a_base() {
        return Err(IconicError::InvalidUrl(format!(
            "{} cannot be used as a base URL",
            base_url
        )));
    }

    Ok(base)
}

/// Returns the favicon fallback location for a base URL.
pub fn fallback_url(base: &Url) -> Result<Url> {
    base.join(FALLBACK_PATH)
        .map_err(|e| IconicError::InvalidUrl(format!("{}: {}", base, e)))
}

/// Resolves raw candidates against a base URL.
///
/// When `append_fallback` is set, [`FALLBACK_PATH`] is appended to the
/// candidates before resolution, so it always comes last.
///
/// # Errors
///
/// Returns [`IconicError::InvalidUrl`] if `base_url` is unusable. No partial
/// list is returned in that case.
pub fn resolve_icons(candidates: &[String], base_url: &str, append_fallback: bool) -> Result<Vec<String>> {
    let base = parse_base_url(base_url)?;
    Ok(resolve_icons_with_base(candidates, &base, append_fallback))
}

/// Resolves raw candidates against an already parsed base URL.
pub fn resolve_icons_with_base(candidates: &[String], base: &Url, append_fallback: bool) -> Vec<String> {
    let fallback = append_fallback.then_some(FALLBACK_PATH);

    candidates
        .iter()
        .map(String::as_str)
        .chain(fallback)
        .filter_map(|candidate| resolve_candidate(candidate, base))
        .collect()
}

/// Resolves a single candidate, or `None` if it is not a valid URL reference.
///
/// Absolute candidates are returned exactly as written. An absolute candidate
/// with surrounding whitespace or embedded control characters is dropped, as
/// `Url::parse` would otherwise strip them silently.
pub fn resolve_candidate(candidate: &str, base: &Url) -> Option<String> {
    let resolved = match Url::parse(candidate) {
        Ok(_) if is_verbatim(candidate) => return Some(candidate.to_string()),
        Ok(_) => {
            tracing::trace!(candidate, "skipping absolute candidate with stray whitespace");
            return None;
        }
        Err(ParseError::RelativeUrlWithoutBase) if candidate.starts_with("//") => {
            Url::parse(&format!("{}:{}", base.scheme(), candidate))
        }
        Err(ParseError::RelativeUrlWithoutBase) => base.join(candidate),
        Err(e) => Err(e),
    };

    match resolved {
        Ok(url) => Some(url.into()),
        Err(e) => {
            tracing::trace!(candidate, error = %e, "skipping candidate that is not a URL reference");
            None
        }
    }
}

fn is_verbatim(candidate: &str) -> bool {
    candidate.trim() == candidate && !candidate.chars().any(|c| c.is_ascii_control())
}

/// Convenience function: extract and resolve the icons of an HTML document
/// served from `base_url`, always appending the fallback.
///
/// # Example
///
/// ```rust
/// use iconic_core::find_icons;
///
/// let html = r#"<link rel="icon" href="icon.svg">"#;
/// let icons = find_icons(html, "https://example.com/docs/").unwrap();
/// assert_eq!(icons, vec!["https://example.com/docs/icon.svg", "https://example.com/favicon.ico"]);
/// ```
pub fn find_icons(html: &str, base_url: &str) -> Result<Vec<String>> {
    let base = parse_base_url(base_url)?;
    let candidates = extract_from_html(html)?;
    Ok(resolve_icons_with_base(&candidates, &base, true))
}
