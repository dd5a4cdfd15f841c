pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
#[cfg(feature = "fetch")]
pub mod finder;
pub mod heuristics;
pub mod parse;
#[cfg(feature = "fetch")]
pub mod probe;
pub mod resolve;

pub use error::{ErrorKind, IconicError, Result};
pub use extract::{extract_candidates, extract_from_bytes, extract_from_html, extract_from_reader};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, FetchedPage, fetch_page};
#[cfg(feature = "fetch")]
pub use finder::{
    FallbackMode, FinderConfig, FinderConfigBuilder, IconFinder, fetch_icons, fetch_icons_with_config,
};
pub use heuristics::Heuristic;
pub use parse::{Document, Element};
#[cfg(feature = "fetch")]
pub use probe::{FaviconProbe, HttpProbe, StaticProbe};
pub use resolve::{FALLBACK_PATH, fallback_url, find_icons, parse_base_url, resolve_icons, resolve_icons_with_base};
