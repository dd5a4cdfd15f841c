//! Independent rules for locating icon candidates in markup.
//!
//! Each [`Heuristic`] scans the whole document and returns the raw attribute
//! values it finds, in document order. Nothing here resolves URLs; values are
//! returned exactly as written in the markup.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::Document;

/// One rule for locating icon candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `logo` and `image` string fields of `application/ld+json` blocks.
    JsonLd,
    /// `<meta property="og:image">`.
    OpenGraph,
    /// `<link>` elements whose `rel` token list contains `icon`.
    LinkIcon,
    /// `<link rel="apple-touch-icon">`.
    AppleTouchIcon,
    /// `<meta name="twitter:image">`.
    TwitterCard,
    /// `<meta name="msapplication-TileImage">`.
    MicrosoftTile,
}

impl Heuristic {
    /// Every heuristic, in the order their results are concatenated.
    pub const ALL: [Heuristic; 6] = [
        Heuristic::JsonLd,
        Heuristic::OpenGraph,
        Heuristic::LinkIcon,
        Heuristic::AppleTouchIcon,
        Heuristic::TwitterCard,
        Heuristic::MicrosoftTile,
    ];

    /// Stable identifier used in log events.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::JsonLd => "json-ld",
            Heuristic::OpenGraph => "open-graph",
            Heuristic::LinkIcon => "link-icon",
            Heuristic::AppleTouchIcon => "apple-touch-icon",
            Heuristic::TwitterCard => "twitter-card",
            Heuristic::MicrosoftTile => "microsoft-tile",
        }
    }

    /// CSS selector for the elements this heuristic inspects.
    pub fn selector(self) -> &'static str {
        match self {
            Heuristic::JsonLd => r#"script[type="application/ld+json"]"#,
            Heuristic::OpenGraph => r#"meta[property="og:image"]"#,
            Heuristic::LinkIcon => r#"link[rel~="icon"]"#,
            Heuristic::AppleTouchIcon => r#"link[rel="apple-touch-icon"]"#,
            Heuristic::TwitterCard => r#"meta[name="twitter:image"]"#,
            Heuristic::MicrosoftTile => r#"meta[name="msapplication-TileImage"]"#,
        }
    }

    /// Runs this heuristic against a document.
    pub fn extract(self, doc: &Document) -> Vec<String> {
        match self {
            Heuristic::JsonLd => find_json_ld(doc),
            Heuristic::OpenGraph | Heuristic::TwitterCard | Heuristic::MicrosoftTile => {
                find_attr(doc, self.selector(), "content")
            }
            Heuristic::LinkIcon | Heuristic::AppleTouchIcon => find_attr(doc, self.selector(), "href"),
        }
    }
}

/// Image fields of a structured-data block.
///
/// Only string values are accepted; a block where either field has another
/// type does not decode at all.
#[derive(Debug, Default, Deserialize)]
struct JsonLdImages {
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

/// Decodes a block that must be a JSON object.
///
/// Field names match case-insensitively, preferring an exact match.
fn decode_json_ld(text: &str) -> serde_json::Result<JsonLdImages> {
    let object = serde_json::from_str::<Map<String, Value>>(text)?;

    let mut fields = Map::new();
    for name in ["logo", "image"] {
        if let Some(value) = lookup_field(&object, name) {
            fields.insert(name.to_string(), value.clone());
        }
    }
    serde_json::from_value(Value::Object(fields))
}

fn lookup_field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.to_lowercase() == name)
            .map(|(_, value)| value)
    })
}

/// Collects `logo` then `image` from every decodable JSON-LD block.
pub fn find_json_ld(doc: &Document) -> Vec<String> {
    let Ok(elements) = doc.select(Heuristic::JsonLd.selector()) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    for el in elements.iter() {
        let text = el.text();
        let images = match decode_json_ld(text.trim()) {
            Ok(images) => images,
            Err(e) => {
                tracing::trace!(error = %e, "skipping undecodable JSON-LD block");
                continue;
            }
        };

        result.extend(
            [images.logo, images.image]
                .into_iter()
                .flatten()
                .filter(|value| !value.is_empty()),
        );
    }
    result
}

/// Collects `content` of every `<meta property="og:image">`.
pub fn find_open_graph(doc: &Document) -> Vec<String> {
    Heuristic::OpenGraph.extract(doc)
}

/// Collects `href` of every `<link>` whose `rel` contains the `icon` token.
pub fn find_link_icons(doc: &Document) -> Vec<String> {
    Heuristic::LinkIcon.extract(doc)
}

/// Collects `href` of every `<link rel="apple-touch-icon">`.
pub fn find_apple_touch_icons(doc: &Document) -> Vec<String> {
    Heuristic::AppleTouchIcon.extract(doc)
}

/// Collects `content` of every `<meta name="twitter:image">`.
pub fn find_twitter_card(doc: &Document) -> Vec<String> {
    Heuristic::TwitterCard.extract(doc)
}

/// Collects `content` of every `<meta name="msapplication-TileImage">`.
pub fn find_microsoft_tile(doc: &Document) -> Vec<String> {
    Heuristic::MicrosoftTile.extract(doc)
}

fn find_attr(doc: &Document, selector: &str, attr: &str) -> Vec<String> {
    match doc.select(selector) {
        Ok(elements) => elements
            .iter()
            .filter_map(|el| el.non_empty_attr(attr))
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}
