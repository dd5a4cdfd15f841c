//! HTML parsing and element selection.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and querying it with CSS selectors. Parsing follows the HTML5
//! algorithm, so broken markup still yields a document.
//!
//! # Example
//!
//! ```rust
//! use iconic_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head>
//!             <link rel="icon" href="/icon.png">
//!         </head>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let links = doc.select("link[rel~=icon]").unwrap();
//! assert_eq!(links[0].attr("href"), Some("/icon.png"));
//! ```

use std::io::Read;

use scraper::{Html, Selector};

use crate::{IconicError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use iconic_core::parse::Document;
///
/// let html = r#"<html><head><link rel="icon" href="/a.png"></head></html>"#;
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.select("link").unwrap().len(), 1);
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use iconic_core::parse::Document;
    ///
    /// let html = "<html><body><h1>Title</h1></body></html>";
    /// let doc = Document::parse(html).unwrap();
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Parses HTML from raw bytes.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected, and a
    /// leading byte order mark is dropped.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    /// Reads a whole stream and parses it as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`IconicError::HtmlParseError`] if the stream cannot be read.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = Vec::new();
        reader
            .read_to_end(&mut buffer)
            .map_err(|e| IconicError::HtmlParseError(format!("Failed to read document: {}", e)))?;
        Self::parse_bytes(&buffer)
    }

    /// Selects elements using a CSS selector.
    ///
    /// Elements are returned in document order.
    ///
    /// # Errors
    ///
    /// Returns [`IconicError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use iconic_core::parse::Document;
    ///
    /// let html = r#"<meta property="og:image" content="a.png"><meta property="og:image" content="b.png">"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select(r#"meta[property="og:image"]"#).unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| IconicError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use iconic_core::parse::Document;
///
/// let html = r#"<link rel="apple-touch-icon" href="/touch.png">"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("link").unwrap()[0];
///
/// assert_eq!(link.tag_name(), "link");
/// assert_eq!(link.attr("href"), Some("/touch.png"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// For `<script>` elements this is the raw script body.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the value of an attribute only when it is present and non-empty.
    pub fn non_empty_attr(&self, name: &str) -> Option<&'a str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}
