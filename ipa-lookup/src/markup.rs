//! Element selection on article HTML

use scraper::{node::Element, Html, Selector};
use tracing::warn;

/// Tag name plus attribute constraints
///
/// The `class` constraint matches any single class token of the element;
/// every other attribute must equal the given value exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementQuery {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl ElementQuery {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Whether the attribute constraints hold for `element`
    ///
    /// The tag itself is matched by the caller's selector.
    pub fn matches(&self, element: &Element) -> bool {
        self.attributes
            .iter()
            .all(|(name, expected)| attribute_matches(name, expected, element.attr(name)))
    }
}

fn attribute_matches(name: &str, expected: &str, actual: Option<&str>) -> bool {
    match actual {
        None => false,
        Some(actual) if name.eq_ignore_ascii_case("class") => {
            actual.split_ascii_whitespace().any(|token| token == expected)
        }
        Some(actual) => actual == expected,
    }
}

/// Returns the text content of every element matching a query
pub trait MarkupSelector: Send + Sync {
    /// Text of each matching element, in document order
    fn select(&self, markup: &str, query: &ElementQuery) -> Vec<String>;
}

/// [`MarkupSelector`] on the `scraper` HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSelector;

impl MarkupSelector for HtmlSelector {
    fn select(&self, markup: &str, query: &ElementQuery) -> Vec<String> {
        let selector = match Selector::parse(&query.tag) {
            Ok(selector) => selector,
            Err(e) => {
                warn!(tag = %query.tag, error = ?e, "Invalid tag selector");
                return Vec::new();
            }
        };

        let document = Html::parse_document(markup);
        document
            .select(&selector)
            .filter(|element| query.matches(element.value()))
            .map(|element| element.text().collect::<String>())
            .collect()
    }
}
