//! Article-HTML strategy (element selector)
//!
//! Wiki editions that mark IPA up with a recognisable element (a CSS class,
//! a title or an inline style) are scraped directly. Unlike the single-answer
//! strategies this one reports every distinct pronunciation on the page,
//! sorted and joined with `", "`.

use super::LookupContext;
use crate::error::LookupError;
use crate::fetcher::FetchRequest;
use crate::markup::ElementQuery;
use crate::normalize::normalize;
use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

/// Selector-based strategy for one wiki edition
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    source: &'static str,
    article_base: String,
    query: ElementQuery,
}

impl SelectorStrategy {
    /// `article_base` is the article path prefix, e.g. `https://ru.wiktionary.org/wiki/`
    pub fn new(source: &'static str, article_base: impl Into<String>, query: ElementQuery) -> Self {
        Self {
            source,
            article_base: article_base.into(),
            query,
        }
    }

    pub fn russian() -> Self {
        Self::new(
            "ru.wiktionary",
            "https://ru.wiktionary.org/wiki/",
            ElementQuery::new("span").attr("class", "IPA"),
        )
    }

    pub fn french() -> Self {
        Self::new(
            "fr.wiktionary",
            "https://fr.wiktionary.org/wiki/",
            ElementQuery::new("span").attr("title", "Prononciation API"),
        )
    }

    pub fn spanish() -> Self {
        Self::new(
            "es.wiktionary",
            "https://es.wiktionary.org/wiki/",
            ElementQuery::new("span").attr("style", "color:#368BC1"),
        )
    }

    pub fn polish() -> Self {
        Self::new(
            "pl.wiktionary",
            "https://pl.wiktionary.org/wiki/",
            ElementQuery::new("span").attr(
                "title",
                "To jest wymowa w zapisie IPA; zobacz hasło IPA w Wikipedii",
            ),
        )
    }

    pub fn dutch() -> Self {
        Self::new(
            "nl.wiktionary",
            "https://nl.wiktionary.org/wiki/",
            ElementQuery::new("span").attr("class", "IPAtekst"),
        )
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn query(&self) -> &ElementQuery {
        &self.query
    }

    /// Canonical article URL
    ///
    /// Spaces in the title become underscores and the title is
    /// percent-encoded as a single path segment. A base that is not a valid
    /// URL gets the bare title appended; fetching it then fails as usual.
    pub fn article_url(&self, word: &str) -> String {
        let title = word.replace(' ', "_");
        match Url::parse(&self.article_base) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(&title);
                }
                String::from(url)
            }
            Err(_) => format!("{}{}", self.article_base, title),
        }
    }

    async fn try_fragments(&self, word: &str, ctx: &LookupContext) -> Result<Vec<String>, LookupError> {
        let response = ctx
            .fetcher
            .get(&FetchRequest::new(self.article_url(word)))
            .await?;
        Ok(ctx.selector.select(response.text(), &self.query))
    }

    /// Distinct normalized fragments, sorted
    ///
    /// A failed fetch yields a single empty fragment so the word keeps its
    /// position when joined.
    pub async fn fragments(&self, word: &str, ctx: &LookupContext) -> Vec<String> {
        match self.try_fragments(word, ctx).await {
            Ok(raw) => {
                debug!(source = self.source, word = %word, matches = raw.len(), "Selector matched");
                distinct_sorted(&raw)
            }
            Err(e) => {
                debug!(source = self.source, word = %word, error = %e, "Article fetch failed");
                vec![String::new()]
            }
        }
    }

    pub async fn lookup(&self, word: &str, ctx: &LookupContext) -> String {
        self.fragments(word, ctx).await.join(", ")
    }
}

/// Normalize, deduplicate and sort fragments
pub fn distinct_sorted(fragments: &[String]) -> Vec<String> {
    fragments
        .iter()
        .map(|fragment| normalize(fragment))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
