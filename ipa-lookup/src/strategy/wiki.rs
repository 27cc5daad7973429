//! Wiki API strategy (wikitext + rule chain)
//!
//! Fetches the raw wikitext of an article through the MediaWiki `parse`
//! action and runs a [`RuleChain`] over it. The first matching rule's
//! capture is normalized and returned.

use super::SourceResult;
use crate::error::LookupError;
use crate::fetcher::{FetchRequest, Fetcher};
use crate::normalize::normalize;
use crate::rules::{builtin, RuleChain};
use serde::Deserialize;
use tracing::debug;

/// English Wiktionary API endpoint
pub const ENGLISH_WIKTIONARY_API: &str = "https://en.wiktionary.org/w/api.php";

/// German Wiktionary API endpoint
pub const GERMAN_WIKTIONARY_API: &str = "https://de.wiktionary.org/w/api.php";

const WIKITEXT_PATH: &str = "parse.wikitext.*";

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    wikitext: Option<Wikitext>,
}

#[derive(Debug, Deserialize)]
struct Wikitext {
    #[serde(rename = "*")]
    content: Option<String>,
}

/// Single-answer strategy over a wiki's `api.php`
#[derive(Debug, Clone)]
pub struct WikiRuleStrategy {
    source: &'static str,
    api_url: String,
    rules: RuleChain,
}

impl WikiRuleStrategy {
    pub fn new(source: &'static str, api_url: impl Into<String>, rules: RuleChain) -> Self {
        Self {
            source,
            api_url: api_url.into(),
            rules,
        }
    }

    pub fn british_english() -> Self {
        Self::new(
            "en.wiktionary/british",
            ENGLISH_WIKTIONARY_API,
            builtin::british_english(),
        )
    }

    pub fn american_english() -> Self {
        Self::new(
            "en.wiktionary/american",
            ENGLISH_WIKTIONARY_API,
            builtin::american_english(),
        )
    }

    pub fn german() -> Self {
        Self::new("de.wiktionary", GERMAN_WIKTIONARY_API, builtin::german())
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn rules(&self) -> &RuleChain {
        &self.rules
    }

    /// `parse` request for the article titled `word`
    pub fn request(&self, word: &str) -> FetchRequest {
        FetchRequest::new(self.api_url.as_str())
            .query("action", "parse")
            .query("page", word)
            .query("format", "json")
            .query("prop", "wikitext")
    }

    async fn fetch_wikitext(&self, word: &str, fetcher: &dyn Fetcher) -> Result<String, LookupError> {
        let response = fetcher.get(&self.request(word)).await?;
        let parsed: ParseResponse = response.json()?;

        parsed
            .parse
            .and_then(|page| page.wikitext)
            .and_then(|wikitext| wikitext.content)
            .ok_or(LookupError::MissingBody(WIKITEXT_PATH))
    }

    async fn try_lookup(&self, word: &str, fetcher: &dyn Fetcher) -> Result<String, LookupError> {
        let wikitext = self.fetch_wikitext(word, fetcher).await?;
        let matched = self.rules.first_match(&wikitext).ok_or(LookupError::NoMatch)?;

        debug!(
            source = self.source,
            word = %word,
            rule = matched.rule,
            "Extraction rule matched"
        );

        Ok(normalize(&matched.text))
    }

    /// Query the source, reporting which source answered
    pub async fn query(&self, word: &str, fetcher: &dyn Fetcher) -> SourceResult {
        match self.try_lookup(word, fetcher).await {
            Ok(ipa) => SourceResult::found(self.source, ipa),
            Err(e) => {
                debug!(source = self.source, word = %word, error = %e, "No transcription");
                SourceResult::absent(self.source)
            }
        }
    }

    /// Normalized transcription, or "" when the source has none
    pub async fn lookup(&self, word: &str, fetcher: &dyn Fetcher) -> String {
        self.query(word, fetcher).await.text.unwrap_or_default()
    }
}
