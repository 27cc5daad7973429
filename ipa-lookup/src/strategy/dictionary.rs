//! Dictionary fallback chain
//!
//! Queries human-readable dictionary sites in a fixed priority order and
//! takes the first result that passes the [`ValidityPolicy`]. When every
//! site fails, each space-separated sub-word is looked up on its own through
//! the general wiki strategy and the pieces are rejoined.

use super::{LookupContext, SourceResult, ValidityPolicy, WikiRuleStrategy};
use crate::error::LookupError;
use crate::fetcher::{FetchRequest, Fetcher};
use crate::normalize::normalize;
use crate::rules::{builtin, ExtractionRule};
use tracing::debug;
use url::form_urlencoded;

pub const OXFORD_SEARCH_URL: &str =
    "https://www.oxfordlearnersdictionaries.com/search/english/direct/?q=";
pub const CAMBRIDGE_SEARCH_URL: &str =
    "https://dictionary.cambridge.org/search/direct/?datasetsearch=english&q=";
pub const WOOORDHUNT_URL: &str = "https://wooordhunt.ru/word/";

/// URL-safe query form of a phrase
///
/// Spaces become `+`; reserved and non-ASCII characters are percent-encoded.
pub fn query_form(word: &str) -> String {
    form_urlencoded::byte_serialize(word.as_bytes()).collect()
}

/// One dictionary site with its single extraction rule
#[derive(Debug, Clone)]
pub struct DictionarySite {
    name: &'static str,
    search_url: String,
    rule: ExtractionRule,
}

impl DictionarySite {
    /// `search_url` is a prefix; the query form is appended verbatim
    pub fn new(name: &'static str, search_url: impl Into<String>, rule: ExtractionRule) -> Self {
        Self {
            name,
            search_url: search_url.into(),
            rule,
        }
    }

    pub fn oxford() -> Self {
        Self::new("oxford", OXFORD_SEARCH_URL, builtin::oxford())
    }

    pub fn cambridge() -> Self {
        Self::new("cambridge", CAMBRIDGE_SEARCH_URL, builtin::cambridge())
    }

    pub fn wooordhunt() -> Self {
        Self::new("wooordhunt", WOOORDHUNT_URL, builtin::wooordhunt())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rule(&self) -> &ExtractionRule {
        &self.rule
    }

    pub fn url_for(&self, query: &str) -> String {
        format!("{}{}", self.search_url, query)
    }

    async fn try_query(
        &self,
        query: &str,
        fetcher: &dyn Fetcher,
        user_agent: &str,
        policy: ValidityPolicy,
    ) -> Result<String, LookupError> {
        let request = FetchRequest::new(self.url_for(query)).header("User-Agent", user_agent);
        let response = fetcher.get(&request).await?;

        // Patterns span elements that the page splits across lines
        let flattened = response.text().replace('\n', " ");
        let captured = self.rule.apply(&flattened).ok_or(LookupError::NoMatch)?;

        policy.check(captured)
    }

    /// Raw (un-normalized) result for `query`, already in query form
    pub async fn query(
        &self,
        query: &str,
        fetcher: &dyn Fetcher,
        user_agent: &str,
        policy: ValidityPolicy,
    ) -> SourceResult {
        match self.try_query(query, fetcher, user_agent, policy).await {
            Ok(ipa) => SourceResult::found(self.name, ipa),
            Err(e) => {
                debug!(source = self.name, query = %query, error = %e, "Dictionary site produced no result");
                SourceResult::absent(self.name)
            }
        }
    }
}

/// Ordered dictionary sites plus per-sub-word general fallback
#[derive(Debug, Clone)]
pub struct DictionaryFallbackChain {
    sites: Vec<DictionarySite>,
    general: WikiRuleStrategy,
}

impl DictionaryFallbackChain {
    pub fn new(sites: Vec<DictionarySite>, general: WikiRuleStrategy) -> Self {
        Self { sites, general }
    }

    /// Oxford, then Cambridge, then Wooordhunt, then American Wiktionary
    pub fn american_english() -> Self {
        Self::new(
            vec![
                DictionarySite::oxford(),
                DictionarySite::cambridge(),
                DictionarySite::wooordhunt(),
            ],
            WikiRuleStrategy::american_english(),
        )
    }

    pub fn sites(&self) -> &[DictionarySite] {
        &self.sites
    }

    pub fn general(&self) -> &WikiRuleStrategy {
        &self.general
    }

    /// First accepted site result, in priority order
    ///
    /// Sites are queried one at a time; a lower-priority site is never
    /// contacted once a higher-priority one has answered.
    pub async fn first_site_result(&self, word: &str, ctx: &LookupContext) -> Option<SourceResult> {
        let query = query_form(word);
        for site in &self.sites {
            let result = site
                .query(
                    &query,
                    ctx.fetcher.as_ref(),
                    &ctx.settings.browser_user_agent,
                    ctx.settings.validity,
                )
                .await;
            if result.is_present() {
                return Some(result);
            }
        }
        None
    }

    /// Normalized transcription; "" when neither sites nor fallback answer
    pub async fn lookup(&self, word: &str, ctx: &LookupContext) -> String {
        if let Some(SourceResult {
            source,
            text: Some(ipa),
        }) = self.first_site_result(word, ctx).await
        {
            debug!(source, word = %word, "Dictionary site answered");
            return normalize(&ipa);
        }

        debug!(
            word = %word,
            fallback = self.general.source(),
            "No dictionary site answered; looking up sub-words"
        );

        let mut pieces = Vec::new();
        for piece in word.split(' ') {
            if piece.is_empty() {
                pieces.push(String::new());
                continue;
            }
            pieces.push(self.general.lookup(piece, ctx.fetcher.as_ref()).await);
        }

        normalize(&pieces.join(" "))
    }
}
