//! Source strategies
//!
//! Three families of lookup procedure:
//! - [`WikiRuleStrategy`]: wiki API wikitext + ordered rule chain, single answer
//! - [`DictionaryFallbackChain`]: dictionary sites in priority order, then
//!   per-sub-word wiki fallback
//! - [`SelectorStrategy`]: wiki article HTML + element selector, all distinct
//!   answers
//!
//! Every strategy absorbs its own fetch and extraction failures and returns
//! a (possibly empty) string.

pub mod dictionary;
pub mod selector;
pub mod wiki;

pub use dictionary::{DictionaryFallbackChain, DictionarySite};
pub use selector::SelectorStrategy;
pub use wiki::WikiRuleStrategy;

use crate::error::LookupError;
use crate::fetcher::Fetcher;
use crate::markup::{HtmlSelector, MarkupSelector};
use ipa_common::config::{Config, DEFAULT_BROWSER_USER_AGENT, DEFAULT_MAX_TRANSCRIPTION_CHARS};
use std::fmt;
use std::sync::Arc;

/// Raw outcome of querying one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
    /// Source identity, for diagnostics
    pub source: &'static str,
    /// Extracted text; `None` when the source produced nothing usable
    pub text: Option<String>,
}

impl SourceResult {
    pub fn found(source: &'static str, text: String) -> Self {
        Self {
            source,
            text: Some(text),
        }
    }

    pub fn absent(source: &'static str) -> Self {
        Self { source, text: None }
    }

    pub fn is_present(&self) -> bool {
        self.text.is_some()
    }
}

/// Acceptance check for dictionary results
///
/// Over-long captures usually mean a lazy pattern ran across most of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    /// Maximum length in characters (Unicode scalar values)
    pub max_chars: usize,
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_TRANSCRIPTION_CHARS,
        }
    }
}

impl ValidityPolicy {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn accepts(&self, text: &str) -> bool {
        text.chars().count() <= self.max_chars
    }

    pub fn check(&self, text: String) -> Result<String, LookupError> {
        let chars = text.chars().count();
        if chars <= self.max_chars {
            Ok(text)
        } else {
            Err(LookupError::Rejected {
                chars,
                max: self.max_chars,
            })
        }
    }
}

/// Per-process settings the strategies read at lookup time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    /// User-Agent sent to dictionary sites
    pub browser_user_agent: String,
    pub validity: ValidityPolicy,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            browser_user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
            validity: ValidityPolicy::default(),
        }
    }
}

impl LookupSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            browser_user_agent: config.http.browser_user_agent.clone(),
            validity: ValidityPolicy::new(config.lookup.max_transcription_chars),
        }
    }
}

/// Collaborators shared by every lookup
#[derive(Clone)]
pub struct LookupContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub selector: Arc<dyn MarkupSelector>,
    pub settings: LookupSettings,
}

impl LookupContext {
    pub fn new(fetcher: Arc<dyn Fetcher>, selector: Arc<dyn MarkupSelector>) -> Self {
        Self {
            fetcher,
            selector,
            settings: LookupSettings::default(),
        }
    }

    /// Context using the `scraper`-based HTML selector
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(fetcher, Arc::new(HtmlSelector))
    }

    pub fn with_settings(mut self, settings: LookupSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Strategy family, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    WikiRules,
    DictionaryFallback,
    Selector,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WikiRules => "wiki-rules",
            Self::DictionaryFallback => "dictionary-fallback",
            Self::Selector => "selector",
        };
        f.write_str(name)
    }
}

/// Top-level lookup procedure for one language
#[derive(Debug, Clone)]
pub enum LookupStrategy {
    WikiRules(WikiRuleStrategy),
    DictionaryFallback(DictionaryFallbackChain),
    Selector(SelectorStrategy),
}

impl LookupStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::WikiRules(_) => StrategyKind::WikiRules,
            Self::DictionaryFallback(_) => StrategyKind::DictionaryFallback,
            Self::Selector(_) => StrategyKind::Selector,
        }
    }

    /// Transcribe one word; "" when nothing usable was found
    pub async fn lookup(&self, word: &str, ctx: &LookupContext) -> String {
        match self {
            Self::WikiRules(strategy) => strategy.lookup(word, ctx.fetcher.as_ref()).await,
            Self::DictionaryFallback(chain) => chain.lookup(word, ctx).await,
            Self::Selector(strategy) => strategy.lookup(word, ctx).await,
        }
    }
}

impl From<WikiRuleStrategy> for LookupStrategy {
    fn from(strategy: WikiRuleStrategy) -> Self {
        Self::WikiRules(strategy)
    }
}

impl From<DictionaryFallbackChain> for LookupStrategy {
    fn from(chain: DictionaryFallbackChain) -> Self {
        Self::DictionaryFallback(chain)
    }
}

impl From<SelectorStrategy> for LookupStrategy {
    fn from(strategy: SelectorStrategy) -> Self {
        Self::Selector(strategy)
    }
}
