//! Language → strategy registry
//!
//! The registry is populated once and is read-only afterwards. The built-in
//! table lives in [`BUILTIN_REGISTRY`].

use crate::strategy::{
    DictionaryFallbackChain, LookupStrategy, SelectorStrategy, WikiRuleStrategy,
};
use once_cell::sync::Lazy;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const BRITISH: &str = "british";
pub const AMERICAN: &str = "american";
pub const DICT_US: &str = "dict_us";
pub const RUSSIAN: &str = "russian";
pub const FRENCH: &str = "french";
pub const SPANISH: &str = "spanish";
pub const GERMAN: &str = "german";
pub const POLISH: &str = "polish";
pub const DUTCH: &str = "dutch";

/// Process-wide built-in registry
pub static BUILTIN_REGISTRY: Lazy<StrategyRegistry> = Lazy::new(StrategyRegistry::builtin);

/// Identifier selecting a registry entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LanguageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for LanguageId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Borrow<str> for LanguageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Mapping from language identifier to lookup procedure
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    entries: BTreeMap<LanguageId, LookupStrategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy; a later registration under the same id wins
    ///
    /// Returns the replaced strategy, if any.
    pub fn register(
        &mut self,
        language: impl Into<LanguageId>,
        strategy: impl Into<LookupStrategy>,
    ) -> Option<LookupStrategy> {
        let language = language.into();
        let previous = self.entries.insert(language.clone(), strategy.into());
        if previous.is_some() {
            warn!(language = %language, "Strategy re-registered; last registration wins");
        }
        previous
    }

    pub fn get(&self, language: &str) -> Option<&LookupStrategy> {
        self.entries.get(language)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.entries.contains_key(language)
    }

    /// Registered identifiers, sorted
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in language table
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BRITISH, WikiRuleStrategy::british_english());
        registry.register(AMERICAN, WikiRuleStrategy::american_english());
        registry.register(DICT_US, DictionaryFallbackChain::american_english());
        registry.register(RUSSIAN, SelectorStrategy::russian());
        registry.register(FRENCH, SelectorStrategy::french());
        registry.register(SPANISH, SelectorStrategy::spanish());
        registry.register(GERMAN, WikiRuleStrategy::german());
        registry.register(POLISH, SelectorStrategy::polish());
        registry.register(DUTCH, SelectorStrategy::dutch());
        registry
    }
}
