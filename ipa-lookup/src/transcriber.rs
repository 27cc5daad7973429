//! Batch transcription orchestrator
//!
//! Resolves the language's strategy once, looks up every word and joins the
//! results with single spaces. Words that cannot be resolved contribute an
//! empty string in their position; only an unregistered language fails the
//! batch.

use crate::error::{FetchError, TranscribeError};
use crate::fetcher::HttpFetcher;
use crate::markup::HtmlSelector;
use crate::registry::{StrategyRegistry, BUILTIN_REGISTRY};
use crate::strategy::{LookupContext, LookupSettings};
use futures::stream::{self, StreamExt};
use ipa_common::Config;
use std::sync::Arc;
use tracing::{debug, info};

/// One word and its transcription ("" when none was found)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTranscription {
    pub word: String,
    pub transcription: String,
}

/// Transcription orchestrator
pub struct Transcriber<'r> {
    registry: &'r StrategyRegistry,
    context: LookupContext,
    concurrency: usize,
}

impl<'r> Transcriber<'r> {
    /// Sequential transcriber over `registry`
    pub fn new(registry: &'r StrategyRegistry, context: LookupContext) -> Self {
        Self {
            registry,
            context,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` word lookups in flight (minimum 1)
    ///
    /// Output order always follows input order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn registry(&self) -> &StrategyRegistry {
        self.registry
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Per-word results, in input order
    ///
    /// # Errors
    /// [`TranscribeError::UnknownLanguage`] when `language` is not registered.
    pub async fn transcribe_words<S: AsRef<str>>(
        &self,
        words: &[S],
        language: &str,
    ) -> Result<Vec<WordTranscription>, TranscribeError> {
        let strategy = self
            .registry
            .get(language)
            .ok_or_else(|| TranscribeError::UnknownLanguage(language.to_string()))?;

        info!(
            language = %language,
            strategy = %strategy.kind(),
            words = words.len(),
            "Transcribing batch"
        );

        let context = &self.context;
        let results: Vec<WordTranscription> = stream::iter(words.iter().map(AsRef::<str>::as_ref))
            .map(|word| async move {
                let transcription = strategy.lookup(word, context).await;
                debug!(word = %word, transcription = %transcription, "Word transcribed");
                WordTranscription {
                    word: word.to_string(),
                    transcription,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        Ok(results)
    }

    /// Space-joined transcription of `words`
    pub async fn transcribe<S: AsRef<str>>(
        &self,
        words: &[S],
        language: &str,
    ) -> Result<String, TranscribeError> {
        let results = self.transcribe_words(words, language).await?;
        Ok(results
            .into_iter()
            .map(|r| r.transcription)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

impl Transcriber<'static> {
    /// Production transcriber: HTTP fetcher, HTML selector, built-in registry
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::from_config(&config.http)?;
        let context = LookupContext::new(Arc::new(fetcher), Arc::new(HtmlSelector))
            .with_settings(LookupSettings::from_config(config));

        Ok(Self::new(&BUILTIN_REGISTRY, context).with_concurrency(config.lookup.concurrency))
    }
}
