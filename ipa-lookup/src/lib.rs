//! ipa-lookup library interface
//!
//! Resolves IPA transcriptions for words by querying public reference
//! sources (Wiktionary editions and English learner dictionaries) and
//! extracting a transcription from each source's markup.
//!
//! # Example
//! ```rust,ignore
//! use ipa_lookup::Transcriber;
//!
//! let transcriber = Transcriber::from_config(&ipa_common::Config::default())?;
//! let ipa = transcriber.transcribe(&["cat", "dog"], "american").await?;
//! ```

pub mod error;
pub mod fetcher;
pub mod markup;
pub mod normalize;
pub mod registry;
pub mod rules;
pub mod strategy;
pub mod transcriber;

pub use crate::error::{FetchError, LookupError, TranscribeError};
pub use crate::registry::{LanguageId, StrategyRegistry, BUILTIN_REGISTRY};
pub use crate::strategy::{LookupContext, LookupSettings, LookupStrategy};
pub use crate::transcriber::{Transcriber, WordTranscription};
