//! Test Helper Utilities
//!
//! Canned source responses for ipa-lookup integration tests

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::{
    american_target, cambridge_page, oxford_page, us_wikitext, wiki_body, wooordhunt_page,
};

use ipa_lookup::fetcher::StaticFetcher;
use ipa_lookup::LookupContext;
use std::sync::Arc;

/// Lookup context over a shared static fetcher
pub fn context(fetcher: &Arc<StaticFetcher>) -> LookupContext {
    LookupContext::with_fetcher(fetcher.clone())
}
