//! Orchestrator integration tests
//!
//! Every source is served from a `StaticFetcher`, so no test touches the
//! network.

mod helpers;

use helpers::{american_target, context, us_wikitext, wiki_body};
use ipa_lookup::error::FetchError;
use ipa_lookup::fetcher::StaticFetcher;
use ipa_lookup::registry::{AMERICAN, RUSSIAN};
use ipa_lookup::strategy::{SelectorStrategy, WikiRuleStrategy};
use ipa_lookup::{StrategyRegistry, TranscribeError, Transcriber, BUILTIN_REGISTRY};
use std::sync::Arc;

fn cat_dog_fetcher() -> Arc<StaticFetcher> {
    Arc::new(
        StaticFetcher::new()
            .with_body(american_target("cat"), wiki_body(&us_wikitext("kæt")))
            .with_body(american_target("dog"), wiki_body(&us_wikitext("dɔg"))),
    )
}

#[tokio::test]
async fn test_joins_in_input_order() {
    let fetcher = cat_dog_fetcher();
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));

    let result = transcriber.transcribe(&["cat", "dog"], AMERICAN).await.unwrap();
    assert_eq!(result, "kæt dɔg");

    let reversed = transcriber.transcribe(&["dog", "cat"], AMERICAN).await.unwrap();
    assert_eq!(reversed, "dɔg kæt");
}

#[tokio::test]
async fn test_unknown_language_is_surfaced() {
    let fetcher = cat_dog_fetcher();
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));

    let err = transcriber.transcribe(&["cat"], "klingon").await.unwrap_err();
    assert_eq!(err, TranscribeError::UnknownLanguage("klingon".to_string()));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn test_empty_word_list() {
    let fetcher = cat_dog_fetcher();
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));
    let words: Vec<String> = Vec::new();

    assert_eq!(transcriber.transcribe(&words[..], AMERICAN).await.unwrap(), "");
}

#[tokio::test]
async fn test_failed_word_keeps_its_position() {
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_body(american_target("cat"), wiki_body(&us_wikitext("kæt")))
            .with_failure(
                american_target("mouse"),
                FetchError::Network("operation timed out".to_string()),
            )
            .with_body(american_target("dog"), wiki_body(&us_wikitext("dɔg"))),
    );
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));

    let result = transcriber
        .transcribe(&["cat", "mouse", "dog"], AMERICAN)
        .await
        .unwrap();
    assert_eq!(result, "kæt  dɔg");
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn test_transcribe_words_reports_each_word() {
    let fetcher = cat_dog_fetcher();
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));

    let results = transcriber
        .transcribe_words(&["cat", "bird", "dog"], AMERICAN)
        .await
        .unwrap();

    let pairs: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.word.as_str(), r.transcription.as_str()))
        .collect();
    assert_eq!(pairs, vec![("cat", "kæt"), ("bird", ""), ("dog", "dɔg")]);
}

#[tokio::test]
async fn test_concurrent_lookups_preserve_order() {
    let words = ["cat", "dog", "cat", "dog", "cat"];
    let fetcher = cat_dog_fetcher();
    let transcriber =
        Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher)).with_concurrency(4);

    let result = transcriber.transcribe(&words, AMERICAN).await.unwrap();
    assert_eq!(result, "kæt dɔg kæt dɔg kæt");
}

#[tokio::test]
async fn test_selector_language_multiple_pronunciations() {
    let strategy = SelectorStrategy::russian();
    let page = r#"<html><body>
        <span class="IPA">[ˈzamək]</span>
        <span class="IPA">[zɐˈmok]</span>
        <span class="IPA">[ˈzamək]</span>
    </body></html>"#;
    let fetcher = Arc::new(StaticFetcher::new().with_body(strategy.article_url("замок"), page));
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));

    let result = transcriber.transcribe(&["замок"], RUSSIAN).await.unwrap();
    assert_eq!(result, "zɐˈmok, ˈzamək");
}

#[tokio::test]
async fn test_custom_registry() {
    let mut registry = StrategyRegistry::new();
    registry.register("en-test", WikiRuleStrategy::american_english());
    let fetcher = cat_dog_fetcher();
    let transcriber = Transcriber::new(&registry, context(&fetcher));

    assert_eq!(transcriber.transcribe(&["cat"], "en-test").await.unwrap(), "kæt");
    assert!(matches!(
        transcriber.transcribe(&["cat"], AMERICAN).await,
        Err(TranscribeError::UnknownLanguage(_))
    ));
}
