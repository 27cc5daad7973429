//! Dictionary fallback chain integration tests (`dict_us`)

mod helpers;

use helpers::{
    american_target, cambridge_page, context, oxford_page, us_wikitext, wiki_body,
    wooordhunt_page,
};
use ipa_lookup::error::FetchError;
use ipa_lookup::fetcher::StaticFetcher;
use ipa_lookup::registry::DICT_US;
use ipa_lookup::strategy::dictionary::query_form;
use ipa_lookup::strategy::{DictionaryFallbackChain, DictionarySite};
use ipa_lookup::{Transcriber, BUILTIN_REGISTRY};
use std::sync::Arc;

fn site_urls(word: &str) -> [String; 3] {
    let query = query_form(word);
    [
        DictionarySite::oxford().url_for(&query),
        DictionarySite::cambridge().url_for(&query),
        DictionarySite::wooordhunt().url_for(&query),
    ]
}

#[tokio::test]
async fn test_site_a_result_wins_over_b_and_c() {
    let [oxford, cambridge, wooordhunt] = site_urls("water");
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_body(oxford, oxford_page("ˈwɔːtər"))
            .with_body(cambridge, cambridge_page("ˈwɑː.t̬ɚ"))
            .with_body(wooordhunt, wooordhunt_page("ˈwɔːtə")),
    );
    let chain = DictionaryFallbackChain::american_english();

    assert_eq!(chain.lookup("water", &context(&fetcher)).await, "ˈwɔːtər");
}

#[tokio::test]
async fn test_phrase_query_uses_plus_separator() {
    let [oxford, _, _] = site_urls("ice cream");
    assert!(oxford.ends_with("?q=ice+cream"));

    let fetcher = Arc::new(StaticFetcher::new().with_body(oxford, oxford_page("ˌaɪs ˈkriːm")));
    let chain = DictionaryFallbackChain::american_english();

    assert_eq!(chain.lookup("ice cream", &context(&fetcher)).await, "ˌaɪs ˈkriːm");
}

#[tokio::test]
async fn test_all_sites_fail_falls_back_per_sub_word() {
    let [oxford, cambridge, wooordhunt] = site_urls("good night");
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_failure(oxford, FetchError::Network("connection refused".to_string()))
            .with_body(cambridge, "<html><body>No results</body></html>")
            .with_body(wooordhunt, wooordhunt_page(&"ɡ".repeat(60)))
            .with_body(american_target("good"), wiki_body(&us_wikitext("ɡʊd")))
            .with_body(american_target("night"), wiki_body(&us_wikitext("naɪt"))),
    );
    let chain = DictionaryFallbackChain::american_english();

    assert_eq!(chain.lookup("good night", &context(&fetcher)).await, "ɡʊd naɪt");

    let targets = fetcher.targets();
    assert!(targets.contains(&american_target("good")));
    assert!(targets.contains(&american_target("night")));
    assert!(!targets.contains(&american_target("good night")));
}

#[tokio::test]
async fn test_total_failure_is_empty() {
    let fetcher = Arc::new(StaticFetcher::new());
    let chain = DictionaryFallbackChain::american_english();

    assert_eq!(chain.lookup("xyzzy", &context(&fetcher)).await, "");
    // three sites plus one general lookup
    assert_eq!(fetcher.requests().len(), 4);
}

#[tokio::test]
async fn test_registered_as_dict_us() {
    let [oxford, _, _] = site_urls("cat");
    let fetcher = Arc::new(
        StaticFetcher::new()
            .with_body(oxford, oxford_page("kæt"))
            .with_body(american_target("dog"), wiki_body(&us_wikitext("dɔɡ"))),
    );
    let transcriber = Transcriber::new(&BUILTIN_REGISTRY, context(&fetcher));

    let result = transcriber.transcribe(&["cat", "dog"], DICT_US).await.unwrap();
    assert_eq!(result, "kæt dɔɡ");
}
