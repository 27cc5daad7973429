//! Source response fixtures

use ipa_lookup::strategy::WikiRuleStrategy;
use serde_json::json;

/// MediaWiki `parse` response carrying `wikitext`
pub fn wiki_body(wikitext: &str) -> String {
    json!({ "parse": { "title": "t", "pageid": 1, "wikitext": { "*": wikitext } } }).to_string()
}

/// Wikitext with a US-labelled pronunciation
pub fn us_wikitext(ipa: &str) -> String {
    format!(
        "==English==\n===Pronunciation===\n* {{{{a|US}}}} {{{{IPA|en|/{}/}}}}\n",
        ipa
    )
}

/// Request target of the American English wiki strategy for `word`
pub fn american_target(word: &str) -> String {
    WikiRuleStrategy::american_english().request(word).target()
}

pub fn oxford_page(ipa: &str) -> String {
    format!(
        "<div class=\"phons_n_am\">\n  <span class=\"phon\">/{}/</span>\n</div>",
        ipa
    )
}

pub fn cambridge_page(ipa: &str) -> String {
    format!(
        "<span class=\"us dpron-i\">\n<span class=\"ipa dipa lpr-2 lpl-1\">{}</span></span>",
        ipa
    )
}

pub fn wooordhunt_page(ipa: &str) -> String {
    format!("<div id=\"us_tr_sound\"><span class=\"transcription\"> |{}|</span></div>", ipa)
}
