// src/services/legacy.rs

//! Legacy "feed link" list extractor for the old university site.
//!
//! Entries carry no date. Their link is the first absolute URL in the raw
//! markup, and a few fixed positions in the list are tagged as important.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::models::{LegacySource, NewsItem};
use crate::utils::parse_selector;

/// Greedy up to the last `" ` on the line, as the old markup quotes its hrefs.
/// Matched against serialized markup, which keeps source attribute order
/// (`scraper`'s `deterministic` feature).
static EMBEDDED_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"http.*" "#).expect("valid embedded URL pattern"));

/// Parse feed-link entries. Positions count every matched element,
/// including ones that are skipped.
pub fn parse_legacy(source: &LegacySource, html: &str) -> Result<Vec<NewsItem>> {
    let document = Html::parse_document(html);
    let entry_sel = parse_selector(&source.entry_selector)?;

    let mut items = Vec::new();
    for (position, entry) in document.select(&entry_sel).enumerate() {
        let Some((title, link)) = parse_entry(&entry) else {
            log::debug!("Skipping feed link #{position} in {}", source.title);
            continue;
        };
        let category = source
            .important_positions
            .contains(&position)
            .then_some(source.important_label.as_str());
        items.push(NewsItem::new(title, link, "", category));
    }
    Ok(items)
}

fn parse_entry(entry: &ElementRef) -> Option<(String, String)> {
    let title: String = entry
        .text()
        .collect::<String>()
        .replace(['\t', '\n'], "")
        .trim()
        .to_string();
    let link = extract_embedded_url(&entry.html())?;

    (!title.is_empty() && !link.is_empty()).then_some((title, link))
}

/// First `http…` run in `markup` ending just before a `" ` delimiter.
pub fn extract_embedded_url(markup: &str) -> Option<String> {
    EMBEDDED_URL
        .find(markup)
        .map(|m| m.as_str().trim_end_matches("\" ").to_string())
}
