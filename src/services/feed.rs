// src/services/feed.rs

//! RSS feed extractor.
//!
//! Reads `<item>` elements with the `rss` crate. An item needs `<title>`,
//! `<link>` and `<pubDate>`; `<description>` only feeds the keyword filter.

use chrono::{DateTime, FixedOffset, Weekday};
use rss::{Channel, Item};

use crate::error::Result;
use crate::models::{FeedSource, NewsItem};
use crate::services::filter::{candidate_text, matches_any};
use crate::utils::clean_text;

/// Parse an RSS document, keeping items that pass the source's keyword filter.
///
/// A document that is not valid RSS is an error.
pub fn parse_feed(source: &FeedSource, xml: &str) -> Result<Vec<NewsItem>> {
    let channel = Channel::read_from(xml.as_bytes())?;

    let items = channel
        .items()
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let parsed = to_news_item(item, &source.keywords);
            if parsed.is_none() {
                log::debug!("Skipping feed item #{} in {}", i + 1, source.title);
            }
            parsed
        })
        .collect();
    Ok(items)
}

fn to_news_item(item: &Item, keywords: &[String]) -> Option<NewsItem> {
    let title = clean_text(item.title()?);
    let link = clean_text(item.link()?);
    let pub_date = clean_text(item.pub_date()?);
    let description = item.description().map(clean_text).unwrap_or_default();

    if !keywords.is_empty() && !matches_any(&candidate_text(&title, &description), keywords) {
        return None;
    }
    if title.is_empty() || link.is_empty() || pub_date.is_empty() {
        return None;
    }

    Some(NewsItem::new(title, link, format_pub_date(&pub_date), None))
}

/// Reformat an RFC-822 style `pubDate` as `DD/MM/YYYY`.
///
/// Unparseable input is returned unchanged.
pub fn format_pub_date(raw: &str) -> String {
    parse_pub_date(raw)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    // The weekday name must be well-formed but is not checked against the date.
    let from_parts = raw.split_once(", ").and_then(|(weekday, rest)| {
        weekday.parse::<Weekday>().ok()?;
        DateTime::parse_from_str(rest.trim(), "%d %b %Y %H:%M:%S %z").ok()
    });
    from_parts.or_else(|| DateTime::parse_from_rfc2822(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rss(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
              <channel>
                <title>HCMUS</title>
                <link>https://hcmus.edu.vn</link>
                <atom:link href="https://hcmus.edu.vn/feed/" rel="self"/>
                {items}
              </channel>
            </rss>"#
        )
    }

    fn item(title: &str, link: &str, date: &str, description: &str) -> String {
        format!(
            "<item><title>{title}</title><link>{link}</link><pubDate>{date}</pubDate>\
             <description><![CDATA[{description}]]></description></item>"
        )
    }

    fn source(keywords: &[&str]) -> FeedSource {
        FeedSource::new(
            "https://hcmus.edu.vn/feed/",
            "Feed",
            keywords.iter().map(|k| k.to_string()).collect(),
        )
    }

    #[test]
    fn test_format_pub_date() {
        assert_eq!(format_pub_date("Mon, 02 Jan 2024 10:00:00 +0700"), "02/01/2024");
        assert_eq!(format_pub_date("Tue, 02 Jan 2024 23:30:00 +0000"), "02/01/2024");
        assert_eq!(format_pub_date("Fri, 15 Mar 2024 08:00:00 GMT"), "15/03/2024");
    }

    #[test]
    fn test_unparseable_date_is_kept() {
        assert_eq!(format_pub_date("not-a-date"), "not-a-date");
        assert_eq!(format_pub_date("Xyz, 02 Jan 2024 10:00:00 +0700"), "Xyz, 02 Jan 2024 10:00:00 +0700");
    }

    #[test]
    fn test_parses_items_in_order() {
        let xml = rss(&format!(
            "{}{}",
            item("Thông báo &amp; lịch thi", "https://hcmus.edu.vn/a/", "Mon, 02 Jan 2024 10:00:00 +0700", "x"),
            item("Second", " https://hcmus.edu.vn/b/ ", "not-a-date", "y"),
        ));

        let items = parse_feed(&source(&[]), &xml).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "Thông báo & lịch thi");
        assert_eq!(items[0].url(), "https://hcmus.edu.vn/a/");
        assert_eq!(items[0].date(), "02/01/2024");
        assert_eq!(items[1].url(), "https://hcmus.edu.vn/b/");
        assert_eq!(items[1].date(), "not-a-date");
    }

    #[test]
    fn test_items_missing_required_fields_are_skipped() {
        let xml = rss(
            "<item><title>No date</title><link>https://x/1</link></item>\
             <item><link>https://x/2</link><pubDate>Mon, 02 Jan 2024 10:00:00 +0700</pubDate></item>\
             <item><title>Empty link</title><link/><pubDate>Mon, 02 Jan 2024 10:00:00 +0700</pubDate></item>\
             <item><title>Ok</title><link>https://x/3</link><pubDate>Mon, 02 Jan 2024 10:00:00 +0700</pubDate></item>",
        );

        let items = parse_feed(&source(&[]), &xml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "Ok");
    }

    #[test]
    fn test_keyword_filter_uses_title_and_description() {
        let date = "Mon, 02 Jan 2024 10:00:00 +0700";
        let xml = rss(&format!(
            "{}{}{}",
            item("Hội thảo Machine Learning", "https://x/1", date, ""),
            item("Lễ tốt nghiệp", "https://x/2", date, "Sinh viên ngành trí tuệ nhân tạo"),
            item("Giải bóng đá", "https://x/3", date, "Thể thao"),
        ));

        let items = parse_feed(&source(&["machine learning", "trí tuệ nhân tạo"]), &xml).unwrap();
        let titles: Vec<_> = items.iter().map(NewsItem::title).collect();
        assert_eq!(titles, vec!["Hội thảo Machine Learning", "Lễ tốt nghiệp"]);
    }

    #[test]
    fn test_channel_fields_are_ignored() {
        let items = parse_feed(&source(&[]), &rss("")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(parse_feed(&source(&[]), "<rss><channel><item><title>x</link></item>").is_err());
    }

    #[test]
    fn test_non_rss_document_is_an_error() {
        assert!(parse_feed(&source(&[]), "<html><body>Maintenance</body></html>").is_err());
    }
}
