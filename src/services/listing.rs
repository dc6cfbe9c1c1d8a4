// src/services/listing.rs

//! Posts-listing page extractor.
//!
//! The page holds several listing blocks, one per category. Each entry's first
//! child element is the link and, when there is more than one child, the last
//! child element carries the date.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ListingSource, NewsItem};
use crate::utils::{clean_text, parse_selector, resolve_url};

/// Parse a listing page into items tagged with their block's category.
pub fn parse_listing(source: &ListingSource, html: &str) -> Result<Vec<NewsItem>> {
    let document = Html::parse_document(html);
    let block_sel = parse_selector(&source.block_selector)?;
    let entry_sel = parse_selector(&source.entry_selector)?;
    let base_url = Url::parse(&source.url)?;

    let blocks: Vec<_> = document
        .select(&block_sel)
        .take(source.max_blocks)
        .collect();
    if blocks.is_empty() {
        return Err(AppError::extract(
            &source.title,
            format!("no '{}' blocks found", source.block_selector),
        ));
    }

    let mut items = Vec::new();
    for (block, category) in blocks.into_iter().zip(&source.categories) {
        for entry in block.select(&entry_sel) {
            match parse_entry(&entry, category, &base_url) {
                Some(item) => items.push(item),
                None => log::debug!("Skipping listing entry without title or link in '{category}'"),
            }
        }
    }
    Ok(items)
}

fn parse_entry(entry: &ElementRef, category: &str, base_url: &Url) -> Option<NewsItem> {
    let children: Vec<ElementRef> = entry.child_elements().collect();
    let link = children.first()?;

    let title = clean_text(&link.text().collect::<String>());
    let href = link.value().attr("href").unwrap_or("").trim();
    if title.is_empty() || href.is_empty() {
        return None;
    }

    let date = match children.as_slice() {
        [_, .., last] => clean_text(&last.text().collect::<String>()),
        _ => String::new(),
    };

    Some(NewsItem::new(
        title,
        resolve_url(base_url, href),
        date,
        Some(category),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(entries: &str) -> String {
        format!(r#"<ul class="display-posts-listing">{entries}</ul>"#)
    }

    fn entry(title: &str, href: &str, date: &str) -> String {
        format!(
            r#"<li class="listing-item"><a class="title" href="{href}">{title}</a> <span class="date">{date}</span></li>"#
        )
    }

    #[test]
    fn test_blocks_map_to_categories_in_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            block(&format!(
                "{}{}",
                entry("Lịch học HK2", "https://ctda.example/a", "03/01/2024"),
                entry("Đăng ký môn", "https://ctda.example/b", "02/01/2024"),
            )),
            block(&entry("Thông báo học vụ", "/vi/c", "01/01/2024")),
        );

        let items = parse_listing(&ListingSource::default(), &html).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title(), "Lịch học HK2");
        assert_eq!(items[0].date(), "03/01/2024");
        assert_eq!(items[0].category(), Some("Academic Planning"));
        assert_eq!(items[1].category(), Some("Academic Planning"));
        assert_eq!(items[2].category(), Some("Academic Affairs"));
        assert_eq!(items[2].url(), "https://www.ctda.hcmus.edu.vn/vi/c");
    }

    #[test]
    fn test_blocks_beyond_categories_are_skipped() {
        let source = ListingSource {
            categories: vec!["Only".to_string()],
            ..ListingSource::default()
        };
        let html = format!(
            "{}{}",
            block(&entry("first", "https://x/1", "d")),
            block(&entry("second", "https://x/2", "d")),
        );

        let items = parse_listing(&source, &html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "first");
    }

    #[test]
    fn test_at_most_four_blocks() {
        let source = ListingSource {
            categories: (0..6).map(|i| format!("C{i}")).collect(),
            ..ListingSource::default()
        };
        let html: String = (0..6)
            .map(|i| block(&entry(&format!("t{i}"), &format!("https://x/{i}"), "d")))
            .collect();

        let items = parse_listing(&source, &html).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].category(), Some("C3"));
    }

    #[test]
    fn test_entries_without_link_or_title_are_skipped() {
        let html = block(&format!(
            r#"<li class="listing-item"><span>no link</span></li>
               <li class="listing-item"><a href="">empty href</a><span>d</span></li>
               <li class="listing-item"><a href="https://x/1">  </a><span>d</span></li>
               <li class="listing-item"></li>
               {}"#,
            entry("kept", "https://x/2", "05/01/2024")
        ));

        let items = parse_listing(&ListingSource::default(), &html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "kept");
    }

    #[test]
    fn test_single_child_has_no_date() {
        let html = block(r#"<li class="listing-item"><a href="https://x/1">Lone</a></li>"#);
        let items = parse_listing(&ListingSource::default(), &html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date(), "");
        assert!(!items[0].is_valid());
    }

    #[test]
    fn test_missing_listing_is_an_error() {
        let err = parse_listing(&ListingSource::default(), "<html><body><p>maintenance</p></body></html>")
            .unwrap_err();
        assert!(err.to_string().contains("display-posts-listing"));
    }
}
