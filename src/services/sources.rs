// src/services/sources.rs

//! The closed set of source kinds and the shared extraction boundary.

use crate::error::Result;
use crate::models::{FeedSource, LegacySource, ListingSource, NewsItem, NewsSection, TableSource};
use crate::services::{feed, legacy, listing, table};
use crate::utils::http::Fetcher;

/// One configured source, ready to be fetched and parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Listing(ListingSource),
    Table(TableSource),
    Feed(FeedSource),
    Legacy(LegacySource),
}

impl Source {
    /// Heading of the section this source produces.
    pub fn title(&self) -> &str {
        match self {
            Source::Listing(s) => &s.title,
            Source::Table(s) => &s.title,
            Source::Feed(s) => &s.title,
            Source::Legacy(s) => &s.title,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Source::Listing(s) => &s.url,
            Source::Table(s) => &s.url,
            Source::Feed(s) => &s.url,
            Source::Legacy(s) => &s.url,
        }
    }

    /// Name used in "Error loading ..." messages.
    fn label(&self) -> &str {
        match self {
            Source::Listing(s) => &s.label,
            Source::Table(s) => &s.label,
            Source::Feed(s) => &s.title,
            Source::Legacy(s) => &s.label,
        }
    }

    /// Parse an already fetched document.
    pub fn parse(&self, body: &str) -> Result<Vec<NewsItem>> {
        match self {
            Source::Listing(s) => listing::parse_listing(s, body),
            Source::Table(s) => table::parse_table(s, body),
            Source::Feed(s) => feed::parse_feed(s, body),
            Source::Legacy(s) => legacy::parse_legacy(s, body),
        }
    }

    /// Fetch and parse this source. Never fails: any error becomes the
    /// section's error message and the section has no items.
    pub async fn extract(&self, fetcher: &dyn Fetcher) -> NewsSection {
        match self.fetch_items(fetcher).await {
            Ok(items) => {
                let section = NewsSection::new(self.title(), items);
                log::info!(
                    "{}: {} item(s) from {}",
                    section.title(),
                    section.item_count(),
                    self.url()
                );
                section
            }
            Err(e) => {
                log::warn!("Error crawling {} ({}): {}", self.title(), self.url(), e);
                NewsSection::failed(self.title(), format!("Error loading {}: {}", self.label(), e))
            }
        }
    }

    async fn fetch_items(&self, fetcher: &dyn Fetcher) -> Result<Vec<NewsItem>> {
        let body = fetcher.get(self.url()).await?;
        self.parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;

    struct StaticFetcher(std::result::Result<&'static str, u16>);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn get(&self, url: &str) -> Result<String> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(status) => Err(AppError::HttpStatus {
                    url: url.to_string(),
                    status,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_transport_error_becomes_section_error() {
        let source = Source::Table(TableSource::default());
        let section = source.extract(&StaticFetcher(Err(503))).await;

        assert_eq!(section.title(), "FIT");
        assert_eq!(section.item_count(), 0);
        assert_eq!(
            section.error_message(),
            Some("Error loading FIT news: HTTP status 503 for https://www.fit.hcmus.edu.vn/vn/")
        );
    }

    #[tokio::test]
    async fn test_structural_error_becomes_section_error() {
        let source = Source::Listing(ListingSource::default());
        let section = source.extract(&StaticFetcher(Ok("<html></html>"))).await;
        assert!(section.has_error());
        assert!(section.error_message().unwrap().starts_with("Error loading APCS news: "));
    }

    #[tokio::test]
    async fn test_feed_error_uses_section_title() {
        let source = Source::Feed(FeedSource::new("https://x/feed/", "AI", vec![]));
        let section = source.extract(&StaticFetcher(Err(404))).await;
        assert!(section.error_message().unwrap().starts_with("Error loading AI: "));
    }

    #[tokio::test]
    async fn test_legacy_items_without_dates_are_dropped() {
        let source = Source::Legacy(LegacySource::default());
        let html = r#"<div class="feed-link"><a href="https://old.hcmus.edu.vn/1" target="_blank">Lịch thi</a></div>"#;
        let section = source.extract(&StaticFetcher(Ok(html))).await;

        assert!(!section.has_error());
        assert_eq!(section.item_count(), 0);
    }
}
