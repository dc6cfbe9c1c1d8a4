//! Aggregated crawl report.

use chrono::{DateTime, FixedOffset};

use crate::models::NewsSection;

/// Result of one crawl run, consumed once by the renderer.
#[derive(Debug, Clone)]
pub struct CrawlerReport {
    sections: Vec<NewsSection>,
    timestamp: DateTime<FixedOffset>,
    errors: Vec<String>,
}

impl CrawlerReport {
    pub fn new(
        sections: Vec<NewsSection>,
        timestamp: DateTime<FixedOffset>,
        errors: Vec<String>,
    ) -> Self {
        Self {
            sections,
            timestamp,
            errors,
        }
    }

    pub fn sections(&self) -> &[NewsSection] {
        &self.sections
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Count items across all sections.
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(NewsSection::item_count).sum()
    }

    /// Sections that reported an error, in report order.
    pub fn sections_with_errors(&self) -> Vec<&NewsSection> {
        self.sections.iter().filter(|s| s.has_error()).collect()
    }
}
