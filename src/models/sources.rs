// src/models/sources.rs

//! Source descriptors: where each page lives and which elements to read.

use serde::{Deserialize, Serialize};

/// A WordPress-style page with several "posts listing" blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListingSource {
    /// Page URL
    pub url: String,

    /// Section heading in the report
    pub title: String,

    /// Name used in error messages ("Error loading {label}: ...")
    pub label: String,

    /// Selector for each listing block
    pub block_selector: String,

    /// Selector for each entry within a block
    pub entry_selector: String,

    /// Number of blocks read from the top of the page
    pub max_blocks: usize,

    /// Category for block *i*; blocks past the end of this list are skipped
    pub categories: Vec<String>,
}

impl Default for ListingSource {
    fn default() -> Self {
        Self {
            url: "https://www.ctda.hcmus.edu.vn/vi/".into(),
            title: "APCS".into(),
            label: "APCS news".into(),
            block_selector: ".display-posts-listing".into(),
            entry_selector: ".listing-item".into(),
            max_blocks: 4,
            categories: vec![
                "Academic Planning".into(),
                "Academic Affairs".into(),
                "Student Support".into(),
                "Accounting & Finance".into(),
            ],
        }
    }
}

/// A page whose posts are laid out as one table per post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSource {
    pub url: String,

    /// Base for resolving relative post links
    pub base_url: String,

    pub title: String,
    pub label: String,

    /// Selector for each post table (row group)
    pub group_selector: String,

    /// Day cell, taken from the first row
    pub day_selector: String,

    /// Month cell, taken from the last row
    pub month_selector: String,

    pub year_selector: String,
    pub link_selector: String,
}

impl Default for TableSource {
    fn default() -> Self {
        Self {
            url: "https://www.fit.hcmus.edu.vn/vn/".into(),
            base_url: "https://www.fit.hcmus.edu.vn/vn/".into(),
            title: "FIT".into(),
            label: "FIT news".into(),
            group_selector: "#dnn_ctr989_ModuleContent > table".into(),
            day_selector: "tr:first-child > .day_month".into(),
            month_selector: "tr:last-child > .day_month".into(),
            year_selector: ".post_year".into(),
            link_selector: "a".into(),
        }
    }
}

/// An RSS feed, optionally narrowed down by keywords.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FeedSource {
    pub url: String,
    pub title: String,

    /// Empty means every item is accepted
    pub keywords: Vec<String>,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, title: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            keywords,
        }
    }
}

/// The old university site listing exam announcements as "feed links".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LegacySource {
    pub url: String,
    pub title: String,
    pub label: String,
    pub entry_selector: String,

    /// Zero-based positions (among all matched entries) tagged as important
    pub important_positions: Vec<usize>,

    pub important_label: String,
}

impl Default for LegacySource {
    fn default() -> Self {
        Self {
            url: "https://old.hcmus.edu.vn/sinh-vien".into(),
            title: "Exam Announcements".into(),
            label: "exam announcements".into(),
            entry_selector: ".feed-link".into(),
            important_positions: vec![5, 10, 13],
            important_label: "Important".into(),
        }
    }
}

/// A keyword-filtered view over the main feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Topic {
    pub title: String,
    pub keywords: Vec<String>,
}
