// src/models/mod.rs

//! Domain models for the news crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod news;
mod program;
mod report;
mod sources;

// Re-export all public types
pub use config::{Config, HttpConfig, ReportConfig, TopicsConfig};
pub use news::{NewsItem, NewsSection};
pub use program::Program;
pub use report::CrawlerReport;
pub use sources::{FeedSource, LegacySource, ListingSource, TableSource, Topic};
