//! Service layer for the news crawler.
//!
//! This module contains the extraction logic:
//! - Posts-listing pages (`listing`)
//! - Table-per-post pages (`table`)
//! - RSS feeds with optional keyword filtering (`feed`, `filter`)
//! - The old site's feed-link list (`legacy`)
//! - The `Source` enumeration tying them to the fetch capability (`sources`)

pub mod feed;
pub mod filter;
pub mod legacy;
pub mod listing;
mod sources;
pub mod table;

pub use sources::Source;
