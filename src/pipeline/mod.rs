//! Pipeline entry points.
//!
//! - `crawl`: run a program's sources and assemble a `CrawlerReport`
//! - `render`: turn a report into Markdown

pub mod crawl;
pub mod render;

pub use crawl::{Clock, NewsCrawler, SystemClock, program_sources};
pub use render::render_markdown;
