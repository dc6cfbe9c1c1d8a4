// src/pipeline/render.rs

//! Markdown rendering of a crawl report.

use chrono::{DateTime, FixedOffset};

use crate::models::{CrawlerReport, NewsItem, NewsSection};

/// Short zone name for a fixed offset: `+07`, `-03`, `+0530`.
pub fn tz_abbrev(offset: &FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if minutes == 0 {
        format!("{sign}{hours:02}")
    } else {
        format!("{sign}{hours:02}{minutes:02}")
    }
}

/// `YYYY-MM-DD at HH:MM <zone>`
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    format!(
        "{} {}",
        timestamp.format("%Y-%m-%d at %H:%M"),
        tz_abbrev(timestamp.offset())
    )
}

/// Render the whole report. Output depends only on `report` and `title`.
pub fn render_markdown(report: &CrawlerReport, title: &str) -> String {
    let mut out = format!("# {title}\n\n");
    out.push_str(&format!(
        "*Last updated: **{}***\n\n",
        format_timestamp(&report.timestamp())
    ));
    out.push_str("---\n\n");

    if !report.errors().is_empty() {
        out.push_str("## ⚠️ Errors\n\n");
        for error in report.errors() {
            out.push_str(&format!("• {error}\n"));
        }
        out.push('\n');
    }

    for section in report.sections() {
        out.push_str(&render_section(section));
    }
    out
}

/// An error hides the section's items. Category headings are emitted on
/// every change between consecutive categorized items, not grouped.
pub fn render_section(section: &NewsSection) -> String {
    let mut out = format!("## {}\n\n", section.title());

    if let Some(error) = section.error_message() {
        out.push_str(&format!("*{error}*\n\n"));
        return out;
    }
    if section.items().is_empty() {
        out.push_str("*No news items found*\n\n");
        return out;
    }

    let mut current: Option<&str> = None;
    for item in section.items() {
        if let Some(category) = item.category() {
            if current != Some(category) {
                out.push_str(&format!("### {category}\n\n"));
                current = Some(category);
            }
        }
        out.push_str(&render_item(item));
    }
    out
}

fn render_item(item: &NewsItem) -> String {
    if item.date().is_empty() {
        format!("• [{}]({})\n\n", item.title(), item.url())
    } else {
        format!("• **{}**: [{}]({})\n\n", item.date(), item.title(), item.url())
    }
}
