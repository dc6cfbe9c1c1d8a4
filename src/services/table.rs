// src/services/table.rs

//! Table-per-post page extractor.
//!
//! Every post is a small table: the day sits in the first row, the month in
//! the last row and the year in its own cell. First and last row are assumed
//! to be the right ones; a post with a single row reads day and month from it.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{NewsItem, TableSource};
use crate::utils::{clean_text, parse_selector, resolve_url};

struct TableSelectors {
    day: Selector,
    month: Selector,
    year: Selector,
    link: Selector,
}

/// Parse a table-style page into items dated `D-M-Y`.
pub fn parse_table(source: &TableSource, html: &str) -> Result<Vec<NewsItem>> {
    let document = Html::parse_document(html);
    let group_sel = parse_selector(&source.group_selector)?;
    let selectors = TableSelectors {
        day: parse_selector(&source.day_selector)?,
        month: parse_selector(&source.month_selector)?,
        year: parse_selector(&source.year_selector)?,
        link: parse_selector(&source.link_selector)?,
    };
    let base_url = Url::parse(&source.base_url)?;

    let groups: Vec<_> = document.select(&group_sel).collect();
    if groups.is_empty() {
        return Err(AppError::extract(
            &source.title,
            format!("no '{}' found", source.group_selector),
        ));
    }

    let mut items = Vec::new();
    for (index, group) in groups.into_iter().enumerate() {
        match parse_group(&group, &selectors, &base_url) {
            Some(item) => items.push(item),
            None => log::debug!("Skipping malformed post table #{index} in {}", source.title),
        }
    }
    Ok(items)
}

fn parse_group(group: &ElementRef, sel: &TableSelectors, base_url: &Url) -> Option<NewsItem> {
    let text_of = |el: ElementRef| clean_text(&el.text().collect::<String>());

    let day = text_of(group.select(&sel.day).next()?);
    let month = text_of(group.select(&sel.month).last()?);
    let year = text_of(group.select(&sel.year).next()?);

    let link = group.select(&sel.link).next()?;
    let title = text_of(link);
    let href = link.value().attr("href")?.trim();
    if title.is_empty() || href.is_empty() {
        return None;
    }

    Some(NewsItem::new(
        title,
        resolve_url(base_url, href),
        format!("{day}-{month}-{year}"),
        None,
    ))
}
