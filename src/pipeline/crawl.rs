// src/pipeline/crawl.rs

//! Crawl orchestration: program → sources → sections → report.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlerReport, FeedSource, NewsSection, Program, ReportConfig, Topic};
use crate::services::Source;
use crate::utils::http::Fetcher;

/// Source of the report timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock shifted into the configured zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::config(format!(
                    "invalid UTC offset for {}: {} minutes",
                    config.timezone, config.utc_offset_minutes
                ))
            })?;
        Ok(Self::new(offset))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

fn topic_feed(config: &Config, topic: &Topic) -> Source {
    Source::Feed(FeedSource::new(
        &config.main_feed_url,
        &topic.title,
        topic.keywords.clone(),
    ))
}

/// Sources crawled for `program`, in report order.
pub fn program_sources(program: Program, config: &Config) -> Vec<Source> {
    let student_feed = Source::Feed(FeedSource {
        keywords: Vec::new(),
        ..config.student_feed.clone()
    });
    let legacy = Source::Legacy(config.legacy.clone());

    match program {
        Program::Apcs => vec![
            Source::Listing(config.listing.clone()),
            Source::Table(config.table.clone()),
            student_feed,
            legacy,
        ],
        Program::Standard => vec![
            topic_feed(config, &config.topics.course_info),
            topic_feed(config, &config.topics.talented_bachelor),
            topic_feed(config, &config.topics.ai),
            topic_feed(config, &config.topics.course_chain),
            student_feed,
            legacy,
        ],
        Program::Clc => vec![
            topic_feed(config, &config.topics.high_quality),
            student_feed,
            legacy,
        ],
    }
}

/// Report-level errors: one `"<title>: <message>"` per failed section, in
/// section order, followed by `extra`.
pub fn collect_errors(sections: &[NewsSection], extra: &[String]) -> Vec<String> {
    sections
        .iter()
        .filter_map(|s| {
            s.error_message()
                .map(|message| format!("{}: {}", s.title(), message))
        })
        .chain(extra.iter().cloned())
        .collect()
}

/// Runs a program's sources one after another and assembles the report.
pub struct NewsCrawler<'a> {
    config: &'a Config,
    fetcher: &'a dyn Fetcher,
    clock: &'a dyn Clock,
    report_errors: Vec<String>,
}

impl<'a> NewsCrawler<'a> {
    pub fn new(config: &'a Config, fetcher: &'a dyn Fetcher, clock: &'a dyn Clock) -> Self {
        Self {
            config,
            fetcher,
            clock,
            report_errors: Vec::new(),
        }
    }

    /// Record an error that belongs to the run rather than to a source.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.report_errors.push(message.into());
    }

    /// Crawl every source of `program`. A failing source only affects its own section.
    pub async fn generate_report(&self, program: Program) -> CrawlerReport {
        let sources = program_sources(program, self.config);
        log::info!("Crawling {} source(s) for {}", sources.len(), program);

        let mut sections = Vec::with_capacity(sources.len());
        for source in &sources {
            sections.push(source.extract(self.fetcher).await);
        }

        let timestamp = self.clock.now();
        let errors = collect_errors(&sections, &self.report_errors);
        CrawlerReport::new(sections, timestamp, errors)
    }
}
