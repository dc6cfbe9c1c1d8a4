//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{FeedSource, LegacySource, ListingSource, TableSource, Topic};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client and retry settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Report rendering and output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// APCS faculty page
    #[serde(default)]
    pub listing: ListingSource,

    /// FIT faculty page
    #[serde(default)]
    pub table: TableSource,

    /// Student information feed, never filtered
    #[serde(default = "defaults::student_feed")]
    pub student_feed: FeedSource,

    /// Exam announcements on the old site
    #[serde(default)]
    pub legacy: LegacySource,

    /// Feed the keyword topics are drawn from
    #[serde(default = "defaults::main_feed_url")]
    pub main_feed_url: String,

    /// Keyword topics for the standard and CLC programs
    #[serde(default)]
    pub topics: TopicsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.report.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(AppError::validation(
                "report.utc_offset_minutes must be within ±1440",
            ));
        }
        if self.student_feed.title.trim().is_empty() {
            return Err(AppError::validation("student_feed.title is empty"));
        }
        if self.listing.categories.is_empty() {
            return Err(AppError::validation("listing.categories is empty"));
        }

        let urls = [
            ("listing.url", &self.listing.url),
            ("table.url", &self.table.url),
            ("table.base_url", &self.table.base_url),
            ("student_feed.url", &self.student_feed.url),
            ("legacy.url", &self.legacy.url),
            ("main_feed_url", &self.main_feed_url),
        ];
        for (key, value) in urls {
            url::Url::parse(value)
                .map_err(|e| AppError::validation(format!("{key} is not a valid URL: {e}")))?;
        }

        for (key, topic) in self.topics.named() {
            if topic.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(AppError::validation(format!(
                    "topics.{key} has no keywords"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            report: ReportConfig::default(),
            listing: ListingSource::default(),
            table: TableSource::default(),
            student_feed: defaults::student_feed(),
            legacy: LegacySource::default(),
            main_feed_url: defaults::main_feed_url(),
            topics: TopicsConfig::default(),
        }
    }
}

/// HTTP client and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Backoff factor in milliseconds; the n-th retry waits factor * 2^(n-1)
    #[serde(default = "defaults::backoff_factor")]
    pub backoff_factor_ms: u64,

    /// Upper bound for a single backoff sleep
    #[serde(default = "defaults::max_backoff")]
    pub max_backoff_secs: u64,

    /// Status codes that trigger a retry
    #[serde(default = "defaults::retry_statuses")]
    pub retry_statuses: Vec<u16>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_retries: defaults::max_retries(),
            backoff_factor_ms: defaults::backoff_factor(),
            max_backoff_secs: defaults::max_backoff(),
            retry_statuses: defaults::retry_statuses(),
        }
    }
}

/// Report rendering and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Top-level heading of the Markdown report
    #[serde(default = "defaults::report_title")]
    pub title: String,

    /// Label for the zone. Only the offset below affects timestamps
    #[serde(default = "defaults::timezone")]
    pub timezone: String,

    /// Offset of that zone from UTC
    #[serde(default = "defaults::utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Directory the report file is written to
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: defaults::report_title(),
            timezone: defaults::timezone(),
            utc_offset_minutes: defaults::utc_offset_minutes(),
            output_dir: defaults::output_dir(),
        }
    }
}

/// Keyword topics drawn from the main feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub course_info: Topic,
    pub talented_bachelor: Topic,
    pub ai: Topic,
    pub course_chain: Topic,
    pub high_quality: Topic,
}

impl TopicsConfig {
    fn named(&self) -> [(&'static str, &Topic); 5] {
        [
            ("course_info", &self.course_info),
            ("talented_bachelor", &self.talented_bachelor),
            ("ai", &self.ai),
            ("course_chain", &self.course_chain),
            ("high_quality", &self.high_quality),
        ]
    }
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            course_info: defaults::topic("Course Info", defaults::COURSE_INFO_KEYWORDS),
            talented_bachelor: defaults::topic(
                "Talented Bachelor",
                defaults::TALENTED_BACHELOR_KEYWORDS,
            ),
            ai: defaults::topic("AI", defaults::AI_KEYWORDS),
            course_chain: defaults::topic("Course Chain", defaults::COURSE_CHAIN_KEYWORDS),
            high_quality: defaults::topic(
                "High-Quality Program",
                defaults::HIGH_QUALITY_KEYWORDS,
            ),
        }
    }
}

mod defaults {
    use super::{FeedSource, Topic};

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 Edg/125.0.0.0"
            .into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn backoff_factor() -> u64 {
        1000
    }
    pub fn max_backoff() -> u64 {
        120
    }
    pub fn retry_statuses() -> Vec<u16> {
        vec![429, 500, 502, 503, 504]
    }

    // Report defaults
    pub fn report_title() -> String {
        "🎓 HCMUS News Update".into()
    }
    pub fn timezone() -> String {
        "Asia/Ho_Chi_Minh".into()
    }
    pub fn utc_offset_minutes() -> i32 {
        7 * 60
    }
    pub fn output_dir() -> String {
        ".".into()
    }

    // Feed defaults
    pub fn main_feed_url() -> String {
        "https://hcmus.edu.vn/feed/".into()
    }
    pub fn student_feed() -> FeedSource {
        FeedSource::new(
            "https://hcmus.edu.vn/category/dao-tao/dai-hoc/thong-tin-danh-cho-sinh-vien/feed/",
            "Student Info",
            Vec::new(),
        )
    }

    pub fn topic(title: &str, keywords: &[&str]) -> Topic {
        Topic {
            title: title.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub const COURSE_INFO_KEYWORDS: &[&str] = &[
        "môn học",
        "học phần",
        "chương trình học",
        "giáo trình",
        "kỳ học",
        "công nghệ thông tin",
        "khoa cntt",
        "computer science",
        "IT",
        "lập trình",
        "cơ sở dữ liệu",
        "mạng máy tính",
        "phần mềm",
    ];

    pub const TALENTED_BACHELOR_KEYWORDS: &[&str] = &[
        "cử nhân tài năng",
        "học bổng",
        "thầy cô ưu tú",
        "sinh viên giỏi",
        "công nghệ thông tin",
        "khoa cntt",
        "computer science",
        "IT",
        "tài năng cntt",
        "ưu tú cntt",
    ];

    pub const AI_KEYWORDS: &[&str] = &[
        "trí tuệ nhân tạo",
        "AI",
        "machine learning",
        "deep learning",
        "công nghệ 4.0",
        "công nghệ thông tin",
        "khoa cntt",
        "computer science",
        "IT",
        "data science",
        "big data",
        "neural network",
        "automation",
    ];

    pub const COURSE_CHAIN_KEYWORDS: &[&str] = &[
        "chuỗi môn học",
        "liên kết môn",
        "tích hợp",
        "liên ngành",
        "công nghệ thông tin",
        "khoa cntt",
        "computer science",
        "IT",
    ];

    pub const HIGH_QUALITY_KEYWORDS: &[&str] = &[
        "chất lượng cao",
        "CLC",
        "chương trình CLC",
        "high quality",
        "advanced program",
        "tốt nghiệp",
        "xuất sắc",
        "học bổng",
        "quốc tế",
        "hợp tác",
        "tiên tiến",
        "chất lượng",
        "công nghệ thông tin",
        "khoa cntt",
        "computer science",
        "IT",
        "CLC CNTT",
        "CLC IT",
        "advanced IT",
        "IT program",
        "lập trình nâng cao",
        "công nghệ phần mềm",
        "hệ thống thông tin",
        "kỹ thuật phần mềm",
        "khoa học máy tính",
        "trí tuệ nhân tạo",
    ];
}
