//! News item and section data structures.

/// A single news entry scraped from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    title: String,
    url: String,
    date: String,
    category: Option<String>,
}

impl NewsItem {
    /// Create an item, trimming every field.
    ///
    /// A category that is blank after trimming is stored as `None`.
    pub fn new(
        title: impl AsRef<str>,
        url: impl AsRef<str>,
        date: impl AsRef<str>,
        category: Option<&str>,
    ) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            url: url.as_ref().trim().to_string(),
            date: date.as_ref().trim().to_string(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Title, URL and date must all be present; the category is optional.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty() && !self.date.is_empty()
    }
}

/// The crawl result of one source: a named group of items plus an optional error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSection {
    title: String,
    items: Vec<NewsItem>,
    error_message: Option<String>,
}

impl NewsSection {
    /// Create a section, keeping only valid items in their original order.
    pub fn new(title: impl AsRef<str>, items: Vec<NewsItem>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            items: items.into_iter().filter(NewsItem::is_valid).collect(),
            error_message: None,
        }
    }

    /// Create an empty section carrying an error message.
    pub fn failed(title: impl AsRef<str>, message: impl Into<String>) -> Self {
        Self::new(title, Vec::new()).with_error(message)
    }

    /// Attach an error message. Items already collected are kept but not rendered.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
