//! Keyword relevance filter for feed items.

/// True if any keyword occurs in `text`, ignoring case.
///
/// Plain substring matching: no tokenization, so short keywords such as
/// "IT" also match inside longer words.
pub fn matches_any<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .any(|k| !k.is_empty() && haystack.contains(&k))
}

/// Text a feed item is matched against.
pub fn candidate_text(title: &str, description: &str) -> String {
    format!("{title} {description}")
}
