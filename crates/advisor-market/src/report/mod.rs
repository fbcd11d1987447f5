//! Markdown report renderers
//!
//! Renderers are pure: they take already-fetched data and return markdown.
//! Fetching and failure containment live in [`crate::service`].

pub mod company;
pub mod custom;
pub mod format;
pub mod news;
pub mod price;
pub mod recommendations;

use serde::Serialize;

/// Body of every markdown endpoint; `content` and `markdown` carry the same text
/// except for errors, where `markdown` adds a heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownReport {
    pub content: String,
    pub markdown: String,
}

impl MarkdownReport {
    pub fn new(markdown: String) -> Self {
        Self {
            content: markdown.clone(),
            markdown,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            markdown: format!("## Error\n{message}"),
            content: message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shape() {
        let report = MarkdownReport::error("Error retrieving stock data for X: boom".to_string());
        assert_eq!(report.content, "Error retrieving stock data for X: boom");
        assert_eq!(report.markdown, "## Error\nError retrieving stock data for X: boom");
    }
}
