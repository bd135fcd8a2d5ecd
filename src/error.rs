// src/error.rs
use thiserror::Error;

/// Failures at the component seams. Batch rows catch these and record them;
/// interactive callers surface the message to the user.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("navigation failed for {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("login required at {0} and no one is available to sign in")]
    AuthenticationRequired(String),

    #[error("invalid page: {0}")]
    InvalidPage(String),

    #[error("summarizer error: {0}")]
    Summarizer(String),

    #[error("CSV format error: {0}")]
    CsvFormat(String),
}

impl AnalyzerError {
    pub fn navigation(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
