use thiserror::Error;

/// Failure to persist a score record.
///
/// Reads never fail: a missing or unreadable record is reported as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize score record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend rejected write for key `{key}`: {reason}")]
    Backend { key: String, reason: String },
    #[error("score for `{key}` is not a finite number")]
    NonFinite { key: String },
    #[error("storage backend unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("book `{title}` has url `{url}`; book urls must start with '/' and not be the root")]
    InvalidUrl { title: String, url: String },
    #[error("url `{url}` is used by more than one book")]
    DuplicateUrl { url: String },
    #[error("question {question} of book `{title}` answers choice {answer} but only has {choices} choices")]
    AnswerOutOfRange {
        title: String,
        question: usize,
        answer: usize,
        choices: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings storage key must not be empty")]
    EmptyStorageKey,
}
