use thiserror::Error;

/// A convenience `Result` alias using [`HelpdeskError`].
pub type HelpdeskResult<T> = Result<T, HelpdeskError>;

/// Top-level error type for the helpdesk assistant.
///
/// Empty queries and low-confidence matches are not errors; they are
/// ordinary reply outcomes produced by the retrieval engine.
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// The corpus held no usable rows after filtering. Fatal at startup.
    #[error("Corpus is empty after filtering")]
    EmptyCorpus,

    /// The corpus source could not be read or lacks a required column.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// An invalid configuration value or an unknown persona/tone name.
    #[error("Config error: {0}")]
    Config(String),

    /// The feedback sink failed to persist records.
    #[error("Feedback error: {0}")]
    Feedback(String),

    /// A CSV read or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
