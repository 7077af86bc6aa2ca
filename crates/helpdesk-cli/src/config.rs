//! `helpdesk.toml` loading.
//!
//! Every section is optional; anything left out falls back to the defaults
//! below.

use helpdesk_core::{HelpdeskError, HelpdeskResult};
use helpdesk_retrieval::{RetrievalConfig, DEFAULT_MIN_ANSWER_CHARS};
use helpdesk_session::SessionConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    #[serde(default = "default_min_answer_chars")]
    pub min_answer_chars: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            min_answer_chars: default_min_answer_chars(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_feedback_path")]
    pub feedback_path: PathBuf,
    #[serde(default = "default_transcript_path")]
    pub transcript_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            feedback_path: default_feedback_path(),
            transcript_path: default_transcript_path(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("chatbot_data.csv")
}
fn default_min_answer_chars() -> usize {
    DEFAULT_MIN_ANSWER_CHARS
}
fn default_feedback_path() -> PathBuf {
    PathBuf::from("feedback_log.csv")
}
fn default_transcript_path() -> PathBuf {
    PathBuf::from("chat_log.txt")
}

impl HelpdeskConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> HelpdeskResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| HelpdeskError::Config(format!("Invalid config: {e}")))?;
        config.retrieval.validate()?;
        Ok(config)
    }

    /// Load from `path`.
    ///
    /// When `required` is false a missing file yields the defaults; an
    /// explicitly requested file must exist.
    pub async fn load(path: &Path, required: bool) -> HelpdeskResult<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(HelpdeskError::Config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))),
        }
    }
}
