use crate::normalize::normalize;
use helpdesk_core::{HelpdeskError, HelpdeskResult};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Answers of this many characters or fewer are dropped at load time.
pub const DEFAULT_MIN_ANSWER_CHARS: usize = 15;

/// Columns that must be present in the corpus header.
const REQUIRED_COLUMNS: [&str; 3] = ["question", "question_clean", "answer"];

/// A single question/answer pair from the support corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Original question text, shown to users as a suggestion.
    pub question: String,
    /// Normalized question text the index is built from.
    pub question_clean: String,
    /// Answer returned when this entry is the best match.
    pub answer: String,
}

impl CorpusEntry {
    /// Build an entry, deriving `question_clean` from `question`.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let question = question.into();
        let question_clean = normalize(&question);
        Self {
            question,
            question_clean,
            answer: answer.into(),
        }
    }
}

/// One raw CSV row; cells may be blank.
#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    question_clean: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read and filter a corpus CSV from disk.
///
/// See [`parse_corpus`] for the filtering rules.
pub async fn load_corpus(
    path: impl AsRef<Path>,
    min_answer_chars: usize,
) -> HelpdeskResult<Vec<CorpusEntry>> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await.map_err(|e| {
        HelpdeskError::Corpus(format!("Failed to read corpus '{}': {e}", path.display()))
    })?;
    let entries = parse_corpus(data.as_slice(), min_answer_chars)?;
    info!(path = %path.display(), entries = entries.len(), "Corpus loaded");
    Ok(entries)
}

/// Parse a corpus from CSV with a `question`, `question_clean`, `answer` header.
///
/// Rows are dropped when any of the three fields is missing or blank,
/// when the answer has `min_answer_chars` characters or fewer, or when the
/// question normalizes to nothing. Returns [`HelpdeskError::EmptyCorpus`]
/// if no rows survive.
pub fn parse_corpus<R: Read>(reader: R, min_answer_chars: usize) -> HelpdeskResult<Vec<CorpusEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(HelpdeskError::Corpus(format!(
                "Missing required column '{column}'"
            )));
        }
    }

    let mut entries = Vec::new();
    let mut dropped_missing = 0usize;
    let mut dropped_short = 0usize;
    let mut dropped_empty_clean = 0usize;

    for (line, row) in csv_reader.deserialize::<CorpusRow>().enumerate() {
        let row = row?;
        let (Some(question), Some(question_clean), Some(answer)) = (
            non_blank(row.question),
            non_blank(row.question_clean),
            non_blank(row.answer),
        ) else {
            debug!(row = line + 1, "Dropping row with a missing field");
            dropped_missing += 1;
            continue;
        };

        if answer.chars().count() <= min_answer_chars {
            debug!(row = line + 1, "Dropping row with short answer");
            dropped_short += 1;
            continue;
        }

        let question_clean = normalize(&question_clean);
        if question_clean.is_empty() {
            debug!(row = line + 1, "Dropping row whose question normalizes to nothing");
            dropped_empty_clean += 1;
            continue;
        }

        entries.push(CorpusEntry {
            question,
            question_clean,
            answer,
        });
    }

    info!(
        kept = entries.len(),
        dropped_missing,
        dropped_short,
        dropped_empty_clean,
        "Corpus filtered"
    );

    if entries.is_empty() {
        return Err(HelpdeskError::EmptyCorpus);
    }
    Ok(entries)
}
