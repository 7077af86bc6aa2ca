use async_trait::async_trait;
use helpdesk_core::{HelpdeskError, HelpdeskResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// A user's verdict on a bot reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    /// 👍
    Helpful,
    /// 👎
    NotHelpful,
}

impl Vote {
    /// Symbol written to the feedback file.
    pub fn symbol(self) -> &'static str {
        match self {
            Vote::Helpful => "👍",
            Vote::NotHelpful => "👎",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Helpful => f.write_str("Helpful"),
            Vote::NotHelpful => f.write_str("Not Helpful"),
        }
    }
}

/// One vote on one reply. Records are independent; repeats accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// The bot reply text the vote refers to.
    pub response: String,
    /// The verdict.
    pub vote: Vote,
}

impl FeedbackRecord {
    /// Create a record.
    pub fn new(response: impl Into<String>, vote: Vote) -> Self {
        Self {
            response: response.into(),
            vote,
        }
    }
}

/// Destination for a session's feedback list.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Persist `records`, replacing whatever was saved before.
    async fn save(&self, records: &[FeedbackRecord]) -> HelpdeskResult<()>;
}

/// Writes feedback as a two-column CSV (`Response`, `Feedback`).
///
/// Each save overwrites the file. Saving an empty list leaves any existing
/// file untouched.
pub struct CsvFeedbackSink {
    path: PathBuf,
}

impl CsvFeedbackSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render records as CSV bytes with a `Response,Feedback` header.
fn render_csv(records: &[FeedbackRecord]) -> HelpdeskResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Response", "Feedback"])?;
    for record in records {
        writer.write_record([record.response.as_str(), record.vote.symbol()])?;
    }
    writer
        .into_inner()
        .map_err(|e| HelpdeskError::Feedback(format!("Failed to flush feedback CSV: {e}")))
}

#[async_trait]
impl FeedbackSink for CsvFeedbackSink {
    async fn save(&self, records: &[FeedbackRecord]) -> HelpdeskResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let bytes = render_csv(records)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, bytes).await?;
        info!(path = %self.path.display(), records = records.len(), "Feedback saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_csv_quotes_commas() {
        let bytes = render_csv(&[
            FeedbackRecord::new("Yes, we ship abroad.", Vote::Helpful),
            FeedbackRecord::new("No.", Vote::NotHelpful),
        ])
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "Response,Feedback\n\"Yes, we ship abroad.\",👍\nNo.,👎\n"
        );
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let sink = CsvFeedbackSink::new(tmp.path().join("logs").join("feedback_log.csv"));

        sink.save(&[
            FeedbackRecord::new("first", Vote::Helpful),
            FeedbackRecord::new("second", Vote::Helpful),
        ])
        .await
        .unwrap();
        sink.save(&[FeedbackRecord::new("third", Vote::NotHelpful)])
            .await
            .unwrap();

        let text = tokio::fs::read_to_string(sink.path()).await.unwrap();
        assert_eq!(text, "Response,Feedback\nthird,👎\n");
    }

    #[tokio::test]
    async fn test_save_empty_is_noop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feedback_log.csv");
        let sink = CsvFeedbackSink::new(&path);

        sink.save(&[]).await.unwrap();
        assert!(!path.exists());

        sink.save(&[FeedbackRecord::new("kept", Vote::Helpful)])
            .await
            .unwrap();
        sink.save(&[]).await.unwrap();
        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains("kept"));
    }

    #[test]
    fn test_vote_display() {
        assert_eq!(Vote::Helpful.to_string(), "Helpful");
        assert_eq!(Vote::NotHelpful.symbol(), "👎");
    }
}
