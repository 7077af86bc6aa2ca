//! Per-user chat state for the helpdesk assistant.
//!
//! A [`ChatSession`] owns the transcript, the persona/tone selection and the
//! feedback list. Sessions share nothing but the immutable retrieval engine.

/// Votes, feedback records, and the feedback sink.
pub mod feedback;
/// The chat session state machine.
pub mod session;
/// Transcript export.
pub mod transcript;

pub use feedback::{CsvFeedbackSink, FeedbackRecord, FeedbackSink, Vote};
pub use session::{ChatSession, ChatTurn, SessionConfig, SessionStats};
pub use transcript::{export_json, export_text};
