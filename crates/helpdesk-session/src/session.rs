use crate::feedback::{FeedbackRecord, Vote};
use crate::transcript;
use chrono::{DateTime, Utc};
use helpdesk_core::{Persona, Tone};
use helpdesk_retrieval::{Reply, RetrievalEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatTurn {
    /// A message the user submitted.
    User {
        /// Raw message text.
        text: String,
    },
    /// The assistant's reply.
    Bot {
        /// Tone-wrapped reply text.
        text: String,
    },
    /// Related questions offered after a reply. May be empty.
    Suggestions {
        /// Original corpus questions, most similar first.
        questions: Vec<String>,
    },
}

impl ChatTurn {
    /// A user turn.
    pub fn user(text: impl Into<String>) -> Self {
        ChatTurn::User { text: text.into() }
    }

    /// A bot turn.
    pub fn bot(text: impl Into<String>) -> Self {
        ChatTurn::Bot { text: text.into() }
    }
}

/// Persona and tone currently selected for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Voice used for the greeting and reply label.
    #[serde(default)]
    pub persona: Persona,
    /// Transform applied to every bot reply.
    #[serde(default)]
    pub tone: Tone,
}

/// Counters shown in the analytics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    /// Number of user messages submitted.
    pub queries_handled: usize,
    /// Total feedback records.
    pub feedback_received: usize,
    /// Records voted helpful.
    pub helpful: usize,
    /// Records voted not helpful.
    pub not_helpful: usize,
}

/// A single user's conversation with the assistant.
///
/// Owns its transcript, feedback and selection; shares only the immutable
/// [`RetrievalEngine`] with other sessions.
pub struct ChatSession {
    id: Uuid,
    engine: Arc<RetrievalEngine>,
    config: SessionConfig,
    turns: Vec<ChatTurn>,
    feedback: Vec<FeedbackRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Start an empty session.
    pub fn new(engine: Arc<RetrievalEngine>, config: SessionConfig) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            engine,
            config,
            turns: Vec::new(),
            feedback: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Submit a user message.
    ///
    /// Empty text is ignored and returns `None`. Otherwise appends the user
    /// turn, the bot reply and the (possibly empty) suggestions, in that order.
    pub fn submit_message(&mut self, text: &str) -> Option<Reply> {
        if text.is_empty() {
            return None;
        }
        let reply = self.engine.respond(text, self.config.tone);
        debug!(session_id = %self.id, kind = ?reply.kind, "Message handled");

        self.turns.push(ChatTurn::user(text));
        self.turns.push(ChatTurn::bot(reply.text.clone()));
        self.turns.push(ChatTurn::Suggestions {
            questions: reply.suggestions.clone(),
        });
        self.touch();
        Some(reply)
    }

    /// Record a vote on `response`. Repeated votes accumulate.
    pub fn record_feedback(&mut self, response: impl Into<String>, vote: Vote) {
        self.feedback.push(FeedbackRecord::new(response, vote));
        self.touch();
    }

    /// Switch persona; applies to the greeting and subsequent replies.
    pub fn set_persona(&mut self, persona: Persona) {
        self.config.persona = persona;
        self.touch();
    }

    /// Switch tone; applies from the next submitted message.
    pub fn set_tone(&mut self, tone: Tone) {
        self.config.tone = tone;
        self.touch();
    }

    /// Plain-text log of user/bot exchanges. See [`transcript::export_text`].
    pub fn export_transcript(&self) -> String {
        transcript::export_text(&self.turns)
    }

    /// Greeting of the current persona.
    pub fn greeting(&self) -> &'static str {
        self.config.persona.greeting()
    }

    /// Text of the most recent bot turn.
    pub fn last_bot_reply(&self) -> Option<&str> {
        self.turns.iter().rev().find_map(|turn| match turn {
            ChatTurn::Bot { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Analytics counters.
    pub fn stats(&self) -> SessionStats {
        let helpful = self
            .feedback
            .iter()
            .filter(|r| r.vote == Vote::Helpful)
            .count();
        SessionStats {
            queries_handled: self
                .turns
                .iter()
                .filter(|t| matches!(t, ChatTurn::User { .. }))
                .count(),
            feedback_received: self.feedback.len(),
            helpful,
            not_helpful: self.feedback.len() - helpful,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current persona/tone selection.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Current persona.
    pub fn persona(&self) -> Persona {
        self.config.persona
    }

    /// Current tone.
    pub fn tone(&self) -> Tone {
        self.config.tone
    }

    /// Transcript in chronological order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Feedback in the order it was recorded.
    pub fn feedback(&self) -> &[FeedbackRecord] {
        &self.feedback
    }

    /// When the session started.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the session last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
