use std::sync::{Arc, LazyLock};

use helpdesk_core::{apply_tone, HelpdeskError, HelpdeskResult, Tone};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::normalize;
use crate::tfidf::SimilarityIndex;

/// "order", one space, then digits, e.g. "where is order 4521".
static ORDER_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)order (\d+)").ok());

const CLARIFICATION_MESSAGE: &str = "Can you please enter a valid message?";
const FALLBACK_MESSAGE: &str =
    "Sorry, I didn't understand that. You can ask about orders, returns, or shipping!";

fn default_confidence_threshold() -> f32 {
    0.4
}

fn default_max_suggestions() -> usize {
    3
}

/// Tunables for [`RetrievalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Top scores below this are treated as "not understood".
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// How many runner-up questions to offer alongside an answer.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl RetrievalConfig {
    /// Reject thresholds outside `[0, 1]`.
    pub fn validate(&self) -> HelpdeskResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(HelpdeskError::Config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        Ok(())
    }
}

/// Which path produced a [`Reply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyKind {
    /// The order-number override fired.
    OrderStatus {
        /// Digits captured from the message.
        order_id: String,
    },
    /// The message normalized to nothing.
    Clarification,
    /// The best match scored under the confidence threshold.
    Fallback {
        /// Score of the best match.
        top_score: f32,
    },
    /// A corpus answer was returned.
    Answer {
        /// Index of the matched corpus entry.
        entry: usize,
        /// Its cosine score.
        score: f32,
    },
}

/// A bot reply plus follow-up suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Tone-wrapped reply text.
    pub text: String,
    /// Related corpus questions, most similar first. Empty unless `kind` is `Answer`.
    pub suggestions: Vec<String>,
    /// How the reply was produced.
    pub kind: ReplyKind,
}

impl Reply {
    /// Split into `(text, suggestions)`.
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.text, self.suggestions)
    }
}

/// Answers free-text questions from a shared [`SimilarityIndex`].
///
/// Stateless apart from the immutable index, so one engine can serve any
/// number of sessions.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    index: Arc<SimilarityIndex>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    /// Create an engine over `index`.
    pub fn new(index: Arc<SimilarityIndex>, config: RetrievalConfig) -> Self {
        Self { index, config }
    }

    /// The underlying index.
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Active configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Produce a reply for `input`, styled with `tone`.
    ///
    /// In order:
    /// 1. An "order <digits>" mention short-circuits to a shipping-status
    ///    template (not tone-wrapped, no suggestions).
    /// 2. Input that normalizes to nothing gets a clarification prompt.
    /// 3. A best match under the confidence threshold gets the fallback message.
    /// 4. Otherwise the best match's answer, plus up to `max_suggestions`
    ///    runner-up questions.
    pub fn respond(&self, input: &str, tone: Tone) -> Reply {
        if let Some(order_id) = order_number(input) {
            debug!(order_id = %order_id, "Order-status override");
            return Reply {
                text: format!("Your order {order_id} is out for delivery and will arrive by tomorrow!"),
                suggestions: Vec::new(),
                kind: ReplyKind::OrderStatus { order_id },
            };
        }

        let cleaned = normalize(input);
        if cleaned.is_empty() {
            debug!("Empty query after normalization");
            return Reply {
                text: apply_tone(tone, CLARIFICATION_MESSAGE),
                suggestions: Vec::new(),
                kind: ReplyKind::Clarification,
            };
        }

        let hits = self.index.query(&cleaned);
        let Some(top) = hits.first().copied() else {
            // Unreachable for a built index, which always has rows.
            return Reply {
                text: apply_tone(tone, FALLBACK_MESSAGE),
                suggestions: Vec::new(),
                kind: ReplyKind::Fallback { top_score: 0.0 },
            };
        };

        if top.score < self.config.confidence_threshold {
            debug!(top_score = top.score, "Low-confidence match, falling back");
            return Reply {
                text: apply_tone(tone, FALLBACK_MESSAGE),
                suggestions: Vec::new(),
                kind: ReplyKind::Fallback { top_score: top.score },
            };
        }

        let suggestions: Vec<String> = hits
            .iter()
            .skip(1)
            .take(self.config.max_suggestions)
            .filter_map(|hit| self.index.entry(hit.index))
            .map(|entry| entry.question.clone())
            .collect();

        debug!(
            entry = top.index,
            score = top.score,
            suggestions = suggestions.len(),
            "Answered from corpus"
        );
        Reply {
            text: apply_tone(tone, &self.index.entries()[top.index].answer),
            suggestions,
            kind: ReplyKind::Answer {
                entry: top.index,
                score: top.score,
            },
        }
    }
}

/// Digits following the first "order" mention, if any.
fn order_number(input: &str) -> Option<String> {
    let re = ORDER_NUMBER.as_ref()?;
    re.captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
