#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use helpdesk_core::{Persona, Tone};
use helpdesk_retrieval::{CorpusEntry, RetrievalConfig, RetrievalEngine, SimilarityIndex};
use helpdesk_session::{
    ChatSession, ChatTurn, CsvFeedbackSink, FeedbackRecord, FeedbackSink, SessionConfig, Vote,
};

/// Helper: an engine over a small support corpus.
fn shared_engine() -> Arc<RetrievalEngine> {
    let index = SimilarityIndex::build(vec![
        CorpusEntry {
            question: "How do I return an item?".into(),
            question_clean: "how do i return an item".into(),
            answer: "Visit Returns > Start a Return within 30 days of purchase.".into(),
        },
        CorpusEntry::new(
            "How can I track my order?",
            "Use the Track Order link in your account to see live updates.",
        ),
        CorpusEntry::new(
            "What payment methods do you accept?",
            "We accept Visa, Mastercard, PayPal and store gift cards.",
        ),
        CorpusEntry::new(
            "How long does shipping take?",
            "Standard shipping takes 3-5 business days. Express ships in 1-2 days.",
        ),
        CorpusEntry::new(
            "Can I change my delivery address?",
            "You can edit the address from Orders > Details before the item ships.",
        ),
        CorpusEntry::new(
            "How do I get a refund?",
            "Refunds are issued to the original payment method within 5-7 days.",
        ),
    ])
    .unwrap();
    Arc::new(RetrievalEngine::new(
        Arc::new(index),
        RetrievalConfig::default(),
    ))
}

#[test]
fn test_return_question_end_to_end() {
    let mut session = ChatSession::new(
        shared_engine(),
        SessionConfig {
            persona: Persona::ReturnsSpecialist,
            tone: Tone::Professional,
        },
    );

    session.submit_message("how can I return my item").unwrap();

    let turns = session.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0], ChatTurn::user("how can I return my item"));
    assert_eq!(
        turns[1],
        ChatTurn::bot("Visit Returns > Start a Return within 30 days of purchase.")
    );
    assert_eq!(
        turns[2],
        ChatTurn::Suggestions {
            questions: vec![
                "How can I track my order?".into(),
                "Can I change my delivery address?".into(),
                "How do I get a refund?".into(),
            ]
        }
    );
}

#[test]
fn test_feedback_accumulates_in_call_order() {
    let mut session = ChatSession::new(shared_engine(), SessionConfig::default());
    session.record_feedback("Refunds take a week.", Vote::Helpful);
    session.record_feedback("Refunds take a week.", Vote::NotHelpful);

    assert_eq!(
        session.feedback(),
        &[
            FeedbackRecord::new("Refunds take a week.", Vote::Helpful),
            FeedbackRecord::new("Refunds take a week.", Vote::NotHelpful),
        ]
    );
}

#[test]
fn test_sessions_are_isolated() {
    let engine = shared_engine();
    let mut a = ChatSession::new(engine.clone(), SessionConfig::default());
    let mut b = ChatSession::new(
        engine,
        SessionConfig {
            persona: Persona::GeneralHelp,
            tone: Tone::Funny,
        },
    );

    a.submit_message("how long does shipping take").unwrap();
    b.submit_message("where is order 88").unwrap();
    b.record_feedback("whatever", Vote::Helpful);

    assert_ne!(a.id(), b.id());
    assert_eq!(a.turns().len(), 3);
    assert!(a.feedback().is_empty());
    assert_eq!(
        b.last_bot_reply(),
        Some("Your order 88 is out for delivery and will arrive by tomorrow!")
    );
    assert_eq!(a.tone(), Tone::Professional);
}

#[test]
fn test_transcript_export_after_mixed_paths() {
    let mut session = ChatSession::new(shared_engine(), SessionConfig::default());
    session.submit_message("where is order 12").unwrap();
    session.submit_message("!!!").unwrap();
    session.submit_message("zebra").unwrap();
    assert!(session.submit_message("").is_none());

    let log = session.export_transcript();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "You: where is order 12");
    assert_eq!(lines[2], "You: !!!");
    assert_eq!(lines[3], "Bot: Can you please enter a valid message?");
    assert!(lines[5].starts_with("Bot: Sorry, I didn't understand that."));
    assert_eq!(session.stats().queries_handled, 3);
}

#[tokio::test]
async fn test_feedback_persisted_through_sink() {
    let tmp = tempfile::tempdir().unwrap();
    let sink = CsvFeedbackSink::new(tmp.path().join("feedback_log.csv"));
    let mut session = ChatSession::new(shared_engine(), SessionConfig::default());

    session.submit_message("how do i get a refund").unwrap();
    let reply = session.last_bot_reply().unwrap().to_string();
    session.record_feedback(reply.clone(), Vote::Helpful);
    sink.save(session.feedback()).await.unwrap();

    let text = tokio::fs::read_to_string(sink.path()).await.unwrap();
    assert_eq!(text, format!("Response,Feedback\n{reply},👍\n"));
}
