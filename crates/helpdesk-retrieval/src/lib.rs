//! Lexical retrieval over a fixed question/answer corpus.
//!
//! Provides deterministic text normalization, a CSV corpus loader, a
//! TF-IDF vector space with cosine-similarity ranking, and the retrieval
//! engine that gates matches on confidence and ranks follow-up suggestions.
//!
//! # Main types
//!
//! - [`CorpusEntry`] — A single question/answer pair.
//! - [`SimilarityIndex`] — Owns the corpus and its fitted [`VectorSpace`].
//! - [`RetrievalEngine`] — Turns a user message into a [`Reply`].
//! - [`RetrievalConfig`] — Confidence threshold and suggestion count.

/// Corpus entry type and tabular loader.
pub mod corpus;
/// Confidence-gated retrieval with the order-status override.
pub mod engine;
/// Text normalization shared by index build and query time.
pub mod normalize;
/// TF-IDF vector space and similarity index.
pub mod tfidf;

pub use corpus::{load_corpus, parse_corpus, CorpusEntry, DEFAULT_MIN_ANSWER_CHARS};
pub use engine::{Reply, ReplyKind, RetrievalConfig, RetrievalEngine};
pub use normalize::normalize;
pub use tfidf::{SearchHit, SimilarityIndex, VectorSpace};
