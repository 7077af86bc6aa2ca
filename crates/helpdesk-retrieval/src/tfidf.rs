use crate::corpus::CorpusEntry;
use crate::normalize::normalize;
use helpdesk_core::{HelpdeskError, HelpdeskResult};
use std::collections::HashMap;
use tracing::info;

/// Sparse vector as `(dimension, weight)` pairs sorted by dimension.
type SparseVector = Vec<(usize, f32)>;

/// Split on non-alphanumerics; terms need at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.chars().nth(1).is_some())
        .map(str::to_lowercase)
        .collect()
}

/// Scale `vector` to unit L2 norm in place. All-zero vectors are left as is.
fn l2_normalize(vector: &mut SparseVector) {
    let norm: f32 = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in vector {
            *w /= norm;
        }
    }
}

/// A fitted TF-IDF vocabulary plus the document-term weight matrix.
///
/// Weights are raw term counts scaled by the smoothed inverse document
/// frequency:
/// ```text
/// idf(t) = ln((1 + n) / (1 + df(t))) + 1
/// ```
/// and every row is L2-normalized, so cosine similarity reduces to a dot
/// product and always lies in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// term -> dimension index
    vocabulary: HashMap<String, usize>,
    /// dimension index -> idf weight
    idf: Vec<f32>,
    /// One L2-normalized row per fitted document.
    rows: Vec<SparseVector>,
}

impl VectorSpace {
    /// Fit the vocabulary and weight matrix on `documents`.
    ///
    /// Fails with [`HelpdeskError::EmptyCorpus`] when `documents` is empty.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> HelpdeskResult<Self> {
        if documents.is_empty() {
            return Err(HelpdeskError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // Dimensions follow sorted term order so the layout is deterministic.
        let mut terms: Vec<&String> = tokenized.iter().flatten().collect();
        terms.sort();
        terms.dedup();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let mut seen: Vec<usize> = tokens.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            seen.sort_unstable();
            seen.dedup();
            for dim in seen {
                doc_freq[dim] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let mut space = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(tokenized.len()),
        };
        space.rows = tokenized.iter().map(|tokens| space.weigh(tokens)).collect();
        Ok(space)
    }

    /// Count known terms, apply idf, and L2-normalize.
    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for token in tokens {
            if let Some(&dim) = self.vocabulary.get(token) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }
        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf * self.idf[dim]))
            .collect();
        vector.sort_unstable_by_key(|&(dim, _)| dim);
        l2_normalize(&mut vector);
        vector
    }

    /// Project `text` into this space. Unseen terms contribute nothing.
    pub fn transform(&self, text: &str) -> Vec<(usize, f32)> {
        self.weigh(&tokenize(text))
    }

    /// Cosine similarity of `text` against every row, in row order.
    pub fn similarities(&self, text: &str) -> Vec<f32> {
        let query: HashMap<usize, f32> = self.transform(text).into_iter().collect();
        self.rows
            .iter()
            .map(|row| {
                if query.is_empty() || row.is_empty() {
                    return 0.0;
                }
                let dot: f32 = row
                    .iter()
                    .filter_map(|(dim, w)| query.get(dim).map(|q| q * w))
                    .sum();
                dot.clamp(0.0, 1.0)
            })
            .collect()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of fitted documents.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A ranked match: position in the corpus plus its cosine score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Index into [`SimilarityIndex::entries`].
    pub index: usize,
    /// Cosine similarity in `[0, 1]`.
    pub score: f32,
}

/// The corpus together with its fitted [`VectorSpace`].
///
/// Built once and read-only afterwards, so a single instance can be shared
/// (behind an `Arc`) by any number of chat sessions.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    entries: Vec<CorpusEntry>,
    space: VectorSpace,
}

impl SimilarityIndex {
    /// Fit the index over the normalized questions of `entries`.
    ///
    /// Fails with [`HelpdeskError::EmptyCorpus`] when `entries` is empty.
    pub fn build(mut entries: Vec<CorpusEntry>) -> HelpdeskResult<Self> {
        for entry in &mut entries {
            entry.question_clean = normalize(&entry.question_clean);
        }
        let documents: Vec<&str> = entries.iter().map(|e| e.question_clean.as_str()).collect();
        let space = VectorSpace::fit(&documents)?;
        info!(
            documents = space.row_count(),
            vocabulary = space.vocabulary_size(),
            "Similarity index built"
        );
        Ok(Self { entries, space })
    }

    /// Rank every entry against `text`, highest score first.
    ///
    /// Ties keep ascending corpus order. `text` is expected to be normalized
    /// already; see [`normalize`].
    pub fn query(&self, text: &str) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .space
            .similarities(text)
            .into_iter()
            .enumerate()
            .map(|(index, score)| SearchHit { index, score })
            .collect();
        // Stable sort: equal scores stay in corpus order.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    /// All corpus entries, in load order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// The entry at `index`, if any.
    pub fn entry(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    /// The fitted vector space.
    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Number of corpus entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built index.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.space.vocabulary_size()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_index() -> SimilarityIndex {
        SimilarityIndex::build(vec![
            CorpusEntry::new("How do I return an item?", "Visit Returns > Start a Return within 30 days of purchase."),
            CorpusEntry::new("How can I track my order?", "Use the Track Order link in your account to see live updates."),
            CorpusEntry::new("What payment methods do you accept?", "We accept Visa, Mastercard, PayPal and store gift cards."),
            CorpusEntry::new("How long does shipping take?", "Standard shipping takes 3-5 business days. Express ships in 1-2 days."),
            CorpusEntry::new("Can I change my delivery address?", "You can edit the address from Orders > Details before the item ships."),
            CorpusEntry::new("How do I get a refund?", "Refunds are issued to the original payment method within 5-7 days."),
        ])
        .unwrap()
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("how do i return an item"), vec!["how", "do", "return", "an", "item"]);
    }

    #[test]
    fn test_fit_empty_is_error() {
        let docs: Vec<&str> = Vec::new();
        assert!(matches!(VectorSpace::fit(&docs), Err(HelpdeskError::EmptyCorpus)));
        assert!(matches!(SimilarityIndex::build(Vec::new()), Err(HelpdeskError::EmptyCorpus)));
    }

    #[test]
    fn test_rows_match_entries() {
        let index = sample_index();
        assert_eq!(index.space().row_count(), index.len());
        assert!(!index.is_empty());
        assert!(index.vocabulary_size() > 10);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let index = sample_index();
        for row in &index.space().rows {
            let norm: f32 = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_identical_question_scores_one() {
        let index = sample_index();
        let hits = index.query("how long does shipping take");
        assert_eq!(hits[0].index, 3);
        assert!((hits[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_known_scores() {
        let index = sample_index();
        let hits = index.query("how can i return my item");
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 4, 5, 3, 2]);
        assert!((hits[0].score - 0.625).abs() < 1e-3);
        assert!((hits[1].score - 0.459).abs() < 1e-3);
        assert_eq!(hits[5].score, 0.0);
    }

    #[test]
    fn test_no_overlap_scores_zero_in_corpus_order() {
        let index = sample_index();
        let hits = index.query("zebra quantum");
        assert!(hits.iter().all(|h| h.score == 0.0));
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let index = sample_index();
        assert!(index.query("").iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn test_transform_ignores_unseen_terms() {
        let index = sample_index();
        let known = index.space().transform("refund");
        let mixed = index.space().transform("refund xylophone");
        assert_eq!(known, mixed);
        assert!(index.space().transform("xylophone").is_empty());
    }
}
