//! Similarity ranking of records against a query.
//!
//! Scores are inner products between the query embedding and each
//! descriptor embedding. Results are ordered by descending score; equal
//! scores keep the lower descriptor index first.

use crate::collection::{Corpus, Record};
use crate::embedding::CachedEmbedder;
use crate::error::{AshaError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A ranked record with its similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    /// The original record.
    pub record: Record,
    /// Similarity score (higher is better).
    pub score: f32,
    /// Position of the record in the ranked corpus.
    pub index: usize,
}

/// Inner product of two vectors. Mismatched or empty vectors score 0.
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Indices of the `top_k` best-scoring corpus vectors with their scores.
pub fn top_k_indices(query: &[f32], corpus: &[Vec<f32>], top_k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = corpus
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let score = inner_product(query, v);
            (i, if score.is_nan() { f32::NEG_INFINITY } else { score })
        })
        .collect();

    // sort_by is stable, ties stay in index order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);
    scored
}

/// Embedding-based ranker sharing one cached embedder.
#[derive(Clone)]
pub struct SemanticRanker {
    embedder: Arc<CachedEmbedder>,
}

impl SemanticRanker {
    pub fn new(embedder: Arc<CachedEmbedder>) -> Self {
        Self { embedder }
    }

    /// The shared cached embedder.
    pub fn embedder(&self) -> &Arc<CachedEmbedder> {
        &self.embedder
    }

    /// Rank `records` by the similarity of their `descriptors` to `query`.
    ///
    /// `descriptors[i]` must describe `records[i]`. Returns at most
    /// `min(top_k, descriptors.len())` entries.
    #[instrument(skip_all, fields(corpus = descriptors.len(), top_k = top_k))]
    pub async fn rank_scored(
        &self,
        query: &str,
        descriptors: &[String],
        records: &[Record],
        top_k: usize,
    ) -> Result<Vec<ScoredRecord>> {
        if descriptors.len() != records.len() {
            return Err(AshaError::Alignment(format!(
                "{} descriptors for {} records",
                descriptors.len(),
                records.len()
            )));
        }
        if descriptors.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed_query(query).await?;
        let corpus_embeddings = self.embedder.embed_corpus(descriptors).await?;

        let results: Vec<ScoredRecord> = top_k_indices(&query_embedding, &corpus_embeddings, top_k)
            .into_iter()
            .map(|(index, score)| ScoredRecord {
                record: records[index].clone(),
                score,
                index,
            })
            .collect();

        debug!("Ranked {} of {} descriptors", results.len(), descriptors.len());
        Ok(results)
    }

    /// Rank and return only the records, best first.
    pub async fn rank(
        &self,
        query: &str,
        descriptors: &[String],
        records: &[Record],
        top_k: usize,
    ) -> Result<Vec<Record>> {
        Ok(self
            .rank_scored(query, descriptors, records, top_k)
            .await?
            .into_iter()
            .map(|r| r.record)
            .collect())
    }

    /// Rank a prepared corpus.
    pub async fn rank_corpus(&self, query: &str, corpus: &Corpus, top_k: usize) -> Result<Vec<ScoredRecord>> {
        self.rank_scored(query, corpus.descriptors(), corpus.records(), top_k)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::KeywordEmbedder;
    use serde_json::json;

    fn ranker(vocab: &[&str]) -> SemanticRanker {
        let embedder = Arc::new(KeywordEmbedder::new(vocab));
        SemanticRanker::new(Arc::new(CachedEmbedder::new(embedder)))
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| json!({"id": i}).as_object().cloned().unwrap())
            .collect()
    }

    fn descriptors(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_inner_product() {
        assert_eq!(inner_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(inner_product(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(inner_product(&[], &[]), 0.0);
    }

    #[test]
    fn test_top_k_ties_keep_index_order() {
        let corpus = vec![vec![1.0], vec![2.0], vec![1.0], vec![2.0]];
        let top = top_k_indices(&[1.0], &corpus, 4);
        let order: Vec<usize> = top.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_signed_zero_scores_tie() {
        let corpus = vec![vec![-1.0, -1.0], vec![1.0, 1.0]];
        let top = top_k_indices(&[0.0, 0.0], &corpus, 2);
        let order: Vec<usize> = top.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let corpus = vec![vec![1.0], vec![f32::NAN], vec![2.0]];
        let top = top_k_indices(&[1.0], &corpus, 3);
        assert_eq!(top[0], (2, 2.0));
        assert_eq!(top[1], (0, 1.0));
        assert_eq!(top[2].0, 1);
        assert_eq!(top[2].1, f32::NEG_INFINITY);
    }

    #[tokio::test]
    async fn test_rank_orders_by_similarity() {
        let ranker = ranker(&["python", "design", "nurse"]);
        let docs = descriptors(&["Nurse in Delhi", "Python python dev", "Python designer"]);
        let recs = records(3);

        let results = ranker.rank_scored("python", &docs, &recs, 3).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].index, 1);
        assert_eq!(results[1].index, 2);
        assert_eq!(results[2].index, 0);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_rank_projects_aligned_records() {
        let ranker = ranker(&["alpha", "beta", "gamma"]);
        let docs = descriptors(&["alpha", "beta", "gamma"]);
        let recs = records(3);

        for (i, word) in ["alpha", "beta", "gamma"].iter().enumerate() {
            let top = ranker.rank(word, &docs, &recs, 1).await.unwrap();
            assert_eq!(top, vec![recs[i].clone()]);
        }
    }

    #[test]
    fn test_top_k_is_clamped() {
        let ranker = ranker(&["x"]);
        let docs = descriptors(&["x", "y"]);

        tokio_test::block_on(async {
            let results = ranker.rank("x", &docs, &records(2), 10).await.unwrap();
            assert_eq!(results.len(), 2);

            let results = ranker.rank("x", &docs, &records(2), 1).await.unwrap();
            assert_eq!(results.len(), 1);
        });
    }

    #[tokio::test]
    async fn test_empty_corpus_skips_embedding() {
        let embedder = Arc::new(KeywordEmbedder::new(&["x"]));
        let ranker = SemanticRanker::new(Arc::new(CachedEmbedder::new(embedder.clone())));

        let results = ranker.rank("x", &[], &[], 3).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_misaligned_input_is_rejected() {
        let ranker = ranker(&["x"]);
        let result = ranker.rank("x", &descriptors(&["x"]), &records(2), 1).await;
        assert!(matches!(result, Err(AshaError::Alignment(_))));
    }
}
