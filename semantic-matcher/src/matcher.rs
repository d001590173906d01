use std::{collections::HashMap, sync::Arc};

use qna_store::QnaPair;
use session_state::SessionStore;
use tracing::{debug, info};

use crate::{
    cache::{CachedEmbeddings, bank_fingerprint},
    embed::EmbeddingsProvider,
    errors::MatchError,
    similarity::{cosine_similarity, rank_indices},
    structs::{match_options::MatchOptions, match_result::MatchResult},
};

/// Semantic top-k matcher with a per-session cache of question embeddings.
pub struct SemanticMatcher {
    embedder: Arc<dyn EmbeddingsProvider>,
    cache: Arc<dyn SessionStore<CachedEmbeddings>>,
    opts: MatchOptions,
}

impl SemanticMatcher {
    pub fn new(
        embedder: Arc<dyn EmbeddingsProvider>,
        cache: Arc<dyn SessionStore<CachedEmbeddings>>,
        opts: MatchOptions,
    ) -> Self {
        Self {
            embedder,
            cache,
            opts,
        }
    }

    pub fn options(&self) -> MatchOptions {
        self.opts
    }

    /// Ranks `bank` against `query`.
    ///
    /// Returns up to `top_k` results scoring strictly above the threshold,
    /// best first. An empty bank returns immediately without calling the
    /// embedding backend. Question embeddings are cached under `session`
    /// and reused while the bank's question list is unchanged.
    pub async fn find_top_matches(
        &self,
        query: &str,
        bank: &[QnaPair],
        session: Option<&str>,
    ) -> Result<Vec<MatchResult>, MatchError> {
        if bank.is_empty() {
            return Ok(Vec::new());
        }

        let questions: Vec<String> = bank.iter().map(|p| p.question.clone()).collect();
        let question_vecs = self.question_embeddings(&questions, session).await?;

        let query_input = [query.to_string()];
        let query_vec = self
            .embedder
            .embed_many(&query_input)
            .await?
            .pop()
            .filter(|v| !v.is_empty())
            .ok_or(MatchError::EmptyEmbedding { got: 0, want: 1 })?;

        if let Some(q) = question_vecs.iter().find(|q| q.len() != query_vec.len()) {
            return Err(MatchError::DimensionMismatch {
                query: query_vec.len(),
                questions: q.len(),
            });
        }

        let scores: Vec<f32> = question_vecs
            .iter()
            .map(|q| cosine_similarity(&query_vec, q))
            .collect();

        let matches: Vec<MatchResult> = rank_indices(&scores)
            .into_iter()
            .take(self.opts.top_k)
            .filter(|&i| scores[i] > self.opts.threshold)
            .map(|i| MatchResult {
                question: bank[i].question.clone(),
                answer: bank[i].answer.clone(),
                score: scores[i],
            })
            .collect();

        debug!(
            bank = bank.len(),
            hits = matches.len(),
            best = matches.first().map(|m| m.score).unwrap_or(0.0),
            "find_top_matches: ranked"
        );

        Ok(matches)
    }

    /// Drops the cached question embeddings of `session`.
    pub async fn invalidate(&self, session: &str) {
        self.cache.delete(session).await;
    }

    async fn question_embeddings(
        &self,
        questions: &[String],
        session: Option<&str>,
    ) -> Result<Arc<Vec<Vec<f32>>>, MatchError> {
        let fingerprint = bank_fingerprint(questions);

        if let Some(sid) = session {
            if let Some(hit) = self.cache.get(sid).await {
                if hit.matches(&fingerprint) {
                    debug!(session = sid, "question embeddings: cache hit");
                    return Ok(hit.vectors);
                }
                info!(session = sid, "question bank changed; re-embedding");
            }
        }

        let vectors = self.embedder.embed_many(questions).await?;
        if vectors.len() != questions.len() {
            return Err(MatchError::EmptyEmbedding {
                got: vectors.len(),
                want: questions.len(),
            });
        }
        // Only uniform batches are cached.
        let want = vectors.first().map_or(0, Vec::len);
        if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != want) {
            return Err(MatchError::RaggedEmbeddings {
                index,
                len: v.len(),
                want,
            });
        }
        let vectors = Arc::new(vectors);

        if let Some(sid) = session {
            self.cache
                .put(
                    sid,
                    CachedEmbeddings {
                        fingerprint,
                        vectors: Arc::clone(&vectors),
                    },
                )
                .await;
        }

        Ok(vectors)
    }
}

/// Collapses duplicate questions: first position wins, last answer wins.
pub fn dedup_bank(pairs: Vec<QnaPair>) -> Vec<QnaPair> {
    let mut pos: HashMap<String, usize> = HashMap::with_capacity(pairs.len());
    let mut out: Vec<QnaPair> = Vec::with_capacity(pairs.len());
    for p in pairs {
        match pos.get(&p.question) {
            Some(&i) => out[i].answer = p.answer,
            None => {
                pos.insert(p.question.clone(), out.len());
                out.push(p);
            }
        }
    }
    out
}
