use std::sync::Arc;

/// Question embeddings computed for one session.
///
/// `fingerprint` identifies the exact ordered question list the vectors were
/// computed from; a lookup with a different bank is treated as a miss.
#[derive(Debug, Clone)]
pub struct CachedEmbeddings {
    pub fingerprint: blake3::Hash,
    pub vectors: Arc<Vec<Vec<f32>>>,
}

impl CachedEmbeddings {
    pub fn matches(&self, fingerprint: &blake3::Hash) -> bool {
        &self.fingerprint == fingerprint
    }
}

/// Order-sensitive hash of a question list.
pub fn bank_fingerprint<S: AsRef<str>>(questions: &[S]) -> blake3::Hash {
    let mut h = blake3::Hasher::new();
    h.update(&(questions.len() as u64).to_le_bytes());
    for q in questions {
        let q = q.as_ref().as_bytes();
        h.update(&(q.len() as u64).to_le_bytes());
        h.update(q);
    }
    h.finalize()
}
