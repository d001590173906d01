//! Public API:
//! - [`SemanticMatcher::find_top_matches`]: embed the bank (cached per session),
//!   embed the query, rank by cosine similarity, keep the top-k above threshold.
//! - [`EmbeddingsProvider`]: pluggable sentence-embedding backend.
//! - [`dedup_bank`]: collapse duplicate questions the way a question→answer map would.

mod cache;
mod embed;
pub mod errors;
mod matcher;
mod similarity;
pub mod structs;

pub use cache::{CachedEmbeddings, bank_fingerprint};
pub use embed::{EmbeddingsProvider, LlmEmbedder};
pub use errors::MatchError;
pub use matcher::{SemanticMatcher, dedup_bank};
pub use similarity::{cosine_similarity, rank_indices};
pub use structs::match_options::{DEFAULT_THRESHOLD, DEFAULT_TOP_K, MatchOptions};
pub use structs::match_result::MatchResult;
