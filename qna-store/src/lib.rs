//! Relational store of question/answer pairs.
//!
//! Public API:
//! - [`QnaSource`]: read access used by matching and autocomplete.
//! - [`PgQnaStore`]: PostgreSQL implementation over table `qna_pairs(question, answer)`.
//! - [`StoreError`]: distinguishes an unreachable store from a malformed query
//!   and from an empty table.

mod config;
pub mod errors;
mod pair;
mod postgres;
mod source;

pub use config::DbConfig;
pub use errors::StoreError;
pub use pair::QnaPair;
pub use postgres::PgQnaStore;
pub use source::{AUTOCOMPLETE_SCAN_LIMIT, BoxFuture, QnaSource};
