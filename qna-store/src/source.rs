use std::{future::Future, pin::Pin};

use crate::{errors::StoreError, pair::QnaPair};

/// Boxed `Send` future returned by [`QnaSource`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Number of stored questions scanned by autocomplete.
pub const AUTOCOMPLETE_SCAN_LIMIT: i64 = 500;

/// Read access to the Q&A bank.
///
/// Implemented by [`crate::PgQnaStore`]; tests plug in in-memory fakes.
pub trait QnaSource: Send + Sync {
    /// Every stored pair in store order.
    ///
    /// Returns [`StoreError::NoRows`] when the table is empty.
    fn fetch_all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<QnaPair>, StoreError>>;

    /// At most `limit` pairs in store order (possibly empty).
    fn fetch_limited<'a>(&'a self, limit: i64) -> BoxFuture<'a, Result<Vec<QnaPair>, StoreError>>;
}
