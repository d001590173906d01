//! Unified error types for the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Store access failures, split by what the caller can do about them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be reached (connection refused, pool timeout,
    /// TLS/auth failure, unknown database).
    #[error("Q&A store unreachable: {0}")]
    Unreachable(#[source] sqlx::Error),

    /// The store answered but rejected or could not decode the query.
    #[error("Q&A store query failed: {0}")]
    Malformed(#[source] sqlx::Error),

    /// The query succeeded and returned nothing.
    #[error("Q&A store has no rows")]
    NoRows,
}

impl StoreError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, StoreError::Unreachable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NoRows,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Protocol(_) => StoreError::Unreachable(err),
            sqlx::Error::Database(ref db) => {
                // SQLSTATE 08xxx connection exception, 28xxx auth, 3D000 unknown database.
                let connection_level = db
                    .code()
                    .map(|c| c.starts_with("08") || c.starts_with("28") || c == "3D000")
                    .unwrap_or(false);
                if connection_level {
                    StoreError::Unreachable(err)
                } else {
                    StoreError::Malformed(err)
                }
            }
            other => StoreError::Malformed(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_transport_failures_as_unreachable() {
        assert!(StoreError::from(sqlx::Error::PoolTimedOut).is_unreachable());
        assert!(StoreError::from(sqlx::Error::PoolClosed).is_unreachable());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(StoreError::from(sqlx::Error::Io(io)).is_unreachable());
    }

    #[test]
    fn classifies_row_and_column_errors() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NoRows
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::ColumnNotFound("answer".into())),
            StoreError::Malformed(_)
        ));
    }
}
