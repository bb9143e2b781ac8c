// ABOUTME: Error types for tag storage operations
// ABOUTME: Query, scan, exec and transaction failures, logged where they are detected

use thiserror::Error;
use tracing::error;

use crate::types::Tag;

pub type TagResult<T> = Result<T, TagError>;

/// Failures raised by [`TagStorage`](crate::TagStorage).
///
/// Read failures carry the tags collected before the failure in `partial`.
/// That list is undefined-partial: it may be empty or cut off at any row and
/// must not be treated as a complete result.
#[derive(Error, Debug)]
pub enum TagError {
    /// The store rejected or could not run a read.
    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
        partial: Vec<Tag>,
    },

    /// A result row could not be decoded into a tag.
    #[error("{context}: {source}")]
    Scan {
        context: String,
        #[source]
        source: sqlx::Error,
        partial: Vec<Tag>,
    },

    /// A write statement failed.
    #[error("{context}: {source}")]
    Exec {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// A transaction could not be started or committed.
    #[error("{context}: {source}")]
    Transaction {
        context: String,
        #[source]
        source: sqlx::Error,
    },
}

impl TagError {
    pub(crate) fn query(context: &str, source: sqlx::Error, partial: Vec<Tag>) -> Self {
        Self::Query {
            context: context.to_string(),
            source,
            partial,
        }
        .logged()
    }

    pub(crate) fn scan(context: &str, source: sqlx::Error, partial: Vec<Tag>) -> Self {
        Self::Scan {
            context: context.to_string(),
            source,
            partial,
        }
        .logged()
    }

    pub(crate) fn exec(context: &str, source: sqlx::Error) -> Self {
        Self::Exec {
            context: context.to_string(),
            source,
        }
        .logged()
    }

    pub(crate) fn transaction(context: &str, source: sqlx::Error) -> Self {
        Self::Transaction {
            context: context.to_string(),
            source,
        }
        .logged()
    }

    fn logged(self) -> Self {
        error!("{}", self);
        self
    }

    /// Tags collected before a read failed. Empty for write failures.
    pub fn partial(&self) -> &[Tag] {
        match self {
            Self::Query { partial, .. } | Self::Scan { partial, .. } => partial,
            Self::Exec { .. } | Self::Transaction { .. } => &[],
        }
    }

    pub fn into_partial(self) -> Vec<Tag> {
        match self {
            Self::Query { partial, .. } | Self::Scan { partial, .. } => partial,
            Self::Exec { .. } | Self::Transaction { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = TagError::exec("error updating tag", sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("error updating tag: "));
    }

    #[test]
    fn test_partial_only_for_reads() {
        let partial = vec![Tag::new(1, "work")];
        let err = TagError::scan("error scanning tag", sqlx::Error::RowNotFound, partial.clone());
        assert_eq!(err.partial(), partial.as_slice());
        assert_eq!(err.into_partial(), partial);

        let err = TagError::transaction("error starting transaction", sqlx::Error::PoolClosed);
        assert!(err.partial().is_empty());
    }
}
