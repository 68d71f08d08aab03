//! Error types for container and store operations.
//!
//! Every container call and every generated store method returns
//! `StoreResult<T>`. Container errors reach callers of a generated store
//! unchanged, so a caller can branch on the variant:
//!
//! ```
//! use sdata::container::{Container, MemoryContainer};
//! use sdata::StoreError;
//!
//! let container = MemoryContainer::new();
//! container.init("Person").unwrap();
//! container.insert("Person", "alice", b"{}".to_vec()).unwrap();
//!
//! match container.insert("Person", "alice", b"{}".to_vec()) {
//!     Err(StoreError::DuplicateKey { table, key }) => {
//!         assert_eq!((table.as_str(), key.as_str()), ("Person", "alice"));
//!     }
//!     other => panic!("expected a duplicate key error, got {other:?}"),
//! }
//! ```

use thiserror::Error;

/// Result type alias for container and store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The error type shared by containers and generated stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// `insert` was called with a key that is already present in the table.
    #[error("Key '{key}' already exists for table '{table}'")]
    DuplicateKey { table: String, key: String },

    /// Selecting by query string is reserved and no container implements it.
    #[error("Select by query string is not implemented for {container} (table '{table}')")]
    UnsupportedQuery {
        container: &'static str,
        table: String,
    },

    /// A value could not be serialized into a payload.
    #[error("Failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored payload could not be decoded as the expected type.
    #[error("Failed to decode entry '{key}' of table '{table}': {source}")]
    Decode {
        table: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A payload could not be represented in, or recovered from, the
    /// persisted layout.
    #[error("Invalid payload for entry '{key}' of table '{table}': {reason}")]
    InvalidPayload {
        table: String,
        key: String,
        reason: String,
    },

    /// The backing file does not hold a valid table document.
    #[error("Invalid table document: {0}")]
    Document(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Another thread panicked while holding the container lock.
    #[error("Container lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Whether this error reports a duplicate key on insert.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_message_names_table_and_key() {
        let err = StoreError::DuplicateKey {
            table: "Person".to_string(),
            key: "alice".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Key 'alice' already exists for table 'Person'"
        );
        assert!(err.is_duplicate_key());
    }

    #[test]
    fn unsupported_query_names_the_container() {
        let err = StoreError::UnsupportedQuery {
            container: "MemoryContainer",
            table: "User".to_string(),
        };
        assert!(err.to_string().contains("MemoryContainer"));
        assert!(!err.is_duplicate_key());
    }
}
