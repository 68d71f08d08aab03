//! Key/value containers backing the generated stores.
//!
//! A container holds any number of named tables. Each table maps a string
//! key to an opaque byte payload. Generated stores talk to a container only
//! through the [`Container`] trait, so the backend can be swapped without
//! regenerating code:
//!
//! - [`MemoryContainer`]: tables live in a mutex-guarded map.
//! - [`FileContainer`]: tables live in a single JSON document on disk, which
//!   is read and rewritten in full on every call.
//!
//! # Table lifecycle
//!
//! - `init` creates a table if it does not exist and is otherwise a no-op.
//! - `insert` on a table that was never initialised creates it.
//! - `select` on a missing table returns an empty table.
//! - `delete` on a missing table or key reports `false`.
//!
//! Tables themselves are never dropped, only emptied entry by entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};

mod file;
mod memory;

pub use file::FileContainer;
pub use memory::MemoryContainer;

/// Contents of one table: key to payload, in ascending key order.
pub type Table = BTreeMap<String, Vec<u8>>;

/// The capability generated stores are written against.
///
/// Every method takes `&self`; implementations serialize calls internally.
pub trait Container {
    /// Short name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Create `table` if it does not exist yet.
    fn init(&self, table: &str) -> StoreResult<()>;

    /// Fetch every entry of `table`.
    fn select(&self, table: &str) -> StoreResult<Table>;

    /// Fetch the entries of `table` matching a query string.
    ///
    /// Reserved: no container implements a query language, and the default
    /// implementation always fails with [`StoreError::UnsupportedQuery`].
    fn select_query(&self, table: &str, query: &str) -> StoreResult<Table> {
        log::debug!(
            "{}: rejecting query {:?} on table '{}'",
            self.name(),
            query,
            table
        );
        Err(StoreError::UnsupportedQuery {
            container: self.name(),
            table: table.to_string(),
        })
    }

    /// Add a new entry. Fails with [`StoreError::DuplicateKey`] when `key`
    /// is already present; the existing entry is left untouched.
    fn insert(&self, table: &str, key: &str, payload: Vec<u8>) -> StoreResult<()>;

    /// Remove an entry, returning whether it existed.
    fn delete(&self, table: &str, key: &str) -> StoreResult<bool>;
}

macro_rules! impl_container_for_pointer {
    ($($ptr:ty),*) => {
        $(
            impl<C: Container + ?Sized> Container for $ptr {
                fn name(&self) -> &'static str {
                    (**self).name()
                }

                fn init(&self, table: &str) -> StoreResult<()> {
                    (**self).init(table)
                }

                fn select(&self, table: &str) -> StoreResult<Table> {
                    (**self).select(table)
                }

                fn select_query(&self, table: &str, query: &str) -> StoreResult<Table> {
                    (**self).select_query(table, query)
                }

                fn insert(&self, table: &str, key: &str, payload: Vec<u8>) -> StoreResult<()> {
                    (**self).insert(table, key, payload)
                }

                fn delete(&self, table: &str, key: &str) -> StoreResult<bool> {
                    (**self).delete(table, key)
                }
            }
        )*
    };
}

impl_container_for_pointer!(&C, Box<C>, Arc<C>);
