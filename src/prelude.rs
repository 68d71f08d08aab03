//! Prelude module for convenient imports.
//!
//! ```
//! use sdata::prelude::*;
//!
//! let container = MemoryContainer::new();
//! container.init("User")?;
//! assert!(container.select("User")?.is_empty());
//! # Ok::<(), StoreError>(())
//! ```

pub use crate::config::{FileConfig, MemoryConfig, PayloadEncoding};
pub use crate::container::{Container, FileContainer, MemoryContainer, Table};
pub use crate::error::{StoreError, StoreResult};
pub use crate::query::{Filter, Query, Selection};
pub use crate::Record;
