//! # sdata
//!
//! Typed CRUD stores for plain Rust structs, generated from the struct
//! definition and backed by a pluggable key/value container.
//!
//! The `sdata-gen` tool (crate `sdata_codegen`) reads a source file, finds
//! the requested struct and its `#[data(primary_key)]` field, and renders a
//! `{Name}Store` type. This crate is what the generated code runs against:
//!
//! - [`container`]: the [`Container`](container::Container) capability and
//!   its in-memory and JSON-file implementations
//! - [`codec`]: payload encoding of stored values
//! - [`query`]: query specifications and their execution
//! - [`Record`]: trait and derive for primary-keyed types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // src/models/user.rs
//! #[derive(sdata::Record, serde::Serialize, serde::Deserialize)]
//! pub struct User {
//!     #[data(primary_key)]
//!     pub id: String,
//!     pub name: String,
//!     pub age: u32,
//! }
//! ```
//!
//! ```text
//! $ sdata-gen src/models/user.rs User --package stores --output src/stores/user_store.rs
//! ```
//!
//! ```rust,ignore
//! use sdata::container::FileContainer;
//! use crate::stores::user_store::UserStore;
//!
//! let store = UserStore::new(FileContainer::new("users.json"));
//! store.init()?;
//! store.insert(&user)?;
//! let adults = store.select_where(|u| u.age >= 18)?;
//! let jane = store.first_or_none(|u| u.name == "Jane")?;
//! let existed = store.delete("3")?;
//! ```

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod prelude;
pub mod query;
pub mod record;

pub use error::{StoreError, StoreResult};
pub use record::Record;
pub use sdata_macros::Record;
