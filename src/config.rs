//! Configuration for the container backends.
//!
//! Both backends are configured through builders generated by
//! `typed-builder`, with a plain constructor for the common case.

use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// How payload bytes are represented inside the JSON document written by
/// [`FileContainer`](crate::container::FileContainer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    /// Payloads are stored as standard base64 strings. Any byte sequence is
    /// accepted.
    #[default]
    Base64,
    /// Payloads are stored as plain JSON strings. Payloads must be valid
    /// UTF-8, which holds for everything produced by [`codec`](crate::codec).
    Text,
}

/// Configuration for the JSON-file backed container.
///
/// # Examples
///
/// ```
/// use sdata::config::{FileConfig, PayloadEncoding};
///
/// // Create with defaults
/// let config = FileConfig::builder()
///     .path("users.json")
///     .build();
/// assert!(config.create_if_missing);
///
/// // Customize options
/// let config = FileConfig::builder()
///     .path("/data/users.json")
///     .create_if_missing(false)
///     .encoding(PayloadEncoding::Text)
///     .build();
/// assert_eq!(config.encoding, PayloadEncoding::Text);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct FileConfig {
    /// Path to the JSON document
    #[builder(setter(into))]
    pub path: PathBuf,

    /// Whether `init` creates the document when it does not exist yet
    #[builder(default = true)]
    pub create_if_missing: bool,

    /// Representation of payload bytes inside the document
    #[builder(default)]
    pub encoding: PayloadEncoding,
}

impl FileConfig {
    /// Create a basic configuration with just a path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
            encoding: PayloadEncoding::default(),
        }
    }
}

/// Configuration for the in-memory container.
///
/// # Examples
///
/// ```
/// use sdata::config::MemoryConfig;
///
/// let config = MemoryConfig::builder()
///     .initial_tables(vec!["User".to_string()])
///     .build();
/// assert_eq!(config.initial_tables, ["User"]);
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(doc)]
pub struct MemoryConfig {
    /// Tables created up front, as if `init` had been called for each
    #[builder(default)]
    pub initial_tables: Vec<String>,
}
