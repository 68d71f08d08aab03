use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, trace};
use serde::Serialize;

use super::{Container, Table};
use crate::config::{FileConfig, PayloadEncoding};
use crate::error::{StoreError, StoreResult};

/// On-disk shape: table name -> entry key -> encoded payload.
type Document = BTreeMap<String, BTreeMap<String, String>>;

/// Container persisting every table in one indented JSON document.
///
/// Each call takes the lock, reads the whole document, applies its change
/// and writes the whole document back before releasing the lock. The file
/// is assumed to be owned by this process; concurrent writers outside of it
/// are not detected.
#[derive(Debug, Clone)]
pub struct FileContainer {
    config: FileConfig,
    lock: Arc<Mutex<()>>,
}

impl FileContainer {
    /// Open a container on `path` with default settings.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_config(FileConfig::new(path))
    }

    pub fn with_config(config: FileConfig) -> Self {
        Self::with_lock(config, Arc::new(Mutex::new(())))
    }

    /// Open a container that serializes its calls on `lock`. Containers
    /// sharing one file within a process should share one lock.
    pub fn with_lock(config: FileConfig, lock: Arc<Mutex<()>>) -> Self {
        Self { config, lock }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// The lock this container serializes on, for handing to siblings.
    pub fn lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.lock)
    }

    fn read_document(&self) -> StoreResult<Document> {
        let bytes = match fs::read(&self.config.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::new());
        }
        // A literal `null` document is treated like an empty one.
        let document: Option<Document> =
            serde_json::from_slice(&bytes).map_err(StoreError::Document)?;
        Ok(document.unwrap_or_default())
    }

    /// Refuses to bring a missing document into existence unless the config
    /// allows it. Every write goes through here.
    fn ensure_writable(&self) -> StoreResult<()> {
        if self.config.create_if_missing || self.config.path.exists() {
            return Ok(());
        }
        Err(std::io::Error::new(
            ErrorKind::NotFound,
            format!("{} does not exist", self.config.path.display()),
        )
        .into())
    }

    fn write_document(&self, document: &Document) -> StoreResult<()> {
        self.ensure_writable()?;
        let mut bytes = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        document
            .serialize(&mut serializer)
            .map_err(StoreError::Document)?;
        fs::write(&self.config.path, &bytes)?;
        trace!(
            "FileContainer: wrote {} bytes to {}",
            bytes.len(),
            self.config.path.display()
        );
        Ok(())
    }

    fn encode_payload(&self, table: &str, key: &str, payload: Vec<u8>) -> StoreResult<String> {
        match self.config.encoding {
            PayloadEncoding::Base64 => Ok(STANDARD.encode(payload)),
            PayloadEncoding::Text => {
                String::from_utf8(payload).map_err(|e| StoreError::InvalidPayload {
                    table: table.to_string(),
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn decode_payload(&self, table: &str, key: &str, stored: String) -> StoreResult<Vec<u8>> {
        match self.config.encoding {
            PayloadEncoding::Base64 => {
                STANDARD
                    .decode(stored.as_bytes())
                    .map_err(|e| StoreError::InvalidPayload {
                        table: table.to_string(),
                        key: key.to_string(),
                        reason: e.to_string(),
                    })
            }
            PayloadEncoding::Text => Ok(stored.into_bytes()),
        }
    }
}

impl Container for FileContainer {
    fn name(&self) -> &'static str {
        "FileContainer"
    }

    fn init(&self, table: &str) -> StoreResult<()> {
        let _guard = self.lock.lock()?;
        self.ensure_writable()?;
        let mut document = self.read_document()?;
        if !document.contains_key(table) {
            debug!(
                "FileContainer: creating table '{table}' in {}",
                self.config.path.display()
            );
        }
        document.entry(table.to_string()).or_default();
        self.write_document(&document)
    }

    fn select(&self, table: &str) -> StoreResult<Table> {
        let _guard = self.lock.lock()?;
        let mut document = self.read_document()?;
        let Some(entries) = document.remove(table) else {
            return Ok(Table::new());
        };

        entries
            .into_iter()
            .map(|(key, stored)| -> StoreResult<(String, Vec<u8>)> {
                let payload = self.decode_payload(table, &key, stored)?;
                Ok((key, payload))
            })
            .collect()
    }

    fn insert(&self, table: &str, key: &str, payload: Vec<u8>) -> StoreResult<()> {
        let _guard = self.lock.lock()?;
        let mut document = self.read_document()?;
        let entries = document.entry(table.to_string()).or_default();
        if entries.contains_key(key) {
            return Err(StoreError::DuplicateKey {
                table: table.to_string(),
                key: key.to_string(),
            });
        }

        let stored = self.encode_payload(table, key, payload)?;
        entries.insert(key.to_string(), stored);
        self.write_document(&document)
    }

    fn delete(&self, table: &str, key: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock()?;
        let mut document = self.read_document()?;
        let existed = document
            .get_mut(table)
            .is_some_and(|entries| entries.remove(key).is_some());
        if existed {
            self.write_document(&document)?;
        }
        Ok(existed)
    }
}
