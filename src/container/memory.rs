use std::collections::BTreeMap;
use std::sync::Mutex;

use log::{debug, trace};

use super::{Container, Table};
use crate::config::MemoryConfig;
use crate::error::{StoreError, StoreResult};

/// Container keeping every table in memory behind one mutex.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    tables: Mutex<BTreeMap<String, Table>>,
}

impl MemoryContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container with the tables named in `config` already
    /// initialised.
    pub fn with_config(config: MemoryConfig) -> Self {
        let tables = config
            .initial_tables
            .into_iter()
            .map(|name| (name, Table::new()))
            .collect();
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Snapshot of every table.
    pub fn tables(&self) -> StoreResult<BTreeMap<String, Table>> {
        Ok(self.tables.lock()?.clone())
    }

    /// Number of entries in `table`, zero when the table does not exist.
    pub fn len(&self, table: &str) -> StoreResult<usize> {
        Ok(self.tables.lock()?.get(table).map_or(0, Table::len))
    }
}

impl Container for MemoryContainer {
    fn name(&self) -> &'static str {
        "MemoryContainer"
    }

    fn init(&self, table: &str) -> StoreResult<()> {
        let mut tables = self.tables.lock()?;
        if !tables.contains_key(table) {
            debug!("MemoryContainer: creating table '{table}'");
            tables.insert(table.to_string(), Table::new());
        }
        Ok(())
    }

    fn select(&self, table: &str) -> StoreResult<Table> {
        let tables = self.tables.lock()?;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    fn insert(&self, table: &str, key: &str, payload: Vec<u8>) -> StoreResult<()> {
        let mut tables = self.tables.lock()?;
        let entries = tables.entry(table.to_string()).or_default();
        if entries.contains_key(key) {
            return Err(StoreError::DuplicateKey {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
        trace!("MemoryContainer: insert '{key}' into '{table}'");
        entries.insert(key.to_string(), payload);
        Ok(())
    }

    fn delete(&self, table: &str, key: &str) -> StoreResult<bool> {
        let mut tables = self.tables.lock()?;
        let existed = tables
            .get_mut(table)
            .is_some_and(|entries| entries.remove(key).is_some());
        trace!("MemoryContainer: delete '{key}' from '{table}' (existed: {existed})");
        Ok(existed)
    }
}
