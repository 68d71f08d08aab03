//! Payload encoding used by generated stores.
//!
//! Values are stored as JSON bytes. Containers treat payloads as opaque, so
//! the codec only matters to the store layer that produces and consumes them.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::container::Table;
use crate::error::{StoreError, StoreResult};

pub fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(StoreError::Encode)
}

/// Decode the payload stored under `key` in `table`. The table and key only
/// serve to identify the entry in the error.
pub fn decode<T: DeserializeOwned>(table: &str, key: &str, payload: &[u8]) -> StoreResult<T> {
    serde_json::from_slice(payload).map_err(|source| StoreError::Decode {
        table: table.to_string(),
        key: key.to_string(),
        source,
    })
}

/// Decode every entry of a table, in key order. The first failure aborts
/// the whole call and no partial result is returned.
pub fn decode_table<T: DeserializeOwned>(table: &str, entries: &Table) -> StoreResult<Vec<T>> {
    entries
        .iter()
        .map(|(key, payload)| decode(table, key, payload))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn decode_reports_the_failing_entry() {
        let err = decode::<Person>("Person", "alice", b"not json").unwrap_err();
        match err {
            StoreError::Decode { table, key, .. } => {
                assert_eq!(table, "Person");
                assert_eq!(key, "alice");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn one_bad_entry_fails_the_whole_table() {
        let mut entries = Table::new();
        let alice = Person {
            name: "Alice".to_string(),
            age: 30,
        };
        entries.insert("alice".to_string(), encode(&alice).unwrap());
        entries.insert("zed".to_string(), b"{\"name\": 1}".to_vec());

        assert!(decode_table::<Person>("Person", &entries).is_err());

        entries.remove("zed");
        assert_eq!(decode_table::<Person>("Person", &entries).unwrap(), vec![alice]);
    }
}
