// Shared model and helpers for the integration tests.
//
// `user_store.rs` is the output of
// `sdata-gen tests/common/mod.rs User` and is checked in as-is.

#![allow(dead_code)]

use std::path::PathBuf;

use sdata::Record;
use sdata::config::FileConfig;
use sdata::container::FileContainer;
use serde::{Deserialize, Serialize};

#[derive(Record, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[data(primary_key)]
    pub id: String,
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn new(id: &str, name: &str, age: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            age,
        }
    }
}

include!("user_store.rs");

/// Alice, Bob and Carol, in key order.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new("1", "Alice", 34),
        User::new("2", "Bob", 17),
        User::new("3", "Carol", 52),
    ]
}

/// A file container over `name` inside a fresh temporary directory. The
/// directory lives as long as the returned guard.
pub fn temp_file_container(name: &str) -> (tempfile::TempDir, PathBuf, FileContainer) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    let container = FileContainer::with_config(FileConfig::new(&path));
    (dir, path, container)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
