// Code generated by sdata-gen for `User` (module `common`). DO NOT EDIT.
// Regenerate with: sdata-gen <source> User --package common
// Conventional file name: user_store.rs

use sdata::StoreResult;
use sdata::codec;
use sdata::container::Container;
use sdata::query::{Filter, Query, Selection};

/// Typed CRUD access to `User` values, keyed by `id`.
pub struct UserStore<C: Container> {
    container: C,
}

impl<C: Container> UserStore<C> {
    /// Table holding the values in the container.
    pub const TABLE: &'static str = "User";

    pub fn new(container: C) -> Self {
        Self { container }
    }

    pub fn table(&self) -> &'static str {
        Self::TABLE
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Create the table if it does not exist yet.
    pub fn init(&self) -> StoreResult<()> {
        self.container.init(Self::TABLE)
    }

    /// Store `value` under its `id`.
    ///
    /// Fails with `StoreError::DuplicateKey` when the key is already
    /// present; the stored value is left untouched.
    pub fn insert(&self, value: &User) -> StoreResult<()> {
        let payload = codec::encode(value)?;
        self.container
            .insert(Self::TABLE, &value.id, payload)
    }

    /// Same as [`Self::insert`].
    pub fn create(&self, value: &User) -> StoreResult<()> {
        self.insert(value)
    }

    /// Run a prepared query against the table.
    pub fn execute(&self, query: &Query<'_, User>) -> StoreResult<Selection<User>> {
        sdata::query::execute(&self.container, query)
    }

    /// Every stored value, in key order.
    pub fn select_all(&self) -> StoreResult<Vec<User>> {
        self.execute(&Query::all(Self::TABLE))
            .map(Selection::into_vec)
    }

    /// Every stored value accepted by `filter`, in key order.
    pub fn select_where<F>(&self, filter: F) -> StoreResult<Vec<User>>
    where
        F: Fn(&User) -> bool,
    {
        self.execute(&Query::filtered(Self::TABLE, filter))
            .map(Selection::into_vec)
    }

    /// The first stored value accepted by `filter`, or `None`.
    pub fn first_or_none<F>(&self, filter: F) -> StoreResult<Option<User>>
    where
        F: Fn(&User) -> bool,
    {
        let filter: Filter<'_, User> = Box::new(filter);
        self.execute(&Query::first(Self::TABLE, Some(filter)))
            .map(Selection::into_first)
    }

    /// Select by query string. No container supports this yet, so it
    /// fails with `StoreError::UnsupportedQuery`.
    pub fn select(&self, query: &str) -> StoreResult<Vec<User>> {
        let entries = self.container.select_query(Self::TABLE, query)?;
        codec::decode_table(Self::TABLE, &entries)
    }

    /// Remove the value stored under `key`, returning whether it existed.
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        self.container.delete(Self::TABLE, key)
    }
}
