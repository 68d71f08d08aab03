//! Query specifications and their execution.
//!
//! A [`Query`] is a plain value naming a table, an optional filter and
//! whether a single result is wanted. It is built in one step and handed to
//! [`execute`], which does the select, decode and filter work:
//!
//! ```
//! use sdata::codec;
//! use sdata::container::{Container, MemoryContainer};
//! use sdata::query::{self, Query};
//!
//! let container = MemoryContainer::new();
//! container.insert("Age", "a", codec::encode(&12u32).unwrap()).unwrap();
//! container.insert("Age", "b", codec::encode(&40u32).unwrap()).unwrap();
//!
//! let adults = Query::filtered("Age", |age: &u32| *age >= 18);
//! let found = query::execute(&container, &adults).unwrap().into_vec();
//! assert_eq!(found, vec![40]);
//! ```

use std::fmt;

use serde::de::DeserializeOwned;

use crate::codec;
use crate::container::Container;
use crate::error::StoreResult;

/// Predicate deciding whether a decoded value is part of a result.
pub type Filter<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// An immutable description of a select.
///
/// The filter may borrow from its environment for `'a`.
pub struct Query<'a, T> {
    table: String,
    filter: Option<Filter<'a, T>>,
    first: bool,
}

impl<'a, T> Query<'a, T> {
    pub fn new(table: impl Into<String>, filter: Option<Filter<'a, T>>, first: bool) -> Self {
        Self {
            table: table.into(),
            filter,
            first,
        }
    }

    /// Every value of `table`.
    pub fn all(table: impl Into<String>) -> Self {
        Self::new(table, None, false)
    }

    /// Every value of `table` accepted by `filter`.
    pub fn filtered<F>(table: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        Self::new(table, Some(Box::new(filter)), false)
    }

    /// The first value of `table` accepted by `filter`, or the first value
    /// at all when there is no filter.
    pub fn first(table: impl Into<String>, filter: Option<Filter<'a, T>>) -> Self {
        Self::new(table, filter, true)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn is_first(&self) -> bool {
        self.first
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Whether `value` belongs in the result. Without a filter every value
    /// does.
    pub fn matches(&self, value: &T) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(value))
    }
}

impl<T> fmt::Debug for Query<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("table", &self.table)
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("first", &self.first)
            .finish()
    }
}

/// Outcome of [`execute`], shaped by [`Query::is_first`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Many(Vec<T>),
    First(Option<T>),
}

impl<T> Selection<T> {
    /// All selected values; a single-result selection yields zero or one.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Selection::Many(values) => values,
            Selection::First(value) => value.into_iter().collect(),
        }
    }

    /// The first selected value, if any.
    pub fn into_first(self) -> Option<T> {
        match self {
            Selection::Many(values) => values.into_iter().next(),
            Selection::First(value) => value,
        }
    }
}

/// Run `query` against `container`.
///
/// Every payload of the table is decoded before filtering; a payload that
/// fails to decode fails the whole call, even for single-result queries.
/// Values come back in the container's enumeration order. An empty result
/// is not an error.
pub fn execute<C, T>(container: &C, query: &Query<'_, T>) -> StoreResult<Selection<T>>
where
    C: Container + ?Sized,
    T: DeserializeOwned,
{
    let entries = container.select(&query.table)?;
    let values: Vec<T> = codec::decode_table(&query.table, &entries)?;
    let mut selected = values.into_iter().filter(|value| query.matches(value));

    log::trace!(
        "{}: executing {:?} over {} entries",
        container.name(),
        query,
        entries.len()
    );

    Ok(if query.first {
        Selection::First(selected.next())
    } else {
        Selection::Many(selected.collect())
    })
}
