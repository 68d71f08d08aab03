//! Types whose values are keyed by a string primary key.

/// A value stored under the string held in its primary-key field.
///
/// Normally implemented with `#[derive(Record)]`, which also makes the
/// `#[data(primary_key)]` field attribute available:
///
/// ```
/// use sdata::Record;
///
/// #[derive(Record)]
/// pub struct User {
///     #[data(primary_key)]
///     pub id: String,
///     pub name: String,
/// }
///
/// let user = User { id: "1".into(), name: "John".into() };
/// assert_eq!(user.primary_key(), "1");
/// ```
pub trait Record {
    /// The value of the primary-key field.
    fn primary_key(&self) -> &str;
}
