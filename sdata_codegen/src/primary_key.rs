//! Primary-key resolution.
//!
//! The primary key of a struct is the one field tagged `#[data(primary_key)]`
//! (or `#[data = "primary_key"]`). The lookup is structured: the `data`
//! namespace must list the value `primary_key` exactly.

use crate::error::PrimaryKeyError;
use crate::model::{FieldDef, StructDef};

/// Attribute namespace carrying the marker.
pub const TAG_NAMESPACE: &str = "data";
/// Marker value identifying the primary key.
pub const PRIMARY_KEY_MARKER: &str = "primary_key";

pub fn is_primary_key(field: &FieldDef) -> bool {
    field.tags.contains(TAG_NAMESPACE, PRIMARY_KEY_MARKER)
}

/// The primary-key field of `target`.
///
/// Fails with `NoPrimaryKey` when no field is tagged, `AmbiguousPrimaryKey`
/// when several are, and `InvalidPrimaryKeyType` when the single tagged
/// field is not a `String`.
pub fn resolve(target: &StructDef) -> Result<&FieldDef, PrimaryKeyError> {
    resolve_index(target).map(|index| &target.fields[index])
}

/// Like [`resolve`], returning the position of the field.
pub fn resolve_index(target: &StructDef) -> Result<usize, PrimaryKeyError> {
    let tagged: Vec<usize> = target
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| is_primary_key(field))
        .map(|(index, _)| index)
        .collect();

    let index = match tagged.as_slice() {
        [] => {
            return Err(PrimaryKeyError::NoPrimaryKey {
                strukt: target.name.clone(),
            });
        }
        [index] => *index,
        several => {
            return Err(PrimaryKeyError::AmbiguousPrimaryKey {
                strukt: target.name.clone(),
                fields: several
                    .iter()
                    .map(|&i| target.fields[i].name.clone())
                    .collect(),
            });
        }
    };

    let field = &target.fields[index];
    if !field.is_string() {
        return Err(PrimaryKeyError::InvalidPrimaryKeyType {
            strukt: target.name.clone(),
            field: field.name.clone(),
            ty: field.ty.clone(),
        });
    }
    log::debug!("primary key of {} is '{}'", target.name, field.name);
    Ok(index)
}
