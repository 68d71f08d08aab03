//! In-memory representation of a parsed source file.
//!
//! ```text
//! SourceFile  (path, package)
//!   └── StructDef  (name)
//!         └── FieldDef  (name, declared type, tags, raw attribute text)
//! ```
//!
//! Field attributes are resolved once, at parse time, into [`Tags`]: a map
//! from the attribute path (its namespace) to the values listed in it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::GenerateResult;
use crate::module_path;

/// Spellings accepted as "the string type" for a declared field type.
const STRING_TYPES: &[&str] = &[
    "String",
    "std::string::String",
    "::std::string::String",
    "alloc::string::String",
    "::alloc::string::String",
];

/// A parsed source file. Owns its struct definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Name of the module the file defines (`user` for `src/models/user.rs`,
    /// `crate` for a crate root).
    pub package: String,
    /// Top-level structs, in declaration order.
    pub structs: Vec<StructDef>,
}

impl SourceFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every top-level struct called exactly `name`.
    pub fn structs_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a StructDef> + use<'a, 'n> {
        self.structs.iter().filter(move |s| s.name == name)
    }

    /// Full module path of this file inside its Cargo package, e.g.
    /// `crate::models::user`.
    pub fn import_path(&self) -> GenerateResult<String> {
        module_path::import_path(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field identifier, or its position for tuple structs (`0`, `1`, ...).
    pub name: String,
    /// Declared type as written, unresolved.
    pub ty: String,
    pub tags: Tags,
    /// Every non-doc attribute of the field, verbatim.
    pub raw_tags: Vec<String>,
}

impl FieldDef {
    /// Whether the declared type is `String`, by any of its usual paths.
    pub fn is_string(&self) -> bool {
        STRING_TYPES.contains(&self.ty.as_str())
    }
}

/// Attribute metadata of a field, keyed by namespace.
///
/// `#[data(primary_key)]` becomes `data: ["primary_key"]`,
/// `#[serde(rename = "x", skip)]` becomes `serde: ["rename=x", "skip"]` and
/// `#[data = "primary_key"]` becomes `data: ["primary_key"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeMap<String, Vec<String>>);

impl Tags {
    /// Values listed under `namespace`; empty when the namespace is absent.
    pub fn get(&self, namespace: &str) -> &[String] {
        self.0.get(namespace).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `namespace` lists exactly `value`.
    pub fn contains(&self, namespace: &str, value: &str) -> bool {
        self.get(namespace).iter().any(|v| v == value)
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.0.contains_key(namespace)
    }

    /// Append values to `namespace`, creating it if needed.
    pub fn extend<I>(&mut self, namespace: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.0.entry(namespace.into()).or_default().extend(values);
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
