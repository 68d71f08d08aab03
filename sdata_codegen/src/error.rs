//! Errors raised while generating a store.
//!
//! Every variant names the stage that failed (`parse`, `lookup`,
//! `primary key`, `template`, `import path`, `output`), so the first line
//! printed by the CLI is enough to tell where a run stopped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// The source file could not be read.
    #[error("parse: cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source file is not valid Rust.
    #[error("parse: {}:{line}:{column}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("parse: no struct definitions found in {}", path.display())]
    NoStructs { path: PathBuf },

    #[error("lookup: no struct named '{name}' found in {}", path.display())]
    StructNotFound { name: String, path: PathBuf },

    #[error("lookup: {count} structs named '{name}' found in {}", path.display())]
    AmbiguousStruct {
        name: String,
        path: PathBuf,
        count: usize,
    },

    #[error("primary key: {0}")]
    PrimaryKey(PrimaryKeyError),

    #[error("template: {0}")]
    Template(TemplateError),

    /// The module path of the source file, needed to reference its type
    /// from another module, could not be computed.
    #[error("import path: cannot resolve the module of {}: {reason}", path.display())]
    ImportResolution { path: PathBuf, reason: String },

    /// The destination could not be opened or written.
    #[error("output: cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<PrimaryKeyError> for GenerateError {
    fn from(err: PrimaryKeyError) -> Self {
        GenerateError::PrimaryKey(err)
    }
}

impl From<TemplateError> for GenerateError {
    fn from(err: TemplateError) -> Self {
        GenerateError::Template(err)
    }
}

/// Why a struct has no usable primary key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKeyError {
    #[error("no field of struct '{strukt}' is tagged with `#[data(primary_key)]`")]
    NoPrimaryKey { strukt: String },

    #[error(
        "multiple fields of struct '{strukt}' are tagged with `#[data(primary_key)]`: {}",
        fields.join(", ")
    )]
    AmbiguousPrimaryKey { strukt: String, fields: Vec<String> },

    #[error("primary key field '{strukt}.{field}' must be of type `String`, found `{ty}`")]
    InvalidPrimaryKeyType {
        strukt: String,
        field: String,
        ty: String,
    },
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed action or unbalanced block.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown variable '{name}'")]
    UnknownVariable { line: usize, name: String },

    /// The built-in template produced text that does not parse as Rust.
    #[error("rendered output is not valid Rust: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_their_stage() {
        let err = GenerateError::from(PrimaryKeyError::NoPrimaryKey {
            strukt: "User".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "primary key: no field of struct 'User' is tagged with `#[data(primary_key)]`"
        );

        let err = GenerateError::from(TemplateError::UnknownVariable {
            line: 3,
            name: "nope".to_string(),
        });
        assert_eq!(err.to_string(), "template: line 3: unknown variable 'nope'");
    }

    #[test]
    fn ambiguous_key_lists_every_field() {
        let err = PrimaryKeyError::AmbiguousPrimaryKey {
            strukt: "User".to_string(),
            fields: vec!["id".to_string(), "email".to_string()],
        };
        assert!(err.to_string().ends_with(": id, email"));
    }
}
