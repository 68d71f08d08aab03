//! # sdata_codegen
//!
//! Generates typed CRUD stores from Rust struct definitions.
//!
//! Given a source file and a struct name, the generator:
//!
//! 1. parses the file with `syn` and collects its top-level structs
//!    ([`parse`], [`model`]);
//! 2. finds the one field tagged `#[data(primary_key)]`, which must be a
//!    `String` ([`primary_key`]);
//! 3. renders a store wrapper from a template ([`template`]);
//! 4. writes it to standard output or a file ([`generate`]).
//!
//! The generated code depends only on the `sdata` runtime crate.
//!
//! ```no_run
//! use sdata_codegen::{GenerateOptions, Output, generate};
//!
//! let options = GenerateOptions::builder()
//!     .source("src/models/user.rs")
//!     .struct_name("User")
//!     .package("stores")
//!     .output(Output::File("src/stores/user_store.rs".into()))
//!     .build();
//! generate(&options)?;
//! # Ok::<(), sdata_codegen::GenerateError>(())
//! ```

pub mod error;
pub mod generate;
pub mod model;
pub mod module_path;
pub mod parse;
pub mod primary_key;
pub mod template;

pub use error::{GenerateError, GenerateResult, PrimaryKeyError, TemplateError};
pub use generate::{GenerateOptions, Generated, Output, generate, render};
pub use model::{FieldDef, SourceFile, StructDef, Tags};
pub use template::{Template, TemplateContext};
