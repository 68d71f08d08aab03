//! Generation orchestrator: source file in, rendered store out.
//!
//! ```text
//! parse ─► find struct ─► resolve primary key ─► build context ─► render ─► write
//! ```
//!
//! Each stage fails with its own [`GenerateError`] variant and nothing is
//! written unless every stage before `write` succeeded.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use typed_builder::TypedBuilder;

use crate::error::{GenerateError, GenerateResult, TemplateError};
use crate::model::{SourceFile, StructDef};
use crate::parse;
use crate::primary_key;
use crate::template::{Template, TemplateContext};

/// Where generated code goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Stdout,
    File(PathBuf),
}

impl FromStr for Output {
    type Err = std::convert::Infallible;

    /// `stdout` and `-` select standard output, anything else is a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "stdout" | "-" => Output::Stdout,
            path => Output::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("stdout"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Inputs of one generator run.
///
/// # Examples
///
/// ```
/// use sdata_codegen::{GenerateOptions, Output};
///
/// let options = GenerateOptions::builder()
///     .source("src/models/user.rs")
///     .struct_name("User")
///     .package("stores")
///     .output(Output::File("src/stores/user_store.rs".into()))
///     .build();
/// assert_eq!(options.package.as_deref(), Some("stores"));
/// assert!(options.template.is_none());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct GenerateOptions {
    /// Rust source file declaring the struct
    #[builder(setter(into))]
    pub source: PathBuf,

    /// Name of the struct to generate a store for
    #[builder(setter(into))]
    pub struct_name: String,

    #[builder(default)]
    pub output: Output,

    /// Module the generated code is written for; defaults to the source's
    /// own module. An empty name counts as unset.
    #[builder(default, setter(strip_option, into))]
    pub package: Option<String>,

    /// Custom template file used instead of the built-in one
    #[builder(default, setter(strip_option, into))]
    pub template: Option<PathBuf>,
}

/// A rendered store, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub context: TemplateContext,
    pub code: String,
}

/// The one struct in `source` named `name`.
pub fn find_struct<'a>(source: &'a SourceFile, name: &str) -> GenerateResult<&'a StructDef> {
    if source.structs.is_empty() {
        return Err(GenerateError::NoStructs {
            path: source.path.clone(),
        });
    }

    let mut matches = source.structs_named(name);
    match (matches.next(), matches.count()) {
        (None, _) => Err(GenerateError::StructNotFound {
            name: name.to_string(),
            path: source.path.clone(),
        }),
        (Some(found), 0) => Ok(found),
        (Some(_), others) => Err(GenerateError::AmbiguousStruct {
            name: name.to_string(),
            path: source.path.clone(),
            count: others + 1,
        }),
    }
}

/// Template values for storing `target` from `source` in module `package`.
///
/// A store generated for another module refers to the type through its
/// module (`user::User`) and imports that module. Crate-root types are
/// always reachable as `crate::Name`.
///
/// The table is named after the type's full module path so same-named types
/// from different modules never share one. Sources outside a Cargo package
/// fall back to the type as spelled in the generated code.
pub fn build_context(
    source: &SourceFile,
    target: &StructDef,
    primary_key: &str,
    package: Option<&str>,
) -> GenerateResult<TemplateContext> {
    let package = package
        .filter(|p| !p.is_empty())
        .unwrap_or(source.package.as_str())
        .to_string();

    let (qualified_type, type_import) = if package == source.package {
        (target.name.clone(), String::new())
    } else if source.package == "crate" {
        (format!("crate::{}", target.name), String::new())
    } else {
        let import = source.import_path()?;
        (format!("{}::{}", source.package, target.name), import)
    };

    let table = match source.import_path() {
        Ok(module) => format!("{module}::{}", target.name),
        Err(err) => {
            debug!("table for {} falls back to '{qualified_type}': {err}", target.name);
            qualified_type.clone()
        }
    };

    Ok(TemplateContext {
        package,
        qualified_type,
        name: target.name.clone(),
        primary_key: primary_key.to_string(),
        type_import,
        table,
    })
}

/// Run every stage except writing.
pub fn render(options: &GenerateOptions) -> GenerateResult<Generated> {
    let source = parse::parse_file(&options.source)?;
    let target = find_struct(&source, &options.struct_name)?;
    let key = primary_key::resolve(target)?;
    let context = build_context(&source, target, &key.name, options.package.as_deref())?;
    debug!(
        "rendering store for {} keyed by '{}' into module '{}'",
        context.qualified_type, context.primary_key, context.package
    );

    let code = match &options.template {
        Some(path) => Template::from_file(path)?.render(&context),
        None => {
            let code = Template::default_store().render(&context);
            syn::parse_file(&code).map_err(|e| TemplateError::InvalidOutput(e.to_string()))?;
            code
        }
    };
    Ok(Generated { context, code })
}

/// Render and write to `options.output`.
pub fn generate(options: &GenerateOptions) -> GenerateResult<Generated> {
    let generated = render(options)?;
    match &options.output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(generated.code.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| GenerateError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
        Output::File(path) => write_file(path, &generated.code)?,
    }
    info!(
        "generated {}Store ({} bytes) to {}",
        generated.context.name,
        generated.code.len(),
        options.output
    );
    Ok(generated)
}

fn write_file(path: &Path, code: &str) -> GenerateResult<()> {
    fs::write(path, code).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
