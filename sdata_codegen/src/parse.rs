//! Source parser: turns a Rust file into a [`SourceFile`].
//!
//! Parsing is a single pass over one file with `syn`. Only top-level
//! `struct` items are collected; structs nested in inline modules, functions
//! or impl blocks are not part of the file's public surface and are skipped.
//! No type is resolved across files.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use log::{debug, trace};
use quote::ToTokens;
use syn::visit::Visit;
use syn::{Attribute, Expr, Fields, Item, ItemStruct, Lit, Meta, MetaList, Token};

use crate::error::{GenerateError, GenerateResult};
use crate::model::{FieldDef, SourceFile, StructDef, Tags};

/// Read and parse the file at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> GenerateResult<SourceFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text, path)
}

/// Parse `text` as if it had been read from `path`. The path is only used
/// for the package name and in errors.
pub fn parse_str(text: &str, path: impl AsRef<Path>) -> GenerateResult<SourceFile> {
    let path = path.as_ref();
    let file = syn::parse_file(text).map_err(|e| {
        let start = e.span().start();
        GenerateError::Syntax {
            path: path.to_path_buf(),
            line: start.line,
            column: start.column + 1,
            message: e.to_string(),
        }
    })?;

    let mut collector = StructCollector::default();
    collector.visit_file(&file);

    let source = SourceFile {
        path: path.to_path_buf(),
        package: package_name(path),
        structs: collector.structs,
    };
    debug!(
        "parsed {} (module '{}'): {} struct(s)",
        path.display(),
        source.package,
        source.structs.len()
    );
    Ok(source)
}

/// Build a [`StructDef`] from a struct's fields. Shared with the derive
/// macro, which sees a `DeriveInput` rather than a whole file.
pub fn struct_from_fields(name: impl Into<String>, fields: &Fields) -> StructDef {
    StructDef {
        name: name.into(),
        fields: fields
            .iter()
            .enumerate()
            .map(|(index, field)| FieldDef {
                name: field
                    .ident
                    .as_ref()
                    .map_or_else(|| index.to_string(), ToString::to_string),
                ty: type_text(&field.ty),
                tags: tags_of(&field.attrs),
                raw_tags: field
                    .attrs
                    .iter()
                    .filter(|attr| !is_doc(attr))
                    .map(|attr| attr.to_token_stream().to_string())
                    .collect(),
            })
            .collect(),
    }
}

#[derive(Default)]
struct StructCollector {
    structs: Vec<StructDef>,
}

impl<'ast> Visit<'ast> for StructCollector {
    // Items are not descended into, so only top-level structs are seen.
    fn visit_item(&mut self, item: &'ast Item) {
        if let Item::Struct(item) = item {
            self.visit_item_struct(item);
        }
    }

    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        let def = struct_from_fields(item.ident.to_string(), &item.fields);
        trace!("found struct {} with {} field(s)", def.name, def.fields.len());
        self.structs.push(def);
    }
}

/// `user` for `.../user.rs`, `models` for `.../models/mod.rs`, `crate` for
/// `lib.rs` and `main.rs`.
fn package_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
    match stem {
        "" | "lib" | "main" => "crate".to_string(),
        "mod" => path
            .parent()
            .and_then(Path::file_name)
            .and_then(OsStr::to_str)
            .unwrap_or("crate")
            .to_string(),
        other => other.to_string(),
    }
}

fn is_doc(attr: &Attribute) -> bool {
    attr.path().is_ident("doc")
}

fn tags_of(attrs: &[Attribute]) -> Tags {
    let mut tags = Tags::default();
    for attr in attrs.iter().filter(|attr| !is_doc(attr)) {
        let namespace = path_text(attr.path());
        let values = match &attr.meta {
            Meta::Path(_) => Vec::new(),
            Meta::NameValue(name_value) => vec![expr_text(&name_value.value)],
            Meta::List(list) => list_values(list),
        };
        tags.extend(namespace, values);
    }
    tags
}

/// Values of `#[ns(a, b = "c", d(e))]` as `["a", "b=c", "d(e)"]`. Bodies
/// that are not nested-meta syntax contribute no values; their text is
/// still kept in the raw attribute list.
fn list_values(list: &MetaList) -> Vec<String> {
    let mut values = Vec::new();
    let parsed = list.parse_nested_meta(|meta| {
        let name = path_text(&meta.path);
        if meta.input.peek(Token![=]) {
            let value: Expr = meta.value()?.parse()?;
            values.push(format!("{name}={}", expr_text(&value)));
        } else if meta.input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in meta.input);
            let inner: proc_macro2::TokenStream = content.parse()?;
            values.push(format!("{name}({inner})"));
        } else {
            values.push(name);
        }
        Ok(())
    });

    if let Err(e) = parsed {
        trace!("attribute `{}` is not nested-meta: {e}", path_text(&list.path));
        values.clear();
    }
    values
}

fn path_text(path: &syn::Path) -> String {
    normalize_tokens(&path.to_token_stream().to_string())
}

/// String literals by value, anything else by its token text.
fn expr_text(expr: &Expr) -> String {
    match expr {
        Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => s.value(),
        other => normalize_tokens(&other.to_token_stream().to_string()),
    }
}

fn type_text(ty: &syn::Type) -> String {
    normalize_tokens(&ty.to_token_stream().to_string())
}

/// Re-space token text the way types are usually written: `Vec<String>`,
/// `&'a str`, `HashMap<String, u32>`, `[u8; 32]`, `dyn Fn(u32) -> bool`.
fn normalize_tokens(raw: &str) -> String {
    const SPACED: &[&str] = &["->", "=", "+", "=>"];
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '\'';

    let mut out = String::with_capacity(raw.len());
    let mut previous: Option<&str> = None;
    for piece in raw.split_whitespace() {
        if let Some(prev) = previous {
            let joins_words = prev.ends_with(is_word) && piece.starts_with(is_word);
            let after_separator = prev.ends_with(',') || prev.ends_with(';');
            let around_operator = SPACED.contains(&piece) || SPACED.contains(&prev);
            if joins_words || after_separator || around_operator {
                out.push(' ');
            }
        }
        out.push_str(piece);
        previous = Some(piece);
    }
    out
}
