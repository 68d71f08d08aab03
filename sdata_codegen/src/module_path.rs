//! Module paths of source files inside a Cargo package.
//!
//! A generated store placed in another module has to import the type it
//! stores. The import is derived from where the source file sits in its
//! package: `<crate>/src/models/user.rs` is `crate::models::user`.

use std::fs;
use std::path::{Component, Path};

use crate::error::{GenerateError, GenerateResult};

/// Module path of the file at `path`, starting with `crate`.
///
/// The package root is the nearest ancestor directory holding a
/// `Cargo.toml`; the file must live under its `src/` directory and must not
/// be a binary target under `src/bin/`.
pub fn import_path(path: &Path) -> GenerateResult<String> {
    let fail = |reason: String| GenerateError::ImportResolution {
        path: path.to_path_buf(),
        reason,
    };

    let absolute =
        fs::canonicalize(path).map_err(|e| fail(format!("cannot canonicalize path: {e}")))?;
    let package_root = absolute
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("Cargo.toml").is_file())
        .ok_or_else(|| fail("no Cargo.toml found in any parent directory".to_string()))?;
    let src = package_root.join("src");
    let relative = absolute
        .strip_prefix(&src)
        .map_err(|_| fail(format!("file is not under {}", src.display())))?;

    module_segments(relative).map_err(fail)
}

/// `models/user.rs` -> `crate::models::user`, `models/mod.rs` ->
/// `crate::models`, `lib.rs` -> `crate`.
fn module_segments(relative: &Path) -> Result<String, String> {
    let mut segments = relative
        .components()
        .map(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .map(str::to_string)
                .ok_or_else(|| format!("non UTF-8 path component {name:?}")),
            other => Err(format!("unexpected path component {other:?}")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let file = segments.pop().ok_or("empty path")?;
    let stem = file
        .strip_suffix(".rs")
        .ok_or_else(|| format!("'{file}' is not a Rust source file"))?;
    if segments.first().is_some_and(|s| s == "bin") {
        return Err("binary targets under src/bin cannot be imported".to_string());
    }

    match stem {
        "lib" | "main" if segments.is_empty() => {}
        "mod" if segments.is_empty() => {
            return Err("src/mod.rs is not a module of the crate".to_string());
        }
        "mod" => {}
        other => segments.push(other.to_string()),
    }

    if let Some(bad) = segments
        .iter()
        .find(|s| syn::parse_str::<syn::Ident>(s).is_err())
    {
        return Err(format!("'{bad}' is not a valid module name"));
    }

    Ok(std::iter::once("crate")
        .chain(segments.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("::"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn package_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"app\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "pub struct X;\n").unwrap();
        }
        dir
    }

    #[test]
    fn maps_files_to_module_paths() {
        let dir = package_with(&[
            "src/lib.rs",
            "src/models/mod.rs",
            "src/models/user.rs",
            "src/a/b/c.rs",
        ]);
        let resolve = |file: &str| import_path(&dir.path().join(file)).unwrap();
        assert_eq!(resolve("src/lib.rs"), "crate");
        assert_eq!(resolve("src/models/mod.rs"), "crate::models");
        assert_eq!(resolve("src/models/user.rs"), "crate::models::user");
        assert_eq!(resolve("src/a/b/c.rs"), "crate::a::b::c");
    }

    #[test]
    fn rejects_files_outside_src() {
        let dir = package_with(&["tests/it.rs", "src/bin/tool.rs"]);
        assert_matches!(
            import_path(&dir.path().join("tests/it.rs")),
            Err(GenerateError::ImportResolution { .. })
        );
        let err = import_path(&dir.path().join("src/bin/tool.rs")).unwrap_err();
        assert!(err.to_string().contains("src/bin"));
    }

    #[test]
    fn rejects_names_that_are_not_identifiers() {
        let dir = package_with(&["src/my-models/user.rs", "src/type.rs"]);
        assert!(import_path(&dir.path().join("src/my-models/user.rs")).is_err());
        assert!(import_path(&dir.path().join("src/type.rs")).is_err());
    }

    #[test]
    fn missing_file_cannot_be_resolved() {
        let dir = package_with(&[]);
        assert_matches!(
            import_path(&dir.path().join("src/ghost.rs")),
            Err(GenerateError::ImportResolution { .. })
        );
    }
}
