//! Sanity checking for pokedex manifests.
//!
//! Runs before any compilation work: every manifest is parsed and checked,
//! and all problems are collected so they can be reported together. Used by
//! both `dexc check` and `dexc build`.

mod checks;
mod warning;

use std::path::{Path, PathBuf};

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::types::Pokedex;

/// A manifest that parsed successfully, with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub pokedex: Pokedex,
}

/// Parse every manifest, recording parse failures as diagnostics.
pub fn load_manifests(paths: &[PathBuf]) -> (Vec<LoadedManifest>, ValidationResult) {
    let mut result = ValidationResult::new();
    let mut manifests = Vec::with_capacity(paths.len());

    for path in paths {
        match Pokedex::load(path) {
            Ok(pokedex) => manifests.push(LoadedManifest {
                path: path.clone(),
                pokedex,
            }),
            Err(e) => result.push(
                Diagnostic::error("dexc::validate::parse", e.to_string()).with_path(path),
            ),
        }
    }

    (manifests, result)
}

/// Run all checks against a set of parsed manifests.
pub fn validate_manifests(manifests: &[LoadedManifest]) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_unique_names(manifests));
    result.merge(checks::check_unique_name_ids(manifests));

    for m in manifests {
        result.merge(validate_one(&m.path, &m.pokedex));
    }

    result
}

fn validate_one(path: &Path, pokedex: &Pokedex) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.merge(checks::check_not_empty(path, pokedex));
    result.merge(checks::check_unique_ids(path, pokedex));
    result.merge(checks::check_missing_sprites(path, pokedex));
    result
}

/// Load and check every manifest in `paths`.
pub fn sanity_check(paths: &[PathBuf]) -> (Vec<LoadedManifest>, ValidationResult) {
    let (manifests, mut result) = load_manifests(paths);
    result.merge(validate_manifests(&manifests));
    (manifests, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, file: &str, content: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sanity_check_clean_directory() {
        let dir = tempdir().unwrap();
        let paths = vec![
            write(
                dir.path(),
                "a.json",
                r#"{"name": "A", "description": "", "thumbnail": "t.png",
                    "entries": [{"id": 1, "name": "x", "sprite": "x.png"}]}"#,
            ),
            write(
                dir.path(),
                "b.json",
                r#"{"name": "B", "description": "", "thumbnail": "t.png",
                    "entries": [{"id": 1, "name": "x", "sprite": "x.png"}]}"#,
            ),
        ];

        let (manifests, result) = sanity_check(&paths);

        assert_eq!(manifests.len(), 2);
        assert!(result.is_ok());
    }

    #[test]
    fn test_sanity_check_reports_every_problem() {
        let dir = tempdir().unwrap();
        let paths = vec![
            write(
                dir.path(),
                "a.json",
                r#"{"name": "Same", "description": "", "thumbnail": "t.png", "entries": []}"#,
            ),
            write(
                dir.path(),
                "b.json",
                r#"{"name": "Same", "description": "", "thumbnail": "t.png", "entries": [
                    {"id": 2, "name": "x", "sprite": "x.png"},
                    {"id": 2, "name": "y", "sprite": "y.png"}
                ]}"#,
            ),
            write(dir.path(), "c.json", r#"{"name": "Broken""#),
        ];

        let (manifests, result) = sanity_check(&paths);

        assert_eq!(manifests.len(), 2);
        let codes: Vec<&str> = result.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "dexc::validate::parse",
                "dexc::validate::duplicate-name",
                "dexc::validate::empty-pokedex",
                "dexc::validate::duplicate-id",
            ]
        );
        assert!(result.into_result().is_err());
    }
}
