//! File system scanner for pokedex manifests.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Manifest file extension.
pub const MANIFEST_EXTENSION: &str = "json";

/// List the manifests directly inside `dir`, sorted by file name.
///
/// The scan is not recursive. A missing directory yields no manifests.
pub fn scan_manifests(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_manifest(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// Whether a path looks like a manifest file.
pub fn is_manifest(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MANIFEST_EXTENSION)
}
