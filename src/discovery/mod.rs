//! Manifest discovery.
//!
//! Decides which manifests a run compiles and which it sanity checks. The
//! check always covers the whole manifest directory, so global invariants
//! such as unique names hold even when only a few files are compiled.

mod scanner;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{DexError, Result};

pub use scanner::{is_manifest, scan_manifests, MANIFEST_EXTENSION};

/// The manifests involved in one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestSet {
    /// Manifests to compile, in order.
    pub compile: Vec<PathBuf>,
    /// Manifests to sanity check: the manifest directory plus explicit paths.
    pub check: Vec<PathBuf>,
}

/// Resolve the manifests for a run.
///
/// With no explicit paths every manifest in `manifest_dir` is compiled.
/// Explicit paths must exist.
pub fn discover(explicit: &[PathBuf], manifest_dir: &Path) -> Result<ManifestSet> {
    for path in explicit {
        if !path.is_file() {
            return Err(DexError::Io {
                path: path.clone(),
                message: "Manifest not found".to_string(),
            });
        }
    }

    let in_dir = scan_manifests(manifest_dir);
    let compile = if explicit.is_empty() {
        in_dir.clone()
    } else {
        explicit.to_vec()
    };

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut check = Vec::new();
    for path in in_dir.iter().chain(explicit) {
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            check.push(path.clone());
        }
    }

    Ok(ManifestSet { compile, check })
}
