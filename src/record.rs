//! Update record builder.
//!
//! Turns a manifest plus its sprite index into the compact JSON record the
//! serving system imports, stamped with the revision that last touched the
//! manifest.

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{DexError, Result};
use crate::render::SpriteIndex;
use crate::types::{CompiledEntry, CompiledRecord, Pokedex};

/// Source of the provenance hash for a manifest file.
pub trait RevisionSource {
    /// The most recent revision touching `path`, or `None` if there is none.
    fn revision(&self, path: &Path) -> Option<String>;
}

/// Asks git for the last commit that touched a file.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRevision;

impl RevisionSource for GitRevision {
    fn revision(&self, path: &Path) -> Option<String> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let file = path.file_name()?;

        let output = match Command::new("git")
            .args(["rev-list", "-1", "HEAD", "--"])
            .arg(file)
            .current_dir(dir)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not run git");
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                path = %path.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git rev-list failed"
            );
            return None;
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if hash.is_empty() {
            None
        } else {
            Some(hash)
        }
    }
}

/// Build the compiled record for a pokedex.
///
/// Every present entry must find its sprite in `index`; a miss means the
/// index was not built from this pokedex and is reported as
/// [`DexError::IndexConsistency`].
pub fn build_record(
    pokedex: &Pokedex,
    index: &SpriteIndex,
    config: &Config,
    commit_hash: String,
) -> Result<CompiledRecord> {
    let entries = pokedex
        .entries
        .iter()
        .map(|slot| -> Result<Option<CompiledEntry>> {
            let Some(entry) = slot else {
                return Ok(None);
            };
            let locator = entry.sprite_locator();
            let sprite = index.get(locator).ok_or_else(|| DexError::IndexConsistency {
                pokedex: pokedex.name.clone(),
                locator: locator.to_string(),
            })?;
            Ok(Some(CompiledEntry {
                id: entry.id,
                name: entry.name.clone(),
                form: entry.form.clone(),
                sprite,
                shiny: entry.shiny,
                gmax: entry.gmax,
                technical: entry.technical,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let id = pokedex.name_id();
    Ok(CompiledRecord {
        thumbnail_url: config.thumbnail_url(&id),
        spritesheet_url: config.spritesheet_url(&id),
        id,
        name: pokedex.name.clone(),
        description: pokedex.description.clone(),
        num_entries: pokedex.num_entries(),
        commit_hash,
        entries,
    })
}

/// Serialize a record as compact JSON to `path`.
pub fn write_record(record: &CompiledRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| DexError::io(parent, "Failed to create output directory", e))?;
        }
    }

    let json = serde_json::to_string(record)
        .map_err(|e| DexError::io(path, "Failed to serialize record", e))?;
    fs::write(path, json).map_err(|e| DexError::io(path, "Failed to write record", e))?;

    info!(path = %path.display(), entries = record.entries.len(), "wrote update record");
    Ok(())
}

/// Build the record for the manifest at `manifest_path` and write it to the
/// configured location.
pub fn compile_record(
    pokedex: &Pokedex,
    manifest_path: &Path,
    index: &SpriteIndex,
    config: &Config,
    revisions: &dyn RevisionSource,
) -> Result<CompiledRecord> {
    let commit_hash = revisions.revision(manifest_path).unwrap_or_default();
    if commit_hash.is_empty() {
        warn!(path = %manifest_path.display(), "no revision found, commit_hash left empty");
    }

    let record = build_record(pokedex, index, config, commit_hash)?;
    write_record(&record, &config.record_path(&record.id))?;
    Ok(record)
}
