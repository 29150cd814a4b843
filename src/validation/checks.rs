//! Sanity checks over loaded manifests.
//!
//! Global checks take every manifest of the run; the rest look at one
//! manifest at a time. Each returns a `ValidationResult`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::types::{name_id, Pokedex};

use super::warning::{Diagnostic, ValidationResult};
use super::LoadedManifest;

/// Display names must be pairwise distinct across all manifests.
pub fn check_unique_names(manifests: &[LoadedManifest]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut by_name: BTreeMap<&str, Vec<&Path>> = BTreeMap::new();
    for m in manifests {
        by_name.entry(m.pokedex.name.as_str()).or_default().push(&m.path);
    }

    for (name, paths) in by_name {
        if paths.len() > 1 {
            result.push(
                Diagnostic::error(
                    "dexc::validate::duplicate-name",
                    format!("Pokedex name '{}' is used by {}", name, join_paths(&paths)),
                )
                .with_help("Every pokedex needs its own name"),
            );
        }
    }

    result
}

/// Distinct names must not normalize to the same output identifier.
pub fn check_unique_name_ids(manifests: &[LoadedManifest]) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut by_id: BTreeMap<String, BTreeMap<&str, Vec<&Path>>> = BTreeMap::new();
    for m in manifests {
        by_id
            .entry(name_id(&m.pokedex.name))
            .or_default()
            .entry(m.pokedex.name.as_str())
            .or_default()
            .push(&m.path);
    }

    for (id, names) in by_id {
        if names.len() > 1 {
            let listed: Vec<String> = names
                .iter()
                .map(|(name, paths)| format!("'{}' ({})", name, join_paths(paths)))
                .collect();
            result.push(
                Diagnostic::error(
                    "dexc::validate::duplicate-name-id",
                    format!(
                        "Pokedex names {} all compile to '{}'",
                        listed.join(", "),
                        id
                    ),
                )
                .with_help("Their outputs would overwrite each other; rename one of them"),
            );
        }
    }

    result
}

/// A pokedex needs at least one slot.
pub fn check_not_empty(path: &Path, pokedex: &Pokedex) -> ValidationResult {
    let mut result = ValidationResult::new();

    if pokedex.entries.is_empty() {
        result.push(
            Diagnostic::error(
                "dexc::validate::empty-pokedex",
                format!("Pokedex '{}' has no entries", pokedex.name),
            )
            .with_path(path)
            .with_help("Add at least one entry (null slots count)"),
        );
    }

    result
}

/// Numeric ids of present entries must be pairwise distinct.
pub fn check_unique_ids(path: &Path, pokedex: &Pokedex) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut by_id: BTreeMap<i64, Vec<(usize, &str)>> = BTreeMap::new();
    for (slot, entry) in pokedex.entries.iter().enumerate() {
        if let Some(entry) = entry {
            by_id.entry(entry.id).or_default().push((slot, entry.name.as_str()));
        }
    }

    for (id, uses) in by_id {
        if uses.len() > 1 {
            let listed: Vec<String> = uses
                .iter()
                .map(|(slot, name)| format!("'{}' at slot {}", name, slot))
                .collect();
            result.push(
                Diagnostic::error(
                    "dexc::validate::duplicate-id",
                    format!(
                        "Pokedex '{}': id {} is used by {}",
                        pokedex.name,
                        id,
                        listed.join(", ")
                    ),
                )
                .with_path(path),
            );
        }
    }

    result
}

/// Entries without a sprite are drawn with the placeholder glyph.
pub fn check_missing_sprites(path: &Path, pokedex: &Pokedex) -> ValidationResult {
    let mut result = ValidationResult::new();

    let missing: Vec<String> = pokedex
        .present_entries()
        .filter(|e| e.sprite.is_none())
        .map(|e| e.id.to_string())
        .collect();

    if !missing.is_empty() {
        result.push(
            Diagnostic::warning(
                "dexc::validate::missing-sprite",
                format!(
                    "Pokedex '{}': entries {} have no sprite",
                    pokedex.name,
                    missing.join(", ")
                ),
            )
            .with_path(path)
            .with_help("They will be drawn with the unknown-species placeholder"),
        );
    }

    result
}

fn join_paths(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
