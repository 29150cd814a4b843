//! Compiled update record types.
//!
//! The record is the JSON artifact the serving system imports. It mirrors the
//! manifest but replaces every sprite locator by its spritesheet index.

use serde::{Deserialize, Serialize};

/// The compiled form of one pokedex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub num_entries: usize,
    pub thumbnail_url: String,
    pub spritesheet_url: String,
    /// Last revision that touched the manifest, empty when unknown.
    pub commit_hash: String,
    pub entries: Vec<Option<CompiledEntry>>,
}

/// A present slot with its sprite resolved to a spritesheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledEntry {
    pub id: i64,
    pub name: String,
    pub form: Option<String>,
    pub sprite: usize,
    pub shiny: bool,
    pub gmax: bool,
    pub technical: bool,
}
