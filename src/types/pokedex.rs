//! Pokedex manifest types.
//!
//! A manifest is an authored JSON file describing one pokedex: its display
//! name, description, thumbnail and an ordered list of entry slots. Slots may
//! be `null` to reserve a position without content.
//!
//! # Example
//!
//! ```json
//! {
//!   "name": "Kanto",
//!   "description": "The original 151.",
//!   "thumbnail": "kanto.png",
//!   "uses_pixelart_graphics": true,
//!   "entries": [
//!     { "id": 1, "name": "Bulbasaur", "sprite": "https://example.com/1.png" },
//!     null
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DexError, Result};

/// Sprite drawn for entries that do not name one.
pub const PLACEHOLDER_SPRITE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/home/0.png";

/// One pokedex definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokedex {
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    /// Selects nearest-neighbour resampling for every resize of this pokedex.
    #[serde(default)]
    pub uses_pixelart_graphics: bool,
    pub entries: Vec<Option<Entry>>,
}

/// A present slot in a pokedex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub sprite: Option<String>,
    #[serde(default)]
    pub shiny: bool,
    #[serde(default)]
    pub gmax: bool,
    #[serde(default)]
    pub technical: bool,
}

impl Entry {
    /// The locator drawn for this entry, falling back to the placeholder.
    pub fn sprite_locator(&self) -> &str {
        self.sprite.as_deref().unwrap_or(PLACEHOLDER_SPRITE)
    }
}

impl Pokedex {
    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DexError::io(path, "Failed to read manifest", e))?;

        Self::parse(&content).map_err(|e| DexError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
            help: Some(
                "Manifests need name, description, thumbnail and an entries array".to_string(),
            ),
        })
    }

    /// Parse a manifest from a JSON string.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Identifier used for every output derived from this pokedex.
    pub fn name_id(&self) -> String {
        name_id(&self.name)
    }

    /// Present (non-null) entries in manifest order.
    pub fn present_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().flatten()
    }

    /// Number of non-null slots.
    pub fn num_entries(&self) -> usize {
        self.present_entries().count()
    }
}

/// Normalize a display name into a path-friendly identifier.
///
/// Lowercases and turns spaces into hyphens; nothing else is touched.
pub fn name_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
