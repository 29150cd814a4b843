//! Core domain types for dexc.
//!
//! This module contains the data shapes flowing through the pipeline:
//! - `Pokedex` / `Entry` - authored manifests
//! - `CompiledRecord` / `CompiledEntry` - the update record written per pokedex
//! - `Locator` - remote or local image references

mod locator;
mod pokedex;
mod record;

pub use locator::{cache_key, Locator};
pub use pokedex::{name_id, Entry, Pokedex, PLACEHOLDER_SPRITE};
pub use record::{CompiledEntry, CompiledRecord};
