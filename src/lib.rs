//! dexc - Pokedex asset compiler
//!
//! A library for turning pokedex manifests into deduplicated spritesheets,
//! thumbnails and compact update records for a frontend to consume.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod types;
pub mod validation;

pub use config::{Config, OutputFormat};
pub use discovery::{discover, ManifestSet};
pub use error::{DexError, Result};
pub use loader::{Fetcher, HttpFetcher, ImageLoader};
pub use pipeline::{BuildSummary, CompiledPokedex, Compiler};
pub use record::{compile_record, GitRevision, RevisionSource};
pub use render::{compile_spritesheet, compile_thumbnail, SheetLayout, SpriteIndex};
pub use types::{CompiledEntry, CompiledRecord, Entry, Locator, Pokedex};
pub use validation::{sanity_check, Diagnostic, Severity, ValidationResult};
