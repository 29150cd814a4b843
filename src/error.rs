use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for dexc operations
#[derive(Error, Diagnostic, Debug)]
pub enum DexError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(dexc::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error in {path}: {message}")]
    #[diagnostic(code(dexc::parse))]
    Parse {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Sanity check failed: {message}")]
    #[diagnostic(code(dexc::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to fetch {locator}: {message}")]
    #[diagnostic(
        code(dexc::fetch),
        help("Network errors are not retried; re-run the build, cached images are reused")
    )]
    Fetch { locator: String, message: String },

    #[error("Image '{locator}' not found at {path}")]
    #[diagnostic(code(dexc::missing_image))]
    MissingImage { locator: String, path: PathBuf },

    #[error("Failed to decode image '{locator}': {message}")]
    #[diagnostic(code(dexc::decode))]
    Decode { locator: String, message: String },

    #[error("Sprite '{locator}' of pokedex '{pokedex}' has no spritesheet index")]
    #[diagnostic(
        code(dexc::index),
        help("This is a bug in sprite deduplication, not in the manifest")
    )]
    IndexConsistency { pokedex: String, locator: String },

    #[error("Failed to write image {path}: {message}")]
    #[diagnostic(code(dexc::encode))]
    Encode { path: PathBuf, message: String },
}

impl DexError {
    /// Wrap an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, context: &str, err: impl std::fmt::Display) -> Self {
        DexError::Io {
            path: path.into(),
            message: format!("{}: {}", context, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
