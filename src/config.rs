//! Project configuration (dex.yaml) parsing.
//!
//! Every field has a default matching the conventional project layout, so
//! the file is optional. The configuration also owns output naming: the
//! compilers and the record builder all derive their paths and URLs here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DexError, Result};

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "dex.yaml";

/// Encoded format of the spritesheet and thumbnail images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Avif,
    Png,
    Webp,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Avif => "avif",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Avif => image::ImageFormat::Avif,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

/// Build configuration loaded from dex.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for `*.json` manifests.
    pub manifest_dir: PathBuf,

    /// Root for local (non-URL) image locators.
    pub image_dir: PathBuf,

    /// Persistent download cache.
    pub cache_dir: PathBuf,

    /// Where spritesheets and thumbnails are written.
    pub public_image_dir: PathBuf,

    /// Where compiled update records are written.
    pub compiled_dir: PathBuf,

    /// URL prefix under which `public_image_dir` is served.
    pub image_url_prefix: String,

    /// Spritesheet cell size in pixels (width, height).
    pub cell_size: (u32, u32),

    /// Maximum number of cells per spritesheet row.
    pub sheet_columns: u32,

    /// Edge length of the square thumbnail.
    pub thumbnail_size: u32,

    pub image_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_dir: PathBuf::from("data/pokedex"),
            image_dir: PathBuf::from("data/images"),
            cache_dir: PathBuf::from(".cache/images"),
            public_image_dir: PathBuf::from("public/images"),
            compiled_dir: PathBuf::from("data/compiled"),
            image_url_prefix: "/image".to_string(),
            cell_size: (64, 64),
            sheet_columns: 64,
            thumbnail_size: 128,
            image_format: OutputFormat::Avif,
        }
    }
}

impl Config {
    /// Load configuration from a dex.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DexError::io(path, "Failed to read config", e))?;

        Self::parse(&content).map_err(|message| DexError::Parse {
            path: path.to_path_buf(),
            message,
            help: Some("Check dex.yaml syntax".to_string()),
        })
    }

    /// Load `path` if given, else dex.yaml in the working directory if present,
    /// else the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_FILENAME);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        // An empty document deserializes to unit, not an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.cell_size.0 == 0 || self.cell_size.1 == 0 {
            return Err(format!(
                "cell_size must be non-zero, got {}x{}",
                self.cell_size.0, self.cell_size.1
            ));
        }
        if self.sheet_columns == 0 {
            return Err("sheet_columns must be at least 1".to_string());
        }
        if self.thumbnail_size == 0 {
            return Err("thumbnail_size must be non-zero".to_string());
        }
        Ok(())
    }

    fn spritesheet_file(&self, name_id: &str) -> String {
        format!("{}-spritesheet.{}", name_id, self.image_format.extension())
    }

    fn thumbnail_file(&self, name_id: &str) -> String {
        format!("{}-thumbnail.{}", name_id, self.image_format.extension())
    }

    pub fn spritesheet_path(&self, name_id: &str) -> PathBuf {
        self.public_image_dir.join(self.spritesheet_file(name_id))
    }

    pub fn thumbnail_path(&self, name_id: &str) -> PathBuf {
        self.public_image_dir.join(self.thumbnail_file(name_id))
    }

    pub fn record_path(&self, name_id: &str) -> PathBuf {
        self.compiled_dir.join(format!("{}.json", name_id))
    }

    pub fn spritesheet_url(&self, name_id: &str) -> String {
        format!(
            "{}/{}",
            self.image_url_prefix.trim_end_matches('/'),
            self.spritesheet_file(name_id)
        )
    }

    pub fn thumbnail_url(&self, name_id: &str) -> String {
        format!(
            "{}/{}",
            self.image_url_prefix.trim_end_matches('/'),
            self.thumbnail_file(name_id)
        )
    }
}
