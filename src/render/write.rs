//! Image output for compiled artifacts.

use std::fs;
use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::config::OutputFormat;
use crate::error::{DexError, Result};

/// Encode an image to `path`, creating the parent directory if needed.
pub fn write_image(img: &RgbaImage, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| DexError::io(parent, "Failed to create output directory", e))?;
        }
    }

    img.save_with_format(path, format.image_format())
        .map_err(|e| DexError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(path = %path.display(), width = img.width(), height = img.height(), "wrote image");
    Ok(())
}
