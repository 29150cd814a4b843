//! Thumbnail compiler.

use std::path::Path;

use image::imageops;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::loader::ImageLoader;
use crate::types::Pokedex;

use super::{write_image, Resampling};

/// Resize the pokedex thumbnail to a `size`x`size` square and write it to `output`.
pub fn compile_thumbnail(
    pokedex: &Pokedex,
    loader: &ImageLoader,
    size: u32,
    output: &Path,
    format: OutputFormat,
) -> Result<()> {
    let source = loader.load(&pokedex.thumbnail)?;
    let filter = Resampling::for_pokedex(pokedex).filter();
    let thumbnail = imageops::resize(&source, size, size, filter);
    write_image(&thumbnail, output, format)
}
