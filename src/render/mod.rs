//! Rendering module for dexc.
//!
//! This module turns pokedex manifests into images: the deduplicated
//! spritesheet and the square thumbnail.

mod sheet;
mod thumbnail;
mod write;

use image::imageops::FilterType;

use crate::types::Pokedex;

pub use sheet::{compile_spritesheet, compose_sheet, SheetLayout, SpriteIndex};
pub use thumbnail::compile_thumbnail;
pub use write::write_image;

/// Resampling filter used for every resize of one pokedex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resampling {
    /// Hard pixel edges, for pixel-art sprites.
    Nearest,
    /// Smooth cubic interpolation.
    Bicubic,
}

impl Resampling {
    pub fn for_pokedex(pokedex: &Pokedex) -> Self {
        if pokedex.uses_pixelart_graphics {
            Resampling::Nearest
        } else {
            Resampling::Bicubic
        }
    }

    pub fn filter(self) -> FilterType {
        match self {
            Resampling::Nearest => FilterType::Nearest,
            Resampling::Bicubic => FilterType::CatmullRom,
        }
    }
}
