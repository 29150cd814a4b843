//! Spritesheet compiler.
//!
//! Collects the distinct sprite locators of a pokedex in first-seen order,
//! lays them out on a fixed-width grid and composes them into one image.
//! A sprite's position in discovery order is its index in the sheet, so the
//! layout is a pure function of the manifest's entry order.

use std::path::Path;

use image::{imageops, RgbaImage};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::loader::ImageLoader;
use crate::types::Pokedex;

use super::{write_image, Resampling};

/// Mapping from distinct sprite locator to its spritesheet cell, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpriteIndex {
    cells: IndexMap<String, usize>,
}

impl SpriteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the sprites of a pokedex.
    ///
    /// Absent slots are skipped; entries without a sprite all share the
    /// placeholder locator.
    pub fn from_pokedex(pokedex: &Pokedex) -> Self {
        let mut index = Self::new();
        for entry in pokedex.present_entries() {
            index.insert(entry.sprite_locator());
        }
        index
    }

    /// Insert a locator if unseen and return its cell index.
    pub fn insert(&mut self, locator: &str) -> usize {
        if let Some(&idx) = self.cells.get(locator) {
            return idx;
        }
        let idx = self.cells.len();
        self.cells.insert(locator.to_string(), idx);
        idx
    }

    pub fn get(&self, locator: &str) -> Option<usize> {
        self.cells.get(locator).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate `(locator, index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.cells.iter().map(|(locator, &idx)| (locator.as_str(), idx))
    }
}

/// Fixed-width grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Cells per row; rows are added as needed.
    pub columns: u32,
}

impl SheetLayout {
    pub fn new(cell_size: (u32, u32), columns: u32) -> Self {
        Self {
            cell_width: cell_size.0,
            cell_height: cell_size.1,
            columns: columns.max(1),
        }
    }

    /// Sheet size in pixels for `count` cells.
    pub fn dimensions(&self, count: usize) -> (u32, u32) {
        let count = count as u32;
        let cols = count.min(self.columns);
        let rows = count.div_ceil(self.columns);
        (self.cell_width * cols, self.cell_height * rows)
    }

    /// Row-major `(row, column)` of a cell.
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index / self.columns, index % self.columns)
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let (row, col) = self.cell(index);
        (col * self.cell_width, row * self.cell_height)
    }
}

/// Draw every sprite of `index` into its cell.
///
/// An empty index yields a single transparent cell, since zero-sized images
/// cannot be encoded.
pub fn compose_sheet(
    index: &SpriteIndex,
    loader: &ImageLoader,
    layout: &SheetLayout,
    resampling: Resampling,
) -> Result<RgbaImage> {
    if index.is_empty() {
        return Ok(RgbaImage::new(layout.cell_width, layout.cell_height));
    }

    let (width, height) = layout.dimensions(index.len());
    let mut sheet = RgbaImage::new(width, height);
    let filter = resampling.filter();

    for (locator, idx) in index.iter() {
        let sprite = loader.load(locator)?;
        let resized = imageops::resize(&sprite, layout.cell_width, layout.cell_height, filter);
        let (x, y) = layout.cell_origin(idx);
        imageops::replace(&mut sheet, &resized, x as i64, y as i64);
        debug!(locator, idx, x, y, "placed sprite");
    }

    Ok(sheet)
}

/// Build the spritesheet of a pokedex and write it to `output`.
///
/// Returns the sprite index the update record must be built from.
pub fn compile_spritesheet(
    pokedex: &Pokedex,
    loader: &ImageLoader,
    layout: &SheetLayout,
    output: &Path,
    format: OutputFormat,
) -> Result<SpriteIndex> {
    let index = SpriteIndex::from_pokedex(pokedex);
    if index.is_empty() {
        warn!(pokedex = %pokedex.name, "pokedex has no present entries, writing an empty spritesheet");
    }

    let sheet = compose_sheet(&index, loader, layout, Resampling::for_pokedex(pokedex))?;
    write_image(&sheet, output, format)?;

    Ok(index)
}
