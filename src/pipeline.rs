//! Build driver.
//!
//! A build sanity checks every manifest first and aborts before writing
//! anything if a check fails. Manifests are then compiled one at a time,
//! spritesheet, thumbnail, then update record; the first failure stops the
//! run.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::discovery::ManifestSet;
use crate::error::Result;
use crate::loader::ImageLoader;
use crate::record::{compile_record, GitRevision, RevisionSource};
use crate::render::{compile_spritesheet, compile_thumbnail, SheetLayout};
use crate::types::{CompiledRecord, Pokedex};
use crate::validation::{sanity_check, LoadedManifest, ValidationResult};

/// Outputs of one compiled manifest.
#[derive(Debug, Clone)]
pub struct CompiledPokedex {
    pub manifest: PathBuf,
    pub spritesheet: PathBuf,
    pub thumbnail: PathBuf,
    pub record_path: PathBuf,
    /// Distinct sprites placed in the spritesheet.
    pub sprites: usize,
    pub record: CompiledRecord,
}

/// Result of a full build.
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub compiled: Vec<CompiledPokedex>,
    /// Images downloaded during the build (cache misses).
    pub fetches: usize,
}

/// Compiles manifests into spritesheets, thumbnails and update records.
pub struct Compiler {
    config: Config,
    loader: ImageLoader,
    revisions: Box<dyn RevisionSource>,
}

impl Compiler {
    /// A compiler that downloads over HTTP and reads provenance from git.
    pub fn new(config: Config) -> Self {
        let loader = ImageLoader::new(&config.image_dir, &config.cache_dir);
        Self::with_parts(config, loader, GitRevision)
    }

    pub fn with_parts(
        config: Config,
        loader: ImageLoader,
        revisions: impl RevisionSource + 'static,
    ) -> Self {
        Self {
            config,
            loader,
            revisions: Box::new(revisions),
        }
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    /// Sanity check the manifests of a run without compiling anything.
    pub fn check(&self, set: &ManifestSet) -> (Vec<LoadedManifest>, ValidationResult) {
        sanity_check(&set.check)
    }

    /// Compile a single, already validated manifest.
    pub fn compile_one(&self, path: &Path, pokedex: &Pokedex) -> Result<CompiledPokedex> {
        let id = pokedex.name_id();
        let layout = SheetLayout::new(self.config.cell_size, self.config.sheet_columns);
        let format = self.config.image_format;

        let spritesheet = self.config.spritesheet_path(&id);
        let index = compile_spritesheet(pokedex, &self.loader, &layout, &spritesheet, format)?;

        let thumbnail = self.config.thumbnail_path(&id);
        compile_thumbnail(
            pokedex,
            &self.loader,
            self.config.thumbnail_size,
            &thumbnail,
            format,
        )?;

        let record = compile_record(pokedex, path, &index, &self.config, self.revisions.as_ref())?;

        info!(pokedex = %pokedex.name, sprites = index.len(), "compiled pokedex");
        Ok(CompiledPokedex {
            manifest: path.to_path_buf(),
            spritesheet,
            thumbnail,
            record_path: self.config.record_path(&id),
            sprites: index.len(),
            record,
        })
    }

    /// Check, then compile every manifest in `set.compile` in order.
    ///
    /// `progress` is called before each manifest is compiled.
    pub fn build(&self, set: &ManifestSet, progress: impl FnMut(&Path)) -> Result<BuildSummary> {
        let (_, result) = self.check(set);
        result.into_result()?;
        self.compile_all(&set.compile, progress)
    }

    /// Compile manifests in order without checking them first.
    ///
    /// Callers are expected to have run [`Compiler::check`].
    pub fn compile_all(
        &self,
        paths: &[PathBuf],
        mut progress: impl FnMut(&Path),
    ) -> Result<BuildSummary> {
        let fetches_before = self.loader.fetch_count();
        let mut summary = BuildSummary::default();
        for path in paths {
            progress(path);
            let pokedex = Pokedex::load(path)?;
            summary.compiled.push(self.compile_one(path, &pokedex)?);
        }
        summary.fetches = self.loader.fetch_count() - fetches_before;

        Ok(summary)
    }
}
