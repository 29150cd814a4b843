//! Build command implementation.
//!
//! Sanity checks the manifests, then compiles each into a spritesheet,
//! thumbnail and update record.

use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, OutputFormat};
use crate::discovery::discover;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{BuildSummary, Compiler};

use super::ProjectArgs;

/// Compile manifests into spritesheets, thumbnails and update records
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Image download cache directory
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Output image format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl BuildArgs {
    fn config(&self) -> Result<Config> {
        let mut config = self.project.load_config()?;
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = cache_dir.clone();
        }
        if let Some(format) = self.format {
            config.image_format = format;
        }
        Ok(config)
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let config = args.config()?;
    let set = discover(&args.project.files, &config.manifest_dir)?;
    if set.compile.is_empty() {
        printer.warning(
            "Skipping",
            &format!("no manifests in {}", display_path(&config.manifest_dir)),
        );
        return Ok(());
    }

    let compiler = Compiler::new(config);

    printer.status("Checking", &plural(set.check.len(), "manifest", "manifests"));
    let (_, result) = compiler.check(&set);
    if !result.is_ok() {
        printer.diagnostics(&result);
    }
    result.into_result()?;

    let summary = compiler.compile_all(&set.compile, |path| {
        printer.status("Compiling", &display_path(path));
    })?;
    report(&summary, printer);

    Ok(())
}

fn report(summary: &BuildSummary, printer: &Printer) {
    for out in &summary.compiled {
        printer.info(
            "Wrote",
            &format!(
                "{} {}",
                display_path(&out.spritesheet),
                printer.dim(&format!("({})", plural(out.sprites, "sprite", "sprites")))
            ),
        );
        printer.info("Wrote", &display_path(&out.thumbnail));
        printer.info(
            "Wrote",
            &format!(
                "{} {}",
                display_path(&out.record_path),
                printer.dim(&format!(
                    "({} from {})",
                    plural(out.record.num_entries, "entry", "entries"),
                    display_path(&out.manifest)
                ))
            ),
        );
    }

    printer.status(
        "Finished",
        &format!(
            "{} ({} downloaded)",
            plural(summary.compiled.len(), "pokedex", "pokedexes"),
            plural(summary.fetches, "image", "images")
        ),
    );
}
