pub mod build;
pub mod check;
pub mod completions;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;

/// dexc - compile pokedex manifests into spritesheets and update records
#[derive(Parser, Debug)]
#[command(name = "dexc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile manifests into spritesheets, thumbnails and update records
    Build(build::BuildArgs),

    /// Sanity check manifests without compiling
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Options shared by commands that read manifests.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Manifest files (default: every manifest in the manifest directory)
    pub files: Vec<PathBuf>,

    /// Configuration file (default: ./dex.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn load_config(&self) -> Result<Config> {
        Config::discover(self.config.as_deref())
    }
}
