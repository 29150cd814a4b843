//! Check command implementation.
//!
//! Runs the sanity checks and lists every diagnostic.

use clap::Args;

use crate::discovery::discover;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::validation::sanity_check;

use super::ProjectArgs;

/// Sanity check manifests without compiling
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let config = args.project.load_config()?;
    let set = discover(&args.project.files, &config.manifest_dir)?;

    printer.status("Checking", &plural(set.check.len(), "manifest", "manifests"));
    let (_, result) = sanity_check(&set.check);
    printer.diagnostics(&result);

    result.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use crate::error::DexError;

    fn args_for(dir: &std::path::Path) -> CheckArgs {
        let config = dir.join("dex.yaml");
        fs::write(
            &config,
            format!("manifest_dir: {}\n", dir.join("pokedex").display()),
        )
        .unwrap();
        CheckArgs {
            project: ProjectArgs {
                files: vec![],
                config: Some(config),
            },
        }
    }

    #[test]
    fn test_check_passes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pokedex")).unwrap();
        fs::write(
            dir.path().join("pokedex/a.json"),
            r#"{"name": "A", "description": "", "thumbnail": "t.png", "entries": [null]}"#,
        )
        .unwrap();

        assert!(run(args_for(dir.path()), &Printer::new()).is_ok());
    }

    #[test]
    fn test_check_fails_on_duplicate_ids() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pokedex")).unwrap();
        fs::write(
            dir.path().join("pokedex/a.json"),
            r#"{"name": "A", "description": "", "thumbnail": "t.png", "entries": [
                {"id": 1, "name": "x", "sprite": "x.png"},
                {"id": 1, "name": "y", "sprite": "y.png"}
            ]}"#,
        )
        .unwrap();

        let result = run(args_for(dir.path()), &Printer::new());
        assert!(matches!(result, Err(DexError::Validation { .. })));
    }
}
