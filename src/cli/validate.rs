//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::discovery::{discover_paths, load_models, LoadOptions};
use crate::error::{Result, TileError};
use crate::generator::TileGrid;
use crate::output::{plural, Printer};
use crate::themes::{builtin_models, generate_castle, generate_crypt, generate_house, CastleConf, HouseConf};
use crate::validation::{validate_grid, validate_model, ValidationResult};

/// Check tile sets for gaps and generated grids for consistency
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Tile set files or directories (default: the built-in models)
    pub files: Vec<PathBuf>,

    /// Sample grids to generate per built-in theme and check
    #[arg(long, default_value = "4")]
    pub samples: u64,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Generate sample grids from the built-in themes with seeds `0..samples`.
pub fn sample_grids(samples: u64) -> Result<Vec<(String, TileGrid)>> {
    let mut grids = Vec::new();
    let cross = CastleConf {
        cross: true,
        ..CastleConf::default()
    };
    for seed in 0..samples {
        let mut rng = StdRng::seed_from_u64(seed);
        grids.push((format!("castle seed {}", seed), generate_castle(5, 5, &CastleConf::default(), &mut rng)?));
        grids.push((format!("castle cross seed {}", seed), generate_castle(7, 5, &cross, &mut rng)?));
        grids.push((format!("crypt seed {}", seed), generate_crypt(6, 4, &mut rng)?));
        grids.push((format!("house seed {}", seed), generate_house(3, 2, HouseConf::default(), &mut rng)?));
    }
    Ok(grids)
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let mut result = ValidationResult::new();

    if args.files.is_empty() {
        for model in builtin_models()? {
            printer.status("Checking", &format!("model {}", model.name()));
            result.merge(validate_model(model));
        }
        let grids = sample_grids(args.samples)?;
        if !grids.is_empty() {
            printer.status("Checking", &plural(grids.len(), "sample grid", "sample grids"));
        }
        for (_, grid) in &grids {
            result.merge(validate_grid(grid));
        }
    } else {
        let discovery = discover_paths(&args.files)?;
        for model in load_models(&discovery.scan, &LoadOptions::default())? {
            printer.status("Checking", &format!("model {}", model.name()));
            result.merge(validate_model(&model));
        }
    }

    printer.diagnostics(&result);

    let failed = result.has_errors() || (args.strict && result.has_warnings());
    if failed {
        return Err(TileError::Config {
            message: format!(
                "Validation failed with {} and {}",
                plural(result.error_count(), "error", "errors"),
                plural(result.warning_count(), "warning", "warnings")
            ),
            help: args
                .strict
                .then(|| "Warnings count as errors under --strict".to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sample_grids_are_clean() {
        for (label, grid) in sample_grids(3).unwrap() {
            let result = validate_grid(&grid);
            assert!(result.is_ok(), "{}: {:?}\n{}", label, result, grid.layout());
        }
    }

    #[test]
    fn test_validate_builtins_passes() {
        let args = ValidateArgs {
            files: vec![],
            samples: 1,
            strict: false,
        };
        run(args, &Printer::new()).unwrap();
    }

    #[test]
    fn test_validate_builtins_passes_strict() {
        let args = ValidateArgs {
            files: vec![],
            samples: 6,
            strict: true,
        };
        run(args, &Printer::new()).unwrap();
    }

    #[test]
    fn test_strict_fails_on_coverage_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("halls.tiles");
        fs::write(&path, "name:hall\ndir:NS\n\n#.#\n#.#\n#.#\n").unwrap();

        let lenient = ValidateArgs {
            files: vec![path.clone()],
            samples: 0,
            strict: false,
        };
        run(lenient, &Printer::new()).unwrap();

        let strict = ValidateArgs {
            files: vec![path],
            samples: 0,
            strict: true,
        };
        assert!(run(strict, &Printer::new()).is_err());
    }
}
