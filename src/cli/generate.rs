//! Generate command implementation.
//!
//! Reads generation defaults from `tilegen.yaml` when the project has one,
//! applies command-line overrides, and prints the level to stdout or writes
//! it to a file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::discovery::{find_manifest, GenerateDefaults};
use crate::error::{Result, TileError};
use crate::output::{display_path, level_summary, Printer};
use crate::spawn::BasicSpawner;
use crate::themes::{generate_theme, StartSide, Theme};
use crate::types::Level;

/// Generate a level and print it
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Theme to generate (default from tilegen.yaml, else castle)
    #[arg(long, short, value_enum)]
    pub theme: Option<Theme>,

    /// Random seed; the same seed and settings give the same level
    #[arg(long, short)]
    pub seed: Option<u64>,

    /// Grid width in tiles
    #[arg(long)]
    pub tiles_x: Option<usize>,

    /// Grid height in tiles
    #[arg(long)]
    pub tiles_y: Option<usize>,

    /// Chance that an edge corridor branches inward (0..=1)
    #[arg(long)]
    pub door_thr: Option<f64>,

    /// Where castle gates go
    #[arg(long, value_enum)]
    pub start: Option<StartSide>,

    /// Force corridors through the castle's middle row and column
    #[arg(long)]
    pub cross: bool,

    /// Number of actors to place
    #[arg(long)]
    pub actors: Option<usize>,

    /// Number of items to place
    #[arg(long)]
    pub items: Option<usize>,

    /// Print the level as JSON instead of a character map
    #[arg(long)]
    pub json: bool,

    /// Write the level to this file instead of stdout
    #[arg(long, short, conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write the level into the manifest's output directory as
    /// `<theme>-<seed>.txt` (or `.json`)
    #[arg(long)]
    pub save: bool,

    /// Project directory holding tilegen.yaml
    #[arg(long, default_value = ".")]
    pub project: PathBuf,
}

impl GenerateArgs {
    /// Merge command-line flags over the manifest defaults.
    fn resolve(&self, defaults: &GenerateDefaults) -> GenerateDefaults {
        let mut resolved = defaults.clone();
        if let Some(theme) = self.theme {
            resolved.theme = theme;
        }
        if self.seed.is_some() {
            resolved.seed = self.seed;
        }
        let conf = &mut resolved.conf;
        if let Some(n) = self.tiles_x {
            conf.tiles_x = n;
        }
        if let Some(n) = self.tiles_y {
            conf.tiles_y = n;
        }
        if let Some(thr) = self.door_thr {
            conf.corridor_door_thr = thr;
        }
        if let Some(start) = self.start {
            conf.start = start;
        }
        if self.cross {
            conf.cross = true;
        }
        if let Some(n) = self.actors {
            conf.actors = n;
        }
        if let Some(n) = self.items {
            conf.items = n;
        }
        resolved
    }
}

/// Render a level for output: a character map, or pretty JSON.
pub fn format_level(level: &Level, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(&level.export()).map_err(|e| TileError::Config {
            message: format!("Failed to serialize level: {}", e),
            help: None,
        })
    } else {
        Ok(level.map().render())
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TileError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    fs::write(path, format!("{}\n", text)).map_err(|e| TileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write level: {}", e),
    })
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let manifest = find_manifest(&args.project)?.unwrap_or_default();
    let settings = args.resolve(&manifest.defaults);
    let seed = settings.seed.unwrap_or_else(rand::random);
    let conf = settings.conf;

    printer.status(
        "Generating",
        &format!(
            "{} ({}x{} tiles, seed {})",
            settings.theme, conf.tiles_x, conf.tiles_y, seed
        ),
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut spawner = BasicSpawner::new();
    let level = generate_theme(settings.theme, &conf, &mut rng, &mut spawner)?;
    let text = format_level(&level, args.json)?;

    let target = if args.save {
        let ext = if args.json { "json" } else { "txt" };
        Some(
            args.project
                .join(&manifest.output)
                .join(format!("{}-{}.{}", settings.theme, seed, ext)),
        )
    } else {
        args.output.clone()
    };
    match target {
        Some(path) => {
            write_output(&path, &text)?;
            printer.info("Wrote", &display_path(&path));
        }
        None => println!("{}", text),
    }

    printer.success("Finished", &level_summary(&level));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::themes::ThemeConf;
    use clap::Parser;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Generate(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_manifest_defaults() {
        let args = parse(&[
            "tilegen", "generate", "--theme", "crypt", "--tiles-x", "9", "--start", "four-gates",
        ]);
        let defaults = GenerateDefaults {
            theme: Theme::Castle,
            seed: Some(3),
            conf: ThemeConf {
                tiles_y: 7,
                ..ThemeConf::default()
            },
        };

        let resolved = args.resolve(&defaults);

        assert_eq!(resolved.theme, Theme::Crypt);
        assert_eq!(resolved.seed, Some(3));
        assert_eq!((resolved.conf.tiles_x, resolved.conf.tiles_y), (9, 7));
        assert_eq!(resolved.conf.start, StartSide::FourGates);
    }

    #[test]
    fn test_generate_writes_map_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out/castle.txt");
        let args = parse(&[
            "tilegen",
            "generate",
            "--seed",
            "42",
            "--tiles-x",
            "3",
            "--tiles-y",
            "3",
            "--output",
            out.to_str().unwrap(),
            "--project",
            dir.path().to_str().unwrap(),
        ]);

        run(args, &Printer::new()).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|r| r.chars().count() == 21));
    }

    #[test]
    fn test_generate_json_uses_manifest_theme() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tilegen.yaml"),
            "defaults:\n  theme: houses\n  tiles_x: 2\n  tiles_y: 1\n  actors: 1\n  items: 0\n",
        )
        .unwrap();
        let out = dir.path().join("house.json");
        let args = parse(&[
            "tilegen",
            "generate",
            "--json",
            "--seed",
            "5",
            "-o",
            out.to_str().unwrap(),
            "--project",
            dir.path().to_str().unwrap(),
        ]);

        run(args, &Printer::new()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["name"], "house");
        assert_eq!(value["size"], serde_json::json!([14, 7]));
        assert_eq!(value["actors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_save_uses_manifest_output_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tilegen.yaml"), "output: maps\n").unwrap();
        let args = parse(&[
            "tilegen",
            "generate",
            "--theme",
            "crypt",
            "--seed",
            "8",
            "--save",
            "--project",
            dir.path().to_str().unwrap(),
        ]);

        run(args, &Printer::new()).unwrap();

        assert!(dir.path().join("maps/crypt-8.txt").exists());
    }
}
