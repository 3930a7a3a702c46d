//! Init command implementation.
//!
//! Writes a `tilegen.yaml` manifest listing the directories that hold
//! `*.tiles` files, plus the default generation settings.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, MANIFEST_FILENAME};
use crate::error::{Result, TileError};
use crate::output::{display_path, plural, Printer};
use crate::themes::{Theme, ThemeConf};

/// Initialize a tilegen project by generating a tilegen.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing tilegen.yaml
    #[arg(long)]
    pub force: bool,
}

fn manifest_yaml(tile_dirs: &BTreeSet<String>) -> String {
    let mut yaml = String::new();

    if !(tile_dirs.is_empty() || (tile_dirs.len() == 1 && tile_dirs.contains("."))) {
        yaml.push_str("tile_dirs:\n");
        for dir in tile_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }
    yaml.push_str("output: levels\n");

    let conf = ThemeConf::default();
    yaml.push_str("defaults:\n");
    yaml.push_str(&format!("  theme: {}\n", Theme::default()));
    yaml.push_str(&format!("  tiles_x: {}\n", conf.tiles_x));
    yaml.push_str(&format!("  tiles_y: {}\n", conf.tiles_y));
    yaml.push_str(&format!("  corridor_door_thr: {}\n", conf.corridor_door_thr));
    yaml
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(TileError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;

    let mut tile_dirs = BTreeSet::new();
    for file in &discovery.scan.tiles {
        if let Some(parent) = file.parent() {
            let relative = parent.strip_prefix(&discovery.root).unwrap_or(parent);
            let dir = if relative == Path::new("") {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            };
            tile_dirs.insert(dir);
        }
    }

    fs::write(&manifest_path, manifest_yaml(&tile_dirs)).map_err(|e| TileError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !tile_dirs.is_empty() {
        let dirs: Vec<&str> = tile_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }
    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(discovery.scan.total(), "tile set", "tile sets")
        ),
    );

    Ok(())
}
