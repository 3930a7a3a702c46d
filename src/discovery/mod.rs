//! Project discovery: manifest lookup and custom tile set loading.
//!
//! A project is a directory with an optional `tilegen.yaml` manifest and any
//! number of `*.tiles` files. Without a manifest the whole directory is
//! scanned.
//!
//! # Example
//!
//! ```ignore
//! use tilegen::discovery::discover;
//!
//! let result = discover("./my-project")?;
//! println!("Found {} tile sets", result.scan.total());
//!
//! let models = result.into_models()?;
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::Model;

pub use loader::{load_model, load_models, LoadOptions};
pub use manifest::{GenerateDefaults, Manifest};
pub use scanner::{is_tiles_file, scan_directory, scan_sources, ScanResult, TILES_EXTENSION};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "tilegen.yaml";

/// Result of discovering a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    pub root: PathBuf,
    /// The loaded manifest, or the default one.
    pub manifest: Manifest,
    pub has_manifest: bool,
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Load every discovered tile set.
    pub fn into_models(self) -> Result<Vec<Model>> {
        self.into_models_with_options(&LoadOptions::default())
    }

    pub fn into_models_with_options(self, options: &LoadOptions) -> Result<Vec<Model>> {
        load_models(&self.scan, options)
    }
}

/// Load `tilegen.yaml` from `root` if it exists.
pub fn find_manifest(root: &Path) -> Result<Option<Manifest>> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        Manifest::load(&manifest_path).map(Some)
    } else {
        Ok(None)
    }
}

/// Discover a project rooted at `root`.
///
/// Reads `tilegen.yaml` if present and scans its tile directories;
/// otherwise scans all of `root`.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let found = find_manifest(&root)?;
    let has_manifest = found.is_some();
    let manifest = found.unwrap_or_default();

    let scan = scan_sources(&manifest.effective_tile_dirs(), &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover tile sets from explicit files and directories, without a
/// manifest.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest));
        } else if path.is_file() && is_tiles_file(path) {
            scan.merge(ScanResult {
                tiles: vec![path.clone()],
            });
        }
    }

    let root = paths
        .first()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}
