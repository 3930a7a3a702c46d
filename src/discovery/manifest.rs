//! Project manifest (tilegen.yaml) parsing.
//!
//! The manifest names the directories holding custom tile sets, where
//! generated levels go, and the defaults for `tilegen generate`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::themes::{Theme, ThemeConf};

/// Project manifest loaded from tilegen.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directories to scan for `*.tiles` files. Defaults to the project
    /// root if empty.
    pub tile_dirs: Vec<String>,

    /// Output directory for exported levels.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    pub defaults: GenerateDefaults,
}

/// Defaults for `tilegen generate`; command-line flags override them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateDefaults {
    pub theme: Theme,
    /// Fixed seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub conf: ThemeConf,
}

fn default_output() -> PathBuf {
    PathBuf::from("levels")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            tile_dirs: vec![],
            output: default_output(),
            excludes: vec![],
            defaults: GenerateDefaults::default(),
        }
    }
}

impl Manifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| TileError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check tilegen.yaml syntax".to_string()),
        })?;
        manifest.defaults.conf.validate()?;
        Ok(manifest)
    }

    /// Check if a path matches one of the exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes.iter().any(|p| matches_pattern(&path_str, p))
    }

    /// Tile directories, defaulting to the project root.
    pub fn effective_tile_dirs(&self) -> Vec<String> {
        if self.tile_dirs.is_empty() {
            vec![".".to_string()]
        } else {
            self.tile_dirs.clone()
        }
    }
}

/// Minimal glob support: `*.ext`, `**/dir/*`, `dir/*`, or a plain substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        return match rest.strip_suffix("/*") {
            Some(dir) => path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir)),
            None => path.contains(rest),
        };
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }
    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
    }
    path.contains(pattern)
}
