//! Model loader: parses discovered tile set files into models.
//!
//! Each file becomes one model named after the file stem.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, TileError};
use crate::registry::{Model, ModelBuilder};

use super::scanner::ScanResult;

/// Options for loading tile sets.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Add rotated and mirrored variants.
    pub expand_transforms: bool,
    /// Parameter overrides applied to every file, as `(letter, glyph)`.
    pub substitutions: Vec<(char, char)>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            expand_transforms: true,
            substitutions: vec![],
        }
    }
}

/// Load one model per scanned file.
///
/// Every file is attempted; failures are collected and reported together.
pub fn load_models(scan: &ScanResult, options: &LoadOptions) -> Result<Vec<Model>> {
    let mut models = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for path in &scan.tiles {
        match load_model(path, options) {
            Ok(model) => models.push(model),
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    if !errors.is_empty() {
        return Err(TileError::Parse {
            message: format!("Failed to load {} file(s):\n  {}", errors.len(), errors.join("\n  ")),
            help: Some("Fix the errors above and try again".to_string()),
        });
    }

    Ok(models)
}

/// Load a single tile set file.
pub fn load_model(path: &Path, options: &LoadOptions) -> Result<Model> {
    let content = fs::read_to_string(path).map_err(|e| TileError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tiles".to_string());

    let mut builder = ModelBuilder::new(name);
    builder
        .add_file_source(content)
        .expand_transforms(options.expand_transforms);
    for &(letter, glyph) in &options.substitutions {
        builder.substitute(letter, glyph);
    }
    let model = builder.build()?;
    debug!("loaded model '{}' from {}", model.name(), path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const SET: &str = "name:bend\ndir:SE\nX=#\n\nXXX\nX..\nX.X\n---\nname:hall\ndir:NS\n\n#.#\n#.#\n#.#\n";

    #[test]
    fn test_load_model_named_after_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sewer.tiles");
        fs::write(&path, SET).unwrap();

        let model = load_model(&path, &LoadOptions::default()).unwrap();

        assert_eq!(model.name(), "sewer");
        assert_eq!(model.len(), 6);
    }

    #[test]
    fn test_load_with_substitution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cave.tiles");
        fs::write(&path, SET).unwrap();
        let options = LoadOptions {
            expand_transforms: false,
            substitutions: vec![('X', '^')],
        };

        let model = load_model(&path, &options).unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.find_by_name("bend").unwrap().get(0, 0), Some('^'));
        assert_eq!(model.find_by_name("hall").unwrap().get(0, 0), Some('#'));
    }

    #[test]
    fn test_load_models_collects_errors() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.tiles");
        let bad = dir.path().join("bad.tiles");
        fs::write(&good, SET).unwrap();
        fs::write(&bad, "name:broken\ndir:N\n\n###\n###\n###\n").unwrap();
        let scan = ScanResult {
            tiles: vec![bad, good, PathBuf::from("/nonexistent/x.tiles")],
        };

        let err = load_models(&scan, &LoadOptions::default()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("2 file(s)"), "{}", message);
        assert!(message.contains("bad.tiles"));
    }
}
