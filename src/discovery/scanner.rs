//! File system scanner for `*.tiles` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Extension of tile set files.
pub const TILES_EXTENSION: &str = "tiles";

/// Tile set files found by a scan, sorted by path.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub tiles: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Merge another scan, keeping paths sorted and unique.
    pub fn merge(&mut self, other: ScanResult) {
        self.tiles.extend(other.tiles);
        self.tiles.sort();
        self.tiles.dedup();
    }
}

/// Whether `path` names a tile set file.
pub fn is_tiles_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TILES_EXTENSION)
}

/// Recursively scan a directory for tile set files.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() || manifest.is_excluded(path) {
            continue;
        }
        if is_tiles_file(path) {
            result.tiles.push(path.to_path_buf());
        }
    }

    result.tiles.sort();
    result
}

/// Scan each tile directory, resolving relative ones against `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };
        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_tiles_file() {
        assert!(is_tiles_file(Path::new("castle.tiles")));
        assert!(is_tiles_file(Path::new("sets/crypt.tiles")));
        assert!(!is_tiles_file(Path::new("castle.tiles.bak")));
        assert!(!is_tiles_file(Path::new("tiles")));
    }

    #[test]
    fn test_scan_nested_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sets/extra")).unwrap();
        fs::write(dir.path().join("sets/b.tiles"), "").unwrap();
        fs::write(dir.path().join("sets/extra/a.tiles"), "").unwrap();
        fs::write(dir.path().join("sets/readme.md"), "").unwrap();

        let result = scan_directory(dir.path(), &Manifest::default());

        assert_eq!(result.total(), 2);
        assert!(result.tiles.iter().all(|p| is_tiles_file(p)));
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(&dir.path().join("nope"), &Manifest::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_sources_dedups_overlap() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sets")).unwrap();
        fs::write(dir.path().join("sets/a.tiles"), "").unwrap();

        let sources = vec![".".to_string(), ".".to_string()];
        let result = scan_sources(&sources, dir.path(), &Manifest::default());

        assert_eq!(result.total(), 1);
    }
}
