//! Validation of tile models and generated grids.
//!
//! Model checks look for gaps that make generation fail or behave
//! surprisingly; grid checks confirm the filler's guarantees on a finished
//! grid. Used by `tilegen validate`.

mod checks;
mod warning;

pub use checks::{
    check_duplicate_names, check_exit_coverage, check_grid_boundary, check_grid_connectivity,
    check_grid_coverage, check_grid_edges, check_required_pieces, check_start_anchors,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::generator::TileGrid;
use crate::registry::Model;
use crate::themes::required_pieces;

/// Run all model checks.
///
/// Built-in model names also get their theme's required pieces checked.
pub fn validate_model(model: &Model) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_required_pieces(model, required_pieces(model.name())));
    result.merge(checks::check_duplicate_names(model));
    result.merge(checks::check_exit_coverage(model));
    result.merge(checks::check_start_anchors(model));

    result
}

/// Run all grid checks.
pub fn validate_grid(grid: &TileGrid) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_grid_coverage(grid));
    result.merge(checks::check_grid_edges(grid));
    result.merge(checks::check_grid_boundary(grid));
    result.merge(checks::check_grid_connectivity(grid));

    result
}
