//! Validation checks for models and generated grids.
//!
//! Each check returns a `ValidationResult`; none of them fail outright.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::generator::TileGrid;
use crate::registry::Model;
use crate::types::{Direction, Exits};

use super::warning::{Diagnostic, ValidationResult};

/// Every exit set should have a non-fixed template, or some slots may end
/// up without a candidate.
pub fn check_exit_coverage(model: &Model) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut missing = Vec::new();
    for bits in 0..16u8 {
        let exits = Exits::from_bits_truncate(bits);
        if model.with_exits(exits).is_empty() {
            missing.push(exits.to_string());
        }
    }
    if !missing.is_empty() {
        result.push(
            Diagnostic::warning(
                "tilegen::validate::exit-coverage",
                format!(
                    "Model '{}' has no free template for exits: {}",
                    model.name(),
                    missing.join(", ")
                ),
            )
            .with_help("Constraint functions must avoid these exit sets or supply fixed pieces"),
        );
    }
    result
}

/// Two templates sharing a display name make name lookups ambiguous.
pub fn check_duplicate_names(model: &Model) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for t in model.iter() {
        *seen.entry(t.name()).or_default() += 1;
    }
    let mut dups: Vec<_> = seen.into_iter().filter(|&(_, n)| n > 1).collect();
    dups.sort();
    for (name, n) in dups {
        result.push(
            Diagnostic::error(
                "tilegen::validate::duplicate-name",
                format!("Template '{}' is defined {} times in model '{}'", name, n, model.name()),
            )
            .with_help("Rename one of the tiles"),
        );
    }
    result
}

/// Pieces a theme looks up by name must exist.
pub fn check_required_pieces(model: &Model, required: &[&str]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for name in required {
        if model.find_by_name(name).is_err() {
            result.push(
                Diagnostic::error(
                    "tilegen::validate::missing-piece",
                    format!("Model '{}' has no tile named '{}'", model.name(), name),
                )
                .with_help("Themes place this piece by name; define it in the tile set"),
            );
        }
    }
    result
}

/// Start anchors only matter on fixed start rooms.
pub fn check_start_anchors(model: &Model) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut reported = HashSet::new();
    for t in model.iter() {
        let flags = t.flags();
        let anchored = flags.start_x.is_some() || flags.start_y.is_some();
        if anchored && !flags.fixed && reported.insert(t.base_name().to_string()) {
            result.push(
                Diagnostic::warning(
                    "tilegen::validate::unused-anchor",
                    format!("Tile '{}' has start anchors but is not fixed", t.base_name()),
                )
                .with_help("Add the `fixed` flag or drop startX/startY"),
            );
        }
    }
    result
}

/// Each shared edge must be open on both sides or closed on both.
pub fn check_grid_edges(grid: &TileGrid) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (x, y, t) in grid.iter() {
        for dir in [Direction::E, Direction::S] {
            let Some((nx, ny)) = dir.step(x, y, grid.tiles_x(), grid.tiles_y()) else {
                continue;
            };
            let Some(n) = grid.get(nx, ny) else { continue };
            if t.exits().has(dir) != n.exits().has(dir.opposite()) {
                result.push(
                    Diagnostic::error(
                        "tilegen::validate::edge-mismatch",
                        format!(
                            "'{}' and '{}' at ({}, {}) disagree on their shared edge",
                            t.name(),
                            n.name(),
                            nx,
                            ny
                        ),
                    )
                    .at(x, y),
                );
            }
        }
    }
    result
}

/// Every slot holds a template.
pub fn check_grid_coverage(grid: &TileGrid) -> ValidationResult {
    let mut result = ValidationResult::new();
    for y in 0..grid.tiles_y() {
        for x in 0..grid.tiles_x() {
            if grid.get(x, y).is_none() {
                result.push(Diagnostic::error("tilegen::validate::empty-slot", "Slot is empty").at(x, y));
            }
        }
    }
    result
}

/// Free templates should not lead off the grid; only fixed pieces such as
/// gates may open outward.
pub fn check_grid_boundary(grid: &TileGrid) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (x, y, t) in grid.iter() {
        if t.flags().fixed {
            continue;
        }
        for dir in t.exits().directions() {
            if dir.step(x, y, grid.tiles_x(), grid.tiles_y()).is_none() {
                result.push(
                    Diagnostic::warning(
                        "tilegen::validate::open-boundary",
                        format!("'{}' opens {} off the grid", t.name(), dir.to_char()),
                    )
                    .at(x, y),
                );
            }
        }
    }
    result
}

/// Slots with exits that cannot be reached from the start room.
pub fn check_grid_connectivity(grid: &TileGrid) -> ValidationResult {
    let mut result = ValidationResult::new();
    let (tx, ty) = (grid.tiles_x(), grid.tiles_y());
    let mut seen = vec![false; tx * ty];
    let mut queue = VecDeque::from([grid.start()]);
    let (sx, sy) = grid.start();
    seen[sy * tx + sx] = true;

    while let Some((x, y)) = queue.pop_front() {
        let Some(t) = grid.get(x, y) else { continue };
        for dir in t.exits().directions() {
            if let Some((nx, ny)) = dir.step(x, y, tx, ty) {
                let linked = grid.get(nx, ny).is_some_and(|n| n.exits().has(dir.opposite()));
                if linked && !seen[ny * tx + nx] {
                    seen[ny * tx + nx] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    for (x, y, t) in grid.iter() {
        if !seen[y * tx + x] && !t.exits().is_empty() {
            result.push(
                Diagnostic::warning(
                    "tilegen::validate::unreachable",
                    format!("'{}' is not connected to the start room", t.name()),
                )
                .at(x, y),
            );
        }
    }
    result
}
