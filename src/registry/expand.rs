//! Transform expansion of template sets.

use crate::error::Result;
use crate::parser::parse_tile;
use crate::types::Template;

/// Parse raw tile definitions into templates.
pub fn build<S: AsRef<str>>(raw_tiles: &[S]) -> Result<Vec<Template>> {
    raw_tiles.iter().map(|spec| parse_tile(spec.as_ref())).collect()
}

/// Distinct orientations of one template, identity first.
///
/// Rotations come before mirrored forms. A variant with the same grid and
/// exits as an earlier one is dropped. Single-orientation templates yield
/// only themselves.
pub fn variants(template: &Template) -> Vec<Template> {
    let mut out = vec![template.clone()];
    if template.is_single_orientation() {
        return out;
    }

    let mirrored = template.mirror_vertical();
    let candidates = (1..4)
        .map(|q| template.rotate(q))
        .chain((0..4).map(|q| mirrored.rotate(q)));
    for candidate in candidates {
        if !out.iter().any(|v| v.same_shape(&candidate)) {
            out.push(candidate);
        }
    }
    out
}

/// The base set followed by the distinct transformed variants of each tile.
pub fn expand_with_transforms(templates: Vec<Template>) -> Vec<Template> {
    let extra: Vec<Template> = templates
        .iter()
        .flat_map(|t| variants(t).into_iter().skip(1))
        .collect();
    let mut out = templates;
    out.extend(extra);
    out
}
