//! Template registry for tile models.
//!
//! A `Model` is a named, immutable collection of templates sharing one tile
//! size. Templates are stored as `Arc<Template>` so placed rooms, generators
//! and built-in models can share them freely.
//!
//! # Example
//!
//! ```ignore
//! use tilegen::registry::ModelBuilder;
//!
//! let model = ModelBuilder::new("sewer")
//!     .add_file_source(&std::fs::read_to_string("tiles/sewer.tiles")?)
//!     .build()?;
//! let corridor = model.find_by_name("corridor")?;
//! ```

mod expand;

use std::sync::Arc;

use log::debug;

use crate::error::{Result, TileError};
use crate::parser::{build_template, parse_raw_tiles, parse_tile_with, Substitutions};
use crate::types::{Exits, Template};

pub use expand::{build, expand_with_transforms, variants};

/// A named, immutable set of templates of one size.
///
/// Use `ModelBuilder` to create a model.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    tile_size: (usize, usize),
    templates: Vec<Arc<Template>>,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile dimensions as (width, height).
    pub fn tile_size(&self) -> (usize, usize) {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Template>> {
        self.templates.iter()
    }

    pub fn templates(&self) -> &[Arc<Template>] {
        &self.templates
    }

    /// First template matching the predicate.
    pub fn find_by_prop(&self, pred: impl Fn(&Template) -> bool) -> Result<Arc<Template>> {
        self.templates
            .iter()
            .find(|t| pred(t))
            .cloned()
            .ok_or_else(|| TileError::TemplateNotFound {
                model: self.name.clone(),
                query: "no template matches the predicate".to_string(),
                help: None,
            })
    }

    /// Template by display name (`corridor`, `corridor_r90`, ...).
    pub fn find_by_name(&self, name: &str) -> Result<Arc<Template>> {
        self.templates
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| TileError::TemplateNotFound {
                model: self.name.clone(),
                query: format!("name '{}'", name),
                help: Some(format!(
                    "Run `tilegen list {}` to see the available templates",
                    self.name
                )),
            })
    }

    /// All templates matching the predicate, in model order.
    pub fn filter(&self, pred: impl Fn(&Template) -> bool) -> Vec<Arc<Template>> {
        self.templates.iter().filter(|t| pred(t)).cloned().collect()
    }

    /// Non-fixed templates with exactly the given exit set.
    pub fn with_exits(&self, exits: Exits) -> Vec<Arc<Template>> {
        self.filter(|t| !t.flags().fixed && t.exits() == exits)
    }

    /// Distinct base names, in model order.
    pub fn base_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for t in &self.templates {
            if !names.contains(&t.base_name()) {
                names.push(t.base_name());
            }
        }
        names
    }
}

/// Builder for constructing a `Model`.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    name: String,
    sources: Vec<Source>,
    substitutions: Substitutions,
    expand: bool,
}

#[derive(Debug)]
enum Source {
    Tile(String),
    File(String),
    Template(Template),
}

impl ModelBuilder {
    /// Create a builder. Transform expansion is on by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expand: true,
            ..Self::default()
        }
    }

    /// Add one tile definition.
    pub fn add_source(&mut self, spec: impl Into<String>) -> &mut Self {
        self.sources.push(Source::Tile(spec.into()));
        self
    }

    /// Add several tile definitions.
    pub fn add_sources<S: Into<String>>(&mut self, specs: impl IntoIterator<Item = S>) -> &mut Self {
        for spec in specs {
            self.add_source(spec);
        }
        self
    }

    /// Add a `.tiles` source holding `---`-separated definitions.
    pub fn add_file_source(&mut self, source: impl Into<String>) -> &mut Self {
        self.sources.push(Source::File(source.into()));
        self
    }

    /// Add an already parsed template.
    pub fn add_template(&mut self, template: Template) -> &mut Self {
        self.sources.push(Source::Template(template));
        self
    }

    /// Override parameter letters in every text source (e.g. `X` → `^`).
    pub fn substitute(&mut self, letter: char, glyph: char) -> &mut Self {
        self.substitutions.insert(letter, glyph);
        self
    }

    /// Whether to add rotated and mirrored variants.
    pub fn expand_transforms(&mut self, expand: bool) -> &mut Self {
        self.expand = expand;
        self
    }

    /// Parse all sources and build the model.
    pub fn build(&self) -> Result<Model> {
        let mut templates = Vec::new();
        for source in &self.sources {
            match source {
                Source::Tile(spec) => templates.push(parse_tile_with(spec, &self.substitutions)?),
                Source::File(text) => {
                    for raw in parse_raw_tiles(text)? {
                        templates.push(build_template(&raw, &self.substitutions)?);
                    }
                }
                Source::Template(t) => templates.push(t.clone()),
            }
        }

        let first = templates.first().ok_or_else(|| TileError::Parse {
            message: format!("Model '{}' has no tiles", self.name),
            help: None,
        })?;
        let tile_size = first.size();
        if let Some(odd) = templates.iter().find(|t| t.size() != tile_size) {
            return Err(TileError::Parse {
                message: format!(
                    "Tile '{}' is {}x{} but model '{}' uses {}x{} tiles",
                    odd.name(),
                    odd.width(),
                    odd.height(),
                    self.name,
                    tile_size.0,
                    tile_size.1
                ),
                help: Some("All tiles in one model must have the same dimensions".to_string()),
            });
        }
        if self.expand && tile_size.0 != tile_size.1 {
            return Err(TileError::Parse {
                message: format!(
                    "Model '{}' uses {}x{} tiles; rotation needs square tiles",
                    self.name, tile_size.0, tile_size.1
                ),
                help: Some("Use square tiles or disable transform expansion".to_string()),
            });
        }

        let base_count = templates.len();
        let templates = if self.expand {
            expand_with_transforms(templates)
        } else {
            templates
        };
        debug!(
            "model '{}': {} tiles, {} with variants",
            self.name,
            base_count,
            templates.len()
        );

        Ok(Model {
            name: self.name.clone(),
            tile_size,
            templates: templates.into_iter().map(Arc::new).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEND: &str = "name:bend\ndir:SE\nX=#\n\nXXXXX\nXXXXX\nXX...\nXX.XX\nXX.XX\n";
    const CROSS: &str = "name:cross\ndir:NSEW\n\n##.##\n##.##\n.....\n##.##\n##.##\n";
    const GATE: &str = "name:gate\ndir:S\nfixed\n\n#####\n#####\n##.##\n##.##\n##.##\n";

    fn model() -> Model {
        ModelBuilder::new("test")
            .add_sources([BEND, CROSS, GATE])
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_expands_variants() {
        let model = model();

        // bend: 4 rotations (its mirrors coincide), cross: 1, gate: fixed
        assert_eq!(model.len(), 6);
        assert_eq!(model.tile_size(), (5, 5));
        assert_eq!(model.base_names(), vec!["bend", "cross", "gate"]);
    }

    #[test]
    fn test_find_by_name() {
        let model = model();

        assert_eq!(model.find_by_name("bend_r90").unwrap().exits(), Exits::S | Exits::W);
        assert!(model.find_by_name("gate").unwrap().flags().fixed);

        let err = model.find_by_name("missing").unwrap_err();
        assert!(matches!(err, TileError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_find_by_prop() {
        let model = model();

        let t = model.find_by_prop(|t| t.exits() == Exits::N | Exits::W).unwrap();
        assert_eq!(t.name(), "bend_r180");
        assert!(model.find_by_prop(|t| t.exits() == Exits::N).is_err());
    }

    #[test]
    fn test_with_exits_skips_fixed() {
        let model = model();

        assert!(model.with_exits(Exits::S).is_empty());
        assert_eq!(model.with_exits(Exits::all()).len(), 1);
    }

    #[test]
    fn test_substitutions_restyle_model() {
        let model = ModelBuilder::new("rocky")
            .add_source(BEND)
            .substitute('X', '^')
            .build()
            .unwrap();

        assert!(model.iter().all(|t| t.get(0, 0) == Some('^')));
    }

    #[test]
    fn test_mismatched_dimensions() {
        let small = "name:small\n\n###\n###\n###\n";
        let err = ModelBuilder::new("mixed")
            .add_sources([BEND, small])
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("uses 5x5 tiles"));
    }

    #[test]
    fn test_empty_model() {
        assert!(ModelBuilder::new("empty").build().is_err());
    }

    #[test]
    fn test_file_source() {
        let source = format!("{}---\n{}", BEND, CROSS);
        let model = ModelBuilder::new("file")
            .add_file_source(source)
            .expand_transforms(false)
            .build()
            .unwrap();

        assert_eq!(model.len(), 2);
    }
}
