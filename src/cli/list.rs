//! List command implementation.
//!
//! Prints the built-in themes and models, or the models loaded from the
//! given tile set files.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover_paths, load_models, LoadOptions};
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::registry::Model;
use crate::themes::{builtin_models, Theme};

/// List themes, models and tiles
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Tile set files or directories (default: the built-in models)
    pub files: Vec<PathBuf>,

    /// Show every template, including transformed variants
    #[arg(long)]
    pub tiles: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    if args.files.is_empty() {
        for theme in Theme::ALL {
            printer.info("Theme", &format!("{} {}", theme, printer.dim(theme.description())));
        }
        for model in builtin_models()? {
            print_model(model, args.tiles, printer);
        }
    } else {
        let discovery = discover_paths(&args.files)?;
        for model in load_models(&discovery.scan, &LoadOptions::default())? {
            print_model(&model, args.tiles, printer);
        }
    }
    Ok(())
}

/// One-line summary of a model.
pub fn model_summary(model: &Model) -> String {
    let (w, h) = model.tile_size();
    format!(
        "{} ({}x{}, {} from {})",
        model.name(),
        w,
        h,
        plural(model.len(), "template", "templates"),
        plural(model.base_names().len(), "tile", "tiles")
    )
}

fn print_model(model: &Model, all_tiles: bool, printer: &Printer) {
    printer.info("Model", &model_summary(model));
    if all_tiles {
        for t in model.iter() {
            let fixed = if t.flags().fixed { " fixed" } else { "" };
            println!("  {:<24} {:<4}{}", t.name(), t.exits().to_string(), fixed);
        }
    } else {
        println!("  {}", model.base_names().join(", "));
    }
}
