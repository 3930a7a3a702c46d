use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tilegen operations
#[derive(Error, Diagnostic, Debug)]
pub enum TileError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tilegen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Tile parse error: {message}")]
    #[diagnostic(code(tilegen::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Template not found in model '{model}': {query}")]
    #[diagnostic(code(tilegen::template_not_found))]
    TemplateNotFound {
        model: String,
        query: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot fill tile slot ({x}, {y}) [{requirements}]: {message}")]
    #[diagnostic(code(tilegen::generation))]
    Generation {
        x: usize,
        y: usize,
        requirements: String,
        message: String,
    },

    #[error("Composition out of bounds: {message}")]
    #[diagnostic(code(tilegen::compose))]
    CompositionBounds {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(tilegen::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl TileError {
    /// Shorthand for a parse error without help text.
    pub fn parse(message: impl Into<String>) -> Self {
        TileError::Parse {
            message: message.into(),
            help: None,
        }
    }

    /// Shorthand for a composition bounds error without help text.
    pub fn bounds(message: impl Into<String>) -> Self {
        TileError::CompositionBounds {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TileError>;
