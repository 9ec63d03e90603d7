//! Error types for fenboard operations.
//!
//! This module provides the main error type [`FenboardError`]. Every
//! failure aborts the render; no partial image is ever returned.

use std::{io, path::PathBuf};

use thiserror::Error;

use fenboard_core::raster::RasterError;
use fenboard_parser::error::ParseError;

/// The main error type for fenboard operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics with spans into `src`,
/// the FEN string or square name that failed to parse, so callers can render
/// rich reports.
#[derive(Debug, Error)]
pub enum FenboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("invalid arrow from {start} to {end}: not a knight move, straight line or diagonal")]
    InvalidArrow { start: String, end: String },

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("no sprite for piece `{0}`")]
    MissingSprite(char),

    #[error("failed to load `{}`: {message}", path.display())]
    Resource { path: PathBuf, message: String },

    #[error("raster error: {0}")]
    Raster(#[from] RasterError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FenboardError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Create a new `Resource` error for a file that could not be loaded.
    pub fn new_resource_error(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Resource {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
