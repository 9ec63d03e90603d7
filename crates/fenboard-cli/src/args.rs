//! Command-line argument definitions for the fenboard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the position, the sprite folders, the
//! board decorations, and the output path.

use clap::{Parser, ValueEnum};

use fenboard::CoordinateLayout;

/// Coordinate label layouts selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    /// Rank digits and file letters in the corners of the edge tiles
    Standard,
    /// The square name centered on every tile
    EverySquare,
    /// Rank digits left of the board, file letters below it
    OuterRim,
    /// Rank digits on both sides of the board, file letters above and below
    FullRim,
}

impl From<LayoutArg> for CoordinateLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Standard => CoordinateLayout::Standard,
            LayoutArg::EverySquare => CoordinateLayout::EverySquare,
            LayoutArg::OuterRim => CoordinateLayout::OuterRim,
            LayoutArg::FullRim => CoordinateLayout::FullRim,
        }
    }
}

/// Command-line arguments for the fenboard renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Position in Forsyth-Edwards Notation
    #[arg(help = "FEN string; only the placement field is used")]
    pub fen: String,

    /// Path to the output PNG file
    #[arg(short, long, default_value = "board.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Folder with `white/` and `black/` piece sprites
    #[arg(short, long)]
    pub pieces: Option<String>,

    /// Folder with the `Knight.png` and `Up.png` arrow templates
    #[arg(long)]
    pub arrows_dir: Option<String>,

    /// Arrow between two squares, such as `e2e4` or `g1-f3` (repeatable)
    #[arg(long = "arrow")]
    pub arrows: Vec<String>,

    /// Render the board from black's side
    #[arg(long)]
    pub flipped: bool,

    /// Last move to highlight, such as `e2e4`
    #[arg(long)]
    pub last_move: Option<String>,

    /// Draw coordinate labels with this layout
    #[arg(long, value_enum)]
    pub coordinates: Option<LayoutArg>,

    /// Font file for coordinate labels; system fonts are used otherwise
    #[arg(long)]
    pub font: Option<String>,

    /// Highlight squares as `COLOR:SQUARE,SQUARE`, such as `red:e4,d5` (repeatable)
    #[arg(long = "highlight")]
    pub highlights: Vec<String>,

    /// Tile size in pixels, overriding the configuration
    #[arg(short, long)]
    pub tile_size: Option<u32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
