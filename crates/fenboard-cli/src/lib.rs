//! fenboard CLI library
//!
//! This module contains the core CLI logic for the fenboard renderer: it
//! loads the configuration and resources named on the command line, builds
//! one render request, and writes the board as PNG.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, LayoutArg};

use log::{debug, info};

use fenboard::{
    Arrow, BoardRenderer, FenboardError, FontSource, Highlighting, SquareRef,
    color::Color,
    loaders::{ArrowFolder, FontFile, PieceFolder, SystemFont},
};

/// Font family used for coordinate labels when no font file is given.
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";

/// Run the fenboard CLI application
///
/// This function renders the position in `args.fen` and writes the
/// resulting PNG to the output file.
///
/// # Errors
///
/// Returns `FenboardError` for:
/// - Configuration loading errors and malformed arguments
/// - Sprite or font loading errors
/// - FEN and square parsing errors
/// - Invalid arrows
/// - PNG encoding and file I/O errors
pub fn run(args: &Args) -> Result<(), FenboardError> {
    info!(
        fen = args.fen,
        output_path = args.output;
        "Rendering position"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let renderer = BoardRenderer::new(app_config);

    let pieces = args.pieces.as_ref().map(PieceFolder::open).transpose()?;
    let arrow_set = args.arrows_dir.as_ref().map(ArrowFolder::open).transpose()?;
    let font: Option<Box<dyn FontSource>> = match (args.coordinates, &args.font) {
        (None, _) => None,
        (Some(_), Some(path)) => Some(Box::new(FontFile::open(path)?)),
        (Some(_), None) => Some(Box::new(SystemFont::new(DEFAULT_FONT_FAMILY))),
    };

    let mut request = renderer.request(&args.fen)?.with_flipped(args.flipped);
    if let Some(tile_size) = args.tile_size {
        request = request.with_tile_size(tile_size);
    }
    if let Some(pieces) = &pieces {
        request = request.with_pieces(pieces);
    }

    if !args.arrows.is_empty() {
        let Some(arrow_set) = &arrow_set else {
            return Err(FenboardError::Config(
                "`--arrow` requires `--arrows-dir`".to_string(),
            ));
        };
        let arrows = args
            .arrows
            .iter()
            .map(|text| split_move(text).map(|(start, end)| Arrow::new(start, end)))
            .collect::<Result<Vec<_>, _>>()?;
        request = request.with_arrows(arrow_set, arrows);
    }

    if let Some(text) = &args.last_move {
        let (before, after) = split_move(text)?;
        request = request.with_last_move(renderer.last_move(before, after)?);
    }

    if !args.highlights.is_empty() {
        let mut highlighting = Highlighting::new();
        for text in &args.highlights {
            let (color, squares) = parse_highlight(text)?;
            highlighting.add(color, squares);
        }
        request = request.with_highlighting(highlighting);
    }

    if let (Some(layout), Some(font)) = (args.coordinates, &font) {
        let overlay = renderer.coordinates(&**font)?.with_layout(layout.into());
        request = request.with_coordinates(overlay);
    }

    debug!(request:?; "Render request");
    let board = renderer.render(&request)?;
    board.save_png(&args.output)?;

    info!(
        output_file = args.output,
        width = board.width(),
        height = board.height();
        "PNG exported successfully"
    );

    Ok(())
}

/// Splits a move such as `e2e4` or `e2-e4` into its two squares.
///
/// The squares themselves are validated when the board is rendered.
fn split_move(text: &str) -> Result<(SquareRef, SquareRef), FenboardError> {
    let (start, end) = match text.split_once('-') {
        Some(pair) => pair,
        None if text.len() == 4 && text.is_ascii() => text.split_at(2),
        None => {
            return Err(FenboardError::Config(format!(
                "invalid move `{text}`: expected two squares such as `e2e4`"
            )));
        }
    };
    Ok((SquareRef::from(start), SquareRef::from(end)))
}

/// Parses `COLOR:SQUARE,SQUARE,...`.
fn parse_highlight(text: &str) -> Result<(Color, Vec<SquareRef>), FenboardError> {
    let invalid = |reason: String| FenboardError::Config(format!("invalid highlight `{text}`: {reason}"));

    let (color, squares) = text
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected `COLOR:SQUARE,...`".to_string()))?;
    let color = Color::new(color).map_err(invalid)?;
    let squares: Vec<SquareRef> = squares
        .split(',')
        .map(str::trim)
        .filter(|square| !square.is_empty())
        .map(SquareRef::from)
        .collect();

    if squares.is_empty() {
        return Err(invalid("no squares given".to_string()));
    }
    Ok((color, squares))
}
