//! The board itself: base tiles, last-move squares and highlight sets.

use log::debug;

use fenboard_core::{color::Color, raster::Canvas};
use fenboard_parser::{BOARD_TILES, GridPos};

use crate::{
    FenboardError,
    request::{HighlightColor, Palette},
};

/// Last-move squares resolved to screen positions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MoveSquares {
    pub before: GridPos,
    pub after: GridPos,
    pub colors: Palette,
}

/// Paints the checkerboard, then the last move, then each highlight set.
///
/// Tiles are painted inclusive on both ends, `x0..=x0 + t - 1`, so adjacent
/// tiles never overlap.
pub(crate) fn paint(
    tile_size: u32,
    palette: Palette,
    last_move: Option<&MoveSquares>,
    highlights: &[(HighlightColor, Vec<GridPos>)],
) -> Result<Canvas, FenboardError> {
    let side = tile_size * u32::from(BOARD_TILES);
    let mut canvas = Canvas::filled(side, side, palette.light())?;

    if !canvas.is_square() {
        return Err(FenboardError::Invariant(format!(
            "board canvas must be square, got {}x{}",
            canvas.width(),
            canvas.height()
        )));
    }

    for pos in GridPos::all().filter(|pos| !pos.is_light()) {
        fill_tile(&mut canvas, pos, tile_size, palette.dark());
    }

    if let Some(squares) = last_move {
        for pos in [squares.before, squares.after] {
            fill_tile(&mut canvas, pos, tile_size, squares.colors.color_for(pos));
        }
    }

    for (color, squares) in highlights {
        for pos in squares {
            fill_tile(&mut canvas, *pos, tile_size, color.color_for(*pos));
        }
    }

    debug!(side, highlights = highlights.len(); "Checkerboard painted");
    Ok(canvas)
}

fn fill_tile(canvas: &mut Canvas, pos: GridPos, tile_size: u32, color: Color) {
    let t = tile_size as i32;
    let x0 = i32::from(pos.file()) * t;
    let y0 = i32::from(pos.rank()) * t;
    canvas.fill_rect_inclusive(x0, y0, x0 + t - 1, y0 + t - 1, color);
}
