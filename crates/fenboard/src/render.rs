//! The rendering pipeline.
//!
//! A render runs these stages in order, and any failure aborts it:
//!
//! 1. Parse the FEN placement field.
//! 2. Resolve every square reference and classify every arrow.
//! 3. Flip the board and all positions for the black-side view.
//! 4. Paint the checkerboard, last move and highlights.
//! 5. Surround the board with coordinate labels, which may grow the canvas.
//! 6. Paint pieces and arrows on a transparent board-sized layer.
//! 7. Composite that layer onto the board at the overlay offset.

pub mod coordinates;

mod arrows;
mod checkerboard;
mod pieces;

use log::{debug, info};

use fenboard_core::raster::Canvas;
use fenboard_parser::{BOARD_TILES, GridPos};

use crate::{
    FenboardError,
    request::{HighlightColor, RenderRequest},
};

use checkerboard::MoveSquares;

/// The largest supported tile size in pixels.
pub const MAX_TILE_SIZE: u32 = 2048;

/// Renders `request` to a new canvas.
///
/// The canvas is exactly `8 * tile_size` pixels square, or larger when a
/// coordinate overlay places labels outside the board.
///
/// # Errors
///
/// - [`FenboardError::Parse`] for a malformed FEN or square name
/// - [`FenboardError::InvalidArrow`] for an arrow that is not a knight move,
///   straight line or diagonal
/// - [`FenboardError::Invariant`] for a zero or oversized tile size
/// - [`FenboardError::MissingSprite`] when the piece set lacks a sprite
/// - any error raised by a sprite provider or font source
pub fn render(request: &RenderRequest<'_>) -> Result<Canvas, FenboardError> {
    let tile_size = request.tile_size();
    if tile_size == 0 || tile_size > MAX_TILE_SIZE {
        return Err(FenboardError::Invariant(format!(
            "tile size must be between 1 and {MAX_TILE_SIZE}, got {tile_size}"
        )));
    }
    info!(tile_size, flipped = request.flipped(); "Rendering board");

    let board = fenboard_parser::parse(request.fen())
        .map_err(|err| FenboardError::new_parse_error(err, request.fen()))?;
    debug!(placement:% = board; "Parsed position");

    let mut squares = resolve_squares(request)?;
    debug!(
        arrows = squares.arrows.len(),
        highlights = squares.highlights.len(),
        last_move = squares.last_move.is_some();
        "Resolved squares"
    );

    let board = if request.flipped() {
        squares.flip();
        board.flipped()
    } else {
        board
    };

    let canvas = checkerboard::paint(
        tile_size,
        request.palette(),
        squares.last_move.as_ref(),
        &squares.highlights,
    )?;

    let (mut canvas, offset) = match request.coordinates() {
        Some(overlay) => coordinates::paint_overlay(&canvas, overlay, tile_size, request.flipped())?,
        None => (canvas, (0, 0)),
    };

    let side = tile_size * u32::from(BOARD_TILES);
    let mut layer = Canvas::new(side, side)?;
    if let Some(provider) = request.pieces() {
        let sprites = provider.sprites(tile_size)?;
        pieces::paint(&mut layer, &board, &sprites)?;
    }
    if let Some(provider) = request.arrow_set() {
        if !squares.arrows.is_empty() {
            let sprites = provider.sprites(tile_size)?;
            arrows::paint(&mut layer, &squares.arrows, &sprites)?;
        }
    }

    canvas.paste(&layer, offset.0, offset.1);
    info!(width = canvas.width(), height = canvas.height(); "Board rendered");
    Ok(canvas)
}

/// Every square reference of a request, resolved to grid positions.
#[derive(Debug)]
struct ResolvedSquares {
    arrows: Vec<(GridPos, GridPos)>,
    last_move: Option<MoveSquares>,
    highlights: Vec<(HighlightColor, Vec<GridPos>)>,
}

impl ResolvedSquares {
    fn flip(&mut self) {
        for (start, end) in &mut self.arrows {
            *start = start.flip();
            *end = end.flip();
        }
        if let Some(squares) = &mut self.last_move {
            squares.before = squares.before.flip();
            squares.after = squares.after.flip();
        }
        for (_, positions) in &mut self.highlights {
            for pos in positions.iter_mut() {
                *pos = pos.flip();
            }
        }
    }
}

/// Resolves square names and rejects undrawable arrows.
///
/// Arrows are checked before flipping so errors name the squares as given.
fn resolve_squares(request: &RenderRequest<'_>) -> Result<ResolvedSquares, FenboardError> {
    let mut arrow_positions = Vec::with_capacity(request.arrows().len());
    for arrow in request.arrows() {
        let start = arrow.start().resolve()?;
        let end = arrow.end().resolve()?;
        if arrows::classify(start, end).is_none() {
            return Err(arrows::invalid_arrow(start, end));
        }
        arrow_positions.push((start, end));
    }

    let last_move = match request.last_move() {
        Some(last_move) => Some(MoveSquares {
            before: last_move.before().resolve()?,
            after: last_move.after().resolve()?,
            colors: last_move.colors(),
        }),
        None => None,
    };

    let highlights = request
        .highlighting()
        .iter()
        .map(|(color, refs)| {
            let positions = refs
                .iter()
                .map(|square| square.resolve())
                .collect::<Result<Vec<_>, _>>()?;
            Ok((*color, positions))
        })
        .collect::<Result<Vec<_>, FenboardError>>()?;

    Ok(ResolvedSquares {
        arrows: arrow_positions,
        last_move,
        highlights,
    })
}

#[cfg(test)]
mod tests {
    use fenboard_core::color::Color;

    use super::*;
    use crate::{
        request::{Arrow, Highlighting, LastMove, Palette},
        sprites::ArrowSprites,
    };

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn color(name: &str) -> Color {
        Color::new(name).unwrap()
    }

    fn palette() -> Palette {
        Palette::new(color("#D18B47"), color("#FFCE9E"))
    }

    fn pos(name: &str) -> GridPos {
        GridPos::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_board_only_render_size() {
        let canvas = render(&RenderRequest::new(START, 100, palette())).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (800, 800));
    }

    #[test]
    fn test_tile_size_bounds() {
        for tile in [0, MAX_TILE_SIZE + 1] {
            let err = render(&RenderRequest::new(START, tile, palette())).unwrap_err();
            assert!(matches!(err, FenboardError::Invariant(_)), "{tile}");
        }
    }

    #[test]
    fn test_flipped_highlight_moves_to_mirrored_tile() {
        let highlighting = Highlighting::new().with(color("red"), ["a1"]);
        let request = RenderRequest::new(START, 10, palette())
            .with_highlighting(highlighting)
            .with_flipped(true);
        let canvas = render(&request).unwrap();

        // a1 is drawn at the top-right tile when flipped.
        assert_eq!(canvas.pixel(75, 5), Some([255, 0, 0, 255]));
        assert_ne!(canvas.pixel(5, 75), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_resolve_squares_rejects_bad_names() {
        let request = RenderRequest::new(START, 10, palette())
            .with_last_move(LastMove::new("e2", "e9", palette()));
        let err = render(&request).unwrap_err();
        match err {
            FenboardError::Parse { src, .. } => assert_eq!(src, "e9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolved_squares_flip() {
        let request = RenderRequest::new(START, 10, palette())
            .with_last_move(LastMove::new("e2", "e4", palette()))
            .with_highlighting(Highlighting::new().with(color("red"), ["a1", "h8"]));
        let mut squares = resolve_squares(&request).unwrap();
        squares.flip();

        let last_move = squares.last_move.unwrap();
        assert_eq!(last_move.before, pos("d7"));
        assert_eq!(last_move.after, pos("d5"));
        assert_eq!(squares.highlights[0].1, vec![pos("h8"), pos("a1")]);
    }

    #[test]
    fn test_invalid_arrow_is_reported_before_flip() {
        let arrows = arrow_sprites();
        let request = RenderRequest::new(START, 10, palette())
            .with_arrows(&arrows, vec![Arrow::new("a1", "c4")])
            .with_flipped(true);
        let err = render(&request).unwrap_err();
        match err {
            FenboardError::InvalidArrow { start, end } => {
                assert_eq!((start.as_str(), end.as_str()), ("a1", "c4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn arrow_sprites() -> ArrowSprites {
        let fill = color("blue");
        ArrowSprites::new(
            10,
            Canvas::filled(30, 20, fill).unwrap(),
            Canvas::filled(10, 30, fill).unwrap(),
        )
        .unwrap()
    }
}
