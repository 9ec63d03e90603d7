//! Piece sprites on the transparent piece-and-arrow layer.

use log::debug;

use fenboard_core::raster::Canvas;
use fenboard_parser::Board;

use crate::{FenboardError, sprites::PieceSprites};

/// Pastes the sprite of every occupied tile at the tile's top-left pixel.
///
/// `board` must already be in screen orientation.
pub(crate) fn paint(
    layer: &mut Canvas,
    board: &Board,
    sprites: &PieceSprites,
) -> Result<(), FenboardError> {
    let t = sprites.tile_size() as i32;
    let mut count = 0usize;

    for (pos, piece) in board.pieces() {
        let sprite = sprites
            .get(piece)
            .ok_or(FenboardError::MissingSprite(piece.to_fen_char()))?;
        layer.paste(sprite, i32::from(pos.file()) * t, i32::from(pos.rank()) * t);
        count += 1;
    }

    debug!(pieces = count; "Pieces painted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use fenboard_core::color::Color;
    use fenboard_parser::{GridPos, Piece, parse};

    use super::*;

    fn sprites(tile: u32) -> PieceSprites {
        let mut sprites = PieceSprites::new(tile);
        for c in "kqbnrpKQBNRP".chars() {
            let color = if c.is_ascii_uppercase() { "white" } else { "black" };
            // A sprite that only covers its top half, to exercise the alpha mask.
            let mut sprite = Canvas::new(tile, tile).unwrap();
            sprite.fill_rect_inclusive(
                0,
                0,
                tile as i32 - 1,
                tile as i32 / 2 - 1,
                Color::new(color).unwrap(),
            );
            sprites.insert(Piece::from_fen_char(c).unwrap(), sprite).unwrap();
        }
        sprites
    }

    #[test]
    fn test_pieces_land_on_their_tiles() {
        let board = parse("8/8/8/4k3/8/8/4K3/8 w - - 0 1").unwrap();
        let mut layer = Canvas::new(80, 80).unwrap();
        paint(&mut layer, &board, &sprites(10)).unwrap();

        let e5 = GridPos::from_algebraic("e5").unwrap();
        let (x, y) = (u32::from(e5.file()) * 10, u32::from(e5.rank()) * 10);
        assert_eq!(layer.pixel(x + 5, y + 2), Some([0, 0, 0, 255]));
        // The lower half of the sprite is transparent.
        assert_eq!(layer.pixel(x + 5, y + 8), Some([0, 0, 0, 0]));

        let e2 = GridPos::from_algebraic("e2").unwrap();
        let (x, y) = (u32::from(e2.file()) * 10, u32::from(e2.rank()) * 10);
        assert_eq!(layer.pixel(x + 5, y + 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_empty_tiles_stay_transparent() {
        let board = parse("8/8/8/4k3/8/8/4K3/8").unwrap();
        let mut layer = Canvas::new(80, 80).unwrap();
        paint(&mut layer, &board, &sprites(10)).unwrap();

        assert!(!layer.has_visible_pixels(0, 0, 40, 30));
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let board = parse("8/8/8/4k3/8/8/4K3/8").unwrap();
        let mut layer = Canvas::new(80, 80).unwrap();
        let err = paint(&mut layer, &board, &PieceSprites::new(10)).unwrap_err();
        assert!(matches!(err, FenboardError::MissingSprite('k')));
    }
}
