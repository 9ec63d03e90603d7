//! Arrows between two tiles.
//!
//! Every arrow is a sprite pasted at the top-left corner of the tiles it
//! spans. Which sprite, and how it is oriented, depends only on the delta
//! between the start and end tiles:
//!
//! - the eight knight deltas reorient the L-shaped knight template
//! - horizontal and vertical deltas stretch the straight template to
//!   `|delta| + 1` tiles and rotate it by quarter turns
//! - diagonal deltas stretch the straight template to
//!   `sqrt((|dx| + 0.5)^2 + (|dy| + 0.5)^2)` tiles, rotate it 45 degrees so
//!   it points up-left, then turn it into the right quadrant
//!
//! Any other delta is not drawable.

use std::collections::{HashMap, hash_map::Entry};

use log::{debug, trace};

use fenboard_core::raster::{Canvas, Orientation};
use fenboard_parser::GridPos;

use crate::{FenboardError, sprites::ArrowSprites};

/// Which end of the arrow supplies the anchor coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    End,
}

impl Anchor {
    fn pick(self, start: u8, end: u8) -> u8 {
        match self {
            Anchor::Start => start,
            Anchor::End => end,
        }
    }
}

/// The unoriented sprite an arrow is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Stroke {
    Knight,
    /// Straight arrow covering this many tiles.
    Straight(u8),
    /// Diagonal arrow over this many steps.
    Diagonal(u8),
}

/// How to draw one arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArrowShape {
    stroke: Stroke,
    orientation: Orientation,
    anchor_x: Anchor,
    anchor_y: Anchor,
}

impl ArrowShape {
    const fn new(stroke: Stroke, orientation: Orientation, anchor_x: Anchor, anchor_y: Anchor) -> Self {
        Self {
            stroke,
            orientation,
            anchor_x,
            anchor_y,
        }
    }
}

/// Knight deltas and the orientation of the template that draws them.
///
/// The template points from its bottom-right tile to its top-left tile,
/// which is the `(-2, -1)` move.
const KNIGHT_MOVES: [((i8, i8), Orientation, Anchor, Anchor); 8] = [
    ((-2, 1), Orientation::FlipVertical, Anchor::End, Anchor::Start),
    ((-1, 2), Orientation::Rotate90, Anchor::End, Anchor::Start),
    ((1, 2), Orientation::Transverse, Anchor::Start, Anchor::Start),
    ((2, 1), Orientation::Rotate180, Anchor::Start, Anchor::Start),
    ((2, -1), Orientation::FlipHorizontal, Anchor::Start, Anchor::End),
    ((1, -2), Orientation::Rotate270, Anchor::Start, Anchor::End),
    ((-1, -2), Orientation::Transpose, Anchor::End, Anchor::End),
    ((-2, -1), Orientation::Identity, Anchor::End, Anchor::End),
];

/// Classifies the arrow from `start` to `end`, or returns `None` when the
/// delta is neither a knight move, a straight line nor a diagonal.
pub(crate) fn classify(start: GridPos, end: GridPos) -> Option<ArrowShape> {
    let (dx, dy) = start.delta(end);

    if let Some((_, orientation, anchor_x, anchor_y)) =
        KNIGHT_MOVES.iter().find(|(delta, ..)| *delta == (dx, dy))
    {
        return Some(ArrowShape::new(Stroke::Knight, *orientation, *anchor_x, *anchor_y));
    }

    use Anchor::{End, Start};
    let shape = match (dx, dy) {
        (0, 0) => return None,
        (0, dy) => {
            let stroke = Stroke::Straight(dy.unsigned_abs() + 1);
            if dy < 0 {
                ArrowShape::new(stroke, Orientation::Identity, End, End)
            } else {
                ArrowShape::new(stroke, Orientation::Rotate180, Start, Start)
            }
        }
        (dx, 0) => {
            let stroke = Stroke::Straight(dx.unsigned_abs() + 1);
            if dx < 0 {
                ArrowShape::new(stroke, Orientation::Rotate90, End, End)
            } else {
                ArrowShape::new(stroke, Orientation::Rotate270, Start, Start)
            }
        }
        (dx, dy) if dx.abs() == dy.abs() => {
            let stroke = Stroke::Diagonal(dx.unsigned_abs());
            match (dx < 0, dy < 0) {
                (true, true) => ArrowShape::new(stroke, Orientation::Identity, End, End),
                (false, false) => ArrowShape::new(stroke, Orientation::Rotate180, Start, Start),
                (false, true) => ArrowShape::new(stroke, Orientation::Rotate270, Start, End),
                (true, false) => ArrowShape::new(stroke, Orientation::Rotate90, End, Start),
            }
        }
        _ => return None,
    };
    Some(shape)
}

/// Builds the error for an undrawable arrow.
pub(crate) fn invalid_arrow(start: GridPos, end: GridPos) -> FenboardError {
    FenboardError::InvalidArrow {
        start: start.algebraic(),
        end: end.algebraic(),
    }
}

/// Arrow sprites generated during one render, keyed by stroke and orientation.
struct SpriteMemo<'a> {
    sprites: &'a ArrowSprites,
    images: HashMap<(Stroke, Orientation), Canvas>,
}

impl<'a> SpriteMemo<'a> {
    fn new(sprites: &'a ArrowSprites) -> Self {
        Self {
            sprites,
            images: HashMap::new(),
        }
    }

    fn get(&mut self, stroke: Stroke, orientation: Orientation) -> Result<&Canvas, FenboardError> {
        let sprites = self.sprites;
        match self.images.entry((stroke, orientation)) {
            Entry::Occupied(entry) => {
                trace!(stroke:? = stroke, orientation:? = orientation; "Arrow sprite cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                trace!(stroke:? = stroke, orientation:? = orientation; "Generating arrow sprite");
                let image = match stroke {
                    Stroke::Knight => sprites.knight().clone(),
                    Stroke::Straight(tiles) => straight_arrow(sprites, f32::from(tiles))?,
                    Stroke::Diagonal(steps) => {
                        let side = f32::from(steps) + 0.5;
                        straight_arrow(sprites, (side * side * 2.0).sqrt())?.rotate_expand(45.0)?
                    }
                };
                Ok(entry.insert(image.oriented(orientation)))
            }
        }
    }
}

/// Builds an upward arrow `length` tiles long from the straight template.
///
/// The head and tail caps are copied unchanged to the two ends; for arrows
/// longer than two tiles the body is stretched to fill the gap.
fn straight_arrow(sprites: &ArrowSprites, length: f32) -> Result<Canvas, FenboardError> {
    let t = sprites.tile_size();
    let tile = t as f32;
    let template = sprites.straight();

    let head = template.crop(0, 0, t, t)?;
    let body = template.crop(0, t, t, t)?;
    let tail = template.crop(0, 2 * t, t, t)?;

    let mut arrow = Canvas::new(t, (tile * length) as u32)?;
    arrow.copy_from(&head, 0, 0);
    arrow.copy_from(&tail, 0, (tile * (length - 1.0)) as i32);
    if length > 2.0 {
        let body_height = (tile * (length - 2.0)) as u32;
        if body_height > 0 {
            arrow.copy_from(&body.resize(t, body_height)?, 0, t as i32);
        }
    }
    Ok(arrow)
}

/// Pastes every arrow onto `layer`, later arrows over earlier ones.
///
/// Positions must already be in screen orientation.
pub(crate) fn paint(
    layer: &mut Canvas,
    arrows: &[(GridPos, GridPos)],
    sprites: &ArrowSprites,
) -> Result<(), FenboardError> {
    let t = sprites.tile_size() as i32;
    let mut memo = SpriteMemo::new(sprites);

    for (start, end) in arrows {
        let shape = classify(*start, *end).ok_or_else(|| invalid_arrow(*start, *end))?;
        let image = memo.get(shape.stroke, shape.orientation)?;
        let x = i32::from(shape.anchor_x.pick(start.file(), end.file())) * t;
        let y = i32::from(shape.anchor_y.pick(start.rank(), end.rank())) * t;
        layer.paste(image, x, y);
    }

    debug!(arrows = arrows.len(), generated = memo.images.len(); "Arrows painted");
    Ok(())
}
