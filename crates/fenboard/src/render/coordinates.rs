//! Coordinate label overlay.
//!
//! Every one of the 64 tiles is offered to a [`LabelLayout`], which returns
//! zero or more [`LabelPlacement`]s. Labels may fall outside the board (the
//! rim layouts always do), so the overlay measures the union of the board and
//! every label box, allocates a canvas that size, and pastes the board at the
//! offset that keeps negative coordinates on canvas.

use std::{fmt, sync::Arc};

use log::{debug, trace};

use fenboard_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    raster::Canvas,
    text::LabelFont,
};
use fenboard_parser::{BOARD_TILES, GridPos};

use crate::{FenboardError, request::Palette};

/// Supplies a measurable font at a pixel size.
pub trait FontSource {
    /// Returns the font at `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error when the font cannot be produced at this size.
    fn font(&self, size: f32) -> Result<Arc<dyn LabelFont>, FenboardError>;
}

/// One label: its top-left position in board pixels and its text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    position: Point,
    text: String,
}

impl LabelPlacement {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What a [`LabelLayout`] knows about the tile it is placing labels for.
pub struct TileLabels<'a> {
    tile: GridPos,
    square: GridPos,
    origin: Point,
    tile_size: f32,
    padding: Option<f32>,
    flipped: bool,
    font: &'a dyn LabelFont,
}

impl<'a> TileLabels<'a> {
    /// Screen position of the tile: file 0 is the left column, rank 7 the bottom row.
    pub fn tile(&self) -> GridPos {
        self.tile
    }

    /// The board square displayed on this tile. Differs from
    /// [`tile`](Self::tile) when the board is flipped.
    pub fn square(&self) -> GridPos {
        self.square
    }

    /// Top-left pixel of the tile, including the overlay offset.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// The configured padding, or `default` when none is set.
    pub fn padding_or(&self, default: f32) -> f32 {
        self.padding.unwrap_or(default)
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn font(&self) -> &'a dyn LabelFont {
        self.font
    }

    /// Whether the tile is in the leftmost screen column.
    pub fn is_left_column(&self) -> bool {
        self.tile.file() == 0
    }

    /// Whether the tile is in the rightmost screen column.
    pub fn is_right_column(&self) -> bool {
        self.tile.file() == BOARD_TILES - 1
    }

    /// Whether the tile is in the top screen row.
    pub fn is_top_row(&self) -> bool {
        self.tile.rank() == 0
    }

    /// Whether the tile is in the bottom screen row.
    pub fn is_bottom_row(&self) -> bool {
        self.tile.rank() == BOARD_TILES - 1
    }

    fn inset_padding(&self) -> f32 {
        self.tile_size / 20.0
    }

    fn rim_padding(&self) -> f32 {
        self.padding_or(0.0)
    }
}

/// The board edge a rim label sits beyond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RimEdge {
    Left,
    Right,
    Bottom,
    Top,
}

impl RimEdge {
    /// Places the rank digit or file letter of `tile` outside this edge,
    /// centered on the tile and pushed outward by the padding.
    fn label(self, tile: &TileLabels<'_>) -> LabelPlacement {
        let square = tile.square();
        let text = match self {
            RimEdge::Left | RimEdge::Right => square.rank_char(),
            RimEdge::Bottom | RimEdge::Top => square.file_char(),
        }
        .to_string();
        let size = tile.font().measure(&text);
        let padding = tile.rim_padding();
        let t = tile.tile_size();
        let (center_x, center_y) = ((t - size.width()) / 2.0, (t - size.height()) / 2.0);

        let offset = match self {
            RimEdge::Left => Point::new(-padding - size.width(), center_y),
            RimEdge::Right => Point::new(t + padding, center_y),
            RimEdge::Bottom => Point::new(center_x, t + padding),
            RimEdge::Top => Point::new(center_x, -padding - size.height()),
        };
        LabelPlacement::new(tile.origin().add_point(offset), text)
    }
}

/// A policy mapping a tile to the labels drawn for it.
pub trait LabelLayout {
    fn place(&self, tile: &TileLabels<'_>) -> Vec<LabelPlacement>;
}

/// The built-in label layouts, plus an escape hatch for custom ones.
#[derive(Clone, Default)]
pub enum CoordinateLayout {
    /// Rank digits in the top-left corner of left-column tiles, file letters
    /// in the bottom-right corner of bottom-row tiles.
    #[default]
    Standard,
    /// The full square name centered on every tile.
    EverySquare,
    /// Rank digits left of the board and file letters below it, centered on
    /// their tile and pushed outward by the padding (none by default).
    OuterRim,
    /// Like [`OuterRim`](Self::OuterRim), with rank digits on both sides
    /// and file letters above and below the board.
    FullRim,
    /// A caller-supplied layout.
    Custom(Arc<dyn LabelLayout + Send + Sync>),
}

impl CoordinateLayout {
    fn standard(tile: &TileLabels<'_>) -> Vec<LabelPlacement> {
        let padding = tile.padding_or(tile.inset_padding());
        let origin = tile.origin();
        let t = tile.tile_size();
        let mut labels = Vec::new();

        if tile.is_left_column() {
            labels.push(LabelPlacement::new(
                origin.add_point(Point::new(padding, padding)),
                tile.square().rank_char(),
            ));
        }
        if tile.is_bottom_row() {
            let text = tile.square().file_char().to_string();
            let size = tile.font().measure(&text);
            labels.push(LabelPlacement::new(
                origin.add_point(Point::new(
                    t - size.width() - padding,
                    t - size.height() - padding,
                )),
                text,
            ));
        }
        labels
    }

    fn every_square(tile: &TileLabels<'_>) -> Vec<LabelPlacement> {
        let text = tile.square().algebraic();
        let size = tile.font().measure(&text);
        let t = tile.tile_size();
        vec![LabelPlacement::new(
            tile.origin().add_point(Point::new(
                (t - size.width()) / 2.0,
                (t - size.height()) / 2.0,
            )),
            text,
        )]
    }

    fn rim(tile: &TileLabels<'_>, edges: &[RimEdge]) -> Vec<LabelPlacement> {
        edges
            .iter()
            .filter(|edge| match edge {
                RimEdge::Left => tile.is_left_column(),
                RimEdge::Right => tile.is_right_column(),
                RimEdge::Bottom => tile.is_bottom_row(),
                RimEdge::Top => tile.is_top_row(),
            })
            .map(|edge| edge.label(tile))
            .collect()
    }
}

impl LabelLayout for CoordinateLayout {
    fn place(&self, tile: &TileLabels<'_>) -> Vec<LabelPlacement> {
        match self {
            CoordinateLayout::Standard => Self::standard(tile),
            CoordinateLayout::EverySquare => Self::every_square(tile),
            CoordinateLayout::OuterRim => Self::rim(tile, &[RimEdge::Left, RimEdge::Bottom]),
            CoordinateLayout::FullRim => Self::rim(
                tile,
                &[RimEdge::Left, RimEdge::Right, RimEdge::Bottom, RimEdge::Top],
            ),
            CoordinateLayout::Custom(layout) => layout.place(tile),
        }
    }
}

impl fmt::Debug for CoordinateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateLayout::Standard => write!(f, "Standard"),
            CoordinateLayout::EverySquare => write!(f, "EverySquare"),
            CoordinateLayout::OuterRim => write!(f, "OuterRim"),
            CoordinateLayout::FullRim => write!(f, "FullRim"),
            CoordinateLayout::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Coordinate overlay settings for one render.
///
/// `colors` are keyed by the parity of the tile a label belongs to: labels of
/// dark tiles use [`Palette::dark`].
#[derive(Clone)]
pub struct CoordinateOverlay<'a> {
    font: &'a dyn FontSource,
    size: f32,
    colors: Palette,
    layout: CoordinateLayout,
    padding: Option<f32>,
    outside_fill: Option<Color>,
    offset: Point,
}

impl<'a> CoordinateOverlay<'a> {
    /// Creates an overlay with the standard layout and layout-default padding.
    pub fn new(font: &'a dyn FontSource, size: f32, colors: Palette) -> Self {
        Self {
            font,
            size,
            colors,
            layout: CoordinateLayout::default(),
            padding: None,
            outside_fill: None,
            offset: Point::default(),
        }
    }

    pub fn with_layout(mut self, layout: CoordinateLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Fills the canvas area outside the board with `color`.
    pub fn with_outside_fill(mut self, color: Color) -> Self {
        self.outside_fill = Some(color);
        self
    }

    /// Shifts every tile origin handed to the layout by `offset` pixels.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn colors(&self) -> Palette {
        self.colors
    }

    pub fn layout(&self) -> &CoordinateLayout {
        &self.layout
    }

    pub fn padding(&self) -> Option<f32> {
        self.padding
    }

    pub fn outside_fill(&self) -> Option<Color> {
        self.outside_fill
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// Asks the overlay's layout for the labels of every tile, paired with the
/// color each is drawn in.
fn place_labels(
    overlay: &CoordinateOverlay<'_>,
    font: &dyn LabelFont,
    t: f32,
    flipped: bool,
) -> Vec<(LabelPlacement, Color)> {
    let mut labels = Vec::new();

    for tile in GridPos::all() {
        let square = if flipped { tile.flip() } else { tile };
        let context = TileLabels {
            tile,
            square,
            origin: Point::new(f32::from(tile.file()) * t, f32::from(tile.rank()) * t)
                .add_point(overlay.offset),
            tile_size: t,
            padding: overlay.padding,
            flipped,
            font,
        };

        let color = overlay.colors.color_for(tile);
        for placement in overlay.layout.place(&context) {
            trace!(square:% = square, text = placement.text(); "Placed label");
            labels.push((placement, color));
        }
    }
    labels
}

/// Places and draws labels around `board`.
///
/// Returns the composite canvas and the pixel offset at which `board` was
/// pasted into it.
pub(crate) fn paint_overlay(
    board: &Canvas,
    overlay: &CoordinateOverlay<'_>,
    tile_size: u32,
    flipped: bool,
) -> Result<(Canvas, (i32, i32)), FenboardError> {
    let font = overlay.font.font(overlay.size)?;
    let labels = place_labels(overlay, font.as_ref(), tile_size as f32, flipped);

    let mut bounds = Bounds::new_from_top_left(
        Point::default(),
        Size::new(board.width() as f32, board.height() as f32),
    );
    for (placement, _) in &labels {
        let size = font.measure(placement.text());
        bounds = bounds.merge(&placement.position().to_bounds(size));
    }

    let (min_x, min_y) = (bounds.min_x().floor(), bounds.min_y().floor());
    let (max_x, max_y) = (bounds.max_x().ceil(), bounds.max_y().ceil());
    let offset_x = (-min_x).max(0.0).ceil();
    let offset_y = (-min_y).max(0.0).ceil();
    let width = (max_x + offset_x) as u32;
    let height = (max_y + offset_y) as u32;
    debug!(labels = labels.len(), width, height, offset_x, offset_y; "Sized coordinate overlay");

    let mut canvas = match overlay.outside_fill {
        Some(color) => Canvas::filled(width, height, color)?,
        None => Canvas::new(width, height)?,
    };
    let offset = (offset_x as i32, offset_y as i32);
    canvas.copy_from(board, offset.0, offset.1);

    let shift = Point::new(offset_x, offset_y);
    for (placement, color) in &labels {
        font.draw(
            &mut canvas,
            placement.position().add_point(shift),
            placement.text(),
            *color,
        );
    }

    Ok((canvas, offset))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    /// Draws every glyph as a solid block `0.5 * size` wide and `size` high.
    struct BlockFont {
        size: f32,
    }

    impl LabelFont for BlockFont {
        fn measure(&self, text: &str) -> Size {
            if text.is_empty() {
                return Size::default();
            }
            Size::new(text.chars().count() as f32 * self.size * 0.5, self.size)
        }

        fn draw(&self, canvas: &mut Canvas, position: Point, text: &str, color: Color) {
            let size = self.measure(text);
            let (x, y) = position.round();
            canvas.fill_rect_inclusive(
                x,
                y,
                x + size.width() as i32 - 1,
                y + size.height() as i32 - 1,
                color,
            );
        }
    }

    struct BlockFonts;

    impl FontSource for BlockFonts {
        fn font(&self, size: f32) -> Result<Arc<dyn LabelFont>, FenboardError> {
            Ok(Arc::new(BlockFont { size }))
        }
    }

    fn palette() -> Palette {
        Palette::new(Color::new("black").unwrap(), Color::new("white").unwrap())
    }

    fn tile_labels<'a>(font: &'a BlockFont, algebraic: &str, flipped: bool) -> TileLabels<'a> {
        let square = GridPos::from_algebraic(algebraic).unwrap();
        let tile = if flipped { square.flip() } else { square };
        TileLabels {
            tile,
            square,
            origin: Point::new(f32::from(tile.file()) * 100.0, f32::from(tile.rank()) * 100.0),
            tile_size: 100.0,
            padding: None,
            flipped,
            font,
        }
    }

    #[test]
    fn test_standard_corner_gets_both_labels() {
        let font = BlockFont { size: 20.0 };
        let labels = CoordinateLayout::Standard.place(&tile_labels(&font, "a1", false));

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text(), "1");
        assert_approx_eq!(f32, labels[0].position().x(), 5.0);
        assert_approx_eq!(f32, labels[0].position().y(), 705.0);
        assert_eq!(labels[1].text(), "a");
        assert_approx_eq!(f32, labels[1].position().x(), 100.0 - 10.0 - 5.0);
        assert_approx_eq!(f32, labels[1].position().y(), 700.0 + 100.0 - 20.0 - 5.0);
    }

    #[test]
    fn test_standard_interior_tile_has_no_labels() {
        let font = BlockFont { size: 20.0 };
        assert!(CoordinateLayout::Standard
            .place(&tile_labels(&font, "e4", false))
            .is_empty());
    }

    #[test]
    fn test_standard_flipped_uses_h_file_and_rank_8() {
        let font = BlockFont { size: 20.0 };
        let corner = CoordinateLayout::Standard.place(&tile_labels(&font, "h8", true));
        let texts: Vec<_> = corner.iter().map(LabelPlacement::text).collect();
        assert_eq!(texts, vec!["8", "h"]);

        assert!(CoordinateLayout::Standard
            .place(&tile_labels(&font, "a1", true))
            .is_empty());
    }

    #[test]
    fn test_every_square_centers_full_name() {
        let font = BlockFont { size: 20.0 };
        let labels = CoordinateLayout::EverySquare.place(&tile_labels(&font, "e4", false));

        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text(), "e4");
        assert_approx_eq!(f32, labels[0].position().x(), 400.0 + 40.0);
        assert_approx_eq!(f32, labels[0].position().y(), 400.0 + 40.0);
    }

    #[test]
    fn test_outer_rim_places_labels_outside() {
        let font = BlockFont { size: 20.0 };
        let labels = CoordinateLayout::OuterRim.place(&tile_labels(&font, "a1", false));

        assert_eq!(labels.len(), 2);
        assert!(labels[0].position().x() < 0.0);
        assert!(labels[1].position().y() >= 800.0);
    }

    #[test]
    fn test_outer_rim_defaults_to_no_padding() {
        let font = BlockFont { size: 20.0 };
        let labels = CoordinateLayout::OuterRim.place(&tile_labels(&font, "a1", false));

        assert_approx_eq!(f32, labels[0].position().x(), -10.0);
        assert_approx_eq!(f32, labels[0].position().y(), 700.0 + 40.0);
        assert_approx_eq!(f32, labels[1].position().x(), 45.0);
        assert_approx_eq!(f32, labels[1].position().y(), 800.0);
    }

    #[test]
    fn test_full_rim_corner_gets_labels_on_both_sides() {
        let font = BlockFont { size: 20.0 };
        let bottom_right = CoordinateLayout::FullRim.place(&tile_labels(&font, "h1", false));
        let texts: Vec<_> = bottom_right.iter().map(LabelPlacement::text).collect();
        assert_eq!(texts, vec!["1", "h"]);
        assert_approx_eq!(f32, bottom_right[0].position().x(), 800.0);

        let top_left = CoordinateLayout::FullRim.place(&tile_labels(&font, "a8", false));
        let texts: Vec<_> = top_left.iter().map(LabelPlacement::text).collect();
        assert_eq!(texts, vec!["8", "a"]);
        assert_approx_eq!(f32, top_left[1].position().y(), -20.0);
    }

    #[test]
    fn test_every_square_flipped_top_left_is_h1() {
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::EverySquare);
        let font = BlockFont { size: 20.0 };

        let labels = place_labels(&overlay, &font, 100.0, true);
        let top_left: Vec<_> = labels
            .iter()
            .filter(|(p, _)| p.position().x() < 100.0 && p.position().y() < 100.0)
            .map(|(p, _)| p.text())
            .collect();
        assert_eq!(top_left, vec!["h1"]);
    }

    #[test]
    fn test_full_rim_flipped_reads_ranks_top_to_bottom() {
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::FullRim);
        let font = BlockFont { size: 20.0 };
        let labels = place_labels(&overlay, &font, 100.0, true);

        let edge = |keep: &dyn Fn(Point) -> bool, by_y: bool| -> String {
            let mut found: Vec<_> = labels
                .iter()
                .map(|(p, _)| p)
                .filter(|p| keep(p.position()))
                .collect();
            found.sort_by(|a, b| {
                let key = |p: &LabelPlacement| {
                    if by_y { p.position().y() } else { p.position().x() }
                };
                key(*a).total_cmp(&key(*b))
            });
            found.iter().map(|p| p.text()).collect()
        };

        assert_eq!(edge(&|p: Point| p.x() < 0.0, true), "12345678");
        assert_eq!(edge(&|p: Point| p.x() >= 800.0, true), "12345678");
        assert_eq!(edge(&|p: Point| p.y() < 0.0, false), "hgfedcba");
        assert_eq!(edge(&|p: Point| p.y() >= 800.0, false), "hgfedcba");
    }

    #[test]
    fn test_outer_rim_flipped_reads_ranks_top_to_bottom() {
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::OuterRim);
        let font = BlockFont { size: 20.0 };
        let mut left: Vec<_> = place_labels(&overlay, &font, 100.0, true)
            .into_iter()
            .map(|(p, _)| p)
            .filter(|p| p.position().x() < 0.0)
            .collect();
        left.sort_by(|a, b| a.position().y().total_cmp(&b.position().y()));

        let ranks: String = left.iter().map(LabelPlacement::text).collect();
        assert_eq!(ranks, "12345678");
    }

    #[test]
    fn test_custom_layout_is_called() {
        struct CenterDot;
        impl LabelLayout for CenterDot {
            fn place(&self, tile: &TileLabels<'_>) -> Vec<LabelPlacement> {
                vec![LabelPlacement::new(tile.origin(), "*")]
            }
        }

        let font = BlockFont { size: 20.0 };
        let layout = CoordinateLayout::Custom(Arc::new(CenterDot));
        assert_eq!(layout.place(&tile_labels(&font, "c3", false)).len(), 1);
    }

    #[test]
    fn test_overlay_standard_keeps_board_size() {
        let board = Canvas::filled(800, 800, Color::new("gray").unwrap()).unwrap();
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette());

        let (canvas, offset) = paint_overlay(&board, &overlay, 100, false).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (800, 800));
        assert_eq!(offset, (0, 0));
    }

    #[test]
    fn test_overlay_outer_rim_grows_canvas() {
        let board = Canvas::filled(800, 800, Color::new("gray").unwrap()).unwrap();
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::OuterRim)
            .with_padding(4.0)
            .with_outside_fill(Color::new("navy").unwrap());

        let (canvas, offset) = paint_overlay(&board, &overlay, 100, false).unwrap();
        // Rank labels are 10 wide plus 4 padding; file labels are 20 high plus 4 padding.
        assert_eq!(offset, (14, 0));
        assert_eq!((canvas.width(), canvas.height()), (814, 824));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 128, 255]));
        assert_eq!(canvas.pixel(14, 0), Some([128, 128, 128, 255]));
    }

    #[test]
    fn test_overlay_full_rim_flipped_grows_all_sides() {
        let board = Canvas::filled(800, 800, Color::new("gray").unwrap()).unwrap();
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::FullRim)
            .with_padding(4.0);

        let (canvas, offset) = paint_overlay(&board, &overlay, 100, true).unwrap();
        assert_eq!(offset, (14, 24));
        assert_eq!((canvas.width(), canvas.height()), (14 + 800 + 14, 24 + 800 + 24));
        // Right of the board, next to the flipped top row (rank 1).
        assert!(canvas.has_visible_pixels(814, 24 + 40, 10, 20));
        // Above the board, over the flipped left column (h file).
        assert!(canvas.has_visible_pixels(14 + 45, 0, 10, 20));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_overlay_label_colors_follow_tile_parity() {
        let board = Canvas::filled(800, 800, Color::new("gray").unwrap()).unwrap();
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::EverySquare);

        let (canvas, _) = paint_overlay(&board, &overlay, 100, false).unwrap();
        // a8 is light: label drawn in the light label color.
        assert_eq!(canvas.pixel(50, 50), Some([255, 255, 255, 255]));
        // b8 is dark.
        assert_eq!(canvas.pixel(150, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_overlay_offset_shifts_labels() {
        let board = Canvas::filled(800, 800, Color::new("gray").unwrap()).unwrap();
        let overlay = CoordinateOverlay::new(&BlockFonts, 20.0, palette())
            .with_layout(CoordinateLayout::EverySquare)
            .with_offset(Point::new(-50.0, 0.0));

        let (canvas, offset) = paint_overlay(&board, &overlay, 100, false).unwrap();
        assert_eq!(offset, (10, 0));
        assert_eq!(canvas.width(), 810);
    }
}
