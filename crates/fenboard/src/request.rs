//! Inputs to a single render call.
//!
//! # Overview
//!
//! - [`RenderRequest`] - Everything one render needs, assembled with builder methods
//! - [`SquareRef`] - A square given either by name (`"e4"`) or by [`GridPos`]
//! - [`Palette`] - The dark and light tile colors
//! - [`Arrow`] - A start and end square
//! - [`LastMove`] - Two squares repainted with parity-keyed colors
//! - [`Highlighting`] - Ordered sets of squares, each painted with one [`HighlightColor`]
//!
//! Square references are resolved to grid positions at render time, so an
//! invalid square name is reported as a parse error by the render call.

use std::fmt;

use indexmap::IndexMap;

use fenboard_core::color::Color;
use fenboard_parser::GridPos;

use crate::{
    FenboardError,
    render::coordinates::CoordinateOverlay,
    sprites::{ArrowSet, PieceSet},
};

/// A reference to one square, by algebraic name or by grid position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SquareRef {
    Algebraic(String),
    Grid(GridPos),
}

impl SquareRef {
    /// Resolves the reference to a grid position in the unflipped orientation.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Parse`] when an algebraic name is invalid.
    pub fn resolve(&self) -> Result<GridPos, FenboardError> {
        match self {
            SquareRef::Grid(pos) => Ok(*pos),
            SquareRef::Algebraic(name) => GridPos::from_algebraic(name)
                .map_err(|err| FenboardError::new_parse_error(err, name.as_str())),
        }
    }
}

impl From<&str> for SquareRef {
    fn from(name: &str) -> Self {
        SquareRef::Algebraic(name.to_string())
    }
}

impl From<String> for SquareRef {
    fn from(name: String) -> Self {
        SquareRef::Algebraic(name)
    }
}

impl From<GridPos> for SquareRef {
    fn from(pos: GridPos) -> Self {
        SquareRef::Grid(pos)
    }
}

impl fmt::Display for SquareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareRef::Algebraic(name) => f.write_str(name),
            SquareRef::Grid(pos) => write!(f, "{pos}"),
        }
    }
}

/// Dark and light tile colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    dark: Color,
    light: Color,
}

impl Palette {
    pub fn new(dark: Color, light: Color) -> Self {
        Self { dark, light }
    }

    pub fn dark(&self) -> Color {
        self.dark
    }

    pub fn light(&self) -> Color {
        self.light
    }

    /// Returns the color matching the tile parity of `pos`.
    pub fn color_for(&self, pos: GridPos) -> Color {
        if pos.is_light() {
            self.light
        } else {
            self.dark
        }
    }
}

/// An arrow from `start` to `end`.
///
/// The delta between the squares must be a knight move, a straight line or
/// a diagonal; anything else fails the render with
/// [`FenboardError::InvalidArrow`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arrow {
    start: SquareRef,
    end: SquareRef,
}

impl Arrow {
    pub fn new(start: impl Into<SquareRef>, end: impl Into<SquareRef>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> &SquareRef {
        &self.start
    }

    pub fn end(&self) -> &SquareRef {
        &self.end
    }
}

/// The previous move, painted over the base board.
///
/// Each square takes the color of its own parity, exactly as the base board does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LastMove {
    before: SquareRef,
    after: SquareRef,
    colors: Palette,
}

impl LastMove {
    pub fn new(before: impl Into<SquareRef>, after: impl Into<SquareRef>, colors: Palette) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            colors,
        }
    }

    pub fn before(&self) -> &SquareRef {
        &self.before
    }

    pub fn after(&self) -> &SquareRef {
        &self.after
    }

    pub fn colors(&self) -> Palette {
        self.colors
    }
}

/// The color used for one highlight set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    /// One color regardless of parity.
    Uniform(Color),
    /// A color per tile parity.
    ByParity(Palette),
}

impl HighlightColor {
    /// Returns the color to paint `pos` with.
    pub fn color_for(&self, pos: GridPos) -> Color {
        match self {
            HighlightColor::Uniform(color) => *color,
            HighlightColor::ByParity(palette) => palette.color_for(pos),
        }
    }
}

impl From<Color> for HighlightColor {
    fn from(color: Color) -> Self {
        HighlightColor::Uniform(color)
    }
}

impl From<Palette> for HighlightColor {
    fn from(palette: Palette) -> Self {
        HighlightColor::ByParity(palette)
    }
}

/// Square highlight sets, painted in insertion order after the last move.
///
/// Adding squares under a color that is already present appends to that
/// color's set; the set keeps its original position in the paint order.
///
/// # Examples
///
/// ```
/// # use fenboard::{Highlighting, HighlightColor};
/// # use fenboard::color::Color;
/// let mut highlighting = Highlighting::new();
/// highlighting.add(Color::new("red").unwrap(), ["e4", "d5"]);
/// highlighting.add(Color::new("red").unwrap(), ["c6"]);
/// assert_eq!(highlighting.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighting {
    sets: IndexMap<HighlightColor, Vec<SquareRef>>,
}

impl Highlighting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `squares` to the set painted with `color`.
    pub fn add<S>(&mut self, color: impl Into<HighlightColor>, squares: impl IntoIterator<Item = S>)
    where
        S: Into<SquareRef>,
    {
        self.sets
            .entry(color.into())
            .or_default()
            .extend(squares.into_iter().map(Into::into));
    }

    /// Builder form of [`add`](Self::add).
    pub fn with<S>(mut self, color: impl Into<HighlightColor>, squares: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<SquareRef>,
    {
        self.add(color, squares);
        self
    }

    /// Returns the number of distinct colors.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates the sets in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (&HighlightColor, &[SquareRef])> {
        self.sets.iter().map(|(color, squares)| (color, squares.as_slice()))
    }
}

/// Everything one render call needs.
///
/// The tile size and palette are required; everything else is optional and
/// added with the `with_*` builder methods. Sprite providers and fonts are
/// borrowed, so one loader can serve many requests.
///
/// # Examples
///
/// ```
/// # use fenboard::{Arrow, Palette, RenderRequest};
/// # use fenboard::color::Color;
/// let palette = Palette::new(
///     Color::new("#D18B47").unwrap(),
///     Color::new("#FFCE9E").unwrap(),
/// );
/// let request = RenderRequest::new("8/8/8/4k3/8/8/4K3/8 w - - 0 1", 64, palette)
///     .with_flipped(true);
/// assert_eq!(request.tile_size(), 64);
/// assert!(request.flipped());
/// ```
#[derive(Clone)]
pub struct RenderRequest<'a> {
    fen: String,
    tile_size: u32,
    palette: Palette,
    pieces: Option<&'a dyn PieceSet>,
    arrow_set: Option<&'a dyn ArrowSet>,
    arrows: Vec<Arrow>,
    flipped: bool,
    last_move: Option<LastMove>,
    coordinates: Option<CoordinateOverlay<'a>>,
    highlighting: Highlighting,
}

impl<'a> RenderRequest<'a> {
    /// Creates a request for `fen` with square side `tile_size` pixels.
    pub fn new(fen: impl Into<String>, tile_size: u32, palette: Palette) -> Self {
        Self {
            fen: fen.into(),
            tile_size,
            palette,
            pieces: None,
            arrow_set: None,
            arrows: Vec::new(),
            flipped: false,
            last_move: None,
            coordinates: None,
            highlighting: Highlighting::default(),
        }
    }

    /// Sets the piece sprite provider.
    pub fn with_pieces(mut self, pieces: &'a dyn PieceSet) -> Self {
        self.pieces = Some(pieces);
        self
    }

    /// Sets the arrow sprite provider and the arrows to draw, in paint order.
    pub fn with_arrows(
        mut self,
        arrow_set: &'a dyn ArrowSet,
        arrows: impl IntoIterator<Item = Arrow>,
    ) -> Self {
        self.arrow_set = Some(arrow_set);
        self.arrows = arrows.into_iter().collect();
        self
    }

    /// Renders the board from black's side when `flipped` is true.
    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    pub fn with_last_move(mut self, last_move: LastMove) -> Self {
        self.last_move = Some(last_move);
        self
    }

    pub fn with_coordinates(mut self, coordinates: CoordinateOverlay<'a>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn with_highlighting(mut self, highlighting: Highlighting) -> Self {
        self.highlighting = highlighting;
        self
    }

    /// Replaces the tile size.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Replaces the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn pieces(&self) -> Option<&'a dyn PieceSet> {
        self.pieces
    }

    pub fn arrow_set(&self) -> Option<&'a dyn ArrowSet> {
        self.arrow_set
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub fn coordinates(&self) -> Option<&CoordinateOverlay<'a>> {
        self.coordinates.as_ref()
    }

    pub fn highlighting(&self) -> &Highlighting {
        &self.highlighting
    }
}

impl fmt::Debug for RenderRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderRequest")
            .field("fen", &self.fen)
            .field("tile_size", &self.tile_size)
            .field("palette", &self.palette)
            .field("pieces", &self.pieces.is_some())
            .field("arrows", &self.arrows)
            .field("flipped", &self.flipped)
            .field("last_move", &self.last_move)
            .field("coordinates", &self.coordinates.is_some())
            .field("highlighting", &self.highlighting)
            .finish()
    }
}
