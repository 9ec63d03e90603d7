//! fenboard - Render chess positions in FEN as raster board images.
//!
//! A render takes the placement field of a FEN string and paints a
//! checkerboard with piece sprites, optional arrows, last-move and square
//! highlighting, and coordinate labels. The result is a [`raster::Canvas`]
//! that can be written out as PNG.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fenboard::{BoardRenderer, config::AppConfig, loaders::PieceFolder};
//!
//! let pieces = PieceFolder::open("pieces").expect("Failed to load pieces");
//! let renderer = BoardRenderer::new(AppConfig::default());
//!
//! let request = renderer
//!     .request("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
//!     .expect("Invalid config")
//!     .with_pieces(&pieces)
//!     .with_last_move(renderer.last_move("e2", "e4").expect("Invalid config"));
//!
//! let board = renderer.render(&request).expect("Failed to render");
//! board.save_png("board.png").expect("Failed to save");
//! ```

pub mod config;
pub mod loaders;
pub mod sprites;

mod error;
mod render;
mod request;

pub use fenboard_core::{color, geometry, raster, text};
pub use fenboard_parser::{Board, GridPos, Piece, PieceKind, Side};

pub use error::FenboardError;
pub use render::{
    MAX_TILE_SIZE,
    coordinates::{
        CoordinateLayout, CoordinateOverlay, FontSource, LabelLayout, LabelPlacement, TileLabels,
    },
    render,
};
pub use request::{
    Arrow, HighlightColor, Highlighting, LastMove, Palette, RenderRequest, SquareRef,
};

use log::debug;

use config::AppConfig;
use raster::Canvas;

/// Renders boards with defaults taken from an [`AppConfig`].
///
/// The renderer itself holds no sprites or fonts; requests borrow them from
/// the caller's loaders.
///
/// # Examples
///
/// ```
/// use fenboard::{BoardRenderer, config::AppConfig};
///
/// let renderer = BoardRenderer::new(AppConfig::default());
/// let request = renderer.request("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
///
/// let board = renderer.render(&request).unwrap();
/// assert_eq!(board.width(), 800);
/// ```
#[derive(Debug, Default)]
pub struct BoardRenderer {
    config: AppConfig,
}

impl BoardRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Starts a request for `fen` with the configured tile size and colors.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] if a configured color is invalid.
    pub fn request<'a>(&self, fen: impl Into<String>) -> Result<RenderRequest<'a>, FenboardError> {
        let board = self.config.board();
        Ok(RenderRequest::new(fen, board.tile_size(), board.palette()?))
    }

    /// Builds a last-move highlight with the configured colors.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] if a configured color is invalid.
    pub fn last_move(
        &self,
        before: impl Into<SquareRef>,
        after: impl Into<SquareRef>,
    ) -> Result<LastMove, FenboardError> {
        Ok(LastMove::new(
            before,
            after,
            self.config.last_move().palette()?,
        ))
    }

    /// Builds a coordinate overlay with the configured size, colors and layout.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] if a configured color is invalid.
    pub fn coordinates<'a>(
        &self,
        font: &'a dyn FontSource,
    ) -> Result<CoordinateOverlay<'a>, FenboardError> {
        let settings = self.config.coordinates();
        let mut overlay = CoordinateOverlay::new(font, settings.size(), settings.palette()?)
            .with_layout(settings.layout().into());
        if let Some(padding) = settings.padding() {
            overlay = overlay.with_padding(padding);
        }
        if let Some(fill) = settings.outside_fill()? {
            overlay = overlay.with_outside_fill(fill);
        }
        debug!(layout:? = overlay.layout(), size = overlay.size(); "Coordinate overlay configured");
        Ok(overlay)
    }

    /// Renders `request`. See [`render()`] for the pipeline and errors.
    ///
    /// # Errors
    ///
    /// Returns any error raised while rendering.
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<Canvas, FenboardError> {
        render::render(request)
    }
}
