//! Configuration types for board rendering.
//!
//! All types implement [`serde::Deserialize`] and every section and field is
//! optional, so an empty document yields the defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`BoardConfig`] - Tile size and base tile colors.
//! - [`LastMoveConfig`] - Colors for the last-move squares.
//! - [`CoordinatesConfig`] - Label size, colors and layout.
//!
//! # Example
//!
//! ```
//! # use fenboard::config::AppConfig;
//! let config: AppConfig = Default::default();
//! assert_eq!(config.board().tile_size(), 100);
//! assert!(config.board().palette().is_ok());
//! ```

use serde::Deserialize;

use fenboard_core::color::Color;

use crate::{FenboardError, render::coordinates::CoordinateLayout, request::Palette};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    board: BoardConfig,

    #[serde(default)]
    last_move: LastMoveConfig,

    #[serde(default)]
    coordinates: CoordinatesConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        board: BoardConfig,
        last_move: LastMoveConfig,
        coordinates: CoordinatesConfig,
    ) -> Self {
        Self {
            board,
            last_move,
            coordinates,
        }
    }

    /// Returns the `[board]` section.
    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    /// Returns the `[last_move]` section.
    pub fn last_move(&self) -> &LastMoveConfig {
        &self.last_move
    }

    /// Returns the `[coordinates]` section.
    pub fn coordinates(&self) -> &CoordinatesConfig {
        &self.coordinates
    }
}

/// The `[board]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Tile side in pixels.
    #[serde(default = "default_tile_size")]
    tile_size: u32,

    #[serde(default = "default_board_dark")]
    dark_color: String,

    #[serde(default = "default_board_light")]
    light_color: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            dark_color: default_board_dark(),
            light_color: default_board_light(),
        }
    }
}

impl BoardConfig {
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Returns the base tile colors.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] naming the key whose color string
    /// cannot be parsed.
    pub fn palette(&self) -> Result<Palette, FenboardError> {
        palette("board", &self.dark_color, &self.light_color)
    }
}

/// The `[last_move]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LastMoveConfig {
    #[serde(default = "default_last_move_dark")]
    dark_color: String,

    #[serde(default = "default_last_move_light")]
    light_color: String,
}

impl Default for LastMoveConfig {
    fn default() -> Self {
        Self {
            dark_color: default_last_move_dark(),
            light_color: default_last_move_light(),
        }
    }
}

impl LastMoveConfig {
    /// Returns the last-move colors, keyed by the parity of each square.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] naming the invalid key.
    pub fn palette(&self) -> Result<Palette, FenboardError> {
        palette("last_move", &self.dark_color, &self.light_color)
    }
}

/// Built-in label layouts selectable from a config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutName {
    #[default]
    Standard,
    EverySquare,
    OuterRim,
    FullRim,
}

impl From<LayoutName> for CoordinateLayout {
    fn from(name: LayoutName) -> Self {
        match name {
            LayoutName::Standard => CoordinateLayout::Standard,
            LayoutName::EverySquare => CoordinateLayout::EverySquare,
            LayoutName::OuterRim => CoordinateLayout::OuterRim,
            LayoutName::FullRim => CoordinateLayout::FullRim,
        }
    }
}

/// The `[coordinates]` section.
///
/// Label colors are keyed by the parity of the tile the label belongs to, so
/// the defaults draw dark-tile labels in the light tile color and vice versa.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatesConfig {
    /// Label font size in pixels.
    #[serde(default = "default_label_size")]
    size: f32,

    /// Label color on dark tiles.
    #[serde(default = "default_board_light")]
    dark_color: String,

    /// Label color on light tiles.
    #[serde(default = "default_board_dark")]
    light_color: String,

    #[serde(default)]
    layout: LayoutName,

    #[serde(default)]
    padding: Option<f32>,

    /// Fill for the canvas area outside the board.
    #[serde(default)]
    outside_fill: Option<String>,
}

impl Default for CoordinatesConfig {
    fn default() -> Self {
        Self {
            size: default_label_size(),
            dark_color: default_board_light(),
            light_color: default_board_dark(),
            layout: LayoutName::default(),
            padding: None,
            outside_fill: None,
        }
    }
}

impl CoordinatesConfig {
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns the label colors keyed by tile parity.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] naming the invalid key.
    pub fn palette(&self) -> Result<Palette, FenboardError> {
        palette("coordinates", &self.dark_color, &self.light_color)
    }

    pub fn layout(&self) -> LayoutName {
        self.layout
    }

    pub fn padding(&self) -> Option<f32> {
        self.padding
    }

    /// Returns the parsed outside fill, or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Config`] if the color string is invalid.
    pub fn outside_fill(&self) -> Result<Option<Color>, FenboardError> {
        self.outside_fill
            .as_deref()
            .map(|value| parse_color("coordinates.outside_fill", value))
            .transpose()
    }
}

fn palette(section: &str, dark: &str, light: &str) -> Result<Palette, FenboardError> {
    Ok(Palette::new(
        parse_color(&format!("{section}.dark_color"), dark)?,
        parse_color(&format!("{section}.light_color"), light)?,
    ))
}

fn parse_color(key: &str, value: &str) -> Result<Color, FenboardError> {
    Color::new(value).map_err(|err| FenboardError::Config(format!("`{key}`: {err}")))
}

fn default_tile_size() -> u32 {
    100
}

fn default_board_dark() -> String {
    "#D18B47".to_string()
}

fn default_board_light() -> String {
    "#FFCE9E".to_string()
}

fn default_last_move_dark() -> String {
    "#AAA23B".to_string()
}

fn default_last_move_light() -> String {
    "#CDD26A".to_string()
}

fn default_label_size() -> f32 {
    20.0
}
