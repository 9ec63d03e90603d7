//! Sprite sets and the provider traits the renderer draws from.
//!
//! A provider hands out sprites already scaled to the requested tile size.
//! [`PieceSprites`] and [`ArrowSprites`] are themselves providers (they
//! rescale on demand), and the folder loaders in [`crate::loaders`] implement
//! the traits with per-size caches.

use std::{collections::HashMap, sync::Arc};

use log::trace;

use fenboard_core::raster::Canvas;
use fenboard_parser::Piece;

use crate::FenboardError;

/// Supplies piece sprites scaled to a tile size.
pub trait PieceSet {
    /// Returns a sprite set whose every sprite is `tile_size` pixels square.
    ///
    /// # Errors
    ///
    /// Returns an error when the sprites cannot be produced at this size.
    fn sprites(&self, tile_size: u32) -> Result<Arc<PieceSprites>, FenboardError>;
}

/// Supplies arrow templates scaled to a tile size.
pub trait ArrowSet {
    /// Returns arrow templates scaled for `tile_size` pixel tiles.
    ///
    /// # Errors
    ///
    /// Returns an error when the templates cannot be produced at this size.
    fn sprites(&self, tile_size: u32) -> Result<Arc<ArrowSprites>, FenboardError>;
}

/// Piece sprites for one tile size.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceSprites {
    tile_size: u32,
    sprites: HashMap<Piece, Canvas>,
}

impl PieceSprites {
    /// Creates an empty set for `tile_size` pixel tiles.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            sprites: HashMap::new(),
        }
    }

    /// Adds the sprite for `piece`, scaling it to the tile size if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Raster`] if scaling fails.
    pub fn insert(&mut self, piece: Piece, sprite: Canvas) -> Result<(), FenboardError> {
        let sprite = if sprite.width() == self.tile_size && sprite.height() == self.tile_size {
            sprite
        } else {
            sprite.resize(self.tile_size, self.tile_size)?
        };
        self.sprites.insert(piece, sprite);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, piece: Piece, sprite: Canvas) -> Result<Self, FenboardError> {
        self.insert(piece, sprite)?;
        Ok(self)
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Returns the sprite for `piece`, if the set has one.
    pub fn get(&self, piece: Piece) -> Option<&Canvas> {
        self.sprites.get(&piece)
    }

    /// Returns a copy of this set scaled to `tile_size`.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Raster`] if a sprite cannot be scaled.
    pub fn resized(&self, tile_size: u32) -> Result<Self, FenboardError> {
        let mut resized = Self::new(tile_size);
        for (piece, sprite) in &self.sprites {
            resized.insert(*piece, sprite.clone())?;
        }
        Ok(resized)
    }
}

impl PieceSet for PieceSprites {
    fn sprites(&self, tile_size: u32) -> Result<Arc<PieceSprites>, FenboardError> {
        if tile_size == self.tile_size {
            return Ok(Arc::new(self.clone()));
        }
        trace!(from = self.tile_size, to = tile_size; "Rescaling piece sprites");
        self.resized(tile_size).map(Arc::new)
    }
}

/// Arrow templates for one tile size.
///
/// - The knight template is an L-shaped arrow spanning 3 tiles wide and 2
///   tiles high, pointing from the bottom-right tile to the top-left tile.
/// - The straight template is 1 tile wide and 3 tiles high: head on the top
///   tile, stretchable body in the middle, tail on the bottom tile.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowSprites {
    tile_size: u32,
    knight: Canvas,
    straight: Canvas,
}

impl ArrowSprites {
    /// Creates templates for `tile_size`, scaling both images to their
    /// expected dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Raster`] if scaling fails.
    pub fn new(tile_size: u32, knight: Canvas, straight: Canvas) -> Result<Self, FenboardError> {
        Ok(Self {
            tile_size,
            knight: fit(knight, tile_size * 3, tile_size * 2)?,
            straight: fit(straight, tile_size, tile_size * 3)?,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// The knight template, `3t x 2t`.
    pub fn knight(&self) -> &Canvas {
        &self.knight
    }

    /// The straight template, `t x 3t`.
    pub fn straight(&self) -> &Canvas {
        &self.straight
    }
}

impl ArrowSet for ArrowSprites {
    fn sprites(&self, tile_size: u32) -> Result<Arc<ArrowSprites>, FenboardError> {
        if tile_size == self.tile_size {
            return Ok(Arc::new(self.clone()));
        }
        trace!(from = self.tile_size, to = tile_size; "Rescaling arrow templates");
        Self::new(tile_size, self.knight.clone(), self.straight.clone()).map(Arc::new)
    }
}

fn fit(canvas: Canvas, width: u32, height: u32) -> Result<Canvas, FenboardError> {
    if canvas.width() == width && canvas.height() == height {
        Ok(canvas)
    } else {
        Ok(canvas.resize(width, height)?)
    }
}
