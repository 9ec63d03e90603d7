//! RGBA raster canvas used for every stage of board rendering.
//!
//! [`Canvas`] wraps a [`tiny_skia::Pixmap`] and adds the handful of
//! operations the renderer composes images with:
//!
//! - inclusive rectangle fills for board tiles
//! - alpha-masked pasting of sprites and overlay layers
//! - exact replacement copies, crops and bilinear resizes for sprite generation
//! - the eight lossless [`Orientation`]s plus arbitrary rotation with an
//!   expanding canvas
//! - PNG encoding and decoding
//!
//! Pixels are stored premultiplied, as `tiny-skia` requires. Colors crossing
//! the API boundary ([`Canvas::pixel`], [`Canvas::fill_rect_inclusive`]) use
//! straight alpha.

use std::path::Path;

use thiserror::Error;
use tiny_skia::{BlendMode, FilterQuality, IntRect, Paint, Pixmap, PixmapPaint, Rect, Transform};

use crate::color::Color;

/// Errors raised by canvas allocation, cropping and PNG I/O.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },

    #[error("crop {width}x{height} at ({x}, {y}) is outside the {canvas_width}x{canvas_height} canvas")]
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("PNG decoding failed: {0}")]
    Decode(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// One of the eight lossless flips and quarter-turn rotations of an image.
///
/// Rotations are counter-clockwise as seen on screen. `Transpose` mirrors
/// along the main diagonal (top-left to bottom-right) and `Transverse` along
/// the anti-diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Identity,
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate180,
    Rotate270,
    Transpose,
    Transverse,
}

impl Orientation {
    /// Returns whether this orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Rotate90 | Self::Rotate270 | Self::Transpose | Self::Transverse
        )
    }

    /// Maps a destination pixel back to the source pixel it is copied from.
    ///
    /// `width` and `height` are the dimensions of the source image.
    fn source_of(self, x: u32, y: u32, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Identity => (x, y),
            Self::FlipHorizontal => (width - 1 - x, y),
            Self::FlipVertical => (x, height - 1 - y),
            Self::Rotate180 => (width - 1 - x, height - 1 - y),
            Self::Rotate90 => (width - 1 - y, x),
            Self::Rotate270 => (y, height - 1 - x),
            Self::Transpose => (y, x),
            Self::Transverse => (width - 1 - y, height - 1 - x),
        }
    }
}

/// An RGBA image.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] when either dimension is zero or
    /// the canvas is too large to allocate.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        Pixmap::new(width, height)
            .map(|pixmap| Self { pixmap })
            .ok_or(RasterError::Allocation { width, height })
    }

    /// Creates a canvas filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, RasterError> {
        let mut canvas = Self::new(width, height)?;
        canvas.pixmap.fill(color.into());
        Ok(canvas)
    }

    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    /// Returns the straight-alpha `[r, g, b, a]` value of a pixel, or `None`
    /// when the coordinates are outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
    }

    /// Returns whether any pixel inside the given rectangle is not fully transparent.
    ///
    /// The rectangle is clipped to the canvas.
    pub fn has_visible_pixels(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return false;
        };
        let stride = self.width() as usize;
        let pixels = self.pixmap.pixels();
        (y0..y1).any(|row| {
            (x0..x1).any(|col| pixels[row as usize * stride + col as usize].alpha() > 0)
        })
    }

    /// Overwrites every pixel from `(x0, y0)` to `(x1, y1)`, both corners
    /// included, with `color`.
    ///
    /// The rectangle is clipped to the canvas; an inverted rectangle paints
    /// nothing.
    pub fn fill_rect_inclusive(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if x1 < x0 || y1 < y0 {
            return;
        }
        let width = (x1 - x0 + 1) as u32;
        let height = (y1 - y0 + 1) as u32;
        self.fill_rect(x0, y0, width, height, color.to_rgba8(), BlendMode::Source);
    }

    /// Composites `source` with its top-left corner at `(x, y)`, using the
    /// source's own alpha channel as the mask (source-over).
    pub fn paste(&mut self, source: &Canvas, x: i32, y: i32) {
        self.draw(source, x, y, BlendMode::SourceOver);
    }

    /// Copies `source` with its top-left corner at `(x, y)`, replacing the
    /// destination pixels including their alpha.
    pub fn copy_from(&mut self, source: &Canvas, x: i32, y: i32) {
        self.draw(source, x, y, BlendMode::Source);
    }

    /// Source-over blends a solid color over a rectangle.
    ///
    /// Used to composite rasterized glyph coverage.
    pub fn blend_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        self.fill_rect(x, y, width, height, color.to_rgba8(), BlendMode::SourceOver);
    }

    /// Returns a copy of the given rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Crop`] when the rectangle is empty or does not
    /// lie entirely inside the canvas.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Canvas, RasterError> {
        let error = || RasterError::Crop {
            x,
            y,
            width,
            height,
            canvas_width: self.width(),
            canvas_height: self.height(),
        };
        if x.saturating_add(width) > self.width() || y.saturating_add(height) > self.height() {
            return Err(error());
        }
        let rect = IntRect::from_xywh(x as i32, y as i32, width, height).ok_or_else(error)?;
        self.pixmap
            .clone_rect(rect)
            .map(Canvas::from_pixmap)
            .ok_or_else(error)
    }

    /// Returns a bilinearly resampled copy with the given dimensions.
    pub fn resize(&self, width: u32, height: u32) -> Result<Canvas, RasterError> {
        if width == self.width() && height == self.height() {
            return Ok(self.clone());
        }
        let mut target = Canvas::new(width, height)?;
        let transform = Transform::from_scale(
            width as f32 / self.width() as f32,
            height as f32 / self.height() as f32,
        );
        target.pixmap.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &bilinear_paint(),
            transform,
            None,
        );
        Ok(target)
    }

    /// Returns a copy flipped or rotated by a lossless [`Orientation`].
    pub fn oriented(&self, orientation: Orientation) -> Canvas {
        if orientation == Orientation::Identity {
            return self.clone();
        }
        let (width, height) = (self.width(), self.height());
        let (out_width, out_height) = if orientation.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        };
        // Same pixel count as the source, so allocation cannot fail.
        let mut target = Pixmap::new(out_width, out_height).expect("non-empty canvas");
        let source = self.pixmap.pixels();
        let pixels = target.pixels_mut();
        for y in 0..out_height {
            for x in 0..out_width {
                let (sx, sy) = orientation.source_of(x, y, width, height);
                pixels[(y * out_width + x) as usize] = source[(sy * width + sx) as usize];
            }
        }
        Canvas::from_pixmap(target)
    }

    /// Rotates counter-clockwise by `degrees` around the image center,
    /// growing the canvas so the whole rotated image fits.
    pub fn rotate_expand(&self, degrees: f32) -> Result<Canvas, RasterError> {
        let radians = degrees.to_radians();
        let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
        let (width, height) = (self.width() as f32, self.height() as f32);
        // Trim float noise so exact multiples do not gain a pixel.
        let out_width = (width * cos + height * sin - 1e-3).ceil().max(1.0) as u32;
        let out_height = (width * sin + height * cos - 1e-3).ceil().max(1.0) as u32;

        let mut target = Canvas::new(out_width, out_height)?;
        let transform = Transform::from_translate(-width / 2.0, -height / 2.0)
            .post_rotate(-degrees)
            .post_translate(out_width as f32 / 2.0, out_height as f32 / 2.0);
        target.pixmap.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &bilinear_paint(),
            transform,
            None,
        );
        Ok(target)
    }

    /// Decodes a PNG file.
    pub fn load_png(path: impl AsRef<Path>) -> Result<Canvas, RasterError> {
        Pixmap::load_png(path)
            .map(Canvas::from_pixmap)
            .map_err(|err| RasterError::Decode(err.to_string()))
    }

    /// Decodes PNG bytes.
    pub fn decode_png(data: &[u8]) -> Result<Canvas, RasterError> {
        Pixmap::decode_png(data)
            .map(Canvas::from_pixmap)
            .map_err(|err| RasterError::Decode(err.to_string()))
    }

    /// Writes the canvas to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        self.pixmap
            .save_png(path)
            .map_err(|err| RasterError::Encode(err.to_string()))
    }

    /// Encodes the canvas as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.pixmap
            .encode_png()
            .map_err(|err| RasterError::Encode(err.to_string()))
    }

    /// Clips a rectangle to the canvas, returning `(x0, y0, x1, y1)` with
    /// exclusive maxima, or `None` when nothing remains.
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + width as i64).min(self.width() as i64);
        let y1 = (y as i64 + height as i64).min(self.height() as i64);
        (x0 < x1 && y0 < y1).then_some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        [r, g, b, a]: [u8; 4],
        blend_mode: BlendMode,
    ) {
        if self.clip(x, y, width, height).is_none() {
            return;
        }
        let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.blend_mode = blend_mode;
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn draw(&mut self, source: &Canvas, x: i32, y: i32, blend_mode: BlendMode) {
        if self.clip(x, y, source.width(), source.height()).is_none() {
            return;
        }
        let paint = PixmapPaint {
            blend_mode,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            x,
            y,
            source.pixmap.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }
}

fn bilinear_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    }
}
