//! Measurable, drawable fonts for coordinate labels.
//!
//! # Overview
//!
//! - [`LabelFont`] - The capability the renderer needs from a font: measure a
//!   string and draw it onto a [`Canvas`]
//! - [`FontFace`] - A font family backed by a `cosmic-text` [`FontSystem`],
//!   either the system fonts or a single font loaded from bytes
//! - [`CosmicFont`] - A [`FontFace`] at a fixed pixel size, implementing [`LabelFont`]
//!
//! # Quick Start
//!
//! ```no_run
//! # use fenboard_core::text::{FontFace, LabelFont};
//! let face = FontFace::system("DejaVu Sans");
//! let font = face.at_size(18.0);
//! let size = font.measure("e4");
//! assert!(size.height() > 0.0);
//! ```

use std::sync::{Arc, Mutex};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, fontdb};
use log::info;
use thiserror::Error;

use crate::{
    color::Color,
    geometry::{Point, Size},
    raster::Canvas,
};

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Errors raised while building a [`FontFace`].
#[derive(Debug, Error)]
pub enum TextError {
    #[error("font data contains no usable face")]
    NoFace,
}

/// A font that can measure and draw single-line labels.
///
/// Positions passed to [`draw`](LabelFont::draw) are the top-left corner of
/// the text box reported by [`measure`](LabelFont::measure).
pub trait LabelFont: Send + Sync {
    /// Returns the size of the rendered text in pixels.
    fn measure(&self, text: &str) -> Size;

    /// Draws `text` onto `canvas` with its top-left corner at `position`.
    fn draw(&self, canvas: &mut Canvas, position: Point, text: &str, color: Color);
}

/// Font system and glyph cache, locked together while shaping or drawing.
struct FontContext {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl FontContext {
    fn shared(font_system: FontSystem) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            font_system,
            swash_cache: SwashCache::new(),
        }))
    }
}

/// A font family together with the font system that resolves it.
///
/// Cloning a `FontFace` is cheap; clones share the underlying font system
/// and glyph cache.
#[derive(Clone)]
pub struct FontFace {
    context: Arc<Mutex<FontContext>>,
    family: String,
}

impl FontFace {
    /// Creates a face resolved against the fonts installed on the system.
    pub fn system(family: impl Into<String>) -> Self {
        info!("Initializing system FontSystem");
        Self {
            context: FontContext::shared(FontSystem::new()),
            family: family.into(),
        }
    }

    /// Creates a face from TrueType/OpenType font data.
    ///
    /// The data is loaded into a private font database so that only this
    /// font is ever used for shaping.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::NoFace`] when the data contains no parsable face.
    pub fn from_data(data: Vec<u8>) -> Result<Self, TextError> {
        let mut db = fontdb::Database::new();
        db.load_font_data(data);

        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or(TextError::NoFace)?;
        info!(family; "Loaded font face");

        Ok(Self {
            context: FontContext::shared(FontSystem::new_with_locale_and_db(
                "en-US".to_string(),
                db,
            )),
            family,
        })
    }

    /// Returns the family name used for shaping.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns this face at a fixed pixel size.
    pub fn at_size(&self, size: f32) -> CosmicFont {
        CosmicFont {
            face: self.clone(),
            metrics: Metrics::new(size, size * LINE_HEIGHT_FACTOR),
        }
    }
}

/// A [`FontFace`] at a fixed pixel size.
pub struct CosmicFont {
    face: FontFace,
    metrics: Metrics,
}

impl CosmicFont {
    /// Returns the font size in pixels.
    pub fn size(&self) -> f32 {
        self.metrics.font_size
    }

    /// Shapes `text` and hands the shaped buffer and the shared glyph cache to `f`.
    fn with_buffer<R>(
        &self,
        text: &str,
        f: impl FnOnce(
            &mut cosmic_text::BorrowedWithFontSystem<'_, Buffer>,
            &mut SwashCache,
        ) -> R,
    ) -> R {
        let mut context = self
            .face
            .context
            .lock()
            .expect("failed to lock FontSystem");
        let FontContext {
            font_system,
            swash_cache,
        } = &mut *context;

        let mut buffer = Buffer::new(font_system, self.metrics);
        let mut buffer = buffer.borrow_with(font_system);
        let attrs = Attrs::new().family(Family::Name(&self.face.family));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        f(&mut buffer, swash_cache)
    }
}

impl LabelFont for CosmicFont {
    fn measure(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let line_height = self.metrics.line_height;
        self.with_buffer(text, |buffer, _| {
            let mut max_width: f32 = 0.0;
            let mut total_height: f32 = 0.0;

            for run in buffer.layout_runs() {
                if let Some(last) = run.glyphs.last() {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += line_height;
            }

            if total_height == 0.0 {
                // Nothing was laid out; fall back to an average glyph width.
                max_width = text.chars().count() as f32 * (self.metrics.font_size * 0.55);
                total_height = line_height;
            }

            Size::new(max_width, total_height)
        })
    }

    fn draw(&self, canvas: &mut Canvas, position: Point, text: &str, color: Color) {
        if text.is_empty() {
            return;
        }

        let (origin_x, origin_y) = position.round();
        let [r, g, b, a] = color.to_rgba8();

        self.with_buffer(text, |buffer, swash_cache| {
            buffer.draw(
                swash_cache,
                cosmic_text::Color::rgba(r, g, b, a),
                |x, y, width, height, glyph| {
                    canvas.blend_rect(
                        origin_x + x,
                        origin_y + y,
                        width,
                        height,
                        Color::from_rgba8(glyph.r(), glyph.g(), glyph.b(), glyph.a()),
                    );
                },
            );
        });
    }
}
