//! Sprite and font loaders backed by files on disk.
//!
//! # Overview
//!
//! - [`PieceFolder`] - Piece sprites from `white/` and `black/` sub-folders
//! - [`ArrowFolder`] - The knight and straight arrow templates
//! - [`FontFile`] - A TrueType/OpenType font file
//! - [`SystemFont`] - An installed font family
//!
//! Each loader reads its files once in `open` and keeps a cache of scaled
//! results per tile size (or font size). The caches sit behind a [`Mutex`],
//! so one loader can be shared across threads and renders. No file is read
//! during a render.

use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use log::{debug, info, trace};

use fenboard_core::{
    raster::Canvas,
    text::{FontFace, LabelFont},
};
use fenboard_parser::{Piece, PieceKind, Side};

use crate::{
    FenboardError,
    render::coordinates::FontSource,
    sprites::{ArrowSet, ArrowSprites, PieceSet, PieceSprites},
};

fn load_png(path: &Path) -> Result<Canvas, FenboardError> {
    trace!(path:? = path; "Loading PNG");
    Canvas::load_png(path).map_err(|err| FenboardError::new_resource_error(path, err))
}

/// Piece sprites loaded from a folder.
///
/// The folder holds `white/` and `black/` sub-folders, each with `Pawn.png`,
/// `Rook.png`, `Knight.png`, `Bishop.png`, `Queen.png` and `King.png`.
pub struct PieceFolder {
    path: PathBuf,
    originals: HashMap<Piece, Canvas>,
    resized: Mutex<HashMap<u32, Arc<PieceSprites>>>,
}

impl PieceFolder {
    /// Loads all twelve sprites from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Resource`] naming the first file that is
    /// missing or not a PNG.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FenboardError> {
        let path = path.as_ref().to_path_buf();
        info!(path:? = path; "Loading piece folder");

        let mut originals = HashMap::with_capacity(12);
        for side in [Side::White, Side::Black] {
            for kind in PieceKind::ALL {
                let file = path.join(side.name()).join(format!("{}.png", kind.name()));
                originals.insert(Piece::new(side, kind), load_png(&file)?);
            }
        }

        Ok(Self {
            path,
            originals,
            resized: Mutex::new(HashMap::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PieceSet for PieceFolder {
    fn sprites(&self, tile_size: u32) -> Result<Arc<PieceSprites>, FenboardError> {
        let mut resized = self.resized.lock().expect("piece cache lock poisoned");
        if let Some(sprites) = resized.get(&tile_size) {
            trace!(tile_size; "Piece sprite cache hit");
            return Ok(Arc::clone(sprites));
        }

        let mut sprites = PieceSprites::new(tile_size);
        for (piece, sprite) in &self.originals {
            sprites.insert(*piece, sprite.clone())?;
        }
        debug!(path:? = self.path, tile_size; "Scaled piece sprites");

        let sprites = Arc::new(sprites);
        resized.insert(tile_size, Arc::clone(&sprites));
        Ok(sprites)
    }
}

impl fmt::Debug for PieceFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceFolder")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Arrow templates loaded from a folder holding `Knight.png` and `Up.png`.
pub struct ArrowFolder {
    path: PathBuf,
    knight: Canvas,
    straight: Canvas,
    resized: Mutex<HashMap<u32, Arc<ArrowSprites>>>,
}

impl ArrowFolder {
    /// Loads both templates from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Resource`] if either file cannot be loaded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FenboardError> {
        let path = path.as_ref().to_path_buf();
        info!(path:? = path; "Loading arrow folder");

        let knight = load_png(&path.join("Knight.png"))?;
        let straight = load_png(&path.join("Up.png"))?;

        Ok(Self {
            path,
            knight,
            straight,
            resized: Mutex::new(HashMap::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArrowSet for ArrowFolder {
    fn sprites(&self, tile_size: u32) -> Result<Arc<ArrowSprites>, FenboardError> {
        let mut resized = self.resized.lock().expect("arrow cache lock poisoned");
        if let Some(sprites) = resized.get(&tile_size) {
            trace!(tile_size; "Arrow template cache hit");
            return Ok(Arc::clone(sprites));
        }

        let sprites = Arc::new(ArrowSprites::new(
            tile_size,
            self.knight.clone(),
            self.straight.clone(),
        )?);
        debug!(path:? = self.path, tile_size; "Scaled arrow templates");

        resized.insert(tile_size, Arc::clone(&sprites));
        Ok(sprites)
    }
}

impl fmt::Debug for ArrowFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrowFolder")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Fonts of one face, cached per pixel size.
struct SizedFonts {
    face: FontFace,
    fonts: Mutex<HashMap<u32, Arc<dyn LabelFont>>>,
}

impl SizedFonts {
    fn new(face: FontFace) -> Self {
        Self {
            face,
            fonts: Mutex::new(HashMap::new()),
        }
    }

    fn font(&self, size: f32) -> Result<Arc<dyn LabelFont>, FenboardError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FenboardError::Invariant(format!(
                "font size must be positive, got {size}"
            )));
        }

        let mut fonts = self.fonts.lock().expect("font cache lock poisoned");
        let font = fonts.entry(size.to_bits()).or_insert_with(|| {
            trace!(family = self.face.family(), size; "Creating sized font");
            let font: Arc<dyn LabelFont> = Arc::new(self.face.at_size(size));
            font
        });
        Ok(Arc::clone(font))
    }
}

/// A font loaded from a TrueType or OpenType file.
///
/// Only the loaded face is used for labels; system fonts are never consulted.
pub struct FontFile {
    path: PathBuf,
    fonts: SizedFonts,
}

impl FontFile {
    /// Reads the font file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FenboardError::Resource`] if the file cannot be read or holds
    /// no usable face.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FenboardError> {
        let path = path.as_ref().to_path_buf();
        info!(path:? = path; "Loading font file");

        let data = fs::read(&path).map_err(|err| FenboardError::new_resource_error(&path, err))?;
        let face =
            FontFace::from_data(data).map_err(|err| FenboardError::new_resource_error(&path, err))?;

        Ok(Self {
            path,
            fonts: SizedFonts::new(face),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the family name found in the file.
    pub fn family(&self) -> &str {
        self.fonts.face.family()
    }
}

impl FontSource for FontFile {
    fn font(&self, size: f32) -> Result<Arc<dyn LabelFont>, FenboardError> {
        self.fonts.font(size)
    }
}

impl fmt::Debug for FontFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFile")
            .field("path", &self.path)
            .field("family", &self.family())
            .finish()
    }
}

/// An installed font family, resolved through the system font database.
pub struct SystemFont {
    fonts: SizedFonts,
}

impl SystemFont {
    /// Creates a source for `family`; the system fonts are scanned here.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            fonts: SizedFonts::new(FontFace::system(family)),
        }
    }

    pub fn family(&self) -> &str {
        self.fonts.face.family()
    }
}

impl FontSource for SystemFont {
    fn font(&self, size: f32) -> Result<Arc<dyn LabelFont>, FenboardError> {
        self.fonts.font(size)
    }
}

impl fmt::Debug for SystemFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFont")
            .field("family", &self.family())
            .finish()
    }
}
