//! Image and font file loading
//!
//! Existence-checked loaders that turn files on disk into the handles the
//! caches hold: `RgbaImage` for raster images, `SizedFont` for fonts.
//! Decoding is delegated entirely to the `image` and `fontdue` crates.
//!
//! A missing file is always reported as `LoadError::NotFound` before any
//! decoding is attempted, so callers can distinguish a bad path from a bad
//! file.

use std::fmt;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings, Metrics};
use image::RgbaImage;

/// Extension assumed for font files named without one
const DEFAULT_FONT_EXTENSION: &str = "ttf";

/// RGB color treated as fully transparent when applied to an image
pub type ColorKey = [u8; 3];

/// Error type for load operations
#[derive(Debug)]
pub enum LoadError {
    /// The requested file does not exist
    NotFound(PathBuf),
    /// The configured base path is not a directory
    NotADirectory(PathBuf),
    /// File I/O error after the existence check
    Io(String),
    /// The file exists but could not be decoded
    Decode(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(path) => {
                write!(f, "expected file {} was not found", path.display())
            }
            LoadError::NotADirectory(path) => {
                write!(f, "{} is not a directory", path.display())
            }
            LoadError::Io(msg) => write!(f, "I/O error: {}", msg),
            LoadError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e.to_string())
    }
}

/// Force alpha 0 on every pixel whose RGB channels match the key
///
/// The RGB channels are left untouched so the keyed color can still be
/// inspected after the fact.
pub fn apply_color_key(image: &mut RgbaImage, key: ColorKey) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if [r, g, b] == key {
            pixel.0[3] = 0;
        }
    }
}

/// Load a raster image from `dir/file_name`
///
/// Fails with `LoadError::NotFound` when the path is not a file. The
/// decoded image is converted to RGBA8 and the optional color key is
/// applied before returning.
pub fn load_image(
    dir: impl AsRef<Path>,
    file_name: &str,
    color_key: Option<ColorKey>,
) -> Result<RgbaImage, LoadError> {
    let path = dir.as_ref().join(file_name);
    if !path.is_file() {
        return Err(LoadError::NotFound(path));
    }

    let decoded = image::open(&path).map_err(|e| LoadError::Decode(e.to_string()))?;
    let mut surface = decoded.to_rgba8();
    if let Some(key) = color_key {
        apply_color_key(&mut surface, key);
    }
    Ok(surface)
}

/// A font loaded at a fixed pixel size
///
/// Wraps a parsed `fontdue::Font` together with the size it was requested
/// at, so callers can rasterize glyphs without carrying the size around
/// separately.
pub struct SizedFont {
    font: Font,
    size: f32,
}

impl SizedFont {
    /// Pixel size the font was loaded at
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The underlying parsed font
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Rasterize a glyph at the loaded size
    ///
    /// Returns the glyph metrics and a coverage bitmap, one byte per
    /// pixel.
    pub fn rasterize(&self, character: char) -> (Metrics, Vec<u8>) {
        self.font.rasterize(character, self.size)
    }
}

impl fmt::Debug for SizedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizedFont")
            .field("size", &self.size)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

/// Load a font from `dir/file_name` at the given pixel size
///
/// A file name without an extension gets ".ttf" appended before the path
/// is resolved. Fails with `LoadError::NotFound` when the resolved path is
/// not a file.
pub fn load_font(
    dir: impl AsRef<Path>,
    file_name: &str,
    size: f32,
) -> Result<SizedFont, LoadError> {
    let file_name = if Path::new(file_name).extension().is_none() {
        format!("{}.{}", file_name, DEFAULT_FONT_EXTENSION)
    } else {
        file_name.to_string()
    };

    let path = dir.as_ref().join(&file_name);
    if !path.is_file() {
        return Err(LoadError::NotFound(path));
    }

    let bytes = std::fs::read(&path)?;
    let font = Font::from_bytes(
        bytes,
        FontSettings {
            scale: size,
            ..FontSettings::default()
        },
    )
    .map_err(|e| LoadError::Decode(e.to_string()))?;

    Ok(SizedFont { font, size })
}
