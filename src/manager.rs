//! Directory-bound resource managers
//!
//! Managers bundle loading, slicing, and caching behind one interface
//! bound to a single asset directory, so game code can say "load
//! sheet.png as a 4x4 grid" and then fetch sprites by key without
//! touching paths again.
//!
//! ```text
//! let mut images = ImageManager::new("assets/images")?;
//! images.load_image("logo.png", "logo", None)?;
//! images.load_sheet("tiles.png", SheetGrid::new(2, 2, 16, 16),
//!                   &[Some("grass"), Some("dirt"), Some("rock"), None],
//!                   Some([255, 0, 255]))?;
//! let grass = images.get("grass");
//! ```
//!
//! Managers keep the cache discipline of `KeyedCache`: direct lookup
//! only, no iteration, no per-key removal.

use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::cache::{FontCache, ImageCache};
use crate::loader::{load_font, load_image, ColorKey, LoadError, SizedFont};
use crate::map::{MapError, SpriteMap};
use crate::sheet::{slice_grid_into, slice_map_into, SheetError, SheetGrid};

/// Error type for manager operations that combine loading and slicing
#[derive(Debug)]
pub enum ManagerError {
    /// Loading the backing file failed
    Load(LoadError),
    /// Slicing the loaded sheet failed
    Sheet(SheetError),
    /// Decoding the sprite-map document failed
    Map(MapError),
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::Load(e) => write!(f, "{}", e),
            ManagerError::Sheet(e) => write!(f, "{}", e),
            ManagerError::Map(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ManagerError {}

impl From<LoadError> for ManagerError {
    fn from(e: LoadError) -> Self {
        ManagerError::Load(e)
    }
}

impl From<SheetError> for ManagerError {
    fn from(e: SheetError) -> Self {
        ManagerError::Sheet(e)
    }
}

impl From<MapError> for ManagerError {
    fn from(e: MapError) -> Self {
        ManagerError::Map(e)
    }
}

/// Image loading and caching bound to one image directory
#[derive(Debug)]
pub struct ImageManager {
    image_dir: PathBuf,
    cache: ImageCache,
}

impl ImageManager {
    /// Create a manager for an existing image directory
    ///
    /// Fails with `LoadError::NotADirectory` when `image_dir` is not a
    /// directory.
    pub fn new(image_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let image_dir = image_dir.into();
        if !image_dir.is_dir() {
            return Err(LoadError::NotADirectory(image_dir));
        }
        Ok(Self {
            image_dir,
            cache: ImageCache::new(),
        })
    }

    /// Load a single image from the directory and cache it under `key`
    pub fn load_image(
        &mut self,
        file_name: &str,
        key: &str,
        color_key: Option<ColorKey>,
    ) -> Result<(), LoadError> {
        let surface = load_image(&self.image_dir, file_name, color_key)?;
        self.cache.add_image(key, surface);
        Ok(())
    }

    /// Load a sheet from the directory and slice it into the cache
    ///
    /// The color key is applied to the whole sheet before slicing, so
    /// every slice inherits it.
    pub fn load_sheet(
        &mut self,
        file_name: &str,
        grid: SheetGrid,
        keys: &[Option<&str>],
        color_key: Option<ColorKey>,
    ) -> Result<(), ManagerError> {
        let sheet = load_image(&self.image_dir, file_name, color_key)?;
        slice_grid_into(&sheet, grid, keys, None, &mut self.cache)?;
        Ok(())
    }

    /// Load a sheet plus its sprite-map document and slice it into the
    /// cache
    ///
    /// Both files are resolved against the manager's directory.
    pub fn load_sheet_map(
        &mut self,
        file_name: &str,
        map_file: &str,
        color_key: Option<ColorKey>,
    ) -> Result<(), ManagerError> {
        let sheet = load_image(&self.image_dir, file_name, color_key)?;
        let map = SpriteMap::from_json_file(self.image_dir.join(map_file))?;
        slice_map_into(&sheet, &map, &mut self.cache)?;
        Ok(())
    }

    /// Look up a cached image by key
    pub fn get(&self, key: &str) -> Option<&RgbaImage> {
        self.cache.get_image(key)
    }

    /// Check whether an image key is present
    pub fn has(&self, key: &str) -> bool {
        self.cache.has_image(key)
    }

    /// Remove every cached image
    pub fn clear(&mut self) {
        self.cache.clear_cache();
    }

    /// The directory this manager loads from
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
}

/// Font loading and caching bound to one font directory
#[derive(Debug)]
pub struct FontManager {
    font_dir: PathBuf,
    cache: FontCache,
}

impl FontManager {
    /// Create a manager for an existing font directory
    ///
    /// Fails with `LoadError::NotADirectory` when `font_dir` is not a
    /// directory.
    pub fn new(font_dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let font_dir = font_dir.into();
        if !font_dir.is_dir() {
            return Err(LoadError::NotADirectory(font_dir));
        }
        Ok(Self {
            font_dir,
            cache: FontCache::new(),
        })
    }

    /// Load a font from the directory at a pixel size and cache it under
    /// `key`
    ///
    /// File names without an extension resolve with ".ttf" appended.
    pub fn load_font(&mut self, file_name: &str, size: f32, key: &str) -> Result<(), LoadError> {
        let font = load_font(&self.font_dir, file_name, size)?;
        self.cache.add_font(key, font);
        Ok(())
    }

    /// Look up a cached font by key
    pub fn get(&self, key: &str) -> Option<&SizedFont> {
        self.cache.get_font(key)
    }

    /// Check whether a font key is present
    pub fn has(&self, key: &str) -> bool {
        self.cache.has_font(key)
    }

    /// Remove every cached font
    pub fn clear(&mut self) {
        self.cache.clear_cache();
    }

    /// The directory this manager loads from
    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }
}
