//! Sprite-map documents
//!
//! A sprite map names the rectangular regions of a sheet, decoded from a
//! JSON object keyed by sprite name where each value carries the integer
//! fields `x`, `y`, `w`, `h` (lower-case, case-sensitive):
//!
//! ```text
//! {
//!     "player_idle": { "x": 0,  "y": 0, "w": 16, "h": 16 },
//!     "player_walk": { "x": 16, "y": 0, "w": 16, "h": 16 }
//! }
//! ```
//!
//! A malformed entry fails the whole decode; no partial map is returned.
//! Rectangles are not checked against any sheet here - that happens at
//! slicing time.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::sheet::SheetRect;

/// Error type for sprite-map decoding
#[derive(Debug)]
pub enum MapError {
    /// The map document does not exist
    NotFound(PathBuf),
    /// The document has a missing or non-numeric field
    Malformed(String),
    /// File I/O error after the existence check
    Io(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::NotFound(path) => {
                write!(f, "expected sprite map {} was not found", path.display())
            }
            MapError::Malformed(msg) => write!(f, "malformed sprite map: {}", msg),
            MapError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e.to_string())
    }
}

/// Named slice regions for one sprite sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteMap {
    regions: HashMap<String, SheetRect>,
}

impl SpriteMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a map from a JSON document
    ///
    /// Every entry must carry numeric `x`, `y`, `w`, `h` fields; anything
    /// missing or of the wrong type fails with `MapError::Malformed`.
    /// Unknown extra fields are ignored.
    pub fn from_json_str(document: &str) -> Result<Self, MapError> {
        let regions: HashMap<String, SheetRect> =
            serde_json::from_str(document).map_err(|e| MapError::Malformed(e.to_string()))?;
        Ok(Self { regions })
    }

    /// Decode a map from a JSON file
    ///
    /// Fails with `MapError::NotFound` when the path is not a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(MapError::NotFound(path.to_path_buf()));
        }
        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }

    /// Add or replace a named region
    pub fn insert(&mut self, key: impl Into<String>, rect: SheetRect) {
        self.regions.insert(key.into(), rect);
    }

    /// Look up a region by name
    pub fn get(&self, key: &str) -> Option<SheetRect> {
        self.regions.get(key).copied()
    }

    /// Number of named regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check whether the map has no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over the named regions
    pub fn regions(&self) -> impl Iterator<Item = (&str, SheetRect)> {
        self.regions.iter().map(|(key, rect)| (key.as_str(), *rect))
    }
}
