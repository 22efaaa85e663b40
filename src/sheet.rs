//! Sprite-sheet slicing
//!
//! A sprite sheet is one raster image containing many logical images. The
//! functions here cut a sheet into named sub-images, either along a
//! uniform rows x cols grid or from a map of named rectangles, and hand
//! the results back as a mapping or feed them straight into an
//! `ImageCache`.
//!
//! Every slice copies its pixels out of the sheet, so the produced images
//! stay usable after the sheet itself is dropped.

use std::collections::HashMap;
use std::fmt;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::cache::ImageCache;
use crate::loader::{apply_color_key, ColorKey};
use crate::map::SpriteMap;

/// A rectangular region of a sprite sheet, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl SheetRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

impl fmt::Display for SheetRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
}

/// Grid layout of a uniform sprite sheet
///
/// Cells are addressed row-major: row 0 column 0 first, then the rest of
/// row 0, then row 1, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGrid {
    pub rows: u32,
    pub cols: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl SheetGrid {
    pub fn new(rows: u32, cols: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            rows,
            cols,
            cell_width,
            cell_height,
        }
    }

    /// Number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Rectangle of the cell at (row, col)
    ///
    /// The column drives the x offset and the row drives the y offset.
    pub fn cell_rect(&self, row: u32, col: u32) -> SheetRect {
        SheetRect {
            x: col * self.cell_width,
            y: row * self.cell_height,
            w: self.cell_width,
            h: self.cell_height,
        }
    }
}

/// Error type for slicing operations
#[derive(Debug)]
pub enum SheetError {
    /// Grid or key parameters are structurally invalid
    Configuration(String),
    /// A requested rectangle exceeds the sheet surface
    OutOfBounds {
        rect: SheetRect,
        sheet_width: u32,
        sheet_height: u32,
    },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Configuration(msg) => write!(f, "configuration error: {}", msg),
            SheetError::OutOfBounds {
                rect,
                sheet_width,
                sheet_height,
            } => write!(
                f,
                "region {} exceeds the {}x{} sheet",
                rect, sheet_width, sheet_height
            ),
        }
    }
}

impl std::error::Error for SheetError {}

/// Extract one rectangular region of a sheet as an independent image
///
/// Fails with `SheetError::OutOfBounds` when the rectangle does not fit
/// inside the sheet. The pixels are copied.
pub fn extract_region(sheet: &RgbaImage, rect: SheetRect) -> Result<RgbaImage, SheetError> {
    let right = rect.x as u64 + rect.w as u64;
    let bottom = rect.y as u64 + rect.h as u64;
    if right > sheet.width() as u64 || bottom > sheet.height() as u64 {
        return Err(SheetError::OutOfBounds {
            rect,
            sheet_width: sheet.width(),
            sheet_height: sheet.height(),
        });
    }

    Ok(imageops::crop_imm(sheet, rect.x, rect.y, rect.w, rect.h).to_image())
}

/// Shared grid walk behind `slice_grid` and `slice_grid_into`
fn slice_grid_cells(
    sheet: &RgbaImage,
    grid: SheetGrid,
    keys: &[Option<&str>],
    color_key: Option<ColorKey>,
    mut store: impl FnMut(&str, RgbaImage),
) -> Result<(), SheetError> {
    if grid.rows == 0 || grid.cols == 0 {
        return Err(SheetError::Configuration(
            "expected at least one sheet cell".to_string(),
        ));
    }
    if keys.len() != grid.cell_count() {
        return Err(SheetError::Configuration(format!(
            "{} rows x {} cols needs {} keys, got {}",
            grid.rows,
            grid.cols,
            grid.cell_count(),
            keys.len()
        )));
    }

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let cell = row as usize * grid.cols as usize + col as usize;
            let key = match keys[cell] {
                Some(key) => key,
                None => continue, // cell intentionally produces no image
            };

            let mut slice = extract_region(sheet, grid.cell_rect(row, col))?;
            if let Some(color) = color_key {
                apply_color_key(&mut slice, color);
            }
            store(key, slice);
        }
    }
    Ok(())
}

/// Slice a sheet along a grid, returning the named sub-images
///
/// `keys` assigns one key per cell in row-major order and must have
/// exactly `rows * cols` entries; a `None` entry skips its cell. Repeated
/// keys overwrite earlier slices. The optional color key is applied to
/// every produced slice.
pub fn slice_grid(
    sheet: &RgbaImage,
    grid: SheetGrid,
    keys: &[Option<&str>],
    color_key: Option<ColorKey>,
) -> Result<HashMap<String, RgbaImage>, SheetError> {
    let mut slices = HashMap::new();
    slice_grid_cells(sheet, grid, keys, color_key, |key, slice| {
        slices.insert(key.to_string(), slice);
    })?;
    Ok(slices)
}

/// Slice a sheet along a grid, storing the sub-images in a cache
///
/// Same contract as [`slice_grid`], but each produced slice goes straight
/// into `cache` under its key. When a cell fails the bounds check, slices
/// already stored by this call stay in the cache.
pub fn slice_grid_into(
    sheet: &RgbaImage,
    grid: SheetGrid,
    keys: &[Option<&str>],
    color_key: Option<ColorKey>,
    cache: &mut ImageCache,
) -> Result<(), SheetError> {
    slice_grid_cells(sheet, grid, keys, color_key, |key, slice| {
        cache.add_image(key, slice)
    })
}

/// Slice a sheet from a map of named rectangles
///
/// Produces one sub-image per map entry. Rectangles are bounds-checked
/// here, not at map decode time.
pub fn slice_map(
    sheet: &RgbaImage,
    map: &SpriteMap,
) -> Result<HashMap<String, RgbaImage>, SheetError> {
    let mut slices = HashMap::new();
    for (key, rect) in map.regions() {
        slices.insert(key.to_string(), extract_region(sheet, rect)?);
    }
    Ok(slices)
}

/// Slice a sheet from a map of named rectangles into a cache
///
/// Same contract as [`slice_map`]; slices stored before a failing bounds
/// check stay in the cache.
pub fn slice_map_into(
    sheet: &RgbaImage,
    map: &SpriteMap,
    cache: &mut ImageCache,
) -> Result<(), SheetError> {
    for (key, rect) in map.regions() {
        cache.add_image(key, extract_region(sheet, rect)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    /// 64x64 sheet with a distinct color per 32x32 quadrant:
    /// top-left red, top-right green, bottom-left blue, bottom-right white
    fn quadrant_sheet() -> RgbaImage {
        RgbaImage::from_fn(64, 64, |x, y| match (x >= 32, y >= 32) {
            (false, false) => Rgba(RED),
            (true, false) => Rgba(GREEN),
            (false, true) => Rgba(BLUE),
            (true, true) => Rgba(WHITE),
        })
    }

    fn quad_grid() -> SheetGrid {
        SheetGrid::new(2, 2, 32, 32)
    }

    const QUAD_KEYS: [Option<&str>; 4] = [Some("a"), Some("b"), Some("c"), Some("d")];

    #[test]
    fn test_cell_rects() {
        let grid = quad_grid();

        assert_eq!(grid.cell_rect(0, 0), SheetRect::new(0, 0, 32, 32));
        assert_eq!(grid.cell_rect(0, 1), SheetRect::new(32, 0, 32, 32));
        assert_eq!(grid.cell_rect(1, 0), SheetRect::new(0, 32, 32, 32));
        assert_eq!(grid.cell_rect(1, 1), SheetRect::new(32, 32, 32, 32));
    }

    #[test]
    fn test_slice_grid_one_entry_per_key() {
        let slices = slice_grid(&quadrant_sheet(), quad_grid(), &QUAD_KEYS, None).unwrap();

        assert_eq!(slices.len(), 4);
        for key in ["a", "b", "c", "d"] {
            assert_eq!(slices[key].dimensions(), (32, 32));
        }
    }

    #[test]
    fn test_column_drives_x_row_drives_y() {
        // Cell (row 0, col 1) must come from x=32, y=0 of the sheet, so
        // key "b" has to be the top-right (green) quadrant, not the
        // bottom-left one a row/column mix-up would produce.
        let slices = slice_grid(&quadrant_sheet(), quad_grid(), &QUAD_KEYS, None).unwrap();

        assert_eq!(slices["a"].get_pixel(0, 0).0, RED);
        assert_eq!(slices["b"].get_pixel(0, 0).0, GREEN);
        assert_eq!(slices["c"].get_pixel(0, 0).0, BLUE);
        assert_eq!(slices["d"].get_pixel(0, 0).0, WHITE);
    }

    #[test]
    fn test_skip_marker_produces_no_entry() {
        let keys = [Some("a"), None, Some("c"), None];
        let slices = slice_grid(&quadrant_sheet(), quad_grid(), &keys, None).unwrap();

        assert_eq!(slices.len(), 2);
        assert!(slices.contains_key("a"));
        assert!(slices.contains_key("c"));
    }

    #[test]
    fn test_key_count_mismatch_is_error() {
        let short = [Some("a"), Some("b"), Some("c")];
        let result = slice_grid(&quadrant_sheet(), quad_grid(), &short, None);
        assert!(matches!(result, Err(SheetError::Configuration(_))));

        let long = [Some("a"), Some("b"), Some("c"), Some("d"), Some("e")];
        let result = slice_grid(&quadrant_sheet(), quad_grid(), &long, None);
        assert!(matches!(result, Err(SheetError::Configuration(_))));
    }

    #[test]
    fn test_zero_dimension_grid_is_error() {
        let result = slice_grid(&quadrant_sheet(), SheetGrid::new(0, 2, 32, 32), &[], None);
        assert!(matches!(result, Err(SheetError::Configuration(_))));

        let result = slice_grid(&quadrant_sheet(), SheetGrid::new(2, 0, 32, 32), &[], None);
        assert!(matches!(result, Err(SheetError::Configuration(_))));
    }

    #[test]
    fn test_repeated_key_overwrites() {
        let keys = [Some("a"), Some("a"), Some("c"), Some("d")];
        let slices = slice_grid(&quadrant_sheet(), quad_grid(), &keys, None).unwrap();

        // The later cell wins, per the cache replace rule
        assert_eq!(slices.len(), 3);
        assert_eq!(slices["a"].get_pixel(0, 0).0, GREEN);
    }

    #[test]
    fn test_color_key_applied_to_slices() {
        let slices = slice_grid(
            &quadrant_sheet(),
            quad_grid(),
            &QUAD_KEYS,
            Some([0, 255, 0]),
        )
        .unwrap();

        // The all-green slice goes fully transparent, the others keep
        // their alpha
        assert_eq!(slices["b"].get_pixel(0, 0).0[3], 0);
        assert_eq!(slices["a"].get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn test_slice_grid_into_populates_cache() {
        let mut cache = ImageCache::new();
        slice_grid_into(&quadrant_sheet(), quad_grid(), &QUAD_KEYS, None, &mut cache).unwrap();

        for key in ["a", "b", "c", "d"] {
            assert!(cache.has_image(key));
        }
        assert_eq!(cache.get_image("d").unwrap().dimensions(), (32, 32));
    }

    #[test]
    fn test_out_of_bounds_aborts_remaining_cells() {
        // 48px cells on a 64px sheet: cell (0, 0) fits, cell (0, 1)
        // starts at x=48 and runs past the right edge
        let grid = SheetGrid::new(2, 2, 48, 48);
        let mut cache = ImageCache::new();
        let result = slice_grid_into(&quadrant_sheet(), grid, &QUAD_KEYS, None, &mut cache);

        assert!(matches!(result, Err(SheetError::OutOfBounds { .. })));
        // Slicing is not transactional: the cell stored before the
        // failure stays
        assert!(cache.has_image("a"));
        assert!(!cache.has_image("b"));
        assert!(!cache.has_image("c"));
    }

    #[test]
    fn test_extract_region_bounds() {
        let sheet = quadrant_sheet();

        let slice = extract_region(&sheet, SheetRect::new(32, 32, 32, 32)).unwrap();
        assert_eq!(slice.dimensions(), (32, 32));
        assert_eq!(slice.get_pixel(0, 0).0, WHITE);

        let result = extract_region(&sheet, SheetRect::new(33, 32, 32, 32));
        assert!(matches!(result, Err(SheetError::OutOfBounds { .. })));
    }

    #[test]
    fn test_slice_map_named_rectangles() {
        let mut map = SpriteMap::new();
        map.insert("top_left", SheetRect::new(0, 0, 32, 32));
        map.insert("bottom_strip", SheetRect::new(0, 48, 64, 16));

        let slices = slice_map(&quadrant_sheet(), &map).unwrap();

        assert_eq!(slices.len(), 2);
        assert_eq!(slices["top_left"].dimensions(), (32, 32));
        assert_eq!(slices["bottom_strip"].dimensions(), (64, 16));
    }

    #[test]
    fn test_slice_map_out_of_bounds() {
        let mut map = SpriteMap::new();
        map.insert("huge", SheetRect::new(0, 0, 128, 128));

        let result = slice_map(&quadrant_sheet(), &map);
        assert!(matches!(result, Err(SheetError::OutOfBounds { .. })));
    }
}
