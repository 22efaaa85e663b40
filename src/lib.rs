//! spritebank: image and font resource caches for 2D games
//!
//! Covers the resource plumbing a 2D game needs between "files on disk"
//! and "sprite on screen": load images and fonts with explicit
//! existence checks, cut sprite sheets into named sub-images, and keep
//! everything in string-keyed caches that game code reads by key.
//!
//! ## Overview
//!
//! - **cache**: `KeyedCache<T>` plus the `ImageCache`/`FontCache`
//!   facades. Unbounded, lookup-only, explicit clear.
//! - **loader**: `load_image`/`load_font` file loaders and the
//!   `SizedFont` handle. Decoding is delegated to the `image` and
//!   `fontdue` crates.
//! - **sheet**: grid- and map-based sprite-sheet slicing, the bounds
//!   checks, and the `SheetRect`/`SheetGrid` geometry types.
//! - **map**: the JSON sprite-map document codec.
//! - **manager**: `ImageManager`/`FontManager`, binding a directory, a
//!   loader, and a cache together for game-facing call sites.
//!
//! Everything is synchronous and single-threaded; wrap a cache in your
//! own lock if you need to share it across threads.

pub mod cache;
pub mod loader;
pub mod manager;
pub mod map;
pub mod sheet;

pub use cache::{FontCache, ImageCache, KeyedCache};
pub use loader::{apply_color_key, load_font, load_image, ColorKey, LoadError, SizedFont};
pub use manager::{FontManager, ImageManager, ManagerError};
pub use map::{MapError, SpriteMap};
pub use sheet::{
    extract_region, slice_grid, slice_grid_into, slice_map, slice_map_into, SheetError, SheetGrid,
    SheetRect,
};
