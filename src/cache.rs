//! String-keyed resource caches
//!
//! A cache is an unbounded mapping from string key to a resource handle.
//! It deliberately exposes only direct lookup: no iteration, no per-key
//! removal, no eviction. Consumers hold keys, not views of the contents.
//!
//! `KeyedCache<T>` is the generic store; `ImageCache` and `FontCache` wrap
//! it with kind-specific method names for the call sites that deal in one
//! resource kind.

use std::collections::HashMap;

use image::RgbaImage;

use crate::loader::SizedFont;

/// Unbounded mapping from string key to resource handle
///
/// Keys are unique within one cache instance. Re-adding under an existing
/// key replaces the previous entry. Absence of a key is a normal state,
/// not an error.
#[derive(Debug)]
pub struct KeyedCache<T> {
    entries: HashMap<String, T>,
}

impl<T> KeyedCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a handle under a key, replacing any previous entry
    pub fn add(&mut self, key: impl Into<String>, handle: T) {
        self.entries.insert(key.into(), handle);
    }

    /// Look up a handle by key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// Check whether a key is present
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for KeyedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache of decoded raster images
///
/// A `KeyedCache` behind image-specific method names.
#[derive(Debug, Default)]
pub struct ImageCache {
    cache: KeyedCache<RgbaImage>,
}

impl ImageCache {
    /// Create an empty image cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an image under a key, replacing any previous entry
    pub fn add_image(&mut self, key: impl Into<String>, image: RgbaImage) {
        self.cache.add(key, image);
    }

    /// Look up an image by key
    pub fn get_image(&self, key: &str) -> Option<&RgbaImage> {
        self.cache.get(key)
    }

    /// Check whether an image key is present
    pub fn has_image(&self, key: &str) -> bool {
        self.cache.has(key)
    }

    /// Remove every cached image
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Cache of loaded fonts
///
/// A `KeyedCache` behind font-specific method names.
#[derive(Debug, Default)]
pub struct FontCache {
    cache: KeyedCache<SizedFont>,
}

impl FontCache {
    /// Create an empty font cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a font under a key, replacing any previous entry
    pub fn add_font(&mut self, key: impl Into<String>, font: SizedFont) {
        self.cache.add(key, font);
    }

    /// Look up a font by key
    pub fn get_font(&self, key: &str) -> Option<&SizedFont> {
        self.cache.get(key)
    }

    /// Check whether a font key is present
    pub fn has_font(&self, key: &str) -> bool {
        self.cache.has(key)
    }

    /// Remove every cached font
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_add_and_get() {
        let mut cache = KeyedCache::new();
        cache.add("one", 1u32);

        assert!(cache.has("one"));
        assert_eq!(cache.get("one"), Some(&1));
    }

    #[test]
    fn test_readd_replaces() {
        let mut cache = KeyedCache::new();
        cache.add("key", "first");
        cache.add("key", "second");

        assert_eq!(cache.get("key"), Some(&"second"));
    }

    #[test]
    fn test_miss_on_fresh_cache() {
        let cache: KeyedCache<u32> = KeyedCache::new();

        assert!(!cache.has("anything"));
        assert!(cache.get("anything").is_none());
    }

    #[test]
    fn test_clear_empties_fully() {
        let mut cache = KeyedCache::new();
        cache.add("a", 1u32);
        cache.add("b", 2u32);
        cache.clear();

        assert!(!cache.has("a"));
        assert!(!cache.has("b"));
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_image_facade_delegates() {
        let mut cache = ImageCache::new();
        let image = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        cache.add_image("tile", image);

        assert!(cache.has_image("tile"));
        let stored = cache.get_image("tile").unwrap();
        assert_eq!(stored.dimensions(), (2, 2));

        cache.clear_cache();
        assert!(!cache.has_image("tile"));
        assert!(cache.get_image("tile").is_none());
    }

    #[test]
    fn test_image_facade_replaces() {
        let mut cache = ImageCache::new();
        cache.add_image("tile", RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        cache.add_image("tile", RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));

        assert_eq!(cache.get_image("tile").unwrap().dimensions(), (4, 4));
    }
}
