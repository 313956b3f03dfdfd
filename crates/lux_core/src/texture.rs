//! Upload-ready texture images and caching.
//!
//! GPU texture uploads expect the bottom row first, while decoded bitmaps
//! store the top row first. A [`TextureImage`] is a bitmap that has already
//! been flipped, bundled with the sampling parameters the uploader should
//! apply. The uploader itself lives outside this crate and only reads
//! [`TextureImage::bytes`], the dimensions and the format.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bitmap::Bitmap;
use crate::error::BitmapResult;
use crate::format::PixelFormat;

/// Minification/magnification filter requested for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    Nearest,
    #[default]
    Linear,
}

/// Coordinate wrap mode requested for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Sampling parameters handed to the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureParams {
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
}

/// A bitmap prepared for texture upload.
#[derive(Clone, Debug)]
pub struct TextureImage {
    /// Pixel data, bottom row first
    bitmap: Bitmap,

    /// Sampling parameters for the uploader
    pub params: TextureParams,

    /// Original file path (for debugging)
    pub path: String,
}

impl TextureImage {
    /// Flip `bitmap` into upload order and attach `params`.
    pub fn from_bitmap(mut bitmap: Bitmap, params: TextureParams, path: impl Into<String>) -> Self {
        bitmap.flip_vertically();
        Self {
            bitmap,
            params,
            path: path.into(),
        }
    }

    /// Decode an image file and prepare it for upload.
    pub fn load(path: impl AsRef<Path>, params: TextureParams) -> BitmapResult<Self> {
        let path = path.as_ref();
        let bitmap = Bitmap::from_file(path)?;
        Ok(Self::from_bitmap(
            bitmap,
            params,
            path.to_string_lossy().to_string(),
        ))
    }

    /// The flipped bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Width of the source image in pixels.
    pub fn original_width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Height of the source image in pixels.
    pub fn original_height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn format(&self) -> PixelFormat {
        self.bitmap.format()
    }

    /// Packed pixel bytes in upload order.
    pub fn bytes(&self) -> &[u8] {
        self.bitmap.pixels()
    }

    /// Get total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bitmap.pixels().len()
    }
}

/// Cache for prepared textures.
///
/// Textures are loaded on demand and shared for reuse. Relative paths are
/// resolved against the resource directory, if one is set, and entries are
/// keyed by the resolved path.
pub struct TextureCache {
    /// Cached textures by resolved path
    textures: HashMap<PathBuf, Arc<TextureImage>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,

    /// Parameters applied to every newly loaded texture
    params: TextureParams,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
            params: TextureParams::default(),
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Self::new()
        }
    }

    /// Set the base directory for resolving relative paths.
    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = Some(base_dir.into());
    }

    /// Set the parameters used for textures loaded from now on.
    pub fn set_params(&mut self, params: TextureParams) {
        self.params = params;
    }

    /// Load a texture from file, using the cache if available.
    pub fn load(&mut self, path: &str) -> BitmapResult<Arc<TextureImage>> {
        let full_path = self.resolve_path(path);
        if let Some(texture) = self.textures.get(&full_path) {
            return Ok(texture.clone());
        }

        let texture = Arc::new(TextureImage::load(&full_path, self.params)?);
        self.textures.insert(full_path.clone(), texture.clone());

        log::debug!(
            "Cached texture: {} ({}x{} {}, {:.1} KB)",
            full_path.display(),
            texture.original_width(),
            texture.original_height(),
            texture.format(),
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<TextureImage>> {
        self.textures.get(&self.resolve_path(path)).cloned()
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(&self.resolve_path(path))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    /// Get total memory usage of cached textures.
    pub fn total_size_bytes(&self) -> usize {
        self.textures.values().map(|t| t.size_bytes()).sum()
    }

    /// Resolve a path relative to the base directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        match &self.base_dir {
            Some(base) if !path.is_absolute() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BitmapError;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lux_texture_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// 1x2 grayscale: top row 10, bottom row 20.
    fn two_row_bitmap() -> Bitmap {
        Bitmap::new(1, 2, PixelFormat::Grayscale, Some(&[10, 20])).unwrap()
    }

    #[test]
    fn test_default_params() {
        let params = TextureParams::default();
        assert_eq!(params.filter, TextureFilter::Linear);
        assert_eq!(params.wrap, TextureWrap::ClampToEdge);
    }

    #[test]
    fn test_from_bitmap_flips() {
        let texture = TextureImage::from_bitmap(two_row_bitmap(), TextureParams::default(), "<memory>");
        assert_eq!(texture.bytes(), &[20, 10]);
        assert_eq!(texture.original_width(), 1);
        assert_eq!(texture.original_height(), 2);
        assert_eq!(texture.format(), PixelFormat::Grayscale);
        assert_eq!(texture.size_bytes(), 2);
    }

    #[test]
    fn test_texture_cache_empty() {
        let cache = TextureCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.total_size_bytes(), 0);
    }

    #[test]
    fn test_resolve_path() {
        let cache = TextureCache::with_base_dir("/resources");
        assert_eq!(cache.resolve_path("crate.jpg"), PathBuf::from("/resources/crate.jpg"));
        assert_eq!(cache.resolve_path("/abs/crate.jpg"), PathBuf::from("/abs/crate.jpg"));

        let bare = TextureCache::new();
        assert_eq!(bare.resolve_path("crate.jpg"), PathBuf::from("crate.jpg"));
    }

    #[test]
    fn test_cache_loads_once_and_flips() {
        let dir = scratch_dir("cache");
        two_row_bitmap().save(dir.join("stripe.png")).unwrap();

        let mut cache = TextureCache::with_base_dir(&dir);
        cache.set_params(TextureParams {
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::Repeat,
        });

        let first = cache.load("stripe.png").unwrap();
        let second = cache.load("stripe.png").unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_cached("stripe.png"));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.bytes(), &[20, 10]);
        assert_eq!(first.params.filter, TextureFilter::Nearest);
        assert_eq!(cache.total_size_bytes(), 2);

        cache.clear();
        assert!(cache.get("stripe.png").is_none());
    }

    #[test]
    fn test_cache_follows_base_dir_change() {
        let first_dir = scratch_dir("base_a");
        let second_dir = scratch_dir("base_b");
        two_row_bitmap().save(first_dir.join("floor.png")).unwrap();
        Bitmap::new(1, 1, PixelFormat::Grayscale, Some(&[99]))
            .unwrap()
            .save(second_dir.join("floor.png"))
            .unwrap();

        let mut cache = TextureCache::with_base_dir(&first_dir);
        let before = cache.load("floor.png").unwrap();
        cache.set_base_dir(&second_dir);
        assert!(!cache.is_cached("floor.png"));
        let after = cache.load("floor.png").unwrap();
        std::fs::remove_dir_all(&first_dir).ok();
        std::fs::remove_dir_all(&second_dir).ok();

        assert_eq!(before.bytes(), &[20, 10]);
        assert_eq!(after.bytes(), &[99]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("floor.png").is_some_and(|t| Arc::ptr_eq(&t, &after)));
    }

    #[test]
    fn test_cache_missing_file() {
        let mut cache = TextureCache::with_base_dir(scratch_dir("missing"));
        let result = cache.load("nope.png");
        assert!(matches!(result, Err(BitmapError::Decode { .. })));
        assert!(cache.is_empty());
    }
}
