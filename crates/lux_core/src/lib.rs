//! Lux Core - pixel buffers and texture preparation.
//!
//! This crate provides:
//!
//! - **Bitmap**: an owned 8-bit pixel buffer in one of four [`PixelFormat`]s,
//!   with bounds-checked pixel access, vertical flip, 90° rotation and
//!   format-converting rectangle copies
//! - **Textures**: flipped, upload-ready images and a path-keyed cache
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{Bitmap, PixelFormat};
//!
//! let mut bitmap = Bitmap::from_file("wooden-crate.jpg")?;
//! bitmap.flip_vertically();
//!
//! let mut atlas = Bitmap::new(512, 512, PixelFormat::Rgba, None)?;
//! atlas.copy_rect_from(&bitmap, 0, 0, 0, 0, 0, 0)?;
//! ```

pub mod bitmap;
pub mod convert;
pub mod error;
pub mod format;
pub mod texture;

// Re-export commonly used types
pub use bitmap::{Bitmap, Rect};
pub use error::{BitmapError, BitmapResult};
pub use format::{ParseFormatError, PixelFormat};
pub use texture::{TextureCache, TextureFilter, TextureImage, TextureParams, TextureWrap};
