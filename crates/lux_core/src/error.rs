//! Error type shared by bitmap and texture operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::bitmap::Rect;
use crate::format::PixelFormat;

/// Errors that can occur while creating, accessing or copying bitmaps.
///
/// All checks run before any pixel is written, so a failed call leaves the
/// bitmap exactly as it was.
#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("Invalid bitmap dimensions {width}x{height} (both must be non-zero)")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Bitmap of {width}x{height} {format} pixels does not fit in memory")]
    TooLarge {
        width: u32,
        height: u32,
        format: PixelFormat,
    },

    #[error("Region {rect} is outside the {width}x{height} bitmap")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    #[error("Source region {src} overlaps destination region {dest} in the same bitmap")]
    Overlap { src: Rect, dest: Rect },

    #[error("Pixel data has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type BitmapResult<T> = Result<T, BitmapError>;
