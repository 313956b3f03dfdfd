//! Owned 8-bit pixel buffer with format-aware access, transforms and blits.
//!
//! Pixels are stored row-major: all columns of the top row, then each
//! remaining row down to the bottom, with no padding between rows.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::convert::convert_row;
use crate::error::{BitmapError, BitmapResult};
use crate::format::PixelFormat;

/// Axis-aligned pixel rectangle, in columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub col: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(col: u32, row: u32, width: u32, height: u32) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    /// A single pixel.
    pub fn pixel(col: u32, row: u32) -> Self {
        Self::new(col, row, 1, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    // u64 so that col + width never wraps
    fn right(&self) -> u64 {
        self.col as u64 + self.width as u64
    }

    fn bottom(&self) -> u64 {
        self.row as u64 + self.height as u64
    }

    /// True if the rectangle lies inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// True if the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (self.col as u64) < other.right()
            && (other.col as u64) < self.right()
            && (self.row as u64) < other.bottom()
            && (other.row as u64) < self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.col, self.row)
    }
}

/// An in-memory image with a fixed [`PixelFormat`].
///
/// The byte buffer always holds exactly `width * height * format.channels()`
/// bytes. Cloning copies the pixels; no two bitmaps share storage.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap, copying `initial` if given or zero-filling otherwise.
    ///
    /// `initial` must already be laid out in `format` with the same
    /// dimensions.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        initial: Option<&[u8]>,
    ) -> BitmapResult<Self> {
        let len = Self::checked_len(width, height, format)?;
        let pixels = match initial {
            Some(data) if data.len() != len => {
                return Err(BitmapError::BufferSize {
                    expected: len,
                    actual: data.len(),
                })
            }
            Some(data) => data.to_vec(),
            None => vec![0; len],
        };

        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Create a bitmap that takes ownership of already packed pixel data.
    pub fn from_vec(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> BitmapResult<Self> {
        let len = Self::checked_len(width, height, format)?;
        if pixels.len() != len {
            return Err(BitmapError::BufferSize {
                expected: len,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Decode an image file, keeping the closest 8-bit channel layout.
    pub fn from_file(path: impl AsRef<Path>) -> BitmapResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| BitmapError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let bitmap = Self::from_dynamic_image(image)?;
        log::debug!(
            "Decoded bitmap: {} ({}x{}, {})",
            path.display(),
            bitmap.width,
            bitmap.height,
            bitmap.format
        );

        Ok(bitmap)
    }

    /// Convert a decoded `image` crate image.
    ///
    /// 8-bit layouts map one to one. Deeper or float images are narrowed to
    /// 8 bits per channel, keeping alpha and color if present.
    pub fn from_dynamic_image(image: DynamicImage) -> BitmapResult<Self> {
        let (width, height) = image.dimensions();
        let (format, pixels) = match image {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Grayscale, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelFormat::GrayscaleAlpha, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba, buf.into_raw()),
            other => {
                let color = other.color();
                log::warn!("Narrowing {:?} image to 8 bits per channel", color);
                match (color.has_color(), color.has_alpha()) {
                    (false, false) => (PixelFormat::Grayscale, other.to_luma8().into_raw()),
                    (false, true) => (PixelFormat::GrayscaleAlpha, other.to_luma_alpha8().into_raw()),
                    (true, false) => (PixelFormat::Rgb, other.to_rgb8().into_raw()),
                    (true, true) => (PixelFormat::Rgba, other.to_rgba8().into_raw()),
                }
            }
        };

        Self::from_vec(width, height, format, pixels)
    }

    /// Encode to disk; the file format follows the path's extension.
    pub fn save(&self, path: impl AsRef<Path>) -> BitmapResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            self.format.color_type(),
        )
        .map_err(|source| BitmapError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Saved bitmap: {} ({}x{})", path.display(), self.width, self.height);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The whole packed pixel buffer (row-major, top row first).
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the packed buffer. Its length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.format.channels()
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.row_stride())
    }

    /// The bytes of the pixel at `(col, row)`.
    pub fn pixel(&self, col: u32, row: u32) -> BitmapResult<&[u8]> {
        let offset = self.checked_offset(col, row)?;
        Ok(&self.pixels[offset..offset + self.format.channels()])
    }

    /// Mutable bytes of the pixel at `(col, row)`.
    pub fn pixel_mut(&mut self, col: u32, row: u32) -> BitmapResult<&mut [u8]> {
        let offset = self.checked_offset(col, row)?;
        let channels = self.format.channels();
        Ok(&mut self.pixels[offset..offset + channels])
    }

    /// Overwrite the pixel at `(col, row)`. `pixel` must hold one pixel of
    /// this bitmap's format.
    pub fn set_pixel(&mut self, col: u32, row: u32, pixel: &[u8]) -> BitmapResult<()> {
        let channels = self.format.channels();
        if pixel.len() != channels {
            return Err(BitmapError::BufferSize {
                expected: channels,
                actual: pixel.len(),
            });
        }

        self.pixel_mut(col, row)?.copy_from_slice(pixel);
        Ok(())
    }

    /// Reverse the row order in place, turning the image upside down.
    pub fn flip_vertically(&mut self) {
        let stride = self.row_stride();
        let height = self.height as usize;

        for top in 0..height / 2 {
            let bottom = height - 1 - top;
            let (upper, lower) = self.pixels.split_at_mut(bottom * stride);
            upper[top * stride..(top + 1) * stride].swap_with_slice(&mut lower[..stride]);
        }

        log::trace!("Flipped {}x{} bitmap vertically", self.width, self.height);
    }

    /// Rotate 90 degrees counter-clockwise.
    ///
    /// Width and height swap. The pixel at `(col, row)` moves to
    /// `(row, new_height - 1 - col)`.
    pub fn rotate_90_ccw(&mut self) {
        let channels = self.format.channels();
        let new_width = self.height as usize;
        let new_height = self.width as usize;
        let mut rotated = vec![0; self.pixels.len()];

        for (row, src_row) in self.pixels.chunks_exact(self.row_stride()).enumerate() {
            for (col, src) in src_row.chunks_exact(channels).enumerate() {
                let dest_row = new_height - 1 - col;
                let offset = (dest_row * new_width + row) * channels;
                rotated[offset..offset + channels].copy_from_slice(src);
            }
        }

        self.pixels = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
        log::trace!("Rotated bitmap to {}x{}", self.width, self.height);
    }

    /// Copy a `width` x `height` rectangle from `source` into this bitmap.
    ///
    /// When `src_col`, `src_row`, `width` and `height` are all zero the
    /// whole source is copied. Pixels are converted if the formats differ.
    /// Only the destination rectangle is modified.
    #[allow(clippy::too_many_arguments)]
    pub fn copy_rect_from(
        &mut self,
        source: &Bitmap,
        src_col: u32,
        src_row: u32,
        dest_col: u32,
        dest_row: u32,
        width: u32,
        height: u32,
    ) -> BitmapResult<()> {
        let (src, dest) = source.resolve_copy(src_col, src_row, dest_col, dest_row, width, height);
        source.check_rect(src)?;
        self.check_rect(dest)?;

        let src_channels = source.format.channels();
        let dest_channels = self.format.channels();
        let span = src.width as usize;

        for y in 0..src.height {
            let s = source.offset(src.col, src.row + y);
            let d = self.offset(dest.col, dest.row + y);
            convert_row(
                &source.pixels[s..s + span * src_channels],
                source.format,
                &mut self.pixels[d..d + span * dest_channels],
                self.format,
            );
        }

        Ok(())
    }

    /// Copy a rectangle of this bitmap onto another part of itself.
    ///
    /// Fails with [`BitmapError::Overlap`] if the two rectangles intersect;
    /// clone the bitmap first and use [`copy_rect_from`](Self::copy_rect_from)
    /// for that case.
    pub fn copy_rect_within(
        &mut self,
        src_col: u32,
        src_row: u32,
        dest_col: u32,
        dest_row: u32,
        width: u32,
        height: u32,
    ) -> BitmapResult<()> {
        let (src, dest) = self.resolve_copy(src_col, src_row, dest_col, dest_row, width, height);
        self.check_rect(src)?;
        self.check_rect(dest)?;
        if src.overlaps(&dest) {
            return Err(BitmapError::Overlap { src, dest });
        }

        let span = src.width as usize * self.format.channels();
        for y in 0..src.height {
            let s = self.offset(src.col, src.row + y);
            let d = self.offset(dest.col, dest.row + y);
            self.pixels.copy_within(s..s + span, d);
        }

        Ok(())
    }

    /// A copy of this bitmap in another format.
    pub fn converted(&self, format: PixelFormat) -> BitmapResult<Bitmap> {
        let mut pixels = vec![0; Self::checked_len(self.width, self.height, format)?];
        convert_row(&self.pixels, self.format, &mut pixels, format);

        Ok(Bitmap {
            width: self.width,
            height: self.height,
            format,
            pixels,
        })
    }

    fn checked_len(width: u32, height: u32, format: PixelFormat) -> BitmapResult<usize> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(format.channels()))
            .ok_or(BitmapError::TooLarge {
                width,
                height,
                format,
            })
    }

    fn resolve_copy(
        &self,
        src_col: u32,
        src_row: u32,
        dest_col: u32,
        dest_row: u32,
        width: u32,
        height: u32,
    ) -> (Rect, Rect) {
        // All-zero selector means the full source image
        let (width, height) = if src_col == 0 && src_row == 0 && width == 0 && height == 0 {
            (self.width, self.height)
        } else {
            (width, height)
        };

        (
            Rect::new(src_col, src_row, width, height),
            Rect::new(dest_col, dest_row, width, height),
        )
    }

    fn check_rect(&self, rect: Rect) -> BitmapResult<()> {
        if rect.fits_within(self.width, self.height) {
            Ok(())
        } else {
            Err(BitmapError::OutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn checked_offset(&self, col: u32, row: u32) -> BitmapResult<usize> {
        self.check_rect(Rect::pixel(col, row))?;
        Ok(self.offset(col, row))
    }

    fn offset(&self, col: u32, row: u32) -> usize {
        (row as usize * self.width as usize + col as usize) * self.format.channels()
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
