//! Pixel formats supported by [`Bitmap`](crate::Bitmap).

use std::fmt;
use std::str::FromStr;

/// Channel layout of a bitmap pixel.
///
/// Every channel is one byte. The discriminant is the channel count, so
/// `PixelFormat::Rgb as usize == 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single luminance channel
    Grayscale = 1,

    /// Luminance followed by alpha
    GrayscaleAlpha = 2,

    /// Red, green, blue
    Rgb = 3,

    /// Red, green, blue, alpha
    Rgba = 4,
}

impl PixelFormat {
    /// All formats, ordered by channel count.
    pub const ALL: [PixelFormat; 4] = [
        PixelFormat::Grayscale,
        PixelFormat::GrayscaleAlpha,
        PixelFormat::Rgb,
        PixelFormat::Rgba,
    ];

    /// Number of bytes per pixel.
    pub const fn channels(self) -> usize {
        self as usize
    }

    /// True for formats carrying an alpha channel (always the last byte).
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::GrayscaleAlpha | PixelFormat::Rgba)
    }

    /// True for formats storing separate R, G, B channels.
    pub const fn has_color(self) -> bool {
        matches!(self, PixelFormat::Rgb | PixelFormat::Rgba)
    }

    /// Look up the format with the given channel count.
    pub fn from_channels(channels: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.channels() == channels)
    }

    /// Matching 8-bit color type of the `image` crate.
    pub fn color_type(self) -> image::ColorType {
        match self {
            PixelFormat::Grayscale => image::ColorType::L8,
            PixelFormat::GrayscaleAlpha => image::ColorType::La8,
            PixelFormat::Rgb => image::ColorType::Rgb8,
            PixelFormat::Rgba => image::ColorType::Rgba8,
        }
    }

    fn name(self) -> &'static str {
        match self {
            PixelFormat::Grayscale => "gray",
            PixelFormat::GrayscaleAlpha => "gray-alpha",
            PixelFormat::Rgb => "rgb",
            PixelFormat::Rgba => "rgba",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pixel format '{0}' (expected gray, gray-alpha, rgb or rgba)")]
pub struct ParseFormatError(pub String);

impl FromStr for PixelFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gray" | "grey" | "grayscale" | "l" => Ok(PixelFormat::Grayscale),
            "gray-alpha" | "grey-alpha" | "la" => Ok(PixelFormat::GrayscaleAlpha),
            "rgb" => Ok(PixelFormat::Rgb),
            "rgba" => Ok(PixelFormat::Rgba),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}
