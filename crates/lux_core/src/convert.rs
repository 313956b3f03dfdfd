//! Per-pixel channel conversion between [`PixelFormat`]s.
//!
//! The policy is plain duplication and truncation:
//!
//! - gray to color replicates the gray value into R, G and B
//! - color to gray takes the unweighted mean of R, G and B
//! - alpha is copied when both sides have it, synthesized as 255 when only
//!   the destination has it, and dropped otherwise

use crate::format::PixelFormat;

/// Alpha written when the source format has none.
pub const OPAQUE: u8 = 255;

/// Convert one pixel from `src_format` into `dest_format`.
///
/// `src` and `dest` must hold exactly one pixel of their format.
#[inline]
pub fn convert_pixel(src: &[u8], src_format: PixelFormat, dest: &mut [u8], dest_format: PixelFormat) {
    debug_assert_eq!(src.len(), src_format.channels());
    debug_assert_eq!(dest.len(), dest_format.channels());

    if src_format == dest_format {
        dest.copy_from_slice(src);
        return;
    }

    let alpha = if src_format.has_alpha() {
        src[src_format.channels() - 1]
    } else {
        OPAQUE
    };

    if dest_format.has_color() {
        let [r, g, b] = if src_format.has_color() {
            [src[0], src[1], src[2]]
        } else {
            [src[0]; 3]
        };
        dest[..3].copy_from_slice(&[r, g, b]);
    } else {
        dest[0] = if src_format.has_color() {
            luminance(src[0], src[1], src[2])
        } else {
            src[0]
        };
    }

    if dest_format.has_alpha() {
        dest[dest_format.channels() - 1] = alpha;
    }
}

/// Convert a packed run of pixels. Both slices must cover the same pixel count.
pub fn convert_row(src: &[u8], src_format: PixelFormat, dest: &mut [u8], dest_format: PixelFormat) {
    if src_format == dest_format {
        dest.copy_from_slice(src);
        return;
    }

    for (s, d) in src
        .chunks_exact(src_format.channels())
        .zip(dest.chunks_exact_mut(dest_format.channels()))
    {
        convert_pixel(s, src_format, d, dest_format);
    }
}

fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}
