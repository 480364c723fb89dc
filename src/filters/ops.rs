//! Per-pixel byte loops for each filter.
//!
//! All functions here operate on a flat RGBA byte slice in place and are
//! pure with respect to pixel position: byte `i` of the output depends only
//! on bytes `i..i+4` of the input. Pixels are processed in parallel with
//! rayon; the chunks are disjoint, so no synchronization is needed.
//!
//! Alpha (`px[3]`) is never written.

use super::ChannelOffset;
use rayon::prelude::*;

/// Replace each color channel with the truncated channel average.
///
/// Integer division truncates toward zero: `(255 + 0 + 0) / 3` yields 85.
pub fn grayscale(pixels: &mut [u8]) {
    pixels.par_chunks_exact_mut(4).for_each(|px| {
        let avg = ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8;
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
    });
}

/// Replace each color channel with its complement.
pub fn invert(pixels: &mut [u8]) {
    pixels.par_chunks_exact_mut(4).for_each(|px| {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    });
}

/// Classic sepia weight matrix, rounded to nearest and clamped.
///
/// The weights cannot produce a negative sum, but both bounds are clamped
/// before narrowing to `u8`.
pub fn sepia(pixels: &mut [u8]) {
    pixels.par_chunks_exact_mut(4).for_each(|px| {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        px[0] = (0.393 * r + 0.769 * g + 0.189 * b).round().clamp(0.0, 255.0) as u8;
        px[1] = (0.349 * r + 0.686 * g + 0.168 * b).round().clamp(0.0, 255.0) as u8;
        px[2] = (0.272 * r + 0.534 * g + 0.131 * b).round().clamp(0.0, 255.0) as u8;
    });
}

/// Add `offset` to each color channel independently, clamped to [0, 255].
pub fn channel_offset(pixels: &mut [u8], offset: ChannelOffset) {
    let (dr, dg, db) = (offset.r as i32, offset.g as i32, offset.b as i32);
    pixels.par_chunks_exact_mut(4).for_each(|px| {
        px[0] = (px[0] as i32 + dr).clamp(0, 255) as u8;
        px[1] = (px[1] as i32 + dg).clamp(0, 255) as u8;
        px[2] = (px[2] as i32 + db).clamp(0, 255) as u8;
    });
}
