//! Zoomed display scaling.
//!
//! The view shows the current buffer scaled by a zoom factor using
//! nearest-neighbor sampling — zooming in shows hard square pixels instead
//! of blurred interpolation, which is what you want when inspecting the
//! effect of a per-pixel edit. Scaling never touches the edit pipeline's
//! buffers; it is a pure function from (buffer, zoom) to a display bitmap.

use crate::buffer::{BYTES_PER_PIXEL, PixelBuffer};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 3.0;

/// Display zoom factor, clamped to [0.1, 3.0] on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f32);

impl Zoom {
    /// Clamp `factor` into the valid range. Non-finite input falls back to 1:1.
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() {
            Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self(1.0)
        }
    }

    pub fn factor(self) -> f32 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Scale `source` by `zoom` with nearest-neighbor sampling.
///
/// Output dimensions are `floor(width * zoom)` by `floor(height * zoom)`;
/// each output pixel copies the source pixel at the truncated pre-zoom
/// coordinate. A zoom small enough to floor a dimension to zero yields an
/// empty buffer.
pub fn scale(source: &PixelBuffer, zoom: Zoom) -> PixelBuffer {
    let factor = zoom.factor();
    if factor == 1.0 {
        return source.clone();
    }

    let out_w = (source.width() as f32 * factor).floor() as u32;
    let out_h = (source.height() as f32 * factor).floor() as u32;
    if out_w == 0 || out_h == 0 {
        return PixelBuffer::from_parts(out_w, out_h, Vec::new());
    }

    let src = source.pixels();
    let src_w = source.width() as usize;
    let mut pixels = vec![0u8; out_w as usize * out_h as usize * BYTES_PER_PIXEL];

    for y in 0..out_h {
        let sy = ((y as f32 / factor) as u32).min(source.height() - 1) as usize;
        let src_row = sy * src_w * BYTES_PER_PIXEL;
        let dst_row = y as usize * out_w as usize * BYTES_PER_PIXEL;
        for x in 0..out_w {
            let sx = ((x as f32 / factor) as u32).min(source.width() - 1) as usize;
            let si = src_row + sx * BYTES_PER_PIXEL;
            let di = dst_row + x as usize * BYTES_PER_PIXEL;
            pixels[di..di + BYTES_PER_PIXEL].copy_from_slice(&src[si..si + BYTES_PER_PIXEL]);
        }
    }

    PixelBuffer::from_parts(out_w, out_h, pixels)
}
