//! Decoding and encoding between files and [`PixelBuffer`]s.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `image::guess_format` (content-based, not extension) |
//! | Decode (PNG, JPEG, WebP) | `image` crate pure Rust decoders |
//! | Encode | `image::codecs::png::PngEncoder` |
//!
//! The accepted input set is PNG, JPEG, and WebP. Export is always PNG:
//! edits are exact pixel operations, and a lossless container guarantees the
//! exported file carries exactly the samples the user saw, with no
//! recompression artifacts regardless of what the input format was.

use crate::buffer::{BufferError, PixelBuffer};
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, ImageFormat, ImageReader};
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// File extensions whose decoders are compiled in.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Formats the decoder accepts, mirroring [`SUPPORTED_EXTENSIONS`].
const SUPPORTED_FORMATS: &[ImageFormat] =
    &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Identification result for a raster file: dimensions plus sniffed format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// True if `path` has an extension the decoder handles.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}

/// Sniff the format from the file header and reject anything outside the
/// supported set.
fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, CodecError> {
    let format = image::guess_format(bytes)
        .map_err(|_| CodecError::UnsupportedFormat("unrecognized file header".into()))?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(CodecError::UnsupportedFormat(format_name(format).into()));
    }
    Ok(format)
}

fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("unknown")
}

/// Decode raw file bytes into a [`PixelBuffer`].
///
/// Any source color type is expanded to RGBA8.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let format = sniff_format(bytes)?;
    let image = image::load_from_memory_with_format(bytes, format).map_err(CodecError::Decode)?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_raw(width, height, rgba.into_raw())?)
}

/// Read and decode an image file.
pub fn decode_file(path: &Path) -> Result<PixelBuffer, CodecError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Read dimensions and format without decoding the pixel data.
pub fn identify(path: &Path) -> Result<ImageInfo, CodecError> {
    let bytes = std::fs::read(path)?;
    let format = sniff_format(&bytes)?;
    let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format)
        .into_dimensions()
        .map_err(CodecError::Decode)?;
    Ok(ImageInfo {
        width,
        height,
        format: format_name(format).to_string(),
    })
}

/// Encode a buffer as lossless PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(CodecError::Encode)?;
    Ok(out)
}

/// Encode a buffer as PNG and write it to `path`.
pub fn encode_png_file(buffer: &PixelBuffer, path: &Path) -> Result<(), CodecError> {
    let bytes = encode_png(buffer)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
            }
        }
        PixelBuffer::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let buffer = gradient_buffer(16, 9);
        let bytes = encode_png(&buffer).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn decode_rejects_garbage() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(CodecError::UnsupportedFormat(_))));
    }

    #[test]
    fn decode_rejects_unsupported_format() {
        // Valid GIF89a header: sniffs as GIF, which is outside the accept list
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let result = decode(gif);
        assert!(matches!(result, Err(CodecError::UnsupportedFormat(ref f)) if f == "gif"));
    }

    #[test]
    fn decode_rejects_truncated_png() {
        let mut bytes = encode_png(&gradient_buffer(8, 8)).unwrap();
        bytes.truncate(bytes.len() / 2);
        let result = decode(&bytes);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn identify_reads_dimensions_without_full_decode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("probe.png");
        encode_png_file(&gradient_buffer(200, 150), &path).unwrap();

        let info = identify(&path).unwrap();
        assert_eq!(info.width, 200);
        assert_eq!(info.height, 150);
        assert_eq!(info.format, "png");
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = identify(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn decode_jpeg_bytes() {
        // Encode a JPEG in memory with the image crate, then run it through
        // the sniffing decode path.
        let rgb = image::RgbImage::from_fn(32, 24, |x, y| {
            image::Rgb([(x * 8 % 256) as u8, (y * 8 % 256) as u8, 64])
        });
        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut jpeg)
            .write_image(rgb.as_raw(), 32, 24, image::ExtendedColorType::Rgb8)
            .unwrap();

        let buffer = decode(&jpeg).unwrap();
        assert_eq!(buffer.dimensions(), (32, 24));
        // JPEG is lossy, but alpha must come back fully opaque
        assert!(buffer.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn supported_extension_check_is_case_insensitive() {
        assert!(has_supported_extension(Path::new("photo.PNG")));
        assert!(has_supported_extension(Path::new("photo.jpeg")));
        assert!(!has_supported_extension(Path::new("photo.tiff")));
        assert!(!has_supported_extension(Path::new("photo")));
    }
}
