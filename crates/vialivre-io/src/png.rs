//! PNG encoding and decoding for icon canvases.
//!
//! Output is always 8-bit RGBA with default compression and no ancillary
//! chunks, so identical pixels always produce identical bytes.

use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use vialivre_renderer::Canvas;

use crate::error::IconError;

/// Encode a canvas as an RGBA PNG stream.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, IconError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        canvas.image().as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Decode a PNG stream into an RGBA canvas.
pub fn decode_png(bytes: &[u8]) -> Result<Canvas, IconError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(Canvas::from_image(image.to_rgba8()))
}

/// Encode `canvas` and write it to `path`, replacing any existing file.
pub fn write_png(path: &Path, canvas: &Canvas) -> Result<(), IconError> {
    let bytes = encode_png(canvas)?;
    fs::write(path, &bytes).map_err(|e| IconError::io(path, e))?;
    log::info!(
        "Wrote {} ({}x{}, {} bytes)",
        path.display(),
        canvas.width(),
        canvas.height(),
        bytes.len()
    );
    Ok(())
}

pub fn read_png(path: &Path) -> Result<Canvas, IconError> {
    let bytes = fs::read(path).map_err(|e| IconError::io(path, e))?;
    decode_png(&bytes)
}
