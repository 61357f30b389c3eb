//! Image file boundary.
//!
//! Decoding accepts any format the `image` crate is built with and converts to RGB888;
//! encoding always writes BMP so that pixel data round-trips losslessly.

use crate::{Error, PixelBuffer, Result};
use image::{ColorType, ImageFormat};
use std::path::Path;
use tracing::info;

/// Loads the image at `path` as a flat RGB888 buffer.
///
/// # Errors
///
/// Returns [`Error::Load`] if the file is missing or cannot be decoded.
pub fn load(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(PixelBuffer::from(image.to_rgb8()))
}

/// Saves `buffer` to `path` as a 24-bit BMP.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be created or encoded.
pub fn save(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let (width, height) = buffer.dimensions();

    image::save_buffer_with_format(
        path,
        buffer.as_bytes(),
        width,
        height,
        ColorType::Rgb8,
        ImageFormat::Bmp,
    )
    .map_err(|source| Error::write(path, source))?;

    info!(path = %path.display(), width, height, "saved image");
    Ok(())
}
