use crate::{Error, Result};
use image::RgbImage;

/// Number of bytes per pixel in every buffer handled by this crate.
pub const CHANNELS: usize = 3;

/// A flat, row-major RGB888 pixel buffer with no row padding.
///
/// The byte length is always `width * height * 3`, which is checked on construction.
///
/// # Examples
///
/// ```
/// use pixmask::PixelBuffer;
///
/// let buffer = PixelBuffer::new(2, 1, vec![10, 20, 30, 40, 50, 60])?;
/// assert_eq!(buffer.pixel_count(), 2);
/// # Ok::<(), pixmask::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps `data` as a `width` by `height` RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBufferSize`] if `data` is not exactly `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::InvalidBufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a zero-filled buffer.
    #[must_use]
    pub fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of RGB triples, `width * height`.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Raw interleaved `R, G, B` bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes; the length cannot change through this slice.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Fails with [`Error::DimensionMismatch`] unless `other` has the same width and height.
    pub fn ensure_same_dimensions(&self, other: &Self) -> Result<()> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            })
        }
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}
