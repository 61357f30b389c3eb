use crate::{
    pixel::{bits, PixelBuffer, Rotation},
    Conceal, Result,
};
use tracing::debug;

/// A pixel carrier that masks cover images with a distortion image.
///
/// The [`conceal`][crate::Conceal::conceal] method performs two steps:
///
/// 1. The cover is XORed byte-wise with the distortion image, giving the *xored* artifact.
/// 2. Every byte of that artifact is rotated right, giving the *rotated* artifact.
///
/// Both artifacts are returned in [`Masked`], since descriptors may be derived from either.
///
/// # Examples
///
/// ```
/// use pixmask::{pixel, Conceal, PixelBuffer};
///
/// let cover = PixelBuffer::new(2, 1, vec![10, 20, 30, 40, 50, 60])?;
/// let distortion = PixelBuffer::new(2, 1, vec![5; 6])?;
///
/// let carrier = pixel::Carrier::new(distortion);
/// let masked = carrier.conceal(&cover)?;
///
/// assert_eq!(masked.xored.as_bytes(), &[15, 17, 27, 45, 55, 61]);
/// # Ok::<(), pixmask::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Carrier {
    distortion: PixelBuffer,
    rotation: Rotation,
}

impl Carrier {
    /// Creates a new [`Carrier`] with the supplied distortion image and the default rotation.
    #[must_use]
    pub fn new(distortion: PixelBuffer) -> Self {
        Self::with_rotation(Rotation::default(), distortion)
    }

    /// Creates a new [`Carrier`] with the supplied rotation and distortion image.
    #[must_use]
    pub fn with_rotation(rotation: Rotation, distortion: PixelBuffer) -> Self {
        Self {
            distortion,
            rotation,
        }
    }
}

/// The two artifacts produced by a [`Carrier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    /// Cover XOR distortion.
    pub xored: PixelBuffer,
    /// The xored artifact with every byte rotated right.
    pub rotated: PixelBuffer,
}

impl Conceal for &Carrier {
    type Output = Masked;

    fn conceal(self, cover: &PixelBuffer) -> Result<Masked> {
        cover.ensure_same_dimensions(&self.distortion)?;

        let (width, height) = cover.dimensions();
        let xored = PixelBuffer::new(
            width,
            height,
            bits::xor_combine(cover.as_bytes(), self.distortion.as_bytes())?,
        )?;

        let mut rotated = xored.clone();
        bits::rotate_right(rotated.as_bytes_mut(), self.rotation);

        debug!(width, height, bits = self.rotation.bits(), "masked cover");

        Ok(Masked { xored, rotated })
    }
}
