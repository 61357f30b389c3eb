use crate::{
    pixel::{bits, PixelBuffer, Rotation},
    Result, Reveal,
};
use tracing::debug;

/// A pixel package that holds a masked artifact.
///
/// The [`reveal`][crate::Reveal::reveal] method undoes a [`Carrier`][super::Carrier] in
/// reverse order, each step by its own inverse:
///
/// 1. Every byte is rotated left by the package's rotation.
/// 2. The result is XORed with the distortion image.
///
/// The package is consumed, as the rotation happens in place.
///
/// # Examples
///
/// ```
/// use pixmask::{pixel, Conceal, PixelBuffer, Reveal};
///
/// let cover = PixelBuffer::new(2, 1, vec![10, 20, 30, 40, 50, 60])?;
/// let distortion = PixelBuffer::new(2, 1, vec![5; 6])?;
///
/// let masked = pixel::Carrier::new(distortion.clone()).conceal(&cover)?;
/// let recovered = pixel::Package::new(masked.rotated).reveal(&distortion)?;
///
/// assert_eq!(recovered, cover);
/// # Ok::<(), pixmask::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Package {
    artifact: PixelBuffer,
    rotation: Rotation,
}

impl Package {
    /// Creates a new [`Package`] holding `artifact`, masked with the default rotation.
    #[must_use]
    pub fn new(artifact: PixelBuffer) -> Self {
        Self::with_rotation(Rotation::default(), artifact)
    }

    /// Creates a new [`Package`] holding `artifact`, masked with `rotation`.
    #[must_use]
    pub fn with_rotation(rotation: Rotation, artifact: PixelBuffer) -> Self {
        Self { artifact, rotation }
    }
}

impl Reveal for Package {
    fn reveal(mut self, key: &PixelBuffer) -> Result<PixelBuffer> {
        self.artifact.ensure_same_dimensions(key)?;

        bits::rotate_left(self.artifact.as_bytes_mut(), self.rotation);

        let (width, height) = self.artifact.dimensions();
        let recovered = bits::xor_combine(self.artifact.as_bytes(), key.as_bytes())?;

        debug!(width, height, bits = self.rotation.bits(), "revealed artifact");

        PixelBuffer::new(width, height, recovered)
    }
}
