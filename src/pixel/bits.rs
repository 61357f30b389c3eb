use crate::{Error, Result};

/// A per-byte circular rotation amount, always in `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u32);

impl Rotation {
    /// The three-bit rotation used by the masking pipeline.
    pub const DEFAULT: Self = Self(3);

    /// Validates `bits` as a rotation amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixmask::Rotation;
    ///
    /// assert_eq!(Rotation::new(3)?, Rotation::DEFAULT);
    /// assert!(Rotation::new(8).is_err());
    /// # Ok::<(), pixmask::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRotation`] unless `0 < bits < 8`.
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits >= u8::BITS {
            return Err(Error::InvalidRotation(bits));
        }

        Ok(Self(bits))
    }

    /// Number of bit positions each byte is rotated by.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Returns `a[i] ^ b[i]` for every index.
///
/// The operation is its own inverse: combining the result with `b` again yields `a`.
///
/// # Errors
///
/// Returns [`Error::InvalidBufferSize`] if the slices differ in length.
pub fn xor_combine(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(Error::InvalidBufferSize {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// Rotates every byte of `data` right by `rotation` bits, in place.
pub fn rotate_right(data: &mut [u8], rotation: Rotation) {
    for byte in data {
        *byte = byte.rotate_right(rotation.bits());
    }
}

/// Rotates every byte of `data` left by `rotation` bits, in place.
///
/// Undoes [`rotate_right`] with the same rotation.
pub fn rotate_left(data: &mut [u8], rotation: Rotation) {
    for byte in data {
        *byte = byte.rotate_left(rotation.bits());
    }
}
