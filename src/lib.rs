//! # pixmask
//!
//! The **pixmask** library implements a reversible pixel masking pipeline over flat RGB888
//! buffers: a cover image is XORed with a distortion image, every byte is circularly rotated,
//! and the result can later be turned back into the exact cover given the same distortion.
//!
//! ## Pixel implementation
//!
//! The [`pixel`] module provides [`pixel::Carrier`] and [`pixel::Package`], the two halves of
//! the transform. See its [documentation][`pixel`] for the algebra behind them.
//!
//! ## Masking descriptors
//!
//! The [`descriptor`] module derives an offset-based textual description of a transformed
//! buffer summed against a mask image, and reads that text back.
//!
//! ## Verification
//!
//! The [`verify`] module compares images byte-for-byte and descriptor files line-for-line, and
//! the [`pipeline`] module ties every step together into a single run.

pub mod codec;
pub mod descriptor;
mod error;
pub mod pipeline;
pub mod pixel;
pub mod verify;

pub use descriptor::MaskingDescriptor;
pub use error::{Error, Result};
pub use pixel::{PixelBuffer, Rotation};

/// A trait for objects able to mask cover images, or carriers.
///
/// Carriers are defined by a single required method, [`conceal`][Conceal::conceal],
/// which transforms the cover into its masked form.
///
/// # Examples
///
/// [`pixel::Carrier`] masks a cover with a distortion image and a bit rotation.
pub trait Conceal {
    /// What the carrier produces from a cover.
    type Output;

    /// Masks `cover`, leaving it untouched.
    ///
    /// # Errors
    ///
    /// Implementations fail instead of truncating or padding when `cover` does not fit the
    /// carrier's own dimensions.
    fn conceal(self, cover: &PixelBuffer) -> Result<Self::Output>;
}

/// A trait for objects able to recover masked images, or packages.
///
/// Packages are defined by a single required method, [`reveal`][Reveal::reveal],
/// which undoes a [`Conceal`] step given the key buffer it was masked with.
///
/// # Examples
///
/// [`pixel::Package`] recovers the cover from a masked artifact and the distortion image.
pub trait Reveal {
    /// Recovers the original buffer using `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` does not match the package's dimensions.
    fn reveal(self, key: &PixelBuffer) -> Result<PixelBuffer>;
}
