//! Pixel implementations of [`Conceal`][crate::Conceal] and [`Reveal`][crate::Reveal] traits.
//!
//! The [`Carrier`] and [`Package`] structures mask a cover image and recover it again via the
//! use of a distortion image and a per-byte bit rotation.
//!
//! ## Masking Algebra
//!
//! A distortion image paired with a rotation amount here act as the key.
//!
//! Masking XORs the cover with the distortion, producing the *xored* artifact, then rotates
//! every byte of it right, producing the *rotated* artifact. Both steps are bijections on bytes,
//! so recovery applies their inverses in reverse order: rotate left, then XOR with the same
//! distortion.
//!
//! It is up to the *sender* to supply a distortion image of exactly the cover's dimensions;
//! a mismatch is reported as [`Error::DimensionMismatch`][crate::Error::DimensionMismatch]
//! rather than truncated or padded.
//!
//! ## Bitwise Primitives
//!
//! [`xor_combine`], [`rotate_right`] and [`rotate_left`] operate on raw byte slices and are
//! exposed for callers that manage their own buffers.
//!
//! ## Examples
//!
//! Masking and recovering a cover:
//!
//! ```
//! use pixmask::{pixel, Conceal, PixelBuffer, Reveal, Rotation};
//!
//! let cover = PixelBuffer::new(1, 2, vec![1, 2, 3, 4, 5, 6])?;
//! let distortion = PixelBuffer::new(1, 2, vec![0xAA; 6])?;
//! let rotation = Rotation::new(3)?;
//!
//! let masked = pixel::Carrier::with_rotation(rotation, distortion.clone()).conceal(&cover)?;
//! let recovered = pixel::Package::with_rotation(rotation, masked.rotated).reveal(&distortion)?;
//!
//! assert_eq!(recovered, cover);
//! # Ok::<(), pixmask::Error>(())
//! ```

mod bits;
mod buffer;
mod carrier;
mod package;

pub use bits::{rotate_left, rotate_right, xor_combine, Rotation};
pub use buffer::{PixelBuffer, CHANNELS};
pub use carrier::{Carrier, Masked};
pub use package::Package;
