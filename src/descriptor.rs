//! Masking descriptors.
//!
//! A [`MaskingDescriptor`] records, for every pixel of a mask image, the per-channel sum of the
//! mask sample and the sample of a transformed buffer read from a pixel `offset` onwards. Sums
//! are additive and unclamped, so values above 255 are expected.
//!
//! ## Text Format
//!
//! Descriptors persist as newline-terminated text, one integer offset followed by one
//! whitespace-separated triple per mask pixel:
//!
//! ```text
//! 100
//! 141 27 300
//! 12 255 409
//! ```

use crate::{pixel::CHANNELS, Error, PixelBuffer, Result};
use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};
use tracing::{debug, info};

/// An offset plus one `(r, g, b)` sum per mask pixel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskingDescriptor {
    offset: usize,
    pixels: Vec<[u32; 3]>,
}

impl MaskingDescriptor {
    /// Creates a descriptor from an offset and already computed sums.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixmask::MaskingDescriptor;
    ///
    /// let descriptor = MaskingDescriptor::new(100, vec![[300, 0, 12]]);
    /// assert_eq!(descriptor.to_string(), "100\n300 0 12\n");
    /// ```
    #[must_use]
    pub fn new(offset: usize, pixels: Vec<[u32; 3]>) -> Self {
        Self { offset, pixels }
    }

    /// Derives a descriptor covering every pixel of `mask`.
    ///
    /// See [`MaskingDescriptor::generate_with_len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pixmask::{MaskingDescriptor, PixelBuffer};
    ///
    /// let source = PixelBuffer::new(2, 1, vec![10, 10, 10, 20, 20, 20])?;
    /// let mask = PixelBuffer::new(2, 1, vec![1, 1, 1, 2, 2, 2])?;
    ///
    /// let descriptor = MaskingDescriptor::generate(&source, &mask, 0)?;
    /// assert_eq!(descriptor.pixels(), &[[11, 11, 11], [22, 22, 22]]);
    /// # Ok::<(), pixmask::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `source` is too short for `offset` plus the mask.
    pub fn generate(source: &PixelBuffer, mask: &PixelBuffer, offset: usize) -> Result<Self> {
        Self::generate_with_len(source, mask, offset, mask.pixel_count())
    }

    /// Derives a descriptor of `n_pixels` sums.
    ///
    /// Source samples are read from byte `offset * 3` of `source`; mask samples are read from the
    /// start of `mask`, unshifted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either buffer would be read past its end.
    pub fn generate_with_len(
        source: &PixelBuffer,
        mask: &PixelBuffer,
        offset: usize,
        n_pixels: usize,
    ) -> Result<Self> {
        let source = source.as_bytes();
        let mask = mask.as_bytes();

        let out_of_range = |len| Error::OutOfRange {
            offset,
            pixels: n_pixels,
            len,
        };

        let span = n_pixels
            .checked_mul(CHANNELS)
            .ok_or_else(|| out_of_range(mask.len()))?;
        if span > mask.len() {
            return Err(out_of_range(mask.len()));
        }

        let start = offset
            .checked_mul(CHANNELS)
            .ok_or_else(|| out_of_range(source.len()))?;
        let samples = start
            .checked_add(span)
            .and_then(|end| source.get(start..end))
            .ok_or_else(|| out_of_range(source.len()))?;

        let pixels = samples
            .chunks_exact(CHANNELS)
            .zip(mask[..span].chunks_exact(CHANNELS))
            .map(|(s, m)| {
                [
                    u32::from(s[0]) + u32::from(m[0]),
                    u32::from(s[1]) + u32::from(m[1]),
                    u32::from(s[2]) + u32::from(m[2]),
                ]
            })
            .collect();

        Ok(Self { offset, pixels })
    }

    /// First source pixel that was sampled.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// One `[r, g, b]` sum per mask pixel, in mask order.
    #[must_use]
    pub fn pixels(&self) -> &[[u32; 3]] {
        &self.pixels
    }

    /// Number of pixel sums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the descriptor holds no sums.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Writes the descriptor text into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while writing.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Writes the descriptor text to a file at `path`, replacing it if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        File::create(path)
            .and_then(|file| self.write_to(file))
            .map_err(|source| Error::write(path, source))?;

        info!(path = %path.display(), offset = self.offset, pixels = self.len(), "saved descriptor");
        Ok(())
    }

    /// Reads a descriptor from its text form.
    ///
    /// Tokens may be separated by any whitespace, including line breaks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the offset is missing, a token is not made of ASCII digits
    /// only, or the last triple is incomplete.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut offset = None;
        let mut pixels = Vec::new();
        let mut pending = Vec::with_capacity(CHANNELS);
        let mut last_line = 1;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            last_line = index + 1;

            for token in line.split_whitespace() {
                let invalid = || Error::Parse {
                    line: last_line,
                    reason: format!("invalid integer {token:?}"),
                };
                if !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }

                if offset.is_none() {
                    offset = Some(token.parse::<usize>().map_err(|_| invalid())?);
                    continue;
                }

                pending.push(token.parse::<u32>().map_err(|_| invalid())?);
                if pending.len() == CHANNELS {
                    pixels.push([pending[0], pending[1], pending[2]]);
                    pending.clear();
                }
            }
        }

        let Some(offset) = offset else {
            return Err(Error::Parse {
                line: last_line,
                reason: "missing offset".to_owned(),
            });
        };

        if !pending.is_empty() {
            return Err(Error::Parse {
                line: last_line,
                reason: format!("incomplete pixel triple of {} values", pending.len()),
            });
        }

        Ok(Self { offset, pixels })
    }

    /// Reads a descriptor from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, or any error of
    /// [`MaskingDescriptor::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let descriptor = Self::parse(BufReader::new(File::open(path.as_ref())?))?;
        debug!(
            path = %path.as_ref().display(),
            offset = descriptor.offset,
            pixels = descriptor.len(),
            "loaded descriptor"
        );
        Ok(descriptor)
    }
}

impl fmt::Display for MaskingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.offset)?;
        for [r, g, b] in &self.pixels {
            writeln!(f, "{r} {g} {b}")?;
        }
        Ok(())
    }
}
