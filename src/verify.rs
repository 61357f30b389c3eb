//! Read-only equivalence checks over images and descriptor files.

use crate::{codec, PixelBuffer, Result};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Returns whether two buffers hold the same image, byte for byte.
///
/// Buffers of different dimensions compare unequal without their pixels being read.
#[must_use]
pub fn compare_images(a: &PixelBuffer, b: &PixelBuffer) -> bool {
    a.dimensions() == b.dimensions() && a.as_bytes() == b.as_bytes()
}

/// Loads two images and compares them with [`compare_images`].
///
/// # Errors
///
/// Returns [`Error::Load`][crate::Error::Load] if either image cannot be loaded.
pub fn compare_image_files(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Result<bool> {
    Ok(compare_images(&codec::load(a)?, &codec::load(b)?))
}

/// Returns whether both readers yield exactly the same lines, byte for byte.
///
/// Lines are split on `\n` only, so a `\r` before it is part of the line and the content need
/// not be UTF-8. A missing newline at the very end is not a difference. Both readers must run
/// out together; one extra line on either side is a mismatch even if all common lines agree.
///
/// # Errors
///
/// Returns any I/O error encountered while reading.
pub fn compare_lines<A: BufRead, B: BufRead>(mut a: A, mut b: B) -> io::Result<bool> {
    let mut line_a = Vec::new();
    let mut line_b = Vec::new();

    loop {
        line_a.clear();
        line_b.clear();

        let read_a = a.read_until(b'\n', &mut line_a)?;
        let read_b = b.read_until(b'\n', &mut line_b)?;

        match (read_a, read_b) {
            (0, 0) => return Ok(true),
            (0, _) | (_, 0) => return Ok(false),
            _ if strip_newline(&line_a) == strip_newline(&line_b) => continue,
            _ => return Ok(false),
        }
    }
}

fn strip_newline(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

/// Compares two text files line by line with [`compare_lines`].
///
/// # Errors
///
/// Returns [`Error::Io`][crate::Error::Io] if either file cannot be opened or read.
pub fn compare_text_files(a: impl AsRef<Path>, b: impl AsRef<Path>) -> Result<bool> {
    let a = BufReader::new(File::open(a)?);
    let b = BufReader::new(File::open(b)?);
    Ok(compare_lines(a, b)?)
}
