//! Error type shared by every stage of the masking pipeline.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors produced while loading, transforming, describing or persisting pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// The image boundary could not produce a buffer (missing file or undecodable data).
    #[error("failed to load image {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Two buffers that must agree in size do not.
    #[error("dimension mismatch: expected {}x{}, found {}x{}", expected.0, expected.1, found.0, found.1)]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// Descriptor sampling would read past the end of a buffer.
    #[error("offset {offset} with {pixels} pixels reads past a buffer of {len} bytes")]
    OutOfRange {
        offset: usize,
        pixels: usize,
        len: usize,
    },

    /// An image or descriptor could not be persisted.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid buffer size: expected {expected}, got {actual}")]
    InvalidBufferSize { expected: usize, actual: usize },

    #[error("rotation must be between 1 and 7 bits, got {0}")]
    InvalidRotation(u32),

    #[error("malformed descriptor at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code reported for this kind of failure.
    ///
    /// Code `0` is success and `1` is reserved for a run whose comparisons disagreed.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Load { .. } => 2,
            Self::DimensionMismatch { .. } => 3,
            Self::OutOfRange { .. } => 4,
            Self::Write { .. } => 5,
            Self::InvalidBufferSize { .. } | Self::InvalidRotation(_) | Self::Parse { .. } => 6,
            Self::Io(_) => 7,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Write {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
