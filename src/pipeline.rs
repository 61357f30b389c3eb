//! The end-to-end masking run.
//!
//! [`run`] executes a strict sequence: encode the cover, describe both artifacts against the
//! mask, reconstruct the cover from the rotated artifact, then verify. Every branch reads its
//! inputs from disk, so a failure in one branch (say, a missing mask) only skips the steps
//! that need that input; the rest still run and the failure is kept in the [`Report`].

use crate::{
    codec, pixel, verify, Conceal, Error, MaskingDescriptor, PixelBuffer, Result, Reveal, Rotation,
};
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// File locations and parameters of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Original cover image.
    pub cover: PathBuf,
    /// Image XORed with the cover.
    pub distortion: PathBuf,
    /// Image summed into the descriptors.
    pub mask: PathBuf,
    /// Cover XOR distortion.
    pub xored: PathBuf,
    /// Xored artifact rotated right.
    pub rotated: PathBuf,
    /// Cover recovered from the rotated artifact.
    pub reconstructed: PathBuf,
    /// Descriptor generated from the rotated artifact.
    pub descriptor: PathBuf,
    /// Descriptor generated from the xored artifact.
    pub secondary_descriptor: PathBuf,
    /// Previously captured counterpart of `descriptor`.
    pub reference_descriptor: PathBuf,
    /// Previously captured counterpart of `secondary_descriptor`.
    pub secondary_reference: PathBuf,
    /// First source pixel sampled by the descriptors.
    pub offset: usize,
    pub rotation: Rotation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cover: "I_O.bmp".into(),
            distortion: "I_M.bmp".into(),
            mask: "M.bmp".into(),
            xored: "P1.bmp".into(),
            rotated: "P2.bmp".into(),
            reconstructed: "P3.bmp".into(),
            descriptor: "M1.txt".into(),
            secondary_descriptor: "M2.txt".into(),
            reference_descriptor: "M1_generado.txt".into(),
            secondary_reference: "M2_generado.txt".into(),
            offset: 100,
            rotation: Rotation::DEFAULT,
        }
    }
}

impl Config {
    /// Default configuration with every file placed under `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();

        Self {
            cover: dir.join(defaults.cover),
            distortion: dir.join(defaults.distortion),
            mask: dir.join(defaults.mask),
            xored: dir.join(defaults.xored),
            rotated: dir.join(defaults.rotated),
            reconstructed: dir.join(defaults.reconstructed),
            descriptor: dir.join(defaults.descriptor),
            secondary_descriptor: dir.join(defaults.secondary_descriptor),
            reference_descriptor: dir.join(defaults.reference_descriptor),
            secondary_reference: dir.join(defaults.secondary_reference),
            ..defaults
        }
    }
}

/// A pipeline step whose failure is recorded in the [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Encode,
    LoadMask,
    CanonicalDescriptor,
    SecondaryDescriptor,
    Reconstruct,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Encode => "encode",
            Self::LoadMask => "load mask",
            Self::CanonicalDescriptor => "canonical descriptor",
            Self::SecondaryDescriptor => "secondary descriptor",
            Self::Reconstruct => "reconstruct",
        })
    }
}

/// The outcome of one equivalence check.
#[derive(Debug)]
pub struct Check {
    pub subject: String,
    /// `Ok(false)` is a mismatch; `Err` means the inputs could not be read.
    pub outcome: Result<bool>,
}

impl Check {
    /// Whether the compared inputs were equal.
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Ok(true))
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(true) => write!(f, "PASS {}", self.subject),
            Ok(false) => write!(f, "FAIL {}", self.subject),
            Err(e) => write!(f, "FAIL {} ({e})", self.subject),
        }
    }
}

/// Everything that went wrong, and every check performed, during a run.
#[derive(Debug, Default)]
pub struct Report {
    failures: Vec<(Step, Error)>,
    checks: Vec<Check>,
}

impl Report {
    /// Failed steps, in the order they ran.
    #[must_use]
    pub fn failures(&self) -> &[(Step, Error)] {
        &self.failures
    }

    /// Image check first, then the canonical and secondary descriptor checks.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Whether `step` failed during the run.
    #[must_use]
    pub fn failed(&self, step: Step) -> bool {
        self.failures.iter().any(|(s, _)| *s == step)
    }

    /// Whether no step failed and every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.checks.iter().all(Check::passed)
    }

    /// Exit code for the run: the first step failure's code, else the first unreadable check's
    /// code, else `1` for a mismatch, else `0`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if let Some((_, e)) = self.failures.first() {
            return e.exit_code();
        }

        let mut code = 0;
        for check in &self.checks {
            match &check.outcome {
                Err(e) => return e.exit_code(),
                Ok(false) => code = 1,
                Ok(true) => {}
            }
        }
        code
    }

    fn record(&mut self, step: Step, result: Result<()>) {
        match result {
            Ok(()) => info!(%step, "step completed"),
            Err(e) => {
                warn!(%step, error = %e, "step failed");
                self.failures.push((step, e));
            }
        }
    }

    fn check(&mut self, subject: String, outcome: Result<bool>) {
        match &outcome {
            Ok(true) => info!(%subject, "match"),
            Ok(false) => warn!(%subject, "mismatch"),
            Err(e) => warn!(%subject, error = %e, "could not compare"),
        }
        self.checks.push(Check { subject, outcome });
    }

    /// Records a check whose input was not produced in this run as a mismatch, so files left
    /// over from an earlier run are never compared.
    fn skip(&mut self, subject: String, cause: Step) {
        warn!(%subject, %cause, "not compared, input was not produced");
        self.checks.push(Check {
            subject,
            outcome: Ok(false),
        });
    }
}

/// Runs every step of the pipeline once, in order.
///
/// A check whose input step failed in this run is recorded as a mismatch without reading the
/// files involved.
#[must_use]
pub fn run(config: &Config) -> Report {
    let mut report = Report::default();

    report.record(Step::Encode, encode(config));

    inspect_reference(&config.reference_descriptor);

    match codec::load(&config.mask) {
        Ok(mask) => {
            report.record(
                Step::SecondaryDescriptor,
                describe(&config.xored, &mask, config.offset, &config.secondary_descriptor),
            );
            report.record(
                Step::CanonicalDescriptor,
                describe(&config.rotated, &mask, config.offset, &config.descriptor),
            );
        }
        Err(e) => {
            warn!("mask unavailable, skipping descriptors");
            report.record(Step::LoadMask, Err(e));
        }
    }

    report.record(Step::Reconstruct, reconstruct(config));

    let subject = format!(
        "{} matches {}",
        config.reconstructed.display(),
        config.cover.display()
    );
    if report.failed(Step::Reconstruct) {
        report.skip(subject, Step::Reconstruct);
    } else {
        let outcome = verify::compare_image_files(&config.reconstructed, &config.cover);
        report.check(subject, outcome);
    }

    for (step, generated, reference) in [
        (Step::CanonicalDescriptor, &config.descriptor, &config.reference_descriptor),
        (Step::SecondaryDescriptor, &config.secondary_descriptor, &config.secondary_reference),
    ] {
        let subject = format!("{} matches {}", generated.display(), reference.display());
        if report.failed(Step::LoadMask) {
            report.skip(subject, Step::LoadMask);
        } else if report.failed(step) {
            report.skip(subject, step);
        } else {
            report.check(subject, verify::compare_text_files(generated, reference));
        }
    }

    report
}

/// Masks the cover and persists both artifacts.
///
/// # Errors
///
/// Fails if either input cannot be loaded, their dimensions differ, or an artifact cannot be
/// written.
pub fn encode(config: &Config) -> Result<()> {
    let cover = codec::load(&config.cover)?;
    let distortion = codec::load(&config.distortion)?;

    let carrier = pixel::Carrier::with_rotation(config.rotation, distortion);
    let masked = carrier.conceal(&cover)?;

    let mut first_error = None;
    for (artifact, path) in [
        (&masked.xored, &config.xored),
        (&masked.rotated, &config.rotated),
    ] {
        if let Err(e) = codec::save(artifact, path) {
            warn!(path = %path.display(), error = %e, "artifact not saved");
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Generates a descriptor from the image at `source` and writes it to `output`.
///
/// # Errors
///
/// Fails if `source` cannot be loaded, the sampled range is out of bounds, or `output` cannot
/// be written.
pub fn describe(source: &Path, mask: &PixelBuffer, offset: usize, output: &Path) -> Result<()> {
    let source = codec::load(source)?;
    MaskingDescriptor::generate(&source, mask, offset)?.save(output)
}

/// Recovers the cover from the rotated artifact and persists it.
///
/// # Errors
///
/// Fails if the artifact or distortion cannot be loaded, their dimensions differ, or the result
/// cannot be written.
pub fn reconstruct(config: &Config) -> Result<()> {
    let artifact = codec::load(&config.rotated)?;
    let distortion = codec::load(&config.distortion)?;

    let recovered = pixel::Package::with_rotation(config.rotation, artifact).reveal(&distortion)?;
    codec::save(&recovered, &config.reconstructed)
}

fn inspect_reference(path: &Path) {
    match MaskingDescriptor::load(path) {
        Ok(reference) => {
            info!(
                path = %path.display(),
                offset = reference.offset(),
                pixels = reference.len(),
                "reference descriptor loaded"
            );
            for (i, [r, g, b]) in reference.pixels().iter().enumerate() {
                debug!("pixel {i}: ({r}, {g}, {b})");
            }
        }
        Err(e) => warn!(path = %path.display(), error = %e, "reference descriptor unavailable"),
    }
}
