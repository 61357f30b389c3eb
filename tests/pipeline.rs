use pixmask::{
    codec,
    pipeline::{self, Config, Step},
    Error, MaskingDescriptor, PixelBuffer,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn scratch_dir(name: &str) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("pixmask-{}-{name}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn pattern(width: u32, height: u32, seed: u8) -> pixmask::Result<PixelBuffer> {
    let len = width as usize * height as usize * 3;
    let data = (0..len)
        .map(|i| (i as u8).wrapping_mul(seed).wrapping_add(seed))
        .collect();
    PixelBuffer::new(width, height, data)
}

fn seed_inputs(config: &Config) -> pixmask::Result<()> {
    codec::save(&pattern(16, 16, 3)?, &config.cover)?;
    codec::save(&pattern(16, 16, 11)?, &config.distortion)?;
    codec::save(&pattern(4, 2, 29)?, &config.mask)?;
    Ok(())
}

fn config_in(dir: &Path) -> Config {
    Config {
        offset: 10,
        ..Config::in_dir(dir)
    }
}

#[test]
fn it_masks_describes_and_recovers() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-full")?;
    let config = config_in(&dir);
    seed_inputs(&config)?;

    let report = pipeline::run(&config);

    assert!(report.failures().is_empty(), "{:?}", report.failures());
    assert!(report.checks()[0].passed());
    assert_eq!(codec::load(&config.reconstructed)?, codec::load(&config.cover)?);

    let rotated = codec::load(&config.rotated)?;
    let mask = codec::load(&config.mask)?;
    assert_eq!(
        MaskingDescriptor::load(&config.descriptor)?,
        MaskingDescriptor::generate(&rotated, &mask, 10)?,
    );

    let xored = codec::load(&config.xored)?;
    assert_eq!(
        MaskingDescriptor::load(&config.secondary_descriptor)?,
        MaskingDescriptor::generate(&xored, &mask, 10)?,
    );

    // No references captured yet.
    assert!(!report.passed());
    assert!(matches!(report.checks()[1].outcome, Err(Error::Io(_))));

    fs::copy(&config.descriptor, &config.reference_descriptor)?;
    fs::copy(&config.secondary_descriptor, &config.secondary_reference)?;

    let report = pipeline::run(&config);
    assert!(report.passed());
    assert_eq!(report.exit_code(), 0);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_flags_descriptors_that_differ_from_their_references() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-differ")?;
    let config = config_in(&dir);
    seed_inputs(&config)?;

    MaskingDescriptor::new(10, vec![[0, 0, 0]]).save(&config.reference_descriptor)?;
    MaskingDescriptor::new(10, vec![[0, 0, 0]]).save(&config.secondary_reference)?;

    let report = pipeline::run(&config);

    assert!(report.failures().is_empty());
    assert!(report.checks()[0].passed());
    assert!(!report.checks()[1].passed());
    assert!(!report.checks()[2].passed());
    assert_eq!(report.exit_code(), 1);
    assert!(report.checks()[1].to_string().starts_with("FAIL"));

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_keeps_reconstructing_without_a_mask() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-no-mask")?;
    let config = config_in(&dir);
    seed_inputs(&config)?;
    fs::remove_file(&config.mask)?;

    let report = pipeline::run(&config);

    assert!(report.failed(Step::LoadMask));
    assert!(!report.failed(Step::Encode));
    assert!(!report.failed(Step::Reconstruct));
    assert!(report.checks()[0].passed());
    assert!(!config.descriptor.exists());
    assert_eq!(report.exit_code(), 2);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_skips_encoding_mismatched_images() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-mismatch")?;
    let config = config_in(&dir);
    seed_inputs(&config)?;
    codec::save(&pattern(8, 8, 11)?, &config.distortion)?;

    let report = pipeline::run(&config);

    assert!(matches!(
        report.failures().first(),
        Some((Step::Encode, Error::DimensionMismatch { .. }))
    ));
    assert!(!config.xored.exists());
    assert!(!config.rotated.exists());
    assert_eq!(report.exit_code(), 3);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_reports_out_of_range_offsets() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-offset")?;
    let config = Config {
        offset: 16 * 16,
        ..Config::in_dir(&dir)
    };
    seed_inputs(&config)?;

    let report = pipeline::run(&config);

    assert!(report.failed(Step::SecondaryDescriptor));
    assert!(report.failed(Step::CanonicalDescriptor));
    assert!(!report.failed(Step::Reconstruct));
    assert_eq!(report.exit_code(), 4);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_does_not_pass_on_artifacts_left_by_an_earlier_run() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-stale")?;
    let config = config_in(&dir);
    seed_inputs(&config)?;

    let report = pipeline::run(&config);
    assert!(report.checks()[0].passed());
    fs::copy(&config.descriptor, &config.reference_descriptor)?;
    fs::copy(&config.secondary_descriptor, &config.secondary_reference)?;

    codec::save(&pattern(8, 8, 11)?, &config.distortion)?;
    let report = pipeline::run(&config);

    assert!(report.failed(Step::Encode));
    assert!(report.failed(Step::Reconstruct));
    assert!(config.reconstructed.exists());
    assert!(!report.checks()[0].passed());
    assert!(report.checks()[0].to_string().starts_with("FAIL"));
    assert!(!report.passed());
    assert_eq!(report.exit_code(), 3);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_does_not_compare_descriptors_that_failed_to_generate() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-stale-descriptors")?;
    let config = config_in(&dir);
    seed_inputs(&config)?;

    let _ = pipeline::run(&config);
    fs::copy(&config.descriptor, &config.reference_descriptor)?;
    fs::copy(&config.secondary_descriptor, &config.secondary_reference)?;
    assert!(pipeline::run(&config).passed());

    let config = Config {
        offset: 16 * 16,
        ..config
    };
    let report = pipeline::run(&config);

    assert!(report.checks()[0].passed());
    assert!(!report.checks()[1].passed());
    assert!(!report.checks()[2].passed());
    assert_eq!(report.exit_code(), 4);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_continues_after_an_unwritable_artifact() -> pixmask::Result<()> {
    let dir = scratch_dir("pipeline-unwritable")?;
    let config = Config {
        xored: dir.join("missing").join("P1.bmp"),
        ..config_in(&dir)
    };
    seed_inputs(&config)?;

    let report = pipeline::run(&config);

    assert!(matches!(
        report.failures().first(),
        Some((Step::Encode, Error::Write { .. }))
    ));
    assert!(config.rotated.exists());
    assert!(!report.failed(Step::CanonicalDescriptor));
    assert!(report.failed(Step::SecondaryDescriptor));
    assert!(!report.failed(Step::Reconstruct));
    assert!(report.checks()[0].passed());
    assert!(config.descriptor.exists());
    assert_eq!(report.exit_code(), 5);

    fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn it_resolves_default_names_under_a_directory() {
    let config = Config::in_dir("work");

    assert_eq!(config.cover, PathBuf::from("work").join("I_O.bmp"));
    assert_eq!(config.reference_descriptor, PathBuf::from("work").join("M1_generado.txt"));
    assert_eq!(config.offset, 100);
    assert_eq!(config.rotation.bits(), 3);
}
