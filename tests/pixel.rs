use pixmask::{pixel, Conceal, Error, PixelBuffer, Reveal, Rotation};

fn rotations() -> impl Iterator<Item = Rotation> {
    (1..8).map(|bits| Rotation::new(bits).unwrap())
}

#[test]
fn it_conceals_and_reveals_a_two_pixel_cover() -> pixmask::Result<()> {
    let cover = PixelBuffer::new(2, 1, vec![10, 20, 30, 40, 50, 60])?;
    let distortion = PixelBuffer::new(2, 1, vec![5; 6])?;

    let masked = pixel::Carrier::new(distortion.clone()).conceal(&cover)?;

    assert_eq!(masked.xored.as_bytes(), &[15, 17, 27, 45, 55, 61]);
    assert_eq!(masked.rotated.as_bytes(), &[225, 34, 99, 165, 230, 167]);

    let mut unrotated = masked.rotated.clone().into_raw();
    pixel::rotate_left(&mut unrotated, Rotation::DEFAULT);
    assert_eq!(unrotated, masked.xored.as_bytes());

    let recovered = pixel::Package::new(masked.rotated).reveal(&distortion)?;
    assert_eq!(recovered, cover);

    Ok(())
}

#[test]
fn it_recovers_the_cover_for_every_rotation() -> pixmask::Result<()> {
    let cover_bytes: Vec<u8> = (0..=255u8).flat_map(|v| [v, v.wrapping_mul(7), !v]).collect();
    let distortion_bytes: Vec<u8> = (0..cover_bytes.len()).map(|i| (i * 31 % 256) as u8).collect();

    let cover = PixelBuffer::new(16, 16, cover_bytes)?;
    let distortion = PixelBuffer::new(16, 16, distortion_bytes)?;

    for rotation in rotations() {
        let masked =
            pixel::Carrier::with_rotation(rotation, distortion.clone()).conceal(&cover)?;
        let recovered =
            pixel::Package::with_rotation(rotation, masked.rotated).reveal(&distortion)?;

        assert_eq!(recovered, cover, "rotation of {} bits", rotation.bits());
    }

    Ok(())
}

#[test]
fn it_inverts_right_rotation_with_left_rotation() {
    let all: Vec<u8> = (0..=255).collect();

    for rotation in rotations() {
        let mut data = all.clone();
        pixel::rotate_right(&mut data, rotation);
        assert_ne!(data, all);
        pixel::rotate_left(&mut data, rotation);
        assert_eq!(data, all);
    }
}

#[test]
fn it_xors_as_a_self_inverse() -> pixmask::Result<()> {
    let a: Vec<u8> = (0..=255).collect();
    let b: Vec<u8> = a.iter().rev().map(|v| v ^ 0x5A).collect();

    let combined = pixel::xor_combine(&a, &b)?;
    assert_eq!(pixel::xor_combine(&combined, &b)?, a);

    Ok(())
}

#[test]
fn it_rejects_mismatched_xor_lengths() {
    assert!(matches!(
        pixel::xor_combine(&[1, 2, 3], &[1, 2]),
        Err(Error::InvalidBufferSize {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn it_rejects_mismatched_dimensions() {
    let cover = PixelBuffer::zeroed(2, 1);
    let distortion = PixelBuffer::zeroed(1, 2);

    assert!(matches!(
        pixel::Carrier::new(distortion.clone()).conceal(&cover),
        Err(Error::DimensionMismatch {
            expected: (2, 1),
            found: (1, 2)
        })
    ));

    assert!(matches!(
        pixel::Package::new(cover).reveal(&distortion),
        Err(Error::DimensionMismatch { .. })
    ));
}

#[test]
fn it_rejects_buffers_of_the_wrong_length() {
    assert!(matches!(
        PixelBuffer::new(2, 2, vec![0; 11]),
        Err(Error::InvalidBufferSize {
            expected: 12,
            actual: 11
        })
    ));
}
