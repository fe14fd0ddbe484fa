// Per-pixel comparison: the lowest-level primitive of the diff engine.

use image::{Rgba, RgbaImage};

/// Channel-sum color delta between two pixels. Alpha is excluded: the
/// renderer backfills with opaque white, so alpha carries no signal.
#[inline]
pub fn pixel_delta(a: &Rgba<u8>, b: &Rgba<u8>) -> u32 {
    let dr = (a.0[0] as i32 - b.0[0] as i32).unsigned_abs();
    let dg = (a.0[1] as i32 - b.0[1] as i32).unsigned_abs();
    let db = (a.0[2] as i32 - b.0[2] as i32).unsigned_abs();
    dr + dg + db
}

/// Whether two pixels differ under the given scalar tolerance.
///
/// The tolerance applies to the summed channel delta, so color and
/// luminance differences are treated identically.
#[inline]
pub fn pixels_differ(a: &Rgba<u8>, b: &Rgba<u8>, tolerance: u32) -> bool {
    pixel_delta(a, b) > tolerance
}

/// Count differing pixels between two equal-sized bitmaps.
pub fn diff_pixel_count(
    a: &RgbaImage,
    b: &RgbaImage,
    tolerance: u32,
) -> crate::error::Result<u64> {
    ensure_same_dimensions(a, b)?;

    let count = a
        .pixels()
        .zip(b.pixels())
        .filter(|(pa, pb)| pixels_differ(pa, pb, tolerance))
        .count() as u64;
    Ok(count)
}

pub(crate) fn ensure_same_dimensions(a: &RgbaImage, b: &RgbaImage) -> crate::error::Result<()> {
    if a.dimensions() != b.dimensions() {
        return Err(crate::error::PdfDiffError::dimension_mismatch(
            a.dimensions(),
            b.dimensions(),
        ));
    }
    Ok(())
}
