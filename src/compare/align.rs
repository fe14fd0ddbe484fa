// Alignment search: find the integer translation of B that best matches A.
//
// Page rendering can shift by a few pixels between two runs (anti-aliasing,
// minor reflow) without being a real difference. The search evaluates every
// translation within the radius and keeps the one with the fewest
// disagreeing pixels.

use image::{Rgba, RgbaImage};

use crate::compare::Offset;
use crate::compare::pixel;

pub const BACKFILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Draw `src` onto an opaque-white canvas of the given size, shifted by
/// `(dx, dy)`. Pixels falling outside the canvas are discarded; exposed
/// canvas area stays white. With `(0, 0)` this doubles as white padding to
/// a larger size.
pub fn composite_onto_white(
    src: &RgbaImage,
    width: u32,
    height: u32,
    dx: i32,
    dy: i32,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, BACKFILL);
    for (x, y, px) in src.enumerate_pixels() {
        let tx = x as i64 + dx as i64;
        let ty = y as i64 + dy as i64;
        if tx >= 0 && ty >= 0 && (tx as u64) < width as u64 && (ty as u64) < height as u64 {
            canvas.put_pixel(tx as u32, ty as u32, *px);
        }
    }
    canvas
}

/// Exhaustive `(2R+1)^2` search for the translation of `b` minimizing the
/// diff-pixel count against `a`.
///
/// Scan order is dy ascending (outer), dx ascending (inner), starting at
/// `(-radius, -radius)`; ties keep the first offset found. Radius 0 reduces
/// to the plain comparison at `(0, 0)`.
///
/// O(R^2 * W * H); acceptable because the radius is small and the search
/// runs once per page pair.
pub fn best_offset(
    a: &RgbaImage,
    b: &RgbaImage,
    radius: u32,
    tolerance: u32,
) -> crate::error::Result<Offset> {
    pixel::ensure_same_dimensions(a, b)?;

    let r = radius as i32;
    let mut best = Offset {
        dx: 0,
        dy: 0,
        diff_pixels: u64::MAX,
    };

    for dy in -r..=r {
        for dx in -r..=r {
            let shifted = composite_onto_white(b, a.width(), a.height(), dx, dy);
            let diff = pixel::diff_pixel_count(a, &shifted, tolerance)?;
            if diff < best.diff_pixels {
                best = Offset {
                    dx,
                    dy,
                    diff_pixels: diff,
                };
            }
        }
    }

    Ok(best)
}
