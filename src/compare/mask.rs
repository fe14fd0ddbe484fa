// Diff mask construction: differing pixels become opaque red, matching
// pixels stay fully transparent, so the mask can be drawn over either page
// as-is by a presentation layer.

use image::{Rgba, RgbaImage};

use crate::compare::Rect;
use crate::compare::pixel;

pub const DIFF_PIXEL: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const CLEAR_PIXEL: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[inline]
pub fn is_set(px: &Rgba<u8>) -> bool {
    px.0[3] != 0
}

/// Build the diff mask between two aligned, equal-sized bitmaps and return
/// it together with the differing-pixel count. One pass over the buffers.
pub fn build_diff_mask(
    a: &RgbaImage,
    b: &RgbaImage,
    tolerance: u32,
) -> crate::error::Result<(RgbaImage, u64)> {
    pixel::ensure_same_dimensions(a, b)?;

    let (width, height) = a.dimensions();
    let mut mask = RgbaImage::from_pixel(width, height, CLEAR_PIXEL);
    let mut count: u64 = 0;

    for (x, y, pa) in a.enumerate_pixels() {
        let pb = b.get_pixel(x, y);
        if pixel::pixels_differ(pa, pb, tolerance) {
            mask.put_pixel(x, y, DIFF_PIXEL);
            count += 1;
        }
    }

    Ok((mask, count))
}

/// Clear every mask pixel inside the given ignore rectangles.
///
/// Runs before dilation, so cleared regions can never resurrect through
/// expansion.
pub fn clear_regions(mask: &mut RgbaImage, regions: &[Rect]) {
    let (width, height) = mask.dimensions();
    for region in regions {
        let x0 = region.x.max(0.0).floor() as u32;
        let y0 = region.y.max(0.0).floor() as u32;
        let x1 = ((region.x + region.width).ceil().max(0.0) as u32).min(width);
        let y1 = ((region.y + region.height).ceil().max(0.0) as u32).min(height);
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, CLEAR_PIXEL);
            }
        }
    }
}

/// Dilate the mask's set pixels by a Chebyshev radius.
///
/// Separable max filter: a horizontal pass widens each run of set pixels,
/// then a vertical pass over that intermediate completes the square
/// structuring element. Radius 0 leaves the mask untouched. Dilation exists
/// so a single changed glyph highlights its whole word or line instead of a
/// one-pixel fleck.
pub fn dilate(mask: &mut RgbaImage, radius: u32) {
    if radius == 0 {
        return;
    }

    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let w = width as usize;
    let h = height as usize;

    let set: Vec<bool> = mask.pixels().map(is_set).collect();

    // Horizontal pass.
    let mut horiz = vec![false; w * h];
    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            let lo = x.saturating_sub(radius as usize);
            let hi = (x + radius as usize).min(w - 1);
            horiz[row + x] = set[row + lo..=row + hi].iter().any(|&s| s);
        }
    }

    // Vertical pass.
    for x in 0..w {
        for y in 0..h {
            let lo = y.saturating_sub(radius as usize);
            let hi = (y + radius as usize).min(h - 1);
            let expanded = (lo..=hi).any(|yy| horiz[yy * w + x]);
            let px = if expanded { DIFF_PIXEL } else { CLEAR_PIXEL };
            mask.put_pixel(x as u32, y as u32, px);
        }
    }
}
