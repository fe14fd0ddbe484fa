// Per-page pipeline: crop/pad both sides to a common workspace, find the
// best alignment, build and post-process the diff mask, extract regions,
// and snap them to each side's word geometry.

use image::RgbaImage;
use image::imageops;
use tracing::debug;

use crate::compare::align::{best_offset, composite_onto_white};
use crate::compare::mask::{build_diff_mask, clear_regions, dilate};
use crate::compare::region::extract_regions;
use crate::compare::words::map_to_word_boxes;
use crate::compare::{CompareOptions, PageComparisonResult, PageRegion, Rect};

/// One mapped page pair with both sides' rendered input, ready to compare.
pub struct PagePair {
    pub page_a: u32,
    pub page_b: u32,
    pub similarity: f64,
    pub bitmap_a: RgbaImage,
    pub words_a: Vec<Rect>,
    pub bitmap_b: RgbaImage,
    pub words_b: Vec<Rect>,
}

/// A cropped side: bitmap and word boxes translated into crop space, plus
/// the crop origin needed to translate results back to native coordinates.
struct CroppedSide {
    bitmap: RgbaImage,
    words: Vec<Rect>,
    origin: (f64, f64),
}

/// Compare one page pair. Consumes the pair so its buffers are released as
/// soon as the result exists.
pub fn compare_page_pair(
    pair: PagePair,
    options: &CompareOptions,
) -> crate::error::Result<PageComparisonResult> {
    let side_a = apply_crop(pair.bitmap_a, pair.words_a, options.crop_for(pair.page_a))?;
    let side_b = apply_crop(pair.bitmap_b, pair.words_b, options.crop_for(pair.page_b))?;

    // Pad the smaller side with opaque white so both share one workspace.
    let width = side_a.bitmap.width().max(side_b.bitmap.width());
    let height = side_a.bitmap.height().max(side_b.bitmap.height());
    let a = pad_to(side_a.bitmap, width, height);
    let b = pad_to(side_b.bitmap, width, height);

    let offset = best_offset(&a, &b, options.search_radius, options.tolerance)?;
    let shifted_b = composite_onto_white(&b, width, height, offset.dx, offset.dy);
    drop(b);

    let (mut mask, diff_pixels) = build_diff_mask(&a, &shifted_b, options.tolerance)?;
    drop(shifted_b);
    drop(a);

    clear_regions(&mut mask, &options.masks_for(pair.page_a));
    dilate(&mut mask, options.dilation_radius);

    let raw_boxes = extract_regions(&mask, options.min_region_area);
    drop(mask);

    debug!(
        page_a = pair.page_a,
        page_b = pair.page_b,
        dx = offset.dx,
        dy = offset.dy,
        diff_pixels,
        raw_regions = raw_boxes.len(),
        "page pair compared"
    );

    // Side A: the workspace is A's own (cropped) space.
    let regions_a = translate_all(
        map_to_word_boxes(&raw_boxes, &side_a.words, options.min_word_size),
        side_a.origin,
    );

    // Side B: negate the alignment offset to land in B's (cropped) space
    // before intersecting with B's word boxes.
    let raw_boxes_b: Vec<Rect> = raw_boxes
        .iter()
        .map(|r| r.translate(-offset.dx as f64, -offset.dy as f64))
        .collect();
    let regions_b = translate_all(
        map_to_word_boxes(&raw_boxes_b, &side_b.words, options.min_word_size),
        side_b.origin,
    );

    Ok(PageComparisonResult {
        page_a: pair.page_a,
        page_b: pair.page_b,
        similarity: pair.similarity,
        diff_pixels,
        offset: (offset.dx, offset.dy),
        regions_a,
        regions_b,
    })
}

/// Crop a side to its configured region, translating word boxes into the
/// cropped space and recording the origin for the reverse translation.
fn apply_crop(
    bitmap: RgbaImage,
    words: Vec<Rect>,
    crop: Option<&PageRegion>,
) -> crate::error::Result<CroppedSide> {
    let Some(region) = crop else {
        return Ok(CroppedSide {
            bitmap,
            words,
            origin: (0.0, 0.0),
        });
    };

    let (width, height) = bitmap.dimensions();
    let x0 = region.x.max(0.0).floor() as u32;
    let y0 = region.y.max(0.0).floor() as u32;
    let x1 = (((region.x + region.width).ceil()).max(0.0) as u32).min(width);
    let y1 = (((region.y + region.height).ceil()).max(0.0) as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return Err(crate::error::PdfDiffError::config(format!(
            "crop region on page {} lies outside the {}x{} page bitmap",
            region.page, width, height
        )));
    }

    let crop_rect = Rect::new(
        x0 as f64,
        y0 as f64,
        (x1 - x0) as f64,
        (y1 - y0) as f64,
    );
    let cropped = imageops::crop_imm(&bitmap, x0, y0, x1 - x0, y1 - y0).to_image();
    let words = words
        .into_iter()
        .filter(|w| w.intersects(&crop_rect))
        .map(|w| w.translate(-(x0 as f64), -(y0 as f64)))
        .collect();

    Ok(CroppedSide {
        bitmap: cropped,
        words,
        origin: (x0 as f64, y0 as f64),
    })
}

fn pad_to(bitmap: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if bitmap.dimensions() == (width, height) {
        bitmap
    } else {
        composite_onto_white(&bitmap, width, height, 0, 0)
    }
}

fn translate_all(boxes: Vec<Rect>, origin: (f64, f64)) -> Vec<Rect> {
    if origin == (0.0, 0.0) {
        boxes
    } else {
        boxes
            .into_iter()
            .map(|b| b.translate(origin.0, origin.1))
            .collect()
    }
}
