pub mod align;
pub mod mask;
pub mod page_align;
pub mod pixel;
pub mod region;
pub mod words;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel units.
///
/// Coordinates may be fractional before rounding (word boxes come from the
/// text layer scaled by a float factor); diff boxes carry integer values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Open-interval overlap test: touching edges do not count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Geometry rounded to the nearest integer, used as a dedup key.
    pub fn rounded_key(&self) -> (i64, i64, i64, i64) {
        (
            self.x.round() as i64,
            self.y.round() as i64,
            self.width.round() as i64,
            self.height.round() as i64,
        )
    }
}

/// A crop or ignore rectangle tied to a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRegion {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PageRegion {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Best integer translation of side B found by the alignment search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
    /// Disagreement count at this offset.
    pub diff_pixels: u64,
}

/// Pairing of an A-page index to a B-page index (both 0-based) with the
/// content-similarity score that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMapping {
    pub page_a: u32,
    pub page_b: u32,
    pub similarity: f64,
}

/// Immutable per-comparison options, constructed once per compare call and
/// passed by reference into every component. Never ambient state.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Channel-sum color tolerance; a pixel differs iff its delta exceeds it.
    pub tolerance: u32,
    /// Alignment search radius in pixels.
    pub search_radius: u32,
    /// Minimum bounding-box area for a highlight region.
    pub min_region_area: u32,
    /// Minimum word-box side length for word snapping.
    pub min_word_size: f64,
    /// Chebyshev dilation radius for the diff mask; 0 disables dilation.
    pub dilation_radius: u32,
    /// Match pages by content similarity when page counts differ.
    pub smart_alignment: bool,
    /// Page-index window for the smart alignment candidate search.
    pub page_tolerance: u32,
    /// Minimum similarity for a candidate page pairing.
    pub similarity_threshold: f64,
    /// Claim the same-index page even below threshold when nothing qualifies.
    pub fallback_to_same_index: bool,
    /// Compare page pairs on the rayon pool instead of sequentially.
    pub parallel: bool,
    /// Per-page crop regions (1-based page numbers, each side's own numbering).
    pub crop_regions: Vec<PageRegion>,
    /// Per-page ignore regions (1-based A-side page numbers, workspace coordinates).
    pub mask_regions: Vec<PageRegion>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            tolerance: 120,
            search_radius: 3,
            min_region_area: 60,
            min_word_size: 8.0,
            dilation_radius: 0,
            smart_alignment: true,
            page_tolerance: 2,
            similarity_threshold: 0.3,
            fallback_to_same_index: true,
            parallel: true,
            crop_regions: Vec::new(),
            mask_regions: Vec::new(),
        }
    }
}

impl CompareOptions {
    /// Reject invalid option combinations before any page is processed.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(crate::error::PdfDiffError::config(format!(
                "similarity_threshold must be in [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        for (kind, regions) in [
            ("crop", &self.crop_regions),
            ("mask", &self.mask_regions),
        ] {
            for region in regions.iter() {
                if region.width <= 0.0 || region.height <= 0.0 {
                    return Err(crate::error::PdfDiffError::config(format!(
                        "{kind} region on page {} has zero area ({}x{})",
                        region.page, region.width, region.height
                    )));
                }
                if region.page == 0 {
                    return Err(crate::error::PdfDiffError::config(format!(
                        "{kind} region page numbers are 1-based, got 0"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Crop region for a 0-based page index, if one is configured.
    pub fn crop_for(&self, page_index: u32) -> Option<&PageRegion> {
        self.crop_regions
            .iter()
            .find(|r| r.page == page_index + 1)
    }

    /// Ignore regions for a 0-based A-side page index.
    pub fn masks_for(&self, page_index: u32) -> Vec<Rect> {
        self.mask_regions
            .iter()
            .filter(|r| r.page == page_index + 1)
            .map(|r| r.rect())
            .collect()
    }
}

/// Result of comparing one mapped page pair. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct PageComparisonResult {
    pub page_a: u32,
    pub page_b: u32,
    pub similarity: f64,
    /// Disagreement count at the best offset, before ignore-region clearing.
    pub diff_pixels: u64,
    /// Best (dx, dy) translation of side B found by the alignment search.
    pub offset: (i32, i32),
    /// Highlight regions in side A's native coordinates.
    pub regions_a: Vec<Rect>,
    /// Highlight regions in side B's native coordinates.
    pub regions_b: Vec<Rect>,
}

/// Document-level comparison result, ordered by `page_a` ascending.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub pages: Vec<PageComparisonResult>,
    pub total_diff_pixels: u64,
}
