use serde::Deserialize;

use crate::compare::PageRegion;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

/// One comparison job: two input documents, a report destination, and
/// optional overrides of the crate-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub a: String,
    pub b: String,
    pub report: String,
    pub scale: Option<f64>,
    pub tolerance: Option<u32>,
    pub search_radius: Option<u32>,
    pub min_region_area: Option<u32>,
    pub min_word_size: Option<f64>,
    pub dilation_radius: Option<u32>,
    pub highlight_opacity: Option<f64>,
    pub smart_alignment: Option<bool>,
    pub page_tolerance: Option<u32>,
    pub similarity_threshold: Option<f64>,
    pub fallback_to_same_index: Option<bool>,
    pub parallel: Option<bool>,
    /// Crop regions, 1-based page numbers.
    #[serde(default)]
    pub crops: Vec<PageRegion>,
    /// Ignore regions, 1-based page numbers.
    #[serde(default)]
    pub masks: Vec<PageRegion>,
}
