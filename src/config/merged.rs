use super::job::Job;
use super::settings::Settings;
use crate::compare::{CompareOptions, PageRegion};

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub scale: f64,
    pub tolerance: u32,
    pub search_radius: u32,
    pub min_region_area: u32,
    pub min_word_size: f64,
    pub dilation_radius: u32,
    pub highlight_opacity: f64,
    pub smart_alignment: bool,
    pub page_tolerance: u32,
    pub similarity_threshold: f64,
    pub fallback_to_same_index: bool,
    pub parallel: bool,
    pub crop_regions: Vec<PageRegion>,
    pub mask_regions: Vec<PageRegion>,
}

impl MergedConfig {
    /// Job `Option` values win over the settings values.
    pub fn new(settings: &Settings, job: &Job) -> Self {
        MergedConfig {
            scale: job.scale.unwrap_or(settings.scale),
            tolerance: job.tolerance.unwrap_or(settings.tolerance),
            search_radius: job.search_radius.unwrap_or(settings.search_radius),
            min_region_area: job.min_region_area.unwrap_or(settings.min_region_area),
            min_word_size: job.min_word_size.unwrap_or(settings.min_word_size),
            dilation_radius: job.dilation_radius.unwrap_or(settings.dilation_radius),
            highlight_opacity: job.highlight_opacity.unwrap_or(settings.highlight_opacity),
            smart_alignment: job.smart_alignment.unwrap_or(settings.smart_alignment),
            page_tolerance: job.page_tolerance.unwrap_or(settings.page_tolerance),
            similarity_threshold: job
                .similarity_threshold
                .unwrap_or(settings.similarity_threshold),
            fallback_to_same_index: job
                .fallback_to_same_index
                .unwrap_or(settings.fallback_to_same_index),
            parallel: job.parallel.unwrap_or(settings.parallel),
            crop_regions: job.crops.clone(),
            mask_regions: job.masks.clone(),
        }
    }

    /// The immutable per-comparison options handed to the engine.
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            tolerance: self.tolerance,
            search_radius: self.search_radius,
            min_region_area: self.min_region_area,
            min_word_size: self.min_word_size,
            dilation_radius: self.dilation_radius,
            smart_alignment: self.smart_alignment,
            page_tolerance: self.page_tolerance,
            similarity_threshold: self.similarity_threshold,
            fallback_to_same_index: self.fallback_to_same_index,
            parallel: self.parallel,
            crop_regions: self.crop_regions.clone(),
            mask_regions: self.mask_regions.clone(),
        }
    }
}
