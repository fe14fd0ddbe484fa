use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
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
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            scale: 1.0,
            tolerance: 120,
            search_radius: 3,
            min_region_area: 60,
            min_word_size: 8.0,
            dilation_radius: 0,
            highlight_opacity: 0.4,
            smart_alignment: true,
            page_tolerance: 2,
            similarity_threshold: 0.3,
            fallback_to_same_index: true,
            parallel: true,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::PdfDiffError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
