use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfDiffError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Page count mismatch: document A has {pages_a} pages, document B has {pages_b} (smart alignment disabled)")]
    PageCountMismatch { pages_a: usize, pages_b: usize },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Text extraction error: {0}")]
    TextExtractError(String),

    #[error(
        "Bitmap dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PdfDiffError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PdfDiffError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a render error.
    render => RenderError,
    /// Create a text extraction error.
    text_extract => TextExtractError,
    /// Create a report error.
    report => ReportError,
}

impl PdfDiffError {
    /// Dimension mismatch between two bitmaps entering the pixel comparator.
    ///
    /// The pipeline pads both sides to common dimensions first, so hitting
    /// this from the orchestrated path is a programming error rather than a
    /// recoverable condition.
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }
}

impl From<serde_yml::Error> for PdfDiffError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for PdfDiffError {
    fn from(e: serde_json::Error) -> Self {
        Self::ReportError(e.to_string())
    }
}

impl From<image::ImageError> for PdfDiffError {
    fn from(e: image::ImageError) -> Self {
        Self::RenderError(e.to_string())
    }
}

#[cfg(feature = "render")]
impl From<pdfium_render::prelude::PdfiumError> for PdfDiffError {
    fn from(e: pdfium_render::prelude::PdfiumError) -> Self {
        Self::RenderError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PdfDiffError>;
