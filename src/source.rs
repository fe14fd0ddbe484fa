// Page source boundary: the comparison engine consumes already-rasterized
// bitmaps and already-extracted word geometry through this trait, so the
// renderer stays swappable and the core stays pure.

use image::RgbaImage;

use crate::compare::Rect;

/// One document side as the engine sees it: a page count plus per-page
/// bitmap, word boxes, and raw text.
///
/// `rasterize` must be deterministic for a fixed `(page, scale)` and
/// produce `floor(page_width * scale) x floor(page_height * scale)` pixels.
/// `word_boxes` yields one box per whitespace-delimited token in the same
/// pixel space as `rasterize`; the engine treats the collection as
/// unordered. `page_text` is consumed only by the page aligner.
pub trait PageSource {
    fn page_count(&self) -> usize;

    fn rasterize(&self, page_index: u32, scale: f64) -> crate::error::Result<RgbaImage>;

    fn word_boxes(&self, page_index: u32, scale: f64) -> crate::error::Result<Vec<Rect>>;

    fn page_text(&self, page_index: u32) -> crate::error::Result<String>;
}

/// A fully prepared page for callers that bring their own renderer.
#[derive(Debug, Clone)]
pub struct PreparedPage {
    pub bitmap: RgbaImage,
    pub words: Vec<Rect>,
    pub text: String,
}

/// In-memory [`PageSource`] over prepared pages. The render scale is
/// ignored: the bitmaps are taken as already scaled.
#[derive(Debug, Clone, Default)]
pub struct PreparedDocument {
    pages: Vec<PreparedPage>,
}

impl PreparedDocument {
    pub fn new(pages: Vec<PreparedPage>) -> Self {
        PreparedDocument { pages }
    }

    fn page(&self, page_index: u32) -> crate::error::Result<&PreparedPage> {
        self.pages.get(page_index as usize).ok_or_else(|| {
            crate::error::PdfDiffError::render(format!(
                "page index {page_index} out of range (document has {} pages)",
                self.pages.len()
            ))
        })
    }
}

impl PageSource for PreparedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rasterize(&self, page_index: u32, _scale: f64) -> crate::error::Result<RgbaImage> {
        Ok(self.page(page_index)?.bitmap.clone())
    }

    fn word_boxes(&self, page_index: u32, _scale: f64) -> crate::error::Result<Vec<Rect>> {
        Ok(self.page(page_index)?.words.clone())
    }

    fn page_text(&self, page_index: u32) -> crate::error::Result<String> {
        Ok(self.page(page_index)?.text.clone())
    }
}

/// Accepted document representations, resolved into a [`PageSource`] once
/// at the boundary before the engine sees the input.
pub enum DocumentInput {
    /// PDF on disk, rasterized through pdfium.
    #[cfg(feature = "render")]
    PdfFile(std::path::PathBuf),
    /// PDF already in memory, rasterized through pdfium.
    #[cfg(feature = "render")]
    PdfBytes(Vec<u8>),
    /// Pages rendered and extracted by the caller.
    Prerendered(Vec<PreparedPage>),
}

impl DocumentInput {
    pub fn into_source(self) -> crate::error::Result<Box<dyn PageSource>> {
        match self {
            #[cfg(feature = "render")]
            DocumentInput::PdfFile(path) => Ok(Box::new(
                crate::render::pdfium::PdfiumSource::open_file(path)?,
            )),
            #[cfg(feature = "render")]
            DocumentInput::PdfBytes(bytes) => Ok(Box::new(
                crate::render::pdfium::PdfiumSource::open_bytes(bytes)?,
            )),
            DocumentInput::Prerendered(pages) => Ok(Box::new(PreparedDocument::new(pages))),
        }
    }
}
