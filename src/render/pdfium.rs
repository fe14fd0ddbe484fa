// pdfium-render wrapper: PDF pages -> RGBA bitmaps, word boxes, page text.
//
// pdfium is not re-entrant, so the source holds no live document handle;
// each call loads the library and document fresh. The pipeline renders
// sequentially anyway, so the reload cost stays off the parallel path.

use std::path::PathBuf;

use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::compare::Rect;
use crate::source::PageSource;

/// Resolves the path to the pdfium shared library.
///
/// Search order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` environment variable
/// 2. `vendor/pdfium/lib/` relative to the project root (for development)
fn resolve_pdfium_lib_path() -> crate::error::Result<PathBuf> {
    // 1. Check environment variable
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        }
        return Err(crate::error::PdfDiffError::render(format!(
            "PDFIUM_DYNAMIC_LIB_PATH is set to '{}' but the path does not exist",
            path
        )));
    }

    // 2. Fallback: vendor/pdfium/lib/ relative to project root
    //    In development, CARGO_MANIFEST_DIR points to the project root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let vendor_path = PathBuf::from(&manifest_dir).join("vendor/pdfium/lib");
        if vendor_path.exists() {
            return Ok(vendor_path);
        }
    }

    Err(crate::error::PdfDiffError::render(
        "pdfium library not found: set PDFIUM_DYNAMIC_LIB_PATH or place libpdfium.so in vendor/pdfium/lib/",
    ))
}

/// Creates a new Pdfium instance by dynamically loading the shared library.
fn create_pdfium() -> crate::error::Result<Pdfium> {
    let lib_path = resolve_pdfium_lib_path()?;
    let lib_path_str = lib_path.to_str().ok_or_else(|| {
        crate::error::PdfDiffError::render("pdfium library path contains non-UTF-8 characters")
    })?;
    let bindings =
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_path_str))
            .map_err(|e| crate::error::PdfDiffError::render(e.to_string()))?;
    Ok(Pdfium::new(bindings))
}

enum PdfData {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// pdfium-backed [`PageSource`] for one document.
pub struct PdfiumSource {
    data: PdfData,
    page_count: usize,
}

impl PdfiumSource {
    /// Open a PDF from disk, verifying it loads and reading the page count.
    pub fn open_file(path: PathBuf) -> crate::error::Result<Self> {
        let pdfium = create_pdfium()?;
        let data = PdfData::File(path);
        let page_count = {
            let document = load_document(&pdfium, &data)?;
            document.pages().len() as usize
        };
        Ok(PdfiumSource { data, page_count })
    }

    /// Open a PDF already held in memory.
    pub fn open_bytes(bytes: Vec<u8>) -> crate::error::Result<Self> {
        let pdfium = create_pdfium()?;
        let data = PdfData::Bytes(bytes);
        let page_count = {
            let document = load_document(&pdfium, &data)?;
            document.pages().len() as usize
        };
        Ok(PdfiumSource { data, page_count })
    }
}

fn load_document<'a>(
    pdfium: &'a Pdfium,
    data: &'a PdfData,
) -> crate::error::Result<PdfDocument<'a>> {
    let document = match data {
        PdfData::File(path) => pdfium.load_pdf_from_file(path, None),
        PdfData::Bytes(bytes) => pdfium.load_pdf_from_byte_slice(bytes, None),
    };
    document.map_err(|e| crate::error::PdfDiffError::render(e.to_string()))
}

fn get_page<'a>(
    document: &PdfDocument<'a>,
    page_index: u32,
) -> crate::error::Result<PdfPage<'a>> {
    let page_index_u16 = u16::try_from(page_index)
        .map_err(|_| crate::error::PdfDiffError::render("page index exceeds u16 range"))?;
    document
        .pages()
        .get(page_index_u16)
        .map_err(|e| crate::error::PdfDiffError::render(e.to_string()))
}

impl PageSource for PdfiumSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    /// Renders a page at the given scale (pixels per PDF point) and returns
    /// an RGBA bitmap of `floor(width_pts * scale) x floor(height_pts * scale)`.
    fn rasterize(&self, page_index: u32, scale: f64) -> crate::error::Result<RgbaImage> {
        let pdfium = create_pdfium()?;
        let document = load_document(&pdfium, &self.data)?;
        let page = get_page(&document, page_index)?;

        let width_px = (page.width().value as f64 * scale).floor() as i32;
        let height_px = (page.height().value as f64 * scale).floor() as i32;

        let config = PdfRenderConfig::new()
            .set_target_width(width_px)
            .set_target_height(height_px);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| crate::error::PdfDiffError::render(e.to_string()))?;

        Ok(bitmap.as_image().to_rgba8())
    }

    /// One box per whitespace-delimited token, in rasterize's pixel space.
    ///
    /// Consecutive non-whitespace characters are grouped and their loose
    /// bounds unioned; the PDF's bottom-left origin is flipped to the
    /// bitmap's top-left before scaling.
    fn word_boxes(&self, page_index: u32, scale: f64) -> crate::error::Result<Vec<Rect>> {
        let pdfium = create_pdfium()?;
        let document = load_document(&pdfium, &self.data)?;
        let page = get_page(&document, page_index)?;
        let page_height_pts = page.height().value as f64;

        let text = page
            .text()
            .map_err(|e| crate::error::PdfDiffError::text_extract(e.to_string()))?;

        // Running union of char bounds in PDF points: (left, bottom, right, top).
        let mut current: Option<(f64, f64, f64, f64)> = None;
        let mut words = Vec::new();

        let mut flush =
            |current: &mut Option<(f64, f64, f64, f64)>, words: &mut Vec<Rect>| {
                if let Some((left, bottom, right, top)) = current.take() {
                    words.push(Rect::new(
                        left * scale,
                        (page_height_pts - top) * scale,
                        (right - left) * scale,
                        (top - bottom) * scale,
                    ));
                }
            };

        for ch in text.chars().iter() {
            let is_word_char = ch.unicode_char().is_some_and(|c| !c.is_whitespace());
            if !is_word_char {
                flush(&mut current, &mut words);
                continue;
            }

            let bounds = ch
                .loose_bounds()
                .map_err(|e| crate::error::PdfDiffError::text_extract(e.to_string()))?;
            let left = bounds.left.value as f64;
            let bottom = bounds.bottom.value as f64;
            let right = bounds.right.value as f64;
            let top = bounds.top.value as f64;

            current = Some(match current {
                None => (left, bottom, right, top),
                Some((l, b, r, t)) => (l.min(left), b.min(bottom), r.max(right), t.max(top)),
            });
        }
        flush(&mut current, &mut words);

        Ok(words)
    }

    fn page_text(&self, page_index: u32) -> crate::error::Result<String> {
        let pdfium = create_pdfium()?;
        let document = load_document(&pdfium, &self.data)?;
        let page = get_page(&document, page_index)?;
        let text = page
            .text()
            .map_err(|e| crate::error::PdfDiffError::text_extract(e.to_string()))?;
        Ok(text.all())
    }
}
