// Job-level pipeline: page mapping -> sequential rendering -> parallel
// page comparison -> ordered aggregation, plus the file-facing job entry
// point that writes the JSON report.

use std::path::PathBuf;

use rayon::prelude::*;
#[cfg(feature = "render")]
use serde::Serialize;
use tracing::info;

use crate::compare::page_align::{align_pages, identity_mappings};
use crate::compare::{CompareOptions, ComparisonResult, PageComparisonResult, PageMapping};
use crate::error::PdfDiffError;
use crate::pipeline::page_processor::{PagePair, compare_page_pair};
use crate::source::PageSource;

/// Configuration for a single comparison job.
pub struct JobConfig {
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub report_path: PathBuf,
    pub scale: f64,
    /// Display-only; carried into the report for the presentation layer.
    pub highlight_opacity: f64,
    pub options: CompareOptions,
}

/// Result of processing a single job.
pub struct JobResult {
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub report_path: PathBuf,
    pub pages_compared: usize,
    pub total_diff_pixels: u64,
}

/// JSON report written per job, consumed by an external presentation layer.
#[cfg(feature = "render")]
#[derive(Serialize)]
struct DiffReport<'a> {
    input_a: &'a str,
    input_b: &'a str,
    scale: f64,
    highlight_opacity: f64,
    total_diff_pixels: u64,
    pages: &'a [PageComparisonResult],
}

/// Compare two documents through the phased pipeline.
///
/// Phase A: page text extraction + page mapping (sequential)
/// Phase B: rasterization + word box extraction (sequential)
/// Phase C: page-pair comparison (rayon parallel)
/// Phase D: aggregation, preserving mapping order
pub fn compare_documents(
    source_a: &dyn PageSource,
    source_b: &dyn PageSource,
    scale: f64,
    options: &CompareOptions,
) -> crate::error::Result<ComparisonResult> {
    options.validate()?;
    if scale <= 0.0 {
        return Err(PdfDiffError::config(format!(
            "render scale must be positive, got {scale}"
        )));
    }

    let count_a = source_a.page_count();
    let count_b = source_b.page_count();

    // --- Phase A: page mapping ---
    let mappings: Vec<PageMapping> = if count_a == count_b {
        identity_mappings(count_a)
    } else if options.smart_alignment {
        let texts_a = extract_texts(source_a)?;
        let texts_b = extract_texts(source_b)?;
        align_pages(
            &texts_a,
            &texts_b,
            options.page_tolerance,
            options.similarity_threshold,
            options.fallback_to_same_index,
        )
    } else {
        return Err(PdfDiffError::PageCountMismatch {
            pages_a: count_a,
            pages_b: count_b,
        });
    };

    info!(
        pages_a = count_a,
        pages_b = count_b,
        mapped = mappings.len(),
        "page mapping resolved"
    );

    // --- Phase B: rendering (sequential; the renderer is not re-entrant) ---
    let mut pairs: Vec<PagePair> = Vec::with_capacity(mappings.len());
    for mapping in &mappings {
        pairs.push(PagePair {
            page_a: mapping.page_a,
            page_b: mapping.page_b,
            similarity: mapping.similarity,
            bitmap_a: source_a.rasterize(mapping.page_a, scale)?,
            words_a: source_a.word_boxes(mapping.page_a, scale)?,
            bitmap_b: source_b.rasterize(mapping.page_b, scale)?,
            words_b: source_b.word_boxes(mapping.page_b, scale)?,
        });
    }

    // --- Phase C: comparison ---
    // Pairs are consumed so each page's buffers drop with its result; the
    // indexed collect keeps mapping order regardless of completion order.
    let compared: Vec<crate::error::Result<PageComparisonResult>> = if options.parallel {
        pairs
            .into_par_iter()
            .map(|pair| compare_page_pair(pair, options))
            .collect()
    } else {
        pairs
            .into_iter()
            .map(|pair| compare_page_pair(pair, options))
            .collect()
    };

    // --- Phase D: aggregation ---
    let mut pages = Vec::with_capacity(compared.len());
    let mut total_diff_pixels: u64 = 0;
    for result in compared {
        let page = result?;
        total_diff_pixels += page.diff_pixels;
        pages.push(page);
    }

    Ok(ComparisonResult {
        pages,
        total_diff_pixels,
    })
}

fn extract_texts(source: &dyn PageSource) -> crate::error::Result<Vec<String>> {
    (0..source.page_count())
        .map(|i| source.page_text(i as u32))
        .collect()
}

/// Run a single comparison job: open both PDFs, compare, write the report.
#[cfg(feature = "render")]
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    use crate::source::DocumentInput;

    let source_a = DocumentInput::PdfFile(config.input_a.clone()).into_source()?;
    let source_b = DocumentInput::PdfFile(config.input_b.clone()).into_source()?;

    let result = compare_documents(source_a.as_ref(), source_b.as_ref(), config.scale, &config.options)?;

    let input_a = config.input_a.to_string_lossy();
    let input_b = config.input_b.to_string_lossy();
    let report = DiffReport {
        input_a: &input_a,
        input_b: &input_b,
        scale: config.scale,
        highlight_opacity: config.highlight_opacity,
        total_diff_pixels: result.total_diff_pixels,
        pages: &result.pages,
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&config.report_path, json)?;

    Ok(JobResult {
        input_a: config.input_a.clone(),
        input_b: config.input_b.clone(),
        report_path: config.report_path.clone(),
        pages_compared: result.pages.len(),
        total_diff_pixels: result.total_diff_pixels,
    })
}
