#[cfg(feature = "render")]
pub mod pdfium;
