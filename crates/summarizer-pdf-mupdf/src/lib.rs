use std::path::Path;

use mupdf::{Document, TextPageFlags};

use summarizer_core::layout::{DEFAULT_TOLERANCE, PositionedChar, WordExtractor};
use summarizer_core::{BackendError, Page, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// Kept in its own crate so `summarizer-core` builds without linking MuPDF.
///
/// Every glyph on a page is reported with its bounding box and handed to a
/// [`WordExtractor`], which clusters glyphs into words using the configured
/// horizontal and vertical tolerances.
pub struct MupdfBackend {
    extractor: WordExtractor,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            extractor: WordExtractor::new(DEFAULT_TOLERANCE, DEFAULT_TOLERANCE),
        }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the word clustering tolerances (PDF units).
    pub fn with_tolerances(mut self, x_tolerance: f32, y_tolerance: f32) -> Self {
        self.extractor = WordExtractor::new(x_tolerance, y_tolerance);
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut glyphs = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    for c in line.chars() {
                        let q = c.quad();
                        glyphs.push(glyph_box(
                            c.char().unwrap_or('\u{FFFD}'),
                            [q.ul.x, q.ur.x, q.ll.x, q.lr.x],
                            [q.ul.y, q.ur.y, q.ll.y, q.lr.y],
                        ));
                    }
                }
            }

            let words = self.extractor.extract_words(&glyphs);
            tracing::trace!(page = pages.len(), glyphs = glyphs.len(), words = words.len(), "page parsed");
            pages.push(words);
        }

        Ok(pages)
    }
}

/// Axis-aligned box around a glyph quad (corners in ul, ur, ll, lr order).
fn glyph_box(ch: char, xs: [f32; 4], ys: [f32; 4]) -> PositionedChar {
    let min = |v: [f32; 4]| v.into_iter().fold(f32::INFINITY, f32::min);
    let max = |v: [f32; 4]| v.into_iter().fold(f32::NEG_INFINITY, f32::max);
    PositionedChar {
        ch,
        x0: min(xs),
        x1: max(xs),
        top: min(ys),
        bottom: max(ys),
    }
}
