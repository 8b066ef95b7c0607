//! Region extraction from parsed page documents.
//!
//! Extraction turns the parsed block hierarchy into flat sequences of
//! [`TextRegion`] values in zone space. Sequences are lazy and restartable
//! (call the extractor again to re-iterate) and preserve input-document
//! order exactly; no sorting is applied.

use crate::document::{OcrBlock, OcrLine, OcrPage, ZonePage};
use crate::geometry::Rect;
use crate::scale::ScaleFactor;
use log::warn;

/// A rectangular page region in zone space, with its recognized text.
///
/// Zone regions carry an empty text payload. OCR block regions carry the
/// space-joined content of all their descendant strings, plus per-line
/// child regions for fine-grained attribution.
#[derive(Debug, Clone)]
pub struct TextRegion {
    /// Bounding rectangle, in zone space
    pub rect: Rect,
    /// Concatenated text content; each token keeps a trailing space
    pub text: String,
    /// Child line regions (populated for OCR block regions only)
    pub lines: Vec<TextRegion>,
}

impl TextRegion {
    /// Create a text-less region, as produced for zones.
    pub fn bare(rect: Rect) -> Self {
        Self {
            rect,
            text: String::new(),
            lines: Vec::new(),
        }
    }
}

/// True when a rectangle has usable (non-negative) dimensions.
///
/// Invalid regions are dropped with a warning; their siblings continue to
/// process.
fn usable(rect: &Rect, kind: &str) -> bool {
    if rect.width < 0 || rect.height < 0 {
        warn!(
            "skipping {} region at ({},{}) with invalid dimensions {}x{}",
            kind, rect.hpos, rect.vpos, rect.width, rect.height
        );
        return false;
    }
    true
}

/// Space-joined content of a line; every token keeps its trailing space.
///
/// The trailing space is preserved for fidelity with the upstream output
/// format.
fn line_text(line: &OcrLine) -> String {
    let mut text = String::new();
    for token in &line.strings {
        text.push_str(token);
        text.push(' ');
    }
    text
}

/// Extract zone regions in document order.
///
/// Zone coordinates are authoritative and pass through unscaled.
pub fn zone_regions(page: &ZonePage) -> impl Iterator<Item = TextRegion> + '_ {
    page.blocks
        .iter()
        .filter(|rect| usable(rect, "zone"))
        .map(|rect| TextRegion::bare(*rect))
}

/// Project one OCR block into zone space.
fn ocr_region(block: &OcrBlock, factor: ScaleFactor) -> TextRegion {
    let mut text = String::new();
    let mut lines = Vec::new();

    for line in &block.lines {
        let content = line_text(line);
        text.push_str(&content);

        if !usable(&line.rect, "OCR line") {
            continue;
        }
        lines.push(TextRegion {
            rect: line.rect.scale(factor),
            text: content,
            lines: Vec::new(),
        });
    }

    TextRegion {
        rect: block.rect.scale(factor),
        text,
        lines,
    }
}

/// Extract OCR block regions in document order, normalized into zone space.
///
/// Each block region carries the concatenation of all its descendant string
/// contents and retains per-line child regions with their own concatenated
/// content.
pub fn ocr_regions(
    page: &OcrPage,
    factor: ScaleFactor,
) -> impl Iterator<Item = TextRegion> + '_ {
    page.blocks
        .iter()
        .filter(|block| usable(&block.rect, "OCR block"))
        .map(move |block| ocr_region(block, factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::compute_scale_factor;

    fn ocr_page(blocks: Vec<OcrBlock>) -> OcrPage {
        OcrPage {
            width: 1000,
            height: 1500,
            native_width: 1000,
            native_height: 1500,
            blocks,
        }
    }

    fn line(rect: Rect, tokens: &[&str]) -> OcrLine {
        OcrLine {
            rect,
            strings: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_zone_regions_preserve_order_and_have_no_text() {
        let page = ZonePage {
            width: 1000,
            height: 1500,
            blocks: vec![Rect::new(0, 500, 10, 10), Rect::new(0, 0, 10, 10)],
        };
        let regions: Vec<_> = zone_regions(&page).collect();
        assert_eq!(regions.len(), 2);
        // Input order, even though the second block is above the first.
        assert_eq!(regions[0].rect, Rect::new(0, 500, 10, 10));
        assert_eq!(regions[1].rect, Rect::new(0, 0, 10, 10));
        assert!(regions.iter().all(|r| r.text.is_empty()));
    }

    #[test]
    fn test_zone_regions_skip_invalid_dimensions() {
        let page = ZonePage {
            width: 1000,
            height: 1500,
            blocks: vec![
                Rect::new(0, 0, 10, 10),
                Rect::new(0, 20, -5, 10),
                Rect::new(0, 40, 10, 10),
            ],
        };
        let regions: Vec<_> = zone_regions(&page).collect();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].rect, Rect::new(0, 40, 10, 10));
    }

    #[test]
    fn test_ocr_regions_concatenate_with_trailing_space() {
        let page = ocr_page(vec![OcrBlock {
            rect: Rect::new(0, 0, 100, 100),
            lines: vec![
                line(Rect::new(0, 0, 100, 40), &["Hello", "world"]),
                line(Rect::new(0, 50, 100, 40), &["again"]),
            ],
        }]);
        let factor = compute_scale_factor(1000, 1000).unwrap();
        let regions: Vec<_> = ocr_regions(&page, factor).collect();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].text, "Hello world again ");
        assert_eq!(regions[0].lines.len(), 2);
        assert_eq!(regions[0].lines[0].text, "Hello world ");
        assert_eq!(regions[0].lines[1].text, "again ");
    }

    #[test]
    fn test_ocr_regions_are_scaled_into_zone_space() {
        let page = ocr_page(vec![OcrBlock {
            rect: Rect::new(100, 200, 300, 400),
            lines: vec![line(Rect::new(100, 200, 300, 150), &["x"])],
        }]);
        // zone page twice as wide as the OCR page
        let factor = compute_scale_factor(2000, 1000).unwrap();
        let regions: Vec<_> = ocr_regions(&page, factor).collect();

        assert_eq!(regions[0].rect, Rect::new(200, 400, 600, 800));
        assert_eq!(regions[0].lines[0].rect, Rect::new(200, 400, 600, 300));
    }

    #[test]
    fn test_extraction_is_restartable() {
        let page = ZonePage {
            width: 100,
            height: 100,
            blocks: vec![Rect::new(0, 0, 10, 10)],
        };
        assert_eq!(zone_regions(&page).count(), 1);
        assert_eq!(zone_regions(&page).count(), 1);
    }

    #[test]
    fn test_invalid_line_skipped_but_text_kept() {
        // A malformed line still contributes its text to the block payload;
        // only its child region is dropped.
        let page = ocr_page(vec![OcrBlock {
            rect: Rect::new(0, 0, 100, 100),
            lines: vec![line(Rect::new(0, 0, -1, 40), &["kept"])],
        }]);
        let factor = compute_scale_factor(1000, 1000).unwrap();
        let regions: Vec<_> = ocr_regions(&page, factor).collect();

        assert_eq!(regions[0].text, "kept ");
        assert!(regions[0].lines.is_empty());
    }
}
