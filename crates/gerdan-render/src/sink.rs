//! The document sink trait.
//!
//! A [`DocumentSink`] is the page-description backend a
//! [`LayoutRenderer`](crate::LayoutRenderer) draws into. The renderer only
//! issues commands; turning them into PDF bytes, a display list, or
//! anything else is the sink's business.

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::text::{Font, TextOptions};
use crate::types::{Color, Point, Rect, Size};

/// Glyph advance assumed by [`DocumentSink::text_width`], in em.
pub const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

/// Line height assumed by [`DocumentSink::text_height`], in em.
pub const LINE_HEIGHT: f32 = 1.2;

/// Document metadata written once, before the first page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

impl DocumentInfo {
    /// Create document metadata.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}

/// A page-description backend.
///
/// Drawing state (font, size, fill color, line width) persists across
/// calls and pages until changed, the way PDF content streams behave.
///
/// # Document Lifecycle
///
/// ```ignore
/// sink.set_info(&info)?;
/// sink.add_page(page_size)?;
/// sink.set_line_width(0.5)?;
/// sink.draw_rect(bead)?;
/// sink.fill_and_stroke(fill, outline)?;
/// sink.end()?;
/// ```
pub trait DocumentSink {
    /// Record document metadata. Called once before the first page.
    fn set_info(&mut self, _info: &DocumentInfo) -> RenderResult<()> {
        Ok(())
    }

    /// Start a new page of the given size.
    fn add_page(&mut self, size: Size) -> RenderResult<()>;

    /// Finish the document. No commands follow.
    fn end(&mut self) -> RenderResult<()>;

    // =========================================================================
    // Drawing State
    // =========================================================================

    /// Select the font face for following text.
    fn set_font(&mut self, font: Font) -> RenderResult<()>;

    /// Select the font size for following text.
    fn set_font_size(&mut self, size: f32) -> RenderResult<()>;

    /// Select the fill color for following text.
    fn fill_color(&mut self, color: Color) -> RenderResult<()>;

    /// Select the stroke width for following outlines and lines.
    fn set_line_width(&mut self, width: f32) -> RenderResult<()>;

    // =========================================================================
    // Shapes
    // =========================================================================

    /// Add a rectangle to the current path.
    fn draw_rect(&mut self, rect: Rect) -> RenderResult<()>;

    /// Fill the current path with `fill` and outline it with `stroke`.
    fn fill_and_stroke(&mut self, fill: Color, stroke: Color) -> RenderResult<()>;

    /// Stroke a straight line.
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> RenderResult<()>;

    // =========================================================================
    // Text
    // =========================================================================

    /// Draw `text` with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: Point, options: &TextOptions) -> RenderResult<()>;

    /// Width of `text` at `font_size`.
    ///
    /// The default assumes a fixed average glyph advance; sinks backed by
    /// real font metrics should override it.
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * AVERAGE_GLYPH_WIDTH
    }

    /// Height of one line of text at `font_size`.
    fn text_height(&self, font_size: f32) -> f32 {
        font_size * LINE_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Metrics;

    impl DocumentSink for Metrics {
        fn add_page(&mut self, _size: Size) -> RenderResult<()> {
            Ok(())
        }
        fn end(&mut self) -> RenderResult<()> {
            Ok(())
        }
        fn set_font(&mut self, _font: Font) -> RenderResult<()> {
            Ok(())
        }
        fn set_font_size(&mut self, _size: f32) -> RenderResult<()> {
            Ok(())
        }
        fn fill_color(&mut self, _color: Color) -> RenderResult<()> {
            Ok(())
        }
        fn set_line_width(&mut self, _width: f32) -> RenderResult<()> {
            Ok(())
        }
        fn draw_rect(&mut self, _rect: Rect) -> RenderResult<()> {
            Ok(())
        }
        fn fill_and_stroke(&mut self, _fill: Color, _stroke: Color) -> RenderResult<()> {
            Ok(())
        }
        fn draw_line(&mut self, _from: Point, _to: Point, _color: Color) -> RenderResult<()> {
            Ok(())
        }
        fn draw_text(&mut self, _text: &str, _at: Point, _options: &TextOptions) -> RenderResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_metrics() {
        let sink = Metrics;
        assert_eq!(sink.text_width("12", 8.0), 8.0);
        assert_eq!(sink.text_width("ряд", 10.0), 15.0);
        assert_eq!(sink.text_height(10.0), 12.0);
    }
}
