//! Draw commands as plain data.
//!
//! [`DrawCommand`] mirrors every [`DocumentSink`] call. Sinks that only
//! need to store or forward commands implement [`CommandSink`] and get a
//! [`DocumentSink`] implementation for free.

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::sink::{DocumentInfo, DocumentSink};
use crate::text::{Font, TextOptions};
use crate::types::{Color, Point, Rect, Size};

/// A single document sink call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Info(DocumentInfo),
    AddPage { size: Size },
    SetFont { font: Font },
    SetFontSize { size: f32 },
    FillColor { color: Color },
    SetLineWidth { width: f32 },
    Rect { rect: Rect },
    FillAndStroke { fill: Color, stroke: Color },
    Line { from: Point, to: Point, color: Color },
    Text {
        text: String,
        at: Point,
        #[serde(default)]
        options: TextOptions,
    },
    End,
}

impl DrawCommand {
    /// The text of a [`DrawCommand::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Whether this command starts a page.
    #[inline]
    pub fn is_page(&self) -> bool {
        matches!(self, Self::AddPage { .. })
    }
}

/// A sink that consumes [`DrawCommand`] values.
pub trait CommandSink {
    /// Take one command.
    fn push(&mut self, command: DrawCommand) -> RenderResult<()>;

    /// Width of `text` at `font_size`, see [`DocumentSink::text_width`].
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * crate::sink::AVERAGE_GLYPH_WIDTH
    }
}

impl<T: CommandSink + ?Sized> CommandSink for &mut T {
    fn push(&mut self, command: DrawCommand) -> RenderResult<()> {
        (**self).push(command)
    }

    fn measure(&self, text: &str, font_size: f32) -> f32 {
        (**self).measure(text, font_size)
    }
}

impl<T: CommandSink> DocumentSink for T {
    fn set_info(&mut self, info: &DocumentInfo) -> RenderResult<()> {
        self.push(DrawCommand::Info(info.clone()))
    }

    fn add_page(&mut self, size: Size) -> RenderResult<()> {
        self.push(DrawCommand::AddPage { size })
    }

    fn end(&mut self) -> RenderResult<()> {
        self.push(DrawCommand::End)
    }

    fn set_font(&mut self, font: Font) -> RenderResult<()> {
        self.push(DrawCommand::SetFont { font })
    }

    fn set_font_size(&mut self, size: f32) -> RenderResult<()> {
        self.push(DrawCommand::SetFontSize { size })
    }

    fn fill_color(&mut self, color: Color) -> RenderResult<()> {
        self.push(DrawCommand::FillColor { color })
    }

    fn set_line_width(&mut self, width: f32) -> RenderResult<()> {
        self.push(DrawCommand::SetLineWidth { width })
    }

    fn draw_rect(&mut self, rect: Rect) -> RenderResult<()> {
        self.push(DrawCommand::Rect { rect })
    }

    fn fill_and_stroke(&mut self, fill: Color, stroke: Color) -> RenderResult<()> {
        self.push(DrawCommand::FillAndStroke { fill, stroke })
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> RenderResult<()> {
        self.push(DrawCommand::Line { from, to, color })
    }

    fn draw_text(&mut self, text: &str, at: Point, options: &TextOptions) -> RenderResult<()> {
        self.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            options: options.clone(),
        })
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.measure(text, font_size)
    }
}
