//! The document state machine.
//!
//! A [`LayoutRenderer`] turns the results of the layout passes into draw
//! commands on a [`DocumentSink`]. Sections must be written in a fixed
//! order:
//!
//! ```text
//! Init -> InfoPage -> StatisticsPage -> InstructionPages -> SchemaPages -> Closed
//! ```
//!
//! Calling a section out of order fails with
//! [`LayoutError::InvalidTransition`]; any call after [`close`] fails with
//! [`LayoutError::DocumentClosed`].
//!
//! [`close`]: LayoutRenderer::close
//!
//! # Example
//!
//! ```
//! use gerdan_core::{Color, Colormap, LatticeType, Schema, SchemaItem};
//! use gerdan_render::{DocumentInfo, ExportInput, LayoutRenderer, RecordingSink, RenderConfig};
//!
//! let input = ExportInput {
//!     schema: Schema::new(vec![vec![SchemaItem::bead(0, 0, "#ff0000", 1)]]),
//!     colormap: Colormap::default(),
//!     lattice: LatticeType::Grid,
//!     background: Color::WHITE,
//!     title: "Poppy".into(),
//!     author: "olena".into(),
//! };
//!
//! let mut renderer = LayoutRenderer::new(RecordingSink::new(), RenderConfig::default(), input.info());
//! renderer.render(&input).unwrap();
//!
//! // Info, statistics, one instruction page and one schema page.
//! assert_eq!(renderer.sink().page_count(), 4);
//! ```

use std::fmt;

use gerdan_core::logging::{span_names, targets, PerfSpan};
use gerdan_core::{CellSize, Color, LatticeGeometry, LatticeType, LayoutError, DEFAULT_SCALE};
use gerdan_layout::{analyze, Direction, InstructionRow, PageTile, Pagination, Statistics};

use crate::config::{RenderConfig, RenderOptions};
use crate::error::RenderResult;
use crate::input::ExportInput;
use crate::sink::{DocumentInfo, DocumentSink};
use crate::text::{Font, TextOptions};
use crate::types::{Point, Rect};

/// Outline width of every bead.
pub const BEAD_LINE_WIDTH: f32 = 0.5;

const RULER_LINE_WIDTH: f32 = 0.5;
const COLUMN_RULER_STEP: usize = 5;
const ROW_RULER_STEP: usize = 10;

const INFO_TITLE_TOP: f32 = 100.0;

const SUMMARY_TOP: f32 = 300.0;
const LEGEND_TOP: f32 = 330.0;
const LEGEND_COLUMN_SPACING: f32 = 200.0;

const INSTRUCTION_INDENT: f32 = 110.0;
const INSTRUCTION_LINE_SPACING: f32 = 14.0;
const INSTRUCTION_GAP: f32 = 2.0;

/// The section a document is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentState {
    #[default]
    Init,
    InfoPage,
    StatisticsPage,
    InstructionPages,
    SchemaPages,
    Closed,
}

impl DocumentState {
    /// Stable name used in errors and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::InfoPage => "info page",
            Self::StatisticsPage => "statistics page",
            Self::InstructionPages => "instruction pages",
            Self::SchemaPages => "schema pages",
            Self::Closed => "closed",
        }
    }

    /// The only state reachable from this one.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::InfoPage),
            Self::InfoPage => Some(Self::StatisticsPage),
            Self::StatisticsPage => Some(Self::InstructionPages),
            Self::InstructionPages => Some(Self::SchemaPages),
            Self::SchemaPages => Some(Self::Closed),
            Self::Closed => None,
        }
    }

    /// Check if the document has been finished.
    #[inline]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drawing state last sent to the sink, to skip redundant commands.
#[derive(Debug, Clone, Copy, Default)]
struct Pen {
    font: Option<Font>,
    size: Option<f32>,
    color: Option<Color>,
    line_width: Option<f32>,
}

/// Writes a bead pattern document section by section.
#[derive(Debug)]
pub struct LayoutRenderer<S: DocumentSink> {
    sink: S,
    config: RenderConfig,
    options: RenderOptions,
    info: DocumentInfo,
    state: DocumentState,
    pages: usize,
    pen: Pen,
}

impl<S: DocumentSink> LayoutRenderer<S> {
    /// Create a renderer over `sink` with default options.
    pub fn new(sink: S, config: RenderConfig, info: DocumentInfo) -> Self {
        Self {
            sink,
            config,
            options: RenderOptions::default(),
            info,
            state: DocumentState::Init,
            pages: 0,
            pen: Pen::default(),
        }
    }

    /// Set drawing options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current section.
    #[inline]
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Pages written so far.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Unwrap the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write the whole document for `input` and close it.
    ///
    /// The schema is checked and analyzed before the first command reaches
    /// the sink, so layout failures never leave a partial document behind.
    pub fn render(&mut self, input: &ExportInput) -> RenderResult<()> {
        let _span = PerfSpan::new(span_names::RENDER);
        self.check_next(DocumentState::InfoPage)?;

        input.schema.validate_shape()?;
        let geometry = input.geometry(self.config.scale);
        let analysis = analyze(&input.schema, &geometry, self.config.page.print_area())?;

        self.info_page()?;
        self.statistics_page(&analysis.statistics)?;
        self.instruction_pages(&analysis.instructions)?;
        self.schema_pages(&analysis.pagination, &geometry, input.background)?;
        self.close()
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Title, author and site information.
    pub fn info_page(&mut self) -> RenderResult<()> {
        self.advance(DocumentState::InfoPage)?;

        let info = self.info.clone();
        let site = self.config.site.clone();
        let fonts = self.config.fonts;
        self.sink.set_info(&info)?;
        self.new_page()?;

        self.set_color(Color::BLACK)?;
        self.set_font(Font::Medium)?;
        self.set_font_size(fonts.title)?;
        let mut y = INFO_TITLE_TOP;
        self.centered(&info.title, fonts.title, y, &TextOptions::new())?;
        y += self.sink.text_height(fonts.title);

        self.set_font(Font::Regular)?;
        self.set_font_size(fonts.subtitle)?;
        let line = self.sink.text_height(fonts.subtitle);
        y += line;
        let author = self.config.labels.author_line(&info.author);
        self.centered(&author, fonts.subtitle, y, &TextOptions::new())?;
        y += line * 3.0;

        let made_with = self.config.labels.made_with_line(&site.mark);
        self.centered(&made_with, fonts.subtitle, y, &TextOptions::new())?;
        y += line;
        if !site.url.is_empty() {
            self.centered(&site.url, fonts.subtitle, y, &TextOptions::link(&site.url))?;
            y += line;
        }

        if let Some(url) = site.support_url() {
            y += line;
            let support = self.config.labels.support.clone();
            self.centered(&support, fonts.subtitle, y, &TextOptions::new())?;
            y += line;
            self.centered(url, fonts.subtitle, y, &TextOptions::link(url))?;
        }

        self.site_mark()
    }

    /// Pattern size and the bead legend, most used colors first.
    pub fn statistics_page(&mut self, statistics: &Statistics) -> RenderResult<()> {
        self.advance(DocumentState::StatisticsPage)?;

        let page = self.config.page;
        let fonts = self.config.fonts;
        let labels = self.config.labels.clone();
        self.new_page()?;
        self.page_number()?;

        let summary = labels.summary(statistics.effective_columns, statistics.total_rows);
        self.set_font(Font::Regular)?;
        self.text(&summary, Point::new(page.margin_left, SUMMARY_TOP), fonts.subtitle, Color::BLACK)?;

        let bead = legend_cell();
        let line_spacing = bead.height * 1.5;
        let bead_spacing = bead.width * 1.5;
        let mut top = LEGEND_TOP;
        let mut x = page.margin_left;
        let mut y = top;
        for entry in statistics.legend() {
            let color: Color = entry.color.parse()?;
            let label = self.options.label_for(entry.number).into_owned();
            self.bead(Rect::new(x, y, bead.width, bead.height), color, Some(&label))?;

            let text = format!("{} — {}", entry.color.to_uppercase(), labels.pieces(entry.count));
            let text_y = y + (bead.height - self.sink.text_height(fonts.legend)) / 2.0;
            self.text(&text, Point::new(x + bead_spacing, text_y), fonts.legend, Color::BLACK)?;

            y += line_spacing;
            if y + bead.height > page.content_bottom() {
                y = top;
                x += LEGEND_COLUMN_SPACING;
                if x + LEGEND_COLUMN_SPACING > page.width {
                    self.new_page()?;
                    self.page_number()?;
                    top = page.margin_top;
                    x = page.margin_left;
                    y = top;
                }
            }
        }

        tracing::debug!(
            target: targets::DOCUMENT,
            colors = statistics.distinct_numbers(),
            beads = statistics.filled_total(),
            "statistics page written"
        );
        Ok(())
    }

    /// One line per bead row, wrapping onto further lines and pages.
    pub fn instruction_pages(&mut self, rows: &[InstructionRow]) -> RenderResult<()> {
        self.advance(DocumentState::InstructionPages)?;

        let page = self.config.page;
        let size = self.config.fonts.schema_number;
        let labels = self.config.labels.clone();
        let bead = legend_cell();
        let top = page.margin_top + self.config.fonts.subtitle;
        let right = page.content_right();
        let bottom = page.content_bottom();

        self.new_page()?;
        self.page_number()?;
        self.set_font(Font::Regular)?;
        let mut y = top;
        for row in rows {
            if y >= bottom {
                self.new_page()?;
                self.page_number()?;
                y = top;
            }

            let label = labels.row_label(row.index + 1, row.direction == Direction::RightToLeft);
            self.text(&label, Point::new(page.margin_left, y), size, Color::BLACK)?;
            let indent = INSTRUCTION_INDENT
                .max(page.margin_left + self.sink.text_width(&label, size) + INSTRUCTION_GAP);

            let mut x = indent;
            for run in &row.runs {
                let count = labels.pieces(run.count);
                let count_width = self.sink.text_width(&count, size);
                if x > indent && x + bead.width + INSTRUCTION_GAP + count_width > right {
                    x = indent;
                    y += INSTRUCTION_LINE_SPACING;
                    if y >= bottom {
                        self.new_page()?;
                        self.page_number()?;
                        y = top;
                    }
                }

                let color: Color = run.color.parse()?;
                let number = self.options.label_for(run.number).into_owned();
                self.bead(Rect::new(x, y, bead.width, bead.height), color, Some(&number))?;
                x += bead.width + INSTRUCTION_GAP;
                self.text(&count, Point::new(x, y), size, Color::BLACK)?;
                x += count_width + INSTRUCTION_GAP;
            }
            y += INSTRUCTION_LINE_SPACING;
        }

        tracing::debug!(target: targets::DOCUMENT, rows = rows.len(), pages = self.pages, "instructions written");
        Ok(())
    }

    /// One page per tile, in pagination order.
    pub fn schema_pages(
        &mut self,
        pagination: &Pagination<'_>,
        geometry: &LatticeGeometry,
        background: Color,
    ) -> RenderResult<()> {
        self.advance(DocumentState::SchemaPages)?;

        tracing::debug!(
            target: targets::DOCUMENT,
            tiles = pagination.tile_count(),
            row_bands = pagination.total_row_bands(),
            col_bands = pagination.total_col_bands(),
            "writing schema pages"
        );
        for tile in pagination.tiles() {
            self.schema_page(&tile, geometry, background)?;
        }
        Ok(())
    }

    /// Finish the document.
    pub fn close(&mut self) -> RenderResult<()> {
        self.advance(DocumentState::Closed)?;
        self.sink.end()?;
        tracing::info!(target: targets::DOCUMENT, pages = self.pages, title = %self.info.title, "document closed");
        Ok(())
    }

    // =========================================================================
    // State
    // =========================================================================

    fn check_next(&self, to: DocumentState) -> RenderResult<()> {
        if self.state.is_closed() {
            return Err(LayoutError::DocumentClosed.into());
        }
        if self.state.next() != Some(to) {
            return Err(LayoutError::InvalidTransition {
                from: self.state.name(),
                to: to.name(),
            }
            .into());
        }
        Ok(())
    }

    fn advance(&mut self, to: DocumentState) -> RenderResult<()> {
        self.check_next(to)?;
        tracing::trace!(target: targets::DOCUMENT, from = %self.state, to = %to, "section");
        self.state = to;
        Ok(())
    }

    // =========================================================================
    // Drawing helpers
    // =========================================================================

    fn new_page(&mut self) -> RenderResult<()> {
        self.sink.add_page(self.config.page.size())?;
        self.pages += 1;
        self.pen = Pen::default();
        Ok(())
    }

    fn set_font(&mut self, font: Font) -> RenderResult<()> {
        if self.pen.font != Some(font) {
            self.sink.set_font(font)?;
            self.pen.font = Some(font);
        }
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> RenderResult<()> {
        if self.pen.size != Some(size) {
            self.sink.set_font_size(size)?;
            self.pen.size = Some(size);
        }
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> RenderResult<()> {
        if self.pen.color != Some(color) {
            self.sink.fill_color(color)?;
            self.pen.color = Some(color);
        }
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> RenderResult<()> {
        if self.pen.line_width != Some(width) {
            self.sink.set_line_width(width)?;
            self.pen.line_width = Some(width);
        }
        Ok(())
    }

    /// Single-line text in the current font.
    fn text(&mut self, text: &str, at: Point, size: f32, color: Color) -> RenderResult<()> {
        self.set_font_size(size)?;
        self.set_color(color)?;
        self.sink.draw_text(text, at, &TextOptions::single_line())
    }

    /// Text centered horizontally on the page, in the current font and color.
    fn centered(&mut self, text: &str, size: f32, y: f32, options: &TextOptions) -> RenderResult<()> {
        let x = (self.config.page.width - self.sink.text_width(text, size)) / 2.0;
        self.set_font_size(size)?;
        self.sink.draw_text(text, Point::new(x, y), options)
    }

    fn page_number(&mut self) -> RenderResult<()> {
        let page = self.config.page;
        let number = self.pages.to_string();
        self.set_font(Font::Regular)?;
        self.text(
            &number,
            Point::new(page.content_right(), page.content_bottom()),
            self.config.fonts.schema_number,
            Color::GRAY,
        )
    }

    fn site_mark(&mut self) -> RenderResult<()> {
        let mark = self.config.site.mark.clone();
        self.set_font(Font::Regular)?;
        self.set_color(Color::BLACK)?;
        self.centered(
            &mark,
            self.config.fonts.site_mark,
            self.config.page.content_bottom(),
            &TextOptions::single_line(),
        )
    }

    /// A bead cell: filled rectangle, contrast outline, optional centered
    /// label in contrast color.
    fn bead(&mut self, rect: Rect, color: Color, label: Option<&str>) -> RenderResult<()> {
        self.set_line_width(BEAD_LINE_WIDTH)?;
        self.sink.draw_rect(rect.inset_trailing(BEAD_LINE_WIDTH))?;
        self.sink.fill_and_stroke(color, color.outline_contrast())?;
        self.pen.color = Some(color);

        if let Some(label) = label {
            let size = self.config.fonts.schema_number;
            let x = rect.left() + (rect.width() - self.sink.text_width(label, size)) / 2.0;
            let y = rect.top() + (rect.height() - self.sink.text_height(size)) / 2.0;
            self.text(label, Point::new(x, y), size, color.text_contrast())?;
        }
        Ok(())
    }

    fn schema_page(
        &mut self,
        tile: &PageTile<'_>,
        geometry: &LatticeGeometry,
        background: Color,
    ) -> RenderResult<()> {
        let page = self.config.page;
        let cell = geometry.cell();

        self.new_page()?;
        self.page_number()?;
        let slice = self.config.labels.slice_info(
            tile.row_band + 1,
            tile.total_row_bands,
            tile.col_band + 1,
            tile.total_col_bands,
        );
        self.text(
            &slice,
            Point::new(page.margin_left, page.content_bottom()),
            self.config.fonts.schema_number,
            Color::BLACK,
        )?;
        self.site_mark()?;

        if self.options.rulers {
            self.rulers(tile, geometry)?;
        }

        let print = page.print_area();
        let bounds = Rect::new(page.margin_left, page.margin_top, print.width, print.height);
        let number_height = self.sink.text_height(self.config.fonts.schema_number);
        let mut clipped = 0usize;

        for tile_cell in tile.cells() {
            let x = page.margin_left
                + tile_cell.col as f32 * cell.width
                + geometry.row_shift_x(tile_cell.global_row);
            let y = page.margin_top
                + tile_cell.row as f32 * cell.height
                + geometry.col_shift_y(tile_cell.global_col);

            let (color, label) = match tile_cell.item.bead_data() {
                Some((hex, number)) => {
                    let label = self
                        .options
                        .numbers
                        .then(|| self.options.label_for(number).into_owned());
                    (hex.parse::<Color>()?, label)
                }
                None => (background, None),
            };
            // Offset beads on the last row or column reach past the print area.
            let rect = Rect::new(x, y, cell.width, cell.height);
            let Some(visible) = rect.clip_to(&bounds) else {
                clipped += 1;
                continue;
            };
            let label = if visible == rect {
                label
            } else {
                clipped += 1;
                label.filter(|_| number_height <= visible.height())
            };
            self.bead(visible, color, label.as_deref())?;
        }

        tracing::trace!(
            target: targets::DOCUMENT,
            tile = tile.index(),
            cells = tile.cell_count(),
            clipped,
            page = self.pages,
            "schema page written"
        );
        Ok(())
    }

    /// Column ticks above the first row and row ticks left of the first
    /// column, numbered with global positions and shifted with those beads.
    fn rulers(&mut self, tile: &PageTile<'_>, geometry: &LatticeGeometry) -> RenderResult<()> {
        let page = self.config.page;
        let cell = geometry.cell();
        let shift_x = geometry.row_shift_x(tile.row_origin);
        let shift_y = geometry.col_shift_y(tile.col_origin);
        let size = self.config.fonts.schema_number;
        let text_height = self.sink.text_height(size);
        let columns = tile.rows.iter().map(Vec::len).max().unwrap_or(0);

        self.set_line_width(RULER_LINE_WIDTH)?;
        let tick_top = page.margin_top - cell.height * 0.5;
        for col in 0..columns {
            let number = tile.col_origin + col + 1;
            let cx = page.margin_left + col as f32 * cell.width + cell.width / 2.0 + shift_x;
            self.sink
                .draw_line(Point::new(cx, tick_top), Point::new(cx, page.margin_top), Color::GRAY)?;
            if number % COLUMN_RULER_STEP == 0 {
                let text = number.to_string();
                let x = cx - self.sink.text_width(&text, size) / 2.0;
                self.text(&text, Point::new(x, tick_top - text_height), size, Color::GRAY)?;
            }
        }

        let tick_left = page.margin_left - cell.width * 0.75;
        let tick_right = page.margin_left - cell.width * 0.25;
        for row in 0..tile.rows.len() {
            let number = tile.row_origin + row + 1;
            let cy = page.margin_top + row as f32 * cell.height + cell.height / 2.0 + shift_y;
            self.sink
                .draw_line(Point::new(tick_left, cy), Point::new(tick_right, cy), Color::GRAY)?;
            if number % ROW_RULER_STEP == 0 {
                let text = number.to_string();
                let x = tick_left - self.sink.text_width(&text, size) - 1.0;
                self.text(&text, Point::new(x, cy - text_height / 2.0), size, Color::GRAY)?;
            }
        }
        Ok(())
    }
}

/// Bead size used for legend and instruction swatches.
fn legend_cell() -> CellSize {
    LatticeType::Brick.source_cell().scaled(DEFAULT_SCALE)
}

/// Render `input` into `sink` in one go and hand the sink back.
pub fn render_document<S: DocumentSink>(
    sink: S,
    config: RenderConfig,
    options: RenderOptions,
    input: &ExportInput,
) -> RenderResult<S> {
    let mut renderer = LayoutRenderer::new(sink, config, input.info()).with_options(options);
    renderer.render(input)?;
    Ok(renderer.into_sink())
}
