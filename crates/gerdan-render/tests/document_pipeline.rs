//! End-to-end document rendering through the provided sinks.

use gerdan_core::{Color, Colormap, LatticeGeometry, LatticeType, Schema, SchemaItem};
use gerdan_render::{
    render_document, CommandStreamSink, DocumentSink, DrawCommand, ExportInput, Font, Labels,
    Point, Rect, RecordingSink, RenderConfig, RenderError, RenderOptions, RenderResult, Size,
    TextOptions,
};

fn input(lattice: LatticeType, schema: Schema) -> ExportInput {
    ExportInput {
        schema,
        colormap: Colormap::default(),
        lattice,
        background: Color::WHITE,
        title: "Vyshyvanka".into(),
        author: "olena".into(),
    }
}

fn striped(lattice: LatticeType, rows: usize, cols: usize) -> Schema {
    let cell = lattice.source_cell();
    Schema::from_fn(rows, cols, cell, |row, col| match (row + col) % 3 {
        0 => Some(("#c0392b".into(), 1)),
        1 => Some(("#f1c40f".into(), 2)),
        _ => None,
    })
}

#[test]
fn test_tile_pages_follow_band_order() {
    // Grid beads are 12.5pt: 61 rows and 38 columns per page.
    let schema = striped(LatticeType::Grid, 130, 50);
    let sink = render_document(
        RecordingSink::new(),
        RenderConfig::default(),
        RenderOptions::default(),
        &input(LatticeType::Grid, schema),
    )
    .unwrap();

    let slices: Vec<&str> = sink.texts().filter(|t| t.starts_with("Part ")).collect();
    assert_eq!(
        slices,
        vec![
            "Part 1/3, Page 1/2",
            "Part 1/3, Page 2/2",
            "Part 2/3, Page 1/2",
            "Part 2/3, Page 2/2",
            "Part 3/3, Page 1/2",
            "Part 3/3, Page 2/2",
        ]
    );
    assert!(sink.is_ended());
    assert!(matches!(sink.commands().last(), Some(DrawCommand::End)));
}

#[test]
fn test_every_schema_cell_is_drawn_once() {
    let schema = striped(LatticeType::Peyote, 70, 60);
    let cells = schema.rows().iter().map(Vec::len).sum::<usize>();
    let sink = render_document(
        RecordingSink::new(),
        RenderConfig::default(),
        RenderOptions::default(),
        &input(LatticeType::Peyote, schema),
    )
    .unwrap();

    let first_schema_page = sink
        .pages()
        .iter()
        .position(|page| page.iter().any(|c| c.as_text().is_some_and(|t| t.starts_with("Part "))))
        .unwrap();
    let drawn: usize = sink.pages()[first_schema_page..]
        .iter()
        .map(|page| page.iter().filter(|c| matches!(c, DrawCommand::Rect { .. })).count())
        .sum();
    assert_eq!(drawn, cells);
}

#[test]
fn test_ukrainian_labels() {
    let config = RenderConfig {
        labels: Labels::ukrainian(),
        ..RenderConfig::default()
    };
    let sink = render_document(
        RecordingSink::new(),
        config,
        RenderOptions::default(),
        &input(LatticeType::Grid, striped(LatticeType::Grid, 2, 2)),
    )
    .unwrap();

    let texts: Vec<&str> = sink.texts().collect();
    assert!(texts.contains(&"Автор: @olena"));
    assert!(texts.contains(&"Частина 1/1, Сторінка 1/1"));
    assert!(texts.contains(&"1 ряд: "));
}

#[test]
fn test_inconsistent_colormap_is_recovered() {
    let schema = Schema::new(vec![vec![
        SchemaItem::bead(0, 0, "#ff0000", 1),
        SchemaItem::bead(25, 0, "#0000ff", 1),
    ]]);
    let sink = render_document(
        RecordingSink::new(),
        RenderConfig::default(),
        RenderOptions::default(),
        &input(LatticeType::Grid, schema),
    )
    .unwrap();

    // The first color seen keeps the count for both beads.
    assert!(sink.texts().any(|t| t == "#FF0000 — 2 pcs."));
}

#[test]
fn test_stream_sink_replays_to_same_commands() {
    let doc = input(LatticeType::Brick, striped(LatticeType::Brick, 12, 9));
    let recorded = render_document(
        RecordingSink::new(),
        RenderConfig::default(),
        RenderOptions::default(),
        &doc,
    )
    .unwrap();
    let stream = render_document(
        CommandStreamSink::new(Vec::new()),
        RenderConfig::default(),
        RenderOptions::default(),
        &doc,
    )
    .unwrap();

    let out = String::from_utf8(stream.into_inner()).unwrap();
    let replayed: Vec<DrawCommand> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replayed.len(), recorded.commands().len());
    assert_eq!(replayed.first(), recorded.commands().first());
    assert_eq!(replayed.last(), Some(&DrawCommand::End));
}

/// Fails on the n-th page.
#[derive(Debug)]
struct FailingSink {
    pages_left: usize,
    inner: RecordingSink,
}

impl DocumentSink for FailingSink {
    fn add_page(&mut self, size: Size) -> RenderResult<()> {
        if self.pages_left == 0 {
            return Err(RenderError::Sink("out of paper".into()));
        }
        self.pages_left -= 1;
        self.inner.add_page(size)
    }
    fn end(&mut self) -> RenderResult<()> {
        self.inner.end()
    }
    fn set_font(&mut self, font: Font) -> RenderResult<()> {
        self.inner.set_font(font)
    }
    fn set_font_size(&mut self, size: f32) -> RenderResult<()> {
        self.inner.set_font_size(size)
    }
    fn fill_color(&mut self, color: Color) -> RenderResult<()> {
        self.inner.fill_color(color)
    }
    fn set_line_width(&mut self, width: f32) -> RenderResult<()> {
        self.inner.set_line_width(width)
    }
    fn draw_rect(&mut self, rect: Rect) -> RenderResult<()> {
        self.inner.draw_rect(rect)
    }
    fn fill_and_stroke(&mut self, fill: Color, stroke: Color) -> RenderResult<()> {
        self.inner.fill_and_stroke(fill, stroke)
    }
    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> RenderResult<()> {
        self.inner.draw_line(from, to, color)
    }
    fn draw_text(&mut self, text: &str, at: Point, options: &TextOptions) -> RenderResult<()> {
        self.inner.draw_text(text, at, options)
    }
}

#[test]
fn test_sink_failure_propagates() {
    let sink = FailingSink {
        pages_left: 2,
        inner: RecordingSink::new(),
    };
    let err = render_document(
        sink,
        RenderConfig::default(),
        RenderOptions::default(),
        &input(LatticeType::Loom, striped(LatticeType::Loom, 4, 4)),
    )
    .unwrap_err();
    assert!(matches!(err, RenderError::Sink(message) if message == "out of paper"));
}

#[test]
fn test_geometry_scale_follows_config() {
    let schema = striped(LatticeType::Grid, 4, 4);
    let config = RenderConfig {
        scale: 1.0,
        ..RenderConfig::default()
    };
    let sink = render_document(
        RecordingSink::new(),
        config,
        RenderOptions::default(),
        &input(LatticeType::Grid, schema),
    )
    .unwrap();

    let pages = sink.pages();
    let first_bead = pages[pages.len() - 1]
        .iter()
        .find_map(|c| match c {
            DrawCommand::Rect { rect } => Some(*rect),
            _ => None,
        })
        .unwrap();
    let cell = LatticeGeometry::new(LatticeType::Grid, 1.0).cell();
    assert_eq!(first_bead.size, Size::new(cell.width - 0.5, cell.height - 0.5));
}
