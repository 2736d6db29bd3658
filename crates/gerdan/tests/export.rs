//! File export, including cleanup after failures.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use gerdan::render::{
    CommandStreamSink, DocumentSink, DrawCommand, ExportInput, Font, Point, Rect, RenderError,
    RenderResult, Size, TextOptions,
};
use gerdan::{Color, Colormap, ExportConfig, ExportError, Exporter, LatticeType, LayoutError, Schema};

fn input(lattice: LatticeType, rows: usize, cols: usize) -> ExportInput {
    ExportInput {
        schema: Schema::from_fn(rows, cols, lattice.source_cell(), |row, col| {
            ((row * cols + col) % 4 != 0).then(|| ("#2e86c1".to_string(), 1))
        }),
        colormap: Colormap::default(),
        lattice,
        background: Color::WHITE,
        title: "Waves".into(),
        author: "olena".into(),
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_export_document_writes_display_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waves.jsonl");

    let report = Exporter::default()
        .export_document(&input(LatticeType::Brick, 90, 40), &path)
        .unwrap();

    assert_eq!(report.path, path);
    assert!(report.bytes > 0);
    assert_eq!(entries(dir.path()), vec!["waves.jsonl".to_string()]);

    let content = fs::read_to_string(&path).unwrap();
    let commands: Vec<DrawCommand> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let pages = commands.iter().filter(|c| c.is_page()).count();
    assert_eq!(pages, report.pages);
    assert_eq!(commands.last(), Some(&DrawCommand::End));
}

#[test]
fn test_layout_errors_create_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.jsonl");

    let mut empty = input(LatticeType::Grid, 1, 1);
    empty.schema = Schema::default();
    let err = Exporter::default().export_document(&empty, &path).unwrap_err();
    assert_eq!(err.as_layout(), Some(&LayoutError::EmptySchema));

    let config = ExportConfig {
        scale: 50.0,
        ..ExportConfig::default()
    };
    let err = Exporter::new(config)
        .export_document(&input(LatticeType::Peyote, 2, 2), &path)
        .unwrap_err();
    assert!(matches!(err.as_layout(), Some(LayoutError::CellTooLarge { .. })));

    assert!(entries(dir.path()).is_empty());
}

/// Writes through to the file, then fails on the given page.
struct FlakySink {
    inner: CommandStreamSink<File>,
    fail_on_page: usize,
    pages: usize,
}

impl DocumentSink for FlakySink {
    fn add_page(&mut self, size: Size) -> RenderResult<()> {
        self.pages += 1;
        if self.pages == self.fail_on_page {
            return Err(RenderError::Sink("printer on fire".into()));
        }
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
fn test_sink_failure_removes_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waves.jsonl");

    let err = Exporter::default()
        .export_with(&input(LatticeType::Loom, 120, 30), &path, |file| FlakySink {
            inner: CommandStreamSink::new(file),
            fail_on_page: 4,
            pages: 0,
        })
        .unwrap_err();

    assert!(matches!(err, ExportError::Render(RenderError::Sink(_))));
    assert!(!path.exists());
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_failed_export_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waves.jsonl");
    File::create(&path).unwrap().write_all(b"previous").unwrap();

    let result = Exporter::default().export_with(&input(LatticeType::Grid, 3, 3), &path, |file| {
        FlakySink {
            inner: CommandStreamSink::new(file),
            fail_on_page: 1,
            pages: 0,
        }
    });

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), b"previous");
    assert_eq!(entries(dir.path()), vec!["waves.jsonl".to_string()]);
}

#[test]
fn test_export_preview_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waves.png");

    let report = Exporter::default()
        .export_preview(&input(LatticeType::Peyote, 5, 6), &path)
        .unwrap();
    assert_eq!(report.pages, 0);

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len() as u64, report.bytes);
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn test_exporter_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("gerdan.toml");
    fs::write(&config_path, "locale = \"uk\"\n[options]\nnumbers = false\n").unwrap();

    let exporter = Exporter::load(&config_path).unwrap();
    assert!(!exporter.config().options.numbers);

    let out = dir.path().join("waves.jsonl");
    exporter.export_document(&input(LatticeType::Grid, 2, 2), &out).unwrap();
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("Частина 1/1, Сторінка 1/1"));
}
