//! Export a bead pattern to a print document and a PNG preview.
//!
//! Reads an export input (JSON with `schema`, `colormap`, `type`, ...) from
//! the path given as the first argument, or uses a built-in brick pattern.
//! Optionally takes an export config (TOML) as the second argument.
//!
//! Run with: cargo run -p gerdan --example export_pattern -- pattern.json gerdan.toml

use std::env;
use std::fs;

use gerdan::render::ExportInput;
use gerdan::{Color, Colormap, ColormapItem, Exporter, LatticeType, Schema};

fn sample() -> ExportInput {
    let lattice = LatticeType::Brick;
    let palette = ["#c0392b", "#f1c40f", "#1a5276"];
    let schema = Schema::from_fn(48, 24, lattice.source_cell(), |row, col| {
        let stripe = (row / 4 + col / 6) % palette.len();
        ((row + col) % 7 != 0).then(|| (palette[stripe].to_string(), stripe as u32 + 1))
    });
    let colormap = Colormap::new(
        palette
            .iter()
            .enumerate()
            .map(|(i, color)| ColormapItem::new(*color, i as u32 + 1))
            .collect(),
    );

    ExportInput {
        schema,
        colormap,
        lattice,
        background: Color::WHITE,
        title: "Carpathian stripes".into(),
        author: "gerdan".into(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gerdan_render=info,gerdan_layout=debug".into()),
        )
        .init();

    let mut args = env::args().skip(1);
    let input = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).expect("Failed to read pattern");
            ExportInput::from_json(&json).expect("Failed to parse pattern")
        }
        None => sample(),
    };
    let exporter = match args.next() {
        Some(path) => Exporter::load(path).expect("Failed to load config"),
        None => Exporter::default(),
    };

    if let Err(err) = input.validate() {
        println!("Warning: {err}");
    }

    let document = exporter
        .export_document(&input, "pattern.jsonl")
        .expect("Failed to export document");
    println!(
        "Wrote {} pages ({} bytes) to {}",
        document.pages,
        document.bytes,
        document.path.display()
    );

    let preview = exporter
        .export_preview(&input, "pattern.png")
        .expect("Failed to export preview");
    println!("Wrote preview ({} bytes) to {}", preview.bytes, preview.path.display());
}
