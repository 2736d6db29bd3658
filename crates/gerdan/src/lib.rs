//! Gerdan - print layouts for bead-weaving patterns.
//!
//! This is the umbrella crate. It re-exports the data model and layout
//! passes, and adds configuration loading and file export on top of the
//! renderer.
//!
//! # Example
//!
//! ```no_run
//! use gerdan::{ExportConfig, Exporter};
//! use gerdan::render::ExportInput;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig::load("gerdan.toml")?;
//!     let input = ExportInput::from_json(&std::fs::read_to_string("pattern.json")?)?;
//!
//!     let exporter = Exporter::new(config);
//!     let report = exporter.export_document(&input, "pattern.jsonl")?;
//!     println!("{} pages written to {}", report.pages, report.path.display());
//!     Ok(())
//! }
//! ```

pub use gerdan_core::*;

/// Pagination, statistics and instruction passes.
pub mod layout {
    pub use gerdan_layout::*;
}

/// Document sinks, the page state machine and previews.
pub mod render {
    pub use gerdan_render::*;
}

mod config;
mod export;
pub mod prelude;

pub use config::{ConfigError, ConfigResult, ExportConfig, LabelOverrides, Locale};
pub use export::{ExportError, ExportReport, ExportResult, Exporter};
