//! Print layout rendering for Gerdan.
//!
//! This crate turns the layout passes of `gerdan-layout` into documents and
//! previews:
//!
//! - [`DocumentSink`]: the page-description backend trait, with
//!   [`RecordingSink`] and [`CommandStreamSink`] as provided backends
//! - [`LayoutRenderer`]: the section-by-section document state machine
//! - [`PreviewSink`] and [`draw_preview`]: one-canvas raster previews, with
//!   [`RasterPreview`] backed by the `image` crate
//! - [`RenderConfig`] and [`RenderOptions`]: page setup, texts and switches
//!
//! # Example
//!
//! ```
//! use gerdan_core::{Color, LatticeGeometry, LatticeType, Schema};
//! use gerdan_render::{draw_preview, RasterPreview};
//!
//! let geometry = LatticeGeometry::new(LatticeType::Grid, 1.0);
//! let schema = Schema::from_fn(2, 3, geometry.source_cell(), |_, _| {
//!     Some(("#336699".to_string(), 1))
//! });
//!
//! let image = draw_preview(&schema, &geometry, Color::WHITE, RasterPreview::new()).unwrap();
//! assert_eq!(image.dimensions(), (75, 50));
//! ```

mod command;
pub mod config;
mod document;
mod error;
mod input;
pub mod preview;
mod recording;
mod sink;
mod stream;
pub mod text;
pub mod types;

pub use command::{CommandSink, DrawCommand};
pub use config::{FontSizes, Labels, NumberAlias, PageSetup, RenderConfig, RenderOptions, SiteInfo};
pub use document::{render_document, DocumentState, LayoutRenderer, BEAD_LINE_WIDTH};
pub use error::{RenderError, RenderResult};
pub use input::ExportInput;
pub use preview::{draw_preview, encode_png, preview_size, PreviewSink, RasterPreview};
pub use recording::RecordingSink;
pub use sink::{DocumentInfo, DocumentSink};
pub use stream::CommandStreamSink;
pub use text::{Font, TextOptions};
pub use types::{Color, Point, Rect, Size};
