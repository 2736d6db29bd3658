//! Prelude module for Gerdan.
//!
//! ```ignore
//! use gerdan::prelude::*;
//! ```

// ============================================================================
// Data Model
// ============================================================================

pub use gerdan_core::{
    Color, Colormap, ColormapItem, LatticeGeometry, LatticeType, LayoutError, LayoutResult,
    Schema, SchemaItem,
};

// ============================================================================
// Layout Passes
// ============================================================================

pub use gerdan_layout::{analyze, compile, paginate, statistics, PrintArea, Run, Statistics};

// ============================================================================
// Rendering
// ============================================================================

pub use gerdan_render::{
    draw_preview, DocumentSink, ExportInput, LayoutRenderer, PreviewSink, RasterPreview,
    RecordingSink, RenderConfig, RenderOptions,
};

// ============================================================================
// Export
// ============================================================================

pub use crate::{ExportConfig, ExportError, Exporter};
