//! Logging facilities for Gerdan.
//!
//! Gerdan uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; applications do that themselves:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("gerdan_layout=debug,gerdan_render=info")
//!     .init();
//! ```

/// Span names used throughout Gerdan for tracing.
pub mod span_names {
    /// A full document export.
    pub const EXPORT: &str = "gerdan::export";
    /// Pagination, statistics and instruction analysis.
    pub const ANALYZE: &str = "gerdan::analyze";
    /// Issuing draw commands to a document sink.
    pub const RENDER: &str = "gerdan::render";
    /// Drawing a raster preview.
    pub const PREVIEW: &str = "gerdan::preview";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Schema model and validation.
    pub const SCHEMA: &str = "gerdan_core::schema";
    /// Page grid fitting and tile cutting.
    pub const PAGINATE: &str = "gerdan_layout::paginate";
    /// Color statistics.
    pub const STATISTICS: &str = "gerdan_layout::statistics";
    /// Weaving instruction compilation.
    pub const INSTRUCTIONS: &str = "gerdan_layout::instructions";
    /// Document state machine and draw commands.
    pub const DOCUMENT: &str = "gerdan_render::document";
    /// Raster previews.
    pub const PREVIEW: &str = "gerdan_render::preview";
    /// File export and cleanup.
    pub const EXPORT: &str = "gerdan::export";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "gerdan::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
