//! Writing documents and previews to files.
//!
//! Output is written to a temporary file next to the destination and only
//! moved into place once it is complete. If anything fails on the way, the
//! partial file is removed and the error is returned; the destination is
//! never left half-written.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use gerdan_core::logging::{span_names, targets, PerfSpan};
use gerdan_core::LayoutError;
use gerdan_layout::PageGrid;
use gerdan_render::{
    draw_preview, encode_png, CommandStreamSink, DocumentSink, ExportInput, LayoutRenderer,
    RasterPreview, RenderError,
};
use thiserror::Error;

use crate::config::{ConfigError, ExportConfig};

/// Errors from exporting a pattern.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The pattern cannot be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Drawing or writing the output failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The export configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The temporary output file could not be created.
    #[error("failed to create output in {dir}: {source}")]
    CreateOutput {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The finished output could not be moved into place.
    #[error("failed to persist output to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// The layout error behind this failure, if any.
    pub fn as_layout(&self) -> Option<&LayoutError> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Render(err) => err.as_layout(),
            _ => None,
        }
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Pages written; zero for previews.
    pub pages: usize,
    pub bytes: u64,
}

/// Exports patterns with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter from a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ExportResult<Self> {
        Ok(Self::new(ExportConfig::load(path)?))
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write the document for `input` to `path` as a JSON-lines display
    /// list.
    pub fn export_document(
        &self,
        input: &ExportInput,
        path: impl AsRef<Path>,
    ) -> ExportResult<ExportReport> {
        self.export_with(input, path, |file| CommandStreamSink::new(BufWriter::new(file)))
    }

    /// Write the document for `input` to `path` through the sink built by
    /// `make_sink` over the output file.
    ///
    /// The pattern is checked before the output file is created.
    pub fn export_with<S, F>(
        &self,
        input: &ExportInput,
        path: impl AsRef<Path>,
        make_sink: F,
    ) -> ExportResult<ExportReport>
    where
        S: DocumentSink,
        F: FnOnce(File) -> S,
    {
        let _span = PerfSpan::new(span_names::EXPORT);
        let path = path.as_ref();
        self.config.validate()?;
        self.precheck(input)?;

        tracing::info!(
            target: targets::EXPORT,
            path = %path.display(),
            title = %input.title,
            lattice = %input.lattice,
            "exporting document"
        );

        let config = self.config.render_config();
        let options = self.config.options.clone();
        let pages = write_atomically(path, |file| {
            let sink = make_sink(file);
            let mut renderer = LayoutRenderer::new(sink, config, input.info()).with_options(options);
            renderer.render(input)?;
            Ok(renderer.page_count())
        })?;

        self.report(path, pages)
    }

    /// Write a PNG preview of `input` to `path`.
    pub fn export_preview(
        &self,
        input: &ExportInput,
        path: impl AsRef<Path>,
    ) -> ExportResult<ExportReport> {
        let path = path.as_ref();
        let png = self.preview_png(input)?;
        write_atomically(path, |mut file| {
            file.write_all(&png).map_err(RenderError::from)?;
            file.flush().map_err(RenderError::from)?;
            Ok(())
        })?;

        tracing::info!(target: targets::EXPORT, path = %path.display(), bytes = png.len(), "preview exported");
        self.report(path, 0)
    }

    /// PNG bytes of a preview of `input`.
    pub fn preview_png(&self, input: &ExportInput) -> ExportResult<Vec<u8>> {
        self.config.validate()?;
        input.schema.validate_shape()?;
        let geometry = input.geometry(self.config.preview_scale);
        let image = draw_preview(&input.schema, &geometry, input.background, RasterPreview::new())?;
        Ok(encode_png(&image)?)
    }

    /// Everything that can fail before a page is written.
    fn precheck(&self, input: &ExportInput) -> ExportResult<()> {
        input.schema.validate_shape()?;
        let geometry = input.geometry(self.config.scale);
        PageGrid::fit(geometry.cell(), self.config.page.print_area())?;
        Ok(())
    }

    fn report(&self, path: &Path, pages: usize) -> ExportResult<ExportReport> {
        let bytes = std::fs::metadata(path)
            .map_err(|source| ExportError::Persist {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        Ok(ExportReport {
            path: path.to_path_buf(),
            pages,
            bytes,
        })
    }
}

/// Directory the temporary output for `path` is created in.
fn output_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Run `write` against a temporary file beside `path`, then move it into
/// place. On failure the temporary file is removed.
fn write_atomically<T>(
    path: &Path,
    write: impl FnOnce(File) -> ExportResult<T>,
) -> ExportResult<T> {
    let dir = output_dir(path);
    let create_error = |source| ExportError::CreateOutput {
        dir: dir.to_path_buf(),
        source,
    };
    let temp = tempfile::Builder::new()
        .prefix(".gerdan-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(create_error)?;
    let file = temp.as_file().try_clone().map_err(create_error)?;

    match write(file) {
        Ok(value) => {
            temp.persist(path).map_err(|e| ExportError::Persist {
                path: path.to_path_buf(),
                source: e.error,
            })?;
            Ok(value)
        }
        Err(err) => {
            let partial = temp.path().to_path_buf();
            match temp.close() {
                Ok(()) => tracing::error!(
                    target: targets::EXPORT,
                    error = %err,
                    partial = %partial.display(),
                    "export failed, partial output removed"
                ),
                Err(cleanup) => tracing::error!(
                    target: targets::EXPORT,
                    error = %err,
                    cleanup_error = %cleanup,
                    partial = %partial.display(),
                    "export failed, partial output could not be removed"
                ),
            }
            Err(err)
        }
    }
}
