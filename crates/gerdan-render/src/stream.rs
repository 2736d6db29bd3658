//! A document sink writing a JSON-lines display list.

use std::io::Write;

use gerdan_core::logging::targets;

use crate::command::{CommandSink, DrawCommand};
use crate::error::{RenderError, RenderResult};

/// Writes each draw command as one JSON object per line.
///
/// The stream is flushed when [`DrawCommand::End`] arrives. A PDF writer
/// living in another process can replay the list page by page.
#[derive(Debug)]
pub struct CommandStreamSink<W: Write> {
    writer: W,
    written: usize,
    ended: bool,
}

impl<W: Write> CommandStreamSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            ended: false,
        }
    }

    /// Number of commands written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for CommandStreamSink<W> {
    fn push(&mut self, command: DrawCommand) -> RenderResult<()> {
        if self.ended {
            return Err(RenderError::Sink("command stream already ended".into()));
        }

        serde_json::to_writer(&mut self.writer, &command)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;

        if matches!(command, DrawCommand::End) {
            self.writer.flush()?;
            self.ended = true;
            tracing::trace!(target: targets::DOCUMENT, commands = self.written, "command stream flushed");
        }
        Ok(())
    }
}
