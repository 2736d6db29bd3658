//! An in-memory document sink.

use crate::command::{CommandSink, DrawCommand};
use crate::error::{RenderError, RenderResult};

/// Records every draw command in order.
///
/// Useful for tests and for callers that post-process the display list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    commands: Vec<DrawCommand>,
    ended: bool,
}

impl RecordingSink {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether [`DrawCommand::End`] has been recorded.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Number of pages started.
    pub fn page_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_page()).count()
    }

    /// All drawn texts, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    /// Commands split per page. Commands issued before the first page are
    /// not included.
    pub fn pages(&self) -> Vec<&[DrawCommand]> {
        let starts: Vec<usize> = self
            .commands
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.is_page().then_some(i))
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(n, &start)| {
                let end = starts.get(n + 1).copied().unwrap_or(self.commands.len());
                &self.commands[start..end]
            })
            .collect()
    }
}

impl CommandSink for RecordingSink {
    fn push(&mut self, command: DrawCommand) -> RenderResult<()> {
        if self.ended {
            return Err(RenderError::Sink("recording already ended".into()));
        }
        self.ended = matches!(command, DrawCommand::End);
        self.commands.push(command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::DocumentSink;
    use crate::text::TextOptions;
    use crate::types::{Point, Size};

    #[test]
    fn test_records_in_order() {
        let mut sink = RecordingSink::new();
        sink.add_page(Size::new(100.0, 100.0)).unwrap();
        sink.draw_text("a", Point::ZERO, &TextOptions::new()).unwrap();
        sink.add_page(Size::new(100.0, 100.0)).unwrap();
        sink.draw_text("b", Point::ZERO, &TextOptions::new()).unwrap();
        sink.end().unwrap();

        assert_eq!(sink.page_count(), 2);
        assert_eq!(sink.texts().collect::<Vec<_>>(), vec!["a", "b"]);
        let pages = sink.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 3);
        assert!(sink.is_ended());
    }

    #[test]
    fn test_rejects_after_end() {
        let mut sink = RecordingSink::new();
        sink.end().unwrap();
        assert!(matches!(sink.add_page(Size::ZERO), Err(RenderError::Sink(_))));
        assert_eq!(sink.commands().len(), 1);
    }
}
