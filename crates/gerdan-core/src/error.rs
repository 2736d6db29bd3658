//! Error types for Gerdan layout operations.

use thiserror::Error;

/// Errors produced while validating, paginating or rendering a bead schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The scaled bead cell does not fit even once into the printable area.
    #[error(
        "bead cell {cell_width}x{cell_height} does not fit the print area {print_width}x{print_height}"
    )]
    CellTooLarge {
        cell_width: f32,
        cell_height: f32,
        print_width: f32,
        print_height: f32,
    },

    /// The cell size is zero, negative or not finite.
    #[error("invalid bead cell size {width}x{height}")]
    InvalidCellSize { width: f32, height: f32 },

    /// A bead number was seen with two different colors.
    ///
    /// This one is recovered locally: the first color wins.
    #[error("bead number {number} is {found} here but was first seen as {first}")]
    InconsistentColormap {
        number: u32,
        first: String,
        found: String,
    },

    /// The schema has no rows.
    #[error("schema has no rows")]
    EmptySchema,

    /// The document was already closed.
    #[error("document is closed")]
    DocumentClosed,

    /// A document stage was requested out of order.
    #[error("cannot move document from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    /// A schema row holds no cells.
    #[error("schema row {row} has no cells")]
    EmptyRow { row: usize },

    /// A cell violates the filled/color/number contract or ordering.
    #[error("cell at ({x}, {y}) {reason}")]
    InvalidCell {
        x: u32,
        y: u32,
        reason: &'static str,
    },

    /// A color string is not a `#rrggbb` hex color.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// Two cells share the same position.
    #[error("duplicate cell at ({x}, {y})")]
    DuplicateCell { x: u32, y: u32 },

    /// The colormap does not match the schema or is not one-to-one.
    #[error("colormap mismatch for bead number {number}: {reason}")]
    ColormapMismatch { number: u32, reason: String },

    /// Unknown lattice name.
    #[error("unknown lattice type {0:?}")]
    UnknownLattice(String),

    /// Malformed JSON input.
    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },
}

impl LayoutError {
    /// Whether the export can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InconsistentColormap { .. })
    }
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_colormap_conflicts_are_recoverable() {
        let conflict = LayoutError::InconsistentColormap {
            number: 3,
            first: "#ff0000".into(),
            found: "#00ff00".into(),
        };
        assert!(conflict.is_recoverable());
        assert!(!LayoutError::EmptySchema.is_recoverable());
        assert!(!LayoutError::DocumentClosed.is_recoverable());
    }

    #[test]
    fn test_display_mentions_sizes() {
        let err = LayoutError::CellTooLarge {
            cell_width: 600.0,
            cell_height: 10.0,
            print_width: 481.88,
            print_height: 766.29,
        };
        let text = err.to_string();
        assert!(text.contains("600x10"));
        assert!(text.contains("481.88x766.29"));
    }
}
