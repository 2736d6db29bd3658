//! Lattice geometry.
//!
//! Every weaving technique lays beads out on its own lattice. Grid and loom
//! patterns are plain rectangular grids; brick stitch shifts every odd row
//! right by half a bead, peyote shifts every odd column down by half a bead.
//! All offset rules live here so that pagination, rendering and previews
//! never branch on the lattice themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Scale applied to the physical bead footprint for print.
pub const DEFAULT_SCALE: f32 = 0.5;

/// Beadwork lattice type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeType {
    /// Square grid.
    #[default]
    Grid,
    /// Loom weaving: rectangular grid of tall beads.
    Loom,
    /// Brick stitch: odd rows shifted right by half a bead.
    Brick,
    /// Peyote stitch: odd columns shifted down by half a bead.
    Peyote,
}

impl LatticeType {
    /// All lattice types.
    pub const ALL: [LatticeType; 4] = [Self::Grid, Self::Loom, Self::Brick, Self::Peyote];

    /// Unscaled bead cell, in schema units.
    pub const fn source_cell(self) -> CellSize {
        match self {
            Self::Grid => CellSize::new(25.0, 25.0),
            Self::Loom => CellSize::new(20.0, 30.0),
            Self::Brick => CellSize::new(30.0, 20.0),
            Self::Peyote => CellSize::new(20.0, 30.0),
        }
    }

    /// Whether adjacent rows or columns are offset from each other.
    pub const fn is_offset(self) -> bool {
        matches!(self, Self::Brick | Self::Peyote)
    }

    /// Whether weaving instructions alternate direction row by row.
    pub const fn is_serpentine(self) -> bool {
        self.is_offset()
    }

    /// Lowercase name as used in stored patterns.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Loom => "loom",
            Self::Brick => "brick",
            Self::Peyote => "peyote",
        }
    }
}

impl fmt::Display for LatticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatticeType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lattice| lattice.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::UnknownLattice(s.to_string()))
    }
}

/// Width and height of one bead cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    /// Create a new cell size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Multiply both dimensions by `factor`.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Check that both dimensions are positive and finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Horizontal shift of a row: half a cell for odd brick rows.
#[inline]
pub fn row_shift_x(lattice: LatticeType, row_index: usize, cell_width: f32) -> f32 {
    if lattice == LatticeType::Brick && row_index % 2 == 1 {
        cell_width / 2.0
    } else {
        0.0
    }
}

/// Vertical shift of a column: half a cell for odd peyote columns.
#[inline]
pub fn col_shift_y(lattice: LatticeType, col_index: usize, cell_height: f32) -> f32 {
    if lattice == LatticeType::Peyote && col_index % 2 == 1 {
        cell_height / 2.0
    } else {
        0.0
    }
}

/// A lattice together with the print scale of its beads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeGeometry {
    lattice: LatticeType,
    scale: f32,
}

impl LatticeGeometry {
    /// Create geometry for `lattice` scaled by `scale`.
    pub const fn new(lattice: LatticeType, scale: f32) -> Self {
        Self { lattice, scale }
    }

    /// The lattice type.
    #[inline]
    pub const fn lattice(&self) -> LatticeType {
        self.lattice
    }

    /// The scale factor applied to the source cell.
    #[inline]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Unscaled cell, the unit schema coordinates are expressed in.
    #[inline]
    pub const fn source_cell(&self) -> CellSize {
        self.lattice.source_cell()
    }

    /// Scaled cell used for drawing.
    #[inline]
    pub fn cell(&self) -> CellSize {
        self.source_cell().scaled(self.scale)
    }

    /// Horizontal shift of the row with global index `row`.
    #[inline]
    pub fn row_shift_x(&self, row: usize) -> f32 {
        row_shift_x(self.lattice, row, self.cell().width)
    }

    /// Vertical shift of the column with global index `col`.
    #[inline]
    pub fn col_shift_y(&self, col: usize) -> f32 {
        col_shift_y(self.lattice, col, self.cell().height)
    }

    /// Top-left corner of the bead at (`row`, `col`) relative to the grid origin.
    pub fn bead_origin(&self, row: usize, col: usize) -> (f32, f32) {
        let cell = self.cell();
        (
            col as f32 * cell.width + self.row_shift_x(row),
            row as f32 * cell.height + self.col_shift_y(col),
        )
    }
}

impl From<LatticeType> for LatticeGeometry {
    fn from(lattice: LatticeType) -> Self {
        Self::new(lattice, DEFAULT_SCALE)
    }
}
