//! Core data model for Gerdan.
//!
//! This crate provides the pieces every other Gerdan crate builds on:
//!
//! - **Schema**: bead patterns as stored by the editor, plus validation
//! - **Colormap**: the legend mapping bead numbers to colors
//! - **Lattice geometry**: cell sizes and row/column offset rules for grid,
//!   loom, brick and peyote beadwork
//! - **Errors**: [`LayoutError`], shared by pagination and rendering
//! - **Logging**: `tracing` targets and span names
//!
//! # Example
//!
//! ```
//! use gerdan_core::{LatticeGeometry, LatticeType, Schema};
//!
//! let geometry = LatticeGeometry::from(LatticeType::Brick);
//! let schema = Schema::from_fn(3, 4, geometry.source_cell(), |_, col| {
//!     (col % 2 == 0).then(|| ("#ff0000".to_string(), 1))
//! });
//!
//! assert_eq!(schema.effective_columns(), 4);
//! assert_eq!(geometry.row_shift_x(1), geometry.cell().width / 2.0);
//! ```

pub mod color;
mod error;
pub mod lattice;
pub mod logging;
pub mod schema;

pub use color::Color;
pub use error::{LayoutError, LayoutResult};
pub use lattice::{col_shift_y, row_shift_x, CellSize, LatticeGeometry, LatticeType, DEFAULT_SCALE};
pub use schema::{Colormap, ColormapItem, Schema, SchemaItem};
