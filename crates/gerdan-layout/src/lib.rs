//! Layout passes for Gerdan bead schemas.
//!
//! - [`paginate`]: cut a schema into page tiles with band totals known up front
//! - [`statistics::collect`]: bead counts per legend number
//! - [`compile`]: run-length weaving instructions with serpentine ordering
//! - [`analyze`]: all three at once, in parallel
//!
//! Every pass is pure and deterministic: the same schema always yields the
//! same tiles, counts and runs.

mod analysis;
pub mod instructions;
pub mod paginator;
pub mod statistics;

pub use analysis::{analyze, Analysis};
pub use instructions::{compile, compile_rows, encode_row, Direction, InstructionRow, Run};
pub use paginator::{
    paginate, paginate_with, PageGrid, PageTile, Pagination, PrintArea, TileCell, Tiles,
};
pub use statistics::{ColorConflict, ColorCount, LegendEntry, Statistics};
