//! Cutting a schema into printable page tiles.
//!
//! A pattern larger than one page is printed as a sheet grid: row bands run
//! top to bottom, and each row band is split into column bands left to
//! right. Tiles are produced in exactly that order, which is the order the
//! sheets are printed and reassembled in.
//!
//! # Example
//!
//! ```
//! use gerdan_core::{LatticeGeometry, LatticeType, Schema};
//! use gerdan_layout::{paginate, PrintArea};
//!
//! let geometry = LatticeGeometry::from(LatticeType::Grid);
//! let schema = Schema::from_fn(100, 10, geometry.source_cell(), |_, _| None);
//! let pagination = paginate(&schema, &geometry, PrintArea::new(481.88, 766.29)).unwrap();
//!
//! // 766.29 / 12.5 = 61 rows per page, so 100 rows need two row bands.
//! assert_eq!(pagination.total_row_bands(), 2);
//! assert_eq!(pagination.total_col_bands(), 1);
//! assert_eq!(pagination.tiles().count(), 2);
//! ```

use gerdan_core::logging::targets;
use gerdan_core::{CellSize, LatticeGeometry, LayoutError, LayoutResult, Schema, SchemaItem};

/// The printable area of a page, in print units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrintArea {
    pub width: f32,
    pub height: f32,
}

impl PrintArea {
    /// Create a new print area.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// How many beads fit on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGrid {
    rows_per_page: usize,
    cols_per_page: usize,
}

impl PageGrid {
    /// Fit bead cells of size `cell` into `print`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::CellTooLarge`] when not even one bead fits in either
    /// direction, [`LayoutError::InvalidCellSize`] for degenerate cells.
    pub fn fit(cell: CellSize, print: PrintArea) -> LayoutResult<Self> {
        if !cell.is_valid() {
            return Err(LayoutError::InvalidCellSize {
                width: cell.width,
                height: cell.height,
            });
        }

        let rows = (print.height / cell.height).floor();
        let cols = (print.width / cell.width).floor();
        if !(rows >= 1.0 && cols >= 1.0) {
            return Err(LayoutError::CellTooLarge {
                cell_width: cell.width,
                cell_height: cell.height,
                print_width: print.width,
                print_height: print.height,
            });
        }

        Ok(Self {
            rows_per_page: rows as usize,
            cols_per_page: cols as usize,
        })
    }

    /// Bead rows per page.
    #[inline]
    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Bead columns per page.
    #[inline]
    pub const fn cols_per_page(&self) -> usize {
        self.cols_per_page
    }

    /// Number of row bands needed for `rows` rows.
    #[inline]
    pub const fn row_bands(&self, rows: usize) -> usize {
        rows.div_ceil(self.rows_per_page)
    }

    /// Number of column bands needed for `cols` columns.
    #[inline]
    pub const fn col_bands(&self, cols: usize) -> usize {
        cols.div_ceil(self.cols_per_page)
    }
}

/// A cell placed on a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell<'a> {
    /// Row within the tile.
    pub row: usize,
    /// Column within the tile.
    pub col: usize,
    /// Row within the whole schema.
    pub global_row: usize,
    /// Column within the whole schema.
    pub global_col: usize,
    /// `x` relative to the tile origin, in schema units: the tile's first
    /// column times the unscaled source cell width, subtracted from `item.x`.
    pub local_x: f32,
    /// `y` relative to the tile origin, in schema units: the tile's first
    /// row times the unscaled source cell height, subtracted from `item.y`.
    pub local_y: f32,
    /// The schema cell.
    pub item: &'a SchemaItem,
}

/// One page worth of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTile<'a> {
    /// Zero-based row band.
    pub row_band: usize,
    pub total_row_bands: usize,
    /// Zero-based column band.
    pub col_band: usize,
    pub total_col_bands: usize,
    /// First schema row on this tile.
    pub row_origin: usize,
    /// First schema column on this tile.
    pub col_origin: usize,
    /// Tile rows. A row is shorter than the page (or empty) where the
    /// schema row is short.
    pub rows: Vec<Vec<TileCell<'a>>>,
}

impl<'a> PageTile<'a> {
    /// Iterate over every cell of the tile.
    pub fn cells(&self) -> impl Iterator<Item = &TileCell<'a>> + '_ {
        self.rows.iter().flatten()
    }

    /// Number of cells on the tile.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Position of the tile among all tiles, zero-based.
    pub fn index(&self) -> usize {
        self.row_band * self.total_col_bands + self.col_band
    }
}

/// The result of paginating a schema.
///
/// Band totals are known up front; tiles are cut lazily and the sequence can
/// be restarted any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Pagination<'a> {
    schema: &'a Schema,
    grid: PageGrid,
    source_cell: CellSize,
    effective_columns: usize,
    total_row_bands: usize,
    total_col_bands: usize,
}

impl<'a> Pagination<'a> {
    /// The page grid used for cutting.
    #[inline]
    pub fn grid(&self) -> PageGrid {
        self.grid
    }

    /// The schema being paginated.
    #[inline]
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Width of the schema in columns.
    #[inline]
    pub fn effective_columns(&self) -> usize {
        self.effective_columns
    }

    /// Number of row bands ("parts").
    #[inline]
    pub fn total_row_bands(&self) -> usize {
        self.total_row_bands
    }

    /// Number of column bands per row band ("pages").
    #[inline]
    pub fn total_col_bands(&self) -> usize {
        self.total_col_bands
    }

    /// Total number of tiles.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.total_row_bands * self.total_col_bands
    }

    /// Iterate over tiles in print order.
    pub fn tiles(&self) -> Tiles<'a> {
        Tiles {
            pagination: *self,
            next: 0,
        }
    }

    /// Cut a single tile.
    pub fn tile(&self, row_band: usize, col_band: usize) -> Option<PageTile<'a>> {
        if row_band >= self.total_row_bands || col_band >= self.total_col_bands {
            return None;
        }

        let row_origin = row_band * self.grid.rows_per_page;
        let col_origin = col_band * self.grid.cols_per_page;
        let shift_x = col_origin as f32 * self.source_cell.width;
        let shift_y = row_origin as f32 * self.source_cell.height;

        let row_end = (row_origin + self.grid.rows_per_page).min(self.schema.len());
        let rows = (row_origin..row_end)
            .map(|global_row| {
                let items = self.schema.row(global_row).unwrap_or_default();
                items
                    .iter()
                    .enumerate()
                    .skip(col_origin)
                    .take(self.grid.cols_per_page)
                    .map(|(global_col, item)| TileCell {
                        row: global_row - row_origin,
                        col: global_col - col_origin,
                        global_row,
                        global_col,
                        local_x: item.x as f32 - shift_x,
                        local_y: item.y as f32 - shift_y,
                        item,
                    })
                    .collect()
            })
            .collect();

        Some(PageTile {
            row_band,
            total_row_bands: self.total_row_bands,
            col_band,
            total_col_bands: self.total_col_bands,
            row_origin,
            col_origin,
            rows,
        })
    }
}

/// Lazy iterator over the tiles of a [`Pagination`].
#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    pagination: Pagination<'a>,
    next: usize,
}

impl<'a> Iterator for Tiles<'a> {
    type Item = PageTile<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bands = self.pagination.total_col_bands;
        if bands == 0 || self.next >= self.pagination.tile_count() {
            return None;
        }
        let tile = self.pagination.tile(self.next / bands, self.next % bands);
        self.next += 1;
        tile
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pagination.tile_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Tiles<'_> {}

/// Paginate `schema` for printing with `geometry`.
///
/// The scaled cell decides how many beads fit on a page; tile coordinates
/// are rebased with the unscaled cell, the unit schema coordinates use.
pub fn paginate<'a>(
    schema: &'a Schema,
    geometry: &LatticeGeometry,
    print: PrintArea,
) -> LayoutResult<Pagination<'a>> {
    paginate_with(schema, geometry.cell(), geometry.source_cell(), print)
}

/// Paginate with explicit print and source cell sizes.
pub fn paginate_with<'a>(
    schema: &'a Schema,
    cell: CellSize,
    source_cell: CellSize,
    print: PrintArea,
) -> LayoutResult<Pagination<'a>> {
    if schema.is_empty() {
        return Err(LayoutError::EmptySchema);
    }
    let grid = PageGrid::fit(cell, print)?;
    let effective_columns = schema.effective_columns();
    let pagination = Pagination {
        schema,
        grid,
        source_cell,
        effective_columns,
        total_row_bands: grid.row_bands(schema.len()),
        total_col_bands: grid.col_bands(effective_columns),
    };

    tracing::debug!(
        target: targets::PAGINATE,
        rows = schema.len(),
        columns = effective_columns,
        rows_per_page = grid.rows_per_page,
        cols_per_page = grid.cols_per_page,
        row_bands = pagination.total_row_bands,
        col_bands = pagination.total_col_bands,
        "paginated schema"
    );
    let legacy_columns = schema.legacy_columns();
    if legacy_columns != effective_columns {
        tracing::debug!(
            target: targets::PAGINATE,
            legacy_columns,
            effective_columns,
            "a later row is wider than the first two rows"
        );
    }
    Ok(pagination)
}
