//! Bead schemas and colormaps.
//!
//! A [`Schema`] is the pattern as stored by the editor: rows of cells sorted
//! by `y`, each row sorted by `x`. Coordinates are in schema units, multiples
//! of the lattice's unscaled cell size. Rows may differ in length, so the
//! schema width is always taken as the longest row.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::color::{same_color, Color};
use crate::error::{LayoutError, LayoutResult};
use crate::lattice::CellSize;
use crate::logging::targets;

/// A single bead cell of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaItem {
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub filled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl SchemaItem {
    /// An unfilled cell.
    pub fn empty(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            filled: false,
            color: None,
            number: None,
        }
    }

    /// A filled cell carrying a bead color and legend number.
    pub fn bead(x: u32, y: u32, color: impl Into<String>, number: u32) -> Self {
        Self {
            x,
            y,
            filled: true,
            color: Some(color.into()),
            number: Some(number),
        }
    }

    /// Color and number of a filled cell.
    ///
    /// Returns `None` for unfilled cells and for filled cells missing either
    /// field; those are treated as empty by every layout operation.
    #[inline]
    pub fn bead_data(&self) -> Option<(&str, u32)> {
        if !self.filled {
            return None;
        }
        Some((self.color.as_deref()?, self.number?))
    }
}

/// A bead pattern: ordered rows of ordered cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    rows: Vec<Vec<SchemaItem>>,
}

impl Schema {
    /// Wrap already-ordered rows.
    pub fn new(rows: Vec<Vec<SchemaItem>>) -> Self {
        Self { rows }
    }

    /// Build a rectangular schema, placing cell (`row`, `col`) at
    /// `(col * cell.width, row * cell.height)`.
    ///
    /// `bead` returns the color and number of filled cells.
    pub fn from_fn<F>(rows: usize, cols: usize, cell: CellSize, mut bead: F) -> Self
    where
        F: FnMut(usize, usize) -> Option<(String, u32)>,
    {
        let rows = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let x = (col as f32 * cell.width) as u32;
                        let y = (row as f32 * cell.height) as u32;
                        match bead(row, col) {
                            Some((color, number)) => SchemaItem::bead(x, y, color, number),
                            None => SchemaItem::empty(x, y),
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Parse the stored JSON form (an array of rows).
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(|e| LayoutError::Parse {
            what: "schema",
            message: e.to_string(),
        })
    }

    /// Sort rows by `y` and cells by `x`.
    ///
    /// Empty rows sort first; sorting is stable.
    pub fn normalized(mut self) -> Self {
        for row in &mut self.rows {
            row.sort_by_key(|item| item.x);
        }
        self.rows
            .sort_by_key(|row| row.first().map(|item| item.y).unwrap_or(0));
        self
    }

    /// All rows.
    #[inline]
    pub fn rows(&self) -> &[Vec<SchemaItem>] {
        &self.rows
    }

    /// A single row.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&[SchemaItem]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// The cell at (`row`, `col`), absent beyond a short row.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&SchemaItem> {
        self.rows.get(row)?.get(col)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the schema has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the schema: the longest row anywhere in the grid.
    pub fn effective_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Width as older exports computed it: the longer of the first two rows.
    ///
    /// Only differs from [`effective_columns`](Self::effective_columns) when a
    /// later row is longer than both of the first two.
    pub fn legacy_columns(&self) -> usize {
        self.rows.iter().take(2).map(Vec::len).max().unwrap_or(0)
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells().filter(|(_, _, item)| item.filled).count()
    }

    /// Iterate over every cell with its row and column index.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &SchemaItem)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, items)| {
            items
                .iter()
                .enumerate()
                .map(move |(col, item)| (row, col, item))
        })
    }

    /// Check the schema invariants against its colormap.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, colormap: &Colormap) -> LayoutResult<()> {
        self.check(Some(colormap))
    }

    /// Check ordering, uniqueness and bead data without a colormap.
    pub fn validate_shape(&self) -> LayoutResult<()> {
        self.check(None)
    }

    fn check(&self, colormap: Option<&Colormap>) -> LayoutResult<()> {
        if self.rows.is_empty() {
            return Err(LayoutError::EmptySchema);
        }
        if let Some(colormap) = colormap {
            colormap.validate()?;
        }

        let mut seen = HashSet::new();
        let mut previous_y = None;
        for (row_index, row) in self.rows.iter().enumerate() {
            let Some(first) = row.first() else {
                return Err(LayoutError::EmptyRow { row: row_index });
            };
            if previous_y.is_some_and(|y| first.y < y) {
                return Err(LayoutError::InvalidCell {
                    x: first.x,
                    y: first.y,
                    reason: "starts a row above the previous row",
                });
            }
            previous_y = Some(first.y);

            let mut previous_x = None;
            for item in row {
                if previous_x.is_some_and(|x| item.x < x) {
                    return Err(LayoutError::InvalidCell {
                        x: item.x,
                        y: item.y,
                        reason: "is out of order within its row",
                    });
                }
                previous_x = Some(item.x);

                if !seen.insert((item.x, item.y)) {
                    return Err(LayoutError::DuplicateCell {
                        x: item.x,
                        y: item.y,
                    });
                }
                validate_item(item, colormap)?;
            }
        }

        tracing::debug!(
            target: targets::SCHEMA,
            rows = self.rows.len(),
            columns = self.effective_columns(),
            "schema validated"
        );
        Ok(())
    }
}

fn validate_item(item: &SchemaItem, colormap: Option<&Colormap>) -> LayoutResult<()> {
    if !item.filled {
        if item.color.is_some() || item.number.is_some() {
            return Err(LayoutError::InvalidCell {
                x: item.x,
                y: item.y,
                reason: "is empty but carries bead data",
            });
        }
        return Ok(());
    }

    let color = item.color.as_deref().ok_or(LayoutError::InvalidCell {
        x: item.x,
        y: item.y,
        reason: "is filled but has no color",
    })?;
    let number = item.number.ok_or(LayoutError::InvalidCell {
        x: item.x,
        y: item.y,
        reason: "is filled but has no number",
    })?;
    check_hex(color)?;

    let Some(colormap) = colormap else {
        return Ok(());
    };
    match colormap.color_of(number) {
        Some(mapped) if same_color(mapped, color) => Ok(()),
        Some(mapped) => Err(LayoutError::ColormapMismatch {
            number,
            reason: format!("cell uses {color}, colormap has {mapped}"),
        }),
        None => Err(LayoutError::ColormapMismatch {
            number,
            reason: "missing from colormap".into(),
        }),
    }
}

fn check_hex(color: &str) -> LayoutResult<()> {
    Color::from_hex(color)
        .map(|_| ())
        .ok_or_else(|| LayoutError::InvalidColor(color.to_string()))
}

/// A legend entry mapping a bead number to its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColormapItem {
    pub color: String,
    pub number: u32,
}

impl ColormapItem {
    /// Create a new legend entry.
    pub fn new(color: impl Into<String>, number: u32) -> Self {
        Self {
            color: color.into(),
            number,
        }
    }
}

/// The legend of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Colormap {
    items: Vec<ColormapItem>,
}

impl Colormap {
    /// Wrap legend entries.
    pub fn new(items: Vec<ColormapItem>) -> Self {
        Self { items }
    }

    /// Parse the stored JSON form.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(|e| LayoutError::Parse {
            what: "colormap",
            message: e.to_string(),
        })
    }

    /// All entries in stored order.
    #[inline]
    pub fn items(&self) -> &[ColormapItem] {
        &self.items
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the colormap has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Color of a bead number.
    pub fn color_of(&self, number: u32) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.number == number)
            .map(|item| item.color.as_str())
    }

    /// Check that numbers and colors map one-to-one and colors are valid.
    pub fn validate(&self) -> LayoutResult<()> {
        let mut numbers = HashSet::new();
        let mut colors: HashMap<String, u32> = HashMap::new();
        for item in &self.items {
            check_hex(&item.color)?;
            if !numbers.insert(item.number) {
                return Err(LayoutError::ColormapMismatch {
                    number: item.number,
                    reason: "listed more than once".into(),
                });
            }
            if let Some(other) = colors.insert(item.color.to_ascii_lowercase(), item.number) {
                return Err(LayoutError::ColormapMismatch {
                    number: item.number,
                    reason: format!("shares color {} with number {other}", item.color),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<ColormapItem> for Colormap {
    fn from_iter<I: IntoIterator<Item = ColormapItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
