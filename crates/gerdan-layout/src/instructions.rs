//! Weaving instructions.
//!
//! Each schema row becomes a list of runs: consecutive filled beads of one
//! color. On serpentine lattices (brick, peyote) the needle comes back on
//! every odd row, so those rows are read right to left.

use gerdan_core::color::same_color;
use gerdan_core::logging::targets;
use gerdan_core::{LatticeType, Schema, SchemaItem};

/// Consecutive beads of one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub color: String,
    pub count: usize,
    /// Legend number of the first bead in the run.
    pub number: u32,
}

/// Reading direction of an instruction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// Direction of row `row_index` on `lattice`.
    #[inline]
    pub fn of_row(lattice: LatticeType, row_index: usize) -> Self {
        if lattice.is_serpentine() && row_index % 2 == 1 {
            Self::RightToLeft
        } else {
            Self::LeftToRight
        }
    }
}

/// The instructions for one schema row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRow {
    /// Zero-based schema row.
    pub index: usize,
    pub direction: Direction,
    pub runs: Vec<Run>,
}

impl InstructionRow {
    /// Number of beads strung in this row.
    pub fn bead_count(&self) -> usize {
        self.runs.iter().map(|run| run.count).sum()
    }
}

/// Run-length encode one row, left to right.
///
/// Unfilled cells end the current run without starting a new one.
pub fn encode_row(row: &[SchemaItem]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for item in row {
        match item.bead_data() {
            Some((color, _)) if current.as_ref().is_some_and(|run| same_color(&run.color, color)) => {
                if let Some(run) = current.as_mut() {
                    run.count += 1;
                }
            }
            Some((color, number)) => {
                runs.extend(current.take());
                current = Some(Run {
                    color: color.to_string(),
                    count: 1,
                    number,
                });
            }
            None => runs.extend(current.take()),
        }
    }
    runs.extend(current);
    runs
}

/// Compile instruction rows with their reading direction.
///
/// Odd rows of serpentine lattices are grouped left to right first and the
/// resulting run list is then reversed.
pub fn compile_rows(schema: &Schema, lattice: LatticeType) -> Vec<InstructionRow> {
    let rows: Vec<_> = schema
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let direction = Direction::of_row(lattice, index);
            let mut runs = encode_row(row);
            if direction == Direction::RightToLeft {
                runs.reverse();
            }
            InstructionRow {
                index,
                direction,
                runs,
            }
        })
        .collect();

    tracing::debug!(
        target: targets::INSTRUCTIONS,
        %lattice,
        rows = rows.len(),
        runs = rows.iter().map(|row| row.runs.len()).sum::<usize>(),
        "compiled instructions"
    );
    rows
}

/// Compile the run lists of every row.
pub fn compile(schema: &Schema, lattice: LatticeType) -> Vec<Vec<Run>> {
    compile_rows(schema, lattice)
        .into_iter()
        .map(|row| row.runs)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(color: &str, count: usize, number: u32) -> Run {
        Run {
            color: color.into(),
            count,
            number,
        }
    }

    fn row(cells: &[Option<(&str, u32)>]) -> Vec<SchemaItem> {
        cells
            .iter()
            .enumerate()
            .map(|(col, cell)| match cell {
                Some((color, number)) => SchemaItem::bead(col as u32 * 20, 0, *color, *number),
                None => SchemaItem::empty(col as u32 * 20, 0),
            })
            .collect()
    }

    #[test]
    fn test_encode_groups_consecutive_colors() {
        let cells = row(&[
            Some(("#aa0000", 1)),
            Some(("#aa0000", 1)),
            Some(("#00aa00", 2)),
            None,
            Some(("#00aa00", 2)),
            Some(("#00aa00", 2)),
        ]);
        assert_eq!(
            encode_row(&cells),
            vec![run("#aa0000", 2, 1), run("#00aa00", 1, 2), run("#00aa00", 2, 2)]
        );
    }

    #[test]
    fn test_run_number_comes_from_first_bead() {
        // Same color under two numbers still forms one run.
        let cells = row(&[Some(("#aa0000", 4)), Some(("#AA0000", 7))]);
        assert_eq!(encode_row(&cells), vec![run("#aa0000", 2, 4)]);
    }

    #[test]
    fn test_unfilled_rows_produce_no_runs() {
        assert!(encode_row(&row(&[None, None])).is_empty());
        assert!(encode_row(&[]).is_empty());
    }

    #[test]
    fn test_grid_rows_are_not_reversed() {
        let schema = Schema::new(vec![
            row(&[Some(("#aa0000", 1)), Some(("#00aa00", 2))]),
            row(&[Some(("#aa0000", 1)), Some(("#00aa00", 2))]),
        ]);
        for lattice in [LatticeType::Grid, LatticeType::Loom] {
            let compiled = compile(&schema, lattice);
            assert_eq!(compiled[0], compiled[1]);
        }
    }

    #[test]
    fn test_brick_odd_rows_reverse_grouped_runs() {
        let cells = row(&[
            Some(("#aa0000", 1)),
            Some(("#aa0000", 1)),
            None,
            Some(("#00aa00", 2)),
        ]);
        let schema = Schema::new(vec![cells.clone(), cells.clone(), cells]);
        let rows = compile_rows(&schema, LatticeType::Brick);

        assert_eq!(rows[0].direction, Direction::LeftToRight);
        assert_eq!(rows[0].runs, vec![run("#aa0000", 2, 1), run("#00aa00", 1, 2)]);
        assert_eq!(rows[1].direction, Direction::RightToLeft);
        // Runs keep their left-to-right number; only their order flips.
        assert_eq!(rows[1].runs, vec![run("#00aa00", 1, 2), run("#aa0000", 2, 1)]);
        assert_eq!(rows[2].runs, rows[0].runs);
        assert_eq!(rows[1].bead_count(), 3);
    }

    #[test]
    fn test_compile_is_stable() {
        let schema = Schema::new(vec![
            row(&[Some(("#aa0000", 1)), None, Some(("#0000aa", 3))]),
            row(&[Some(("#0000aa", 3)), Some(("#0000aa", 3))]),
        ]);
        assert_eq!(
            compile(&schema, LatticeType::Peyote),
            compile(&schema, LatticeType::Peyote)
        );
    }
}
