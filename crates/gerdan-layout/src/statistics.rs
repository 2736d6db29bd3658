//! Bead color statistics.
//!
//! Counts beads per legend number over the whole, untiled schema. The result
//! drives the legend page and is recomputed for every export.

use std::collections::{BTreeMap, HashSet};

use gerdan_core::color::same_color;
use gerdan_core::logging::targets;
use gerdan_core::{LayoutError, Schema};

/// Bead count of one legend number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCount {
    /// First color seen for the number.
    pub color: String,
    pub count: usize,
}

/// A bead number seen with a color other than its first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorConflict {
    pub number: u32,
    pub first: String,
    pub found: String,
    /// Position of the first conflicting cell.
    pub row: usize,
    pub col: usize,
}

impl From<&ColorConflict> for LayoutError {
    fn from(conflict: &ColorConflict) -> Self {
        LayoutError::InconsistentColormap {
            number: conflict.number,
            first: conflict.first.clone(),
            found: conflict.found.clone(),
        }
    }
}

/// A legend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry<'a> {
    pub number: u32,
    pub color: &'a str,
    pub count: usize,
}

/// Aggregated statistics of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    /// Bead counts keyed by legend number.
    pub color_counts: BTreeMap<u32, ColorCount>,
    pub total_rows: usize,
    /// Longest row length over the whole schema.
    pub effective_columns: usize,
    /// Colormap conflicts found while counting. Counting continued with the
    /// first color of each number.
    pub conflicts: Vec<ColorConflict>,
}

impl Statistics {
    /// Total number of counted beads.
    pub fn filled_total(&self) -> usize {
        self.color_counts.values().map(|entry| entry.count).sum()
    }

    /// Number of distinct legend numbers.
    pub fn distinct_numbers(&self) -> usize {
        self.color_counts.len()
    }

    /// Legend entries, most used first; ties ordered by number.
    pub fn legend(&self) -> Vec<LegendEntry<'_>> {
        let mut entries: Vec<_> = self
            .color_counts
            .iter()
            .map(|(&number, entry)| LegendEntry {
                number,
                color: entry.color.as_str(),
                count: entry.count,
            })
            .collect();
        // BTreeMap order is by number; a stable sort keeps it for ties.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// Conflicts as recoverable layout errors.
    pub fn diagnostics(&self) -> impl Iterator<Item = LayoutError> + '_ {
        self.conflicts.iter().map(LayoutError::from)
    }
}

/// Count beads per legend number in a single pass.
///
/// The first color seen for a number is kept. A different color for the same
/// number is recorded once per `(number, color)` pair and logged; counting
/// continues.
pub fn collect(schema: &Schema) -> Statistics {
    let mut statistics = Statistics {
        total_rows: schema.len(),
        effective_columns: schema.effective_columns(),
        ..Default::default()
    };
    let mut reported = HashSet::new();

    for (row, col, item) in schema.cells() {
        let Some((color, number)) = item.bead_data() else {
            continue;
        };

        let entry = statistics
            .color_counts
            .entry(number)
            .or_insert_with(|| ColorCount {
                color: color.to_string(),
                count: 0,
            });
        entry.count += 1;

        if !same_color(&entry.color, color) && reported.insert((number, color.to_ascii_lowercase())) {
            tracing::warn!(
                target: targets::STATISTICS,
                number,
                first = %entry.color,
                found = %color,
                row,
                col,
                "bead number used with two colors, keeping the first"
            );
            statistics.conflicts.push(ColorConflict {
                number,
                first: entry.color.clone(),
                found: color.to_string(),
                row,
                col,
            });
        }
    }

    tracing::debug!(
        target: targets::STATISTICS,
        beads = statistics.filled_total(),
        numbers = statistics.distinct_numbers(),
        conflicts = statistics.conflicts.len(),
        "collected statistics"
    );
    statistics
}

#[cfg(test)]
mod tests {
    use super::*;
    use gerdan_core::SchemaItem;

    #[test]
    fn test_counts_by_number() {
        let schema = Schema::new(vec![
            vec![
                SchemaItem::bead(0, 0, "#ff0000", 1),
                SchemaItem::bead(25, 0, "#00ff00", 2),
            ],
            vec![SchemaItem::empty(0, 25), SchemaItem::bead(25, 25, "#ff0000", 1)],
        ]);
        let stats = collect(&schema);

        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.effective_columns, 2);
        assert_eq!(
            stats.color_counts.get(&1),
            Some(&ColorCount {
                color: "#ff0000".into(),
                count: 2
            })
        );
        assert_eq!(stats.color_counts.get(&2).map(|c| c.count), Some(1));
        assert_eq!(stats.filled_total(), schema.filled_count());
        assert!(stats.conflicts.is_empty());
    }

    #[test]
    fn test_conflict_keeps_first_color() {
        let schema = Schema::new(vec![vec![
            SchemaItem::bead(0, 0, "#ff0000", 1),
            SchemaItem::bead(25, 0, "#0000ff", 1),
            SchemaItem::bead(50, 0, "#0000FF", 1),
            SchemaItem::bead(75, 0, "#FF0000", 1),
        ]]);
        let stats = collect(&schema);

        assert_eq!(stats.color_counts[&1].color, "#ff0000");
        assert_eq!(stats.color_counts[&1].count, 4);
        // Reported once for the blue pair, never for the case variant of red.
        assert_eq!(stats.conflicts.len(), 1);
        assert_eq!((stats.conflicts[0].row, stats.conflicts[0].col), (0, 1));

        let errors: Vec<_> = stats.diagnostics().collect();
        assert_eq!(
            errors,
            vec![LayoutError::InconsistentColormap {
                number: 1,
                first: "#ff0000".into(),
                found: "#0000ff".into(),
            }]
        );
        assert!(errors[0].is_recoverable());
    }

    #[test]
    fn test_legend_sorted_by_count_then_number() {
        let schema = Schema::new(vec![vec![
            SchemaItem::bead(0, 0, "#111111", 3),
            SchemaItem::bead(25, 0, "#222222", 2),
            SchemaItem::bead(50, 0, "#222222", 2),
            SchemaItem::bead(75, 0, "#333333", 1),
        ]]);
        let stats = collect(&schema);
        let order: Vec<_> = stats.legend().iter().map(|e| e.number).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn test_effective_columns_is_longest_row() {
        let schema = Schema::new(vec![
            vec![SchemaItem::empty(0, 0)],
            vec![SchemaItem::empty(0, 20)],
            vec![
                SchemaItem::empty(0, 40),
                SchemaItem::empty(30, 40),
                SchemaItem::empty(60, 40),
            ],
        ]);
        assert_eq!(collect(&schema).effective_columns, 3);
    }
}
