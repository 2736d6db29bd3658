//! Running the layout passes together.

use gerdan_core::logging::{span_names, PerfSpan};
use gerdan_core::{LatticeGeometry, LayoutError, LayoutResult, Schema};

use crate::instructions::{compile_rows, InstructionRow};
use crate::paginator::{paginate, Pagination, PrintArea};
use crate::statistics::{self, Statistics};

/// Everything an export needs from the schema, computed before the first
/// page is written.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    pub pagination: Pagination<'a>,
    pub statistics: Statistics,
    pub instructions: Vec<InstructionRow>,
}

/// Paginate, count and compile `schema` in parallel.
///
/// The three passes only read the schema. Any failure is returned before a
/// caller gets the chance to open a document.
pub fn analyze<'a>(
    schema: &'a Schema,
    geometry: &LatticeGeometry,
    print: PrintArea,
) -> LayoutResult<Analysis<'a>> {
    let _span = PerfSpan::new(span_names::ANALYZE);
    if schema.is_empty() {
        return Err(LayoutError::EmptySchema);
    }

    let lattice = geometry.lattice();
    let (pagination, (statistics, instructions)) = rayon::join(
        || paginate(schema, geometry, print),
        || {
            rayon::join(
                || statistics::collect(schema),
                || compile_rows(schema, lattice),
            )
        },
    );

    Ok(Analysis {
        pagination: pagination?,
        statistics,
        instructions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gerdan_core::LatticeType;

    #[test]
    fn test_analyze_matches_individual_passes() {
        let geometry = LatticeGeometry::from(LatticeType::Peyote);
        let schema = Schema::from_fn(40, 30, geometry.source_cell(), |row, col| {
            ((row + col) % 3 != 0).then(|| (format!("#0000{:02x}", (col % 4) * 40), (col % 4) as u32 + 1))
        });
        let print = PrintArea::new(481.88, 766.29);
        let analysis = analyze(&schema, &geometry, print).unwrap();

        assert_eq!(analysis.statistics, statistics::collect(&schema));
        assert_eq!(analysis.instructions, compile_rows(&schema, LatticeType::Peyote));
        assert_eq!(analysis.pagination.tile_count(), 1);
    }

    #[test]
    fn test_analyze_fails_before_rendering() {
        let geometry = LatticeGeometry::new(LatticeType::Brick, 40.0);
        let schema = Schema::from_fn(2, 2, geometry.source_cell(), |_, _| None);
        let err = analyze(&schema, &geometry, PrintArea::new(481.88, 766.29)).unwrap_err();
        assert!(matches!(err, LayoutError::CellTooLarge { .. }));

        let err = analyze(&Schema::default(), &geometry, PrintArea::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, LayoutError::EmptySchema);
    }
}
