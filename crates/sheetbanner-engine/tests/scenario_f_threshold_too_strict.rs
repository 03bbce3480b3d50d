mod common;

use common::InMemorySheet;
use pretty_assertions::assert_eq;
use sheetbanner_model::{CellValue, Diagnostic, PipelineConfig};

/// Scenario F: when no inter-row boundary clears the configured
/// threshold, the table is dropped and a `HeaderSplitNotFound`
/// diagnostic is recorded instead of aborting the whole run.
#[test]
fn a_table_with_no_qualifying_boundary_is_dropped_with_a_diagnostic() {
    let mut sheet = InMemorySheet::new(3, 2);
    sheet.border_block(1, 3, 1, 2);
    // Only one of the two columns is ruled at the only inter-row
    // boundary candidates; 1/2 never clears 0.95.
    sheet.edge(1, 1, |e| e.bottom = true);
    sheet.edge(2, 1, |e| e.bottom = true);

    sheet
        .set(1, 1, CellValue::text("K1"))
        .set(1, 2, CellValue::text("K2"));
    sheet
        .set(2, 1, CellValue::text("a"))
        .set(2, 2, CellValue::text("b"));
    sheet
        .set(3, 1, CellValue::text("c"))
        .set(3, 2, CellValue::text("d"));

    let output = sheetbanner_engine::run(&sheet, PipelineConfig::default());
    assert!(output.tables.is_empty());
    assert_eq!(
        output.diagnostics,
        vec![Diagnostic::HeaderSplitNotFound { min_row: 1, max_row: 3 }]
    );
}
