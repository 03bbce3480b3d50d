use crate::cell_value::CellValue;
use crate::coordinate::{BorderEdges, Coordinate};
use crate::merge::MergedRange;
use thiserror::Error;

/// Fatal, whole-run conditions raised by a concrete sheet reader before
/// the pipeline ever sees a sheet (see `SheetMissing`). Per-table and
/// per-record conditions are not here; they are [`crate::Diagnostic`]
/// values accumulated while the pipeline runs.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("sheet {0:?} was not found in the source")]
    SheetMissing(String),
}

/// The input contract the layout inference pipeline depends on. A
/// concrete reader (for example `sheetbanner-xlsx`) fulfills this
/// trait; the pipeline never reaches into a file format directly.
///
/// `Sync` is required so `sheetbanner-engine`'s `parallel` feature can
/// share one sheet across table-box workers.
pub trait SheetAdapter: Sync {
    /// `(rows, cols)`, both ≥ 0.
    fn dimensions(&self) -> (u32, u32);

    /// The raw value at a 1-based coordinate. Implementations must
    /// return the value as stored at that exact coordinate — for a
    /// cell covered by a merge but not its anchor, that is `Null`;
    /// callers that want the anchor's value resolve it themselves via
    /// the merge map.
    fn value(&self, coord: Coordinate) -> CellValue;

    /// The four border-edge styled flags at a 1-based coordinate.
    fn edges(&self, coord: Coordinate) -> BorderEdges;

    /// All merged ranges on the sheet, in no particular order.
    fn merged_ranges(&self) -> &[MergedRange];
}
