use crate::coordinate::Coordinate;
use thiserror::Error;

/// A recorded condition that does not abort the whole run.
///
/// Warnings are informational; the "fatal per-table"/"fatal per-record"
/// variants mean the affected table or record is dropped from the
/// output but the pipeline continues with everything else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("merged ranges at {coord:?} overlap; last-written anchor {anchor:?} wins")]
    OverlappingMerges { coord: Coordinate, anchor: Coordinate },

    #[error("table at rows {min_row}..={max_row} has no header/body boundary meeting the threshold; table skipped")]
    HeaderSplitNotFound { min_row: u32, max_row: u32 },

    #[error("data column {column} produced an empty header path; column omitted from records")]
    EmptyHeaderPath { column: usize },

    #[error("attribute column {column} has an empty or non-string row-0 label; using Column_{column} instead")]
    EmptyAttributeLabel { column: usize },

    #[error("row {row} has a header-path collision (scalar vs. nested map); record dropped")]
    PathCollision { row: usize },

    #[error("border_threshold {requested} is out of [0, 1]; clamped to {clamped}")]
    ThresholdOutOfRange { requested: f64, clamped: f64 },
}
