use sheetbanner_model::{Coordinate, Diagnostic, MergedRange};
use std::collections::HashMap;

/// Compiles a sheet's merged ranges into two O(1)-expected lookups:
/// covered coordinate -> anchor, and anchor -> its full
/// rectangle. A coordinate absent from the covered map is its own
/// anchor by convention; callers use [`MergeResolver::anchor_of`]
/// rather than probing the map directly so that convention always
/// holds.
pub struct MergeResolver {
    covered_to_anchor: HashMap<Coordinate, Coordinate>,
    anchor_to_range: HashMap<Coordinate, MergedRange>,
}

impl MergeResolver {
    /// Expand every range into its member coordinates. Overlapping
    /// ranges are not expected; when encountered, the last-written
    /// anchor wins and a `Diagnostic::OverlappingMerges` is recorded.
    #[must_use]
    pub fn build(ranges: &[MergedRange]) -> (Self, Vec<Diagnostic>) {
        let mut covered_to_anchor = HashMap::new();
        let mut anchor_to_range = HashMap::new();
        let mut diagnostics = Vec::new();

        for range in ranges {
            let anchor = range.anchor();
            anchor_to_range.insert(anchor, *range);
            for row in range.min_row..=range.max_row {
                for col in range.min_col..=range.max_col {
                    let coord = Coordinate::new(row, col);
                    if let Some(previous) = covered_to_anchor.insert(coord, anchor) {
                        if previous != anchor {
                            log::warn!(
                                "overlapping merges at {coord:?}: {previous:?} replaced by {anchor:?}"
                            );
                            diagnostics.push(Diagnostic::OverlappingMerges { coord, anchor });
                        }
                    }
                }
            }
        }

        (
            Self {
                covered_to_anchor,
                anchor_to_range,
            },
            diagnostics,
        )
    }

    /// The style-bearing coordinate for `coord`: its merge anchor, or
    /// itself if it isn't covered by any merge.
    #[must_use]
    pub fn anchor_of(&self, coord: Coordinate) -> Coordinate {
        self.covered_to_anchor.get(&coord).copied().unwrap_or(coord)
    }

    /// The full rectangle for an anchor coordinate, if it is in fact a
    /// merge anchor.
    #[must_use]
    pub fn range_of_anchor(&self, anchor: Coordinate) -> Option<MergedRange> {
        self.anchor_to_range.get(&anchor).copied()
    }
}
