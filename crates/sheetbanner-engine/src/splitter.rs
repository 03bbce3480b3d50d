use crate::extractor::RawTable;
use crate::merge_resolver::MergeResolver;
use sheetbanner_model::{Coordinate, SheetAdapter};

/// Stage 4: find the last inter-row boundary whose
/// ruled-column fraction meets `threshold`, and return the body-start
/// row index (1-based within the raw matrix's row count, i.e. a value
/// in `[1, H]`). Returns `None` — `HeaderSplitNotFound` — if no
/// boundary clears the threshold, or the table is too small to have an
/// inter-row boundary at all.
#[must_use]
pub fn find_split(
    raw: &RawTable,
    sheet: &dyn SheetAdapter,
    resolver: &MergeResolver,
    threshold: f64,
) -> Option<usize> {
    let height = raw.height();
    let width = raw.width();
    if height <= 1 || width == 0 {
        return None;
    }

    let mut candidate = None;
    for boundary in 0..height - 1 {
        let upper_row = raw.table_box.min_row + boundary as u32;
        let lower_row = upper_row + 1;

        let mut ruled_count = 0usize;
        for offset in 0..width {
            let col = raw.table_box.min_col + offset as u32;
            let upper_anchor = resolver.anchor_of(Coordinate::new(upper_row, col));
            let lower_anchor = resolver.anchor_of(Coordinate::new(lower_row, col));

            if upper_anchor == lower_anchor {
                // Internal to a single merged block at this column:
                // never counts as a ruled boundary.
                continue;
            }

            let upper_edges = sheet.edges(upper_anchor);
            let lower_edges = sheet.edges(lower_anchor);
            if upper_edges.bottom || lower_edges.top {
                ruled_count += 1;
            }
        }

        let fraction = ruled_count as f64 / width as f64;
        if fraction >= threshold {
            // Body starts the row after this boundary; keep scanning
            // so the *last* qualifying boundary wins.
            candidate = Some(boundary + 1);
        }
    }

    candidate
}
