use crate::merge_resolver::MergeResolver;
use fixedbitset::FixedBitSet;
use sheetbanner_model::{Coordinate, SheetAdapter, TableBox};
use std::collections::VecDeque;

/// Packs a 1-based coordinate into a single `u32` FIFO entry.
/// Spreadsheet dimensions are well under 2^16 in either axis, so 16
/// bits per axis never truncates.
fn pack(row: u32, col: u32) -> u32 {
    (row << 16) | (col & 0xFFFF)
}

fn unpack(key: u32) -> (u32, u32) {
    (key >> 16, key & 0xFFFF)
}

fn bit_index(row: u32, col: u32, cols: u32) -> usize {
    ((row - 1) * cols + (col - 1)) as usize
}

/// Stage 2: build the border heatmap, flood-fill its true
/// cells into connected components, and keep the components whose
/// bounding box clears `min_width`/`min_height`.
#[must_use]
pub fn detect_tables(
    sheet: &dyn SheetAdapter,
    resolver: &MergeResolver,
    min_width: u32,
    min_height: u32,
) -> Vec<TableBox> {
    let (rows, cols) = sheet.dimensions();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let total = (rows as usize) * (cols as usize);
    let mut heatmap = FixedBitSet::with_capacity(total);
    for row in 1..=rows {
        for col in 1..=cols {
            // A merged-block cell has no intrinsic border of its own;
            // it inherits its anchor's edges.
            let anchor = resolver.anchor_of(Coordinate::new(row, col));
            if sheet.edges(anchor).any_styled() {
                heatmap.insert(bit_index(row, col, cols));
            }
        }
    }

    let mut visited = FixedBitSet::with_capacity(total);
    let mut boxes = Vec::new();

    for row in 1..=rows {
        for col in 1..=cols {
            let idx = bit_index(row, col, cols);
            if !heatmap[idx] || visited[idx] {
                continue;
            }

            let mut queue: VecDeque<u32> = VecDeque::new();
            queue.push_back(pack(row, col));
            visited.insert(idx);

            let (mut min_row, mut max_row) = (row, row);
            let (mut min_col, mut max_col) = (col, col);

            while let Some(key) = queue.pop_front() {
                let (cur_row, cur_col) = unpack(key);
                min_row = min_row.min(cur_row);
                max_row = max_row.max(cur_row);
                min_col = min_col.min(cur_col);
                max_col = max_col.max(cur_col);

                for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                    let nr = cur_row as i64 + dr;
                    let nc = cur_col as i64 + dc;
                    if nr < 1 || nr > rows as i64 || nc < 1 || nc > cols as i64 {
                        continue;
                    }
                    let (nr, nc) = (nr as u32, nc as u32);
                    let nidx = bit_index(nr, nc, cols);
                    if heatmap[nidx] && !visited[nidx] {
                        visited.insert(nidx);
                        queue.push_back(pack(nr, nc));
                    }
                }
            }

            let table_box = TableBox {
                min_row,
                max_row,
                min_col,
                max_col,
            };
            if table_box.width() >= min_width && table_box.height() >= min_height {
                boxes.push(table_box);
            }
        }
    }

    boxes
}
