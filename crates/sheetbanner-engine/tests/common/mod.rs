use sheetbanner_model::{BorderEdges, CellValue, Coordinate, MergedRange, SheetAdapter};
use std::collections::HashMap;

/// A fully in-memory sheet for exercising the pipeline against
/// hand-built boundary cases, without needing a real `.xlsx` package.
#[derive(Default)]
pub struct InMemorySheet {
    rows: u32,
    cols: u32,
    values: HashMap<(u32, u32), CellValue>,
    edges: HashMap<(u32, u32), BorderEdges>,
    merges: Vec<MergedRange>,
}

impl InMemorySheet {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn set(&mut self, row: u32, col: u32, value: CellValue) -> &mut Self {
        self.values.insert((row, col), value);
        self
    }

    pub fn edge(&mut self, row: u32, col: u32, f: impl FnOnce(&mut BorderEdges)) -> &mut Self {
        let entry = self.edges.entry((row, col)).or_default();
        f(entry);
        self
    }

    /// Gives every cell in `[min_row..=max_row] x [min_col..=max_col]`
    /// a styled left edge, which is enough to join them into one
    /// bordered blob for table detection without influencing the
    /// splitter (which only inspects top/bottom edges).
    pub fn border_block(&mut self, min_row: u32, max_row: u32, min_col: u32, max_col: u32) -> &mut Self {
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                self.edge(row, col, |e| e.left = true);
            }
        }
        self
    }

    pub fn merge(&mut self, min_row: u32, min_col: u32, max_row: u32, max_col: u32) -> &mut Self {
        self.merges.push(MergedRange::new(min_row, min_col, max_row, max_col));
        self
    }
}

impl SheetAdapter for InMemorySheet {
    fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    fn value(&self, coord: Coordinate) -> CellValue {
        self.values
            .get(&(coord.row, coord.col))
            .cloned()
            .unwrap_or(CellValue::Null)
    }

    fn edges(&self, coord: Coordinate) -> BorderEdges {
        self.edges.get(&(coord.row, coord.col)).copied().unwrap_or_default()
    }

    fn merged_ranges(&self) -> &[MergedRange] {
        &self.merges
    }
}
