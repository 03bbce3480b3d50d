use sheetbanner_model::{CellValue, Coordinate, SheetAdapter, TableBox};

/// The rectangular slice of raw cell values at a table box:
/// `H x W`, values read at the covered coordinate rather than
/// the anchor, so non-anchor cells of a merge come back `Null`. That
/// nullness is the signal later stages use to detect vertical merge
/// spans.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub table_box: TableBox,
    pub values: Vec<Vec<CellValue>>,
}

impl RawTable {
    #[must_use]
    pub fn height(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// Rows `[0, split)`.
    #[must_use]
    pub fn header_rows(&self, split: usize) -> &[Vec<CellValue>] {
        &self.values[..split.min(self.values.len())]
    }

    /// Rows `[split, H)`.
    #[must_use]
    pub fn body_rows(&self, split: usize) -> &[Vec<CellValue>] {
        &self.values[split.min(self.values.len())..]
    }
}

/// Stage 3: read the table box's raw values into a dense matrix.
#[must_use]
pub fn extract_raw(sheet: &dyn SheetAdapter, table_box: TableBox) -> RawTable {
    let mut values = Vec::with_capacity(table_box.height() as usize);
    for row in table_box.min_row..=table_box.max_row {
        let mut row_values = Vec::with_capacity(table_box.width() as usize);
        for col in table_box.min_col..=table_box.max_col {
            row_values.push(sheet.value(Coordinate::new(row, col)));
        }
        values.push(row_values);
    }
    RawTable { table_box, values }
}
