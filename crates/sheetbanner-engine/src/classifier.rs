use sheetbanner_model::{CellValue, Diagnostic};

/// The outcome of stage 5's column partition: attribute
/// columns are always the contiguous prefix `[0, k)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub attribute_count: usize,
}

impl ColumnRoles {
    #[must_use]
    pub fn data_columns(&self, width: usize) -> std::ops::Range<usize> {
        self.attribute_count..width
    }
}

fn column(matrix: &[Vec<CellValue>], col: usize) -> impl Iterator<Item = &CellValue> {
    matrix.iter().map(move |row| &row[col])
}

/// (H) Header shape: ignoring row 0, the header tail of this column is
/// entirely null.
fn header_shape_qualifies(header: &[Vec<CellValue>], col: usize) -> bool {
    header.len() <= 1 || header[1..].iter().all(|row| row[col].is_null())
}

/// (D) Body shape: text-like values that also carry both nulls and
/// non-nulls (a vertically merged group-label column).
fn body_shape_qualifies(body: &[Vec<CellValue>], col: usize) -> bool {
    let mut has_null = false;
    let mut has_nonnull = false;
    let mut text_like = false;
    for value in column(body, col) {
        if value.is_null() {
            has_null = true;
        } else {
            has_nonnull = true;
            if !value.is_numeric() {
                text_like = true;
            }
        }
    }
    text_like && has_null && has_nonnull
}

/// Stage 5.1: partition columns into the attribute prefix and the
/// data suffix.
#[must_use]
pub fn classify_columns(header: &[Vec<CellValue>], body: &[Vec<CellValue>]) -> ColumnRoles {
    let width = header.first().map_or(0, Vec::len);

    // Single-row headers cannot distinguish columns by shape; the
    // convention assigns the sole leftmost column as the row key.
    if header.len() <= 1 {
        return ColumnRoles {
            attribute_count: width.min(1),
        };
    }

    let mut attribute_count = 0;
    for col in 0..width {
        if header_shape_qualifies(header, col) || body_shape_qualifies(body, col) {
            attribute_count += 1;
        } else {
            break;
        }
    }
    ColumnRoles { attribute_count }
}

/// Forward-fill `values` top-to-bottom: each `Null` takes on the last non-null value seen. Applying this
/// twice is a no-op, since the second pass sees no remaining nulls to
/// replace.
fn forward_fill(values: &mut [CellValue]) {
    let mut last = CellValue::Null;
    for value in values.iter_mut() {
        if value.is_null() {
            *value = last.clone();
        } else {
            last = value.clone();
        }
    }
}

/// Stage 5.2: for each data column, forward-fill the
/// header matrix horizontally then vertically, then read the column
/// top-to-bottom collecting non-empty, non-repeated segments.
///
/// Returns one path per data column index in `data_cols`, in the same
/// order, skipping (and reporting) any column whose path comes out
/// empty.
#[must_use]
pub fn header_paths(
    header: &[Vec<CellValue>],
    data_cols: std::ops::Range<usize>,
) -> (Vec<(usize, Vec<String>)>, Vec<Diagnostic>) {
    let height = header.len();
    let width = header.first().map_or(0, Vec::len);
    let mut filled = header.to_vec();

    // Horizontal fill first: propagate a wide banner's label rightward
    // across the cells merging absorbed into it.
    for row in filled.iter_mut() {
        let mut last = CellValue::Null;
        for cell in row.iter_mut() {
            if cell.is_null() {
                *cell = last.clone();
            } else {
                last = cell.clone();
            }
        }
    }

    // Then vertical fill: propagate a tall sub-group label downward.
    for col in 0..width {
        let mut column_values: Vec<CellValue> =
            (0..height).map(|row| filled[row][col].clone()).collect();
        forward_fill(&mut column_values);
        for (row, value) in column_values.into_iter().enumerate() {
            filled[row][col] = value;
        }
    }

    let mut paths = Vec::new();
    let mut diagnostics = Vec::new();
    for col in data_cols {
        let mut path = Vec::new();
        let mut last_segment: Option<String> = None;
        for row in 0..height {
            let cell = &filled[row][col];
            if cell.is_null() {
                continue;
            }
            let segment = cell.display_string();
            if segment.is_empty() {
                continue;
            }
            if last_segment.as_deref() == Some(segment.as_str()) {
                continue;
            }
            last_segment = Some(segment.clone());
            path.push(segment);
        }
        if path.is_empty() {
            diagnostics.push(Diagnostic::EmptyHeaderPath { column: col });
        } else {
            paths.push((col, path));
        }
    }

    (paths, diagnostics)
}
