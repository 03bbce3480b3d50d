use sheetbanner_model::{insert_path, CellValue, Diagnostic, Record, RecordNode};

/// Forward-fill `col` within `body` top-to-bottom: a row
/// below a merged attribute cell inherits the anchor's value. Applied
/// once per attribute column, not per row.
fn forward_fill_column(body: &mut [Vec<CellValue>], col: usize) {
    let mut last = CellValue::Null;
    for row in body.iter_mut() {
        if row[col].is_null() {
            row[col] = last.clone();
        } else {
            last = row[col].clone();
        }
    }
}

fn attribute_label(header_row0: &[CellValue], col: usize) -> (String, Option<Diagnostic>) {
    let raw = header_row0[col].display_string();
    if raw.is_empty() {
        (
            format!("Column_{col}"),
            Some(Diagnostic::EmptyAttributeLabel { column: col }),
        )
    } else {
        (raw, None)
    }
}

/// Stage 5.3: build one record per body row. Attribute
/// columns are forward-filled once before the row loop; data columns
/// are read from the original (non-filled) body values and merged into
/// nested maps by walking each column's header path.
#[must_use]
pub fn assemble_records(
    header: &[Vec<CellValue>],
    body: &[Vec<CellValue>],
    attribute_count: usize,
    data_paths: &[(usize, Vec<String>)],
) -> (Vec<Record>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let mut filled_body = body.to_vec();
    for col in 0..attribute_count {
        forward_fill_column(&mut filled_body, col);
    }

    let header_row0 = header.first().cloned().unwrap_or_default();
    let attribute_labels: Vec<String> = (0..attribute_count)
        .map(|col| {
            let (label, diagnostic) = attribute_label(&header_row0, col);
            if let Some(d) = diagnostic {
                diagnostics.push(d);
            }
            label
        })
        .collect();

    let mut records = Vec::with_capacity(body.len());
    for (row_idx, (filled_row, raw_row)) in filled_body.iter().zip(body.iter()).enumerate() {
        let mut record = Record::new();

        for (col, label) in attribute_labels.iter().enumerate() {
            record.insert(label.clone(), RecordNode::Leaf(filled_row[col].clone()));
        }

        let mut collided = false;
        for (col, path) in data_paths {
            let value = &raw_row[*col];
            if value.is_null() {
                continue;
            }
            if insert_path(&mut record, path, value.clone()).is_err() {
                log::warn!("path collision in row {row_idx}; record dropped");
                diagnostics.push(Diagnostic::PathCollision { row: row_idx });
                collided = true;
                break;
            }
        }

        if !collided {
            records.push(record);
        }
    }

    (records, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn attribute_values_are_forward_filled_and_data_values_are_not() {
        let header = vec![vec![text("Date"), text("Group"), CellValue::Null]];
        let body = vec![
            vec![text("2024-01"), CellValue::Int(1), CellValue::Int(2)],
            vec![CellValue::Null, CellValue::Null, CellValue::Int(3)],
        ];
        let data_paths = vec![(1, vec!["Group".to_string()])];
        let (records, diagnostics) = assemble_records(&header, &body, 1, &data_paths);
        assert!(diagnostics.is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("Date"),
            Some(&RecordNode::Leaf(text("2024-01")))
        );
        assert_eq!(
            records[1].get("Date"),
            Some(&RecordNode::Leaf(text("2024-01")))
        );
        // Second row's data column value was null -> omitted entirely,
        // not forward-filled into a nested null.
        assert!(records[1].get("Group").is_none());
    }

    #[test]
    fn null_data_cells_are_omitted_not_written_as_null_leaves() {
        let header = vec![vec![text("Key"), text("Value")]];
        let body = vec![vec![text("a"), CellValue::Null]];
        let data_paths = vec![(1, vec!["Value".to_string()])];
        let (records, _) = assemble_records(&header, &body, 1, &data_paths);
        assert!(records[0].get("Value").is_none());
    }

    #[test]
    fn empty_attribute_label_falls_back_to_column_index() {
        let header = vec![vec![CellValue::Null]];
        let body = vec![vec![text("a")]];
        let (records, diagnostics) = assemble_records(&header, &body, 1, &[]);
        assert_eq!(
            records[0].get("Column_0"),
            Some(&RecordNode::Leaf(text("a")))
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::EmptyAttributeLabel { column: 0 }]
        );
    }

    #[test]
    fn shared_path_prefixes_nest_under_one_shared_map() {
        let header = vec![vec![text("Date")]];
        let body = vec![vec![text("2024-01"), CellValue::Int(1), CellValue::Int(2)]];
        let data_paths = vec![
            (1, vec!["Group".to_string(), "x".to_string()]),
            (2, vec!["Group".to_string(), "y".to_string()]),
        ];
        let (records, diagnostics) = assemble_records(&header, &body, 1, &data_paths);
        assert!(diagnostics.is_empty());
        let group = records[0].get("Group").unwrap().as_map().unwrap();
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn a_path_collision_drops_the_whole_record() {
        let header = vec![vec![text("Key")]];
        let body = vec![vec![text("a"), CellValue::Int(1), CellValue::Int(2)]];
        let data_paths = vec![
            (1, vec!["X".to_string()]),
            (2, vec!["X".to_string(), "Y".to_string()]),
        ];
        let (records, diagnostics) = assemble_records(&header, &body, 1, &data_paths);
        assert!(records.is_empty());
        assert_eq!(diagnostics, vec![Diagnostic::PathCollision { row: 0 }]);
    }
}
