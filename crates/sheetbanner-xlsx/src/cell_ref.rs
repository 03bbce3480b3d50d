use crate::error::XlsxError;
use sheetbanner_model::Coordinate;

/// Parses an A1-style cell reference (e.g. `"C7"`) into a 1-based
/// [`Coordinate`]. The row digits and column letters are read in a
/// single pass since OOXML always writes letters before digits.
pub fn parse_cell_ref(reference: &str) -> Result<Coordinate, XlsxError> {
    let mut col = 0u32;
    let mut row_digits = String::new();
    let mut seen_digit = false;

    for ch in reference.chars() {
        if ch.is_ascii_alphabetic() {
            if seen_digit {
                return Err(XlsxError::InvalidCellRef(reference.to_string()));
            }
            col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        } else if ch.is_ascii_digit() {
            seen_digit = true;
            row_digits.push(ch);
        } else {
            return Err(XlsxError::InvalidCellRef(reference.to_string()));
        }
    }

    let row: u32 = row_digits
        .parse()
        .map_err(|_| XlsxError::InvalidCellRef(reference.to_string()))?;

    if col == 0 || row == 0 {
        return Err(XlsxError::InvalidCellRef(reference.to_string()));
    }

    Ok(Coordinate::new(row, col))
}

/// Parses the `ref` attribute of a `<mergeCell>` or `<dimension>`
/// element (`"A1:C4"`) into its two corners.
pub fn parse_range_ref(reference: &str) -> Result<(Coordinate, Coordinate), XlsxError> {
    match reference.split_once(':') {
        Some((start, end)) => Ok((parse_cell_ref(start)?, parse_cell_ref(end)?)),
        None => {
            let single = parse_cell_ref(reference)?;
            Ok((single, single))
        }
    }
}
