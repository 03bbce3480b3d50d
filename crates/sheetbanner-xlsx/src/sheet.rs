use crate::cell_ref::{parse_cell_ref, parse_range_ref};
use crate::error::XlsxError;
use crate::styles::Styles;
use chrono::{Duration, NaiveDate};
use quick_xml::events::Event;
use quick_xml::Reader;
use sheetbanner_model::{BorderEdges, CellValue, Coordinate, MergedRange, SheetAdapter};
use std::collections::HashMap;

/// One worksheet's cells, merges, and border edges, fully materialized
/// in memory (the `SheetAdapter` contract has no notion of lazy
/// loading, and sheets this pipeline targets are laid-out-by-hand, not
/// bulk data dumps).
#[derive(Debug)]
pub struct XlsxSheet {
    rows: u32,
    cols: u32,
    values: HashMap<Coordinate, CellValue>,
    edges: HashMap<Coordinate, BorderEdges>,
    merges: Vec<MergedRange>,
}

impl SheetAdapter for XlsxSheet {
    fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    fn value(&self, coord: Coordinate) -> CellValue {
        self.values.get(&coord).cloned().unwrap_or(CellValue::Null)
    }

    fn edges(&self, coord: Coordinate) -> BorderEdges {
        self.edges.get(&coord).copied().unwrap_or_default()
    }

    fn merged_ranges(&self) -> &[MergedRange] {
        &self.merges
    }
}

/// Excel's epoch is 1899-12-30 under the (near-universal) 1900 date
/// system, which deliberately miscounts 1900 as a leap year to stay
/// bug-compatible with Lotus 1-2-3.
fn serial_to_naive_datetime(serial: f64) -> Option<chrono::NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let fraction_secs = (serial.fract() * 86_400.0).round() as i64;
    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(fraction_secs))
}

enum PendingText {
    SharedIndex,
    Numeric,
    Formula,
    Inline,
    Boolean,
    Error,
}

struct PendingCell {
    coord: Coordinate,
    style_index: u32,
    kind: PendingText,
    text: String,
}

/// Parses one `xl/worksheets/sheetN.xml` part into an [`XlsxSheet`].
pub fn parse(
    xml: &str,
    shared_strings: &[String],
    styles: &Styles,
) -> Result<XlsxSheet, XlsxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut values = HashMap::new();
    let mut edges = HashMap::new();
    let mut merges = Vec::new();
    let mut declared_dims: Option<(Coordinate, Coordinate)> = None;

    let mut current: Option<PendingCell> = None;
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|source| XlsxError::Xml {
            part: "worksheet".to_string(),
            source,
        })?;
        match event {
            Event::Eof => break,
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"dimension" => {
                        if let Some(reference) = attr(e, b"ref") {
                            declared_dims = parse_range_ref(&reference).ok();
                        }
                    }
                    b"c" => {
                        let reference = attr(e, b"r").ok_or_else(|| XlsxError::MissingPart {
                            part: "worksheet".to_string(),
                            missing: "c/@r".to_string(),
                        })?;
                        let coord = parse_cell_ref(&reference)?;
                        let style_index: u32 =
                            attr(e, b"s").and_then(|s| s.parse().ok()).unwrap_or(0);
                        let cell_type = attr(e, b"t");
                        edges.insert(coord, styles.border_for_style(style_index).into());

                        if is_empty {
                            values.insert(coord, CellValue::Null);
                        } else {
                            let kind = match cell_type.as_deref() {
                                Some("s") => PendingText::SharedIndex,
                                Some("str") => PendingText::Formula,
                                Some("inlineStr") => PendingText::Inline,
                                Some("b") => PendingText::Boolean,
                                Some("e") => PendingText::Error,
                                _ => PendingText::Numeric,
                            };
                            current = Some(PendingCell {
                                coord,
                                style_index,
                                kind,
                                text: String::new(),
                            });
                        }
                    }
                    b"mergeCell" => {
                        if let Some(reference) = attr(e, b"ref") {
                            let (min, max) = parse_range_ref(&reference)?;
                            merges.push(MergedRange::new(min.row, min.col, max.row, max.col));
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if let Some(cell) = current.as_mut() {
                    cell.text.push_str(&e.unescape().map_err(|source| XlsxError::Xml {
                        part: "worksheet".to_string(),
                        source,
                    })?);
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"c" {
                    if let Some(cell) = current.take() {
                        let value = resolve_value(&cell, shared_strings, styles)?;
                        values.insert(cell.coord, value);
                    }
                }
            }
            _ => {}
        }
        buf.clear();
    }

    let (max_row, max_col) = match declared_dims {
        Some((_, max)) => (max.row, max.col),
        None => values.keys().chain(edges.keys()).fold((0, 0), |(mr, mc), c| {
            (mr.max(c.row), mc.max(c.col))
        }),
    };

    Ok(XlsxSheet {
        rows: max_row,
        cols: max_col,
        values,
        edges,
        merges,
    })
}

fn resolve_value(
    cell: &PendingCell,
    shared_strings: &[String],
    styles: &Styles,
) -> Result<CellValue, XlsxError> {
    if cell.text.is_empty() && !matches!(cell.kind, PendingText::Inline) {
        return Ok(CellValue::Null);
    }
    match cell.kind {
        PendingText::SharedIndex => {
            let index: usize = cell
                .text
                .parse()
                .map_err(|_| XlsxError::InvalidCellRef(cell.text.clone()))?;
            shared_strings
                .get(index)
                .cloned()
                .map(CellValue::text)
                .ok_or(XlsxError::SharedStringOutOfRange(index))
        }
        PendingText::Formula | PendingText::Inline => Ok(CellValue::text(cell.text.clone())),
        PendingText::Boolean => Ok(CellValue::Bool(cell.text.trim() == "1")),
        PendingText::Error => Ok(CellValue::text(cell.text.clone())),
        PendingText::Numeric => {
            let raw: f64 = cell
                .text
                .trim()
                .parse()
                .map_err(|_| XlsxError::InvalidCellRef(cell.text.clone()))?;
            if styles.is_date_style(cell.style_index) {
                match serial_to_naive_datetime(raw) {
                    Some(dt) => Ok(CellValue::Date(dt)),
                    None => Ok(CellValue::float(raw)),
                }
            } else if raw.fract() == 0.0 && raw.abs() < i64::MAX as f64 {
                Ok(CellValue::Int(raw as i64))
            } else {
                Ok(CellValue::float(raw))
            }
        }
    }
}

fn attr(e: &quick_xml::events::BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .map(|a| a.unescape_value().unwrap_or_default().into_owned())
}
