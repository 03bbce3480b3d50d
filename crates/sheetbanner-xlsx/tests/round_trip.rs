use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use sheetbanner_engine::run;
use sheetbanner_model::{CellValue, PipelineConfig, RecordNode};
use sheetbanner_xlsx::XlsxWorkbook;

/// A real `.xlsx` package, built with `rust_xlsxwriter` and read back
/// through `XlsxWorkbook`, exercises the whole package format layer
/// (zip, shared strings, styles.xml borders) end to end through the
/// pipeline, the same way an integration test against a real file on
/// disk would.
#[test]
fn a_bordered_two_by_two_block_round_trips_into_one_record() {
    let mut workbook = Workbook::new();
    let boxed = Format::new().set_border(FormatBorder::Thin);
    {
        let sheet = workbook.add_worksheet();
        sheet.write_string_with_format(0, 0, "K1", &boxed).unwrap();
        sheet.write_string_with_format(0, 1, "K2", &boxed).unwrap();
        sheet.write_string_with_format(1, 0, "v1", &boxed).unwrap();
        sheet.write_string_with_format(1, 1, "v2", &boxed).unwrap();
    }
    let bytes = workbook.save_to_buffer().expect("workbook serializes");

    let mut package = XlsxWorkbook::from_bytes(bytes).expect("package opens");
    let sheet_name = package.sheet_names()[0].to_string();
    let sheet = package.sheet(&sheet_name).expect("sheet parses");

    let output = run(&sheet, PipelineConfig::default());
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.tables.len(), 1);

    let records = &output.tables[0].records;
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("K1"),
        Some(&RecordNode::Leaf(CellValue::text("v1")))
    );
    assert_eq!(
        records[0].get("K2"),
        Some(&RecordNode::Leaf(CellValue::text("v2")))
    );
}

#[test]
fn sheet_lookup_by_an_unknown_name_reports_sheet_missing() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().expect("workbook serializes");

    let mut package = XlsxWorkbook::from_bytes(bytes).expect("package opens");
    let err = package.sheet("DoesNotExist").unwrap_err();
    assert!(matches!(
        err,
        sheetbanner_xlsx::XlsxError::Model(sheetbanner_model::ModelError::SheetMissing(_))
    ));
}
