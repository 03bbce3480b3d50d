//! A concrete [`sheetbanner_model::SheetAdapter`] backed by a real OOXML
//! `.xlsx`/`.xlsm` package: shared strings, inline strings, numbers,
//! booleans, dates, merged cells, and border styles read straight out of
//! the package's `sheetN.xml` and `styles.xml` parts.
//!
//! Only the OOXML package format is supported; legacy `.xls` (BIFF) and
//! `.ods` are out of scope.

mod cell_ref;
mod error;
mod shared_strings;
mod sheet;
mod styles;
mod workbook;

pub use error::XlsxError;
pub use sheet::XlsxSheet;
pub use workbook::XlsxWorkbook;
