use sheetbanner_model::ModelError;
use thiserror::Error;

/// Whole-package conditions that abort opening or reading a workbook.
/// Per-table and per-record conditions belong to `sheetbanner-engine`'s
/// `Diagnostic`, not here.
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to open the xlsx package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error reading the xlsx package: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed XML in {part}: {source}")]
    XmlTree {
        part: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("{part} is missing required part {missing}")]
    MissingPart { part: String, missing: String },

    #[error("cell reference {0:?} is not a valid A1-style reference")]
    InvalidCellRef(String),

    #[error("shared string index {0} is out of range")]
    SharedStringOutOfRange(usize),
}
