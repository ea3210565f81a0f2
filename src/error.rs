//! Error types for the xlnorm library.

use std::io;
use thiserror::Error;

/// Result type alias for xlnorm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or extracting a workbook.
///
/// Structural variants are always fatal to the document being extracted;
/// they are never repaired.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a ZIP package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error encoding or decoding the JSON record.
    #[error("JSON error: {0}")]
    Json(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A required XML attribute is absent.
    #[error("Missing attribute {attribute} on <{element}>")]
    MissingAttribute {
        element: String,
        attribute: String,
    },

    /// An XML attribute could not be converted to its schema type.
    #[error("Invalid value {value:?} for attribute {attribute} on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// Cell address text is not a valid A1 reference.
    #[error("Invalid cell reference {0:?}")]
    InvalidAddress(String),

    /// Range text is not a valid A1 range.
    #[error("Invalid range reference {0:?}")]
    InvalidRange(String),

    /// Cell address decodes but does not re-encode to the same text.
    #[error("Cell reference {reference:?} is not canonical (expected {canonical:?})")]
    AddressRoundTripMismatch { reference: String, canonical: String },

    /// Row ordinals are not strictly increasing.
    #[error("Row {row} out of order (previous row {previous})")]
    RowOutOfOrder { row: u32, previous: u32 },

    /// Column ordinals within a row are not strictly increasing.
    #[error("Cell reference {reference:?} out of order - likely a broken file")]
    CellOutOfOrder { reference: String },

    /// Cell address names a different row from the row that contains it.
    #[error("Cell reference {reference:?} does not belong to row {row}")]
    CellRowMismatch { reference: String, row: u32 },

    /// A table declares the same column name twice.
    #[error("Table {table:?} has duplicate column name {column:?}")]
    DuplicateTableColumn { table: String, column: String },

    /// A table's column list does not match the width of its range.
    #[error("Table {table:?} declares {actual} column names for {expected} columns")]
    TableColumnCountMismatch {
        table: String,
        expected: u32,
        actual: usize,
    },

    /// Unknown cell data type tag.
    #[error("Unsupported cell type {data_type:?} at {reference}")]
    UnsupportedCellType { reference: String, data_type: String },

    /// Unknown formula type tag.
    #[error("Unsupported formula type {formula_type:?} at {reference}")]
    UnsupportedFormulaType {
        reference: String,
        formula_type: String,
    },

    /// Raw cell text does not fit the declared cell type.
    #[error("Invalid {kind} value {value:?} at {reference}")]
    InvalidCellValue {
        reference: String,
        kind: &'static str,
        value: String,
    },

    /// Shared-string index past the end of the table.
    #[error("Shared string index {index} out of range ({len} entries) at {reference}")]
    SharedStringIndexOutOfRange {
        reference: String,
        index: usize,
        len: usize,
    },

    /// Rich text contains a child element other than text runs.
    #[error("Unexpected rich text child <{0}>")]
    UnsupportedRichTextNode(String),

    /// A master cell format references another master format.
    #[error("Master cell format {index} declares a master format reference")]
    NestedMasterFormat { index: usize },

    /// An applied cell format references a missing master format.
    #[error("Master cell format {index} out of range ({len} entries)")]
    MasterFormatOutOfRange { index: u32, len: usize },

    /// An enumerated style attribute has an unknown value.
    #[error("Unsupported {kind} value {value:?}")]
    UnsupportedEnumValue { kind: &'static str, value: String },

    /// A sheet relationship targets something other than a worksheet, chart
    /// sheet or dialog sheet.
    #[error("Sheet {sheet:?} has unsupported part type {rel_type:?}")]
    UnsupportedSheetPart { sheet: String, rel_type: String },

    /// An error raised while extracting one worksheet.
    #[error("Worksheet {sheet:?}: {source}")]
    Worksheet {
        sheet: String,
        #[source]
        source: Box<Error>,
    },

    /// Malformed service request.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl Error {
    /// Attach a sheet name to an error raised inside that sheet.
    pub fn in_sheet(self, sheet: &str) -> Self {
        Error::Worksheet {
            sheet: sheet.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
