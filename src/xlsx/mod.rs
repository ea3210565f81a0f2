//! XLSX document model.
//!
//! A thin typed layer over the package parts of an Office Open XML
//! workbook. Every part is read into closed node types, so the extraction
//! passes never inspect raw XML.
//!
//! # Example
//!
//! ```no_run
//! use xlnorm::xlsx::{SheetPart, SpreadsheetDocument};
//!
//! let doc = SpreadsheetDocument::open("spreadsheet.xlsx")?;
//!
//! for sheet in &doc.sheets {
//!     let grid = matches!(sheet.part, Some(SheetPart::Worksheet { .. }));
//!     println!("Sheet: {} (grid: {})", sheet.name, grid);
//! }
//! # Ok::<(), xlnorm::Error>(())
//! ```

mod core;
mod package;
mod shared_strings;
mod styles;
mod table;
mod theme;
mod workbook;
mod worksheet;
pub mod xml;

pub use self::core::{parse_w3c_datetime, CorePropertiesNode};
pub use package::{SheetDocument, SheetPart, SpreadsheetDocument};
pub use shared_strings::{RichTextNode, SharedStrings};
pub use styles::{
    AlignmentNode, BorderNode, BorderSideNode, ColorNode, DxfNode, FillNode, FontNode,
    NumFmtNode, PatternFillNode, StylesheetNode, Val, XfNode,
};
pub use table::TableNode;
pub use theme::{ColorScheme, ThemeColor};
pub use workbook::{
    CalcPropertiesNode, DefinedNameNode, SheetEntry, WorkbookNode, WorkbookPropertiesNode,
};
pub use worksheet::{
    CellDataType, CellNode, CfRuleChild, CfRuleNode, ColorScaleEntry, ColumnNode,
    ConditionalFormattingNode, FormulaNode, FormulaType, RowNode, SheetPropertiesNode,
    WorksheetNode,
};
