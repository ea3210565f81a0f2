//! Extraction and normalization passes.
//!
//! Each submodule turns one kind of document-model node into output
//! records: [`reference`] addresses, [`color`] colors, [`style`] the style
//! tables, [`conditional`] conditional formatting, [`value`] cell values,
//! and [`worksheet`] / [`workbook`] assemble whole records.

pub mod color;
pub mod conditional;
pub mod reference;
pub mod style;
pub mod value;
pub mod workbook;
pub mod worksheet;

pub use style::StyleTables;
pub use workbook::extract;
