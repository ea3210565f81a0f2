//! # xlnorm
//!
//! Normalized extraction of Excel workbooks to a canonical JSON record.
//!
//! This library loads an `.xlsx` package into a typed document model, turns
//! it into a strict output record (cells, styles, tables, conditional
//! formatting, package metadata) and encodes that record as compact JSON,
//! gzipped by default.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xlnorm::{codec, extract_file};
//!
//! let book = extract_file("data.xlsx")?;
//! for sheet in &book.sheets {
//!     let cells = sheet.cells.as_ref().map_or(0, Vec::len);
//!     println!("{}: {} cells", sheet.name, cells);
//! }
//!
//! codec::write_file(&book, "data.input.json.gz", true)?;
//! # Ok::<(), xlnorm::Error>(())
//! ```
//!
//! ## Batch and service runs
//!
//! ```no_run
//! use std::path::Path;
//! use xlnorm::{batch, ExtractOptions};
//!
//! let options = ExtractOptions::new().with_verbose(true);
//! let report = batch::process_directory(
//!     Path::new("inbox"),
//!     Path::new("outbox"),
//!     &options,
//!     |_, _| {},
//! )?;
//! println!("{} workbooks, failed: {}", report.total, report.failed);
//!
//! // Or answer requests from an orchestrator:
//! xlnorm::service::run("127.0.0.1:9000", &options)?;
//! # Ok::<(), xlnorm::Error>(())
//! ```

pub mod batch;
pub mod codec;
pub mod container;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod service;
pub mod xlsx;

// Re-exports
pub use batch::{process_directory, process_file, process_workbooks, BatchReport, FileOutcome};
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use error::{Error, Result};
pub use model::{Cell, CellValue, Formula, Workbook, Worksheet, WorksheetKind};
pub use options::ExtractOptions;
pub use xlsx::SpreadsheetDocument;

use std::path::Path;

/// Load a workbook file and extract its record.
///
/// The record's origin is the file name.
///
/// # Example
///
/// ```no_run
/// let book = xlnorm::extract_file("report.xlsx")?;
/// assert_eq!(book.origin, "report.xlsx");
/// # Ok::<(), xlnorm::Error>(())
/// ```
pub fn extract_file(path: impl AsRef<Path>) -> Result<Workbook> {
    let path = path.as_ref();
    let doc = SpreadsheetDocument::open(path)?;
    let origin = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    extract::extract(&doc, &origin)
}

/// Load a workbook from bytes and extract its record.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("report.xlsx")?;
/// let book = xlnorm::extract_bytes(data, "report.xlsx")?;
/// # Ok::<(), xlnorm::Error>(())
/// ```
pub fn extract_bytes(data: Vec<u8>, origin: &str) -> Result<Workbook> {
    let doc = SpreadsheetDocument::from_bytes(data)?;
    extract::extract(&doc, origin)
}
