//! Normalized output records.
//!
//! These are the value types the extraction passes produce and the codec
//! serializes. Field names serialize in lower camel case and absent optional
//! fields are omitted.

mod cell;
mod conditional;
mod document;
mod style;
mod worksheet;

pub use cell::*;
pub use conditional::*;
pub use document::*;
pub use style::*;
pub use worksheet::*;
