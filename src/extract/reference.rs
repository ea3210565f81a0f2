//! A1-style cell reference codec.
//!
//! Columns are bijective base-26 (`A` = 1, `Z` = 26, `AA` = 27), rows are
//! 1-based decimal. Only the canonical form is accepted: uppercase letters,
//! no `$` markers.

use crate::error::{Error, Result};

/// Decode `"B12"` into `(12, 2)`.
pub fn decode(text: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidAddress(text.to_string());
    let bytes = text.as_bytes();

    let letters = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
    let digits = bytes[letters..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if letters == 0 || digits == 0 || letters + digits != bytes.len() {
        return Err(invalid());
    }

    let mut col: u32 = 0;
    for &b in &bytes[..letters] {
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(u32::from(b - b'A') + 1))
            .ok_or_else(invalid)?;
    }

    let mut row: u32 = 0;
    for &b in &bytes[letters..] {
        row = row
            .checked_mul(10)
            .and_then(|r| r.checked_add(u32::from(b - b'0')))
            .ok_or_else(invalid)?;
    }

    if row < 1 {
        return Err(invalid());
    }
    Ok((row, col))
}

/// Column letters for a 1-based column number.
pub fn column_name(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Encode `(row, col)` as A1 text. Both must be at least 1.
pub fn encode(row: u32, col: u32) -> String {
    format!("{}{}", column_name(col), row)
}

/// A rectangular range: top-left origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRef {
    pub row: u32,
    pub col: u32,
    pub rows: u32,
    pub cols: u32,
}

/// Decode `"A1:C3"` (or a single cell `"A1"`) into a [`RangeRef`].
pub fn decode_range(text: &str) -> Result<RangeRef> {
    let (start, end) = match text.split_once(':') {
        Some((start, end)) => (decode(start)?, decode(end)?),
        None => {
            let cell = decode(text)?;
            (cell, cell)
        }
    };
    if end.0 < start.0 || end.1 < start.1 {
        return Err(Error::InvalidRange(text.to_string()));
    }
    Ok(RangeRef {
        row: start.0,
        col: start.1,
        rows: end.0 - start.0 + 1,
        cols: end.1 - start.1 + 1,
    })
}
