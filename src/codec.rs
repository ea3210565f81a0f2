//! Canonical encoding of workbook records.
//!
//! A record is encoded as compact JSON, optionally wrapped in a gzip stream.
//! Decoding sniffs the gzip magic so either form can be read back.

use crate::error::Result;
use crate::model::Workbook;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Leading bytes of a gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Check if data starts with the gzip magic bytes.
pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[..2] == GZIP_MAGIC
}

/// Write the encoding of `book` to a writer.
pub fn write_to<W: Write>(book: &Workbook, writer: W, gzip: bool) -> Result<()> {
    if gzip {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        serde_json::to_writer(&mut encoder, book)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = writer;
        serde_json::to_writer(&mut writer, book)?;
        writer.flush()?;
    }
    Ok(())
}

/// Encode `book` into bytes.
pub fn encode(book: &Workbook, gzip: bool) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_to(book, &mut out, gzip)?;
    Ok(out)
}

/// Encode `book` into a file, creating or truncating it.
pub fn write_file(book: &Workbook, path: impl AsRef<Path>, gzip: bool) -> Result<()> {
    let file = File::create(path)?;
    write_to(book, BufWriter::new(file), gzip)
}

/// Decode a record from plain or gzipped JSON.
pub fn decode(data: &[u8]) -> Result<Workbook> {
    if is_gzip(data) {
        let mut json = Vec::new();
        GzDecoder::new(data).read_to_end(&mut json)?;
        Ok(serde_json::from_slice(&json)?)
    } else {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, CellValue, Formula, Worksheet};

    fn sample() -> Workbook {
        let mut sheet = Worksheet::name_only("Sheet1");
        sheet.cells = Some(vec![
            Cell::new("A1", CellValue::Number("1.5".to_string())),
            Cell::new("B1", CellValue::Boolean(true)).with_formula(Formula::Plain {
                text: "TRUE()".to_string(),
            }),
        ]);
        Workbook {
            sheets: vec![sheet],
            origin: "sample.xlsx".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_is_compact_json() {
        let bytes = encode(&sample(), false).unwrap();
        assert!(!is_gzip(&bytes));
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\"sheets\":[{\"name\":\"Sheet1\""));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_gzip_round_trip() {
        let book = sample();
        let bytes = encode(&book, true).unwrap();
        assert!(is_gzip(&bytes));
        assert_eq!(decode(&bytes).unwrap(), book);

        let plain = encode(&book, false).unwrap();
        assert_eq!(decode(&plain).unwrap(), book);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode(b"not json"),
            Err(crate::error::Error::Json(_))
        ));
        assert!(decode(&[0x1F, 0x8B, 0x00]).is_err());
    }
}
