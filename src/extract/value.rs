//! Cell value and formula normalization.

use crate::error::{Error, Result};
use crate::model::{Cell, CellValue, Formula};
use crate::xlsx::{CellDataType, CellNode, FormulaNode, FormulaType, RichTextNode, SharedStrings};

/// Concatenate the text of a rich string, phonetic runs included.
pub fn join_rich_text(nodes: &[RichTextNode]) -> Result<String> {
    let mut text = String::new();
    for node in nodes {
        match node {
            RichTextNode::Text(t) | RichTextNode::Run(t) | RichTextNode::PhoneticRun(t) => {
                text.push_str(t)
            }
            RichTextNode::PhoneticProperties => {}
            RichTextNode::Other(name) => return Err(Error::UnsupportedRichTextNode(name.clone())),
        }
    }
    Ok(text)
}

/// Flatten the shared string table into plain strings, one per entry.
pub fn shared_string_table(strings: &SharedStrings) -> Result<Vec<String>> {
    strings
        .items()
        .iter()
        .map(|item| join_rich_text(item))
        .collect()
}

fn parse_index(reference: &str, kind: &'static str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidCellValue {
            reference: reference.to_string(),
            kind,
            value: raw.to_string(),
        })
}

/// Classify a cell's declared type and raw `<v>` text into a value.
pub fn normalize(reference: &str, cell: &CellNode, shared_strings: &[String]) -> Result<CellValue> {
    let raw = cell.value.as_deref();
    let blank = raw.is_none_or(str::is_empty);

    let value = match &cell.data_type {
        None
        | Some(CellDataType::SharedString)
        | Some(CellDataType::Number)
        | Some(CellDataType::Error)
        | Some(CellDataType::Boolean)
            if blank =>
        {
            CellValue::Empty
        }
        Some(CellDataType::String) if raw.is_none() => CellValue::Empty,
        Some(CellDataType::SharedString) => {
            let raw = raw.unwrap_or_default();
            let index = parse_index(reference, "shared string index", raw)? as usize;
            let text = shared_strings
                .get(index)
                .ok_or_else(|| Error::SharedStringIndexOutOfRange {
                    reference: reference.to_string(),
                    index,
                    len: shared_strings.len(),
                })?;
            CellValue::String(text.clone())
        }
        Some(CellDataType::String) => CellValue::String(raw.unwrap_or_default().to_string()),
        Some(CellDataType::InlineString) => match &cell.inline_string {
            Some(nodes) => CellValue::String(join_rich_text(nodes)?),
            None => CellValue::String(String::new()),
        },
        Some(CellDataType::Error) => CellValue::Error(raw.unwrap_or_default().to_string()),
        Some(CellDataType::Boolean) => {
            let flag = parse_index(reference, "boolean", raw.unwrap_or_default())?;
            CellValue::Boolean(flag != 0)
        }
        None | Some(CellDataType::Number) => CellValue::Number(raw.unwrap_or_default().to_string()),
        Some(CellDataType::Date) => CellValue::Date(raw.unwrap_or_default().to_string()),
        Some(CellDataType::Unknown(tag)) => {
            return Err(Error::UnsupportedCellType {
                reference: reference.to_string(),
                data_type: tag.clone(),
            })
        }
    };
    Ok(value)
}

/// Classify a formula by its type.
pub fn formula(reference: &str, node: &FormulaNode) -> Result<Formula> {
    Ok(match &node.formula_type {
        FormulaType::Normal => Formula::Plain {
            text: node.text.clone(),
        },
        FormulaType::Array => Formula::Array {
            text: node.text.clone(),
            range: node.reference.clone(),
        },
        FormulaType::Shared => Formula::Shared {
            text: node.text.clone(),
            index: node.shared_index,
            range: node.reference.clone(),
        },
        FormulaType::DataTable => Formula::DataTable {
            range: node.reference.clone(),
        },
        FormulaType::Unknown(kind) => {
            return Err(Error::UnsupportedFormulaType {
                reference: reference.to_string(),
                formula_type: kind.clone(),
            })
        }
    })
}

/// Build the output record of one cell at its canonical reference.
pub fn cell(reference: String, node: &CellNode, shared_strings: &[String]) -> Result<Cell> {
    let value = normalize(&reference, node, shared_strings)?;
    let formula = node
        .formula
        .as_ref()
        .map(|f| formula(&reference, f))
        .transpose()?;
    Ok(Cell {
        reference,
        value,
        formula,
        style: node.style_index,
    })
}
