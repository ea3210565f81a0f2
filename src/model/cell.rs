//! Cell records.
//!
//! In memory a cell is a typed value plus an optional typed formula. On the
//! wire it uses the flat short-field layout (`t`, `v`, `f`, `f_t`, `f_si`,
//! `f_ref`, `s`).

use serde::{Deserialize, Serialize};

/// Value of a cell.
///
/// Numbers and dates keep their exact source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(String),
    Date(String),
    Error(String),
    String(String),
}

impl CellValue {
    /// Wire tag of this value kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Empty => ValueKind::Empty,
            CellValue::Boolean(_) => ValueKind::Boolean,
            CellValue::Number(_) => ValueKind::Number,
            CellValue::Date(_) => ValueKind::Date,
            CellValue::Error(_) => ValueKind::Error,
            CellValue::String(_) => ValueKind::String,
        }
    }

    /// Text payload, if this kind carries one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Number(s)
            | CellValue::Date(s)
            | CellValue::Error(s)
            | CellValue::String(s) => Some(s),
            CellValue::Empty | CellValue::Boolean(_) => None,
        }
    }
}

/// Wire tag of a cell value (`t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    #[serde(rename = "z")]
    Empty,
    #[serde(rename = "b")]
    Boolean,
    #[serde(rename = "n")]
    Number,
    #[serde(rename = "d")]
    Date,
    #[serde(rename = "e")]
    Error,
    #[serde(rename = "s")]
    String,
}

/// Formula attached to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Plain {
        text: String,
    },
    Array {
        text: String,
        range: Option<String>,
    },
    Shared {
        text: String,
        index: Option<u32>,
        range: Option<String>,
    },
    /// Data-table formulas carry no text.
    DataTable {
        range: Option<String>,
    },
}

/// Wire tag of a non-plain formula (`f_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaKind {
    Array,
    Shared,
    DataTable,
}

/// One cell of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CellRecord", try_from = "CellRecord")]
pub struct Cell {
    /// Canonical A1 reference
    pub reference: String,
    pub value: CellValue,
    pub formula: Option<Formula>,
    /// Index into the workbook's cell formats
    pub style: Option<u32>,
}

impl Cell {
    pub fn new(reference: impl Into<String>, value: CellValue) -> Self {
        Self {
            reference: reference.into(),
            value,
            formula: None,
            style: None,
        }
    }

    pub fn with_formula(mut self, formula: Formula) -> Self {
        self.formula = Some(formula);
        self
    }

    pub fn with_style(mut self, style: u32) -> Self {
        self.style = Some(style);
        self
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Bool(bool),
    Text(String),
}

#[derive(Serialize, Deserialize)]
struct CellRecord {
    reference: String,
    t: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    v: Option<WireValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    f_t: Option<FormulaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    f_si: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    f_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s: Option<u32>,
}

impl From<Cell> for CellRecord {
    fn from(cell: Cell) -> Self {
        let t = cell.value.kind();
        let v = match cell.value {
            CellValue::Empty => None,
            CellValue::Boolean(b) => Some(WireValue::Bool(b)),
            CellValue::Number(s)
            | CellValue::Date(s)
            | CellValue::Error(s)
            | CellValue::String(s) => Some(WireValue::Text(s)),
        };
        let (f, f_t, f_si, f_ref) = match cell.formula {
            None => (None, None, None, None),
            Some(Formula::Plain { text }) => (Some(text), None, None, None),
            Some(Formula::Array { text, range }) => {
                (Some(text), Some(FormulaKind::Array), None, range)
            }
            Some(Formula::Shared { text, index, range }) => {
                (Some(text), Some(FormulaKind::Shared), index, range)
            }
            Some(Formula::DataTable { range }) => (None, Some(FormulaKind::DataTable), None, range),
        };
        CellRecord {
            reference: cell.reference,
            t,
            v,
            f,
            f_t,
            f_si,
            f_ref,
            s: cell.style,
        }
    }
}

impl TryFrom<CellRecord> for Cell {
    type Error = String;

    fn try_from(record: CellRecord) -> Result<Self, Self::Error> {
        let value = match (record.t, record.v) {
            (ValueKind::Empty, None) => CellValue::Empty,
            (ValueKind::Boolean, Some(WireValue::Bool(b))) => CellValue::Boolean(b),
            (ValueKind::Number, Some(WireValue::Text(s))) => CellValue::Number(s),
            (ValueKind::Date, Some(WireValue::Text(s))) => CellValue::Date(s),
            (ValueKind::Error, Some(WireValue::Text(s))) => CellValue::Error(s),
            (ValueKind::String, Some(WireValue::Text(s))) => CellValue::String(s),
            (kind, _) => {
                return Err(format!(
                    "cell {}: value does not match kind {:?}",
                    record.reference, kind
                ))
            }
        };
        let formula = match (record.f_t, record.f) {
            (None, None) => None,
            (None, Some(text)) => Some(Formula::Plain { text }),
            (Some(FormulaKind::Array), text) => Some(Formula::Array {
                text: text.unwrap_or_default(),
                range: record.f_ref,
            }),
            (Some(FormulaKind::Shared), text) => Some(Formula::Shared {
                text: text.unwrap_or_default(),
                index: record.f_si,
                range: record.f_ref,
            }),
            (Some(FormulaKind::DataTable), _) => Some(Formula::DataTable {
                range: record.f_ref,
            }),
        };
        Ok(Cell {
            reference: record.reference,
            value,
            formula,
            style: record.s,
        })
    }
}
