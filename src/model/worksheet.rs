//! Worksheet records.

use super::{Cell, ConditionalFormatting};
use serde::{Deserialize, Serialize};

/// Kind of a non-grid sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorksheetKind {
    Chart,
    Dialog,
}

/// A row that is hidden or has an explicit height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 1-based row number
    pub number: u32,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A column range, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub min: u32,
    pub max: u32,
}

/// A table defined on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    /// Full table range, header and totals rows included
    pub range: String,
    pub has_headers_row: bool,
    pub has_totals_row: bool,
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeCell {
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Sheet-level flags and defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_filters: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_entry: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_evaluation: Option<bool>,

    /// Height of rows without an explicit height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_row_height: Option<f64>,

    /// Width of columns without an explicit width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_col_width: Option<f64>,
}

/// One sheet of the workbook.
///
/// Grid sheets carry `cells` and `properties`; chart and dialog sheets only
/// carry their kind; sheets over the cell ceiling carry only their name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<WorksheetKind>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<Cell>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<Vec<Column>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Table>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_cells: Option<Vec<MergeCell>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<WorksheetProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional_formatting: Option<Vec<ConditionalFormatting>>,
}

impl Worksheet {
    /// A sheet record with nothing but its name.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A chart or dialog sheet.
    pub fn of_kind(name: impl Into<String>, kind: WorksheetKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::name_only(name)
        }
    }

    /// Whether all grid content is absent.
    pub fn is_name_only(&self) -> bool {
        *self == Self::name_only(self.name.clone())
    }
}
