//! Document-level records.

use super::{Border, CellXf, DifferentialFormat, Fill, Font, NumFmt, Worksheet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workbook-level defined name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinedName {
    pub name: String,
    /// The name's formula text
    #[serde(rename = "ref")]
    pub reference: String,
    /// Local sheet index, absent for workbook-scoped names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<u32>,
}

/// Workbook properties and the resolved style tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookProperties {
    pub r1c1_ref_mode: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_precision: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date1904: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_compatibility: Option<bool>,

    pub names: Vec<DefinedName>,
    pub num_fmts: Vec<NumFmt>,
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub cell_xfs: Vec<CellXf>,
    pub differential_formats: Vec<DifferentialFormat>,
}

/// Package metadata from the core properties part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    /// Last modified by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// The extracted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
    pub properties: WorkbookProperties,
    pub package_properties: PackageProperties,
    /// Source file name
    pub origin: String,
}

impl Workbook {
    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
