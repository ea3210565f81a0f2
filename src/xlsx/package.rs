//! Loading a whole spreadsheet package into typed nodes.

use super::core::CorePropertiesNode;
use super::shared_strings::SharedStrings;
use super::styles::StylesheetNode;
use super::table::TableNode;
use super::theme::ColorScheme;
use super::workbook::WorkbookNode;
use super::worksheet::WorksheetNode;
use crate::container::{OoxmlContainer, Relationships};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_WORKBOOK_PATH: &str = "xl/workbook.xml";
const DEFAULT_CORE_PATH: &str = "docProps/core.xml";

/// The part a workbook sheet entry points to.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetPart {
    Worksheet {
        nodes: Vec<WorksheetNode>,
        /// Table parts keyed by the relationship id used in `<tablePart>`.
        tables: HashMap<String, TableNode>,
    },
    Chartsheet,
    Dialogsheet,
    /// Any other relationship type, by its type URI.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetDocument {
    pub name: String,
    /// `None` when the workbook entry carries a blank relationship id.
    pub part: Option<SheetPart>,
}

/// A spreadsheet package materialized as typed nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetDocument {
    pub workbook: WorkbookNode,
    pub sheets: Vec<SheetDocument>,
    pub shared_strings: SharedStrings,
    pub styles: StylesheetNode,
    pub color_scheme: Option<ColorScheme>,
    pub core_properties: CorePropertiesNode,
}

impl SpreadsheetDocument {
    /// Open and load a package from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_container(&OoxmlContainer::open(path)?)
    }

    /// Load a package from its bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_container(&OoxmlContainer::from_bytes(data)?)
    }

    pub fn from_container(container: &OoxmlContainer) -> Result<Self> {
        let package_rels = container.read_package_relationships()?;

        let workbook_path = package_rels
            .first_of_kind("officeDocument")
            .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
            .unwrap_or_else(|| DEFAULT_WORKBOOK_PATH.to_string());
        let workbook = WorkbookNode::parse(&container.read_xml(&workbook_path)?)?;
        let workbook_rels = container.read_relationships(&workbook_path)?;

        let part_xml = |kind: &str| -> Result<Option<String>> {
            match workbook_rels.first_of_kind(kind) {
                Some(rel) => container
                    .read_xml(&OoxmlContainer::resolve_path(&workbook_path, &rel.target))
                    .map(Some),
                None => Ok(None),
            }
        };

        let shared_strings = match part_xml("sharedStrings")? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::default(),
        };
        let styles = match part_xml("styles")? {
            Some(xml) => StylesheetNode::parse(&xml)?,
            None => StylesheetNode::default(),
        };
        let color_scheme = match part_xml("theme")? {
            Some(xml) => ColorScheme::parse(&xml)?,
            None => None,
        };

        let mut sheets = Vec::with_capacity(workbook.sheets.len());
        for entry in &workbook.sheets {
            let part = match entry.rel_id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => Some(
                    Self::load_sheet(container, &workbook_path, &workbook_rels, id)
                        .map_err(|e| e.in_sheet(&entry.name))?,
                ),
                _ => None,
            };
            sheets.push(SheetDocument {
                name: entry.name.clone(),
                part,
            });
        }

        let core_path = package_rels
            .first_of_kind("core-properties")
            .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
            .unwrap_or_else(|| DEFAULT_CORE_PATH.to_string());
        let core_properties = if container.exists(&core_path) {
            CorePropertiesNode::parse(&container.read_xml(&core_path)?)?
        } else {
            CorePropertiesNode::default()
        };

        Ok(Self {
            workbook,
            sheets,
            shared_strings,
            styles,
            color_scheme,
            core_properties,
        })
    }

    fn load_sheet(
        container: &OoxmlContainer,
        workbook_path: &str,
        workbook_rels: &Relationships,
        rel_id: &str,
    ) -> Result<SheetPart> {
        let rel = workbook_rels
            .get(rel_id)
            .ok_or_else(|| Error::MissingComponent(format!("relationship {}", rel_id)))?;

        if rel.is_kind("chartsheet") {
            return Ok(SheetPart::Chartsheet);
        }
        if rel.is_kind("dialogsheet") {
            return Ok(SheetPart::Dialogsheet);
        }
        if !rel.is_kind("worksheet") {
            return Ok(SheetPart::Unsupported(rel.rel_type.clone()));
        }

        let sheet_path = OoxmlContainer::resolve_path(workbook_path, &rel.target);
        let nodes = WorksheetNode::parse_all(&container.read_xml(&sheet_path)?)?;
        let sheet_rels = container.read_relationships(&sheet_path)?;

        let mut tables = HashMap::new();
        for node in &nodes {
            let WorksheetNode::TableParts(ids) = node else {
                continue;
            };
            for id in ids {
                let table_rel = sheet_rels
                    .get(id)
                    .ok_or_else(|| Error::MissingComponent(format!("relationship {}", id)))?;
                if !table_rel.is_kind("table") {
                    continue;
                }
                let table_path = OoxmlContainer::resolve_path(&sheet_path, &table_rel.target);
                let table = TableNode::parse(&container.read_xml(&table_path)?)?;
                tables.insert(id.clone(), table);
            }
        }

        Ok(SheetPart::Worksheet { nodes, tables })
    }
}
