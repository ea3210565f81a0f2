//! Workbook part (`xl/workbook.xml`).

use super::xml::XmlElement;
use crate::error::Result;

/// `<sheet>` entry of the workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetEntry {
    pub name: String,
    /// Relationship id of the sheet part; `None` or blank when the entry has no part.
    pub rel_id: Option<String>,
}

/// `<definedName>`
#[derive(Debug, Clone, PartialEq)]
pub struct DefinedNameNode {
    pub name: String,
    pub local_sheet_id: Option<u32>,
    pub text: String,
}

/// `<calcPr>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalcPropertiesNode {
    pub ref_mode: Option<String>,
    pub full_precision: Option<bool>,
}

/// `<workbookPr>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookPropertiesNode {
    pub date1904: Option<bool>,
    pub date_compatibility: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookNode {
    pub sheets: Vec<SheetEntry>,
    pub defined_names: Vec<DefinedNameNode>,
    pub calc: Option<CalcPropertiesNode>,
    pub properties: Option<WorkbookPropertiesNode>,
    /// `conformance` attribute of the root (`strict` or `transitional`).
    pub conformance: Option<String>,
}

impl WorkbookNode {
    pub fn parse(xml: &str) -> Result<Self> {
        let root = XmlElement::parse(xml)?;

        let sheets = match root.child("sheets") {
            Some(sheets) => sheets
                .children_named("sheet")
                .map(|sheet| {
                    Ok(SheetEntry {
                        name: sheet.required_attr("name")?.to_string(),
                        rel_id: sheet.attr("id").map(str::to_string),
                    })
                })
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };

        let defined_names = match root.child("definedNames") {
            Some(names) => names
                .children_named("definedName")
                .map(|name| {
                    Ok(DefinedNameNode {
                        name: name.required_attr("name")?.to_string(),
                        local_sheet_id: name.parse_attr("localSheetId")?,
                        text: name.text.clone(),
                    })
                })
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };

        let calc = root
            .child("calcPr")
            .map(|calc| -> Result<_> {
                Ok(CalcPropertiesNode {
                    ref_mode: calc.attr("refMode").map(str::to_string),
                    full_precision: calc.bool_attr("fullPrecision")?,
                })
            })
            .transpose()?;

        let properties = root
            .child("workbookPr")
            .map(|pr| -> Result<_> {
                Ok(WorkbookPropertiesNode {
                    date1904: pr.bool_attr("date1904")?,
                    date_compatibility: pr.bool_attr("dateCompatibility")?,
                })
            })
            .transpose()?;

        Ok(Self {
            sheets,
            defined_names,
            calc,
            properties,
            conformance: root.attr("conformance").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workbook() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <workbookPr date1904="1"/>
  <sheets>
    <sheet name="Data" sheetId="1" r:id="rId1"/>
    <sheet name="Chart" sheetId="2" r:id="rId2"/>
  </sheets>
  <definedNames>
    <definedName name="_xlnm.Print_Area" localSheetId="0">Data!$A$1:$B$2</definedName>
    <definedName name="Total">Data!$C$1</definedName>
  </definedNames>
  <calcPr calcId="191029" refMode="R1C1" fullPrecision="0"/>
</workbook>"#;

        let wb = WorkbookNode::parse(xml).unwrap();
        assert_eq!(wb.sheets.len(), 2);
        assert_eq!(wb.sheets[0].name, "Data");
        assert_eq!(wb.sheets[0].rel_id.as_deref(), Some("rId1"));
        assert_eq!(
            wb.defined_names[0],
            DefinedNameNode {
                name: "_xlnm.Print_Area".to_string(),
                local_sheet_id: Some(0),
                text: "Data!$A$1:$B$2".to_string(),
            }
        );
        assert_eq!(wb.defined_names[1].local_sheet_id, None);
        let calc = wb.calc.unwrap();
        assert_eq!(calc.ref_mode.as_deref(), Some("R1C1"));
        assert_eq!(calc.full_precision, Some(false));
        assert_eq!(wb.properties.unwrap().date1904, Some(true));
        assert_eq!(wb.conformance, None);
    }

    #[test]
    fn test_strict_conformance() {
        let wb = WorkbookNode::parse(r#"<workbook conformance="strict"><sheets/></workbook>"#)
            .unwrap();
        assert_eq!(wb.conformance.as_deref(), Some("strict"));
        assert!(wb.sheets.is_empty());
        assert!(wb.calc.is_none());
    }
}
