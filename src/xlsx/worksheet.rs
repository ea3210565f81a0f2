//! Worksheet part nodes.
//!
//! Each top-level child of `<worksheet>` becomes one [`WorksheetNode`]
//! variant. Children that carry no information for extraction are kept as
//! [`WorksheetNode::Other`] so callers can skip them explicitly.

use super::shared_strings::RichTextNode;
use super::xml::XmlElement;
use crate::error::Result;

/// Declared cell type (`t` attribute of `<c>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDataType {
    Boolean,
    Date,
    Error,
    InlineString,
    Number,
    SharedString,
    String,
    Unknown(String),
}

impl CellDataType {
    pub fn from_xml(value: &str) -> Self {
        match value {
            "b" => CellDataType::Boolean,
            "d" => CellDataType::Date,
            "e" => CellDataType::Error,
            "inlineStr" => CellDataType::InlineString,
            "n" => CellDataType::Number,
            "s" => CellDataType::SharedString,
            "str" => CellDataType::String,
            other => CellDataType::Unknown(other.to_string()),
        }
    }
}

/// Formula type (`t` attribute of `<f>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaType {
    Normal,
    Array,
    Shared,
    DataTable,
    Unknown(String),
}

impl FormulaType {
    pub fn from_xml(value: &str) -> Self {
        match value {
            "normal" => FormulaType::Normal,
            "array" => FormulaType::Array,
            "shared" => FormulaType::Shared,
            "dataTable" => FormulaType::DataTable,
            other => FormulaType::Unknown(other.to_string()),
        }
    }
}

/// `<f>`
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaNode {
    pub formula_type: FormulaType,
    pub reference: Option<String>,
    pub shared_index: Option<u32>,
    pub text: String,
}

impl FormulaNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            formula_type: el
                .attr("t")
                .map(FormulaType::from_xml)
                .unwrap_or(FormulaType::Normal),
            reference: el.attr("ref").map(str::to_string),
            shared_index: el.parse_attr("si")?,
            text: el.text.clone(),
        })
    }
}

/// `<c>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellNode {
    pub reference: Option<String>,
    pub style_index: Option<u32>,
    pub data_type: Option<CellDataType>,
    /// Text of `<v>`, `None` when the element is absent.
    pub value: Option<String>,
    pub formula: Option<FormulaNode>,
    /// Children of `<is>`, `None` when the element is absent.
    pub inline_string: Option<Vec<RichTextNode>>,
}

impl CellNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            reference: el.attr("r").map(str::to_string),
            style_index: el.parse_attr("s")?,
            data_type: el.attr("t").map(CellDataType::from_xml),
            value: el.child("v").map(|v| v.text.clone()),
            formula: el.child("f").map(FormulaNode::from_element).transpose()?,
            inline_string: el.child("is").map(RichTextNode::list),
        })
    }
}

/// `<row>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowNode {
    pub index: Option<u32>,
    pub hidden: Option<bool>,
    pub height: Option<f64>,
    pub cells: Vec<CellNode>,
}

impl RowNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            index: el.parse_attr("r")?,
            hidden: el.bool_attr("hidden")?,
            height: el.parse_attr("ht")?,
            cells: el
                .children_named("c")
                .map(CellNode::from_element)
                .collect::<Result<_>>()?,
        })
    }
}

/// `<col>`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNode {
    pub min: u32,
    pub max: u32,
    pub width: Option<f64>,
    pub hidden: Option<bool>,
}

/// `<sheetPr>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetPropertiesNode {
    pub filter_mode: Option<bool>,
    pub transition_evaluation: Option<bool>,
    pub transition_entry: Option<bool>,
}

/// One stop of a `<colorScale>`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScaleEntry {
    /// `<cfvo type=".." val=".."/>`
    Value {
        value_type: Option<String>,
        val: Option<String>,
    },
    /// `<color rgb=".."/>`
    Color { rgb: Option<String> },
    Other(String),
}

/// Child of a `<cfRule>`.
#[derive(Debug, Clone, PartialEq)]
pub enum CfRuleChild {
    Formula(String),
    ColorScale(Vec<ColorScaleEntry>),
    Other(String),
}

impl CfRuleChild {
    fn from_element(el: &XmlElement) -> Self {
        match el.name.as_str() {
            "formula" => CfRuleChild::Formula(el.text.clone()),
            "colorScale" => CfRuleChild::ColorScale(
                el.children
                    .iter()
                    .map(|stop| match stop.name.as_str() {
                        "cfvo" => ColorScaleEntry::Value {
                            value_type: stop.attr("type").map(str::to_string),
                            val: stop.attr("val").map(str::to_string),
                        },
                        "color" => ColorScaleEntry::Color {
                            rgb: stop.attr("rgb").map(str::to_string),
                        },
                        other => ColorScaleEntry::Other(other.to_string()),
                    })
                    .collect(),
            ),
            other => CfRuleChild::Other(other.to_string()),
        }
    }
}

/// `<cfRule>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CfRuleNode {
    pub rule_type: Option<String>,
    pub operator: Option<String>,
    pub text: Option<String>,
    pub time_period: Option<String>,
    pub dxf_id: Option<u32>,
    pub priority: Option<i32>,
    pub rank: Option<u32>,
    pub above_average: Option<bool>,
    pub bottom: Option<bool>,
    pub equal_average: Option<bool>,
    pub percent: Option<bool>,
    pub children: Vec<CfRuleChild>,
}

impl CfRuleNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            rule_type: el.attr("type").map(str::to_string),
            operator: el.attr("operator").map(str::to_string),
            text: el.attr("text").map(str::to_string),
            time_period: el.attr("timePeriod").map(str::to_string),
            dxf_id: el.parse_attr("dxfId")?,
            priority: el.parse_attr("priority")?,
            rank: el.parse_attr("rank")?,
            above_average: el.bool_attr("aboveAverage")?,
            bottom: el.bool_attr("bottom")?,
            equal_average: el.bool_attr("equalAverage")?,
            percent: el.bool_attr("percent")?,
            children: el.children.iter().map(CfRuleChild::from_element).collect(),
        })
    }
}

/// `<conditionalFormatting>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalFormattingNode {
    pub sqref: String,
    pub rules: Vec<CfRuleNode>,
}

/// Top-level child of a worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum WorksheetNode {
    SheetProperties(SheetPropertiesNode),
    SheetFormatProperties {
        default_row_height: Option<f64>,
        default_col_width: Option<f64>,
    },
    SheetData(Vec<RowNode>),
    Columns(Vec<ColumnNode>),
    AutoFilter {
        has_children: bool,
    },
    /// Relationship ids of `<tablePart>` entries.
    TableParts(Vec<String>),
    /// `ref` of each `<mergeCell>`.
    MergeCells(Vec<String>),
    ConditionalFormatting(ConditionalFormattingNode),
    Other(String),
}

impl WorksheetNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        let node = match el.name.as_str() {
            "sheetPr" => WorksheetNode::SheetProperties(SheetPropertiesNode {
                filter_mode: el.bool_attr("filterMode")?,
                transition_evaluation: el.bool_attr("transitionEvaluation")?,
                transition_entry: el.bool_attr("transitionEntry")?,
            }),
            "sheetFormatPr" => WorksheetNode::SheetFormatProperties {
                default_row_height: el.parse_attr("defaultRowHeight")?,
                default_col_width: el.parse_attr("defaultColWidth")?,
            },
            "sheetData" => WorksheetNode::SheetData(
                el.children_named("row")
                    .map(RowNode::from_element)
                    .collect::<Result<_>>()?,
            ),
            "cols" => WorksheetNode::Columns(
                el.children_named("col")
                    .map(|col| {
                        Ok(ColumnNode {
                            min: col.parse_required_attr("min")?,
                            max: col.parse_required_attr("max")?,
                            width: col.parse_attr("width")?,
                            hidden: col.bool_attr("hidden")?,
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
            "autoFilter" => WorksheetNode::AutoFilter {
                has_children: !el.children.is_empty(),
            },
            "tableParts" => WorksheetNode::TableParts(
                el.children_named("tablePart")
                    .map(|part| part.required_attr("id").map(str::to_string))
                    .collect::<Result<_>>()?,
            ),
            "mergeCells" => WorksheetNode::MergeCells(
                el.children_named("mergeCell")
                    .map(|cell| cell.required_attr("ref").map(str::to_string))
                    .collect::<Result<_>>()?,
            ),
            "conditionalFormatting" => {
                WorksheetNode::ConditionalFormatting(ConditionalFormattingNode {
                    sqref: el.attr("sqref").unwrap_or_default().to_string(),
                    rules: el
                        .children_named("cfRule")
                        .map(CfRuleNode::from_element)
                        .collect::<Result<_>>()?,
                })
            }
            other => WorksheetNode::Other(other.to_string()),
        };
        Ok(node)
    }

    /// Parse a worksheet part into its top-level nodes, in document order.
    pub fn parse_all(xml: &str) -> Result<Vec<WorksheetNode>> {
        let root = XmlElement::parse(xml)?;
        root.children.iter().map(Self::from_element).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
           xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheetPr filterMode="1"/>
  <dimension ref="A1:B2"/>
  <sheetFormatPr defaultRowHeight="15" defaultColWidth="9.5"/>
  <cols><col min="1" max="2" width="12.5" hidden="1" customWidth="1"/></cols>
  <sheetData>
    <row r="1" ht="20" customHeight="1">
      <c r="A1" s="1" t="s"><v>0</v></c>
      <c t="inlineStr"><is><t>inline</t></is></c>
    </row>
    <row hidden="1">
      <c r="A2"><f t="shared" ref="A2:A3" si="0">B2*2</f><v>4</v></c>
    </row>
  </sheetData>
  <autoFilter ref="A1:B2"/>
  <mergeCells count="1"><mergeCell ref="A1:B1"/></mergeCells>
  <conditionalFormatting sqref="A1:A10">
    <cfRule type="colorScale" priority="2">
      <colorScale>
        <cfvo type="min"/><cfvo type="num" val="5"/>
        <color rgb="FFF8696B"/><color theme="4"/>
      </colorScale>
    </cfRule>
    <cfRule type="cellIs" dxfId="0" priority="1" operator="greaterThan"><formula>10</formula></cfRule>
  </conditionalFormatting>
  <pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>
  <tableParts count="1"><tablePart r:id="rId1"/></tableParts>
</worksheet>"#;

    #[test]
    fn test_parse_worksheet_nodes() {
        let nodes = WorksheetNode::parse_all(SHEET).unwrap();
        assert_eq!(nodes.len(), 10);

        assert_eq!(
            nodes[0],
            WorksheetNode::SheetProperties(SheetPropertiesNode {
                filter_mode: Some(true),
                ..Default::default()
            })
        );
        assert_eq!(nodes[1], WorksheetNode::Other("dimension".to_string()));
        assert_eq!(
            nodes[2],
            WorksheetNode::SheetFormatProperties {
                default_row_height: Some(15.0),
                default_col_width: Some(9.5),
            }
        );
        assert_eq!(
            nodes[3],
            WorksheetNode::Columns(vec![ColumnNode {
                min: 1,
                max: 2,
                width: Some(12.5),
                hidden: Some(true),
            }])
        );

        let WorksheetNode::SheetData(rows) = &nodes[4] else {
            panic!("expected sheet data, got {:?}", nodes[4]);
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, Some(1));
        assert_eq!(rows[0].height, Some(20.0));
        let first = &rows[0].cells[0];
        assert_eq!(first.reference.as_deref(), Some("A1"));
        assert_eq!(first.data_type, Some(CellDataType::SharedString));
        assert_eq!(first.style_index, Some(1));
        assert_eq!(first.value.as_deref(), Some("0"));
        let inline = &rows[0].cells[1];
        assert_eq!(inline.reference, None);
        assert_eq!(
            inline.inline_string,
            Some(vec![RichTextNode::Text("inline".to_string())])
        );
        assert_eq!(rows[1].index, None);
        assert_eq!(rows[1].hidden, Some(true));
        let formula = rows[1].cells[0].formula.as_ref().unwrap();
        assert_eq!(formula.formula_type, FormulaType::Shared);
        assert_eq!(formula.shared_index, Some(0));
        assert_eq!(formula.reference.as_deref(), Some("A2:A3"));
        assert_eq!(formula.text, "B2*2");

        assert_eq!(nodes[5], WorksheetNode::AutoFilter { has_children: false });
        assert_eq!(
            nodes[6],
            WorksheetNode::MergeCells(vec!["A1:B1".to_string()])
        );

        let WorksheetNode::ConditionalFormatting(cf) = &nodes[7] else {
            panic!("expected conditional formatting, got {:?}", nodes[7]);
        };
        assert_eq!(cf.sqref, "A1:A10");
        assert_eq!(cf.rules.len(), 2);
        assert_eq!(cf.rules[0].priority, Some(2));
        assert_eq!(
            cf.rules[0].children,
            vec![CfRuleChild::ColorScale(vec![
                ColorScaleEntry::Value {
                    value_type: Some("min".to_string()),
                    val: None
                },
                ColorScaleEntry::Value {
                    value_type: Some("num".to_string()),
                    val: Some("5".to_string())
                },
                ColorScaleEntry::Color {
                    rgb: Some("FFF8696B".to_string())
                },
                ColorScaleEntry::Color { rgb: None },
            ])]
        );
        assert_eq!(cf.rules[1].dxf_id, Some(0));
        assert_eq!(cf.rules[1].operator.as_deref(), Some("greaterThan"));
        assert_eq!(
            cf.rules[1].children,
            vec![CfRuleChild::Formula("10".to_string())]
        );

        assert_eq!(nodes[8], WorksheetNode::Other("pageMargins".to_string()));
        assert_eq!(nodes[9], WorksheetNode::TableParts(vec!["rId1".to_string()]));
    }

    #[test]
    fn test_cell_types() {
        assert_eq!(CellDataType::from_xml("str"), CellDataType::String);
        assert_eq!(
            CellDataType::from_xml("x"),
            CellDataType::Unknown("x".to_string())
        );
        assert_eq!(FormulaType::from_xml("dataTable"), FormulaType::DataTable);
    }

    #[test]
    fn test_column_requires_bounds() {
        let xml = r#"<worksheet><cols><col min="1"/></cols></worksheet>"#;
        assert!(WorksheetNode::parse_all(xml).is_err());
    }
}
