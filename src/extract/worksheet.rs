//! Worksheet assembly.
//!
//! One pass over the worksheet's top-level nodes, accumulating the sheet
//! record. Row numbers must strictly increase down the sheet and column
//! numbers strictly increase within a row; a row or cell without an explicit
//! address takes the previous one plus one.

use super::{conditional, reference, value};
use crate::error::{Error, Result};
use crate::model::{Cell, Column, MergeCell, Row, Table, Worksheet, WorksheetProperties};
use crate::xlsx::{RowNode, TableNode, WorksheetNode};
use std::collections::{HashMap, HashSet};

/// Sheets with more cells than this keep only their name.
pub const MAX_CELLS: usize = 100_000;

/// Validate a table definition and convert it.
pub fn table(node: &TableNode) -> Result<Table> {
    let mut seen = HashSet::new();
    for column in &node.columns {
        if !seen.insert(column.as_str()) {
            return Err(Error::DuplicateTableColumn {
                table: node.display_name.clone(),
                column: column.clone(),
            });
        }
    }

    let range = reference::decode_range(&node.reference)?;
    if node.columns.len() != range.cols as usize {
        return Err(Error::TableColumnCountMismatch {
            table: node.display_name.clone(),
            expected: range.cols,
            actual: node.columns.len(),
        });
    }

    Ok(Table {
        name: node.display_name.clone(),
        range: node.reference.clone(),
        has_headers_row: node.header_row_count.unwrap_or(1) > 0,
        has_totals_row: node.totals_row_count.unwrap_or(0) > 0,
        column_names: node.columns.clone(),
    })
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Cells of one row, checking their addresses against the row number.
fn row_cells(
    number: u32,
    row: &RowNode,
    shared_strings: &[String],
    cells: &mut Vec<Cell>,
) -> Result<()> {
    let mut last_col = 0u32;
    for node in &row.cells {
        let (col, text) = match &node.reference {
            Some(text) => {
                let (r, c) = reference::decode(text)?;
                if r != number {
                    return Err(Error::CellRowMismatch {
                        reference: text.clone(),
                        row: number,
                    });
                }
                if c <= last_col {
                    return Err(Error::CellOutOfOrder {
                        reference: text.clone(),
                    });
                }
                let canonical = reference::encode(r, c);
                if canonical != *text {
                    return Err(Error::AddressRoundTripMismatch {
                        reference: text.clone(),
                        canonical,
                    });
                }
                (c, text.clone())
            }
            None => {
                let c = last_col
                    .checked_add(1)
                    .ok_or_else(|| Error::InvalidAddress(format!("column after {}", last_col)))?;
                (c, reference::encode(number, c))
            }
        };
        last_col = col;
        cells.push(value::cell(text, node, shared_strings)?);
    }
    Ok(())
}

/// Assemble a grid worksheet.
///
/// `tables` maps `<tablePart>` relationship ids to their parsed parts; ids
/// missing from the map point at something other than a table and are skipped.
pub fn extract(
    name: &str,
    nodes: &[WorksheetNode],
    tables: &HashMap<String, TableNode>,
    shared_strings: &[String],
) -> Result<Worksheet> {
    let mut cells = Vec::new();
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut sheet_tables = Vec::new();
    let mut merge_cells = Vec::new();
    let mut properties = WorksheetProperties::default();
    let mut conditional_formatting = Vec::new();

    for node in nodes {
        match node {
            WorksheetNode::SheetProperties(pr) => {
                if pr.filter_mode == Some(true) {
                    properties.has_filters = Some(true);
                }
                if pr.transition_evaluation == Some(true) {
                    properties.transition_evaluation = Some(true);
                }
                if pr.transition_entry == Some(true) {
                    properties.transition_entry = Some(true);
                }
            }
            WorksheetNode::SheetFormatProperties {
                default_row_height,
                default_col_width,
            } => {
                if default_row_height.is_some() {
                    properties.default_row_height = *default_row_height;
                }
                if default_col_width.is_some() {
                    properties.default_col_width = *default_col_width;
                }
            }
            WorksheetNode::SheetData(data) => {
                let mut last_row = 0u32;
                for row in data {
                    let number = match row.index {
                        Some(index) if index <= last_row => {
                            return Err(Error::RowOutOfOrder {
                                row: index,
                                previous: last_row,
                            })
                        }
                        Some(index) => index,
                        None => last_row.checked_add(1).ok_or_else(|| {
                            Error::InvalidAddress(format!("row after {}", last_row))
                        })?,
                    };
                    last_row = number;

                    let hidden = row.hidden.unwrap_or(false);
                    if hidden || row.height.is_some() {
                        rows.push(Row {
                            number,
                            hidden,
                            height: row.height,
                        });
                    }

                    row_cells(number, row, shared_strings, &mut cells)?;
                }
            }
            WorksheetNode::Columns(columns) => {
                cols.extend(columns.iter().map(|col| Column {
                    hidden: col.hidden.unwrap_or(false),
                    width: col.width,
                    min: col.min,
                    max: col.max,
                }));
            }
            WorksheetNode::AutoFilter { has_children } => {
                if *has_children {
                    properties.has_filters = Some(true);
                }
            }
            WorksheetNode::TableParts(ids) => {
                for id in ids {
                    let Some(part) = tables.get(id) else {
                        continue;
                    };
                    sheet_tables.push(table(part)?);
                    if part.has_auto_filter {
                        properties.has_filters = Some(true);
                    }
                }
            }
            WorksheetNode::MergeCells(refs) => {
                merge_cells.extend(refs.iter().map(|r| MergeCell {
                    reference: r.clone(),
                }));
            }
            WorksheetNode::ConditionalFormatting(group) => {
                conditional_formatting.extend(conditional::extract(group));
            }
            WorksheetNode::Other(_) => {}
        }
    }

    if cells.len() > MAX_CELLS {
        log::debug!(
            "Sheet {:?} has {} cells, keeping only its name",
            name,
            cells.len()
        );
        return Ok(Worksheet::name_only(name));
    }

    Ok(Worksheet {
        kind: None,
        name: name.to_string(),
        cells: Some(cells),
        rows: non_empty(rows),
        cols: non_empty(cols),
        tables: non_empty(sheet_tables),
        merge_cells: non_empty(merge_cells),
        properties: Some(properties),
        conditional_formatting: non_empty(conditional_formatting),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::xlsx::{CellNode, ColumnNode, SheetPropertiesNode};

    fn cell(reference: Option<&str>, value: &str) -> CellNode {
        CellNode {
            reference: reference.map(str::to_string),
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    fn row(index: Option<u32>, cells: Vec<CellNode>) -> RowNode {
        RowNode {
            index,
            cells,
            ..Default::default()
        }
    }

    fn sheet(rows: Vec<RowNode>) -> Result<Worksheet> {
        extract(
            "Sheet1",
            &[WorksheetNode::SheetData(rows)],
            &HashMap::new(),
            &[],
        )
    }

    #[test]
    fn test_implicit_addresses() {
        let ws = sheet(vec![
            row(None, vec![cell(None, "1"), cell(Some("C1"), "2"), cell(None, "3")]),
            row(Some(4), vec![cell(None, "4")]),
            row(None, vec![cell(Some("B5"), "5")]),
        ])
        .unwrap();

        let refs: Vec<_> = ws
            .cells
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.reference.as_str())
            .collect();
        assert_eq!(refs, vec!["A1", "C1", "D1", "A4", "B5"]);
        assert_eq!(
            ws.cells.unwrap()[0].value,
            CellValue::Number("1".to_string())
        );
        assert_eq!(ws.rows, None);
        assert_eq!(ws.properties, Some(WorksheetProperties::default()));
    }

    #[test]
    fn test_rows_out_of_order() {
        let err = sheet(vec![row(Some(1), vec![]), row(Some(3), vec![]), row(Some(2), vec![])])
            .unwrap_err();
        assert!(matches!(err, Error::RowOutOfOrder { row: 2, previous: 3 }));

        let err = sheet(vec![row(Some(1), vec![]), row(Some(2), vec![]), row(Some(2), vec![])])
            .unwrap_err();
        assert!(matches!(err, Error::RowOutOfOrder { row: 2, previous: 2 }));

        assert!(sheet(vec![row(Some(0), vec![])]).is_err());
    }

    #[test]
    fn test_cells_out_of_order() {
        let err = sheet(vec![row(
            Some(1),
            vec![cell(Some("B1"), "1"), cell(Some("A1"), "2")],
        )])
        .unwrap_err();
        assert!(matches!(err, Error::CellOutOfOrder { reference } if reference == "A1"));

        let err = sheet(vec![row(
            Some(1),
            vec![cell(None, "1"), cell(Some("A1"), "2")],
        )])
        .unwrap_err();
        assert!(matches!(err, Error::CellOutOfOrder { .. }));
    }

    #[test]
    fn test_cell_row_mismatch() {
        let err = sheet(vec![row(Some(2), vec![cell(Some("A3"), "1")])]).unwrap_err();
        assert!(matches!(err, Error::CellRowMismatch { row: 2, .. }));
    }

    #[test]
    fn test_non_canonical_address() {
        let err = sheet(vec![row(Some(1), vec![cell(Some("A01"), "1")])]).unwrap_err();
        assert!(matches!(
            err,
            Error::AddressRoundTripMismatch { reference, canonical }
                if reference == "A01" && canonical == "A1"
        ));
        let err = sheet(vec![row(Some(1), vec![cell(Some("a1"), "1")])]).unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[test]
    fn test_rows_and_columns_recorded() {
        let nodes = vec![
            WorksheetNode::Columns(vec![ColumnNode {
                min: 2,
                max: 4,
                width: None,
                hidden: Some(true),
            }]),
            WorksheetNode::SheetData(vec![
                RowNode {
                    index: Some(1),
                    height: Some(30.0),
                    ..Default::default()
                },
                RowNode {
                    index: Some(2),
                    ..Default::default()
                },
                RowNode {
                    index: Some(3),
                    hidden: Some(true),
                    ..Default::default()
                },
            ]),
        ];
        let ws = extract("S", &nodes, &HashMap::new(), &[]).unwrap();
        assert_eq!(
            ws.rows.unwrap(),
            vec![
                Row {
                    number: 1,
                    hidden: false,
                    height: Some(30.0)
                },
                Row {
                    number: 3,
                    hidden: true,
                    height: None
                },
            ]
        );
        assert_eq!(
            ws.cols.unwrap(),
            vec![Column {
                hidden: true,
                width: None,
                min: 2,
                max: 4
            }]
        );
    }

    #[test]
    fn test_filters_and_properties() {
        let nodes = vec![
            WorksheetNode::SheetProperties(SheetPropertiesNode {
                filter_mode: Some(false),
                transition_evaluation: Some(true),
                transition_entry: Some(false),
            }),
            WorksheetNode::SheetFormatProperties {
                default_row_height: Some(15.0),
                default_col_width: None,
            },
            WorksheetNode::AutoFilter { has_children: false },
            WorksheetNode::Other("dimension".to_string()),
        ];
        let ws = extract("S", &nodes, &HashMap::new(), &[]).unwrap();
        let props = ws.properties.unwrap();
        assert_eq!(props.has_filters, None);
        assert_eq!(props.transition_evaluation, Some(true));
        assert_eq!(props.transition_entry, None);
        assert_eq!(props.default_row_height, Some(15.0));

        let filtered = extract(
            "S",
            &[WorksheetNode::AutoFilter { has_children: true }],
            &HashMap::new(),
            &[],
        )
        .unwrap();
        assert_eq!(filtered.properties.unwrap().has_filters, Some(true));
    }

    fn table_node(columns: &[&str], reference: &str) -> TableNode {
        TableNode {
            display_name: "Sales".to_string(),
            reference: reference.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_parts() {
        let mut tables = HashMap::new();
        let mut filtered = table_node(&["Region", "Amount"], "A1:B5");
        filtered.has_auto_filter = true;
        filtered.totals_row_count = Some(1);
        tables.insert("rId1".to_string(), filtered);

        let nodes = vec![WorksheetNode::TableParts(vec![
            "rId1".to_string(),
            "rId9".to_string(),
        ])];
        let ws = extract("S", &nodes, &tables, &[]).unwrap();
        assert_eq!(
            ws.tables.unwrap(),
            vec![Table {
                name: "Sales".to_string(),
                range: "A1:B5".to_string(),
                has_headers_row: true,
                has_totals_row: true,
                column_names: vec!["Region".to_string(), "Amount".to_string()],
            }]
        );
        assert_eq!(ws.properties.unwrap().has_filters, Some(true));
    }

    #[test]
    fn test_table_validation() {
        assert!(matches!(
            table(&table_node(&["A", "A"], "A1:B2")),
            Err(Error::DuplicateTableColumn { column, .. }) if column == "A"
        ));
        assert!(matches!(
            table(&table_node(&["A", "B"], "A1:C2")),
            Err(Error::TableColumnCountMismatch { expected: 3, actual: 2, .. })
        ));
        let mut headless = table_node(&["A"], "A1:A2");
        headless.header_row_count = Some(0);
        assert!(!table(&headless).unwrap().has_headers_row);
    }

    fn grid(count: usize) -> Vec<RowNode> {
        (0..count)
            .step_by(100)
            .map(|start| {
                let width = (count - start).min(100);
                row(None, (0..width).map(|_| cell(None, "1")).collect())
            })
            .collect()
    }

    #[test]
    fn test_size_guard() {
        let at_limit = sheet(grid(MAX_CELLS)).unwrap();
        assert_eq!(at_limit.cells.as_ref().map(Vec::len), Some(MAX_CELLS));
        assert!(at_limit.properties.is_some());

        let over = sheet(grid(MAX_CELLS + 1)).unwrap();
        assert!(over.is_name_only());
        assert_eq!(over.name, "Sheet1");
    }
}
