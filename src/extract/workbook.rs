//! Workbook assembly.

use super::style::StyleTables;
use super::{value, worksheet};
use crate::error::{Error, Result};
use crate::model::{
    DefinedName, PackageProperties, Workbook, WorkbookProperties, Worksheet, WorksheetKind,
};
use crate::xlsx::{CorePropertiesNode, SheetPart, SpreadsheetDocument, WorkbookNode};

fn properties(book: &WorkbookNode, styles: StyleTables) -> WorkbookProperties {
    let calc = book.calc.as_ref();
    let book_pr = book.properties.as_ref();
    let strict = book.conformance.as_deref() == Some("strict");

    WorkbookProperties {
        r1c1_ref_mode: calc.and_then(|c| c.ref_mode.as_deref()) == Some("R1C1"),
        full_precision: calc.and_then(|c| c.full_precision),
        date1904: book_pr.and_then(|p| p.date1904),
        date_compatibility: book_pr
            .and_then(|p| p.date_compatibility)
            .or(strict.then_some(false)),
        names: book
            .defined_names
            .iter()
            .map(|n| DefinedName {
                name: n.name.clone(),
                reference: n.text.clone(),
                sheet: n.local_sheet_id,
            })
            .collect(),
        num_fmts: styles.num_fmts,
        fonts: styles.fonts,
        fills: styles.fills,
        borders: styles.borders,
        cell_xfs: styles.cell_xfs,
        differential_formats: styles.differential_formats,
    }
}

fn package_properties(core: &CorePropertiesNode) -> PackageProperties {
    PackageProperties {
        created: core.created,
        creator: core.creator.clone(),
        modified: core.modified,
        modifier: core.last_modified_by.clone(),
        subject: core.subject.clone(),
        title: core.title.clone(),
        description: core.description.clone(),
        language: core.language.clone(),
    }
}

/// Extract the normalized record of a loaded document.
///
/// The shared string table and the style tables are resolved once and used
/// by every sheet. `origin` labels the source, usually its file name.
pub fn extract(doc: &SpreadsheetDocument, origin: &str) -> Result<Workbook> {
    let shared_strings = value::shared_string_table(&doc.shared_strings)?;

    let mut sheets = Vec::with_capacity(doc.sheets.len());
    for sheet in &doc.sheets {
        let record = match &sheet.part {
            None => {
                log::debug!("Skipping sheet {:?} without a part", sheet.name);
                continue;
            }
            Some(SheetPart::Chartsheet) => Worksheet::of_kind(&sheet.name, WorksheetKind::Chart),
            Some(SheetPart::Dialogsheet) => {
                Worksheet::of_kind(&sheet.name, WorksheetKind::Dialog)
            }
            Some(SheetPart::Unsupported(rel_type)) => {
                return Err(Error::UnsupportedSheetPart {
                    sheet: sheet.name.clone(),
                    rel_type: rel_type.clone(),
                })
            }
            Some(SheetPart::Worksheet { nodes, tables }) => {
                log::debug!("Extracting sheet {:?}", sheet.name);
                worksheet::extract(&sheet.name, nodes, tables, &shared_strings)
                    .map_err(|e| e.in_sheet(&sheet.name))?
            }
        };
        sheets.push(record);
    }

    let styles = StyleTables::resolve(&doc.styles, doc.color_scheme.as_ref())?;

    Ok(Workbook {
        sheets,
        properties: properties(&doc.workbook, styles),
        package_properties: package_properties(&doc.core_properties),
        origin: origin.to_string(),
    })
}
