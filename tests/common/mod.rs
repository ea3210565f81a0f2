//! In-memory `.xlsx` packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const STRICT_MAIN_NS: &str = "http://purl.oclc.org/ooxml/spreadsheetml/main";
pub const STRICT_REL_NS: &str = "http://purl.oclc.org/ooxml/officeDocument/relationships";
pub const CORE_REL: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

/// A package under construction: part paths and their bytes.
#[derive(Debug, Clone, Default)]
pub struct XlsxBuilder {
    parts: Vec<(String, Vec<u8>)>,
}

impl XlsxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a part.
    pub fn part(self, path: &str, xml: impl Into<String>) -> Self {
        self.raw_part(path, xml.into().into_bytes())
    }

    /// Add or replace a part with bytes that need not be valid UTF-8.
    pub fn raw_part(mut self, path: &str, data: Vec<u8>) -> Self {
        self.parts.retain(|(p, _)| p != path);
        self.parts.push((path.to_string(), data));
        self
    }

    pub fn without(mut self, path: &str) -> Self {
        self.parts.retain(|(p, _)| p != path);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            for (path, data) in &self.parts {
                zip.start_file(path.as_str(), options).unwrap();
                zip.write_all(data).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }
}

/// A relationships part. Each entry is `(id, type URI, target)`.
pub fn rels(entries: &[(&str, String, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, rel_type, target) in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// A relationship type in the transitional namespace.
pub fn rel(kind: &str) -> String {
    format!("{}/{}", REL_NS, kind)
}

pub fn worksheet(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}" xmlns:r="{}">{}</worksheet>"#,
        MAIN_NS, REL_NS, body
    )
}

/// The smallest loadable package: one worksheet with the given body.
pub fn single_sheet(sheet_body: &str) -> XlsxBuilder {
    XlsxBuilder::new()
        .part(
            "_rels/.rels",
            rels(&[("rId1", rel("officeDocument"), "xl/workbook.xml")]),
        )
        .part(
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
                MAIN_NS, REL_NS
            ),
        )
        .part(
            "xl/_rels/workbook.xml.rels",
            rels(&[("rId1", rel("worksheet"), "worksheets/sheet1.xml")]),
        )
        .part("xl/worksheets/sheet1.xml", worksheet(sheet_body))
}

pub const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2">
  <si><t>Hi</t></si>
  <si><r><rPr><b/></rPr><t xml:space="preserve">Name </t></r><r><t>list</t></r></si>
</sst>"#;

pub const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="164" formatCode="0.00%"/></numFmts>
  <fonts count="2">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/></font>
    <font><b/><sz val="14"/><color theme="4"/><name val="Calibri"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="2">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="164" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1" applyNumberFormat="1"/>
  </cellXfs>
  <dxfs count="1"><dxf><font><i/></font><fill><patternFill><bgColor rgb="FFFFC7CE"/></patternFill></fill></dxf></dxfs>
</styleSheet>"#;

pub const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
    </a:clrScheme>
  </a:themeElements>
</a:theme>"#;

pub const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:creator>Ada</dc:creator>
  <cp:lastModifiedBy>Grace</cp:lastModifiedBy>
  <dc:title>Quarterly</dc:title>
  <dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T10:00:00Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">not a date</dcterms:modified>
</cp:coreProperties>"#;

pub const TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<table xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" id="1" name="Table1"
       displayName="Scores" ref="A5:B7" totalsRowCount="1">
  <autoFilter ref="A5:B6"/>
  <tableColumns count="2"><tableColumn id="1" name="Name"/><tableColumn id="2" name="Score"/></tableColumns>
</table>"#;

pub const GREETING_SHEET: &str = r#"
  <sheetFormatPr defaultRowHeight="15"/>
  <cols><col min="1" max="2" width="12.5" customWidth="1"/><col min="4" max="4" width="0" hidden="1"/></cols>
  <sheetData>
    <row r="1">
      <c r="A1" s="1" t="s"><v>0</v></c>
      <c r="B1"><v>42</v></c>
      <c r="C1"><f>B1*2</f><v>84</v></c>
    </row>
    <row r="3" ht="20" customHeight="1" hidden="1">
      <c r="A3" t="b"><v>1</v></c>
      <c r="B3" t="inlineStr"><is><t>inline</t></is></c>
      <c r="C3" t="e"><v>#N/A</v></c>
    </row>
    <row r="4">
      <c r="A4" t="s"><v>1</v></c>
      <c r="B4"/>
    </row>
  </sheetData>
  <mergeCells count="1"><mergeCell ref="B3:C3"/></mergeCells>
  <conditionalFormatting sqref="B1:B10">
    <cfRule type="cellIs" dxfId="0" priority="1" operator="greaterThan"><formula>10</formula></cfRule>
  </conditionalFormatting>
  <tableParts count="1"><tablePart r:id="rId1"/></tableParts>"#;

/// A fuller workbook: one grid sheet with strings, styles, a table and
/// conditional formatting, plus a chart sheet, a theme and core properties.
pub fn greeting_workbook() -> XlsxBuilder {
    XlsxBuilder::new()
        .part(
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
        )
        .part(
            "_rels/.rels",
            rels(&[
                ("rId1", rel("officeDocument"), "xl/workbook.xml"),
                ("rId2", CORE_REL.to_string(), "docProps/core.xml"),
            ]),
        )
        .part("docProps/core.xml", CORE)
        .part(
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}">
  <workbookPr date1904="0"/>
  <sheets>
    <sheet name="Greeting" sheetId="1" r:id="rId1"/>
    <sheet name="Chart1" sheetId="2" r:id="rId2"/>
  </sheets>
  <definedNames><definedName name="Answer" localSheetId="0">Greeting!$B$1</definedName></definedNames>
  <calcPr calcId="191029" fullPrecision="1"/>
</workbook>"#,
                MAIN_NS, REL_NS
            ),
        )
        .part(
            "xl/_rels/workbook.xml.rels",
            rels(&[
                ("rId1", rel("worksheet"), "worksheets/sheet1.xml"),
                ("rId2", rel("chartsheet"), "chartsheets/sheet1.xml"),
                ("rId3", rel("sharedStrings"), "sharedStrings.xml"),
                ("rId4", rel("styles"), "styles.xml"),
                ("rId5", rel("theme"), "theme/theme1.xml"),
            ]),
        )
        .part("xl/worksheets/sheet1.xml", worksheet(GREETING_SHEET))
        .part(
            "xl/worksheets/_rels/sheet1.xml.rels",
            rels(&[("rId1", rel("table"), "../tables/table1.xml")]),
        )
        .part("xl/tables/table1.xml", TABLE)
        .part(
            "xl/chartsheets/sheet1.xml",
            format!(r#"<chartsheet xmlns="{}"/>"#, MAIN_NS),
        )
        .part("xl/sharedStrings.xml", SHARED_STRINGS)
        .part("xl/styles.xml", STYLES)
        .part("xl/theme/theme1.xml", THEME)
}
