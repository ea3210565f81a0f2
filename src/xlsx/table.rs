//! Table definition parts (`xl/tables/tableN.xml`).

use super::xml::XmlElement;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableNode {
    pub display_name: String,
    pub reference: String,
    pub header_row_count: Option<u32>,
    pub totals_row_count: Option<u32>,
    /// `name` of each `<tableColumn>`, in order.
    pub columns: Vec<String>,
    pub has_auto_filter: bool,
}

impl TableNode {
    pub fn parse(xml: &str) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        let columns = match root.child("tableColumns") {
            Some(cols) => cols
                .children_named("tableColumn")
                .map(|col| col.required_attr("name").map(str::to_string))
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            display_name: root.required_attr("displayName")?.to_string(),
            reference: root.required_attr("ref")?.to_string(),
            header_row_count: root.parse_attr("headerRowCount")?,
            totals_row_count: root.parse_attr("totalsRowCount")?,
            columns,
            has_auto_filter: root.child("autoFilter").is_some(),
        })
    }
}
