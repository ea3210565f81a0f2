//! Shared strings and rich text nodes.

use super::xml::XmlElement;
use crate::error::Result;

/// One child of a rich string (`<si>` or an inline `<is>`).
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextNode {
    /// Plain `<t>` text.
    Text(String),
    /// Formatted run `<r>`; only its text is kept.
    Run(String),
    /// Phonetic run `<rPh>`.
    PhoneticRun(String),
    /// Phonetic properties `<phoneticPr>`.
    PhoneticProperties,
    /// Anything else, by element name.
    Other(String),
}

impl RichTextNode {
    fn from_element(element: &XmlElement) -> Self {
        let inner_text = || {
            element
                .child("t")
                .map(|t| t.text.clone())
                .unwrap_or_default()
        };
        match element.name.as_str() {
            "t" => RichTextNode::Text(element.text.clone()),
            "r" => RichTextNode::Run(inner_text()),
            "rPh" => RichTextNode::PhoneticRun(inner_text()),
            "phoneticPr" => RichTextNode::PhoneticProperties,
            other => RichTextNode::Other(other.to_string()),
        }
    }

    /// Children of a rich string element, in order.
    pub fn list(element: &XmlElement) -> Vec<RichTextNode> {
        element.children.iter().map(Self::from_element).collect()
    }
}

/// Shared strings table, one rich string per `<si>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedStrings {
    items: Vec<Vec<RichTextNode>>,
}

impl SharedStrings {
    /// Parse `xl/sharedStrings.xml`. Non-`<si>` children such as `extLst` are skipped.
    pub fn parse(xml: &str) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        let items = root.children_named("si").map(RichTextNode::list).collect();
        Ok(Self { items })
    }

    /// Build a table from already-split items.
    pub fn from_items(items: Vec<Vec<RichTextNode>>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Vec<RichTextNode>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
