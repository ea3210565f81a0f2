//! Theme color scheme (`xl/theme/theme1.xml`).

use super::xml::XmlElement;
use crate::error::Result;

/// Color definition of one scheme slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeColor {
    /// `<a:sysClr lastClr="..">`
    System { last_color: Option<String> },
    /// `<a:srgbClr val="..">`
    Rgb(String),
    /// Any other color model (hsl, preset, ...).
    Other,
}

/// The `<a:clrScheme>` slots in document order
/// (dk1, lt1, dk2, lt2, accent1..6, hlink, folHlink).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorScheme {
    pub entries: Vec<ThemeColor>,
}

impl ColorScheme {
    /// Parse a theme part. Returns `None` when it declares no color scheme.
    pub fn parse(xml: &str) -> Result<Option<Self>> {
        let root = XmlElement::parse(xml)?;
        let scheme = root
            .child("themeElements")
            .and_then(|elements| elements.child("clrScheme"));

        Ok(scheme.map(|scheme| Self {
            entries: scheme.children.iter().map(Self::slot_color).collect(),
        }))
    }

    fn slot_color(slot: &XmlElement) -> ThemeColor {
        if let Some(sys) = slot.child("sysClr") {
            return ThemeColor::System {
                last_color: sys.attr("lastClr").map(str::to_string),
            };
        }
        match slot.child("srgbClr").and_then(|c| c.attr("val")) {
            Some(val) => ThemeColor::Rgb(val.to_string()),
            None => ThemeColor::Other,
        }
    }

    pub fn get(&self, index: usize) -> Option<&ThemeColor> {
        self.entries.get(index)
    }
}
