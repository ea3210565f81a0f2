//! Stylesheet nodes parsed from `xl/styles.xml`.

use super::xml::XmlElement;
use crate::error::Result;
use std::str::FromStr;

/// A property element that is present with an optional `val`
/// (e.g. `<b/>`, `<b val="0"/>`, `<sz val="11"/>`).
#[derive(Debug, Clone, PartialEq)]
pub struct Val<T>(pub Option<T>);

fn val_child<T: FromStr>(parent: &XmlElement, name: &str) -> Result<Option<Val<T>>> {
    parent
        .child(name)
        .map(|el| el.parse_attr("val").map(Val))
        .transpose()
}

fn toggle_child(parent: &XmlElement, name: &str) -> Result<Option<Val<bool>>> {
    parent
        .child(name)
        .map(|el| el.bool_attr("val").map(Val))
        .transpose()
}

/// A color reference (`<color>`, `<fgColor>`, `<bgColor>`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorNode {
    pub auto: Option<bool>,
    pub rgb: Option<String>,
    pub indexed: Option<u32>,
    pub theme: Option<u32>,
    pub tint: Option<f64>,
}

impl ColorNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            auto: el.bool_attr("auto")?,
            rgb: el.attr("rgb").map(str::to_string),
            indexed: el.parse_attr("indexed")?,
            theme: el.parse_attr("theme")?,
            tint: el.parse_attr("tint")?,
        })
    }

    fn child(parent: &XmlElement, name: &str) -> Result<Option<Self>> {
        parent.child(name).map(Self::from_element).transpose()
    }
}

/// `<numFmt>`
#[derive(Debug, Clone, PartialEq)]
pub struct NumFmtNode {
    pub id: u32,
    pub format_code: String,
}

/// `<font>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontNode {
    pub name: Option<Val<String>>,
    pub bold: Option<Val<bool>>,
    pub italic: Option<Val<bool>>,
    pub strike: Option<Val<bool>>,
    pub underline: Option<Val<String>>,
    pub vert_align: Option<Val<String>>,
    pub size: Option<Val<f64>>,
    pub color: Option<ColorNode>,
}

impl FontNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            name: val_child(el, "name")?,
            bold: toggle_child(el, "b")?,
            italic: toggle_child(el, "i")?,
            strike: toggle_child(el, "strike")?,
            underline: val_child(el, "u")?,
            vert_align: val_child(el, "vertAlign")?,
            size: val_child(el, "sz")?,
            color: ColorNode::child(el, "color")?,
        })
    }
}

/// `<patternFill>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternFillNode {
    pub pattern_type: Option<String>,
    pub fg_color: Option<ColorNode>,
    pub bg_color: Option<ColorNode>,
}

/// `<fill>`
#[derive(Debug, Clone, PartialEq)]
pub enum FillNode {
    Pattern(PatternFillNode),
    Gradient,
    Empty,
}

impl FillNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        if let Some(pattern) = el.child("patternFill") {
            return Ok(FillNode::Pattern(PatternFillNode {
                pattern_type: pattern.attr("patternType").map(str::to_string),
                fg_color: ColorNode::child(pattern, "fgColor")?,
                bg_color: ColorNode::child(pattern, "bgColor")?,
            }));
        }
        if el.child("gradientFill").is_some() {
            return Ok(FillNode::Gradient);
        }
        Ok(FillNode::Empty)
    }
}

/// One edge of a `<border>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderSideNode {
    pub style: Option<String>,
    pub color: Option<ColorNode>,
}

/// `<border>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderNode {
    pub left: Option<BorderSideNode>,
    pub right: Option<BorderSideNode>,
    pub top: Option<BorderSideNode>,
    pub bottom: Option<BorderSideNode>,
}

impl BorderNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        let side = |name: &str| -> Result<Option<BorderSideNode>> {
            el.child(name)
                .map(|s| {
                    Ok(BorderSideNode {
                        style: s.attr("style").map(str::to_string),
                        color: ColorNode::child(s, "color")?,
                    })
                })
                .transpose()
        };
        Ok(Self {
            left: side("left")?,
            right: side("right")?,
            top: side("top")?,
            bottom: side("bottom")?,
        })
    }
}

/// `<alignment>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentNode {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
    pub text_rotation: Option<u32>,
    pub wrap_text: Option<bool>,
    pub indent: Option<u32>,
    pub relative_indent: Option<i32>,
    pub justify_last_line: Option<bool>,
    pub shrink_to_fit: Option<bool>,
    pub reading_order: Option<u32>,
}

impl AlignmentNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            horizontal: el.attr("horizontal").map(str::to_string),
            vertical: el.attr("vertical").map(str::to_string),
            text_rotation: el.parse_attr("textRotation")?,
            wrap_text: el.bool_attr("wrapText")?,
            indent: el.parse_attr("indent")?,
            relative_indent: el.parse_attr("relativeIndent")?,
            justify_last_line: el.bool_attr("justifyLastLine")?,
            shrink_to_fit: el.bool_attr("shrinkToFit")?,
            reading_order: el.parse_attr("readingOrder")?,
        })
    }
}

/// `<xf>` from either `<cellStyleXfs>` or `<cellXfs>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XfNode {
    pub xf_id: Option<u32>,
    pub num_fmt_id: Option<u32>,
    pub font_id: Option<u32>,
    pub fill_id: Option<u32>,
    pub border_id: Option<u32>,
    pub apply_number_format: Option<bool>,
    pub apply_font: Option<bool>,
    pub apply_fill: Option<bool>,
    pub apply_border: Option<bool>,
    pub apply_alignment: Option<bool>,
    pub alignment: Option<AlignmentNode>,
}

impl XfNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            xf_id: el.parse_attr("xfId")?,
            num_fmt_id: el.parse_attr("numFmtId")?,
            font_id: el.parse_attr("fontId")?,
            fill_id: el.parse_attr("fillId")?,
            border_id: el.parse_attr("borderId")?,
            apply_number_format: el.bool_attr("applyNumberFormat")?,
            apply_font: el.bool_attr("applyFont")?,
            apply_fill: el.bool_attr("applyFill")?,
            apply_border: el.bool_attr("applyBorder")?,
            apply_alignment: el.bool_attr("applyAlignment")?,
            alignment: el
                .child("alignment")
                .map(AlignmentNode::from_element)
                .transpose()?,
        })
    }
}

/// `<dxf>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DxfNode {
    pub font: Option<FontNode>,
    pub fill: Option<FillNode>,
    pub border: Option<BorderNode>,
}

impl DxfNode {
    pub fn from_element(el: &XmlElement) -> Result<Self> {
        Ok(Self {
            font: el.child("font").map(FontNode::from_element).transpose()?,
            fill: el.child("fill").map(FillNode::from_element).transpose()?,
            border: el.child("border").map(BorderNode::from_element).transpose()?,
        })
    }
}

/// The parsed stylesheet, each table in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylesheetNode {
    pub num_fmts: Vec<NumFmtNode>,
    pub fonts: Vec<FontNode>,
    pub fills: Vec<FillNode>,
    pub borders: Vec<BorderNode>,
    pub cell_style_xfs: Vec<XfNode>,
    pub cell_xfs: Vec<XfNode>,
    pub dxfs: Vec<DxfNode>,
}

impl StylesheetNode {
    /// Parse `xl/styles.xml`.
    pub fn parse(xml: &str) -> Result<Self> {
        Self::from_element(&XmlElement::parse(xml)?)
    }

    pub fn from_element(root: &XmlElement) -> Result<Self> {
        fn table<T>(
            root: &XmlElement,
            container: &str,
            item: &str,
            parse: fn(&XmlElement) -> Result<T>,
        ) -> Result<Vec<T>> {
            match root.child(container) {
                Some(c) => c.children_named(item).map(parse).collect(),
                None => Ok(Vec::new()),
            }
        }

        Ok(Self {
            num_fmts: table(root, "numFmts", "numFmt", |el| {
                Ok(NumFmtNode {
                    id: el.parse_required_attr("numFmtId")?,
                    format_code: el.attr("formatCode").unwrap_or_default().to_string(),
                })
            })?,
            fonts: table(root, "fonts", "font", FontNode::from_element)?,
            fills: table(root, "fills", "fill", FillNode::from_element)?,
            borders: table(root, "borders", "border", BorderNode::from_element)?,
            cell_style_xfs: table(root, "cellStyleXfs", "xf", XfNode::from_element)?,
            cell_xfs: table(root, "cellXfs", "xf", XfNode::from_element)?,
            dxfs: table(root, "dxfs", "dxf", DxfNode::from_element)?,
        })
    }
}
