//! Style table extraction and the two-level cell format cascade.
//!
//! `cellStyleXfs` entries are master formats; `cellXfs` entries are the
//! applied formats cells point at. An applied format starts from a copy of
//! its master and overrides the attributes it declares (and applies).

use super::color;
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Border, BorderLineType, BorderProperties, CellXf, DifferentialFormat, Fill, Font,
    FontVerticalAlignment, GradientFill, HorizontalAlignment, NumFmt, PatternFill, PatternType,
    Underline, VerticalAlignment,
};
use crate::xlsx::{
    AlignmentNode, BorderNode, BorderSideNode, ColorScheme, DxfNode, FillNode, FontNode,
    NumFmtNode, StylesheetNode, Val, XfNode,
};

fn enum_value<T>(kind: &'static str, raw: &str, lookup: fn(&str) -> Option<T>) -> Result<T> {
    lookup(raw).ok_or_else(|| Error::UnsupportedEnumValue {
        kind,
        value: raw.to_string(),
    })
}

fn optional_enum<T>(
    kind: &'static str,
    raw: Option<&str>,
    lookup: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    raw.map(|raw| enum_value(kind, raw, lookup)).transpose()
}

pub fn num_fmt(node: &NumFmtNode) -> NumFmt {
    NumFmt {
        format_code: node.format_code.clone(),
        number_format_id: node.id,
    }
}

/// Convert a font. Toggles present without `val` are on; `<u/>` is single.
pub fn font(node: &FontNode, scheme: Option<&ColorScheme>) -> Result<Font> {
    let toggle = |v: &Option<Val<bool>>| v.as_ref().map(|v| v.0.unwrap_or(true));

    let underline = match &node.underline {
        None => None,
        Some(v) => Some(match v.0.as_deref() {
            None => Underline::Single,
            Some(raw) => enum_value("underline", raw, Underline::from_xml)?,
        }),
    };
    let vertical_align = optional_enum(
        "vertical alignment",
        node.vert_align.as_ref().and_then(|v| v.0.as_deref()),
        FontVerticalAlignment::from_xml,
    )?;

    Ok(Font {
        name: node.name.as_ref().and_then(|v| v.0.clone()),
        bold: toggle(&node.bold),
        italic: toggle(&node.italic),
        underline,
        strikethrough: toggle(&node.strike),
        vertical_align,
        size: node.size.as_ref().and_then(|v| v.0),
        color: node.color.as_ref().map(|c| color::resolve(c, scheme)),
    })
}

pub fn fill(node: &FillNode, scheme: Option<&ColorScheme>) -> Result<Fill> {
    Ok(match node {
        FillNode::Pattern(pattern) => Fill {
            pattern: Some(PatternFill {
                pattern_type: optional_enum(
                    "pattern type",
                    pattern.pattern_type.as_deref(),
                    PatternType::from_xml,
                )?,
                fg_color: pattern.fg_color.as_ref().map(|c| color::resolve(c, scheme)),
                bg_color: pattern.bg_color.as_ref().map(|c| color::resolve(c, scheme)),
            }),
            gradient: None,
        },
        FillNode::Gradient => Fill {
            pattern: None,
            gradient: Some(GradientFill {}),
        },
        FillNode::Empty => Fill::default(),
    })
}

fn border_side(
    side: Option<&BorderSideNode>,
    scheme: Option<&ColorScheme>,
) -> Result<Option<BorderProperties>> {
    side.map(|side| {
        Ok(BorderProperties {
            line_type: optional_enum(
                "border style",
                side.style.as_deref(),
                BorderLineType::from_xml,
            )?,
            color: side.color.as_ref().map(|c| color::resolve(c, scheme)),
        })
    })
    .transpose()
}

pub fn border(node: &BorderNode, scheme: Option<&ColorScheme>) -> Result<Border> {
    Ok(Border {
        top: border_side(node.top.as_ref(), scheme)?,
        bottom: border_side(node.bottom.as_ref(), scheme)?,
        left: border_side(node.left.as_ref(), scheme)?,
        right: border_side(node.right.as_ref(), scheme)?,
    })
}

/// Overwrite the attributes `node` sets explicitly; the rest stay as inherited.
fn merge_alignment(target: &mut Alignment, node: &AlignmentNode) -> Result<()> {
    if let Some(h) =
        optional_enum("horizontal alignment", node.horizontal.as_deref(), HorizontalAlignment::from_xml)?
    {
        target.horizontal = Some(h);
    }
    if let Some(v) =
        optional_enum("vertical alignment", node.vertical.as_deref(), VerticalAlignment::from_xml)?
    {
        target.vertical = Some(v);
    }
    if node.text_rotation.is_some() {
        target.text_rotation = node.text_rotation;
    }
    if node.wrap_text.is_some() {
        target.wrap_text = node.wrap_text;
    }
    if node.indent.is_some() {
        target.indent = node.indent;
    }
    if node.relative_indent.is_some() {
        target.relative_indent = node.relative_indent;
    }
    if node.justify_last_line.is_some() {
        target.justify_last_line = node.justify_last_line;
    }
    if node.shrink_to_fit.is_some() {
        target.shrink_to_fit = node.shrink_to_fit;
    }
    if node.reading_order.is_some() {
        target.reading_order = node.reading_order;
    }
    Ok(())
}

/// Apply `node`'s own attributes on top of `base`.
fn apply_overrides(mut base: CellXf, node: &XfNode) -> Result<CellXf> {
    let applies = |flag: Option<bool>| flag.unwrap_or(true);

    if node.num_fmt_id.is_some() && applies(node.apply_number_format) {
        base.num_fmt_id = node.num_fmt_id;
    }
    if node.font_id.is_some() && applies(node.apply_font) {
        base.font_id = node.font_id;
    }
    if node.fill_id.is_some() && applies(node.apply_fill) {
        base.fill_id = node.fill_id;
    }
    if node.border_id.is_some() && applies(node.apply_border) {
        base.border_id = node.border_id;
    }
    if let Some(alignment) = &node.alignment {
        if applies(node.apply_alignment) {
            merge_alignment(base.alignment.get_or_insert_with(Alignment::default), alignment)?;
        }
    }
    Ok(base)
}

/// Resolve the master table. Masters may not reference another master.
pub fn master_formats(nodes: &[XfNode]) -> Result<Vec<CellXf>> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            if node.xf_id.is_some() {
                return Err(Error::NestedMasterFormat { index });
            }
            apply_overrides(CellXf::default(), node)
        })
        .collect()
}

/// Resolve one applied format against the resolved masters.
///
/// Without an explicit master reference, a table holding exactly one master
/// makes that master the implicit base.
pub fn cell_format(node: &XfNode, masters: &[CellXf]) -> Result<CellXf> {
    let master_id = match node.xf_id {
        Some(id) => Some(id),
        None if masters.len() == 1 => Some(0),
        None => None,
    };

    let base = match master_id {
        Some(id) => {
            let master = masters
                .get(id as usize)
                .ok_or(Error::MasterFormatOutOfRange {
                    index: id,
                    len: masters.len(),
                })?;
            CellXf {
                fmt_id: None,
                ..master.clone()
            }
        }
        None => CellXf::default(),
    };

    let mut resolved = apply_overrides(base, node)?;
    resolved.fmt_id = node.xf_id;
    Ok(resolved)
}

pub fn differential_format(
    index: usize,
    node: &DxfNode,
    scheme: Option<&ColorScheme>,
) -> Result<DifferentialFormat> {
    Ok(DifferentialFormat {
        dfx_id: index as u32 + 1,
        fill: node.fill.as_ref().map(|f| fill(f, scheme)).transpose()?,
        font: node.font.as_ref().map(|f| font(f, scheme)).transpose()?,
        border: node.border.as_ref().map(|b| border(b, scheme)).transpose()?,
    })
}

/// All style tables of a workbook, resolved once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTables {
    pub num_fmts: Vec<NumFmt>,
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub cell_xfs: Vec<CellXf>,
    pub differential_formats: Vec<DifferentialFormat>,
}

impl StyleTables {
    pub fn resolve(styles: &StylesheetNode, scheme: Option<&ColorScheme>) -> Result<Self> {
        let masters = master_formats(&styles.cell_style_xfs)?;

        Ok(Self {
            num_fmts: styles.num_fmts.iter().map(num_fmt).collect(),
            fonts: styles
                .fonts
                .iter()
                .map(|f| font(f, scheme))
                .collect::<Result<_>>()?,
            fills: styles
                .fills
                .iter()
                .map(|f| fill(f, scheme))
                .collect::<Result<_>>()?,
            borders: styles
                .borders
                .iter()
                .map(|b| border(b, scheme))
                .collect::<Result<_>>()?,
            cell_xfs: styles
                .cell_xfs
                .iter()
                .map(|xf| cell_format(xf, &masters))
                .collect::<Result<_>>()?,
            differential_formats: styles
                .dxfs
                .iter()
                .enumerate()
                .map(|(i, dxf)| differential_format(i, dxf, scheme))
                .collect::<Result<_>>()?,
        })
    }
}
