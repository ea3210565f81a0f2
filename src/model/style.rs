//! Style records: number formats, fonts, fills, borders and cell formats.

use serde::{Deserialize, Serialize};

/// Declares a closed enum of XML enumeration values with a lookup from the
/// XML spelling.
macro_rules! xml_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $xml:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Map the XML attribute value, `None` when it is not a known value.
            pub fn from_xml(value: &str) -> Option<Self> {
                match value {
                    $($xml => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

xml_enum! {
    /// Font underline style.
    Underline {
        None => "none",
        Single => "single",
        Double => "double",
        SingleAccounting => "singleAccounting",
        DoubleAccounting => "doubleAccounting",
    }
}

xml_enum! {
    /// Font baseline position.
    FontVerticalAlignment {
        Baseline => "baseline",
        Superscript => "superscript",
        Subscript => "subscript",
    }
}

xml_enum! {
    BorderLineType {
        None => "none",
        Thin => "thin",
        Medium => "medium",
        Dashed => "dashed",
        Dotted => "dotted",
        Thick => "thick",
        Double => "double",
        Hair => "hair",
        MediumDashed => "mediumDashed",
        DashDot => "dashDot",
        MediumDashDot => "mediumDashDot",
        DashDotDot => "dashDotDot",
        MediumDashDotDot => "mediumDashDotDot",
        SlantDashDot => "slantDashDot",
    }
}

xml_enum! {
    /// Pattern fill type.
    PatternType {
        None => "none",
        Solid => "solid",
        MediumGray => "mediumGray",
        DarkGray => "darkGray",
        LightGray => "lightGray",
        DarkHorizontal => "darkHorizontal",
        DarkVertical => "darkVertical",
        DarkDown => "darkDown",
        DarkUp => "darkUp",
        DarkGrid => "darkGrid",
        DarkTrellis => "darkTrellis",
        LightHorizontal => "lightHorizontal",
        LightVertical => "lightVertical",
        LightDown => "lightDown",
        LightUp => "lightUp",
        LightGrid => "lightGrid",
        LightTrellis => "lightTrellis",
        Gray125 => "gray125",
        Gray0625 => "gray0625",
    }
}

xml_enum! {
    HorizontalAlignment {
        General => "general",
        Left => "left",
        Center => "center",
        Right => "right",
        Fill => "fill",
        Justify => "justify",
        CenterContinuous => "centerContinuous",
        Distributed => "distributed",
    }
}

xml_enum! {
    VerticalAlignment {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
        Justify => "justify",
        Distributed => "distributed",
    }
}

/// A resolved color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// 8 uppercase hex digits, alpha first
    pub argb: String,
}

impl Color {
    pub fn from_argb(argb: u32) -> Self {
        Self {
            argb: format!("{:08X}", argb),
        }
    }
}

/// Custom number format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumFmt {
    pub format_code: String,
    pub number_format_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<FontVerticalAlignment>,

    /// Size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFill {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<PatternType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<Color>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Color>,
}

/// Gradient fills are recorded without their stops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientFill {}

/// A fill; both halves absent means "no fill declared".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternFill>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<GradientFill>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderProperties {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub line_type: Option<BorderLineType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderProperties>,
}

/// Cell alignment; every attribute is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAlignment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAlignment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_indent: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_last_line: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shrink_to_fit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_order: Option<u32>,
}

/// A resolved cell format (`cellXfs` entry after applying its master).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellXf {
    /// Master format the entry refers to, as declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmt_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_fmt_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// Differential format referenced by conditional formatting rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentialFormat {
    /// 1-based position in the stylesheet's `dxfs`
    pub dfx_id: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
}
