//! Conditional formatting rule records.

use serde::{Deserialize, Serialize};

/// One conditional formatting rule, flattened with its target range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatting {
    /// Target range list (`sqref`)
    pub seq_ref: String,

    /// Rule type (`cellIs`, `colorScale`, `expression`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,

    pub above_avg: bool,
    pub bottom: bool,
    pub equal_avg: bool,
    pub percent: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Formula texts, or color-scale stops as `type, val` pairs and `rgb`
    /// entries in source order. Missing stop attributes are `null`.
    pub arguments: Vec<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Differential format index (`dxfId`), 0 when absent
    pub style_id: u32,

    pub priority: i32,
    pub rank: u32,
}
