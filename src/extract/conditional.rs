//! Conditional formatting rule extraction.

use crate::model::ConditionalFormatting;
use crate::xlsx::{CfRuleChild, CfRuleNode, ColorScaleEntry, ConditionalFormattingNode};

/// Rule arguments in child order: formula texts, color-scale value stops as
/// `type, val` pairs, color stops as their `rgb`.
fn arguments(rule: &CfRuleNode) -> Vec<Option<String>> {
    let mut args = Vec::new();
    for child in &rule.children {
        match child {
            CfRuleChild::Formula(text) => args.push(Some(text.clone())),
            CfRuleChild::ColorScale(entries) => {
                for entry in entries {
                    match entry {
                        ColorScaleEntry::Value { value_type, val } => {
                            args.push(value_type.clone());
                            args.push(val.clone());
                        }
                        ColorScaleEntry::Color { rgb } => args.push(rgb.clone()),
                        ColorScaleEntry::Other(_) => {}
                    }
                }
            }
            CfRuleChild::Other(_) => {}
        }
    }
    args
}

/// One record per rule of the group, in source order.
pub fn extract(group: &ConditionalFormattingNode) -> Vec<ConditionalFormatting> {
    group
        .rules
        .iter()
        .map(|rule| ConditionalFormatting {
            seq_ref: group.sqref.clone(),
            rule_type: rule.rule_type.clone(),
            above_avg: rule.above_average.unwrap_or(false),
            bottom: rule.bottom.unwrap_or(false),
            equal_avg: rule.equal_average.unwrap_or(false),
            percent: rule.percent.unwrap_or(false),
            time_period: rule.time_period.clone(),
            operator: rule.operator.clone(),
            arguments: arguments(rule),
            text: rule.text.clone(),
            style_id: rule.dxf_id.unwrap_or(0),
            priority: rule.priority.unwrap_or(0),
            rank: rule.rank.unwrap_or(0),
        })
        .collect()
}
