//! Color resolution to concrete ARGB.

use crate::model::Color;
use crate::xlsx::{ColorNode, ColorScheme, ThemeColor};

const BLACK: u32 = 0xFF00_0000;
const TRANSPARENT: u32 = 0x00FF_FFFF;

/// Legacy indexed palette, indices 0..=63.
const INDEXED_COLORS: [u32; 64] = [
    0xFF000000, 0xFFFFFFFF, 0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFF00, 0xFFFF00FF, 0xFF00FFFF,
    0xFF000000, 0xFFFFFFFF, 0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFF00, 0xFFFF00FF, 0xFF00FFFF,
    0xFF800000, 0xFF008000, 0xFF000080, 0xFF808000, 0xFF800080, 0xFF008080, 0xFFC0C0C0, 0xFF808080,
    0xFF9999FF, 0xFF993366, 0xFFFFFFCC, 0xFFCCFFFF, 0xFF660066, 0xFFFF8080, 0xFF0066CC, 0xFFCCCCFF,
    0xFF000080, 0xFFFF00FF, 0xFFFFFF00, 0xFF00FFFF, 0xFF800080, 0xFF800000, 0xFF008080, 0xFF0000FF,
    0xFF00CCFF, 0xFFCCFFFF, 0xFFCCFFCC, 0xFFFFFF99, 0xFF99CCFF, 0xFFFF99CC, 0xFFCC99FF, 0xFFFFCC99,
    0xFF3366FF, 0xFF33CCCC, 0xFF99CC00, 0xFFFFCC00, 0xFFFF9900, 0xFFFF6600, 0xFF666699, 0xFF969696,
    0xFF003366, 0xFF339966, 0xFF003300, 0xFF333300, 0xFF993300, 0xFF993366, 0xFF333399, 0xFF333333,
];

/// Resolve a color reference against the document theme.
///
/// Precedence is `auto`, then `rgb`, then `indexed`, then `theme`. A reference
/// with none of them resolves to transparent. `tint` is not applied.
pub fn resolve(color: &ColorNode, scheme: Option<&ColorScheme>) -> Color {
    let argb = if color.auto == Some(true) {
        BLACK
    } else if let Some(rgb) = &color.rgb {
        parse_argb(rgb)
    } else if let Some(index) = color.indexed {
        indexed(index)
    } else if let Some(slot) = color.theme {
        theme(slot, scheme)
    } else {
        TRANSPARENT
    };
    Color::from_argb(argb)
}

/// Parse `RRGGBB` or `AARRGGBB`, optionally `#`-prefixed. Six digits or fewer
/// are made opaque.
pub fn parse_argb(text: &str) -> u32 {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.is_empty() || hex.len() > 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return BLACK;
    }
    match u32::from_str_radix(hex, 16) {
        Ok(value) if hex.len() <= 6 => value | BLACK,
        Ok(value) => value,
        Err(_) => BLACK,
    }
}

/// Legacy palette lookup; gaps fall back to black.
pub fn indexed(index: u32) -> u32 {
    match index {
        0..=63 => INDEXED_COLORS[index as usize],
        // system foreground / background
        64 | 65 => TRANSPARENT,
        _ => BLACK,
    }
}

/// Theme slot lookup. The dark/light pairs are stored swapped relative to
/// their slot numbers, so 0<->1 and 2<->3 are exchanged before indexing.
pub fn theme(slot: u32, scheme: Option<&ColorScheme>) -> u32 {
    let position = match slot {
        0 => 1,
        1 => 0,
        2 => 3,
        3 => 2,
        other => other,
    };
    let Some(entry) = scheme.and_then(|s| s.get(position as usize)) else {
        return BLACK;
    };
    match entry {
        ThemeColor::System { last_color } => last_color.as_deref().map_or(BLACK, parse_argb),
        ThemeColor::Rgb(hex) => parse_argb(hex),
        ThemeColor::Other => TRANSPARENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ColorScheme {
        ColorScheme {
            entries: vec![
                ThemeColor::System {
                    last_color: Some("000000".to_string()),
                },
                ThemeColor::System {
                    last_color: Some("FFFFFF".to_string()),
                },
                ThemeColor::Rgb("44546A".to_string()),
                ThemeColor::Rgb("E7E6E6".to_string()),
                ThemeColor::Rgb("4472C4".to_string()),
                ThemeColor::System { last_color: None },
                ThemeColor::Other,
            ],
        }
    }

    fn argb(color: ColorNode, scheme: Option<&ColorScheme>) -> String {
        resolve(&color, scheme).argb
    }

    #[test]
    fn test_precedence() {
        let all = ColorNode {
            auto: Some(true),
            rgb: Some("FF123456".to_string()),
            indexed: Some(2),
            theme: Some(4),
            tint: None,
        };
        assert_eq!(argb(all.clone(), None), "FF000000");

        let no_auto = ColorNode {
            auto: Some(false),
            ..all.clone()
        };
        assert_eq!(argb(no_auto.clone(), None), "FF123456");

        let indexed_only = ColorNode {
            rgb: None,
            ..no_auto
        };
        assert_eq!(argb(indexed_only, None), "FFFF0000");

        assert_eq!(argb(ColorNode::default(), None), "00FFFFFF");
    }

    #[test]
    fn test_rgb_forms() {
        assert_eq!(parse_argb("FF0000"), 0xFFFF0000);
        assert_eq!(parse_argb("#00ff00"), 0xFF00FF00);
        assert_eq!(parse_argb("80112233"), 0x80112233);
        assert_eq!(parse_argb("F"), 0xFF00000F);
        assert_eq!(parse_argb(""), BLACK);
        assert_eq!(parse_argb("#"), BLACK);
        assert_eq!(parse_argb("GGGGGG"), BLACK);
        assert_eq!(parse_argb("FF11223344"), BLACK);
    }

    #[test]
    fn test_indexed_palette() {
        assert_eq!(indexed(0), 0xFF000000);
        assert_eq!(indexed(22), 0xFFC0C0C0);
        assert_eq!(indexed(63), 0xFF333333);
        assert_eq!(indexed(64), TRANSPARENT);
        assert_eq!(indexed(65), TRANSPARENT);
        assert_eq!(indexed(66), BLACK);
        assert_eq!(indexed(72), BLACK);
        assert_eq!(indexed(81), BLACK);
        assert_eq!(indexed(500), BLACK);
    }

    #[test]
    fn test_theme_slot_swap() {
        let scheme = scheme();
        // slot 0 reads nominal entry 1, slot 2 reads nominal entry 3
        assert_eq!(theme(0, Some(&scheme)), 0xFFFFFFFF);
        assert_eq!(theme(1, Some(&scheme)), 0xFF000000);
        assert_eq!(theme(2, Some(&scheme)), 0xFFE7E6E6);
        assert_eq!(theme(3, Some(&scheme)), 0xFF44546A);
        assert_eq!(theme(4, Some(&scheme)), 0xFF4472C4);
    }

    #[test]
    fn test_theme_fallbacks() {
        let scheme = scheme();
        assert_eq!(theme(5, Some(&scheme)), BLACK);
        assert_eq!(theme(6, Some(&scheme)), TRANSPARENT);
        assert_eq!(theme(11, Some(&scheme)), BLACK);
        assert_eq!(theme(0, None), BLACK);
    }

    #[test]
    fn test_tint_is_ignored() {
        let scheme = scheme();
        let tinted = ColorNode {
            theme: Some(4),
            tint: Some(-0.25),
            ..Default::default()
        };
        assert_eq!(argb(tinted, Some(&scheme)), "FF4472C4");
    }
}
