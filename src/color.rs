//! Parsing of caller-supplied colors (`#RGB`, `#RRGGBB`, `#RRGGBBAA`, a few CSS names).

use plotters::style::{RGBAColor, RGBColor};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::RenderError;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("static regex")
});

const NAMED: [(&str, (u8, u8, u8)); 14] = [
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("navy", (0, 0, 128)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("gold", (255, 215, 0)),
    ("teal", (0, 128, 128)),
    ("crimson", (220, 20, 60)),
];

/// Parse a color string. Returns `None` for anything unrecognized.
pub fn parse_color(raw: &str) -> Option<RGBAColor> {
    let s = raw.trim();
    if let Some(caps) = HEX_COLOR.captures(s) {
        let hex = caps.get(1)?.as_str();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return match hex.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(RGBAColor(nib(0)?, nib(1)?, nib(2)?, 1.0))
            }
            6 => Some(RGBAColor(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            _ => Some(RGBAColor(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                byte(6)? as f64 / 255.0,
            )),
        };
    }
    let lower = s.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, (r, g, b))| RGBAColor(*r, *g, *b, 1.0))
}

/// Like [`parse_color`], but reports the offending value as a validation error.
pub fn require_color(raw: &str) -> Result<RGBAColor, RenderError> {
    parse_color(raw).ok_or_else(|| RenderError::validation(format!("Invalid color '{raw}'.")))
}

/// Compile-time hex constant to an opaque plotters color.
pub const fn rgb(hex: u32) -> RGBColor {
    RGBColor(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}
