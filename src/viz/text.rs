//! Text measurement and font-gated text drawing.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use super::fonts::text_available;
use super::util::draw_err;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

/// How a label is set.
#[derive(Clone, Copy)]
pub struct Label {
    pub size_px: f64,
    pub color: RGBColor,
    pub bold: bool,
    pub h: HPos,
    pub v: VPos,
}

impl Label {
    pub fn new(size_px: f64, color: RGBColor) -> Self {
        Self {
            size_px,
            color,
            bold: false,
            h: HPos::Left,
            v: VPos::Top,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchor(mut self, h: HPos, v: VPos) -> Self {
        self.h = h;
        self.v = v;
        self
    }
}

/// Draw `text` at `at`. Without a registered font this is a no-op.
pub fn draw_label<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    at: (i32, i32),
    label: Label,
) -> Result<()> {
    if !text_available() || text.trim().is_empty() {
        return Ok(());
    }
    let style = if label.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    let font = FontDesc::new(FontFamily::SansSerif, label.size_px, style);
    let text_style = TextStyle::from(font)
        .color(&label.color)
        .pos(Pos::new(label.h, label.v));
    area.draw(&Text::new(text, at, text_style))
        .map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Saka", 10, 200), "Saka");
    }

    #[test]
    fn long_text_gets_one_ellipsis() {
        let t = truncate_to_width("Bukayo Saka • Free Kick", 10, 60);
        assert!(t.ends_with('…'));
        assert_eq!(t.matches('…').count(), 1);
        assert!(estimate_text_width_px(&t, 10) <= 60);
    }
}
