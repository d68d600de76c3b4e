//! Legend composition and the bottom-right legend panel.

use ahash::AHashSet;
use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use super::StyledSeries;
use super::markers::{MarkerShape, draw_marker};
use super::text::{Label, draw_label, estimate_text_width_px, truncate_to_width};
use super::types::pt;
use super::util::{BRAND_INK, draw_err};
use crate::models::ChartType;
use crate::rules::{RuleSet, shot_shape, shot_type_key};

pub const PENALTY_AREA_LABEL: &str = "Penalty area";

/// What is drawn next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendGlyph {
    /// Filled color patch.
    Swatch,
    /// Marker with a black edge.
    Marker(MarkerShape),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBAColor,
    pub glyph: LegendGlyph,
}

impl LegendEntry {
    pub fn swatch(label: impl Into<String>, color: RGBAColor) -> Self {
        Self {
            label: label.into(),
            color,
            glyph: LegendGlyph::Swatch,
        }
    }

    pub fn marker(label: impl Into<String>, color: RGBAColor, shape: MarkerShape) -> Self {
        Self {
            label: label.into(),
            color,
            glyph: LegendGlyph::Marker(shape),
        }
    }
}

/// Legend entries for a pitch chart.
pub fn compose_spatial_legend(
    chart: ChartType,
    series: &[StyledSeries<'_>],
    rules: &RuleSet,
) -> Vec<LegendEntry> {
    let mut entries = Vec::new();
    for s in series {
        let label = s.series.label.as_str();
        match (chart, rules.shot_marker, rules.pass_marker) {
            (ChartType::ShotMap, Some(shape), _) => {
                entries.push(LegendEntry::marker(format!("{label} • Shots"), s.color, shape));
            }
            (ChartType::ShotMap, None, _) => {
                let keys = observed_shot_types(s);
                if keys.is_empty() {
                    entries.push(LegendEntry::swatch(label, s.color));
                }
                for key in keys {
                    entries.push(LegendEntry::marker(
                        format!("{label} • {}", title_case(&key)),
                        s.color,
                        shot_shape(&key),
                    ));
                }
            }
            (ChartType::PassMap | ChartType::PitchPlot, _, Some(shape)) => {
                entries.push(LegendEntry::marker(format!("{label} • Passes"), s.color, shape));
            }
            _ => entries.push(LegendEntry::swatch(label, s.color)),
        }
    }
    if chart.honors_penalty_highlight() {
        if let Some(color) = rules.penalty_highlight {
            entries.push(LegendEntry::swatch(PENALTY_AREA_LABEL, color));
        }
    }
    entries
}

/// Distinct shot-type keys of a series in first-seen order.
fn observed_shot_types(s: &StyledSeries<'_>) -> Vec<String> {
    let mut seen = AHashSet::new();
    s.series
        .data
        .iter()
        .map(shot_type_key)
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

/// Upper-case the first letter of every word ("free kick" -> "Free Kick").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Draw the legend as one unframed column anchored at the figure's bottom-right corner.
pub fn draw_legend_panel<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let (w_u32, h_u32) = root.dim_in_pixel();
    let (w, h) = (w_u32 as f64, h_u32 as f64);

    // Layout constants
    let font_px = pt(10.0).round() as u32;
    let line_h = (font_px as f64 * 1.45).round() as i32;
    let glyph_w = (font_px as f64 * 1.6).round() as i32;
    let glyph_h = (font_px as f64 * 0.7).round() as i32;
    let marker_size = pt(4.0).round() as i32;
    let text_gap = (font_px as f64 * 0.6).round() as i32;

    let max_text_px = (w * 0.42) as u32;
    let labels: Vec<String> = entries
        .iter()
        .map(|e| truncate_to_width(&e.label, font_px, max_text_px))
        .collect();
    let text_w = labels
        .iter()
        .map(|l| estimate_text_width_px(l, font_px) as i32)
        .max()
        .unwrap_or(0);

    let right = (w * 0.98).round() as i32;
    let bottom = (h * (1.0 - 0.005)).round() as i32;
    let left = right - (glyph_w + text_gap + text_w);
    let top = bottom - line_h * entries.len() as i32;

    let label_style = Label::new(font_px as f64, BRAND_INK).anchor(HPos::Left, VPos::Center);

    for (i, (entry, text)) in entries.iter().zip(labels.iter()).enumerate() {
        let cy = top + i as i32 * line_h + line_h / 2;
        match entry.glyph {
            LegendGlyph::Swatch => {
                root.draw(&Rectangle::new(
                    [(left, cy - glyph_h / 2), (left + glyph_w, cy + glyph_h / 2)],
                    entry.color.filled(),
                ))
                .map_err(draw_err)?;
            }
            LegendGlyph::Marker(shape) => {
                draw_marker(
                    root,
                    (left + glyph_w / 2, cy),
                    marker_size,
                    entry.color,
                    Some(BLACK.to_rgba()),
                    shape,
                )?;
            }
        }
        draw_label(root, text, (left + glyph_w + text_gap, cy), label_style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("free kick"), "Free Kick");
        assert_eq!(title_case("shoot location"), "Shoot Location");
        assert_eq!(title_case("left-foot"), "Left-Foot");
    }
}
