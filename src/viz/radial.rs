//! Radar and pizza charts.

use anyhow::Result;
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::legend::LegendEntry;
use super::text::{Label, draw_label};
use super::types::{Rect, pt};
use super::util::{
    BRAND_GREEN, BRAND_INK, BRAND_NAVY, BRAND_YELLOW, GUIDE, PAPER, draw_err, px, thick_line,
    with_alpha,
};

const RADAR_RINGS: usize = 4;
/// Radar radius as a fraction of the half-width of its square.
pub const RADAR_RIM: f64 = 0.78;
const COMPARE_ALPHA: f64 = 0.6;
pub const COMPARE_LABELS: [&str; 2] = ["Series A", "Series B"];

/// Pizza values live on a 0–100 scale.
pub const PIZZA_SCALE: f64 = 100.0;
/// Metric labels sit at this fraction of the pizza radius.
const PIZZA_PARAM_LOCATION: f64 = 1.10;
const PIZZA_GUIDES: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Shared `(min, max)` radar range for every metric: `[0, max(values)]`, or `[0, 1]` when
/// nothing is above zero.
pub fn radar_axis_range(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() && max > f64::EPSILON {
        (0.0, max)
    } else {
        (0.0, 1.0)
    }
}

/// Legend for a radar with a comparison overlay.
pub fn radar_compare_legend() -> Vec<LegendEntry> {
    vec![
        LegendEntry::swatch(COMPARE_LABELS[0], BRAND_NAVY.to_rgba()),
        LegendEntry::swatch(COMPARE_LABELS[1], BRAND_YELLOW.to_rgba()),
    ]
}

/// Fraction of the pizza radius covered by a value, clamped to the 0–100 scale.
pub fn pizza_fraction(value: f64) -> f64 {
    (value / PIZZA_SCALE).clamp(0.0, 1.0)
}

/// Short human label for a number: grouped integers, otherwise up to two decimals.
pub fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 && v.abs() < i64::MAX as f64 {
        return (v.round() as i64).to_formatted_string(&Locale::en);
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Polar frame: centre and radius in pixels, spoke `i` of `n` starting at the top going
/// clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub center: (f64, f64),
    pub radius: f64,
}

impl Polar {
    /// Square area inside `plot`, shrunk to leave room for labels around the rim.
    pub fn fit(plot: Rect, rim: f64) -> Self {
        let sq = plot.fit_aspect(1.0);
        Self {
            center: sq.center(),
            radius: sq.width / 2.0 * rim,
        }
    }

    pub fn angle(i: usize, n: usize) -> f64 {
        -FRAC_PI_2 + i as f64 * TAU / n.max(1) as f64
    }

    /// Pixel position at `frac` of the radius along `angle`.
    pub fn at(&self, angle: f64, frac: f64) -> (f64, f64) {
        let r = self.radius * frac;
        (self.center.0 + r * angle.cos(), self.center.1 + r * angle.sin())
    }
}

fn circle_path(polar: &Polar, frac: f64) -> Vec<(i32, i32)> {
    (0..=96)
        .map(|i| px(polar.at(i as f64 * TAU / 96.0, frac)))
        .collect()
}

fn radar_polygon(polar: &Polar, values: &[f64], range: (f64, f64)) -> Vec<(i32, i32)> {
    let span = range.1 - range.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let frac = ((v - range.0) / span).clamp(0.0, 1.0);
            px(polar.at(Polar::angle(i, values.len()), frac))
        })
        .collect()
}

/// Radar with alternating rings, spokes, the primary polygon and an optional overlay.
pub fn draw_radar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: Rect,
    metrics: &[String],
    values: &[f64],
    compare: Option<&[f64]>,
) -> Result<()> {
    let polar = Polar::fit(plot, RADAR_RIM);
    let n = metrics.len();
    let range = radar_axis_range(values);

    // Rings, outermost first so inner bands paint over
    for ring in (1..=RADAR_RINGS).rev() {
        let frac = ring as f64 / RADAR_RINGS as f64;
        let fill = if ring % 2 == 0 { PAPER } else { GUIDE };
        root.draw(&Polygon::new(circle_path(&polar, frac), fill.filled()))
            .map_err(draw_err)?;
        root.draw(&PathElement::new(circle_path(&polar, frac), GUIDE.stroke_width(2)))
            .map_err(draw_err)?;
    }
    for i in 0..n {
        thick_line(
            root,
            polar.center,
            polar.at(Polar::angle(i, n), 1.0),
            pt(0.8),
            GUIDE.to_rgba(),
        )?;
    }

    root.draw(&Polygon::new(
        radar_polygon(&polar, values, range),
        BRAND_NAVY.filled(),
    ))
    .map_err(draw_err)?;
    if let Some(other) = compare {
        root.draw(&Polygon::new(
            radar_polygon(&polar, other, range),
            with_alpha(BRAND_YELLOW.to_rgba(), COMPARE_ALPHA).filled(),
        ))
        .map_err(draw_err)?;
    }

    // Range labels along the first spoke
    let range_label = Label::new(pt(8.0), BRAND_INK).anchor(HPos::Left, VPos::Center);
    for ring in 1..=RADAR_RINGS {
        let frac = ring as f64 / RADAR_RINGS as f64;
        let v = range.0 + (range.1 - range.0) * frac;
        let (x, y) = polar.at(Polar::angle(0, n), frac);
        draw_label(root, &format_value(v), px((x + pt(3.0), y)), range_label)?;
    }

    let param_label = Label::new(pt(9.0), BRAND_NAVY);
    for (i, metric) in metrics.iter().enumerate() {
        let angle = Polar::angle(i, n);
        let at = px(polar.at(angle, 1.08));
        draw_label(root, metric, at, param_label.anchor(h_for(angle), v_for(angle)))?;
    }
    Ok(())
}

/// Pizza: one equal wedge per metric on a 0–100 scale.
pub fn draw_pizza<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: Rect,
    metrics: &[String],
    values: &[f64],
) -> Result<()> {
    let polar = Polar::fit(plot, 0.80);
    let n = metrics.len().max(1);
    let step = TAU / n as f64;
    let gap = step * 0.02;

    for (i, v) in values.iter().enumerate() {
        let a0 = Polar::angle(i, n) + gap;
        let a1 = a0 + step - 2.0 * gap;
        root.draw(&Polygon::new(wedge(&polar, a0, a1, 1.0), PAPER.filled()))
            .map_err(draw_err)?;
        let frac = pizza_fraction(*v);
        if frac > 0.0 {
            root.draw(&Polygon::new(wedge(&polar, a0, a1, frac), BRAND_GREEN.filled()))
                .map_err(draw_err)?;
        }
    }

    // Guide circles and wedge borders
    for frac in PIZZA_GUIDES {
        root.draw(&PathElement::new(circle_path(&polar, frac), GUIDE.stroke_width(2)))
            .map_err(draw_err)?;
    }
    for i in 0..n {
        thick_line(
            root,
            polar.center,
            polar.at(Polar::angle(i, n), 1.0),
            pt(1.0),
            GUIDE.to_rgba(),
        )?;
    }

    let value_label = Label::new(pt(9.0), BRAND_INK).anchor(HPos::Center, VPos::Center);
    let param_label = Label::new(pt(9.0), BRAND_INK);
    for (i, metric) in metrics.iter().enumerate() {
        let mid = Polar::angle(i, n) + step / 2.0;
        if let Some(v) = values.get(i) {
            let frac = pizza_fraction(*v).max(0.12);
            draw_label(root, &format_value(*v), px(polar.at(mid, frac)), value_label)?;
        }
        let at = px(polar.at(mid, PIZZA_PARAM_LOCATION));
        draw_label(root, metric, at, param_label.anchor(h_for(mid), v_for(mid)))?;
    }
    Ok(())
}

/// Closed wedge from the centre between two angles.
fn wedge(polar: &Polar, a0: f64, a1: f64, frac: f64) -> Vec<(i32, i32)> {
    let steps = (((a1 - a0) / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push(px(polar.center));
    for k in 0..=steps {
        let a = a0 + (a1 - a0) * k as f64 / steps as f64;
        pts.push(px(polar.at(a, frac)));
    }
    pts
}

/// Horizontal anchor that keeps a rim label outside the circle.
fn h_for(angle: f64) -> HPos {
    let c = angle.cos();
    if c > 0.2 {
        HPos::Left
    } else if c < -0.2 {
        HPos::Right
    } else {
        HPos::Center
    }
}

fn v_for(angle: f64) -> VPos {
    let s = angle.sin();
    if s > 0.2 {
        VPos::Top
    } else if s < -0.2 {
        VPos::Bottom
    } else {
        VPos::Center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_radar_gets_unit_range() {
        assert_eq!(radar_axis_range(&[0.0, 0.0, 0.0]), (0.0, 1.0));
        assert_eq!(radar_axis_range(&[]), (0.0, 1.0));
        assert_eq!(radar_axis_range(&[2.0, 7.5, 1.0]), (0.0, 7.5));
    }

    #[test]
    fn pizza_values_are_clamped() {
        assert_eq!(pizza_fraction(150.0), 1.0);
        assert_eq!(pizza_fraction(-3.0), 0.0);
        assert_eq!(pizza_fraction(45.0), 0.45);
    }

    #[test]
    fn first_spoke_points_up() {
        let p = Polar {
            center: (100.0, 100.0),
            radius: 50.0,
        };
        let (x, y) = p.at(Polar::angle(0, 5), 1.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
        // Second spoke is to the right of the first
        assert!(p.at(Polar::angle(1, 4), 1.0).0 > 100.0);
    }

    #[test]
    fn values_are_formatted_compactly() {
        assert_eq!(format_value(12000.0), "12,000");
        assert_eq!(format_value(0.35), "0.35");
        assert_eq!(format_value(2.50), "2.5");
    }
}
