//! The pitch canvas: logical 0–100 coordinates projected onto a pixel rectangle.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::types::Rect;
use super::util::{PITCH_BACKGROUND, PITCH_LINES, draw_err, px};
use crate::models::Orientation;
use crate::rules::{PENALTY_AREA_DEPTH, PENALTY_AREA_WIDTH};

/// Pitch length over width when drawn horizontally.
const PITCH_ASPECT: f64 = 1.5;
const SIX_YARD_DEPTH: f64 = 5.8;
const SIX_YARD_WIDTH: f64 = 26.4;
const PENALTY_SPOT: f64 = 11.5;
/// Centre-circle radius in pitch units along and across the pitch (9.15 m on 105 × 68 m).
const CENTRE_CIRCLE: (f64, f64) = (9.15 / 105.0 * 100.0, 9.15 / 68.0 * 100.0);

/// Maps pitch coordinates to pixels for one orientation and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchFrame {
    pub rect: Rect,
    pub orientation: Orientation,
    pub half: bool,
}

impl PitchFrame {
    /// Largest pitch of the right proportions that fits in `area`.
    pub fn fit(area: Rect, orientation: Orientation, half: bool) -> Self {
        let length_factor = if half { 0.5 } else { 1.0 };
        let aspect = match orientation {
            Orientation::Horizontal => PITCH_ASPECT * length_factor,
            Orientation::Vertical => 1.0 / (PITCH_ASPECT * length_factor),
        };
        Self {
            rect: area.fit_aspect(aspect),
            orientation,
            half,
        }
    }

    /// Smallest visible x (along the pitch length).
    pub fn x_min(&self) -> f64 {
        if self.half { 50.0 } else { 0.0 }
    }

    /// Whether a pitch location is within the drawn extent.
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        (self.x_min()..=100.0).contains(&x) && (0.0..=100.0).contains(&y)
    }

    /// Pixel position of a pitch location.
    pub fn project(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let x0 = self.x_min();
        let along = (x - x0) / (100.0 - x0);
        let across = y / 100.0;
        let r = &self.rect;
        match self.orientation {
            Orientation::Horizontal => (r.left + along * r.width, r.bottom() - across * r.height),
            Orientation::Vertical => (r.left + (1.0 - across) * r.width, r.bottom() - along * r.height),
        }
    }

    pub fn project_px(&self, p: (f64, f64)) -> (i32, i32) {
        px(self.project(p))
    }

    /// Pixel rectangle covering a pitch-space box, clipped to the visible extent.
    pub fn box_px(&self, x0: f64, x1: f64, y0: f64, y1: f64) -> Option<[(i32, i32); 2]> {
        let (x0, x1) = (x0.max(self.x_min()), x1.min(100.0));
        if x0 >= x1 {
            return None;
        }
        let a = self.project_px((x0, y0));
        let b = self.project_px((x1, y1));
        Some([(a.0.min(b.0), a.1.min(b.1)), (a.0.max(b.0), a.1.max(b.1))])
    }
}

/// Fill the figure and draw pitch markings.
pub fn draw_pitch<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
) -> Result<()> {
    root.fill(&PITCH_BACKGROUND).map_err(draw_err)?;
    let line = PITCH_LINES.stroke_width(2);

    let outline = |x0: f64, x1: f64, y0: f64, y1: f64| -> Result<()> {
        if let Some([a, b]) = frame.box_px(x0, x1, y0, y1) {
            root.draw(&Rectangle::new([a, b], line)).map_err(draw_err)?;
        }
        Ok(())
    };

    outline(0.0, 100.0, 0.0, 100.0)?;

    // Halfway line, centre circle and spot
    root.draw(&PathElement::new(
        vec![frame.project_px((50.0, 0.0)), frame.project_px((50.0, 100.0))],
        line,
    ))
    .map_err(draw_err)?;
    let arc: Vec<(i32, i32)> = (0..=72)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 72.0;
            (50.0 + CENTRE_CIRCLE.0 * a.cos(), 50.0 + CENTRE_CIRCLE.1 * a.sin())
        })
        .filter(|p| frame.contains(*p))
        .map(|p| frame.project_px(p))
        .collect();
    root.draw(&PathElement::new(arc, line)).map_err(draw_err)?;
    root.draw(&Circle::new(frame.project_px((50.0, 50.0)), 3, PITCH_LINES.filled()))
        .map_err(draw_err)?;

    let pa_lo = (100.0 - PENALTY_AREA_WIDTH) / 2.0;
    let six_lo = (100.0 - SIX_YARD_WIDTH) / 2.0;
    for (goal_x, sign) in [(0.0, 1.0), (100.0, -1.0)] {
        let pa_x = goal_x + sign * PENALTY_AREA_DEPTH;
        let six_x = goal_x + sign * SIX_YARD_DEPTH;
        outline(
            f64::min(goal_x, pa_x),
            f64::max(goal_x, pa_x),
            pa_lo,
            pa_lo + PENALTY_AREA_WIDTH,
        )?;
        outline(
            f64::min(goal_x, six_x),
            f64::max(goal_x, six_x),
            six_lo,
            six_lo + SIX_YARD_WIDTH,
        )?;
        let spot = (goal_x + sign * PENALTY_SPOT, 50.0);
        if frame.contains(spot) {
            root.draw(&Circle::new(frame.project_px(spot), 3, PITCH_LINES.filled()))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}
