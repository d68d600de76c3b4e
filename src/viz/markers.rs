//! Marker shapes and how to stamp them onto a pixel drawing area.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::util::draw_err;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    TriangleDown,
    Diamond,
    Cross,
    X,
    Star,
}

impl MarkerShape {
    /// Accepts matplotlib marker codes (`o`, `s`, `^`, `v`, `D`, `+`, `x`, `*`) and plain names.
    pub fn from_code(code: &str) -> Option<MarkerShape> {
        let c = code.trim();
        let shape = match c {
            "o" | "." => MarkerShape::Circle,
            "s" => MarkerShape::Square,
            "^" => MarkerShape::Triangle,
            "v" => MarkerShape::TriangleDown,
            "D" | "d" => MarkerShape::Diamond,
            "+" | "P" => MarkerShape::Cross,
            "x" | "X" => MarkerShape::X,
            "*" => MarkerShape::Star,
            _ => match c.to_ascii_lowercase().as_str() {
                "circle" => MarkerShape::Circle,
                "square" => MarkerShape::Square,
                "triangle" | "triangle_up" => MarkerShape::Triangle,
                "triangle_down" => MarkerShape::TriangleDown,
                "diamond" => MarkerShape::Diamond,
                "cross" | "plus" => MarkerShape::Cross,
                "star" => MarkerShape::Star,
                _ => return None,
            },
        };
        Some(shape)
    }

    fn outline(&self, (x, y): (i32, i32), s: i32) -> Vec<(i32, i32)> {
        match self {
            MarkerShape::Square => vec![(x - s, y - s), (x + s, y - s), (x + s, y + s), (x - s, y + s)],
            MarkerShape::Triangle => vec![(x, y - s), (x - s, y + s), (x + s, y + s)],
            MarkerShape::TriangleDown => vec![(x, y + s), (x - s, y - s), (x + s, y - s)],
            MarkerShape::Diamond => vec![(x, y - s), (x - s, y), (x, y + s), (x + s, y)],
            MarkerShape::Star => (0..10)
                .map(|i| {
                    let r = if i % 2 == 0 { s as f64 } else { s as f64 * 0.45 };
                    let a = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
                    (x + (r * a.cos()).round() as i32, y + (r * a.sin()).round() as i32)
                })
                .collect(),
            MarkerShape::Circle | MarkerShape::Cross | MarkerShape::X => Vec::new(),
        }
    }
}

/// Stamp one marker centred at `c` (pixels) with half-size `size`.
pub fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    c: (i32, i32),
    size: i32,
    fill: RGBAColor,
    edge: Option<RGBAColor>,
    shape: MarkerShape,
) -> Result<()> {
    let (x, y) = c;
    let s = size.max(1);
    match shape {
        MarkerShape::Circle => {
            area.draw(&Circle::new(c, s, fill.filled()))
                .map_err(draw_err)?;
            if let Some(edge) = edge {
                area.draw(&Circle::new(c, s, edge.stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }
        MarkerShape::Cross => {
            let st = fill.stroke_width(2);
            area.draw(&PathElement::new(vec![(x - s, y), (x + s, y)], st))
                .map_err(draw_err)?;
            area.draw(&PathElement::new(vec![(x, y - s), (x, y + s)], st))
                .map_err(draw_err)?;
        }
        MarkerShape::X => {
            let st = fill.stroke_width(2);
            area.draw(&PathElement::new(vec![(x - s, y - s), (x + s, y + s)], st))
                .map_err(draw_err)?;
            area.draw(&PathElement::new(vec![(x - s, y + s), (x + s, y - s)], st))
                .map_err(draw_err)?;
        }
        _ => {
            let pts = shape.outline(c, s);
            area.draw(&Polygon::new(pts.clone(), fill.filled()))
                .map_err(draw_err)?;
            if let Some(edge) = edge {
                let mut ring = pts;
                if let Some(first) = ring.first().copied() {
                    ring.push(first);
                }
                area.draw(&PathElement::new(ring, edge.stroke_width(1)))
                    .map_err(draw_err)?;
            }
        }
    }
    Ok(())
}
