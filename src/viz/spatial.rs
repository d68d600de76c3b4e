//! Pitch chart renderers: heatmap, shot map, pass map, pitch plot and pass network.

use anyhow::Result;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::StyledSeries;
use super::markers::{MarkerShape, draw_marker};
use super::pitch::PitchFrame;
use super::types::{marker_radius_px, pt};
use super::util::{draw_err, thick_line, with_alpha};
use crate::geometry::{self, Edge, Point, Segment};
use crate::models::{ChartType, FieldNames, Row};
use crate::rules::{RuleSet, partition_penalty_area, shot_shape, shot_type_key};

/// Heatmap bins along the pitch length.
pub const HEAT_BINS_X: usize = 24;
/// Heatmap bins across the pitch width.
pub const HEAT_BINS_Y: usize = 16;
const HEAT_ALPHA: f64 = 0.65;

/// Widest pass-network edge, in points.
pub const MAX_EDGE_WIDTH_PT: f64 = 6.0;

const HIGHLIGHT_ALPHA: f64 = 0.9;

/// Scatter styling for one point cloud.
#[derive(Debug, Clone, Copy)]
struct Dots {
    size_pt2: f64,
    alpha: f64,
    edge: Option<RGBAColor>,
    shape: MarkerShape,
}

/// Draw every series of a pitch chart onto an already-drawn pitch.
pub fn draw_spatial<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    chart: ChartType,
    series: &[StyledSeries<'_>],
    fields: &FieldNames,
    rules: &RuleSet,
) -> Result<()> {
    for s in series {
        let rows = &s.series.data;
        match chart {
            ChartType::Heatmap => {
                let pts = geometry::points(rows, &fields.x, &fields.y);
                if pts.is_empty() {
                    debug!("heatmap: series '{}' has no points, skipped", s.series.label);
                    continue;
                }
                draw_heatmap(root, frame, &pts, s.color)?;
            }
            ChartType::PassNetwork => {
                let edges = geometry::edges(rows);
                if edges.is_empty() {
                    debug!("pass_network: series '{}' has no edges, skipped", s.series.label);
                    continue;
                }
                draw_pass_network(root, frame, &edges, s.color)?;
            }
            ChartType::ShotMap => draw_shot_map(root, frame, rows, fields, s.color, rules)?,
            ChartType::PassMap | ChartType::PitchPlot => {
                let pts = geometry::points(rows, &fields.x, &fields.y);
                if pts.is_empty() {
                    continue;
                }
                let segs = geometry::segments(rows, fields);
                let dots = Dots {
                    size_pt2: 30.0,
                    alpha: if chart == ChartType::PassMap { 0.7 } else { 0.8 },
                    edge: None,
                    shape: rules.pass_marker.unwrap_or(MarkerShape::Circle),
                };
                if chart == ChartType::PassMap {
                    draw_arrows(root, frame, &segs, s.color)?;
                    draw_highlighted(root, frame, &pts, s.color, rules.penalty_highlight, dots)?;
                } else {
                    draw_highlighted(root, frame, &pts, s.color, rules.penalty_highlight, dots)?;
                    draw_arrows(root, frame, &segs, s.color)?;
                }
            }
            ChartType::Radar | ChartType::Pizza | ChartType::Bumpy => {}
        }
    }
    Ok(())
}

/// Rows grouped by shot-type key, groups in first-seen order.
pub fn group_by_shot_type(rows: &[Row]) -> Vec<(String, Vec<&Row>)> {
    let mut groups: Vec<(String, Vec<&Row>)> = Vec::new();
    for row in rows {
        let key = shot_type_key(row);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(row),
            None => groups.push((key, vec![row])),
        }
    }
    groups
}

fn draw_shot_map<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    rows: &[Row],
    fields: &FieldNames,
    color: RGBAColor,
    rules: &RuleSet,
) -> Result<()> {
    for (key, members) in group_by_shot_type(rows) {
        let pts: Vec<Point> = members
            .iter()
            .filter_map(|r| geometry::point_of(r, &fields.x, &fields.y))
            .collect();
        if pts.is_empty() {
            continue;
        }
        let dots = Dots {
            size_pt2: 40.0,
            alpha: 0.85,
            edge: Some(BLACK.to_rgba()),
            shape: rules.shot_marker.unwrap_or_else(|| shot_shape(&key)),
        };
        draw_highlighted(root, frame, &pts, color, rules.penalty_highlight, dots)?;
    }
    Ok(())
}

/// Draw points in the series color, or split them around the penalty areas when a
/// highlight color is set. Both halves are drawn.
fn draw_highlighted<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    pts: &[Point],
    color: RGBAColor,
    highlight: Option<RGBAColor>,
    dots: Dots,
) -> Result<()> {
    match highlight {
        Some(hl) => {
            let (inside, outside) = partition_penalty_area(pts);
            draw_dots(root, frame, &outside, color, dots)?;
            draw_dots(
                root,
                frame,
                &inside,
                hl,
                Dots {
                    alpha: HIGHLIGHT_ALPHA,
                    ..dots
                },
            )
        }
        None => draw_dots(root, frame, pts, color, dots),
    }
}

fn draw_dots<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    pts: &[Point],
    color: RGBAColor,
    dots: Dots,
) -> Result<()> {
    let fill = with_alpha(color, dots.alpha);
    let radius = marker_radius_px(dots.size_pt2);
    for p in pts.iter().filter(|p| frame.contains(**p)) {
        draw_marker(
            root,
            frame.project_px(*p),
            radius,
            fill,
            dots.edge,
            dots.shape,
        )?;
    }
    Ok(())
}

fn draw_arrows<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    segs: &[Segment],
    color: RGBAColor,
) -> Result<()> {
    let fill = with_alpha(color, 0.7);
    let shaft = pt(1.0);
    let head_len = pt(5.0);
    let head_half = pt(2.5);
    for seg in segs {
        let a = frame.project(seg.start);
        let b = frame.project(seg.end);
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1.0 {
            continue;
        }
        let (ux, uy) = (dx / len, dy / len);
        let head = head_len.min(len * 0.5);
        let base = (b.0 - ux * head, b.1 - uy * head);
        thick_line(root, a, base, shaft, fill)?;
        let tip = vec![
            (b.0.round() as i32, b.1.round() as i32),
            (
                (base.0 - uy * head_half).round() as i32,
                (base.1 + ux * head_half).round() as i32,
            ),
            (
                (base.0 + uy * head_half).round() as i32,
                (base.1 - ux * head_half).round() as i32,
            ),
        ];
        root.draw(&Polygon::new(tip, fill.filled()))
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Count points per cell of a `bins_x` × `bins_y` grid over the full pitch.
///
/// Points outside 0–100 are ignored; 100 falls into the last bin.
pub fn bin_counts(pts: &[Point], bins_x: usize, bins_y: usize) -> Vec<Vec<u32>> {
    let mut grid = vec![vec![0u32; bins_y]; bins_x];
    let bin = |v: f64, n: usize| -> Option<usize> {
        if !(0.0..=100.0).contains(&v) {
            return None;
        }
        Some(((v / 100.0 * n as f64) as usize).min(n - 1))
    };
    for (x, y) in pts {
        if let (Some(ix), Some(iy)) = (bin(*x, bins_x), bin(*y, bins_y)) {
            grid[ix][iy] += 1;
        }
    }
    grid
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    pts: &[Point],
    color: RGBAColor,
) -> Result<()> {
    let grid = bin_counts(pts, HEAT_BINS_X, HEAT_BINS_Y);
    let max = grid.iter().flatten().copied().max().unwrap_or(0);
    if max == 0 {
        return Ok(());
    }
    let (cw, ch) = (100.0 / HEAT_BINS_X as f64, 100.0 / HEAT_BINS_Y as f64);
    for (ix, column) in grid.iter().enumerate() {
        for (iy, count) in column.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let x0 = ix as f64 * cw;
            let y0 = iy as f64 * ch;
            if let Some(cell) = frame.box_px(x0, x0 + cw, y0, y0 + ch) {
                let alpha = HEAT_ALPHA * *count as f64 / max as f64;
                root.draw(&Rectangle::new(cell, with_alpha(color, alpha).filled()))
                    .map_err(draw_err)?;
            }
        }
    }
    Ok(())
}

/// Line width in points for each edge: `max(w, 1) / max(max_w, 1) * 6`.
pub fn edge_widths(edges: &[Edge]) -> Vec<f64> {
    let max_w = edges
        .iter()
        .map(|e| e.weight)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1.0);
    edges
        .iter()
        .map(|e| e.weight.max(1.0) * MAX_EDGE_WIDTH_PT / max_w)
        .collect()
}

fn draw_pass_network<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &PitchFrame,
    edges: &[Edge],
    color: RGBAColor,
) -> Result<()> {
    let line_color = with_alpha(color, 0.7);
    for (edge, width) in edges.iter().zip(edge_widths(edges)) {
        thick_line(
            root,
            frame.project(edge.from),
            frame.project(edge.to),
            pt(width),
            line_color,
        )?;
    }
    let nodes: Vec<Point> = edges.iter().map(|e| e.from).collect();
    draw_dots(
        root,
        frame,
        &nodes,
        color,
        Dots {
            size_pt2: 60.0,
            alpha: 0.9,
            edge: None,
            shape: MarkerShape::Circle,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_edges_and_drop_outliers() {
        let grid = bin_counts(&[(0.0, 0.0), (100.0, 100.0), (101.0, 50.0), (50.0, 50.0)], 24, 16);
        assert_eq!(grid[0][0], 1);
        assert_eq!(grid[23][15], 1);
        assert_eq!(grid[12][8], 1);
        assert_eq!(grid.iter().flatten().sum::<u32>(), 3);
    }

    #[test]
    fn heaviest_edge_is_six_points_wide() {
        let e = |w: f64| Edge {
            from: (0.0, 0.0),
            to: (1.0, 1.0),
            weight: w,
        };
        let widths = edge_widths(&[e(10.0), e(5.0), e(0.0)]);
        assert_eq!(widths, vec![6.0, 3.0, 0.6]);
    }

    #[test]
    fn shot_groups_keep_first_seen_order() {
        let rows = vec![
            Row::new().with("shot_type", "Header"),
            Row::new(),
            Row::new().with("shot_type", "header"),
        ];
        let groups = group_by_shot_type(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "header");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "shot");
    }
}
