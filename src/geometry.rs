//! Coordinate extraction from series rows.
//!
//! Every extractor is a stable filter: rows keep their original order and a row that lacks
//! any required coordinate is skipped, never reported.

use crate::models::{FieldNames, Row};

/// An `(x, y)` location on the pitch.
pub type Point = (f64, f64);

/// Origin and destination of a pass or carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// A weighted pass-network edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
    pub weight: f64,
}

pub fn point_of(row: &Row, x_field: &str, y_field: &str) -> Option<Point> {
    Some((row.number(x_field)?, row.number(y_field)?))
}

/// `(x, y)` for every row where both fields are numeric.
pub fn points(rows: &[Row], x_field: &str, y_field: &str) -> Vec<Point> {
    rows.iter()
        .filter_map(|r| point_of(r, x_field, y_field))
        .collect()
}

/// Segments for rows where origin and end coordinates are all numeric.
pub fn segments(rows: &[Row], fields: &FieldNames) -> Vec<Segment> {
    rows.iter()
        .filter_map(|r| {
            Some(Segment {
                start: point_of(r, &fields.x, &fields.y)?,
                end: point_of(r, &fields.end_x, &fields.end_y)?,
            })
        })
        .collect()
}

/// Pass-network edges from `from_x`/`from_y`/`to_x`/`to_y` with weight `count` (default 1).
///
/// All four coordinates are required together and the weight comes from the same row, so
/// weights always line up with their edge.
pub fn edges(rows: &[Row]) -> Vec<Edge> {
    rows.iter()
        .filter_map(|r| {
            Some(Edge {
                from: point_of(r, "from_x", "from_y")?,
                to: point_of(r, "to_x", "to_y")?,
                weight: r.number("count").unwrap_or(1.0),
            })
        })
        .collect()
}
