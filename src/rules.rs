//! Marker and highlight rules shared by every pitch renderer.
//!
//! Rules arrive as ordered lists. Lookups scan them front to back and the first entry whose
//! `target` (markers) or `type` (highlights) matches wins, even if it carries no value.

use plotters::style::RGBAColor;

use crate::color::require_color;
use crate::error::RenderError;
use crate::geometry::Point;
use crate::models::{HighlightRule, MarkerRule, RenderRequest, Row};
use crate::viz::markers::MarkerShape;

pub const SHOT_TARGET: &str = "shot";
pub const PASS_TARGET: &str = "pass";
pub const PENALTY_AREA: &str = "penalty_area";

/// Depth of the penalty area from either goal line, in pitch units.
pub const PENALTY_AREA_DEPTH: f64 = 17.0;
/// Width of the penalty area, centred on the pitch, in pitch units.
pub const PENALTY_AREA_WIDTH: f64 = 64.7;

const DEFAULT_SHOT_KEY: &str = "shot";
const SHOT_TYPE_FIELDS: [&str; 3] = ["shot_type", "event_type", "event_name"];

/// Raw marker code of the first rule targeting `target`.
pub fn marker_override<'a>(rules: &'a [MarkerRule], target: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|r| {
            r.target
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(target))
        })
        .and_then(|r| r.marker.as_deref())
}

/// Raw color of the first highlight rule of type `kind`.
pub fn highlight_color<'a>(rules: &'a [HighlightRule], kind: &str) -> Option<&'a str> {
    rules
        .iter()
        .find(|r| {
            r.kind
                .as_deref()
                .is_some_and(|k| k.trim().eq_ignore_ascii_case(kind))
        })
        .and_then(|r| r.color.as_deref())
}

/// Grouping key for shot maps: first non-blank of `shot_type`, `event_type`, `event_name`.
pub fn shot_type_key(row: &Row) -> String {
    SHOT_TYPE_FIELDS
        .iter()
        .find_map(|f| row.text(f))
        .map(|v| v.trim().to_lowercase())
        .unwrap_or_else(|| DEFAULT_SHOT_KEY.to_string())
}

/// Default marker per shot type.
pub fn shot_shape(key: &str) -> MarkerShape {
    match key {
        "penalty" => MarkerShape::Square,
        "header" => MarkerShape::Triangle,
        "free kick" => MarkerShape::Diamond,
        // "shot", "shoot", "shoot location" and anything unknown
        _ => MarkerShape::Circle,
    }
}

pub fn in_penalty_area(x: f64, y: f64) -> bool {
    let y_min = (100.0 - PENALTY_AREA_WIDTH) / 2.0;
    let y_max = y_min + PENALTY_AREA_WIDTH;
    (x <= PENALTY_AREA_DEPTH || x >= 100.0 - PENALTY_AREA_DEPTH) && (y_min..=y_max).contains(&y)
}

/// Split points into `(inside, outside)` the penalty areas, keeping order in both halves.
pub fn partition_penalty_area(points: &[Point]) -> (Vec<Point>, Vec<Point>) {
    points.iter().partition(|(x, y)| in_penalty_area(*x, *y))
}

/// The rules of one request, looked up once and ready to draw with.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub shot_marker: Option<MarkerShape>,
    pub pass_marker: Option<MarkerShape>,
    pub penalty_highlight: Option<RGBAColor>,
}

impl RuleSet {
    pub fn from_request(req: &RenderRequest) -> Result<Self, RenderError> {
        let penalty_highlight = highlight_color(req.highlight_rules(), PENALTY_AREA)
            .map(require_color)
            .transpose()?;
        Ok(Self {
            shot_marker: marker_override(req.marker_rules(), SHOT_TARGET)
                .and_then(MarkerShape::from_code),
            pass_marker: marker_override(req.marker_rules(), PASS_TARGET)
                .and_then(MarkerShape::from_code),
            penalty_highlight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_area_classification() {
        assert!(in_penalty_area(10.0, 50.0));
        assert!(in_penalty_area(90.0, 20.0));
        assert!(!in_penalty_area(50.0, 50.0));
        assert!(!in_penalty_area(10.0, 10.0));
        assert!(in_penalty_area(17.0, 17.65));
    }

    #[test]
    fn first_matching_rule_wins_even_without_value() {
        let rules = vec![
            MarkerRule {
                target: Some("Shot".into()),
                marker: None,
            },
            MarkerRule {
                target: Some("shot".into()),
                marker: Some("s".into()),
            },
        ];
        assert_eq!(marker_override(&rules, SHOT_TARGET), None);
        assert_eq!(marker_override(&rules, PASS_TARGET), None);
    }

    #[test]
    fn shot_key_prefers_shot_type_and_normalizes() {
        let row = Row::new()
            .with("event_type", "Shot")
            .with("shot_type", "  Free Kick ");
        assert_eq!(shot_type_key(&row), "free kick");
        assert_eq!(shot_type_key(&Row::new().with("shot_type", "")), "shot");
        assert_eq!(shot_shape("free kick"), MarkerShape::Diamond);
        assert_eq!(shot_shape("volley"), MarkerShape::Circle);
    }

    #[test]
    fn partition_keeps_order() {
        let pts = vec![(5.0, 50.0), (50.0, 50.0), (95.0, 40.0), (60.0, 10.0)];
        let (inside, outside) = partition_penalty_area(&pts);
        assert_eq!(inside, vec![(5.0, 50.0), (95.0, 40.0)]);
        assert_eq!(outside, vec![(50.0, 50.0), (60.0, 10.0)]);
    }
}
