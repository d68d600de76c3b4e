use pss_viz::models::{ChartType, RenderRequest};
use pss_viz::rules::RuleSet;
use pss_viz::resolve_series;
use pss_viz::viz::legend::{LegendEntry, PENALTY_AREA_LABEL, compose_spatial_legend};
use pss_viz::viz::{LegendGlyph, MarkerShape, style_series};
use serde_json::json;

fn legend_for(v: serde_json::Value) -> Vec<LegendEntry> {
    let req: RenderRequest = serde_json::from_value(v).unwrap();
    let chart = ChartType::parse(&req.chart_type).unwrap();
    let rules = RuleSet::from_request(&req).unwrap();
    let series = resolve_series(&req);
    let styled = style_series(&series).unwrap();
    compose_spatial_legend(chart, &styled, &rules)
}

fn labels(entries: &[LegendEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}

#[test]
fn shot_types_get_one_entry_each() {
    let entries = legend_for(json!({
        "chart_type": "shot_map",
        "series_label": "Saka",
        "data": [
            {"x": 90, "y": 50, "shot_type": "Free Kick"},
            {"x": 88, "y": 40, "shot_type": "header"},
            {"x": 85, "y": 45, "shot_type": "free kick"},
            {"x": 80, "y": 45}
        ]
    }));
    assert_eq!(
        labels(&entries),
        vec!["Saka • Free Kick", "Saka • Header", "Saka • Shot"]
    );
    assert_eq!(entries[0].glyph, LegendGlyph::Marker(MarkerShape::Diamond));
    assert_eq!(entries[1].glyph, LegendGlyph::Marker(MarkerShape::Triangle));
}

#[test]
fn shot_override_collapses_to_one_entry() {
    let entries = legend_for(json!({
        "chart_type": "shot_map",
        "data": [{"x": 90, "y": 50, "shot_type": "penalty"}, {"x": 80, "y": 50}],
        "marker_rules": [{"target": "shot", "marker": "s"}]
    }));
    assert_eq!(labels(&entries), vec!["Series • Shots"]);
    assert_eq!(entries[0].glyph, LegendGlyph::Marker(MarkerShape::Square));
}

#[test]
fn empty_shot_series_gets_a_swatch() {
    let entries = legend_for(json!({
        "chart_type": "shot_map",
        "series": [{"label": "A", "data": [{"x": 90, "y": 50}]}, {"label": "B"}]
    }));
    assert_eq!(labels(&entries), vec!["A • Shot", "B"]);
    assert_eq!(entries[1].glyph, LegendGlyph::Swatch);
}

#[test]
fn pass_override_and_penalty_highlight() {
    let entries = legend_for(json!({
        "chart_type": "pass_map",
        "series": [{"label": "Rice", "data": [{"x": 10, "y": 10}]}],
        "marker_rules": [{"target": "pass", "marker": "^"}],
        "highlight_rules": [{"type": "penalty_area", "color": "#FF0000"}]
    }));
    assert_eq!(labels(&entries), vec!["Rice • Passes", PENALTY_AREA_LABEL]);
    assert_eq!(entries[1].glyph, LegendGlyph::Swatch);
}

#[test]
fn heatmap_ignores_penalty_highlight() {
    let entries = legend_for(json!({
        "chart_type": "heatmap",
        "series": [{"label": "A"}, {"label": "B"}],
        "highlight_rules": [{"type": "penalty_area", "color": "#FF0000"}]
    }));
    assert_eq!(labels(&entries), vec!["A", "B"]);
}
