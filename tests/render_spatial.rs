use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbImage;
use pss_viz::models::Orientation;
use pss_viz::viz::pitch::PitchFrame;
use pss_viz::viz::types::{FigureLayout, FigureSize};
use pss_viz::{BrandAssets, RenderRequest, Renderer};
use serde_json::{Value, json};

fn renderer() -> Renderer {
    let dir = tempfile::tempdir().unwrap();
    Renderer::new(BrandAssets::from_dir(dir.path()))
}

fn render_dims(v: Value) -> (u32, u32) {
    let req: RenderRequest = serde_json::from_value(v).unwrap();
    let resp = renderer().render(&req).expect("render succeeds");
    assert_eq!(resp.mime, "image/png");
    let png = STANDARD.decode(resp.image_base64).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    (img.width(), img.height())
}

fn render_image(v: Value) -> RgbImage {
    let req: RenderRequest = serde_json::from_value(v).unwrap();
    let resp = renderer().render(&req).expect("render succeeds");
    let png = STANDARD.decode(resp.image_base64).unwrap();
    image::load_from_memory(&png).unwrap().to_rgb8()
}

/// Pixel under pitch coordinate `p` of a full horizontal pitch without title or subtitle.
fn pitch_pixel(img: &RgbImage, p: (f64, f64)) -> [u8; 3] {
    let layout = FigureLayout::new(FigureSize::PITCH, false, false);
    let frame = PitchFrame::fit(layout.plot, Orientation::Horizontal, false);
    let (x, y) = frame.project_px(p);
    img.get_pixel(x as u32, y as u32).0
}

const PITCH_GREY: [u8; 3] = [236, 236, 236];

fn shots() -> Value {
    json!([
        {"x": 88, "y": 50, "shot_type": "Header"},
        {"x": 89, "y": 50, "event_type": "Penalty"},
        {"x": 75, "y": 30, "shot_type": "free kick"},
        {"x": 80, "y": 60},
        {"x": "n/a", "y": 40}
    ])
}

fn passes() -> Value {
    json!([
        {"x": 20, "y": 30, "end_x": 45, "end_y": 40},
        {"x": 50, "y": 50, "end_x": 85, "end_y": 55},
        {"x": 60, "y": 70}
    ])
}

#[test]
fn shot_map_renders_at_pitch_size() {
    let dims = render_dims(json!({
        "chart_type": "shot_map",
        "title": "Shots",
        "subtitle": "Last five matches",
        "data": shots()
    }));
    assert_eq!(dims, (1512, 1044));
}

#[test]
fn shot_map_with_override_and_highlight() {
    render_dims(json!({
        "chart_type": "shot_map",
        "data": shots(),
        "marker_rules": [{"target": "shot", "marker": "*"}],
        "highlight_rules": [{"type": "penalty_area", "color": "#FF0000"}]
    }));
}

#[test]
fn pass_map_and_pitch_plot_render() {
    for chart in ["pass_map", "pitch_plot"] {
        render_dims(json!({
            "chart_type": chart,
            "data": passes(),
            "marker_rules": [{"target": "pass", "marker": "D"}],
            "highlight_rules": [{"type": "penalty_area", "color": "#FFD000"}]
        }));
    }
}

#[test]
fn custom_field_names_are_honored() {
    render_dims(json!({
        "chart_type": "pass_map",
        "x_field": "sx",
        "y_field": "sy",
        "end_x_field": "tx",
        "end_y_field": "ty",
        "data": [{"sx": 10, "sy": 10, "tx": 40, "ty": 60}]
    }));
}

#[test]
fn heatmap_vertical_half_pitch() {
    render_dims(json!({
        "chart_type": "heatmap",
        "orientation": "vertical",
        "half": true,
        "data": [{"x": 70, "y": 40}, {"x": 72, "y": 41}, {"x": 10, "y": 90}]
    }));
}

#[test]
fn pass_network_with_sparse_edges() {
    render_dims(json!({
        "chart_type": "pass_network",
        "data": [
            {"from_x": 20, "from_y": 50, "to_x": 40, "to_y": 30, "count": 12},
            {"from_x": 40, "from_y": 30, "to_x": 60, "to_y": 50, "count": 3},
            {"from_x": 60, "from_y": 50, "to_x": null, "to_y": 70, "count": 99}
        ]
    }));
}

#[test]
fn multi_series_with_empty_members_is_not_an_error() {
    render_dims(json!({
        "chart_type": "pitch_plot",
        "series": [
            {"label": "Home", "color": "#6ae0c3", "data": passes()},
            {"label": "Away", "data": []},
            {"label": "Sparse", "data": [{"x": "?", "y": 1}]}
        ]
    }));
}

#[test]
fn rows_without_coordinates_still_render() {
    // Non-empty data with nothing plottable is drawn as an empty pitch
    render_dims(json!({"chart_type": "heatmap", "data": [{"player": "Saka"}]}));
}

#[test]
fn penalty_area_shots_take_the_highlight_color() {
    let img = render_image(json!({
        "chart_type": "shot_map",
        "data": [{"x": 10, "y": 50}, {"x": 40, "y": 70}],
        "highlight_rules": [{"type": "penalty_area", "color": "#FF0000"}]
    }));

    let [r, g, b] = pitch_pixel(&img, (10.0, 50.0));
    assert!(r > 200 && g < 80 && b < 80, "inside shot is {:?}", [r, g, b]);

    let outside = pitch_pixel(&img, (40.0, 70.0));
    assert_ne!(outside, PITCH_GREY);
    assert!(outside[1] > outside[0], "outside shot is {outside:?}");
}

#[test]
fn heatmap_shades_the_occupied_cell() {
    let img = render_image(json!({
        "chart_type": "heatmap",
        "data": [{"x": 60, "y": 30}, {"x": 60, "y": 30}, {"x": 60, "y": 30}]
    }));
    // Centre of the 24 x 16 cell holding (60, 30)
    let cell = pitch_pixel(&img, (60.4, 28.1));
    assert_ne!(cell, PITCH_GREY);
    assert!(cell[1] > cell[0], "heat cell is {cell:?}");

    let empty = pitch_pixel(&img, (30.0, 80.0));
    assert_eq!(empty, PITCH_GREY);
}
