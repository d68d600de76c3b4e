use pss_viz::geometry::{edges, points, segments};
use pss_viz::models::FieldNames;
use pss_viz::rules::{in_penalty_area, partition_penalty_area};
use pss_viz::series::PALETTE;
use pss_viz::{RenderRequest, Row, resolve_series};
use serde_json::json;

fn request(v: serde_json::Value) -> RenderRequest {
    serde_json::from_value(v).unwrap()
}

#[test]
fn implicit_series_uses_first_palette_color() {
    let req = request(json!({"chart_type": "heatmap", "data": [{"x": 1, "y": 2}]}));
    let series = resolve_series(&req);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].label, "Series");
    assert_eq!(series[0].color, PALETTE[0]);
}

#[test]
fn series_label_names_the_implicit_series() {
    let req = request(json!({
        "chart_type": "heatmap",
        "series_label": "Saka",
        "data": [{"x": 1, "y": 2}]
    }));
    assert_eq!(resolve_series(&req)[0].label, "Saka");
}

#[test]
fn missing_and_reserved_colors_cycle_the_palette() {
    let req = request(json!({
        "chart_type": "pass_map",
        "series": [
            {"label": "A"},
            {"label": "B", "color": "#6AE0C3"},
            {"label": "C", "color": "#f5b861"},
            {"label": "D", "color": ""},
            {"label": "E"},
            {"label": "F", "color": "#123456"}
        ]
    }));
    let colors: Vec<String> = resolve_series(&req).into_iter().map(|s| s.color).collect();
    assert_eq!(
        colors,
        vec![PALETTE[0], PALETTE[1], PALETTE[2], PALETTE[3], PALETTE[0], "#123456"]
    );
}

#[test]
fn extraction_keeps_order_and_skips_sparse_rows() {
    let rows: Vec<Row> = serde_json::from_value(json!([
        {"px": 10, "py": 20, "ex": 30, "ey": 40},
        {"px": "bad", "py": 1},
        {"px": 50, "py": 60},
        {"px": "70.5", "py": 80, "ex": 90, "ey": 95}
    ]))
    .unwrap();
    assert_eq!(
        points(&rows, "px", "py"),
        vec![(10.0, 20.0), (50.0, 60.0), (70.5, 80.0)]
    );
    let fields = FieldNames {
        x: "px".into(),
        y: "py".into(),
        end_x: "ex".into(),
        end_y: "ey".into(),
    };
    let segs = segments(&rows, &fields);
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[1].end, (90.0, 95.0));
}

#[test]
fn edge_weights_stay_on_their_own_row() {
    let rows: Vec<Row> = serde_json::from_value(json!([
        {"from_x": 10, "from_y": 10, "to_x": 20, "to_y": 20, "count": 5},
        {"from_x": 30, "from_y": 30, "to_x": null, "to_y": 40, "count": 100},
        {"from_x": 50, "from_y": 50, "to_x": 60, "to_y": 60}
    ]))
    .unwrap();
    let e = edges(&rows);
    assert_eq!(e.len(), 2);
    assert_eq!(e[0].weight, 5.0);
    assert_eq!(e[1].from, (50.0, 50.0));
    assert_eq!(e[1].weight, 1.0);
}

#[test]
fn penalty_area_partition() {
    assert!(in_penalty_area(10.0, 50.0));
    assert!(!in_penalty_area(50.0, 50.0));
    let (inside, outside) = partition_penalty_area(&[(10.0, 50.0), (50.0, 50.0), (95.0, 60.0)]);
    assert_eq!(inside, vec![(10.0, 50.0), (95.0, 60.0)]);
    assert_eq!(outside, vec![(50.0, 50.0)]);
}
