use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pss_viz::{BrandAssets, RenderRequest, Renderer, health};
use serde_json::{Value, json};

fn request() -> RenderRequest {
    serde_json::from_value(json!({
        "chart_type": "shot_map",
        "title": "Arsenal shots",
        "data": [{"x": 88, "y": 50}, {"x": 92, "y": 44, "shot_type": "penalty"}]
    }))
    .unwrap()
}

#[test]
fn response_has_exactly_two_keys() {
    let dir = tempfile::tempdir().unwrap();
    let resp = Renderer::new(BrandAssets::from_dir(dir.path()))
        .render(&request())
        .unwrap();
    let v = serde_json::to_value(&resp).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["mime"], "image/png");
    let png = STANDARD.decode(obj["image_base64"].as_str().unwrap()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn identical_requests_give_identical_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let r = Renderer::new(BrandAssets::from_dir(dir.path()));
    let dims = || {
        let png = STANDARD.decode(r.render(&request()).unwrap().image_base64).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        (img.width(), img.height())
    };
    assert_eq!(dims(), dims());
}

#[test]
fn logo_is_stamped_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let logos = dir.path().join("logos");
    std::fs::create_dir_all(&logos).unwrap();
    image::RgbaImage::from_pixel(40, 20, image::Rgba([0, 60, 113, 255]))
        .save(logos.join("PSS_Logo_Navy.png"))
        .unwrap();
    let r = Renderer::new(BrandAssets::from_dir(dir.path()));
    assert!(r.has_logo());

    let png = STANDARD.decode(r.render(&request()).unwrap().image_base64).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgb8();
    let (bx, by, bw, bh) = pss_viz::viz::finish::logo_box_px(img.width(), img.height());
    assert_eq!(img.get_pixel(bx + bw / 2, by + bh / 2).0, [0, 60, 113]);
}

#[test]
fn errors_serialize_as_detail() {
    let err = pss_viz::validate(&RenderRequest::new("nope")).unwrap_err();
    let v: Value = serde_json::to_value(err.to_body()).unwrap();
    assert_eq!(v, json!({"detail": "Unsupported chart type."}));
}

#[test]
fn health_is_ok() {
    assert_eq!(serde_json::to_value(health()).unwrap(), json!({"status": "ok"}));
}
