//! Titles, brand stamp, PNG encoding and the base64 response.

use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ImageEncoder, RgbImage, RgbaImage};
use log::{debug, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};
use std::path::Path;

use super::text::{Label, draw_label};
use super::types::{FigureLayout, pt};
use super::util::{BRAND_INK, BRAND_NAVY, px};
use crate::error::RenderError;
use crate::models::RenderResponse;

pub const PNG_MIME: &str = "image/png";

/// Logo box as figure fractions `(left, bottom, width, height)`, measured from the bottom-left.
pub const LOGO_BOX: (f64, f64, f64, f64) = (0.04, 0.005, 0.34, 0.16);

pub const BRAND_NAME: &str = "PSS";
pub const BRAND_TAGLINE: &str = "Smarter football decisions";

/// Figure title (top centre) and subtitle (above the plot area).
pub fn draw_titles<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
    title: Option<&str>,
    subtitle: Option<&str>,
) -> Result<()> {
    let w = layout.width as f64;
    let h = layout.height as f64;
    if let Some(t) = title {
        let style = Label::new(pt(14.0), BRAND_NAVY)
            .bold()
            .anchor(HPos::Center, VPos::Center);
        draw_label(root, t, px((w / 2.0, h * 0.05)), style)?;
    }
    if let Some(s) = subtitle {
        let style = Label::new(pt(10.0), BRAND_INK).anchor(HPos::Center, VPos::Bottom);
        let at = (layout.plot.center().0, layout.plot.top - pt(4.0));
        draw_label(root, s, px(at), style)?;
    }
    Ok(())
}

/// Top-left anchors of the brand name and tagline, 8% and 5% of the height above the bottom.
pub fn brand_text_anchors(layout: &FigureLayout) -> [(i32, i32); 2] {
    let w = layout.width as f64;
    let h = layout.height as f64;
    [
        px((w * 0.02, h * (1.0 - 0.08))),
        px((w * 0.02, h * (1.0 - 0.05))),
    ]
}

/// Text stamp used when no logo is available. Both lines hang from their anchors.
pub fn draw_brand_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
) -> Result<()> {
    let [name_at, tagline_at] = brand_text_anchors(layout);
    let name = Label::new(pt(12.0), BRAND_NAVY)
        .bold()
        .anchor(HPos::Left, VPos::Top);
    draw_label(root, BRAND_NAME, name_at, name)?;
    let tagline = Label::new(pt(8.5), BRAND_INK).anchor(HPos::Left, VPos::Top);
    draw_label(root, BRAND_TAGLINE, tagline_at, tagline)?;
    Ok(())
}

/// Decode the brand logo. A missing file is normal; an unreadable one is logged.
pub fn load_logo(path: &Path) -> Option<RgbaImage> {
    if !path.is_file() {
        debug!("no logo at {}", path.display());
        return None;
    }
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            warn!("logo {} could not be decoded: {e}", path.display());
            None
        }
    }
}

/// Pixel rectangle `(x, y, width, height)` of the logo box, top-left origin.
pub fn logo_box_px(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let (l, b, bw, bh) = LOGO_BOX;
    let (w, h) = (width as f64, height as f64);
    let top = h * (1.0 - b - bh);
    (
        (w * l).round() as u32,
        top.round() as u32,
        (w * bw).round() as u32,
        (h * bh).round() as u32,
    )
}

/// Composite the logo, scaled to fit and centred in its box, onto an RGB frame.
pub fn stamp_logo(frame: RgbImage, logo: &RgbaImage) -> RgbImage {
    let (bx, by, bw, bh) = logo_box_px(frame.width(), frame.height());
    if logo.width() == 0 || logo.height() == 0 || bw == 0 || bh == 0 {
        return frame;
    }
    let scale = f64::min(
        bw as f64 / logo.width() as f64,
        bh as f64 / logo.height() as f64,
    );
    let lw = ((logo.width() as f64 * scale).round() as u32).max(1);
    let lh = ((logo.height() as f64 * scale).round() as u32).max(1);
    let resized = imageops::resize(logo, lw, lh, FilterType::Triangle);

    let mut canvas = image::DynamicImage::ImageRgb8(frame).to_rgba8();
    let x = bx + bw.saturating_sub(lw) / 2;
    let y = by + bh.saturating_sub(lh) / 2;
    imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
    image::DynamicImage::ImageRgba8(canvas).to_rgb8()
}

/// Encode an RGB8 buffer as PNG.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(png)
}

pub fn to_response(png: &[u8]) -> RenderResponse {
    RenderResponse {
        image_base64: STANDARD.encode(png),
        mime: PNG_MIME.to_string(),
    }
}
