//! Chart rendering: validate → resolve series → draw → legend → finish.
//!
//! - Pitch charts: `shot_map`, `pass_map`, `heatmap`, `pitch_plot`, `pass_network`
//! - Radial charts: `radar` (with optional comparison overlay) and `pizza`
//! - Ranking chart: `bumpy`, with explicit imputation of missing ranks
//!
//! Everything is drawn in pixel space onto an in-memory RGB buffer at 180 DPI, then
//! stamped with the brand logo (or its text fallback) and encoded as PNG.

pub mod bumpy;
pub mod finish;
pub mod fonts;
pub mod legend;
pub mod markers;
pub mod pitch;
pub mod radial;
pub mod spatial;
pub mod text;
pub mod types;
pub mod util;

pub use fonts::{FontSource, FontStatus};
pub use legend::{LegendEntry, LegendGlyph};
pub use markers::MarkerShape;
pub use types::{DPI, FigureSize};

use image::{RgbImage, RgbaImage};
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;

use crate::assets::BrandAssets;
use crate::color::require_color;
use crate::error::RenderError;
use crate::models::{ChartType, RenderRequest, RenderResponse};
use crate::rules::RuleSet;
use crate::series::{Series, resolve_series};
use crate::validate::validate;
use types::FigureLayout;
use util::{PAPER, draw_err};

/// A resolved series together with its parsed draw color.
#[derive(Debug, Clone, Copy)]
pub struct StyledSeries<'a> {
    pub series: &'a Series,
    pub color: RGBAColor,
}

/// Parse every series color. An unparseable color is a client error.
pub fn style_series(series: &[Series]) -> Result<Vec<StyledSeries<'_>>, RenderError> {
    series
        .iter()
        .map(|s| {
            Ok(StyledSeries {
                series: s,
                color: require_color(&s.color)?,
            })
        })
        .collect()
}

/// Figure size for a chart family.
pub fn figure_size(chart: ChartType) -> FigureSize {
    match chart {
        ChartType::Radar => FigureSize::RADAR,
        ChartType::Pizza => FigureSize::PIZZA,
        ChartType::Bumpy => FigureSize::BUMPY,
        _ => FigureSize::PITCH,
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|t| !t.trim().is_empty())
}

/// Renders requests to PNG. Immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Renderer {
    logo: Option<RgbaImage>,
}

impl Renderer {
    /// Register fonts (once per process) and decode the logo if present.
    pub fn new(assets: BrandAssets) -> Self {
        let fonts = fonts::ensure_fonts_registered(&assets);
        let logo = finish::load_logo(&assets.logo);
        debug!(
            "renderer ready: logo={}, fonts={:?}",
            logo.is_some(),
            fonts
        );
        Self { logo }
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Full `/render` operation: PNG as base64 with its mime type.
    pub fn render(&self, req: &RenderRequest) -> Result<RenderResponse, RenderError> {
        let png = self.render_png(req)?;
        Ok(finish::to_response(&png))
    }

    /// Validate and draw a request, returning the encoded PNG bytes.
    pub fn render_png(&self, req: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        let chart = validate(req)?;
        let title = non_blank(req.title.as_deref());
        let subtitle = non_blank(req.subtitle.as_deref());
        let layout = FigureLayout::new(figure_size(chart), title.is_some(), subtitle.is_some());
        let (w, h) = (layout.width, layout.height);
        debug!("render {chart}: {w}x{h}px");

        let mut buf = vec![0u8; w as usize * h as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            self.paint(&root, req, chart, &layout)?;
            finish::draw_titles(&root, &layout, title, subtitle)?;
            if self.logo.is_none() {
                finish::draw_brand_text(&root, &layout)?;
            }
            root.present().map_err(draw_err)?;
        }

        let rgb = match &self.logo {
            Some(logo) => {
                let frame = RgbImage::from_raw(w, h, buf)
                    .ok_or_else(|| RenderError::Encode("frame buffer size mismatch".into()))?;
                finish::stamp_logo(frame, logo).into_raw()
            }
            None => buf,
        };
        let png = finish::encode_png(&rgb, w, h)?;
        info!("rendered {chart} ({} bytes)", png.len());
        Ok(png)
    }

    /// Draw the chart body and its legend.
    fn paint<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        req: &RenderRequest,
        chart: ChartType,
        layout: &FigureLayout,
    ) -> Result<(), RenderError> {
        root.fill(&PAPER).map_err(draw_err)?;
        let entries = match chart {
            ChartType::Radar => {
                let compare = req.values_compare.as_deref().filter(|v| !v.is_empty());
                radial::draw_radar(root, layout.plot, req.metrics(), req.values(), compare)?;
                if compare.is_some() {
                    radial::radar_compare_legend()
                } else {
                    Vec::new()
                }
            }
            ChartType::Pizza => {
                radial::draw_pizza(root, layout.plot, req.metrics(), req.values())?;
                Vec::new()
            }
            ChartType::Bumpy => {
                let table = bumpy::impute_ranks(req.series_specs(), req.metrics().len());
                bumpy::draw_bumpy(root, layout.plot, req.metrics(), &table)?;
                bumpy::bumpy_legend(&table)
            }
            _ => {
                let rules = RuleSet::from_request(req)?;
                let series = resolve_series(req);
                let styled = style_series(&series)?;
                debug!("{chart}: {} series, rules {:?}", styled.len(), rules);

                let frame = pitch::PitchFrame::fit(layout.plot, req.orientation(), req.half());
                pitch::draw_pitch(root, &frame)?;
                spatial::draw_spatial(root, &frame, chart, &styled, &req.field_names(), &rules)?;
                legend::compose_spatial_legend(chart, &styled, &rules)
            }
        };
        legend::draw_legend_panel(root, &entries)?;
        Ok(())
    }
}
