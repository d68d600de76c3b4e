//! pss_viz
//!
//! Renders football-analytics charts from JSON requests to branded PNG images.
//! Pairs with the `pss-viz` CLI.
//!
//! ### Features
//! - Pitch charts: shot map, pass map, heatmap, pitch plot, pass network
//! - Radar (with comparison overlay) and pizza charts
//! - Ranking ("bumpy") charts with explicit imputation of missing ranks
//! - Marker-shape overrides and penalty-area highlighting
//! - Brand styling: palette, fonts, logo stamp
//!
//! ### Example
//! ```no_run
//! use pss_viz::{BrandAssets, RenderRequest, Renderer, Row};
//!
//! let mut req = RenderRequest::new("shot_map");
//! req.data.push(Row::new().with("x", 88).with("y", 50).with("shot_type", "Header"));
//! let renderer = Renderer::new(BrandAssets::from_dir(pss_viz::assets::DEFAULT_ASSETS_DIR));
//! let resp = renderer.render(&req)?;
//! assert_eq!(resp.mime, "image/png");
//! # Ok::<(), pss_viz::RenderError>(())
//! ```

pub mod assets;
pub mod color;
pub mod error;
pub mod geometry;
pub mod models;
pub mod rules;
pub mod series;
pub mod storage;
pub mod validate;
pub mod viz;

pub use assets::BrandAssets;
pub use error::{ErrorBody, RenderError};
pub use models::{
    ChartType, HealthStatus, HighlightRule, MarkerRule, RenderRequest, RenderResponse, Row,
    SeriesSpec, health,
};
pub use series::{Series, resolve_series};
pub use validate::validate;
pub use viz::Renderer;
