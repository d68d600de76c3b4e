//! Request validation. Runs before anything is drawn.

use crate::error::RenderError;
use crate::models::{ChartType, RenderRequest};

pub const UNSUPPORTED_CHART_TYPE: &str = "Unsupported chart type.";
pub const NO_DATA: &str = "No data provided.";
pub const RADAR_REQUIREMENTS: &str = "Radar requires metrics and values.";
pub const PIZZA_REQUIREMENTS: &str = "Pizza requires metrics and values.";
pub const BUMPY_REQUIREMENTS: &str = "Bumpy requires metrics and series.";

/// Check a request and return its chart type.
///
/// The chart type is judged first, then the inputs that chart family needs.
pub fn validate(req: &RenderRequest) -> Result<ChartType, RenderError> {
    let chart = ChartType::parse(&req.chart_type)
        .ok_or_else(|| RenderError::UnsupportedChartType(UNSUPPORTED_CHART_TYPE.into()))?;

    match chart {
        c if c.is_spatial() => {
            if req.data.is_empty() && req.series_specs().is_empty() {
                return Err(RenderError::validation(NO_DATA));
            }
        }
        ChartType::Radar | ChartType::Pizza => {
            let requirements = if chart == ChartType::Radar {
                RADAR_REQUIREMENTS
            } else {
                PIZZA_REQUIREMENTS
            };
            if req.metrics().is_empty() || req.values().is_empty() {
                return Err(RenderError::validation(requirements));
            }
            check_len("values", req.values().len(), req.metrics().len())?;
            if chart == ChartType::Radar {
                if let Some(cmp) = req.values_compare.as_deref().filter(|v| !v.is_empty()) {
                    check_len("values_compare", cmp.len(), req.metrics().len())?;
                }
            }
        }
        ChartType::Bumpy => {
            if req.metrics().is_empty() || req.series_specs().is_empty() {
                return Err(RenderError::validation(BUMPY_REQUIREMENTS));
            }
        }
        _ => {}
    }
    Ok(chart)
}

fn check_len(field: &str, got: usize, metrics: usize) -> Result<(), RenderError> {
    if got == metrics {
        return Ok(());
    }
    Err(RenderError::validation(format!(
        "'{field}' has {got} entries but there are {metrics} metrics."
    )))
}
