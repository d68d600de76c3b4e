//! Normalization of request input into an ordered list of labeled, colored series.

use crate::models::{RenderRequest, Row, SeriesSpec};

/// Brand series palette, indexed by series position.
pub const PALETTE: [&str; 4] = ["#2E7D6D", "#003C71", "#FFD000", "#1F2E3D"];

/// Placeholder colors some clients send when they have no opinion. Never drawn as-is.
pub const RESERVED_COLORS: [&str; 2] = ["#6ae0c3", "#f5b861"];

pub const DEFAULT_SERIES_LABEL: &str = "Series";

/// One labeled, colored, ordered collection of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub data: Vec<Row>,
}

/// How the caller described its series.
#[derive(Debug, Clone, Copy)]
pub enum SeriesInput<'a> {
    Explicit(&'a [SeriesSpec]),
    Implicit {
        label: Option<&'a str>,
        rows: &'a [Row],
    },
}

impl<'a> SeriesInput<'a> {
    pub fn from_request(req: &'a RenderRequest) -> Self {
        match req.series.as_deref() {
            Some(list) if !list.is_empty() => SeriesInput::Explicit(list),
            _ => SeriesInput::Implicit {
                label: req.series_label.as_deref(),
                rows: &req.data,
            },
        }
    }

    /// Canonical series list. Rows are passed through untouched.
    pub fn resolve(self) -> Vec<Series> {
        match self {
            SeriesInput::Explicit(list) => list
                .iter()
                .enumerate()
                .map(|(idx, spec)| Series {
                    label: spec
                        .label
                        .clone()
                        .filter(|l| !l.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_SERIES_LABEL.to_string()),
                    color: pick_series_color(idx, spec.color.as_deref()),
                    data: spec.data.clone(),
                })
                .collect(),
            SeriesInput::Implicit { label, rows } => vec![Series {
                label: label
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or(DEFAULT_SERIES_LABEL)
                    .to_string(),
                color: PALETTE[0].to_string(),
                data: rows.to_vec(),
            }],
        }
    }
}

/// Resolve the series list for a request.
pub fn resolve_series(req: &RenderRequest) -> Vec<Series> {
    SeriesInput::from_request(req).resolve()
}

/// Keep `current` unless it is missing, blank or a reserved placeholder.
pub fn pick_series_color(idx: usize, current: Option<&str>) -> String {
    match current.map(str::trim) {
        Some(c) if !c.is_empty() && !is_reserved(c) => c.to_string(),
        _ => PALETTE[idx % PALETTE.len()].to_string(),
    }
}

pub fn is_reserved(color: &str) -> bool {
    RESERVED_COLORS
        .iter()
        .any(|r| r.eq_ignore_ascii_case(color.trim()))
}
