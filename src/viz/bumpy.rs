//! Ranking ("bumpy") chart: ranks per category, rank 1 on top.

use anyhow::Result;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use super::legend::LegendEntry;
use super::markers::{MarkerShape, draw_marker};
use super::text::{Label, draw_label};
use super::types::{Rect, marker_radius_px, pt};
use super::util::{BRAND_INK, BRAND_YELLOW, GUIDE, palette_color, px, thick_line};
use crate::models::SeriesSpec;
use std::ops::RangeInclusive;

/// Most rank labels drawn on the y axis; longer axes are labeled with a stride.
pub const MAX_RANK_TICKS: u32 = 20;

/// Ranks of every series after imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct RankTable {
    /// Rank used for missing entries; also the bottom of the y axis.
    pub fill: u32,
    pub lines: Vec<RankLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankLine {
    pub label: String,
    /// One rank per metric.
    pub ranks: Vec<f64>,
}

impl RankTable {
    /// Y axis extent, `1..=fill`.
    pub fn y_span(&self) -> RangeInclusive<u32> {
        1..=self.fill
    }

    /// Labeled ranks: every rank on short axes, otherwise a stride that keeps at most
    /// [`MAX_RANK_TICKS`] + 1 labels. The first and last rank are always labeled.
    pub fn y_ticks(&self) -> Vec<u32> {
        let stride = self.fill.div_ceil(MAX_RANK_TICKS).max(1);
        let mut ticks: Vec<u32> = self.y_span().step_by(stride as usize).collect();
        if ticks.last() != Some(&self.fill) {
            ticks.push(self.fill);
        }
        ticks
    }
}

/// Display label for the series at `idx`.
pub fn series_label(spec: &SeriesSpec, idx: usize) -> String {
    spec.label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Series {}", idx + 1))
}

/// Replace missing ranks with `ceil(max observed) + 1`, or `1` when no rank is positive.
///
/// A series shorter than `metrics` is missing its trailing ranks; extra ranks are dropped.
pub fn impute_ranks(series: &[SeriesSpec], metrics: usize) -> RankTable {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().take(metrics).flatten())
        .copied()
        .fold(0.0_f64, f64::max);
    // Float-to-int casts saturate, so huge ranks pin the fill at `u32::MAX`
    let fill = if max > 0.0 {
        (max.ceil() as u32).saturating_add(1)
    } else {
        1
    };

    let lines = series
        .iter()
        .enumerate()
        .map(|(idx, s)| RankLine {
            label: series_label(s, idx),
            ranks: (0..metrics)
                .map(|m| s.values.get(m).copied().flatten().unwrap_or(fill as f64))
                .collect(),
        })
        .collect();
    RankTable { fill, lines }
}

/// One swatch per series in palette order.
pub fn bumpy_legend(table: &RankTable) -> Vec<LegendEntry> {
    table
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| LegendEntry::swatch(line.label.clone(), palette_color(i)))
        .collect()
}

/// Maps (metric index, rank) to pixels.
#[derive(Debug, Clone, Copy)]
struct RankFrame {
    rect: Rect,
    columns: usize,
    fill: u32,
}

impl RankFrame {
    fn x(&self, col: usize) -> f64 {
        if self.columns <= 1 {
            return self.rect.center().0;
        }
        self.rect.left + self.rect.width * col as f64 / (self.columns - 1) as f64
    }

    fn y(&self, rank: f64) -> f64 {
        if self.fill <= 1 {
            return self.rect.center().1;
        }
        self.rect.top + self.rect.height * (rank - 1.0) / (self.fill - 1) as f64
    }
}

pub fn draw_bumpy<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: Rect,
    metrics: &[String],
    table: &RankTable,
) -> Result<()> {
    // Room for rank labels on the left and metric labels underneath
    let inner = Rect::new(
        plot.left + pt(24.0),
        plot.top + pt(6.0),
        (plot.width - pt(36.0)).max(1.0),
        (plot.height - pt(28.0)).max(1.0),
    );
    let frame = RankFrame {
        rect: inner,
        columns: metrics.len(),
        fill: table.fill,
    };
    debug!(
        "bumpy: {} series over {} metrics, fill rank {}",
        table.lines.len(),
        metrics.len(),
        table.fill
    );

    let rank_label = Label::new(pt(9.0), BRAND_INK).anchor(HPos::Right, VPos::Center);
    for rank in table.y_ticks() {
        let y = frame.y(rank as f64);
        thick_line(
            root,
            (inner.left, y),
            (inner.right(), y),
            pt(0.6),
            GUIDE.to_rgba(),
        )?;
        draw_label(
            root,
            &rank.to_string(),
            px((inner.left - pt(10.0), y)),
            rank_label,
        )?;
    }

    let metric_label = Label::new(pt(9.0), BRAND_INK).anchor(HPos::Center, VPos::Top);
    for (col, metric) in metrics.iter().enumerate() {
        draw_label(
            root,
            metric,
            px((frame.x(col), inner.bottom() + pt(8.0))),
            metric_label,
        )?;
    }

    let radius = marker_radius_px(80.0);
    for (i, line) in table.lines.iter().enumerate() {
        let pts: Vec<(f64, f64)> = line
            .ranks
            .iter()
            .enumerate()
            .map(|(col, r)| (frame.x(col), frame.y(*r)))
            .collect();
        for pair in pts.windows(2) {
            thick_line(root, pair[0], pair[1], pt(2.5), palette_color(i))?;
        }
        for p in &pts {
            draw_marker(
                root,
                px(*p),
                radius,
                BRAND_YELLOW.to_rgba(),
                None,
                MarkerShape::Circle,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str, values: Vec<Option<f64>>) -> SeriesSpec {
        SeriesSpec {
            label: Some(label.into()),
            values,
            ..Default::default()
        }
    }

    #[test]
    fn missing_rank_takes_fill_value() {
        let table = impute_ranks(&[spec("A", vec![Some(1.0), None, Some(3.0)])], 3);
        assert_eq!(table.fill, 4);
        assert_eq!(table.y_span(), 1..=4);
        assert_eq!(table.y_ticks(), vec![1, 2, 3, 4]);
        assert_eq!(table.lines[0].ranks, vec![1.0, 4.0, 3.0]);
    }

    #[test]
    fn short_series_are_padded() {
        let table = impute_ranks(
            &[spec("A", vec![Some(2.0)]), spec("B", vec![Some(1.0), Some(2.0)])],
            2,
        );
        assert_eq!(table.fill, 3);
        assert_eq!(table.lines[0].ranks, vec![2.0, 3.0]);
    }

    #[test]
    fn no_positive_rank_fills_with_one() {
        let table = impute_ranks(&[spec("A", vec![None, None])], 2);
        assert_eq!(table.fill, 1);
        assert_eq!(table.lines[0].ranks, vec![1.0, 1.0]);
    }

    #[test]
    fn duplicate_labels_stay_distinct() {
        let table = impute_ranks(
            &[spec("A", vec![Some(1.0)]), spec("A", vec![Some(2.0)])],
            1,
        );
        assert_eq!(table.lines.len(), 2);
        let legend = bumpy_legend(&table);
        assert_ne!(legend[0].color, legend[1].color);
    }

    #[test]
    fn huge_ranks_saturate_the_fill() {
        let table = impute_ranks(&[spec("A", vec![Some(5e9), None])], 2);
        assert_eq!(table.fill, u32::MAX);
        assert_eq!(table.lines[0].ranks[1], u32::MAX as f64);
    }

    #[test]
    fn long_axes_get_thinned_ticks() {
        let table = impute_ranks(&[spec("A", vec![Some(1.0), Some(200_000.0)])], 2);
        assert_eq!(table.fill, 200_001);
        let ticks = table.y_ticks();
        assert!(ticks.len() <= MAX_RANK_TICKS as usize + 1);
        assert_eq!(ticks.first(), Some(&1));
        assert_eq!(ticks.last(), Some(&200_001));

        let saturated = impute_ranks(&[spec("A", vec![Some(1e12)])], 1);
        assert!(saturated.y_ticks().len() <= MAX_RANK_TICKS as usize + 1);
    }

    #[test]
    fn unlabeled_series_are_numbered() {
        let unlabeled = SeriesSpec::default();
        assert_eq!(series_label(&unlabeled, 2), "Series 3");
    }
}
