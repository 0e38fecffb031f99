//! Price distribution box plot.

use crate::listing::ProductRecord;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Whiskers reach the furthest data point within this many IQRs of the box.
const WHISKER_IQR: f64 = 1.5;

/// Five-number summary with Tukey whiskers clamped to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
    pub min: f64,
    pub max: f64,
}

impl BoxStats {
    /// Computes the summary. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - WHISKER_IQR * iqr, q3 + WHISKER_IQR * iqr);

        let (inside, outliers): (Vec<f64>, Vec<f64>) =
            sorted.iter().partition(|v| **v >= low_fence && **v <= high_fence);
        // The quartiles always lie inside the fences, so `inside` is never empty.
        let whisker_low = inside.first().copied().unwrap_or(q1);
        let whisker_high = inside.last().copied().unwrap_or(q3);

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Linear-interpolated percentile of sorted data, `p` in 0..=1.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let (lower, upper) = (rank.floor() as usize, rank.ceil() as usize);
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

/// Box plot renderer. Holds all styling so no global plot state exists.
pub struct BoxPlot {
    size: (u32, u32),
    caption_size: u32,
    label_size: u32,
    box_color: RGBColor,
}

impl BoxPlot {
    pub fn new() -> Self {
        Self {
            size: (800, 600),
            caption_size: 32,
            label_size: 28,
            box_color: RGBColor(76, 114, 176),
        }
    }

    /// Chart caption for a query.
    pub fn title(query: &str) -> String {
        format!("Boxplot de Preços - {}", query)
    }

    /// Renders the price distribution of `records` as an SVG at `path`.
    pub fn render(&self, records: &[ProductRecord], query: &str, path: &Path) -> Result<()> {
        let prices: Vec<f64> = records.iter().map(ProductRecord::price).collect();
        let Some(stats) = BoxStats::from_values(&prices) else {
            anyhow::bail!("Cannot plot an empty price list");
        };
        let x_range = axis_range(stats.min, stats.max);

        debug!("Plotting {} prices over {:?}", prices.len(), x_range);

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(Self::title(query), ("sans-serif", self.caption_size))
            .margin(20)
            .x_label_area_size(60)
            .build_cartesian_2d(x_range, 0.0..1.0)?;

        chart
            .configure_mesh()
            .x_desc("Preço (R$)")
            .axis_desc_style(("sans-serif", self.label_size))
            .disable_y_mesh()
            .disable_y_axis()
            .draw()?;

        let (box_low, box_high, cap_low, cap_high) = (0.3, 0.7, 0.4, 0.6);
        let line = ShapeStyle::from(&BLACK).stroke_width(2);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(stats.q1, box_low), (stats.q3, box_high)],
            self.box_color.mix(0.8).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(stats.q1, box_low), (stats.q3, box_high)],
            line,
        )))?;

        chart.draw_series(
            [
                vec![(stats.median, box_low), (stats.median, box_high)],
                vec![(stats.whisker_low, 0.5), (stats.q1, 0.5)],
                vec![(stats.q3, 0.5), (stats.whisker_high, 0.5)],
                vec![(stats.whisker_low, cap_low), (stats.whisker_low, cap_high)],
                vec![(stats.whisker_high, cap_low), (stats.whisker_high, cap_high)],
            ]
            .into_iter()
            .map(|points| PathElement::new(points, line)),
        )?;

        chart.draw_series(
            stats.outliers.iter().map(|v| Circle::new((*v, 0.5), 5, ShapeStyle::from(&BLACK))),
        )?;

        root.present()
            .with_context(|| format!("Failed to write plot: {}", path.display()))?;
        Ok(())
    }
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self::new()
    }
}

/// X axis range covering all data with a 5% margin on each side.
fn axis_range(min: f64, max: f64) -> Range<f64> {
    let margin = ((max - min) * 0.05).max(1.0);
    (min - margin)..(max + margin)
}
