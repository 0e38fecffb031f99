//! Descriptive statistics over listing prices.

use crate::listing::ProductRecord;

/// Position of a price relative to the mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// Strictly above the mean.
    High,
    /// At or below the mean.
    Low,
}

impl PriceBand {
    /// Classifies a price against a mean. Equal to the mean counts as low.
    pub fn classify(price: f64, mean: f64) -> Self {
        if price > mean {
            PriceBand::High
        } else {
            PriceBand::Low
        }
    }
}

/// Mean price and the partition of records around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub mean: f64,
    pub above_mean: usize,
    pub at_or_below_mean: usize,
}

impl PriceSummary {
    /// Summarizes the prices of `records`. An empty slice has a mean of zero.
    pub fn from_records(records: &[ProductRecord]) -> Self {
        let mean = if records.is_empty() {
            0.0
        } else {
            records.iter().map(ProductRecord::price).sum::<f64>() / records.len() as f64
        };

        let above_mean = records
            .iter()
            .filter(|r| PriceBand::classify(r.price(), mean) == PriceBand::High)
            .count();

        Self { mean, above_mean, at_or_below_mean: records.len() - above_mean }
    }

    /// Band of a single price under this summary's mean.
    pub fn band(&self, price: f64) -> PriceBand {
        PriceBand::classify(price, self.mean)
    }

    /// Number of records summarized.
    pub fn total(&self) -> usize {
        self.above_mean + self.at_or_below_mean
    }
}
