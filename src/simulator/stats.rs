//! Descriptive statistics over final balances.

use serde::Serialize;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, averaging the two middle values for even-length input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean: mean(values),
            median: median(values),
            std_dev: std_dev(values),
            min: if values.is_empty() { 0.0 } else { min },
            max: if values.is_empty() { 0.0 } else { max },
        }
    }
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub lower: f64,
    pub upper: f64,
    pub counts: Vec<u32>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets spanning their range.
    /// The last bucket is closed so the maximum lands in it.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let mut counts = vec![0; bins];
        if values.is_empty() {
            return Self {
                lower: 0.0,
                upper: 0.0,
                counts,
            };
        }

        let mut lower = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut upper = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lower == upper {
            // same convention as numpy for a degenerate range
            lower -= 0.5;
            upper += 0.5;
        }

        let width = (upper - lower) / bins as f64;
        for &v in values {
            let idx = (((v - lower) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            lower,
            upper,
            counts,
        }
    }

    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.counts.len() as f64
    }

    /// Left and right edge of bin `idx`.
    pub fn bin_edges(&self, idx: usize) -> (f64, f64) {
        let width = self.bin_width();
        let left = self.lower + idx as f64 * width;
        (left, left + width)
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}
