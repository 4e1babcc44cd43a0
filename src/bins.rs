//! Histogram bin-count suggestion and counting.

use crate::error::{Result, VizError};
use serde::{Deserialize, Serialize};

/// Suggest a bin count for `values` with Sturges' rule, `ceil(log2 n) + 1`.
///
/// Missing and non-finite values are dropped first. Fails when nothing is left.
pub fn suggest_bins(values: &[Option<f64>]) -> Result<usize> {
    let n = values.iter().flatten().filter(|v| v.is_finite()).count();
    if n == 0 {
        return Err(VizError::invalid("cannot suggest bins: all values are missing"));
    }
    let bins = sturges(n);
    log::debug!("suggest_bins: n={n} -> {bins}");
    Ok(bins)
}

/// Sturges' rule for `n` observations; at least one bin.
pub fn sturges(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width bin edges and per-bin counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Count finite `values` into `bins` equal-width bins spanning their range.
///
/// Every bin is half-open except the last, which also holds the maximum.
/// A single-valued sample gets the range `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(VizError::invalid("bin count must be at least 1"));
    }
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(VizError::invalid("cannot build a histogram without values"));
    }
    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi == lo {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Ok(Histogram { edges, counts })
}
