use crate::dataset::Dataset;
use crate::error::{Result, VizError};
use serde::{Deserialize, Serialize};

/// Summary statistics for one numeric column (a `describe` row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Five-number summary plus Tukey fences, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest value inside `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Highest value inside `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile_sorted(&sorted, 0.5)
}

/// Sample standard deviation (n - 1), `None` below two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Linear-interpolated quantile of already sorted data.
fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quartiles, whiskers and outliers for a box plot. `None` for empty input.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    let sorted = sorted_copy(values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v >= lo_fence && *v <= hi_fence)
        .collect();
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lo_fence || *v > hi_fence)
        .collect();

    Some(Quartiles {
        q1,
        median,
        q3,
        lower_whisker: inside.first().copied().unwrap_or(q1),
        upper_whisker: inside.last().copied().unwrap_or(q3),
        outliers,
    })
}

/// Pearson correlation over rows where both cells are present.
///
/// `None` when fewer than two complete pairs remain or either side is constant.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let r = sxy / (sxx * syy).sqrt();
    if r.is_finite() {
        Some(r.clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Square correlation matrix over a set of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is corr(columns[i], columns[j]); `None` when undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        self.values[i][j]
    }
}

/// Pairwise Pearson correlation of the named numeric columns.
pub fn correlation_matrix(data: &Dataset, columns: &[&str]) -> Result<CorrelationMatrix> {
    let cells: Vec<&[Option<f64>]> = columns
        .iter()
        .map(|name| {
            data.numeric(name)
                .ok_or_else(|| VizError::invalid(format!("'{name}' is not a numeric column")))
        })
        .collect::<Result<_>>()?;

    let n = cells.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                pearson(cells[i], cells[i]).map(|_| 1.0)
            } else {
                pearson(cells[i], cells[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

/// Per-column summaries for every numeric column.
pub fn describe(data: &Dataset) -> Vec<Summary> {
    data.columns()
        .iter()
        .filter_map(|col| {
            let cells = col.as_numeric()?;
            let vals = col.dropna();
            let sorted = sorted_copy(&vals);
            Some(Summary {
                column: col.name.clone(),
                count: vals.len(),
                missing: cells.len() - vals.len(),
                mean: mean(&vals),
                std: std_dev(&vals),
                min: sorted.first().copied(),
                q1: quantile_sorted(&sorted, 0.25),
                median: quantile_sorted(&sorted, 0.5),
                q3: quantile_sorted(&sorted, 0.75),
                max: sorted.last().copied(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[10.0, 30.0, 20.0]), Some(20.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn pearson_skips_incomplete_pairs() {
        let x = [Some(1.0), Some(2.0), None, Some(4.0)];
        let y = [Some(2.0), Some(4.0), Some(100.0), Some(8.0)];
        let r = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_constant_is_undefined() {
        let x = [Some(1.0), Some(1.0), Some(1.0)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&x, &y), None);
    }

    #[test]
    fn pearson_infinite_is_undefined() {
        let x = [Some(1.0), Some(f64::INFINITY), Some(3.0)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&x, &y), None);
    }

    #[test]
    fn quartiles_flag_outliers() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(q.outliers, vec![100.0]);
        assert_eq!(q.upper_whisker, 5.0);
        assert_eq!(q.lower_whisker, 1.0);
        assert!((q.median - 3.5).abs() < 1e-12);
    }
}
