use super::{Visualizer, ensure_rows, select_numeric};
use crate::color::Color;
use crate::dataset::Dataset;
use crate::error::{Result, VizError};
use crate::figure::{BarTrace, ChartTitle, Figure, HeatmapTrace, Trace};
use crate::stats::{self, CorrelationMatrix};
use crate::style;

const NEGATIVE_COLOR: Color = Color::rgb(0xFF, 0x99, 0x99);
const POSITIVE_COLOR: Color = Color::rgb(0x2E, 0x75, 0xB6);
/// Pixels per bar for the target chart, and the floor.
const TARGET_ROW_PX: u32 = 30;
const TARGET_MIN_HEIGHT: u32 = 400;

/// Options for [`Visualizer::plot_correlation_map`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationOptions {
    /// Columns to correlate; empty means every numeric column.
    pub columns: Vec<String>,
    pub title: String,
    pub subtitle: String,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            title: "How correlated the numerical values are?".to_string(),
            subtitle: "Correlation matrix of columns with numerical data type".to_string(),
        }
    }
}

/// Options for [`Visualizer::plot_correlation_with_target`].
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCorrelationOptions {
    pub title: String,
    pub subtitle: String,
}

impl Default for TargetCorrelationOptions {
    fn default() -> Self {
        Self {
            title: "How correlated the features are with the target?".to_string(),
            subtitle: "Correlation coefficient of each feature".to_string(),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Lower-triangle heatmap trace. Cells on or above the diagonal are masked,
/// and their annotation and hover text are left empty.
fn lower_triangle(corr: &CorrelationMatrix, style: &style::StyleConfig) -> HeatmapTrace {
    let n = corr.columns.len();
    let mut z = vec![vec![None; n]; n];
    let mut text = vec![vec![String::new(); n]; n];
    let mut hover = vec![vec![String::new(); n]; n];

    for i in 0..n {
        for j in 0..i {
            if let Some(v) = corr.values[i][j].map(round2) {
                z[i][j] = Some(v);
                text[i][j] = format!("{v:.2}");
                hover[i][j] = format!("{} vs {}: {v:.2}", corr.columns[i], corr.columns[j]);
            }
        }
    }

    HeatmapTrace {
        x: corr.columns.clone(),
        y: corr.columns.clone(),
        z,
        text,
        hover,
        color_scale: style.color_scale,
        zmin: -1.0,
        zmax: 1.0,
        show_scale: true,
        gap: 1,
    }
}

impl Visualizer {
    /// Lower-triangle correlation heatmap of the numeric columns.
    pub fn plot_correlation_map(&self, data: &Dataset, opts: &CorrelationOptions) -> Result<Figure> {
        ensure_rows(data)?;
        let columns = select_numeric(data, &opts.columns)?;
        let corr = stats::correlation_matrix(data, &columns)?;
        log::debug!("correlation map over {} columns", columns.len());

        let mut fig = Figure::new();
        fig.add_trace(Trace::Heatmap(lower_triangle(&corr, &self.style)), (1, 1))?;

        style::apply(
            &mut fig,
            ChartTitle::new(&opts.title, &opts.subtitle),
            &self.style,
            Some(self.height),
            Some(self.width),
        );
        for axis in fig.axes_mut() {
            axis.show_grid = false;
            axis.zeroline = false;
        }
        fig.layout.x_axes[0].tick_angle = Some(90);
        fig.layout.y_axes[0].reversed = true;
        Ok(fig)
    }

    /// Horizontal bars of each numeric feature's correlation with `target`,
    /// sorted ascending and coloured by sign.
    pub fn plot_correlation_with_target(
        &self,
        data: &Dataset,
        target: &str,
        opts: &TargetCorrelationOptions,
    ) -> Result<Figure> {
        ensure_rows(data)?;
        let target_cells = data
            .require_column(target)?
            .as_numeric()
            .ok_or_else(|| VizError::invalid(format!("target column '{target}' is not numeric")))?;

        let mut correlations: Vec<(String, f64)> = Vec::new();
        for name in data.numeric_columns().into_iter().filter(|c| *c != target) {
            let cells = data.numeric(name).unwrap_or_default();
            match stats::pearson(cells, target_cells) {
                Some(r) => correlations.push((name.to_string(), r)),
                None => log::warn!("correlation of '{name}' with '{target}' is undefined, skipped"),
            }
        }
        if correlations.is_empty() {
            return Err(VizError::NoNumericColumns);
        }
        correlations.sort_by(|a, b| a.1.total_cmp(&b.1));

        let n = correlations.len();
        let (labels, values): (Vec<String>, Vec<f64>) = correlations.into_iter().unzip();
        let colors = values
            .iter()
            .map(|v| if *v < 0.0 { NEGATIVE_COLOR } else { POSITIVE_COLOR })
            .collect();
        let text: Vec<String> = values.iter().map(|v| format!("{v:.2}")).collect();
        let hover = labels
            .iter()
            .zip(&text)
            .map(|(l, t)| format!("{l}: {t}"))
            .collect();

        let mut fig = Figure::new();
        fig.add_trace(
            Trace::Bar(BarTrace {
                labels,
                values,
                colors,
                text,
                hover,
            }),
            (1, 1),
        )?;

        let height = TARGET_MIN_HEIGHT.max(n as u32 * TARGET_ROW_PX);
        style::apply(
            &mut fig,
            ChartTitle::new(&opts.title, &opts.subtitle),
            &self.style,
            Some(height),
            Some(self.width),
        );
        fig.layout.show_legend = Some(false);
        let x = &mut fig.layout.x_axes[0];
        x.title = Some("Correlation Coefficient".to_string());
        x.zeroline_width = 2;
        x.tick_decimals = Some(2);
        let y = &mut fig.layout.y_axes[0];
        y.title = Some("Features".to_string());
        y.reversed = true;
        Ok(fig)
    }
}
