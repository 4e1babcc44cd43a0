use super::{Visualizer, ensure_rows, select_numeric};
use crate::color::Color;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::figure::{ChartTitle, Figure, HistogramTrace, LineDash, Trace};
use crate::layout::GridLayout;
use crate::stats;
use crate::style;

/// Colour of the mean/median guide lines.
const GUIDE_COLOR: Color = Color::rgb(0xD3, 0xD3, 0xD3);

/// Options for [`Visualizer::plot_histograms`].
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramOptions {
    /// Columns to plot; empty means every numeric column.
    pub columns: Vec<String>,
    /// Subplots per row.
    pub num_cols: usize,
    pub title: String,
    pub subtitle: String,
    /// Solid guide line at each column's mean.
    pub show_mean: bool,
    /// Dotted guide line at each column's median.
    pub show_median: bool,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            num_cols: 1,
            title: "How distributed the numerical values are?".to_string(),
            subtitle: "Histogram of each column with numerical data type".to_string(),
            show_mean: false,
            show_median: false,
        }
    }
}

impl Visualizer {
    /// One histogram per numeric column, laid out `num_cols` wide.
    pub fn plot_histograms(&self, data: &Dataset, opts: &HistogramOptions) -> Result<Figure> {
        ensure_rows(data)?;
        let columns = select_numeric(data, &opts.columns)?;
        let grid = GridLayout::for_items(columns.len(), opts.num_cols)?;
        log::debug!(
            "histograms: {} columns on a {}x{} grid",
            columns.len(),
            grid.rows,
            grid.columns
        );

        let titles = columns.iter().map(|c| c.to_string()).collect();
        let mut fig = Figure::subplots(grid.rows, grid.columns, titles)?;

        for (index, name) in columns.iter().enumerate() {
            let cell = grid.cell(index);
            let values = data.require_column(name)?.dropna();

            if opts.show_mean {
                if let Some(m) = stats::mean(&values) {
                    fig.add_vline(m, cell, GUIDE_COLOR, LineDash::Solid)?;
                }
            }
            if opts.show_median {
                if let Some(m) = stats::median(&values) {
                    fig.add_vline(m, cell, GUIDE_COLOR, LineDash::Dot)?;
                }
            }

            fig.add_trace(
                Trace::Histogram(HistogramTrace {
                    name: name.to_string(),
                    values,
                    bins: None,
                    color: self.color,
                    opacity: 1.0,
                }),
                cell,
            )?;
        }

        style::apply(
            &mut fig,
            ChartTitle::new(&opts.title, &opts.subtitle),
            &self.style,
            Some(self.height),
            Some(self.width),
        );
        fig.layout.show_legend = Some(false);
        fig.layout.subplot_title_size = Some(12);
        Ok(fig)
    }
}
