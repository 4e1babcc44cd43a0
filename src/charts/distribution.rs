use super::{Visualizer, ensure_rows, select_numeric};
use crate::bins::suggest_bins;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::figure::{BoxTrace, ChartTitle, Figure, HistogramTrace, Trace};
use crate::layout::GridLayout;
use crate::style;

/// Pixel height given to each subplot row.
const ROW_HEIGHT_PX: u32 = 300;
const HISTOGRAM_OPACITY: f64 = 0.7;

/// Options for [`Visualizer::plot_distributions`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionOptions {
    /// Columns to plot; empty means every numeric column.
    pub columns: Vec<String>,
    /// Subplots per row; `None` picks a layout automatically.
    pub num_cols: Option<usize>,
    pub title: String,
    pub subtitle: String,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            num_cols: None,
            title: "Distribution Analysis".to_string(),
            subtitle: String::new(),
        }
    }
}

impl Visualizer {
    /// Histogram and box plot per numeric column, sharing one cell each.
    pub fn plot_distributions(&self, data: &Dataset, opts: &DistributionOptions) -> Result<Figure> {
        ensure_rows(data)?;
        let columns = select_numeric(data, &opts.columns)?;
        let grid = match opts.num_cols {
            Some(n) => GridLayout::for_items(columns.len(), n)?,
            None => GridLayout::auto(columns.len()),
        };

        let titles = columns.iter().map(|c| c.to_string()).collect();
        let mut fig = Figure::subplots(grid.rows, grid.columns, titles)?;
        fig.vertical_spacing = 0.1;

        for (index, name) in columns.iter().enumerate() {
            let cell = grid.cell(index);
            let column = data.require_column(name)?;
            let bins = suggest_bins(column.as_numeric().unwrap_or_default())?;
            let values = column.dropna();

            fig.add_trace(
                Trace::Histogram(HistogramTrace {
                    name: format!("{name} (Histogram)"),
                    values: values.clone(),
                    bins: Some(bins),
                    color: self.color,
                    opacity: HISTOGRAM_OPACITY,
                }),
                cell,
            )?;
            fig.add_trace(
                Trace::Box(BoxTrace {
                    name: format!("{name} (Box)"),
                    values,
                    color: self.color,
                    show_outliers: true,
                }),
                cell,
            )?;
        }

        style::apply(
            &mut fig,
            ChartTitle::new(&opts.title, &opts.subtitle),
            &self.style,
            Some(grid.rows as u32 * ROW_HEIGHT_PX),
            Some(self.width),
        );
        fig.layout.show_legend = Some(false);
        Ok(fig)
    }
}
