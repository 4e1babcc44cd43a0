use super::{Visualizer, ensure_rows};
use crate::color::{Color, Highlight, assign_colors};
use crate::dataset::Dataset;
use crate::error::{Result, VizError};
use crate::figure::{BarTrace, ChartTitle, Figure, LineDash, Trace};
use crate::stats;
use crate::style;
use num_format::{Locale, ToFormattedString};

/// Options for [`Visualizer::plot_hbar`].
#[derive(Debug, Clone, PartialEq)]
pub struct HbarOptions {
    /// Column whose values label the bars.
    pub category_column: String,
    /// Column giving bar lengths. `None` plots value counts of `category_column`.
    pub value_column: Option<String>,
    pub title: String,
    pub subtitle: String,
    /// Keep only the first `n` bars after sorting.
    pub top_n: Option<usize>,
    /// Dashed grey line at the mean bar length.
    pub add_mean_line: bool,
    pub highlight_top: Option<Highlight>,
    pub highlight_low: Option<Highlight>,
}

impl HbarOptions {
    pub fn new(category_column: &str) -> Self {
        Self {
            category_column: category_column.to_string(),
            value_column: None,
            title: "How distributed are the categories?".to_string(),
            subtitle: "Horizontal bar plot of categories".to_string(),
            top_n: None,
            add_mean_line: false,
            highlight_top: None,
            highlight_low: None,
        }
    }

    pub fn value_column(mut self, name: &str) -> Self {
        self.value_column = Some(name.to_string());
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn mean_line(mut self, on: bool) -> Self {
        self.add_mean_line = on;
        self
    }

    pub fn highlight_top(mut self, h: Highlight) -> Self {
        self.highlight_top = Some(h);
        self
    }

    pub fn highlight_low(mut self, h: Highlight) -> Self {
        self.highlight_low = Some(h);
        self
    }
}

/// Bars sorted by `value_col` descending, rows with a missing value dropped.
fn sorted_rows(data: &Dataset, category: &str, value_col: &str) -> Result<Vec<(String, f64)>> {
    let labels = data.require_column(category)?;
    let values = data
        .require_column(value_col)?
        .as_numeric()
        .ok_or_else(|| VizError::invalid(format!("value column '{value_col}' is not numeric")))?;

    let mut rows: Vec<(String, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| Some((labels.display_value(i).unwrap_or_default(), (*v)?)))
        .collect();
    // Stable sort keeps table order among equal values.
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(rows)
}

impl Visualizer {
    /// Horizontal bar chart of category counts or of a value column.
    pub fn plot_hbar(&self, data: &Dataset, opts: &HbarOptions) -> Result<Figure> {
        ensure_rows(data)?;
        if opts.top_n == Some(0) {
            return Err(VizError::invalid("top_n must be at least 1"));
        }

        let category = opts.category_column.as_str();
        let mut rows: Vec<(String, f64)> = match &opts.value_column {
            None => data
                .value_counts(category)?
                .into_iter()
                .map(|(label, n)| (label, n as f64))
                .collect(),
            Some(value_col) => sorted_rows(data, category, value_col)?,
        };
        if let Some(n) = opts.top_n {
            rows.truncate(n);
        }

        let colors: Vec<Color> = if opts.highlight_top.is_some() || opts.highlight_low.is_some() {
            assign_colors(
                self.color,
                rows.len(),
                opts.highlight_top.as_ref(),
                opts.highlight_low.as_ref(),
            )
        } else {
            vec![self.color; rows.len()]
        };

        let value_title = opts.value_column.clone().unwrap_or_else(|| "Count".to_string());
        let hover = rows
            .iter()
            .map(|(label, v)| {
                let shown = match opts.value_column {
                    None => (*v as u64).to_formatted_string(&Locale::en),
                    Some(_) => format_with_separators(*v),
                };
                format!("{category}: {label}\n{value_title}: {shown}")
            })
            .collect();

        let (labels, values): (Vec<String>, Vec<f64>) = rows.into_iter().unzip();
        let mean = stats::mean(&values);
        let bar_count = labels.len();

        let mut fig = Figure::new();
        fig.add_trace(
            Trace::Bar(BarTrace {
                labels,
                values,
                colors,
                text: vec![String::new(); bar_count],
                hover,
            }),
            (1, 1),
        )?;

        if opts.add_mean_line {
            if let Some(m) = mean {
                fig.add_vline(m, (1, 1), Color::GREY, LineDash::Dash)?;
            }
        }

        style::apply(
            &mut fig,
            ChartTitle::new(&opts.title, &opts.subtitle),
            &self.style,
            Some(self.height),
            Some(self.width),
        );
        fig.layout.show_legend = Some(false);
        fig.layout.x_axes[0].title = Some(value_title);
        let y = &mut fig.layout.y_axes[0];
        y.title = Some(category.to_string());
        y.reversed = true;
        Ok(fig)
    }
}

/// Two decimals with thousands separators, e.g. `12,345.60`.
fn format_with_separators(v: f64) -> String {
    let rounded = (v.abs() * 100.0).round() / 100.0;
    let whole = (rounded.trunc() as u64).to_formatted_string(&Locale::en);
    let cents = ((rounded.fract() * 100.0).round() as u64).min(99);
    let sign = if v < 0.0 && rounded != 0.0 { "-" } else { "" };
    format!("{sign}{whole}.{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators() {
        assert_eq!(format_with_separators(12345.6), "12,345.60");
        assert_eq!(format_with_separators(-0.5), "-0.50");
        assert_eq!(format_with_separators(3.0), "3.00");
    }
}
