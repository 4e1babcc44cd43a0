//! Preset chart builders.
//!
//! A [`Visualizer`] holds the colour, canvas size and style shared by its
//! charts. Each `plot_*` method borrows a [`Dataset`], returns a freshly built
//! and styled [`crate::figure::Figure`], and never touches the input.
//!
//! ```
//! use exploralytics::charts::{HistogramOptions, Visualizer};
//! use exploralytics::dataset::{Column, Dataset};
//!
//! let data = Dataset::new(vec![
//!     Column::numeric("a", [1.0, 2.0, 3.0]),
//!     Column::numeric("b", [4.0, 5.0, 6.0]),
//! ])?;
//! let fig = Visualizer::default().plot_histograms(&data, &HistogramOptions::default())?;
//! assert_eq!(fig.traces.len(), 2);
//! # Ok::<(), exploralytics::VizError>(())
//! ```

mod correlation;
mod distribution;
mod hbar;
mod histogram;

pub use correlation::{CorrelationOptions, TargetCorrelationOptions};
pub use distribution::DistributionOptions;
pub use hbar::HbarOptions;
pub use histogram::HistogramOptions;

use crate::color::Color;
use crate::dataset::Dataset;
use crate::error::{Result, VizError};
use crate::style::{StyleConfig, StyleOverrides, default_style, resolve};

/// Default bar/histogram colour.
pub const DEFAULT_COLOR: &str = "#94C973";
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_WIDTH: u32 = 800;

/// Chart factory with shared colour, size and style.
#[derive(Debug, Clone, PartialEq)]
pub struct Visualizer {
    color: Color,
    height: u32,
    width: u32,
    style: StyleConfig,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x94, 0xC9, 0x73),
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            style: default_style().clone(),
        }
    }
}

impl Visualizer {
    /// Validates `color`; `style` falls back to a copy of the default style.
    pub fn new(color: &str, height: u32, width: u32, style: Option<StyleConfig>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(VizError::invalid(format!(
                "figure size must be positive, got {width}x{height}"
            )));
        }
        let style = style.unwrap_or_else(|| default_style().clone());
        style.validate()?;
        Ok(Self {
            color: Color::parse(color)?,
            height,
            width,
            style,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Merge `overrides` into this visualizer's style.
    pub fn update_style(&mut self, overrides: &StyleOverrides) -> Result<()> {
        self.style = resolve(&self.style, overrides)?;
        Ok(())
    }
}

/// Zero rows is an error for every chart.
fn ensure_rows(data: &Dataset) -> Result<()> {
    if data.is_empty() {
        return Err(VizError::EmptyDataset);
    }
    Ok(())
}

/// Numeric columns to plot: the requested ones that are numeric, or all
/// numeric columns when none were requested.
fn select_numeric<'a>(data: &'a Dataset, requested: &'a [String]) -> Result<Vec<&'a str>> {
    let selected: Vec<&str> = if requested.is_empty() {
        data.numeric_columns()
    } else {
        let mut out = Vec::with_capacity(requested.len());
        for name in requested {
            let col = data.require_column(name)?;
            if col.is_numeric() {
                out.push(name.as_str());
            } else {
                log::warn!("skipping non-numeric column '{name}'");
            }
        }
        out
    };
    if selected.is_empty() {
        return Err(VizError::NoNumericColumns);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_color_rejected() {
        let err = Visualizer::new("green-ish", 600, 800, None).unwrap_err();
        assert!(matches!(err, VizError::InvalidArgument(_)));
    }

    #[test]
    fn update_style_is_shallow() {
        let mut viz = Visualizer::default();
        viz.update_style(&StyleOverrides::default().font_size(14).title_x(1.0))
            .unwrap();
        assert_eq!(viz.style().font_size, 14);
        assert_eq!(viz.style().title_x, 1.0);
        assert_eq!(viz.style().margins, default_style().margins);
    }
}
