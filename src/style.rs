//! Style configuration and its application to figures.
//!
//! [`StyleConfig`] is the typed set of look-and-feel settings shared by every
//! chart. A caller adjusts it with a [`StyleOverrides`] value: each field set
//! in the overrides replaces the base field wholesale (shallow merge), so an
//! override of `margins` must carry all four sides.
//!
//! ```
//! use exploralytics::style::{default_style, resolve, StyleOverrides};
//!
//! let custom = resolve(default_style(), &StyleOverrides::default().font_size(14)).unwrap();
//! assert_eq!(custom.font_size, 14);
//! assert_eq!(custom.title_size, default_style().title_size);
//! ```

use crate::color::{Color, ColorScale};
use crate::error::{Result, VizError};
use crate::figure::{ChartTitle, Figure, Font, Title};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Four-sided inset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YAnchor {
    Top,
    Middle,
    Bottom,
}

/// Legend placement in figure-fraction coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendPosition {
    pub x: f64,
    pub y: f64,
    pub x_anchor: XAnchor,
    pub y_anchor: YAnchor,
}

/// Look-and-feel shared by every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    pub font_size: u32,
    pub font_family: String,
    pub title_size: u32,
    /// Title centre as a fraction of the width, `0.0..=1.0`.
    pub title_x: f64,
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    pub color_scale: ColorScale,
    pub background_color: Color,
    pub grid_color: Color,
    pub show_grid: bool,
    pub grid_width: u32,
    pub show_legend: bool,
    pub legend_position: LegendPosition,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: 12,
            font_family: "Arial, sans-serif".to_string(),
            title_size: 16,
            title_x: 0.5,
            width: 800,
            height: 600,
            margins: Margins {
                left: 50,
                right: 50,
                top: 80,
                bottom: 50,
            },
            color_scale: ColorScale::RdBu,
            background_color: Color::WHITE,
            grid_color: Color::rgb(0xE5, 0xE5, 0xE5),
            show_grid: true,
            grid_width: 1,
            show_legend: true,
            legend_position: LegendPosition {
                x: 1.02,
                y: 1.0,
                x_anchor: XAnchor::Left,
                y_anchor: YAnchor::Top,
            },
        }
    }
}

static DEFAULT_STYLE: LazyLock<StyleConfig> = LazyLock::new(StyleConfig::default);

/// The canonical default style. Never mutated; clone it to customise.
pub fn default_style() -> &'static StyleConfig {
    &DEFAULT_STYLE
}

impl StyleConfig {
    /// Reject sizes of zero, an empty font family and a title outside the canvas.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("font_size", self.font_size),
            ("title_size", self.title_size),
            ("width", self.width),
            ("height", self.height),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(VizError::invalid(format!("style {name} must be positive")));
        }
        if self.font_family.trim().is_empty() {
            return Err(VizError::invalid("style font_family must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.title_x) {
            return Err(VizError::invalid(format!(
                "style title_x must be within 0..=1, got {}",
                self.title_x
            )));
        }
        Ok(())
    }

    /// Shallow merge of `overrides` onto a copy of `self`, then validation.
    pub fn merged(&self, overrides: &StyleOverrides) -> Result<StyleConfig> {
        let o = overrides.clone();
        let style = StyleConfig {
            font_size: o.font_size.unwrap_or(self.font_size),
            font_family: o.font_family.unwrap_or_else(|| self.font_family.clone()),
            title_size: o.title_size.unwrap_or(self.title_size),
            title_x: o.title_x.unwrap_or(self.title_x),
            width: o.width.unwrap_or(self.width),
            height: o.height.unwrap_or(self.height),
            margins: o.margins.unwrap_or(self.margins),
            color_scale: o.color_scale.unwrap_or(self.color_scale),
            background_color: o.background_color.unwrap_or(self.background_color),
            grid_color: o.grid_color.unwrap_or(self.grid_color),
            show_grid: o.show_grid.unwrap_or(self.show_grid),
            grid_width: o.grid_width.unwrap_or(self.grid_width),
            show_legend: o.show_legend.unwrap_or(self.show_legend),
            legend_position: o.legend_position.unwrap_or(self.legend_position),
        };
        style.validate()?;
        Ok(style)
    }
}

/// Per-field replacements for a [`StyleConfig`]. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverrides {
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub title_size: Option<u32>,
    pub title_x: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margins: Option<Margins>,
    pub color_scale: Option<ColorScale>,
    pub background_color: Option<Color>,
    pub grid_color: Option<Color>,
    pub show_grid: Option<bool>,
    pub grid_width: Option<u32>,
    pub show_legend: Option<bool>,
    pub legend_position: Option<LegendPosition>,
}

impl StyleOverrides {
    pub fn font_size(mut self, v: u32) -> Self {
        self.font_size = Some(v);
        self
    }

    pub fn font_family(mut self, v: &str) -> Self {
        self.font_family = Some(v.to_string());
        self
    }

    pub fn title_size(mut self, v: u32) -> Self {
        self.title_size = Some(v);
        self
    }

    pub fn title_x(mut self, v: f64) -> Self {
        self.title_x = Some(v);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn margins(mut self, v: Margins) -> Self {
        self.margins = Some(v);
        self
    }

    pub fn color_scale(mut self, v: ColorScale) -> Self {
        self.color_scale = Some(v);
        self
    }

    pub fn background_color(mut self, v: Color) -> Self {
        self.background_color = Some(v);
        self
    }

    pub fn grid(mut self, show: bool, width: u32, color: Color) -> Self {
        self.show_grid = Some(show);
        self.grid_width = Some(width);
        self.grid_color = Some(color);
        self
    }

    pub fn legend(mut self, show: bool, position: Option<LegendPosition>) -> Self {
        self.show_legend = Some(show);
        self.legend_position = position;
        self
    }

    /// Parse overrides from JSON; unknown keys are an error.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| VizError::invalid(format!("style overrides: {e}")))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json(&s)
    }
}

/// Effective style: `base` with every field set in `overrides` replaced.
pub fn resolve(base: &StyleConfig, overrides: &StyleOverrides) -> Result<StyleConfig> {
    base.merged(overrides)
}

/// Write the resolved style into `figure`'s layout.
///
/// Sets the title, canvas size (explicit overrides win over the style), margins,
/// backgrounds, font, legend and the grid and zero line of every axis.
/// Applying it twice with the same arguments leaves the same layout.
pub fn apply(
    figure: &mut Figure,
    title: impl Into<ChartTitle>,
    style: &StyleConfig,
    height: Option<u32>,
    width: Option<u32>,
) {
    let layout = &mut figure.layout;
    layout.title = Some(Title {
        title: title.into(),
        x: style.title_x,
        font: Font {
            size: style.title_size,
            family: style.font_family.clone(),
        },
    });
    layout.height = Some(height.unwrap_or(style.height));
    layout.width = Some(width.unwrap_or(style.width));
    layout.margins = Some(style.margins);
    layout.paper_bgcolor = Some(style.background_color);
    layout.plot_bgcolor = Some(style.background_color);
    layout.font = Some(Font {
        size: style.font_size,
        family: style.font_family.clone(),
    });
    layout.show_legend = Some(style.show_legend);
    layout.legend = Some(style.legend_position);

    for axis in figure.axes_mut() {
        axis.show_grid = style.show_grid;
        axis.grid_width = style.grid_width;
        axis.grid_color = Some(style.grid_color);
        axis.zeroline = true;
        axis.zeroline_width = 1;
        axis.zeroline_color = Some(Color::BLACK);
    }
}
