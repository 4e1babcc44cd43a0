//! Figure model: traces placed on a subplot grid plus layout metadata.
//!
//! Chart builders fill a [`Figure`], [`crate::style::apply`] finalises its
//! layout and [`crate::render`] draws it. The model is plain data and
//! serialises to JSON.

use crate::color::{Color, ColorScale};
use crate::error::{Result, VizError};
use crate::layout::GridLayout;
use crate::style::{LegendPosition, Margins};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 1-based subplot coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramTrace {
    pub name: String,
    pub values: Vec<f64>,
    /// `None` lets the renderer pick a bin count.
    pub bins: Option<usize>,
    pub color: Color,
    pub opacity: f64,
}

/// Horizontal bars, one per label, drawn top to bottom when the y axis is reversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// One colour per bar.
    pub colors: Vec<Color>,
    /// Text printed next to each bar; empty for none.
    pub text: Vec<String>,
    pub hover: Vec<String>,
}

/// Horizontal box plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTrace {
    pub name: String,
    pub values: Vec<f64>,
    pub color: Color,
    pub show_outliers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapTrace {
    pub x: Vec<String>,
    pub y: Vec<String>,
    /// Row-major, `z[row][col]`; `None` cells are not drawn.
    pub z: Vec<Vec<Option<f64>>>,
    /// Cell annotations, `""` for hidden cells.
    pub text: Vec<Vec<String>>,
    pub hover: Vec<Vec<String>>,
    pub color_scale: ColorScale,
    pub zmin: f64,
    pub zmax: f64,
    pub show_scale: bool,
    /// Pixel gap between cells.
    pub gap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Trace {
    Histogram(HistogramTrace),
    Bar(BarTrace),
    Box(BoxTrace),
    Heatmap(HeatmapTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTrace {
    pub cell: Cell,
    pub trace: Trace,
}

/// Straight line across a subplot at a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub cell: Cell,
    /// `Vertical` lines sit at an x value, `Horizontal` ones at a y value.
    pub orientation: Orientation,
    pub position: f64,
    pub color: Color,
    pub dash: LineDash,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: u32,
    pub family: String,
}

/// Main title plus optional smaller second line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartTitle {
    pub text: String,
    pub subtitle: Option<String>,
}

impl ChartTitle {
    pub fn new(text: &str, subtitle: &str) -> Self {
        Self {
            text: text.to_string(),
            subtitle: (!subtitle.is_empty()).then(|| subtitle.to_string()),
        }
    }
}

impl From<&str> for ChartTitle {
    fn from(text: &str) -> Self {
        Self::new(text, "")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub title: ChartTitle,
    /// Horizontal position as a fraction of the figure width.
    pub x: f64,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    pub title: Option<String>,
    pub show_grid: bool,
    pub grid_width: u32,
    pub grid_color: Option<Color>,
    pub zeroline: bool,
    pub zeroline_width: u32,
    pub zeroline_color: Option<Color>,
    /// Categories run top-to-bottom (y) or right-to-left (x).
    pub reversed: bool,
    pub tick_angle: Option<i32>,
    /// Decimal places for tick labels.
    pub tick_decimals: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub title: Option<Title>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margins: Option<Margins>,
    pub paper_bgcolor: Option<Color>,
    pub plot_bgcolor: Option<Color>,
    pub font: Option<Font>,
    pub show_legend: Option<bool>,
    pub legend: Option<LegendPosition>,
    /// One x axis per cell, row-major.
    pub x_axes: Vec<Axis>,
    /// One y axis per cell, row-major.
    pub y_axes: Vec<Axis>,
    pub subplot_title_size: Option<u32>,
}

/// Fallback canvas size when the layout sets none.
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub grid: GridLayout,
    pub subplot_titles: Vec<String>,
    /// Fraction of the height left between subplot rows.
    pub vertical_spacing: f64,
    pub traces: Vec<PlacedTrace>,
    pub reference_lines: Vec<ReferenceLine>,
    pub layout: Layout,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Single-cell figure.
    pub fn new() -> Self {
        Self::with_grid(GridLayout { rows: 1, columns: 1 }, Vec::new())
    }

    /// Multi-cell subplot grid with optional per-cell titles (row-major).
    pub fn subplots(rows: usize, columns: usize, titles: Vec<String>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(VizError::invalid(format!(
                "subplot grid must be at least 1x1, got {rows}x{columns}"
            )));
        }
        if titles.len() > rows * columns {
            return Err(VizError::invalid(format!(
                "{} subplot titles for {} cells",
                titles.len(),
                rows * columns
            )));
        }
        Ok(Self::with_grid(GridLayout { rows, columns }, titles))
    }

    fn with_grid(grid: GridLayout, subplot_titles: Vec<String>) -> Self {
        let cells = grid.cells();
        Self {
            grid,
            subplot_titles,
            vertical_spacing: 0.0,
            traces: Vec::new(),
            reference_lines: Vec::new(),
            layout: Layout {
                x_axes: vec![Axis::default(); cells],
                y_axes: vec![Axis::default(); cells],
                ..Layout::default()
            },
        }
    }

    fn check_cell(&self, cell: Cell) -> Result<()> {
        if cell.row == 0
            || cell.col == 0
            || cell.row > self.grid.rows
            || cell.col > self.grid.columns
        {
            return Err(VizError::invalid(format!(
                "cell ({}, {}) outside {}x{} grid",
                cell.row, cell.col, self.grid.rows, self.grid.columns
            )));
        }
        Ok(())
    }

    /// Row-major index of a cell.
    pub fn cell_index(&self, cell: Cell) -> usize {
        (cell.row - 1) * self.grid.columns + (cell.col - 1)
    }

    pub fn add_trace(&mut self, trace: Trace, cell: impl Into<Cell>) -> Result<()> {
        let cell = cell.into();
        self.check_cell(cell)?;
        self.traces.push(PlacedTrace { cell, trace });
        Ok(())
    }

    pub fn add_vline(
        &mut self,
        x: f64,
        cell: impl Into<Cell>,
        color: Color,
        dash: LineDash,
    ) -> Result<()> {
        self.add_line(Orientation::Vertical, x, cell.into(), color, dash)
    }

    pub fn add_hline(
        &mut self,
        y: f64,
        cell: impl Into<Cell>,
        color: Color,
        dash: LineDash,
    ) -> Result<()> {
        self.add_line(Orientation::Horizontal, y, cell.into(), color, dash)
    }

    fn add_line(
        &mut self,
        orientation: Orientation,
        position: f64,
        cell: Cell,
        color: Color,
        dash: LineDash,
    ) -> Result<()> {
        self.check_cell(cell)?;
        self.reference_lines.push(ReferenceLine {
            cell,
            orientation,
            position,
            color,
            dash,
        });
        Ok(())
    }

    /// Traces placed in `cell`, in insertion order.
    pub fn traces_in(&self, cell: Cell) -> impl Iterator<Item = &Trace> {
        self.traces
            .iter()
            .filter(move |t| t.cell == cell)
            .map(|t| &t.trace)
    }

    pub fn lines_in(&self, cell: Cell) -> impl Iterator<Item = &ReferenceLine> {
        self.reference_lines.iter().filter(move |l| l.cell == cell)
    }

    /// Every x and y axis, for blanket updates.
    pub fn axes_mut(&mut self) -> impl Iterator<Item = &mut Axis> {
        self.layout
            .x_axes
            .iter_mut()
            .chain(self.layout.y_axes.iter_mut())
    }

    /// Canvas size in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (
            self.layout.width.unwrap_or(DEFAULT_WIDTH),
            self.layout.height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn title_text(&self) -> Option<&str> {
        self.layout.title.as_ref().map(|t| t.title.text.as_str())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Render to `path`: `.svg` as SVG, anything else as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::render::save(self, path)
    }
}
