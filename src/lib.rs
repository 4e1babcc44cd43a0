//! exploralytics
//!
//! Preset statistical charts for quick exploratory analysis of tabular data.
//! A [`Visualizer`] turns a [`Dataset`] into a styled [`Figure`] in one call;
//! the figure can be inspected, serialised to JSON or rendered to SVG/PNG.
//!
//! ### Features
//! - Histogram grids with optional mean and median guide lines
//! - Lower-triangle correlation heatmaps and feature-vs-target correlation bars
//! - Horizontal bar charts of value counts or a value column, with highlights
//! - Distribution panels pairing a histogram with a box plot per column
//! - One shared style, adjustable through typed overrides or a JSON file
//!
//! ### Example
//! ```no_run
//! use exploralytics::charts::{CorrelationOptions, Visualizer};
//! use exploralytics::Dataset;
//!
//! let data = Dataset::from_csv_path("housing.csv")?;
//! let viz = Visualizer::default();
//! let fig = viz.plot_correlation_map(&data, &CorrelationOptions::default())?;
//! fig.save("correlation.svg")?;
//! # Ok::<(), exploralytics::VizError>(())
//! ```

pub mod bins;
pub mod charts;
pub mod color;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod layout;
pub mod render;
pub mod stats;
pub mod style;

pub use charts::Visualizer;
pub use color::{Color, Highlight};
pub use dataset::{Column, Dataset};
pub use error::{Result, VizError};
pub use figure::Figure;
pub use layout::GridLayout;
pub use style::{StyleConfig, StyleOverrides};
