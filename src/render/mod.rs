//! Draw a [`Figure`] to **SVG** or **PNG** with Plotters.
//!
//! - Subplot grid split evenly inside the figure margins
//! - Histograms with box plots stacked above them, guide lines per cell
//! - Horizontal bar charts with category labels and value annotations
//! - Masked heatmaps with cell annotations and a colour-scale strip
//!
//! The output path's extension picks the backend: `.svg` writes SVG, anything
//! else writes a bitmap.

pub mod text;

use crate::bins;
use crate::color::Color;
use crate::error::{Result, VizError};
use crate::figure::{
    Axis, BarTrace, BoxTrace, Cell, Figure, HeatmapTrace, HistogramTrace, LineDash, Orientation,
    ReferenceLine, Trace,
};
use crate::stats;
use crate::style::{XAnchor, YAnchor, default_style};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::fmt::Debug;
use std::path::Path;
use std::sync::Once;

use text::{estimate_text_width_px, label_area_width_px, truncate_to_width};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Inner margin of every subplot, in pixels.
const CELL_MARGIN: u32 = 8;
/// Gap between subplot columns.
const COLUMN_GAP: u32 = 12;
const COLORBAR_PX: u32 = 70;
const COLORBAR_STEPS: usize = 64;
/// Segments per dashed line.
const DASH_SEGMENTS: usize = 24;
const DOT_SEGMENTS: usize = 60;

static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
static INIT_FONTS: Once = Once::new();

/// Make the embedded face available under `families` and `sans-serif`.
///
/// `ab_glyph` doesn't discover OS fonts, so every family a figure names is
/// backed by the same embedded face. Re-registering a name is harmless.
fn register_fonts(families: &[&str]) {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font("sans-serif", FontStyle::Normal, FONT_BYTES);
    });
    for family in families {
        if let Err(_) = plotters::style::register_font(family, FontStyle::Normal, FONT_BYTES) {
            log::warn!("could not register font '{family}'");
        }
    }
}

fn render_err<E: Debug>(e: E) -> VizError {
    VizError::Render(format!("{e:?}"))
}

fn rgb(c: Color) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Render `fig` to `path`, choosing SVG or PNG by extension.
pub fn save<P: AsRef<Path>>(fig: &Figure, path: P) -> Result<()> {
    let path = path.as_ref();
    let size = fig.dimensions();
    let is_svg = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, fig)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, fig)?;
        root.present().map_err(render_err)?;
    }
    log::info!("wrote {}x{} figure to {}", size.0, size.1, path.display());
    Ok(())
}

/// Render `fig` to an SVG document held in memory.
pub fn to_svg_string(fig: &Figure) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, fig.dimensions()).into_drawing_area();
        draw_figure(&root, fig)?;
        root.present().map_err(render_err)?;
    }
    Ok(buf)
}

/// Fonts and colours shared by every cell of one figure.
struct Theme<'a> {
    family: &'a str,
    font_px: u32,
    subplot_title_px: u32,
    plot_bg: RGBColor,
}

impl<'a> Theme<'a> {
    fn text(&self, px: u32, h: HPos, v: VPos) -> TextStyle<'a> {
        TextStyle::from((self.family, px as f64))
            .color(&BLACK)
            .pos(Pos::new(h, v))
    }
}

/// Tick label text: fixed decimals when requested, otherwise the shortest form.
fn tick_label(v: f64, decimals: Option<usize>) -> String {
    match decimals {
        Some(d) => format!("{v:.d$}"),
        None if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        None => {
            let s = format!("{v:.3}");
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Widen `[lo, hi]` by 5% each side; a flat range becomes `[lo - 0.5, hi + 0.5]`.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi == lo {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, fig: &Figure) -> Result<()> {
    let layout = &fig.layout;
    let defaults = default_style();
    let paper = rgb(layout.paper_bgcolor.unwrap_or(defaults.background_color));
    root.fill(&paper).map_err(render_err)?;

    let font = layout.font.as_ref();
    let theme = Theme {
        family: font.map_or(defaults.font_family.as_str(), |f| f.family.as_str()),
        font_px: font.map_or(defaults.font_size, |f| f.size),
        subplot_title_px: layout.subplot_title_size.unwrap_or(defaults.title_size),
        plot_bg: rgb(layout.plot_bgcolor.unwrap_or(defaults.background_color)),
    };
    let margins = layout.margins.unwrap_or(defaults.margins);
    let (width, _) = root.dim_in_pixel();
    let mut families = vec![theme.family];
    if let Some(title) = &layout.title {
        families.push(title.font.family.as_str());
    }
    register_fonts(&families);

    if let Some(title) = &layout.title {
        let x = (title.x * width as f64).round() as i32;
        let y = (margins.top as i32 / 6).max(4);
        let style = TextStyle::from((title.font.family.as_str(), title.font.size as f64))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw_text(&title.title.text, &style, (x, y))
            .map_err(render_err)?;
        if let Some(subtitle) = &title.title.subtitle {
            let sub_color = BLACK.mix(0.6);
            let sub_style = TextStyle::from((title.font.family.as_str(), theme.font_px as f64))
                .color(&sub_color)
                .pos(Pos::new(HPos::Center, VPos::Top));
            let sub_y = y + title.font.size as i32 + 6;
            root.draw_text(subtitle, &sub_style, (x, sub_y))
                .map_err(render_err)?;
        }
    }

    let plot = root.margin(margins.top, margins.bottom, margins.left, margins.right);
    let (rows, cols) = (fig.grid.rows, fig.grid.columns);
    let (_, plot_h) = plot.dim_in_pixel();
    let v_pad = if rows > 1 {
        (fig.vertical_spacing * plot_h as f64 / (2 * rows) as f64).round() as u32
    } else {
        0
    };
    let h_pad = if cols > 1 { COLUMN_GAP / 2 } else { 0 };
    let default_axis = Axis::default();

    for (index, cell_area) in plot.split_evenly((rows, cols)).into_iter().enumerate() {
        let cell = Cell::new(index / cols + 1, index % cols + 1);
        let area = cell_area.margin(v_pad, v_pad, h_pad, h_pad);
        let axes = CellAxes {
            x: layout.x_axes.get(index).unwrap_or(&default_axis),
            y: layout.y_axes.get(index).unwrap_or(&default_axis),
        };
        let caption = fig
            .subplot_titles
            .get(index)
            .map(String::as_str)
            .filter(|t| !t.is_empty());
        let lines: Vec<&ReferenceLine> = fig.lines_in(cell).collect();

        let mut heatmap = None;
        let mut bars = None;
        let mut hists = Vec::new();
        let mut boxes = Vec::new();
        for trace in fig.traces_in(cell) {
            match trace {
                Trace::Heatmap(h) => heatmap = heatmap.or(Some(h)),
                Trace::Bar(b) => bars = bars.or(Some(b)),
                Trace::Histogram(h) => hists.push(h),
                Trace::Box(b) => boxes.push(b),
            }
        }

        if let Some(h) = heatmap {
            draw_heatmap(&area, &theme, caption, &axes, h)?;
        } else if let Some(b) = bars {
            draw_bars(&area, &theme, caption, &axes, b, &lines)?;
        } else if !hists.is_empty() || !boxes.is_empty() {
            draw_distribution(&area, &theme, caption, &axes, &hists, &boxes, &lines)?;
        } else {
            log::debug!("cell ({}, {}) is empty", cell.row, cell.col);
        }
    }

    if layout.show_legend.unwrap_or(true) {
        draw_legend(root, &plot, fig, &theme)?;
    }
    Ok(())
}

struct CellAxes<'a> {
    x: &'a Axis,
    y: &'a Axis,
}

/// Chart builder shared by the cartesian cell kinds.
fn build_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    theme: &Theme,
    caption: Option<&str>,
    left_px: u32,
    bottom_px: u32,
    x: (f64, f64),
    y: (f64, f64),
) -> Result<Chart<'a, DB>> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(CELL_MARGIN)
        .y_label_area_size(left_px)
        .x_label_area_size(bottom_px);
    if let Some(c) = caption {
        builder.caption(c, (theme.family, theme.subplot_title_px as f64));
    }
    let chart = builder
        .build_cartesian_2d(x.0..x.1, y.0..y.1)
        .map_err(render_err)?;
    chart
        .plotting_area()
        .fill(&theme.plot_bg)
        .map_err(render_err)?;
    Ok(chart)
}

/// Mesh with tick labels on x and y, grid lines following each axis' settings.
fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    theme: &Theme,
    axes: &CellAxes,
    y_labels: bool,
) -> Result<()> {
    let x_fmt = |v: &f64| tick_label(*v, axes.x.tick_decimals);
    let y_fmt = |v: &f64| tick_label(*v, axes.y.tick_decimals);
    let grid_color = rgb(axes.x.grid_color.unwrap_or(default_style().grid_color));

    let mut mesh = chart.configure_mesh();
    mesh.label_style((theme.family, theme.font_px as f64))
        .axis_desc_style((theme.family, theme.font_px as f64))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .bold_line_style(grid_color.stroke_width(axes.x.grid_width.max(1)))
        .light_line_style(theme.plot_bg);
    if !axes.x.show_grid {
        mesh.disable_x_mesh();
    }
    if !axes.y.show_grid || !y_labels {
        mesh.disable_y_mesh();
    }
    if !y_labels {
        mesh.y_labels(0);
    }
    if let Some(t) = &axes.x.title {
        mesh.x_desc(t.as_str());
    }
    if let Some(t) = &axes.y.title {
        mesh.y_desc(t.as_str());
    }
    mesh.draw().map_err(render_err)
}

/// Tick labels plus room for an axis title when there is one.
fn x_label_area_px(theme: &Theme, axis: &Axis) -> u32 {
    let desc = if axis.title.is_some() { theme.font_px + 8 } else { 0 };
    theme.font_px * 2 + desc
}

/// Solid, dashed or dotted segment list between two data points.
fn dashed(from: (f64, f64), to: (f64, f64), dash: LineDash) -> Vec<Vec<(f64, f64)>> {
    let segments = match dash {
        LineDash::Solid => return vec![vec![from, to]],
        LineDash::Dash => DASH_SEGMENTS,
        LineDash::Dot => DOT_SEGMENTS,
    };
    let at = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..segments)
        .map(|i| {
            let t0 = i as f64 / segments as f64;
            let t1 = t0 + 0.5 / segments as f64;
            vec![at(t0), at(t1)]
        })
        .collect()
}

fn draw_reference_lines<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    lines: &[&ReferenceLine],
    x: (f64, f64),
    y: (f64, f64),
) -> Result<()> {
    for line in lines {
        let (from, to) = match line.orientation {
            Orientation::Vertical => ((line.position, y.0), (line.position, y.1)),
            Orientation::Horizontal => ((x.0, line.position), (x.1, line.position)),
        };
        let style = rgb(line.color).stroke_width(2);
        chart
            .draw_series(
                dashed(from, to, line.dash)
                    .into_iter()
                    .map(|seg| PathElement::new(seg, style)),
            )
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_zeroline<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    axis: &Axis,
    x: (f64, f64),
    y: (f64, f64),
) -> Result<()> {
    if !axis.zeroline || x.0 > 0.0 || x.1 < 0.0 {
        return Ok(());
    }
    let color = rgb(axis.zeroline_color.unwrap_or(Color::BLACK));
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, y.0), (0.0, y.1)],
            color.stroke_width(axis.zeroline_width.max(1)),
        )))
        .map_err(render_err)?;
    Ok(())
}

/// Row position on a category axis; reversed axes put row 0 at the top.
fn category_pos(i: usize, n: usize, reversed: bool) -> f64 {
    if reversed { (n - 1 - i) as f64 } else { i as f64 }
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    theme: &Theme,
    caption: Option<&str>,
    axes: &CellAxes,
    bar: &BarTrace,
    lines: &[&ReferenceLine],
) -> Result<()> {
    let n = bar.values.len();
    if n == 0 {
        return Ok(());
    }
    let (w, _) = area.dim_in_pixel();
    let max_label_px = (w / 3).max(60);
    let labels: Vec<String> = bar
        .labels
        .iter()
        .map(|l| truncate_to_width(l, theme.font_px, max_label_px - 18))
        .collect();
    let mut left = label_area_width_px(&labels, theme.font_px, 40, max_label_px);
    if axes.y.title.is_some() {
        left += theme.font_px + 8;
    }
    let bottom = x_label_area_px(theme, axes.x);

    let lo = bar.values.iter().copied().fold(0.0, f64::min);
    let hi = bar.values.iter().copied().fold(0.0, f64::max);
    let (lo, hi) = lines
        .iter()
        .filter(|l| l.orientation == Orientation::Vertical)
        .fold((lo, hi), |(a, b), l| (a.min(l.position), b.max(l.position)));
    let (mut x0, mut x1) = padded(lo, hi);
    if bar.text.iter().any(|t| !t.is_empty()) {
        let room = (x1 - x0) * 0.08;
        if lo < 0.0 {
            x0 -= room;
        }
        x1 += room;
    }
    let x = (x0, x1);
    let y = (-0.5, n as f64 - 0.5);

    let mut chart = build_chart(area, theme, caption, left, bottom, x, y)?;
    draw_mesh(&mut chart, theme, axes, false)?;

    let reversed = axes.y.reversed;
    chart
        .draw_series(bar.values.iter().enumerate().map(|(i, v)| {
            let p = category_pos(i, n, reversed);
            let color = rgb(bar.colors.get(i).copied().unwrap_or(Color::GREY));
            Rectangle::new([(0.0, p - 0.4), (*v, p + 0.4)], color.filled())
        }))
        .map_err(render_err)?;

    let right = theme.text(theme.font_px, HPos::Left, VPos::Center);
    let left_style = theme.text(theme.font_px, HPos::Right, VPos::Center);
    chart
        .draw_series(
            bar.values
                .iter()
                .zip(&bar.text)
                .enumerate()
                .filter(|(_, (_, t))| !t.is_empty())
                .map(|(i, (v, t))| {
                    let p = category_pos(i, n, reversed);
                    if *v < 0.0 {
                        Text::new(format!("{t} "), (*v, p), left_style.clone())
                    } else {
                        Text::new(format!(" {t}"), (*v, p), right.clone())
                    }
                }),
        )
        .map_err(render_err)?;

    draw_zeroline(&mut chart, axes.x, x, y)?;
    draw_reference_lines(&mut chart, lines, x, y)?;

    let base = area.get_base_pixel();
    for (i, label) in labels.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(x0, category_pos(i, n, reversed)));
        area.draw_text(label, &left_style, (px - base.0 - 6, py - base.1))
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_distribution<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    theme: &Theme,
    caption: Option<&str>,
    axes: &CellAxes,
    hists: &[&HistogramTrace],
    boxes: &[&BoxTrace],
    lines: &[&ReferenceLine],
) -> Result<()> {
    let mut counted = Vec::with_capacity(hists.len());
    for h in hists.iter().filter(|h| !h.values.is_empty()) {
        let n_bins = h.bins.unwrap_or_else(|| bins::sturges(h.values.len()));
        counted.push((*h, bins::histogram(&h.values, n_bins)?));
    }
    let summaries: Vec<(&BoxTrace, stats::Quartiles)> = boxes
        .iter()
        .filter_map(|b| stats::quartiles(&b.values).map(|q| (*b, q)))
        .collect();

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (_, hg) in &counted {
        lo = lo.min(hg.edges[0]);
        hi = hi.max(hg.edges[hg.edges.len() - 1]);
    }
    for (b, _) in &summaries {
        lo = b.values.iter().copied().fold(lo, f64::min);
        hi = b.values.iter().copied().fold(hi, f64::max);
    }
    for l in lines.iter().filter(|l| l.orientation == Orientation::Vertical) {
        lo = lo.min(l.position);
        hi = hi.max(l.position);
    }
    let x = padded(lo, hi);

    let max_count = counted
        .iter()
        .map(|(_, hg)| hg.max_count())
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    // Box plots share a band above the tallest bar.
    let band_lo = max_count * 1.1;
    let band_h = max_count * 0.45;
    let y_top = if summaries.is_empty() {
        max_count * 1.05
    } else {
        band_lo + band_h + max_count * 0.05
    };
    let y = (0.0, y_top);

    let mut left = estimate_text_width_px(&tick_label(max_count, None), theme.font_px) + 18;
    if axes.y.title.is_some() {
        left += theme.font_px + 8;
    }
    let bottom = x_label_area_px(theme, axes.x);
    let mut chart = build_chart(area, theme, caption, left, bottom, x, y)?;
    draw_mesh(&mut chart, theme, axes, true)?;

    for (trace, hg) in &counted {
        let fill = rgb(trace.color).mix(trace.opacity.clamp(0.0, 1.0)).filled();
        chart
            .draw_series(hg.counts.iter().enumerate().map(|(i, c)| {
                Rectangle::new([(hg.edges[i], 0.0), (hg.edges[i + 1], *c as f64)], fill)
            }))
            .map_err(render_err)?;
    }

    let slot = band_h / summaries.len().max(1) as f64;
    for (k, (trace, q)) in summaries.iter().enumerate() {
        let centre = band_lo + slot * (k as f64 + 0.5);
        let half = slot * 0.3;
        let color = rgb(trace.color);
        let stroke = color.stroke_width(1);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(q.q1, centre - half), (q.q3, centre + half)],
                color.mix(0.5).filled(),
            )))
            .map_err(render_err)?;
        let (top, bot) = (centre + half, centre - half);
        let cap = half / 2.0;
        let segments = vec![
            vec![(q.q1, bot), (q.q3, bot), (q.q3, top), (q.q1, top), (q.q1, bot)],
            vec![(q.median, bot), (q.median, top)],
            vec![(q.lower_whisker, centre), (q.q1, centre)],
            vec![(q.q3, centre), (q.upper_whisker, centre)],
            vec![(q.lower_whisker, centre - cap), (q.lower_whisker, centre + cap)],
            vec![(q.upper_whisker, centre - cap), (q.upper_whisker, centre + cap)],
        ];
        chart
            .draw_series(segments.into_iter().map(|s| PathElement::new(s, stroke)))
            .map_err(render_err)?;
        if trace.show_outliers {
            chart
                .draw_series(
                    q.outliers
                        .iter()
                        .map(|v| Circle::new((*v, centre), 3, color.filled())),
                )
                .map_err(render_err)?;
        }
    }

    draw_reference_lines(&mut chart, lines, x, y)?;
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    theme: &Theme,
    caption: Option<&str>,
    axes: &CellAxes,
    hm: &HeatmapTrace,
) -> Result<()> {
    let (nx, ny) = (hm.x.len(), hm.y.len());
    if nx == 0 || ny == 0 {
        return Ok(());
    }
    let (w, h) = area.dim_in_pixel();
    let bar_px = if hm.show_scale && w > COLORBAR_PX * 3 { COLORBAR_PX } else { 0 };
    let (plot_area, scale_area) = area.split_horizontally(w - bar_px);

    let label_cap = (w / 3).max(60);
    let y_labels: Vec<String> = hm
        .y
        .iter()
        .map(|l| truncate_to_width(l, theme.font_px, label_cap - 18))
        .collect();
    let rotated = axes.x.tick_angle.is_some_and(|a| a.abs() >= 45);
    let x_labels: Vec<String> = hm
        .x
        .iter()
        .map(|l| truncate_to_width(l, theme.font_px, if rotated { h / 3 } else { label_cap }))
        .collect();
    let left = label_area_width_px(&y_labels, theme.font_px, 40, label_cap);
    let bottom = if rotated {
        label_area_width_px(&x_labels, theme.font_px, 30, (h / 3).max(30))
    } else {
        theme.font_px * 2
    };

    let x = (0.0, nx as f64);
    let y = (0.0, ny as f64);
    let mut chart = build_chart(&plot_area, theme, caption, left, bottom, x, y)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(render_err)?;

    let span = hm.zmax - hm.zmin;
    let scale_t = |v: f64| if span > 0.0 { (v - hm.zmin) / span } else { 0.5 };
    let margin = hm.gap.div_ceil(2);
    let mut cells = Vec::new();
    let mut notes = Vec::new();
    let dark = theme.text(theme.font_px, HPos::Center, VPos::Center);
    let light = dark.color(&WHITE);
    for (i, row) in hm.z.iter().enumerate().take(ny) {
        let yi = category_pos(i, ny, axes.y.reversed);
        for (j, value) in row.iter().enumerate().take(nx) {
            let Some(v) = *value else { continue };
            let t = scale_t(v);
            let mut rect = Rectangle::new(
                [(j as f64, yi), (j as f64 + 1.0, yi + 1.0)],
                rgb(hm.color_scale.sample(t)).filled(),
            );
            rect.set_margin(margin, margin, margin, margin);
            cells.push(rect);

            let note = hm.text.get(i).and_then(|r| r.get(j)).filter(|s| !s.is_empty());
            if let Some(note) = note {
                let style = if (t - 0.5).abs() > 0.35 { light.clone() } else { dark.clone() };
                notes.push(Text::new(note.clone(), (j as f64 + 0.5, yi + 0.5), style));
            }
        }
    }
    chart.draw_series(cells).map_err(render_err)?;
    chart.draw_series(notes).map_err(render_err)?;

    let base = plot_area.get_base_pixel();
    let y_style = theme.text(theme.font_px, HPos::Right, VPos::Center);
    for (i, label) in y_labels.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, category_pos(i, ny, axes.y.reversed) + 0.5));
        plot_area
            .draw_text(label, &y_style, (px - base.0 - 6, py - base.1))
            .map_err(render_err)?;
    }
    let x_style = if rotated {
        theme
            .text(theme.font_px, HPos::Left, VPos::Center)
            .transform(FontTransform::Rotate90)
    } else {
        theme.text(theme.font_px, HPos::Center, VPos::Top)
    };
    for (j, label) in x_labels.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(j as f64 + 0.5, 0.0));
        plot_area
            .draw_text(label, &x_style, (px - base.0, py - base.1 + 6))
            .map_err(render_err)?;
    }

    if bar_px > 0 {
        draw_color_strip(&scale_area, theme, hm)?;
    }
    Ok(())
}

/// Vertical colour-scale strip with min, mid and max ticks.
fn draw_color_strip<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    theme: &Theme,
    hm: &HeatmapTrace,
) -> Result<()> {
    let (_, h) = area.dim_in_pixel();
    let (top, bottom) = (CELL_MARGIN as i32 + 12, h as i32 - CELL_MARGIN as i32 - 12);
    if bottom <= top {
        return Ok(());
    }
    let (x0, x1) = (10, 28);
    let step = (bottom - top) as f64 / COLORBAR_STEPS as f64;
    for k in 0..COLORBAR_STEPS {
        let t = 1.0 - k as f64 / (COLORBAR_STEPS - 1) as f64;
        let y0 = top + (k as f64 * step).floor() as i32;
        let y1 = top + ((k + 1) as f64 * step).ceil() as i32;
        area.draw(&Rectangle::new(
            [(x0, y0), (x1, y1)],
            rgb(hm.color_scale.sample(t)).filled(),
        ))
        .map_err(render_err)?;
    }
    let style = theme.text(theme.font_px, HPos::Left, VPos::Center);
    let mid = (hm.zmin + hm.zmax) / 2.0;
    for (value, y) in [(hm.zmax, top), (mid, (top + bottom) / 2), (hm.zmin, bottom)] {
        area.draw_text(&tick_label(value, Some(1)), &style, (x1 + 4, y))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Legend entries for named histogram and box traces, deduplicated by name.
fn legend_items(fig: &Figure) -> Vec<(&str, Color)> {
    let mut items: Vec<(&str, Color)> = Vec::new();
    for placed in &fig.traces {
        let item = match &placed.trace {
            Trace::Histogram(h) => (h.name.as_str(), h.color),
            Trace::Box(b) => (b.name.as_str(), b.color),
            Trace::Bar(_) | Trace::Heatmap(_) => continue,
        };
        if !item.0.is_empty() && !items.iter().any(|(n, _)| *n == item.0) {
            items.push(item);
        }
    }
    items
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &DrawingArea<DB, Shift>,
    fig: &Figure,
    theme: &Theme,
) -> Result<()> {
    let items = legend_items(fig);
    if items.is_empty() {
        return Ok(());
    }
    let pos = fig.layout.legend.unwrap_or(default_style().legend_position);
    let (base_x, base_y) = plot.get_base_pixel();
    let (pw, ph) = plot.dim_in_pixel();
    let line_h = theme.font_px as i32 + 6;
    let block_h = line_h * items.len() as i32;
    let block_w = items
        .iter()
        .map(|(n, _)| estimate_text_width_px(n, theme.font_px))
        .max()
        .unwrap_or(0) as i32
        + 20;

    let anchor_x = base_x + (pos.x * pw as f64).round() as i32;
    let anchor_y = base_y + ((1.0 - pos.y) * ph as f64).round() as i32;
    let left = match pos.x_anchor {
        XAnchor::Left => anchor_x,
        XAnchor::Center => anchor_x - block_w / 2,
        XAnchor::Right => anchor_x - block_w,
    };
    let top = match pos.y_anchor {
        YAnchor::Top => anchor_y,
        YAnchor::Middle => anchor_y - block_h / 2,
        YAnchor::Bottom => anchor_y - block_h,
    };

    let style = theme.text(theme.font_px, HPos::Left, VPos::Center);
    for (i, (name, color)) in items.iter().enumerate() {
        let cy = top + line_h * i as i32 + line_h / 2;
        root.draw(&Rectangle::new(
            [(left, cy - 5), (left + 10, cy + 5)],
            rgb(*color).filled(),
        ))
        .map_err(render_err)?;
        root.draw_text(name, &style, (left + 16, cy))
            .map_err(render_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels() {
        assert_eq!(tick_label(3.0, None), "3");
        assert_eq!(tick_label(0.25, None), "0.25");
        assert_eq!(tick_label(0.5, Some(2)), "0.50");
        assert_eq!(tick_label(-1.0, Some(2)), "-1.00");
    }

    #[test]
    fn padding_widens_flat_ranges() {
        assert_eq!(padded(2.0, 2.0), (1.5, 2.5));
        let (lo, hi) = padded(0.0, 10.0);
        assert!(lo < 0.0 && hi > 10.0);
        assert_eq!(padded(f64::INFINITY, f64::NEG_INFINITY), (0.0, 1.0));
        let (lo, hi) = padded(1e-17, 3e-17);
        assert!(lo > 0.0 && hi < 1e-16);
    }

    #[test]
    fn dashes_split_into_segments() {
        assert_eq!(dashed((0.0, 0.0), (0.0, 1.0), LineDash::Solid).len(), 1);
        assert_eq!(dashed((0.0, 0.0), (0.0, 1.0), LineDash::Dash).len(), DASH_SEGMENTS);
    }

    #[test]
    fn reversed_categories_start_at_top() {
        assert_eq!(category_pos(0, 3, true), 2.0);
        assert_eq!(category_pos(0, 3, false), 0.0);
    }
}
