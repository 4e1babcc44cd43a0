use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use exploralytics::charts::{
    CorrelationOptions, DEFAULT_COLOR, DEFAULT_HEIGHT, DEFAULT_WIDTH, DistributionOptions,
    HbarOptions, HistogramOptions, TargetCorrelationOptions, Visualizer,
};
use exploralytics::{Dataset, Figure, Highlight, StyleOverrides, stats};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "exploralytics",
    version,
    about = "Preset exploratory charts (histograms, correlations, bars, distributions) from CSV data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Histogram grid of the numeric columns.
    Histograms(HistogramArgs),
    /// Lower-triangle correlation heatmap.
    Correlation(CorrelationArgs),
    /// Correlation of every numeric feature with one target column.
    Target(TargetArgs),
    /// Horizontal bars of category counts or of a value column.
    Hbar(HbarArgs),
    /// Histogram plus box plot per numeric column.
    Distributions(DistributionArgs),
    /// Print summary statistics of the numeric columns.
    Describe(DescribeArgs),
}

/// Flags shared by every chart command.
#[derive(Args, Debug)]
struct ChartArgs {
    /// Input CSV file with a header row.
    input: PathBuf,
    /// Output path: .json writes the figure model, .svg or .png renders it.
    #[arg(short, long)]
    out: PathBuf,
    /// Bar/histogram colour (hex code or CSS name).
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    /// JSON file with style overrides (e.g. {"font_size": 14}).
    #[arg(long)]
    style: Option<PathBuf>,
    /// Chart title; each command has its own default.
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    subtitle: Option<String>,
}

#[derive(Args, Debug)]
struct HistogramArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Columns separated by comma or semicolon (default: all numeric).
    #[arg(long)]
    columns: Option<String>,
    /// Subplots per row.
    #[arg(long, default_value_t = 1)]
    num_cols: usize,
    /// Draw a solid line at each column's mean.
    #[arg(long, default_value_t = false)]
    mean: bool,
    /// Draw a dotted line at each column's median.
    #[arg(long, default_value_t = false)]
    median: bool,
}

#[derive(Args, Debug)]
struct CorrelationArgs {
    #[command(flatten)]
    chart: ChartArgs,
    #[arg(long)]
    columns: Option<String>,
}

#[derive(Args, Debug)]
struct TargetArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Numeric column to correlate the others against.
    #[arg(long)]
    target: String,
}

#[derive(Args, Debug)]
struct HbarArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Column labelling the bars.
    #[arg(long)]
    category: String,
    /// Numeric column giving bar lengths (default: value counts of --category).
    #[arg(long)]
    value: Option<String>,
    #[arg(long)]
    top_n: Option<usize>,
    #[arg(long, default_value_t = false)]
    mean_line: bool,
    /// Recolour the first N bars, as N:COLOR (e.g. 3:#FF0000).
    #[arg(long)]
    highlight_top: Option<String>,
    /// Recolour the last N bars, as N:COLOR.
    #[arg(long)]
    highlight_low: Option<String>,
}

#[derive(Args, Debug)]
struct DistributionArgs {
    #[command(flatten)]
    chart: ChartArgs,
    #[arg(long)]
    columns: Option<String>,
    /// Subplots per row (default: chosen from the column count).
    #[arg(long)]
    num_cols: Option<usize>,
}

#[derive(Args, Debug)]
struct DescribeArgs {
    /// Input CSV file with a header row.
    input: PathBuf,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_highlight(s: &str) -> Result<Highlight> {
    let (count, color) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid highlight '{s}', expected N:COLOR"))?;
    let count: i64 = count
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid highlight count '{count}'"))?;
    Ok(Highlight::try_from((count, color.trim()))?)
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Up to 4 decimals, trailing zeros and dot trimmed.
            let s = format!("{x:.4}");
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Histograms(args) => cmd_histograms(args),
        Command::Correlation(args) => cmd_correlation(args),
        Command::Target(args) => cmd_target(args),
        Command::Hbar(args) => cmd_hbar(args),
        Command::Distributions(args) => cmd_distributions(args),
        Command::Describe(args) => cmd_describe(args),
    }
}

/// Load the CSV and build a visualizer from the shared flags.
fn prepare(args: &ChartArgs) -> Result<(Dataset, Visualizer)> {
    let data = Dataset::from_csv_path(&args.input)?;
    log::info!(
        "loaded {} rows x {} columns from {}",
        data.n_rows(),
        data.columns().len(),
        args.input.display()
    );
    let mut viz = Visualizer::new(&args.color, args.height, args.width, None)?;
    if let Some(path) = &args.style {
        viz.update_style(&StyleOverrides::from_json_file(path)?)?;
    }
    Ok((data, viz))
}

/// Apply `--title`/`--subtitle` over a command's defaults.
fn titles(args: &ChartArgs, title: &mut String, subtitle: &mut String) {
    if let Some(t) = &args.title {
        *title = t.clone();
    }
    if let Some(s) = &args.subtitle {
        *subtitle = s.clone();
    }
}

fn write_figure(fig: &Figure, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => std::fs::write(path, fig.to_json()?)?,
        "svg" | "png" => fig.save(path)?,
        other => bail!("unsupported output format: '{other}' (use .json, .svg or .png)"),
    }
    eprintln!("Wrote chart to {}", path.display());
    Ok(())
}

fn cmd_histograms(args: HistogramArgs) -> Result<()> {
    let (data, viz) = prepare(&args.chart)?;
    let mut opts = HistogramOptions {
        columns: args.columns.as_deref().map(parse_list).unwrap_or_default(),
        num_cols: args.num_cols,
        show_mean: args.mean,
        show_median: args.median,
        ..HistogramOptions::default()
    };
    titles(&args.chart, &mut opts.title, &mut opts.subtitle);
    let fig = viz.plot_histograms(&data, &opts)?;
    write_figure(&fig, &args.chart.out)
}

fn cmd_correlation(args: CorrelationArgs) -> Result<()> {
    let (data, viz) = prepare(&args.chart)?;
    let mut opts = CorrelationOptions {
        columns: args.columns.as_deref().map(parse_list).unwrap_or_default(),
        ..CorrelationOptions::default()
    };
    titles(&args.chart, &mut opts.title, &mut opts.subtitle);
    let fig = viz.plot_correlation_map(&data, &opts)?;
    write_figure(&fig, &args.chart.out)
}

fn cmd_target(args: TargetArgs) -> Result<()> {
    let (data, viz) = prepare(&args.chart)?;
    let mut opts = TargetCorrelationOptions::default();
    titles(&args.chart, &mut opts.title, &mut opts.subtitle);
    let fig = viz.plot_correlation_with_target(&data, &args.target, &opts)?;
    write_figure(&fig, &args.chart.out)
}

fn cmd_hbar(args: HbarArgs) -> Result<()> {
    let (data, viz) = prepare(&args.chart)?;
    let mut opts = HbarOptions::new(&args.category).mean_line(args.mean_line);
    if let Some(v) = &args.value {
        opts = opts.value_column(v);
    }
    if let Some(n) = args.top_n {
        opts = opts.top_n(n);
    }
    if let Some(h) = &args.highlight_top {
        opts = opts.highlight_top(parse_highlight(h)?);
    }
    if let Some(h) = &args.highlight_low {
        opts = opts.highlight_low(parse_highlight(h)?);
    }
    titles(&args.chart, &mut opts.title, &mut opts.subtitle);
    let fig = viz.plot_hbar(&data, &opts)?;
    write_figure(&fig, &args.chart.out)
}

fn cmd_distributions(args: DistributionArgs) -> Result<()> {
    let (data, viz) = prepare(&args.chart)?;
    let mut opts = DistributionOptions {
        columns: args.columns.as_deref().map(parse_list).unwrap_or_default(),
        num_cols: args.num_cols,
        ..DistributionOptions::default()
    };
    titles(&args.chart, &mut opts.title, &mut opts.subtitle);
    let fig = viz.plot_distributions(&data, &opts)?;
    write_figure(&fig, &args.chart.out)
}

fn cmd_describe(args: DescribeArgs) -> Result<()> {
    let data = Dataset::from_csv_path(&args.input)?;
    let summaries = stats::describe(&data);
    if summaries.is_empty() {
        bail!("no numeric columns in {}", args.input.display());
    }
    for s in summaries {
        println!(
            "{}  count={} missing={}  mean={} std={}  min={} q1={} median={} q3={} max={}",
            s.column,
            s.count,
            s.missing,
            fmt_opt(s.mean),
            fmt_opt(s.std),
            fmt_opt(s.min),
            fmt_opt(s.q1),
            fmt_opt(s.median),
            fmt_opt(s.q3),
            fmt_opt(s.max)
        );
    }
    Ok(())
}
