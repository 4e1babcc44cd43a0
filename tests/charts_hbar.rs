use exploralytics::charts::{HbarOptions, Visualizer};
use exploralytics::color::{Color, Highlight};
use exploralytics::dataset::{Column, Dataset};
use exploralytics::figure::{BarTrace, Figure, LineDash, Trace};
use exploralytics::VizError;

fn bars(fig: &Figure) -> &BarTrace {
    match &fig.traces[0].trace {
        Trace::Bar(b) => b,
        other => panic!("expected bars, got {other:?}"),
    }
}

fn shops() -> Dataset {
    Dataset::new(vec![
        Column::text("city", ["Oslo", "Bergen", "Oslo", "Tromso", "Oslo", "Bergen"]),
        Column::numeric_opt(
            "revenue",
            [Some(1200.0), Some(5300.5), None, Some(800.0), Some(15000.0), Some(2500.0)],
        ),
    ])
    .unwrap()
}

#[test]
fn value_counts_sorted_descending() {
    let fig = Visualizer::default()
        .plot_hbar(&shops(), &HbarOptions::new("city"))
        .unwrap();
    let b = bars(&fig);
    assert_eq!(b.labels, vec!["Oslo", "Bergen", "Tromso"]);
    assert_eq!(b.values, vec![3.0, 2.0, 1.0]);
    assert_eq!(b.hover[0], "city: Oslo\nCount: 3");
    assert!(b.colors.iter().all(|c| *c == Visualizer::default().color()));
    assert!(fig.layout.y_axes[0].reversed);
    assert_eq!(fig.layout.x_axes[0].title.as_deref(), Some("Count"));
}

#[test]
fn value_column_drops_missing_and_sorts() {
    let opts = HbarOptions::new("city").value_column("revenue");
    let fig = Visualizer::default().plot_hbar(&shops(), &opts).unwrap();
    let b = bars(&fig);
    assert_eq!(b.values, vec![15000.0, 5300.5, 2500.0, 1200.0, 800.0]);
    assert_eq!(b.labels, vec!["Oslo", "Bergen", "Bergen", "Oslo", "Tromso"]);
    assert_eq!(b.hover[0], "city: Oslo\nrevenue: 15,000.00");
}

#[test]
fn top_n_and_highlights() {
    let red = Color::parse("#FF0000").unwrap();
    let blue = Color::parse("#0000FF").unwrap();
    let opts = HbarOptions::new("city")
        .value_column("revenue")
        .top_n(4)
        .highlight_top(Highlight::new(1, red))
        .highlight_low(Highlight::new(2, blue));
    let viz = Visualizer::default();
    let fig = viz.plot_hbar(&shops(), &opts).unwrap();
    let b = bars(&fig);
    assert_eq!(b.values.len(), 4);
    assert_eq!(b.colors, vec![red, viz.color(), blue, blue]);
}

#[test]
fn mean_line_is_grey_and_dashed() {
    let opts = HbarOptions::new("city").mean_line(true);
    let fig = Visualizer::default().plot_hbar(&shops(), &opts).unwrap();
    assert_eq!(fig.reference_lines.len(), 1);
    let line = &fig.reference_lines[0];
    assert_eq!(line.position, 2.0);
    assert_eq!(line.color, Color::GREY);
    assert_eq!(line.dash, LineDash::Dash);
}

#[test]
fn zero_top_n_is_invalid() {
    let opts = HbarOptions::new("city").top_n(0);
    let err = Visualizer::default().plot_hbar(&shops(), &opts).unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}

#[test]
fn unknown_or_text_value_column_is_invalid() {
    let viz = Visualizer::default();
    let err = viz
        .plot_hbar(&shops(), &HbarOptions::new("nope"))
        .unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
    let err = viz
        .plot_hbar(&shops(), &HbarOptions::new("revenue").value_column("city"))
        .unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}
