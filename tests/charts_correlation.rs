use exploralytics::charts::{CorrelationOptions, TargetCorrelationOptions, Visualizer};
use exploralytics::color::Color;
use exploralytics::dataset::{Column, Dataset};
use exploralytics::figure::{BarTrace, Figure, HeatmapTrace, Trace};
use exploralytics::VizError;

fn heatmap(fig: &Figure) -> &HeatmapTrace {
    match &fig.traces[0].trace {
        Trace::Heatmap(h) => h,
        other => panic!("expected heatmap, got {other:?}"),
    }
}

fn bars(fig: &Figure) -> &BarTrace {
    match &fig.traces[0].trace {
        Trace::Bar(b) => b,
        other => panic!("expected bars, got {other:?}"),
    }
}

#[test]
fn perfectly_correlated_pair_is_lower_triangle() {
    let data = Dataset::new(vec![
        Column::numeric("A", [1.0, 2.0, 3.0]),
        Column::numeric("B", [2.0, 4.0, 6.0]),
    ])
    .unwrap();
    let fig = Visualizer::default()
        .plot_correlation_map(&data, &CorrelationOptions::default())
        .unwrap();
    let h = heatmap(&fig);

    assert_eq!(h.x, vec!["A", "B"]);
    // Row A: diagonal and (A, B) hidden.
    assert_eq!(h.z[0], vec![None, None]);
    assert_eq!(h.text[0], vec!["", ""]);
    // Row B: (B, A) shown, diagonal hidden.
    assert_eq!(h.z[1], vec![Some(1.0), None]);
    assert_eq!(h.text[1][0], "1.00");
    assert_eq!(h.hover[1][0], "B vs A: 1.00");
    assert_eq!((h.zmin, h.zmax), (-1.0, 1.0));

    assert!(fig.layout.y_axes[0].reversed);
    assert_eq!(fig.layout.x_axes[0].tick_angle, Some(90));
    assert!(!fig.layout.x_axes[0].show_grid);
    assert!(!fig.layout.y_axes[0].zeroline);
}

#[test]
fn values_rounded_to_two_decimals() {
    let data = Dataset::new(vec![
        Column::numeric("x", [1.0, 2.0, 3.0, 4.0, 5.0]),
        Column::numeric("y", [2.0, 1.0, 4.0, 3.0, 5.0]),
        Column::text("t", ["a", "b", "c", "d", "e"]),
    ])
    .unwrap();
    let fig = Visualizer::default()
        .plot_correlation_map(&data, &CorrelationOptions::default())
        .unwrap();
    let h = heatmap(&fig);
    assert_eq!(h.x, vec!["x", "y"]);
    assert_eq!(h.z[1][0], Some(0.8));
    assert_eq!(h.text[1][0], "0.80");
}

#[test]
fn correlation_needs_numeric_columns() {
    let data = Dataset::new(vec![Column::text("t", ["a", "b"])]).unwrap();
    let err = Visualizer::default()
        .plot_correlation_map(&data, &CorrelationOptions::default())
        .unwrap_err();
    assert!(matches!(err, VizError::NoNumericColumns));
}

fn target_data() -> Dataset {
    Dataset::new(vec![
        Column::numeric("up", [1.0, 2.0, 3.0, 4.0]),
        Column::numeric("down", [4.0, 3.0, 2.0, 1.0]),
        Column::numeric("flat", [1.0, 1.0, 1.0, 1.0]),
        Column::text("name", ["a", "b", "c", "d"]),
        Column::numeric("target", [10.0, 20.0, 30.0, 40.0]),
    ])
    .unwrap()
}

#[test]
fn target_excluded_and_sorted_ascending() {
    let fig = Visualizer::default()
        .plot_correlation_with_target(&target_data(), "target", &TargetCorrelationOptions::default())
        .unwrap();
    let b = bars(&fig);
    assert!(!b.labels.iter().any(|l| l == "target"));
    // The constant column has no defined correlation and is dropped.
    assert_eq!(b.labels, vec!["down", "up"]);
    assert!((b.values[0] + 1.0).abs() < 1e-9);
    assert!((b.values[1] - 1.0).abs() < 1e-9);
    assert_eq!(b.colors, vec![Color::rgb(0xFF, 0x99, 0x99), Color::rgb(0x2E, 0x75, 0xB6)]);
    assert_eq!(b.text, vec!["-1.00", "1.00"]);
}

#[test]
fn target_chart_height_has_a_floor() {
    let fig = Visualizer::default()
        .plot_correlation_with_target(&target_data(), "target", &TargetCorrelationOptions::default())
        .unwrap();
    assert_eq!(fig.layout.height, Some(400));
    assert_eq!(
        fig.layout.x_axes[0].title.as_deref(),
        Some("Correlation Coefficient")
    );
    assert_eq!(fig.layout.y_axes[0].title.as_deref(), Some("Features"));
    assert_eq!(fig.layout.x_axes[0].zeroline_width, 2);
}

#[test]
fn target_height_grows_with_features() {
    let mut columns: Vec<Column> = (0..20)
        .map(|i| Column::numeric(&format!("f{i}"), [1.0, 2.0 + i as f64, 3.0, 5.0]))
        .collect();
    columns.push(Column::numeric("target", [1.0, 2.0, 3.0, 4.0]));
    let data = Dataset::new(columns).unwrap();
    let fig = Visualizer::default()
        .plot_correlation_with_target(&data, "target", &TargetCorrelationOptions::default())
        .unwrap();
    assert_eq!(fig.layout.height, Some(600));
}

#[test]
fn bad_target_is_invalid() {
    let viz = Visualizer::default();
    let opts = TargetCorrelationOptions::default();
    assert!(matches!(
        viz.plot_correlation_with_target(&target_data(), "missing", &opts),
        Err(VizError::InvalidArgument(_))
    ));
    assert!(matches!(
        viz.plot_correlation_with_target(&target_data(), "name", &opts),
        Err(VizError::InvalidArgument(_))
    ));
}

#[test]
fn infinite_cells_count_as_missing() {
    let csv = "a,b,t\n1,2,1\ninf,1,2\n3,4,3\n4,3,4\n6,5,5\n";
    let data = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
    let viz = Visualizer::default();

    let fig = viz
        .plot_correlation_map(&data, &CorrelationOptions::default())
        .unwrap();
    let h = heatmap(&fig);
    assert!(h.z.iter().flatten().flatten().all(|v| v.is_finite()));
    assert!(h.text.iter().flatten().all(|t| !t.contains("NaN")));
    assert!(h.hover.iter().flatten().all(|t| !t.contains("NaN")));

    let fig = viz
        .plot_correlation_with_target(&data, "t", &TargetCorrelationOptions::default())
        .unwrap();
    let b = bars(&fig);
    assert_eq!(b.labels.len(), 2);
    assert!(b.values.iter().all(|v| v.is_finite()));
}
