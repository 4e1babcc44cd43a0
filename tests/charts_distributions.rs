use exploralytics::charts::{DistributionOptions, Visualizer};
use exploralytics::dataset::{Column, Dataset};
use exploralytics::figure::{Cell, Trace};
use exploralytics::VizError;

fn sample() -> Dataset {
    Dataset::new(vec![
        Column::numeric("a", (0..8).map(f64::from)),
        Column::numeric("b", [1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 100.0]),
        Column::text("t", ["p", "q", "r", "s", "t", "u", "v", "w"]),
        Column::numeric_opt("c", [Some(1.0), None, Some(2.0), None, None, None, None, None]),
        Column::numeric("d", (0..8).map(|i| f64::from(i * i))),
    ])
    .unwrap()
}

#[test]
fn histogram_and_box_share_each_cell() {
    let fig = Visualizer::default()
        .plot_distributions(&sample(), &DistributionOptions::default())
        .unwrap();
    // Four numeric columns on an automatic three-wide grid.
    assert_eq!((fig.grid.rows, fig.grid.columns), (2, 3));
    assert_eq!(fig.traces.len(), 8);
    assert_eq!(fig.layout.height, Some(600));
    assert!((fig.vertical_spacing - 0.1).abs() < 1e-12);
    assert_eq!(fig.layout.show_legend, Some(false));

    let in_first: Vec<&Trace> = fig.traces_in(Cell::new(1, 1)).collect();
    assert_eq!(in_first.len(), 2);
    match in_first[0] {
        Trace::Histogram(h) => {
            assert_eq!(h.name, "a (Histogram)");
            assert_eq!(h.bins, Some(4));
            assert!((h.opacity - 0.7).abs() < 1e-12);
        }
        other => panic!("expected histogram, got {other:?}"),
    }
    match in_first[1] {
        Trace::Box(b) => {
            assert_eq!(b.name, "a (Box)");
            assert!(b.show_outliers);
        }
        other => panic!("expected box, got {other:?}"),
    }
}

#[test]
fn bins_count_only_present_values() {
    let opts = DistributionOptions {
        columns: vec!["c".into()],
        ..DistributionOptions::default()
    };
    let fig = Visualizer::default().plot_distributions(&sample(), &opts).unwrap();
    match &fig.traces[0].trace {
        Trace::Histogram(h) => {
            assert_eq!(h.values, vec![1.0, 2.0]);
            assert_eq!(h.bins, Some(2));
        }
        other => panic!("expected histogram, got {other:?}"),
    }
}

#[test]
fn explicit_column_count() {
    let opts = DistributionOptions {
        num_cols: Some(1),
        ..DistributionOptions::default()
    };
    let fig = Visualizer::default().plot_distributions(&sample(), &opts).unwrap();
    assert_eq!((fig.grid.rows, fig.grid.columns), (4, 1));
    assert_eq!(fig.layout.height, Some(1200));
}

#[test]
fn all_missing_column_fails() {
    let data = Dataset::new(vec![Column::numeric_opt("e", [None, None])]).unwrap();
    let err = Visualizer::default()
        .plot_distributions(&data, &DistributionOptions::default())
        .unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}

#[test]
fn panel_renders_without_legend() {
    let fig = Visualizer::default()
        .plot_distributions(&sample(), &DistributionOptions::default())
        .unwrap();
    let svg = exploralytics::render::to_svg_string(&fig).unwrap();
    assert!(!svg.contains("(Histogram)"));
    assert!(!svg.contains("(Box)"));
}
