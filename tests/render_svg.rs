use exploralytics::charts::{
    CorrelationOptions, DistributionOptions, HbarOptions, HistogramOptions,
    TargetCorrelationOptions, Visualizer,
};
use exploralytics::dataset::{Column, Dataset};
use exploralytics::render;
use std::fs;

fn sample() -> Dataset {
    Dataset::new(vec![
        Column::text("kind", ["x", "y", "x", "z", "x", "y"]),
        Column::numeric("a", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        Column::numeric("b", [2.0, 1.0, 4.0, 3.0, 6.0, 40.0]),
        Column::numeric("c", [9.0, 7.0, 8.0, 3.0, 2.0, 1.0]),
    ])
    .unwrap()
}

#[test]
fn svg_contains_title() {
    let viz = Visualizer::default();
    let opts = HistogramOptions {
        title: "Histogram check".into(),
        show_mean: true,
        show_median: true,
        ..HistogramOptions::default()
    };
    let fig = viz.plot_histograms(&sample(), &opts).unwrap();
    let svg = render::to_svg_string(&fig).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Histogram check"));
}

#[test]
fn every_chart_renders() {
    let viz = Visualizer::default();
    let data = sample();
    let figures = vec![
        viz.plot_histograms(&data, &HistogramOptions::default()).unwrap(),
        viz.plot_correlation_map(&data, &CorrelationOptions::default()).unwrap(),
        viz.plot_correlation_with_target(&data, "c", &TargetCorrelationOptions::default())
            .unwrap(),
        viz.plot_hbar(&data, &HbarOptions::new("kind").mean_line(true)).unwrap(),
        viz.plot_distributions(&data, &DistributionOptions::default()).unwrap(),
    ];
    for fig in &figures {
        let svg = render::to_svg_string(fig).unwrap();
        assert!(svg.len() > 200, "svg has content");
    }
}

#[test]
fn heatmap_annotations_are_drawn() {
    let fig = Visualizer::default()
        .plot_correlation_map(&sample(), &CorrelationOptions::default())
        .unwrap();
    let svg = render::to_svg_string(&fig).unwrap();
    assert!(svg.contains("0.72"));
}

#[test]
fn save_picks_backend_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let fig = Visualizer::default()
        .plot_hbar(&sample(), &HbarOptions::new("kind"))
        .unwrap();

    let svg_path = dir.path().join("bars.svg");
    fig.save(&svg_path).unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg") || svg.contains("<svg"));

    let png_path = dir.path().join("bars.png");
    fig.save(&png_path).unwrap();
    let bytes = fs::read(&png_path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
