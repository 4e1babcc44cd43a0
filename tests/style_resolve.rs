use exploralytics::color::{Color, ColorScale};
use exploralytics::figure::Figure;
use exploralytics::style::{self, Margins, StyleConfig, StyleOverrides, default_style, resolve};
use exploralytics::VizError;

#[test]
fn empty_overrides_keep_the_base() {
    let resolved = resolve(default_style(), &StyleOverrides::default()).unwrap();
    assert_eq!(&resolved, default_style());
}

#[test]
fn font_size_override_changes_only_that_field() {
    let resolved = resolve(default_style(), &StyleOverrides::default().font_size(14)).unwrap();
    assert_eq!(resolved.font_size, 14);
    let expected = StyleConfig {
        font_size: 14,
        ..default_style().clone()
    };
    assert_eq!(resolved, expected);
}

#[test]
fn margins_are_replaced_wholesale() {
    let m = Margins {
        left: 10,
        right: 20,
        top: 30,
        bottom: 40,
    };
    let resolved = resolve(default_style(), &StyleOverrides::default().margins(m)).unwrap();
    assert_eq!(resolved.margins, m);
}

#[test]
fn resolving_never_touches_the_default() {
    let before = default_style().clone();
    let _ = resolve(
        default_style(),
        &StyleOverrides::default()
            .color_scale(ColorScale::Earth)
            .background_color(Color::BLACK),
    )
    .unwrap();
    assert_eq!(default_style(), &before);
    assert_eq!(default_style().font_family, "Arial, sans-serif");
    assert_eq!(default_style().width, 800);
    assert_eq!(default_style().height, 600);
}

#[test]
fn overrides_from_json() {
    let o = StyleOverrides::from_json(r##"{"font_size": 14, "background_color": "#FAFAFA"}"##).unwrap();
    assert_eq!(o.font_size, Some(14));
    assert_eq!(o.background_color, Some(Color::rgb(0xFA, 0xFA, 0xFA)));
    assert_eq!(o.title_size, None);
}

#[test]
fn unknown_override_keys_rejected() {
    let err = StyleOverrides::from_json(r#"{"font_sise": 14}"#).unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}

#[test]
fn apply_is_idempotent() {
    let mut once = Figure::subplots(1, 2, vec![]).unwrap();
    style::apply(&mut once, "Title", default_style(), Some(500), None);
    let mut twice = once.clone();
    style::apply(&mut twice, "Title", default_style(), Some(500), None);
    assert_eq!(once, twice);
}

#[test]
fn apply_sets_layout_from_style() {
    let mut fig = Figure::new();
    style::apply(&mut fig, "Hello", default_style(), None, Some(1000));
    let layout = &fig.layout;
    assert_eq!(fig.title_text(), Some("Hello"));
    assert_eq!(layout.width, Some(1000));
    assert_eq!(layout.height, Some(600));
    assert_eq!(layout.margins, Some(default_style().margins));
    assert_eq!(layout.paper_bgcolor, Some(Color::WHITE));
    let x = &layout.x_axes[0];
    assert!(x.show_grid);
    assert!(x.zeroline);
    assert_eq!(x.zeroline_width, 1);
    assert_eq!(x.zeroline_color, Some(Color::BLACK));
    assert_eq!(x.grid_color, Some(Color::rgb(0xE5, 0xE5, 0xE5)));
}
