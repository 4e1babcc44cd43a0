use exploralytics::color::{Color, Highlight, Palette, assign_colors};
use exploralytics::VizError;

fn red() -> Color {
    Color::parse("#FF0000").unwrap()
}

fn blue() -> Color {
    Color::parse("#0000FF").unwrap()
}

fn base() -> Color {
    Color::parse("#94C973").unwrap()
}

#[test]
fn no_highlights_is_all_base() {
    let colors = assign_colors(base(), 4, None, None);
    assert_eq!(colors, vec![base(); 4]);
}

#[test]
fn top_and_low_ranges() {
    let top = Highlight::new(2, red());
    let low = Highlight::new(1, blue());
    let colors = assign_colors(base(), 5, Some(&top), Some(&low));
    assert_eq!(colors, vec![red(), red(), base(), base(), blue()]);
}

#[test]
fn low_wins_on_overlap() {
    let top = Highlight::new(8, red());
    let low = Highlight::new(5, blue());
    let colors = assign_colors(base(), 10, Some(&top), Some(&low));
    assert!(colors[..5].iter().all(|c| *c == red()));
    assert!(colors[5..].iter().all(|c| *c == blue()));
}

#[test]
fn counts_larger_than_length_are_clamped() {
    let top = Highlight::new(99, red());
    assert_eq!(assign_colors(base(), 3, Some(&top), None), vec![red(); 3]);
    assert!(assign_colors(base(), 0, Some(&top), None).is_empty());
}

#[test]
fn malformed_highlights_rejected() {
    assert!(matches!(
        Highlight::try_from((-1, "#FF0000")),
        Err(VizError::InvalidArgument(_))
    ));
    assert!(matches!(
        Highlight::try_from((2, "not-a-colour")),
        Err(VizError::InvalidArgument(_))
    ));
    assert_eq!(Highlight::try_from((2, "#FF0000")).unwrap(), Highlight::new(2, red()));
}

#[test]
fn palettes_cycle_to_requested_length() {
    let five = Palette::Categorical.colors(Some(5));
    assert_eq!(five.len(), 5);
    let twenty = Palette::Diverging.colors(Some(20));
    assert_eq!(twenty.len(), 20);
    assert_eq!(twenty[0], twenty[7]);
    assert!(!Palette::Sequential.colors(None).is_empty());
    assert!(matches!("rainbow".parse::<Palette>(), Err(VizError::InvalidArgument(_))));
}

#[test]
fn colours_serialise_as_hex() {
    let json = serde_json::to_string(&red()).unwrap();
    assert_eq!(json, "\"#FF0000\"");
    let back: Color = serde_json::from_str("\"#0000ff\"").unwrap();
    assert_eq!(back, blue());
}
