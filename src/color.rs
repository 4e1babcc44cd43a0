//! Colours, highlight ranges, palettes and continuous colour scales.

use crate::error::{Result, VizError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").expect("static regex"));

/// Opaque RGB colour. Parses `#RRGGBB`, `#RGB` and a few CSS names; prints as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a colour string; anything unrecognised is an `InvalidArgument`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(named) = named_color(s) {
            return Ok(named);
        }
        if !HEX_COLOR.is_match(s) {
            return Err(VizError::invalid(format!(
                "color must be a hex code like '#94C973' or a CSS name, got '{s}'"
            )));
        }
        let hex = &s[1..];
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|e| VizError::invalid(e.to_string()));
        if hex.len() == 3 {
            let expand = |i: usize| channel(hex[i..i + 1].repeat(2).as_str());
            Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
        } else {
            Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ))
        }
    }

    /// Linear blend towards `other` by `t` in `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

fn named_color(s: &str) -> Option<Color> {
    let c = match s.to_ascii_lowercase().as_str() {
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "grey" | "gray" => Color::GREY,
        "lightgrey" | "lightgray" => Color::rgb(211, 211, 211),
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "orange" => Color::rgb(255, 165, 0),
        _ => return None,
    };
    Some(c)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = VizError;

    fn try_from(s: String) -> Result<Self> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Recolour the first or last `count` bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub count: usize,
    pub color: Color,
}

impl Highlight {
    pub fn new(count: usize, color: Color) -> Self {
        Self { count, color }
    }
}

/// Loose `(count, colour)` pair as accepted on the command line.
impl TryFrom<(i64, &str)> for Highlight {
    type Error = VizError;

    fn try_from((count, color): (i64, &str)) -> Result<Self> {
        let count = usize::try_from(count)
            .map_err(|_| VizError::invalid(format!("highlight count must be >= 0, got {count}")))?;
        Ok(Self::new(count, Color::parse(color)?))
    }
}

/// One colour per bar: `base` everywhere, then the top range, then the low range.
///
/// Top covers `[0, min(n, length))`, low covers `[length - min(n, length), length)`.
/// Low is written last, so it wins where the two ranges overlap.
pub fn assign_colors(
    base: Color,
    length: usize,
    highlight_top: Option<&Highlight>,
    highlight_low: Option<&Highlight>,
) -> Vec<Color> {
    let mut colors = vec![base; length];
    if let Some(top) = highlight_top {
        let end = top.count.min(length);
        colors[..end].fill(top.color);
    }
    if let Some(low) = highlight_low {
        let start = length - low.count.min(length);
        colors[start..].fill(low.color);
    }
    colors
}

const CATEGORICAL: [&str; 8] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
];
const SEQUENTIAL: [&str; 8] = [
    "#F0F921", "#FABA39", "#F48849", "#DE5F65", "#BC3F86", "#8C2981", "#4F127B", "#000004",
];
const DIVERGING: [&str; 7] = [
    "#2A788E", "#7AD4E6", "#B6EEF4", "#FFFFFF", "#F8B7A1", "#E45641", "#B40426",
];

/// Discrete palettes for series colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Categorical,
    Sequential,
    Diverging,
}

impl Palette {
    fn hex(self) -> &'static [&'static str] {
        match self {
            Palette::Categorical => &CATEGORICAL,
            Palette::Sequential => &SEQUENTIAL,
            Palette::Diverging => &DIVERGING,
        }
    }

    /// Palette colours, cycled to `num_colors` when given.
    pub fn colors(self, num_colors: Option<usize>) -> Vec<Color> {
        let base: Vec<Color> = self
            .hex()
            .iter()
            .filter_map(|h| Color::parse(h).ok())
            .collect();
        match num_colors {
            Some(n) => base.iter().copied().cycle().take(n).collect(),
            None => base,
        }
    }
}

impl FromStr for Palette {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "categorical" => Ok(Palette::Categorical),
            "sequential" => Ok(Palette::Sequential),
            "diverging" => Ok(Palette::Diverging),
            other => Err(VizError::invalid(format!(
                "invalid palette type '{other}', choose from categorical, sequential, diverging"
            ))),
        }
    }
}

/// Continuous colour scale used by heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    /// Blue (low) through grey to red (high).
    RdBu,
    /// Brown through cream to teal.
    Earth,
}

impl ColorScale {
    fn stops(self) -> &'static [(f64, Color)] {
        const RDBU: [(f64, Color); 6] = [
            (0.0, Color::rgb(5, 10, 172)),
            (0.35, Color::rgb(106, 137, 247)),
            (0.5, Color::rgb(190, 190, 190)),
            (0.6, Color::rgb(220, 170, 132)),
            (0.7, Color::rgb(230, 145, 90)),
            (1.0, Color::rgb(178, 10, 28)),
        ];
        const EARTH: [(f64, Color); 7] = [
            (0.0, Color::rgb(161, 105, 40)),
            (1.0 / 6.0, Color::rgb(189, 146, 90)),
            (2.0 / 6.0, Color::rgb(214, 189, 141)),
            (0.5, Color::rgb(237, 234, 194)),
            (4.0 / 6.0, Color::rgb(181, 200, 184)),
            (5.0 / 6.0, Color::rgb(121, 167, 172)),
            (1.0, Color::rgb(40, 135, 161)),
        ];
        match self {
            ColorScale::RdBu => &RDBU,
            ColorScale::Earth => &EARTH,
        }
    }

    /// Colour at position `t` in `[0, 1]`.
    pub fn sample(self, t: f64) -> Color {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
        for pair in stops.windows(2) {
            let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
            if t <= t1 {
                let span = t1 - t0;
                let local = if span > 0.0 { (t - t0) / span } else { 0.0 };
                return c0.lerp(c1, local);
            }
        }
        stops[stops.len() - 1].1
    }
}
