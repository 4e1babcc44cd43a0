//! Text measurement and truncation for axis labels.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
/// Each char is taken as 0.6 of the font size, rounded up.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    (text.chars().count() as u32 * font_px * 3).div_ceil(5)
}

/// Truncate to fit `max_px`, ending with a single ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: Vec<char> = Vec::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&format!("{}…", out.iter().collect::<String>()), font_px) > max_px
        {
            out.pop();
            break;
        }
    }
    if out.is_empty() {
        return String::new();
    }
    out.into_iter().chain(std::iter::once('…')).collect()
}

/// Pixel width for a left label column holding `labels`, clamped to `[min_px, max_px]`.
pub fn label_area_width_px(labels: &[String], font_px: u32, min_px: u32, max_px: u32) -> u32 {
    let widest = labels
        .iter()
        .map(|l| estimate_text_width_px(l, font_px))
        .max()
        .unwrap_or(0);
    (widest + 18).clamp(min_px, max_px)
}
