use crate::domain::model::{NotificationFrequency, Platform, Theme};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clip a string to a terminal-cell width, ending in an ellipsis when cut.
/// Wide glyphs count as two cells, so CJK titles clip cleanly.
pub(super) fn clip_to_width(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.width() <= max {
        return s.to_owned();
    }

    let budget = max - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Left column padded so `right` lands on the right edge of `width` cells.
pub(super) fn two_column_line(left: &str, right: &str, width: usize) -> String {
    let left_budget = width.saturating_sub(right.width() + 2);
    let left = clip_to_width(left, left_budget);
    let pad = width.saturating_sub(left.width() + right.width());
    format!("{left}{}{right}", " ".repeat(pad))
}

pub(super) fn platform_label(p: &Platform) -> &str {
    match p {
        Platform::Spotify => "Spotify",
        Platform::Manual => "Manual",
        Platform::Other(name) => name.as_str(),
    }
}

pub(super) fn frequency_label(f: NotificationFrequency) -> &'static str {
    match f {
        NotificationFrequency::Daily => "Daily",
        NotificationFrequency::Weekly => "Weekly",
        NotificationFrequency::Never => "Never",
    }
}

pub(super) fn theme_label(t: Option<Theme>) -> &'static str {
    match t {
        Some(Theme::Light) => "Light",
        Some(Theme::Dark) => "Dark",
        Some(Theme::Auto) => "Auto",
        None => "Auto",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_short_strings() {
        assert_eq!(clip_to_width("abc", 10), "abc");
        assert_eq!(clip_to_width("abc", 3), "abc");
    }

    #[test]
    fn test_clip_reserves_a_cell_for_the_ellipsis() {
        assert_eq!(clip_to_width("abcdef", 4), "abc…");
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn test_clip_counts_wide_glyphs_as_two_cells() {
        // Each of these characters occupies two cells.
        assert_eq!(clip_to_width("月亮代表我的心", 5), "月亮…");
        assert_eq!(clip_to_width("月亮", 4), "月亮");
    }

    #[test]
    fn test_two_column_right_aligns() {
        let line = two_column_line("Song", "Spotify", 20);
        assert_eq!(line.len(), 20);
        assert!(line.starts_with("Song"));
        assert!(line.ends_with("Spotify"));
    }

    #[test]
    fn test_two_column_clips_long_left() {
        let line = two_column_line("A very long track name indeed", "Manual", 20);
        assert_eq!(UnicodeWidthStr::width(line.as_str()), 20);
        assert!(line.contains('…'));
        assert!(line.ends_with("Manual"));
    }
}
