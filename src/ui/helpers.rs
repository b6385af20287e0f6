//! Shared rendering utilities.
//!
//! Width handling works on character counts, never byte offsets, so multi-byte
//! keywords are cut on character boundaries.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
///
/// # Examples
///
/// ```
/// use serpdeck::ui::helpers::truncate;
///
/// assert_eq!(truncate("keyword research", 8), "keyword…");
/// assert_eq!(truncate("short", 8), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Centers `text` in `width` columns, padding both sides.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!(
        "{}{cut}{}",
        " ".repeat(left),
        " ".repeat(width.saturating_sub(left + len))
    )
}

/// Arrow notation for a rank change; positive means the keyword moved up.
///
/// # Examples
///
/// ```
/// use serpdeck::ui::helpers::format_change;
///
/// assert_eq!(format_change(Some(3)), "▲3");
/// assert_eq!(format_change(Some(-2)), "▼2");
/// assert_eq!(format_change(Some(0)), "");
/// assert_eq!(format_change(None), "");
/// ```
#[must_use]
pub fn format_change(change: Option<i64>) -> String {
    match change {
        Some(c) if c > 0 => format!("▲{c}"),
        Some(c) if c < 0 => format!("▼{}", c.unsigned_abs()),
        _ => String::new(),
    }
}

/// Prints `text` with search matches highlighted.
///
/// `ranges` are `(start, end)` character indices; anything past the end of
/// `text` is ignored, so ranges computed on the untruncated keyword are safe.
/// `restore` is re-emitted after each highlight to get back to the row's own
/// colors.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("ünïcødé", 4), "ünï…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn fit_pads_and_cuts() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
    }

    #[test]
    fn center_splits_padding() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("ab", 5), " ab  ");
    }
}
