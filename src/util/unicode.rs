use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending
/// `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Next grapheme boundary after `byte_offset`. Returns None at the end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    match s[byte_offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(byte_offset + i),
        None => Some(s.len()),
    }
}

/// Previous grapheme boundary before `byte_offset`. Returns None at the
/// start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Display column (in cells) of a byte offset.
pub fn byte_to_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Byte offset for a display column, snapped to the start of the grapheme
/// the column falls inside. Columns past the end map to `s.len()`.
pub fn col_to_byte(s: &str, target_col: usize) -> usize {
    let mut col = 0;
    for (i, g) in s.grapheme_indices(true) {
        let gw = UnicodeWidthStr::width(g);
        if col + gw > target_col {
            return i;
        }
        col += gw;
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ascii_and_cjk() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
    }

    #[test]
    fn truncate_never_splits_wide_chars() {
        // "你好世界" is 8 cells; at 4 cells the budget of 3 fits only "你".
        let out = truncate_to_width("你好世界", 4);
        assert_eq!(out, "你\u{2026}");
        assert!(display_width(&out) <= 4);
    }

    #[test]
    fn truncate_degenerate_widths() {
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    #[test]
    fn grapheme_boundaries_ascii() {
        assert_eq!(next_grapheme_boundary("ab", 0), Some(1));
        assert_eq!(next_grapheme_boundary("ab", 2), None);
        assert_eq!(prev_grapheme_boundary("ab", 2), Some(1));
        assert_eq!(prev_grapheme_boundary("ab", 0), None);
    }

    #[test]
    fn grapheme_boundaries_combining() {
        let s = "cafe\u{0301}!"; // é is e + combining accent
        assert_eq!(next_grapheme_boundary(s, 3), Some(6));
        assert_eq!(prev_grapheme_boundary(s, 6), Some(3));
    }

    #[test]
    fn grapheme_boundaries_emoji() {
        let s = "a🎉b";
        assert_eq!(next_grapheme_boundary(s, 1), Some(5));
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));
    }

    #[test]
    fn byte_col_conversions() {
        assert_eq!(byte_to_col("hello", 3), 3);
        assert_eq!(byte_to_col("你好", 3), 2);
        assert_eq!(col_to_byte("hello", 3), 3);
        assert_eq!(col_to_byte("你好", 2), 3);
        assert_eq!(col_to_byte("hi", 10), 2);
    }

    #[test]
    fn col_snaps_inside_wide_char() {
        // Column 1 lands inside 你 (2 cells wide), snapping back to byte 0.
        assert_eq!(col_to_byte("你好", 1), 0);
    }
}
