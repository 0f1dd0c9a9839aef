use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns (CJK and emoji count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Ellipsis appended to truncated text
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Appends "..." when text is cut. Widths too narrow for a character plus the
/// ellipsis get as many characters as fit, without the ellipsis. Returns
/// `Cow::Borrowed` when the string already fits.
///
/// # Examples
///
/// ```
/// use catalog_admin::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let end = fitting_prefix_len(s, budget);
    Cow::Owned(format!("{}{}", &s[..end], suffix))
}

/// Byte length of the longest prefix of `s` that fits in `width` columns.
fn fitting_prefix_len(s: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return idx;
        }
        used += w;
    }
    s.len()
}

/// Word-wraps `text` to `width` columns and keeps at most `max_lines` lines.
///
/// When text is dropped, the last kept line is truncated with an ellipsis,
/// mirroring a CSS line clamp. Blank input yields no lines.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut overflowed = false;

    'outer: for word in text.split_whitespace() {
        let word_width = display_width(word);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                overflowed = true;
                break 'outer;
            }
        }

        // Words wider than a full line are hard-split.
        let mut rest = word;
        while display_width(rest) > width {
            let mut split = fitting_prefix_len(rest, width);
            if split == 0 {
                split = rest.chars().next().map_or(rest.len(), char::len_utf8);
            }
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
            if lines.len() == max_lines {
                overflowed = true;
                break 'outer;
            }
        }
        current.push_str(rest);
        current_width = display_width(rest);
    }

    if !overflowed && !current.is_empty() {
        if lines.len() == max_lines {
            overflowed = true;
        } else {
            lines.push(current);
        }
    }

    if overflowed {
        if let Some(last) = lines.last_mut() {
            let end = fitting_prefix_len(last, width.saturating_sub(ELLIPSIS_WIDTH));
            last.truncate(end);
            last.push_str(ELLIPSIS);
        }
    }

    lines
}

/// Strip terminal control characters and ANSI escape sequences from text.
///
/// API payloads are rendered verbatim, so anything that could drive the
/// terminal is removed. Preserves tab and newline. Returns `Cow::Borrowed`
/// when the input is already clean.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let is_bad = |c: char| c == '\x1b' || (c.is_control() && c != '\t' && c != '\n');
    if !s.chars().any(is_bad) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                // CSI: ESC [ params final-byte
                Some('[') => {
                    chars.next();
                    for n in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&n) {
                            break;
                        }
                    }
                }
                // OSC: ESC ] ... (BEL | ESC \)
                Some(']') => {
                    chars.next();
                    while let Some(n) = chars.next() {
                        if n == '\x07' {
                            break;
                        }
                        if n == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }
        if !is_bad(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_fits_is_borrowed() {
        assert!(matches!(truncate_to_width("abc", 3), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Breaking Bad", 8), "Break...");
    }

    #[test]
    fn test_truncate_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
    }

    #[test]
    fn test_truncate_cjk() {
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
    }

    #[test]
    fn test_clamp_short_text_single_line() {
        assert_eq!(clamp_lines("A thriller", 20, 3), vec!["A thriller"]);
    }

    #[test]
    fn test_clamp_wraps_on_words() {
        assert_eq!(
            clamp_lines("one two three four", 9, 3),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_clamp_marks_overflow() {
        let lines = clamp_lines("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with("..."));
    }

    #[test]
    fn test_clamp_blank_text() {
        assert!(clamp_lines("   ", 10, 3).is_empty());
        assert!(clamp_lines("text", 0, 3).is_empty());
    }

    #[test]
    fn test_clamp_hard_splits_long_words() {
        let lines = clamp_lines("abcdefghij", 4, 3);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_strip_clean_is_borrowed() {
        assert!(matches!(strip_control_chars("hello\tworld\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_ansi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_control_chars("a\x1b]0;title\x07b"), "ab");
        assert_eq!(strip_control_chars("a\x00b\x7fc"), "abc");
    }

    proptest! {
        #[test]
        fn truncate_never_exceeds_width(s in "\\PC{0,40}", w in 0usize..30) {
            prop_assert!(display_width(&truncate_to_width(&s, w)) <= w);
        }

        #[test]
        fn clamp_respects_bounds(s in "[a-z ]{0,120}", w in 4usize..30, n in 1usize..5) {
            let lines = clamp_lines(&s, w, n);
            prop_assert!(lines.len() <= n);
            for line in &lines {
                prop_assert!(display_width(line) <= w);
            }
        }
    }
}
