//! Display-width aware string truncation for fixed-width table cells.
//!
//! Widths are terminal columns as reported by `unicode-width`, not bytes or
//! chars. Every function accepts empty input and zero budgets.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Marker appended when text is cut short.
pub const ELLIPSIS: &str = "…";

const ELLIPSIS_WIDTH: usize = 1;

/// Longest prefix of `s` whose display width fits in `max_cols`.
///
/// # Examples
///
/// ```
/// use anuncios_utils_string::take_width;
///
/// assert_eq!(take_width("hello world", 5), "hello");
/// // Wide characters are never split.
/// assert_eq!(take_width("日本語", 3), "日");
/// assert_eq!(take_width("", 4), "");
/// ```
pub fn take_width(s: &str, max_cols: usize) -> &str {
    let mut used = 0usize;
    for (i, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_cols {
            return &s[..i];
        }
        used += w;
    }
    s
}

/// Cut `s` to `max_cols` columns, ending with [`ELLIPSIS`] when anything was
/// dropped. Breaks anywhere, including inside a word.
///
/// # Examples
///
/// ```
/// use anuncios_utils_string::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Bici", 10), "Bici");
/// assert_eq!(truncate_to_width("Deporte extremo", 10), "Deporte e…");
/// ```
pub fn truncate_to_width(s: &str, max_cols: usize) -> Cow<'_, str> {
    if s.width() <= max_cols {
        return Cow::Borrowed(s);
    }
    if max_cols < ELLIPSIS_WIDTH {
        return Cow::Borrowed("");
    }
    let head = take_width(s, max_cols - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{head}{ELLIPSIS}"))
}

/// Like [`truncate_to_width`] but prefers to stop at the last whitespace that
/// fits. A single token longer than the budget is still cut mid-token.
pub fn truncate_at_word(s: &str, max_cols: usize) -> Cow<'_, str> {
    if s.width() <= max_cols {
        return Cow::Borrowed(s);
    }
    if max_cols < ELLIPSIS_WIDTH {
        return Cow::Borrowed("");
    }
    let head = take_width(s, max_cols - ELLIPSIS_WIDTH);
    let cut_on_space = s[head.len()..].starts_with(char::is_whitespace);
    let kept = if cut_on_space {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(idx) => &head[..idx],
            None => head,
        }
    };
    let kept = match kept.trim_end() {
        "" => head.trim_end(),
        trimmed => trimmed,
    };
    Cow::Owned(format!("{kept}{ELLIPSIS}"))
}

/// Wrap `text` into at most `max_lines` lines of `width` columns.
///
/// With `break_words` set, tokens wider than `width` are split across lines.
/// Without it lines only break on whitespace and an overlong token is cut
/// with an ellipsis. When text remains after the last line, that line ends
/// with [`ELLIPSIS`].
pub fn clamp_lines(text: &str, width: usize, max_lines: usize, break_words: bool) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width)
        .break_words(break_words)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    let wrapped = textwrap::wrap(text, options);
    let overflow = wrapped.len() > max_lines;

    let mut lines: Vec<String> = wrapped
        .iter()
        .take(max_lines)
        .map(|line| truncate_to_width(line, width).into_owned())
        .collect();

    if overflow {
        if let Some(last) = lines.last_mut() {
            let base = last.trim_end().trim_end_matches(ELLIPSIS);
            let head = take_width(base, width.saturating_sub(ELLIPSIS_WIDTH));
            *last = format!("{head}{ELLIPSIS}");
        }
    }
    lines
}

/// Replace control characters (newlines, tabs, escapes) with single spaces
/// so a value can be painted into one terminal row.
pub fn flatten_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect(),
    )
}
