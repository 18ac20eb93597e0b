//! Pure text wrapping utilities and dimensional constants for the InputBox.
//!
//! These are stateless helpers with no dependency on the InputBox itself.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before the box starts scrolling
pub(super) const MAX_VISIBLE_LINES: u16 = 6;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Build textwrap options configured for the input box inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into display lines, always returning at least one line.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect();

    // textwrap doesn't always produce an empty trailing line for a trailing newline
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Count wrapped lines for the given text.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrapped_lines(text, width).len() as u16
}

/// Display column just past the end of `text` once wrapped to `width`.
///
/// textwrap drops trailing spaces from the last line; they still move the
/// caret, so they are added back (up to the edge of the box).
pub(super) fn end_column(text: &str, width: u16) -> u16 {
    let lines = wrapped_lines(text, width);
    let last = lines.last().map(String::as_str).unwrap_or("");
    let kept = last.len() - last.trim_end_matches(' ').len();
    let tail = text.rsplit('\n').next().unwrap_or("");
    let trailing_spaces = tail.len() - tail.trim_end_matches(' ').len();
    ((last.width() + trailing_spaces.saturating_sub(kept)) as u16).min(width)
}
