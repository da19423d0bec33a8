//! Line breaking
//!
//! Splits a character slice into lines given a measure function that
//! reports how many characters of a range fit into a width. Works on
//! character indices so the layout can map lines straight back to glyphs.

use super::WrapMode;

/// One measured run of characters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappedLine {
    /// First character index
    pub start: usize,
    /// One past the last character index
    pub end: usize,
    /// Rendered width of the run
    pub width: f32,
}

impl WrappedLine {
    /// Number of characters in the run
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the run holds no characters
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Break `text[start..end]` into lines
///
/// `measure(start, end, width)` must return the longest prefix of
/// `start..end` that fits into `width`, with its rendered width.
pub fn wrap_lines<M>(
    text: &[char],
    mode: WrapMode,
    width: f32,
    start: Option<usize>,
    end: Option<usize>,
    measure: M,
) -> Vec<WrappedLine>
where
    M: Fn(usize, usize, f32) -> WrappedLine,
{
    if width == 0.0 && mode != WrapMode::NoWrap {
        return Vec::new();
    }

    let end = end.unwrap_or(text.len()).min(text.len());
    let start = start.unwrap_or(0);

    match mode {
        WrapMode::Preserve => preserve(text, start, end, width, measure),
        WrapMode::NoWrap => greedy(text, start, end, f32::MAX, measure),
        WrapMode::Normal => greedy(text, start, end, width, measure),
    }
}

fn preserve<M>(text: &[char], start: usize, end: usize, width: f32, measure: M) -> Vec<WrappedLine>
where
    M: Fn(usize, usize, f32) -> WrappedLine,
{
    let mut lines = Vec::new();
    let mut line_start = start;

    for i in start..end {
        let is_newline = text[i] == '\n';
        if is_newline || i + 1 == end {
            let line_end = if is_newline { i } else { i + 1 };
            lines.push(measure(line_start, line_end, width));
            line_start = i + 1;
        }
    }

    lines
}

fn greedy<M>(text: &[char], start: usize, end: usize, width: f32, measure: M) -> Vec<WrappedLine>
where
    M: Fn(usize, usize, f32) -> WrappedLine,
{
    let mut lines = Vec::new();
    let mut start = start;

    while start < end {
        let newline = next_newline(text, start, end);

        // Leading whitespace never starts a line
        while start < newline && text[start].is_whitespace() {
            start += 1;
        }

        let measured = measure(start, newline, width);
        let mut line_end = start + measured.len();
        let mut next_start = line_end + 1;

        if line_end < newline {
            // Back up to the last whitespace that fits
            while line_end > start && !text[line_end].is_whitespace() {
                line_end -= 1;
            }

            if line_end == start {
                // Nothing to break on: split the word where it stopped fitting
                if next_start > start + 1 {
                    next_start -= 1;
                }
                line_end = next_start;
            } else {
                next_start = line_end;
                while line_end > start && text[line_end - 1].is_whitespace() {
                    line_end -= 1;
                }
            }
        }

        if line_end >= start {
            // Re-measure without a limit so a lone over-wide glyph still shows
            let line = measure(start, line_end, f32::MAX);
            lines.push(WrappedLine {
                start,
                end: line_end,
                width: line.width,
            });
        }

        start = next_start;
    }

    lines
}

fn next_newline(text: &[char], start: usize, end: usize) -> usize {
    text[start..end]
        .iter()
        .position(|&ch| ch == '\n')
        .map_or(end, |offset| start + offset)
}
