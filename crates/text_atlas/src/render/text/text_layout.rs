//! Text layout engine
//!
//! Positions glyphs for a [`TextLayoutConfig`]: wraps the text into lines,
//! applies kerning and letter spacing, and offsets each line for alignment.
//! Coordinates are in atlas pixels with +Y pointing down the page; the pen
//! starts at `y = -height` so the last baseline sits near the origin.

use super::word_wrap::{wrap_lines, WrappedLine};
use super::{BitmapFont, BitmapGlyph, TextAlign, TextLayoutConfig};

const SPACE: u32 = ' ' as u32;
const TAB: u32 = '\t' as u32;

/// Glyphs whose height gives the x-height, in order of preference
const X_HEIGHT_CHARS: [char; 13] = ['x', 'e', 'a', 'o', 'n', 's', 'r', 'c', 'u', 'm', 'v', 'w', 'z'];

/// Glyphs whose height gives the cap height, in order of preference
const CAP_HEIGHT_CHARS: [char; 14] =
    ['H', 'I', 'N', 'E', 'F', 'K', 'L', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];

/// Glyphs used for the space advance when the font has no space
const SPACE_FALLBACK_CHARS: [char; 2] = ['m', 'w'];

/// A glyph placed at its pen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Pen position, before the glyph's own offsets
    pub position: [f32; 2],
    /// Glyph metrics
    pub glyph: BitmapGlyph,
    /// Character index into the text
    pub index: usize,
    /// Line the glyph sits on
    pub line: usize,
}

/// Typographic metrics of a computed layout
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextLayoutMetrics {
    /// Widest line, never less than the wrap width when any line exists
    pub width: f32,
    /// Total block height
    pub height: f32,
    /// Distance from the baseline to the bottom of a line
    pub descender: f32,
    /// Distance from the x-height to the top of a line
    pub ascender: f32,
    /// Height of lowercase glyphs
    pub x_height: f32,
    /// Height of uppercase glyphs
    pub cap_height: f32,
    /// Font baseline
    pub baseline: f32,
    /// Distance between baselines
    pub line_height: f32,
    /// Number of lines
    pub lines_total: usize,
    /// Number of placed glyphs, including ones without area
    pub glyph_count: usize,
}

/// Positioned glyphs plus the metrics of the block they form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    glyphs: Vec<PlacedGlyph>,
    lines: Vec<WrappedLine>,
    metrics: TextLayoutMetrics,
}

impl TextLayout {
    /// Lay out the text of a config
    ///
    /// Characters with no glyph and no fallback take up no space and are
    /// skipped; they still count towards line breaking indices.
    pub fn compute(config: &TextLayoutConfig) -> Self {
        let font = config.font().as_ref();
        let source = GlyphSource::new(font, config.tab_size(), config.letter_spacing());
        let text: Vec<char> = config.text().chars().collect();
        let (start, end) = config.range();

        let lines = wrap_lines(&text, config.wrap_mode(), config.width(), start, end, |s, e, w| {
            source.measure(&text, s, e, w)
        });

        let min_width = config.width();
        let max_line_width = lines
            .iter()
            .fold(0.0_f32, |widest, line| widest.max(line.width).max(min_width));

        let line_height = config.line_height();
        let baseline = font.common().base;
        let descender = line_height - baseline;
        let height = line_height * lines.len() as f32 - descender;
        let x_height = first_height(font, &X_HEIGHT_CHARS);
        let cap_height = first_height(font, &CAP_HEIGHT_CHARS);

        let mut glyphs = Vec::new();
        let mut y = -height;

        for (line_index, line) in lines.iter().enumerate() {
            let offset = match config.align() {
                TextAlign::Left => 0.0,
                TextAlign::Center => (max_line_width - line.width) / 2.0,
                TextAlign::Right => max_line_width - line.width,
            };

            let mut x = 0.0;
            let mut last: Option<&BitmapGlyph> = None;
            for (index, &ch) in text.iter().enumerate().take(line.end).skip(line.start) {
                let Some(glyph) = source.glyph(ch) else {
                    log::trace!("No glyph for {:?} at index {}, skipping", ch, index);
                    continue;
                };

                if let Some(previous) = last {
                    x += font.kerning(previous.id, glyph.id);
                }

                glyphs.push(PlacedGlyph {
                    position: [x + offset, y],
                    glyph: *glyph,
                    index,
                    line: line_index,
                });

                x += glyph.xadvance + config.letter_spacing();
                last = Some(glyph);
            }

            y += line_height;
        }

        let metrics = TextLayoutMetrics {
            width: max_line_width,
            height,
            descender,
            ascender: line_height - descender - x_height,
            x_height,
            cap_height,
            baseline,
            line_height,
            lines_total: lines.len(),
            glyph_count: glyphs.len(),
        };

        Self {
            glyphs,
            lines,
            metrics,
        }
    }

    /// Placed glyphs in text order
    pub fn glyphs(&self) -> &[PlacedGlyph] {
        &self.glyphs
    }

    /// Wrapped lines in order
    pub fn lines(&self) -> &[WrappedLine] {
        &self.lines
    }

    /// Block metrics
    pub const fn metrics(&self) -> &TextLayoutMetrics {
        &self.metrics
    }
}

/// Glyph lookup with space and tab fallbacks
struct GlyphSource<'a> {
    font: &'a BitmapFont,
    space: Option<BitmapGlyph>,
    tab: Option<BitmapGlyph>,
    letter_spacing: f32,
}

impl<'a> GlyphSource<'a> {
    fn new(font: &'a BitmapFont, tab_size: u32, letter_spacing: f32) -> Self {
        let space = font
            .glyph(SPACE)
            .copied()
            .or_else(|| {
                // Borrow an advance, never the image
                SPACE_FALLBACK_CHARS
                    .iter()
                    .find_map(|&ch| font.glyph_for(ch))
                    .or_else(|| font.chars().first())
                    .map(|glyph| blank(glyph, SPACE, glyph.xadvance))
            });

        let tab = space
            .as_ref()
            .map(|space| blank(space, TAB, tab_size as f32 * space.xadvance));

        Self {
            font,
            space,
            tab,
            letter_spacing,
        }
    }

    fn glyph(&self, ch: char) -> Option<&BitmapGlyph> {
        let id = u32::from(ch);
        self.font.glyph(id).or(match id {
            TAB => self.tab.as_ref(),
            SPACE => self.space.as_ref(),
            _ => None,
        })
    }

    /// Longest prefix of `text[start..end]` whose pen and right edge stay
    /// strictly inside `width`
    fn measure(&self, text: &[char], start: usize, end: usize, width: f32) -> WrappedLine {
        if self.font.chars().is_empty() {
            return WrappedLine {
                start,
                end: start,
                width: 0.0,
            };
        }

        let end = end.min(text.len());
        let mut pen = 0.0;
        let mut line_width = 0.0;
        let mut count = 0;
        let mut last: Option<&BitmapGlyph> = None;

        for &ch in text.iter().take(end).skip(start) {
            if let Some(glyph) = self.glyph(ch) {
                if let Some(previous) = last {
                    pen += self.font.kerning(previous.id, glyph.id);
                }

                let next_pen = pen + glyph.xadvance + self.letter_spacing;
                let next_width = pen + glyph.width;
                if next_width >= width || next_pen >= width {
                    break;
                }

                pen = next_pen;
                line_width = next_width;
                last = Some(glyph);
            }
            count += 1;
        }

        // Line up the right edge with the last rendered glyph
        if let Some(glyph) = last {
            line_width += glyph.xoffset;
        }

        WrappedLine {
            start,
            end: start + count,
            width: line_width,
        }
    }
}

/// Zero-size copy of a glyph with a new id and advance
fn blank(glyph: &BitmapGlyph, id: u32, xadvance: f32) -> BitmapGlyph {
    BitmapGlyph {
        id,
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
        xoffset: 0.0,
        yoffset: 0.0,
        xadvance,
        ..*glyph
    }
}

fn first_height(font: &BitmapFont, candidates: &[char]) -> f32 {
    candidates
        .iter()
        .find_map(|&ch| font.glyph_for(ch))
        .map_or(0.0, |glyph| glyph.height)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::render::text::font::test_font;
    use crate::render::text::{FontCommon, FontInfo, WrapMode};

    fn config(text: &str) -> TextLayoutConfig {
        let mut config = TextLayoutConfig::new(Arc::new(test_font()));
        config.set_text(text);
        config.set_width(200.0);
        config.set_letter_spacing(0.0);
        config.set_align(TextAlign::Left);
        config
    }

    fn xs(layout: &TextLayout) -> Vec<f32> {
        layout.glyphs().iter().map(|placed| placed.position[0]).collect()
    }

    #[test]
    fn test_single_line_positions() {
        let layout = TextLayout::compute(&config("Hi"));

        assert_eq!(xs(&layout), vec![0.0, 12.0]);
        assert_eq!(layout.lines().len(), 1);
        // 12 advance + 10 wide + 1 xoffset
        assert_relative_eq!(layout.lines()[0].width, 23.0);

        let placed = &layout.glyphs()[1];
        assert_eq!(placed.glyph.id, u32::from('i'));
        assert_eq!(placed.index, 1);
        assert_eq!(placed.line, 0);
        assert_relative_eq!(placed.position[1], -24.0);
    }

    #[test]
    fn test_letter_spacing_widens_advance() {
        let mut config = config("Hi");
        config.set_letter_spacing(5.0);
        let layout = TextLayout::compute(&config);

        assert_eq!(xs(&layout), vec![0.0, 17.0]);
        assert_relative_eq!(layout.lines()[0].width, 28.0);
    }

    #[test]
    fn test_alignment_offsets() {
        let mut config = config("Hi");

        config.set_align(TextAlign::Center);
        let centered = TextLayout::compute(&config);
        assert_eq!(xs(&centered), vec![88.5, 100.5]);

        config.set_align(TextAlign::Right);
        let right = TextLayout::compute(&config);
        assert_eq!(xs(&right), vec![177.0, 189.0]);
    }

    #[test]
    fn test_kerning_moves_pen() {
        let layout = TextLayout::compute(&config("AV"));
        assert_eq!(xs(&layout), vec![0.0, 10.0]);
    }

    #[test]
    fn test_tab_expands_to_space_advances() {
        let layout = TextLayout::compute(&config("a\tb"));

        assert_eq!(xs(&layout), vec![0.0, 12.0, 60.0]);
        let tab = &layout.glyphs()[1].glyph;
        assert_eq!(tab.id, TAB);
        assert!(!tab.has_area());
    }

    #[test]
    fn test_missing_space_borrows_advance_only() {
        let glyphs = vec![
            BitmapGlyph { id: u32::from('m'), width: 14.0, height: 12.0, xadvance: 16.0, ..Default::default() },
            BitmapGlyph { id: u32::from('k'), width: 8.0, height: 20.0, xadvance: 9.0, ..Default::default() },
        ];
        let common = FontCommon { line_height: 20.0, base: 16.0, scale_w: 64.0, scale_h: 64.0, pages: 1 };
        let font = BitmapFont::new(FontInfo::default(), common, glyphs, vec![]);

        let mut config = TextLayoutConfig::new(Arc::new(font));
        config.set_text("k k");
        config.set_letter_spacing(0.0);
        config.set_align(TextAlign::Left);
        let layout = TextLayout::compute(&config);

        assert_eq!(xs(&layout), vec![0.0, 9.0, 25.0]);
        assert!(!layout.glyphs()[1].glyph.has_area());
    }

    #[test]
    fn test_wrapped_lines_stack_downwards() {
        let mut config = config("ab cd");
        config.set_width(30.0);
        let layout = TextLayout::compute(&config);
        let metrics = layout.metrics();

        assert_eq!(metrics.lines_total, 2);
        assert_relative_eq!(metrics.height, 56.0);
        assert_relative_eq!(metrics.width, 30.0);

        let first = layout.glyphs()[0];
        let third = layout.glyphs()[2];
        assert_eq!(third.glyph.id, u32::from('c'));
        assert_eq!(third.line, 1);
        assert_relative_eq!(first.position[1], -56.0);
        assert_relative_eq!(third.position[1], -24.0);
        assert_relative_eq!(third.position[0], 0.0);
    }

    #[test]
    fn test_metrics() {
        let layout = TextLayout::compute(&config("Hi"));
        let metrics = layout.metrics();

        assert_relative_eq!(metrics.width, 200.0);
        assert_relative_eq!(metrics.height, 24.0);
        assert_relative_eq!(metrics.descender, 8.0);
        assert_relative_eq!(metrics.baseline, 24.0);
        assert_relative_eq!(metrics.line_height, 32.0);
        assert_relative_eq!(metrics.x_height, 20.0);
        assert_relative_eq!(metrics.cap_height, 20.0);
        assert_relative_eq!(metrics.ascender, 4.0);
        assert_eq!(metrics.glyph_count, 2);
    }

    #[test]
    fn test_custom_line_height_shifts_descender() {
        let mut config = config("a\nb");
        config.set_line_height(40.0);
        let metrics = *TextLayout::compute(&config).metrics();

        assert_relative_eq!(metrics.descender, 16.0);
        assert_relative_eq!(metrics.height, 64.0);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let layout = TextLayout::compute(&config(""));
        let metrics = layout.metrics();

        assert!(layout.glyphs().is_empty());
        assert_eq!(metrics.lines_total, 0);
        assert_relative_eq!(metrics.width, 0.0);
        assert_relative_eq!(metrics.height, -8.0);
    }

    #[test]
    fn test_nowrap_keeps_long_line() {
        let mut config = config("the quick brown fox");
        config.set_width(40.0);
        config.set_wrap_mode(WrapMode::NoWrap);
        let layout = TextLayout::compute(&config);

        assert_eq!(layout.metrics().lines_total, 1);
        assert!(layout.metrics().width > 40.0);
    }

    #[test]
    fn test_range_limits_glyphs() {
        let mut config = config("hello world");
        config.set_range(Some(6), None);
        let layout = TextLayout::compute(&config);

        let indices: Vec<usize> = layout.glyphs().iter().map(|placed| placed.index).collect();
        assert_eq!(indices, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let layout = TextLayout::compute(&config("aéb"));
        let indices: Vec<usize> = layout.glyphs().iter().map(|placed| placed.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(xs(&layout), vec![0.0, 12.0]);
    }
}
