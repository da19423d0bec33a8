//! Layout configuration for a text mesh
//!
//! [`TextLayoutOptions`] is what callers hand in, with every field optional.
//! [`TextLayoutConfig`] is the complete record after defaults are applied;
//! it is the only input the geometry generator sees.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BitmapFont, TextMeshError, TextMeshResult};

/// Default wrap width in pixels
pub const DEFAULT_WIDTH: f32 = 500.0;

/// Default extra spacing between letters in pixels
pub const DEFAULT_LETTER_SPACING: f32 = 5.0;

/// Default tab width, in space advances
pub const DEFAULT_TAB_SIZE: u32 = 4;

/// Horizontal alignment of each line within the layout width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left
    Left,
    /// Centered
    #[default]
    Center,
    /// Flush right
    Right,
}

/// Word wrapping behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Keep every newline-separated line as written
    #[serde(alias = "pre")]
    Preserve,
    /// Only break on newlines
    NoWrap,
    /// Greedy word wrap at the layout width
    #[default]
    Normal,
}

/// Partial layout settings; anything left `None` gets a default
#[derive(Debug, Clone, Default)]
pub struct TextLayoutOptions {
    /// Font atlas metadata, required
    pub font: Option<Arc<BitmapFont>>,
    /// Text content
    pub text: Option<String>,
    /// Wrap width
    pub width: Option<f32>,
    /// Line alignment
    pub align: Option<TextAlign>,
    /// Distance between baselines
    pub line_height: Option<f32>,
    /// Extra spacing after each glyph
    pub letter_spacing: Option<f32>,
    /// Wrapping behaviour
    pub wrap_mode: Option<WrapMode>,
    /// Tab width in space advances
    pub tab_size: Option<u32>,
    /// First character index to lay out
    pub start: Option<usize>,
    /// One past the last character index to lay out
    pub end: Option<usize>,
}

impl TextLayoutOptions {
    /// Options with only the font set
    pub fn with_font(font: Arc<BitmapFont>) -> Self {
        Self {
            font: Some(font),
            ..Default::default()
        }
    }

    /// Set the text content
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the wrap width
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the line alignment
    #[must_use]
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    /// Set the line height
    #[must_use]
    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Set the letter spacing
    #[must_use]
    pub fn letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = Some(letter_spacing);
        self
    }

    /// Set the wrap mode
    #[must_use]
    pub fn wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = Some(wrap_mode);
        self
    }

    /// Set the tab size
    #[must_use]
    pub fn tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    /// Restrict layout to a character range
    #[must_use]
    pub fn range(mut self, start: Option<usize>, end: Option<usize>) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Complete layout record of a text mesh
///
/// Setters here are plain field writes; regeneration is driven by the
/// owning [`TextMeshAtlas`](super::TextMeshAtlas).
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayoutConfig {
    font: Arc<BitmapFont>,
    text: String,
    width: f32,
    align: TextAlign,
    line_height: f32,
    letter_spacing: f32,
    wrap_mode: WrapMode,
    tab_size: u32,
    start: Option<usize>,
    end: Option<usize>,
}

impl TextLayoutConfig {
    /// Config with every field at its default
    ///
    /// The line height defaults to the font's base line height.
    pub fn new(font: Arc<BitmapFont>) -> Self {
        let line_height = font.line_height();
        Self {
            font,
            text: String::new(),
            width: DEFAULT_WIDTH,
            align: TextAlign::default(),
            line_height,
            letter_spacing: DEFAULT_LETTER_SPACING,
            wrap_mode: WrapMode::default(),
            tab_size: DEFAULT_TAB_SIZE,
            start: None,
            end: None,
        }
    }

    /// Merge options over the defaults
    ///
    /// Fails with [`TextMeshError::Configuration`] when no font is given.
    pub fn from_options(options: TextLayoutOptions) -> TextMeshResult<Self> {
        let font = options.font.ok_or_else(|| {
            TextMeshError::Configuration("a bitmap font is required to lay out text".to_string())
        })?;

        let mut config = Self::new(font);
        if let Some(text) = options.text {
            config.text = text;
        }
        if let Some(width) = options.width {
            config.width = width;
        }
        if let Some(align) = options.align {
            config.align = align;
        }
        if let Some(line_height) = options.line_height {
            config.line_height = line_height;
        }
        if let Some(letter_spacing) = options.letter_spacing {
            config.letter_spacing = letter_spacing;
        }
        if let Some(wrap_mode) = options.wrap_mode {
            config.wrap_mode = wrap_mode;
        }
        if let Some(tab_size) = options.tab_size {
            config.tab_size = tab_size;
        }
        config.start = options.start;
        config.end = options.end;

        Ok(config)
    }

    /// Font atlas metadata
    pub const fn font(&self) -> &Arc<BitmapFont> {
        &self.font
    }

    /// Replace the font; the line height is left as is
    pub fn set_font(&mut self, font: Arc<BitmapFont>) {
        self.font = font;
    }

    /// Text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Wrap width
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Set the wrap width
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Line alignment
    pub const fn align(&self) -> TextAlign {
        self.align
    }

    /// Set the line alignment
    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    /// Distance between baselines
    pub const fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Set the distance between baselines
    pub fn set_line_height(&mut self, line_height: f32) {
        self.line_height = line_height;
    }

    /// Extra spacing after each glyph
    pub const fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    /// Set the extra spacing after each glyph
    pub fn set_letter_spacing(&mut self, letter_spacing: f32) {
        self.letter_spacing = letter_spacing;
    }

    /// Wrapping behaviour
    pub const fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    /// Set the wrapping behaviour
    pub fn set_wrap_mode(&mut self, wrap_mode: WrapMode) {
        self.wrap_mode = wrap_mode;
    }

    /// Tab width in space advances
    pub const fn tab_size(&self) -> u32 {
        self.tab_size
    }

    /// Set the tab width
    pub fn set_tab_size(&mut self, tab_size: u32) {
        self.tab_size = tab_size;
    }

    /// Character range to lay out, `None` bounds meaning the text edges
    pub const fn range(&self) -> (Option<usize>, Option<usize>) {
        (self.start, self.end)
    }

    /// Restrict layout to a character range
    pub fn set_range(&mut self, start: Option<usize>, end: Option<usize>) {
        self.start = start;
        self.end = end;
    }
}
