//! File-backed text styles
//!
//! A [`TextStyle`] is a partial set of layout and shading values kept in a
//! `.toml` or `.ron` file and applied to a text mesh in one go.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BitmapFont, TextAlign, TextLayoutOptions, WrapMode};
use crate::config::Config;
use crate::foundation::math::{rgb_from_hex, Vec3};
use crate::render::resources::materials::RenderMode;

/// Layout and shading values, every one optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
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
    /// Tint as `0xRRGGBB`
    pub color: Option<u32>,
    /// Distance field edge
    pub threshold: Option<f32>,
    /// Distance field edge softness
    pub smoothing: Option<f32>,
    /// Render mode the style was authored for
    pub mode: Option<RenderMode>,
}

impl Config for TextStyle {}

impl TextStyle {
    /// Layout options for a new text mesh using this style
    pub fn layout_options(&self, font: Arc<BitmapFont>) -> TextLayoutOptions {
        TextLayoutOptions {
            font: Some(font),
            text: self.text.clone(),
            width: self.width,
            align: self.align,
            line_height: self.line_height,
            letter_spacing: self.letter_spacing,
            wrap_mode: self.wrap_mode,
            tab_size: self.tab_size,
            start: None,
            end: None,
        }
    }

    /// Tint as linear RGB, if the style sets one
    pub fn color(&self) -> Option<Vec3> {
        self.color.map(rgb_from_hex)
    }

    /// Only the shading values and mode of this style
    ///
    /// For meshes already built from [`layout_options`](Self::layout_options),
    /// so applying the result does not regenerate geometry.
    #[must_use]
    pub fn shading(&self) -> Self {
        Self {
            color: self.color,
            threshold: self.threshold,
            smoothing: self.smoothing,
            mode: self.mode,
            ..Self::default()
        }
    }

    /// True when any layout-affecting value is set
    pub fn touches_layout(&self) -> bool {
        self.text.is_some()
            || self.width.is_some()
            || self.align.is_some()
            || self.line_height.is_some()
            || self.letter_spacing.is_some()
            || self.wrap_mode.is_some()
            || self.tab_size.is_some()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::ConfigFormat;
    use crate::render::text::font::test_font;

    #[test]
    fn test_parse_toml_style() {
        let source = r#"
            text = "Hello"
            align = "left"
            wrap_mode = "pre"
            color = 0xFF8000
            mode = "msdf"
        "#;

        let style: TextStyle = ConfigFormat::Toml.parse(source).unwrap();

        assert_eq!(style.text.as_deref(), Some("Hello"));
        assert_eq!(style.align, Some(TextAlign::Left));
        assert_eq!(style.wrap_mode, Some(WrapMode::Preserve));
        assert_eq!(style.mode, Some(RenderMode::Msdf));
        assert_eq!(style.width, None);
        assert!(style.touches_layout());

        let color = style.color().unwrap();
        assert_relative_eq!(color.x, 1.0);
        assert_relative_eq!(color.y, 128.0 / 255.0);
        assert_relative_eq!(color.z, 0.0);
    }

    #[test]
    fn test_shading_only_style() {
        let style: TextStyle = ConfigFormat::Ron.parse("(threshold: Some(0.5), smoothing: Some(0.1))").unwrap();

        assert_eq!(style.threshold, Some(0.5));
        assert_eq!(style.smoothing, Some(0.1));
        assert!(!style.touches_layout());
    }

    #[test]
    fn test_shading_part_drops_layout() {
        let style = TextStyle {
            text: Some("Hi".to_string()),
            width: Some(120.0),
            color: Some(0x112233),
            threshold: Some(0.45),
            smoothing: Some(0.02),
            mode: Some(RenderMode::Sdf),
            ..Default::default()
        };

        let shading = style.shading();

        assert!(!shading.touches_layout());
        assert_eq!(shading.text, None);
        assert_eq!(shading.color, Some(0x112233));
        assert_eq!(shading.threshold, Some(0.45));
        assert_eq!(shading.smoothing, Some(0.02));
        assert_eq!(shading.mode, Some(RenderMode::Sdf));
    }

    #[test]
    fn test_layout_options_carry_style() {
        let style = TextStyle {
            text: Some("Hi".to_string()),
            width: Some(120.0),
            tab_size: Some(2),
            ..Default::default()
        };

        let options = style.layout_options(Arc::new(test_font()));

        assert!(options.font.is_some());
        assert_eq!(options.text.as_deref(), Some("Hi"));
        assert_eq!(options.width, Some(120.0));
        assert_eq!(options.tab_size, Some(2));
        assert_eq!(options.align, None);
    }
}
