//! Bitmap font metadata
//!
//! Glyph rectangles, spacing and kerning for a pre-rendered font atlas, in
//! the layout of AngelCode BMFont descriptors (`info`, `common`, `chars`,
//! `kernings`). The atlas image itself is owned by the host renderer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::LayoutError;
use crate::config::Config;

/// Face description from the `info` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontInfo {
    /// Font face name
    pub face: String,
    /// Size in pixels the atlas was rendered at
    pub size: f32,
}

/// Shared metrics from the `common` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontCommon {
    /// Distance between consecutive baselines
    pub line_height: f32,
    /// Distance from the top of a line to its baseline
    pub base: f32,
    /// Atlas texture width in pixels
    pub scale_w: f32,
    /// Atlas texture height in pixels
    pub scale_h: f32,
    /// Number of atlas pages
    pub pages: u32,
}

/// A single glyph rectangle in the atlas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitmapGlyph {
    /// Unicode code point
    pub id: u32,
    /// Left edge in atlas pixels
    pub x: f32,
    /// Top edge in atlas pixels
    pub y: f32,
    /// Glyph width in atlas pixels
    pub width: f32,
    /// Glyph height in atlas pixels
    pub height: f32,
    /// Horizontal offset from the pen to the glyph quad
    pub xoffset: f32,
    /// Vertical offset from the line top to the glyph quad
    pub yoffset: f32,
    /// Pen advance after this glyph
    pub xadvance: f32,
    /// Atlas page index
    pub page: u32,
    /// Channel mask the glyph is stored in
    pub chnl: u32,
}

impl BitmapGlyph {
    /// True when the glyph produces a visible quad
    pub fn has_area(&self) -> bool {
        self.width * self.height > 0.0
    }
}

/// Kerning adjustment between two glyphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kerning {
    /// Left glyph id
    pub first: u32,
    /// Right glyph id
    pub second: u32,
    /// Pen adjustment in pixels
    pub amount: f32,
}

/// Distance field encoding parameters, present for SDF/MSDF atlases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceField {
    /// Generator field type, e.g. `sdf` or `msdf`
    pub field_type: String,
    /// Distance range in pixels
    pub distance_range: f32,
}

/// Serialized form of a bitmap font
///
/// Only used as the on-disk shape; [`BitmapFont`] converts from and into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BitmapFontDesc {
    #[serde(default)]
    info: FontInfo,
    common: FontCommon,
    #[serde(default)]
    pages: Vec<String>,
    #[serde(default)]
    chars: Vec<BitmapGlyph>,
    #[serde(default)]
    kernings: Vec<Kerning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distance_field: Option<DistanceField>,
}

/// Bitmap font atlas metadata with indexed glyph and kerning lookup
///
/// Fonts are shared between text meshes behind an `Arc`; nothing in this
/// crate mutates a font after it is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BitmapFontDesc", into = "BitmapFontDesc")]
pub struct BitmapFont {
    desc: BitmapFontDesc,
    glyph_lookup: HashMap<u32, usize>,
    kerning_lookup: HashMap<(u32, u32), f32>,
}

impl From<BitmapFontDesc> for BitmapFont {
    fn from(desc: BitmapFontDesc) -> Self {
        let mut glyph_lookup = HashMap::with_capacity(desc.chars.len());
        for (index, glyph) in desc.chars.iter().enumerate() {
            // First definition wins, like a linear scan would
            glyph_lookup.entry(glyph.id).or_insert(index);
        }

        let mut kerning_lookup = HashMap::with_capacity(desc.kernings.len());
        for kerning in &desc.kernings {
            kerning_lookup
                .entry((kerning.first, kerning.second))
                .or_insert(kerning.amount);
        }

        Self {
            desc,
            glyph_lookup,
            kerning_lookup,
        }
    }
}

impl From<BitmapFont> for BitmapFontDesc {
    fn from(font: BitmapFont) -> Self {
        font.desc
    }
}

impl Config for BitmapFont {}

impl BitmapFont {
    /// Build a font from its parts
    pub fn new(
        info: FontInfo,
        common: FontCommon,
        chars: Vec<BitmapGlyph>,
        kernings: Vec<Kerning>,
    ) -> Self {
        BitmapFontDesc {
            info,
            common,
            pages: Vec::new(),
            chars,
            kernings,
            distance_field: None,
        }
        .into()
    }

    /// Attach atlas page file names
    #[must_use]
    pub fn with_pages(mut self, pages: Vec<String>) -> Self {
        self.desc.pages = pages;
        self
    }

    /// Attach distance field parameters
    #[must_use]
    pub fn with_distance_field(mut self, distance_field: DistanceField) -> Self {
        self.desc.distance_field = Some(distance_field);
        self
    }

    /// Face description
    pub const fn info(&self) -> &FontInfo {
        &self.desc.info
    }

    /// Shared line metrics
    pub const fn common(&self) -> &FontCommon {
        &self.desc.common
    }

    /// Atlas page file names
    pub fn pages(&self) -> &[String] {
        &self.desc.pages
    }

    /// All glyphs in definition order
    pub fn chars(&self) -> &[BitmapGlyph] {
        &self.desc.chars
    }

    /// All kerning pairs
    pub fn kernings(&self) -> &[Kerning] {
        &self.desc.kernings
    }

    /// Distance field parameters, if the atlas is SDF/MSDF encoded
    pub const fn distance_field(&self) -> Option<&DistanceField> {
        self.desc.distance_field.as_ref()
    }

    /// Base line height, the default spacing between lines
    pub const fn line_height(&self) -> f32 {
        self.desc.common.line_height
    }

    /// Atlas texture dimensions in pixels
    pub const fn atlas_size(&self) -> (f32, f32) {
        (self.desc.common.scale_w, self.desc.common.scale_h)
    }

    /// Get a glyph by code point
    pub fn glyph(&self, id: u32) -> Option<&BitmapGlyph> {
        self.glyph_lookup.get(&id).map(|&index| &self.desc.chars[index])
    }

    /// Get a glyph for a character
    pub fn glyph_for(&self, ch: char) -> Option<&BitmapGlyph> {
        self.glyph(u32::from(ch))
    }

    /// Kerning between two glyph ids, 0.0 when the pair has none
    pub fn kerning(&self, first: u32, second: u32) -> f32 {
        self.kerning_lookup
            .get(&(first, second))
            .copied()
            .unwrap_or(0.0)
    }

    /// Check that the metrics can be turned into geometry
    pub fn validate(&self) -> Result<(), LayoutError> {
        let common = &self.desc.common;
        let (width, height) = (common.scale_w, common.scale_h);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidAtlasSize { width, height });
        }
        if !common.line_height.is_finite() || !common.base.is_finite() {
            return Err(LayoutError::InvalidMetrics {
                id: None,
                reason: "line height and base must be finite".to_string(),
            });
        }

        for glyph in &self.desc.chars {
            let values = [
                glyph.x,
                glyph.y,
                glyph.width,
                glyph.height,
                glyph.xoffset,
                glyph.yoffset,
                glyph.xadvance,
            ];
            if values.iter().any(|value| !value.is_finite()) {
                return Err(LayoutError::InvalidMetrics {
                    id: Some(glyph.id),
                    reason: "glyph metrics must be finite".to_string(),
                });
            }
            if glyph.width < 0.0 || glyph.height < 0.0 {
                return Err(LayoutError::InvalidMetrics {
                    id: Some(glyph.id),
                    reason: "glyph size must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Synthetic font shared by the crate's tests
///
/// 256x256 atlas, 32px lines with the baseline at 24. Every glyph is a
/// 10x20 cell advancing 12px; space has no area. `A`/`V` kern by -2.
#[cfg(test)]
pub(crate) fn test_font() -> BitmapFont {
    const CHARSET: &str =
        " abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,!?-";

    let chars = CHARSET
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            let visible = ch != ' ';
            BitmapGlyph {
                id: u32::from(ch),
                x: (index % 16) as f32 * 16.0,
                y: (index / 16) as f32 * 32.0,
                width: if visible { 10.0 } else { 0.0 },
                height: if visible { 20.0 } else { 0.0 },
                xoffset: 1.0,
                yoffset: 4.0,
                xadvance: 12.0,
                page: 0,
                chnl: 15,
            }
        })
        .collect();

    BitmapFont::new(
        FontInfo {
            face: "Test Mono".to_string(),
            size: 24.0,
        },
        FontCommon {
            line_height: 32.0,
            base: 24.0,
            scale_w: 256.0,
            scale_h: 256.0,
            pages: 1,
        },
        chars,
        vec![Kerning {
            first: u32::from('A'),
            second: u32::from('V'),
            amount: -2.0,
        }],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_glyph_lookup() {
        let font = test_font();

        let glyph = font.glyph_for('H').unwrap();
        assert_eq!(glyph.id, u32::from('H'));
        assert_eq!(glyph.width, 10.0);
        assert!(glyph.has_area());

        assert!(!font.glyph_for(' ').unwrap().has_area());
        assert!(font.glyph_for('\t').is_none());
        assert!(font.glyph_for('é').is_none());
    }

    #[test]
    fn test_kerning_lookup() {
        let font = test_font();
        assert_eq!(font.kerning(u32::from('A'), u32::from('V')), -2.0);
        assert_eq!(font.kerning(u32::from('V'), u32::from('A')), 0.0);
    }

    #[test]
    fn test_duplicate_glyph_keeps_first() {
        let first = BitmapGlyph { id: 65, xadvance: 10.0, ..Default::default() };
        let second = BitmapGlyph { id: 65, xadvance: 99.0, ..Default::default() };
        let font = BitmapFont::new(FontInfo::default(), FontCommon::default(), vec![first, second], vec![]);

        assert_eq!(font.glyph(65).unwrap().xadvance, 10.0);
    }

    #[test]
    fn test_validate() {
        assert!(test_font().validate().is_ok());

        let flat = BitmapFont::new(FontInfo::default(), FontCommon::default(), vec![], vec![]);
        assert!(matches!(flat.validate(), Err(LayoutError::InvalidAtlasSize { .. })));

        let mut common = test_font().common().clone();
        common.line_height = f32::NAN;
        let nan_line = BitmapFont::new(FontInfo::default(), common.clone(), vec![], vec![]);
        assert!(matches!(nan_line.validate(), Err(LayoutError::InvalidMetrics { id: None, .. })));

        common.line_height = 32.0;
        let broken = BitmapGlyph { id: 7, width: -1.0, ..Default::default() };
        let negative = BitmapFont::new(FontInfo::default(), common, vec![broken], vec![]);
        assert!(matches!(negative.validate(), Err(LayoutError::InvalidMetrics { id: Some(7), .. })));
    }

    #[test]
    fn test_deserialize_builds_lookup() {
        let source = r#"
            [common]
            line_height = 40
            base = 30
            scale_w = 128
            scale_h = 64
            pages = 1

            [[chars]]
            id = 72
            x = 2
            y = 3
            width = 10
            height = 20
            xoffset = 1
            yoffset = 2
            xadvance = 12

            [[kernings]]
            first = 72
            second = 72
            amount = -1
        "#;

        let font: BitmapFont = ConfigFormat::Toml.parse(source).unwrap();

        assert_eq!(font.line_height(), 40.0);
        assert_eq!(font.atlas_size(), (128.0, 64.0));
        assert_eq!(font.glyph_for('H').unwrap().xadvance, 12.0);
        assert_eq!(font.kerning(72, 72), -1.0);
    }

    #[test]
    fn test_ron_round_trip_keeps_lookup() {
        let font = test_font().with_distance_field(DistanceField {
            field_type: "msdf".to_string(),
            distance_range: 4.0,
        });

        let text = ConfigFormat::Ron.serialize(&font).unwrap();
        let restored: BitmapFont = ConfigFormat::Ron.parse(&text).unwrap();

        assert_eq!(restored, font);
        assert_eq!(restored.glyph_for('z').unwrap().id, u32::from('z'));
        assert_eq!(restored.distance_field().unwrap().distance_range, 4.0);
    }
}
