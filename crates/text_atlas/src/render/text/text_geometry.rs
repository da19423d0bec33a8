//! Glyph quads from a text layout
//!
//! [`GeometryGenerator`] is the seam between a [`TextLayoutConfig`] and the
//! buffers a text mesh draws. [`BitmapTextGenerator`] is the stock
//! implementation: one quad per visible glyph, UVs normalised by the atlas
//! size.

use super::{LayoutError, PlacedGlyph, TextLayout, TextLayoutConfig, TextLayoutMetrics};
use crate::render::primitives::Vertex;

/// Winding of the two triangles in each quad (BL, TL, TR, BR)
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Text quads face the viewer
const TEXT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Axis-aligned bounding box of the emitted quads
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl TextBounds {
    /// Calculate width of bounding box
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Calculate height of bounding box
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    fn from_positions(positions: &[[f32; 2]]) -> Self {
        let Some(&[x, y]) = positions.first() else {
            return Self::default();
        };

        positions.iter().fold(
            Self {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            |bounds, &[x, y]| Self {
                min_x: bounds.min_x.min(x),
                min_y: bounds.min_y.min(y),
                max_x: bounds.max_x.max(x),
                max_y: bounds.max_y.max(y),
            },
        )
    }
}

/// Flat buffers for a block of text
///
/// Four vertices per visible glyph in BL, TL, TR, BR order; `positions`,
/// `uvs` and `pages` are parallel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGeometry {
    /// Quad corner positions
    pub positions: Vec<[f32; 2]>,
    /// Atlas texture coordinates
    pub uvs: Vec<[f32; 2]>,
    /// Atlas page of each vertex
    pub pages: Vec<u32>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Layout metrics the quads were built from
    pub metrics: TextLayoutMetrics,
    /// Bounding box of all quads
    pub bounds: TextBounds,
}

impl TextGeometry {
    /// Number of glyph quads
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// True when no glyph produced a quad
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Mesh vertices in the z = 0 plane
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.positions
            .iter()
            .zip(&self.uvs)
            .zip(&self.pages)
            .map(|((&[x, y], &uv), &page)| {
                Vertex::new([x, y, 0.0], TEXT_NORMAL, uv).with_page(page as f32)
            })
    }
}

/// Turns a layout config into drawable geometry
///
/// Implementations must be pure: the same config always yields the same
/// geometry.
pub trait GeometryGenerator {
    /// Build geometry for the config
    fn generate(&self, config: &TextLayoutConfig) -> Result<TextGeometry, LayoutError>;
}

/// Quad generator for bitmap, SDF and MSDF atlases alike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapTextGenerator {
    /// Flip V so atlas row 0 maps to the top of the texture
    pub flip_y: bool,
}

impl Default for BitmapTextGenerator {
    fn default() -> Self {
        Self { flip_y: true }
    }
}

impl BitmapTextGenerator {
    /// Generator with an explicit V orientation
    pub const fn new(flip_y: bool) -> Self {
        Self { flip_y }
    }

    fn uvs(&self, placed: &PlacedGlyph, atlas_width: f32, atlas_height: f32) -> [[f32; 2]; 4] {
        let glyph = &placed.glyph;
        let right = glyph.x + glyph.width;
        let bottom = glyph.y + glyph.height;

        let u0 = glyph.x / atlas_width;
        let u1 = right / atlas_width;
        let (v0, v1) = if self.flip_y {
            ((atlas_height - bottom) / atlas_height, (atlas_height - glyph.y) / atlas_height)
        } else {
            (bottom / atlas_height, glyph.y / atlas_height)
        };

        [[u0, v1], [u0, v0], [u1, v0], [u1, v1]]
    }
}

fn positions(placed: &PlacedGlyph) -> [[f32; 2]; 4] {
    let glyph = &placed.glyph;
    let x = placed.position[0] + glyph.xoffset;
    let y = placed.position[1] + glyph.yoffset;
    let (w, h) = (glyph.width, glyph.height);

    [[x, y], [x, y + h], [x + w, y + h], [x + w, y]]
}

impl GeometryGenerator for BitmapTextGenerator {
    fn generate(&self, config: &TextLayoutConfig) -> Result<TextGeometry, LayoutError> {
        let font = config.font();
        font.validate()?;

        let layout = TextLayout::compute(config);
        let (atlas_width, atlas_height) = font.atlas_size();

        let visible: Vec<&PlacedGlyph> = layout
            .glyphs()
            .iter()
            .filter(|placed| placed.glyph.has_area())
            .collect();

        let mut geometry = TextGeometry {
            positions: Vec::with_capacity(visible.len() * 4),
            uvs: Vec::with_capacity(visible.len() * 4),
            pages: Vec::with_capacity(visible.len() * 4),
            indices: Vec::with_capacity(visible.len() * 6),
            metrics: *layout.metrics(),
            bounds: TextBounds::default(),
        };

        for (quad, placed) in visible.into_iter().enumerate() {
            let base = (quad * 4) as u32;
            geometry.positions.extend(positions(placed));
            geometry.uvs.extend(self.uvs(placed, atlas_width, atlas_height));
            geometry.pages.extend([placed.glyph.page; 4]);
            geometry.indices.extend(QUAD_INDICES.iter().map(|index| base + index));
        }

        geometry.bounds = TextBounds::from_positions(&geometry.positions);
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::render::text::font::test_font;
    use crate::render::text::{BitmapFont, FontCommon, FontInfo, TextAlign};

    fn config(text: &str) -> TextLayoutConfig {
        let mut config = TextLayoutConfig::new(Arc::new(test_font()));
        config.set_text(text);
        config.set_width(200.0);
        config.set_letter_spacing(0.0);
        config.set_align(TextAlign::Left);
        config
    }

    #[test]
    fn test_quad_positions() {
        let geometry = BitmapTextGenerator::default().generate(&config("H")).unwrap();

        // Pen at (0, -24), offsets (1, 4), 10x20 glyph
        assert_eq!(geometry.positions, vec![[1.0, -20.0], [1.0, 0.0], [11.0, 0.0], [11.0, -20.0]]);
        assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(geometry.pages, vec![0; 4]);
    }

    #[test]
    fn test_uvs_flipped() {
        let geometry = BitmapTextGenerator::default().generate(&config("H")).unwrap();
        let [bl, tl, tr, br] = [geometry.uvs[0], geometry.uvs[1], geometry.uvs[2], geometry.uvs[3]];

        // 'H' sits at (32, 64) in the 256x256 test atlas
        assert_relative_eq!(bl[0], 0.125);
        assert_relative_eq!(bl[1], 0.75);
        assert_relative_eq!(tl[1], 0.671875);
        assert_relative_eq!(tr[0], 0.164_062_5);
        assert_relative_eq!(tr[1], 0.671875);
        assert_relative_eq!(br[1], 0.75);
    }

    #[test]
    fn test_uvs_unflipped() {
        let geometry = BitmapTextGenerator::new(false).generate(&config("H")).unwrap();

        assert_relative_eq!(geometry.uvs[0][1], 0.25);
        assert_relative_eq!(geometry.uvs[1][1], 0.328_125);
        assert_relative_eq!(geometry.uvs[2][0], 0.164_062_5);
    }

    #[test]
    fn test_blank_glyphs_emit_no_quads() {
        let geometry = BitmapTextGenerator::default().generate(&config("a b\tc")).unwrap();

        assert_eq!(geometry.quad_count(), 3);
        assert_eq!(geometry.metrics.glyph_count, 5);
        assert_eq!(geometry.indices.len(), 18);
        assert_eq!(&geometry.indices[12..], &[8, 9, 10, 8, 10, 11]);
    }

    #[test]
    fn test_bounds_cover_quads() {
        let geometry = BitmapTextGenerator::default().generate(&config("Hi")).unwrap();
        let bounds = geometry.bounds;

        assert_relative_eq!(bounds.min_x, 1.0);
        assert_relative_eq!(bounds.max_x, 23.0);
        assert_relative_eq!(bounds.min_y, -20.0);
        assert_relative_eq!(bounds.max_y, 0.0);
        assert_relative_eq!(bounds.width(), 22.0);
        assert_relative_eq!(bounds.height(), 20.0);
    }

    #[test]
    fn test_empty_text() {
        let geometry = BitmapTextGenerator::default().generate(&config("")).unwrap();

        assert!(geometry.is_empty());
        assert_eq!(geometry.bounds, TextBounds::default());
        assert_eq!(geometry.vertices().count(), 0);
    }

    #[test]
    fn test_vertices_carry_page_and_normal() {
        let geometry = BitmapTextGenerator::default().generate(&config("H")).unwrap();
        let vertices: Vec<Vertex> = geometry.vertices().collect();

        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[1].tex_coord, geometry.uvs[1]);
        assert_eq!(vertices[1].page, 0.0);
    }

    #[test]
    fn test_invalid_atlas_is_rejected() {
        let common = FontCommon { line_height: 32.0, base: 24.0, ..Default::default() };
        let font = BitmapFont::new(FontInfo::default(), common, vec![], vec![]);
        let mut config = TextLayoutConfig::new(Arc::new(font));
        config.set_text("Hi");

        let result = BitmapTextGenerator::default().generate(&config);
        assert!(matches!(result, Err(LayoutError::InvalidAtlasSize { .. })));
    }

    #[test]
    fn test_generation_is_repeatable() {
        let config = config("the quick brown fox");
        let generator = BitmapTextGenerator::default();
        assert_eq!(generator.generate(&config).unwrap(), generator.generate(&config).unwrap());
    }
}
