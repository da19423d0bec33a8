//! Atlas text
//!
//! Bitmap font metadata, line wrapping, glyph layout, quad generation and
//! the [`TextMeshAtlas`] that ties them to a render mode and material.

pub mod error;
pub mod font;
pub mod text_config;
pub mod text_geometry;
pub mod text_layout;
pub mod text_mesh;
pub mod text_style;
pub mod word_wrap;


pub use error::{LayoutError, TextMeshError, TextMeshResult};
pub use font::{BitmapFont, BitmapFontDesc, BitmapGlyph, DistanceField, FontCommon, FontInfo, Kerning};
pub use text_config::{TextAlign, TextLayoutConfig, TextLayoutOptions, WrapMode};
pub use text_geometry::{BitmapTextGenerator, GeometryGenerator, TextBounds, TextGeometry};
pub use text_layout::{PlacedGlyph, TextLayout, TextLayoutMetrics};
pub use text_mesh::TextMeshAtlas;
pub use text_style::TextStyle;
pub use word_wrap::{wrap_lines, WrappedLine};
