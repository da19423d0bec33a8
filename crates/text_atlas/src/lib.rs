//! # Text Atlas
//!
//! Text meshes rendered from pre-baked font atlases.
//!
//! ## Features
//!
//! - **Bitmap, SDF and MSDF atlases**: one fragment program per render mode
//! - **Word wrapping and alignment**: greedy, preserved and unwrapped lines
//! - **Live updates**: layout writes regenerate the mesh in place
//! - **File-backed fonts and styles**: BMFont metadata and styles in TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use text_atlas::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let font = Arc::new(BitmapFont::load_from_file("resources/font.ron")?);
//!     let options = TextLayoutOptions::with_font(font).text("Hi").width(200.0);
//!
//!     let mut text = TextMeshAtlas::new(options, TextureHandle(0), RenderMode::Msdf, white())?;
//!     text.set_color_hex(0xFF0000);
//!     text.set_align(TextAlign::Left)?;
//!
//!     println!("{} triangles", text.mesh().triangle_count());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        foundation::math::{rgb_from_hex, white, Vec3},
        render::{
            primitives::{Mesh, Vertex},
            resources::materials::{RenderMode, ShaderProgram, TextMaterial, TextureHandle},
            text::{
                BitmapFont, BitmapTextGenerator, GeometryGenerator, LayoutError, TextAlign,
                TextGeometry, TextLayoutConfig, TextLayoutOptions, TextMeshAtlas, TextMeshError,
                TextMeshResult, TextStyle, WrapMode,
            },
        },
    };
}
