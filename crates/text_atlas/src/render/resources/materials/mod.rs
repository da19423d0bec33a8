//! Material system
//!
//! Text material definitions, shader program selection and the uniform
//! block uploaded for them.

pub mod material;
pub mod material_ubo;
pub mod texture;

// Re-export commonly used types
pub use material::{CoverageParams, RenderMode, ShaderProgram, TextMaterial};
pub use material_ubo::TextMaterialUBO;
pub use texture::{FilterMode, TextureHandle};
