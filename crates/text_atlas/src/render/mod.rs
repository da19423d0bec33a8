//! Rendering data: mesh primitives, materials and atlas text
//!
//! Nothing here talks to a GPU API. The host renderer uploads the meshes,
//! shader sources and uniform blocks produced by these modules.

pub mod primitives;
pub mod resources;
pub mod text;
