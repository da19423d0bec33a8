//! Core primitive types for rendering
//!
//! Backend-agnostic geometry containers the text mesh hands to the host
//! renderer.

pub mod mesh;

// Re-export commonly used types
pub use mesh::{Mesh, Vertex};
