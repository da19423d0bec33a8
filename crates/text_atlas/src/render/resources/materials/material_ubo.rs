//! Material Uniform Buffer Object for GPU data transfer
//!
//! Layout must match the `TextMaterial` uniform block declared in the
//! fragment shaders (set 1, binding 0).

use bytemuck::{Pod, Zeroable};

use super::TextMaterial;

/// Text material uniform data for GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextMaterialUBO {
    /// Tint color - RGB + opacity
    pub color: [f32; 4],
    /// threshold, smoothing, render mode index, unused
    pub params: [f32; 4],
}

impl TextMaterialUBO {
    /// Create from a text material
    pub fn from_material(material: &TextMaterial) -> Self {
        let color = material.color();
        Self {
            color: [color.x, color.y, color.z, material.opacity()],
            params: [
                material.threshold(),
                material.smoothing(),
                material.mode().index() as f32,
                0.0,
            ],
        }
    }

    /// Get a byte slice of this UBO for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
