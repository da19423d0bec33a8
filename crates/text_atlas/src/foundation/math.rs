//! Math utilities and types
//!
//! Color vector type and the scalar helpers the shading reference needs.

pub use nalgebra::Vector3;

/// 3D vector type, used for RGB colors
pub type Vec3 = Vector3<f32>;

/// Opaque white, the default text color
pub fn white() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// Convert a packed `0xRRGGBB` value into an RGB color in the 0.0-1.0 range
///
/// Bits above the low 24 are ignored.
///
/// # Example
///
/// ```
/// use text_atlas::foundation::math::rgb_from_hex;
///
/// let red = rgb_from_hex(0xFF0000);
/// assert_eq!(red.x, 1.0);
/// assert_eq!(red.y, 0.0);
/// ```
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| f32::from(((hex >> shift) & 0xFF) as u8) / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Pack an RGB color back into `0xRRGGBB`, clamping each channel
pub fn rgb_to_hex(color: &Vec3) -> u32 {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(color.x) << 16) | (channel(color.y) << 8) | channel(color.z)
}

/// Hermite interpolation between two edges, matching GLSL `smoothstep`
///
/// GLSL leaves `edge0 >= edge1` undefined; here it degrades to a hard step
/// at `edge0` so a zero smoothing width stays usable.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Median of three values
pub fn median(r: f32, g: f32, b: f32) -> f32 {
    r.min(g).max(r.max(g).min(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_conversion() {
        let color = rgb_from_hex(0x33_80_FF);
        assert_relative_eq!(color.x, 0x33 as f32 / 255.0);
        assert_relative_eq!(color.y, 0x80 as f32 / 255.0);
        assert_relative_eq!(color.z, 1.0);
        assert_eq!(rgb_to_hex(&color), 0x33_80_FF);
        assert_eq!(rgb_from_hex(0xFF_FF_FF_FF), white());
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_relative_eq!(smoothstep(0.3, 0.5, 0.2), 0.0);
        assert_relative_eq!(smoothstep(0.3, 0.5, 0.4), 0.5, epsilon = 1e-5);
        assert_relative_eq!(smoothstep(0.3, 0.5, 0.9), 1.0);

        // Zero width behaves like step()
        assert_relative_eq!(smoothstep(0.4, 0.4, 0.39), 0.0);
        assert_relative_eq!(smoothstep(0.4, 0.4, 0.4), 1.0);
    }

    #[test]
    fn test_median() {
        assert_relative_eq!(median(0.1, 0.9, 0.5), 0.5);
        assert_relative_eq!(median(0.9, 0.1, 0.2), 0.2);
        assert_relative_eq!(median(0.7, 0.7, 0.0), 0.7);
    }
}
