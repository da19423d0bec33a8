//! Text material and shader program selection
//!
//! Every text mesh draws with one fixed vertex stage and one of three
//! fragment stages. The fragment stage is picked by [`RenderMode`] when the
//! material is created and never changes afterwards.

use serde::{Deserialize, Serialize};

use super::{FilterMode, TextMaterialUBO, TextureHandle};
use crate::foundation::math::{self, Vec3};

const TEXT_VERTEX_SHADER: &str = include_str!("../../../../shaders/text.vert");
const BITMAP_FRAGMENT_SHADER: &str = include_str!("../../../../shaders/bitmap.frag");
const SDF_FRAGMENT_SHADER: &str = include_str!("../../../../shaders/sdf.frag");
const MSDF_FRAGMENT_SHADER: &str = include_str!("../../../../shaders/msdf.frag");

/// Default distance threshold for SDF glyph edges
pub const DEFAULT_THRESHOLD: f32 = 0.4;

/// Default smoothing width around the SDF threshold
pub const DEFAULT_SMOOTHING: f32 = 0.0;

/// How the atlas texture encodes glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain coverage bitmap, sampled directly
    #[default]
    Bitmap,
    /// Single-channel signed distance field
    Sdf,
    /// Multi-channel signed distance field
    Msdf,
}

impl RenderMode {
    /// Every mode, in uniform index order
    pub const ALL: [Self; 3] = [Self::Bitmap, Self::Sdf, Self::Msdf];

    /// Get the shader variant name for this mode
    pub const fn shader_variant(self) -> &'static str {
        match self {
            Self::Bitmap => "bitmap",
            Self::Sdf => "sdf",
            Self::Msdf => "msdf",
        }
    }

    /// Index written into the material uniform block
    pub const fn index(self) -> u32 {
        match self {
            Self::Bitmap => 0,
            Self::Sdf => 1,
            Self::Msdf => 2,
        }
    }

    /// GLSL source of the fragment stage for this mode
    pub const fn fragment_source(self) -> &'static str {
        match self {
            Self::Bitmap => BITMAP_FRAGMENT_SHADER,
            Self::Sdf => SDF_FRAGMENT_SHADER,
            Self::Msdf => MSDF_FRAGMENT_SHADER,
        }
    }

    /// Sampler filtering the atlas texture should be created with
    ///
    /// Distance fields only work when the distance is interpolated.
    pub const fn filter_mode(self) -> FilterMode {
        match self {
            Self::Bitmap => FilterMode::Nearest,
            Self::Sdf | Self::Msdf => FilterMode::Linear,
        }
    }

    /// Check if this mode needs screen-space derivatives
    pub const fn requires_derivatives(self) -> bool {
        matches!(self, Self::Msdf)
    }

    /// CPU reference of the fragment stage's alpha for one atlas sample
    ///
    /// `sample` is the RGBA texel in the 0.0-1.0 range. The result is the
    /// glyph coverage before material opacity is applied.
    pub fn coverage(self, sample: [f32; 4], params: CoverageParams) -> f32 {
        match self {
            Self::Bitmap => sample[3],
            Self::Sdf => math::smoothstep(
                params.threshold - params.smoothing,
                params.threshold + params.smoothing,
                sample[3],
            ),
            Self::Msdf => {
                let sig_dist =
                    math::median(1.0 - sample[0], 1.0 - sample[1], 1.0 - sample[2]) - 0.5;
                let alpha = if params.fwidth > 0.0 {
                    (sig_dist / params.fwidth + 0.5).clamp(0.0, 1.0)
                } else if sig_dist < 0.0 {
                    0.0
                } else {
                    1.0
                };
                1.0 - alpha
            }
        }
    }
}

/// Uniform inputs to [`RenderMode::coverage`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageParams {
    /// SDF edge threshold
    pub threshold: f32,
    /// SDF smoothing half-width
    pub smoothing: f32,
    /// Screen-space derivative of the MSDF signed distance, `fwidth()` on GPU
    pub fwidth: f32,
}

impl Default for CoverageParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            smoothing: DEFAULT_SMOOTHING,
            fwidth: 1.0,
        }
    }
}

/// Pair of shader stages bound by a text material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderProgram {
    /// Mode the fragment stage implements
    pub mode: RenderMode,
    /// Shared vertex stage source
    pub vertex_source: &'static str,
    /// Mode-specific fragment stage source
    pub fragment_source: &'static str,
}

impl ShaderProgram {
    /// Resolve the program for a render mode
    pub const fn for_mode(mode: RenderMode) -> Self {
        Self {
            mode,
            vertex_source: TEXT_VERTEX_SHADER,
            fragment_source: mode.fragment_source(),
        }
    }
}

/// Shader-backed material for atlas text
///
/// Holds the shading-affecting state of a text mesh. Writing any of it only
/// changes uniforms; geometry is never touched from here.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMaterial {
    program: ShaderProgram,
    texture: TextureHandle,
    color: Vec3,
    opacity: f32,
    threshold: f32,
    smoothing: f32,
    /// Optional name for debugging
    pub name: Option<String>,
}

impl TextMaterial {
    /// Create a material for an atlas texture with default uniforms
    pub const fn new(mode: RenderMode, texture: TextureHandle, color: Vec3) -> Self {
        Self {
            program: ShaderProgram::for_mode(mode),
            texture,
            color,
            opacity: 1.0,
            threshold: DEFAULT_THRESHOLD,
            smoothing: DEFAULT_SMOOTHING,
            name: None,
        }
    }

    /// Set the material name for debugging
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Render mode chosen at creation
    pub const fn mode(&self) -> RenderMode {
        self.program.mode
    }

    /// Bound shader program
    pub const fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Atlas texture handle
    pub const fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Text tint color
    pub const fn color(&self) -> &Vec3 {
        &self.color
    }

    /// Set the text tint color
    pub fn set_color(&mut self, color: Vec3) {
        log::trace!("Text material color -> {:?}", color);
        self.color = color;
    }

    /// Overall opacity multiplier
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the opacity multiplier, clamped to 0.0-1.0
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// SDF edge threshold
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Set the SDF edge threshold
    pub fn set_threshold(&mut self, threshold: f32) {
        log::trace!("Text material threshold -> {}", threshold);
        self.threshold = threshold;
    }

    /// SDF smoothing half-width
    pub const fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Set the SDF smoothing half-width
    pub fn set_smoothing(&mut self, smoothing: f32) {
        log::trace!("Text material smoothing -> {}", smoothing);
        self.smoothing = smoothing;
    }

    /// Uniform block for GPU upload
    pub fn ubo(&self) -> TextMaterialUBO {
        TextMaterialUBO::from_material(self)
    }

    /// CPU reference of the full fragment output for one atlas sample
    ///
    /// Returns premultiplication-free RGBA: bitmap mode tints the sampled
    /// texel, distance field modes output the flat color with computed alpha.
    pub fn shade(&self, sample: [f32; 4], fwidth: f32) -> [f32; 4] {
        let params = CoverageParams {
            threshold: self.threshold,
            smoothing: self.smoothing,
            fwidth,
        };
        let alpha = self.mode().coverage(sample, params) * self.opacity;

        match self.mode() {
            RenderMode::Bitmap => [
                sample[0] * self.color.x,
                sample[1] * self.color.y,
                sample[2] * self.color.z,
                alpha,
            ],
            RenderMode::Sdf | RenderMode::Msdf => [self.color.x, self.color.y, self.color.z, alpha],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{rgb_from_hex, white};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_uniforms() {
        let material = TextMaterial::new(RenderMode::Sdf, TextureHandle(7), rgb_from_hex(0xFF0000));

        assert_eq!(material.mode(), RenderMode::Sdf);
        assert_eq!(material.texture(), TextureHandle(7));
        assert_relative_eq!(material.threshold(), 0.4);
        assert_relative_eq!(material.smoothing(), 0.0);
        assert_relative_eq!(material.opacity(), 1.0);
        assert_eq!(*material.color(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_program_matches_mode() {
        for mode in RenderMode::ALL {
            let program = ShaderProgram::for_mode(mode);
            assert_eq!(program.mode, mode);
            assert_eq!(program.vertex_source, TEXT_VERTEX_SHADER);
            assert_eq!(program.fragment_source, mode.fragment_source());
        }

        assert!(SDF_FRAGMENT_SHADER.contains("smoothstep"));
        assert!(MSDF_FRAGMENT_SHADER.contains("median"));
        assert!(MSDF_FRAGMENT_SHADER.contains("fwidth"));
        assert!(!BITMAP_FRAGMENT_SHADER.contains("smoothstep"));
    }

    #[test]
    fn test_default_mode_is_bitmap() {
        assert_eq!(RenderMode::default(), RenderMode::Bitmap);
        assert_eq!(RenderMode::Bitmap.shader_variant(), "bitmap");
        assert_eq!(RenderMode::Msdf.index(), 2);
    }

    #[test]
    fn test_filter_and_derivative_requirements() {
        assert_eq!(RenderMode::Bitmap.filter_mode(), FilterMode::Nearest);
        assert_eq!(RenderMode::Sdf.filter_mode(), FilterMode::Linear);
        assert!(RenderMode::Msdf.requires_derivatives());
        assert!(!RenderMode::Sdf.requires_derivatives());
    }

    #[test]
    fn test_bitmap_coverage_is_texel_alpha() {
        let params = CoverageParams::default();
        assert_relative_eq!(RenderMode::Bitmap.coverage([0.2, 0.2, 0.2, 0.75], params), 0.75);
    }

    #[test]
    fn test_sdf_coverage_uses_threshold_and_smoothing() {
        let hard = CoverageParams { threshold: 0.5, smoothing: 0.0, fwidth: 1.0 };
        assert_relative_eq!(RenderMode::Sdf.coverage([0.0, 0.0, 0.0, 0.49], hard), 0.0);
        assert_relative_eq!(RenderMode::Sdf.coverage([0.0, 0.0, 0.0, 0.51], hard), 1.0);

        let soft = CoverageParams { threshold: 0.5, smoothing: 0.1, fwidth: 1.0 };
        assert_relative_eq!(RenderMode::Sdf.coverage([0.0, 0.0, 0.0, 0.5], soft), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_sdf_program_hard_steps_without_smoothing() {
        // The GPU stage must agree with the CPU reference at zero smoothing
        let source = RenderMode::Sdf.fragment_source();
        assert!(source.contains("smoothing > 0.0"));
        assert!(source.contains("step(threshold, distance)"));

        let hard = CoverageParams { threshold: 0.4, smoothing: 0.0, fwidth: 1.0 };
        assert_relative_eq!(RenderMode::Sdf.coverage([0.0, 0.0, 0.0, 0.4], hard), 1.0);
        assert_relative_eq!(RenderMode::Sdf.coverage([0.0, 0.0, 0.0, 0.399], hard), 0.0);
    }

    #[test]
    fn test_msdf_coverage_uses_channel_median() {
        let params = CoverageParams { fwidth: 0.1, ..Default::default() };

        // Median well inside the glyph
        assert_relative_eq!(RenderMode::Msdf.coverage([0.9, 0.8, 0.1, 0.0], params), 1.0);
        // Median well outside
        assert_relative_eq!(RenderMode::Msdf.coverage([0.1, 0.2, 0.9, 1.0], params), 0.0);
        // Exactly on the edge
        assert_relative_eq!(RenderMode::Msdf.coverage([0.5, 0.5, 0.5, 0.0], params), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_shade_applies_color_and_opacity() {
        let mut material = TextMaterial::new(RenderMode::Bitmap, TextureHandle(1), white());
        material.set_opacity(0.5);
        material.set_color(Vec3::new(0.5, 1.0, 1.0));

        let out = material.shade([1.0, 0.5, 1.0, 1.0], 1.0);
        assert_relative_eq!(out[0], 0.5);
        assert_relative_eq!(out[1], 0.5);
        assert_relative_eq!(out[3], 0.5);

        material.set_opacity(3.0);
        assert_relative_eq!(material.opacity(), 1.0);
    }
}
