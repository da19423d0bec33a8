//! Text mesh backed by a font atlas
//!
//! [`TextMeshAtlas`] owns a layout config, the mesh generated from it and a
//! [`TextMaterial`] bound to one render mode. Layout writes regenerate the
//! mesh before returning; shading writes only touch the material uniforms.

use std::sync::Arc;

use super::{
    BitmapFont, BitmapTextGenerator, GeometryGenerator, TextAlign, TextGeometry, TextLayoutConfig,
    TextLayoutMetrics, TextLayoutOptions, TextMeshResult, TextStyle, WrapMode,
};
use crate::foundation::math::{rgb_from_hex, Vec3};
use crate::render::primitives::Mesh;
use crate::render::resources::materials::{
    RenderMode, ShaderProgram, TextMaterial, TextMaterialUBO, TextureHandle,
};

/// A block of text drawn from a bitmap, SDF or MSDF atlas
///
/// Invariant: `geometry` is always what the generator produces for
/// `config`. A layout write that fails leaves both untouched.
#[derive(Debug)]
pub struct TextMeshAtlas<G: GeometryGenerator = BitmapTextGenerator> {
    config: TextLayoutConfig,
    generator: G,
    geometry: TextGeometry,
    mesh: Mesh,
    material: TextMaterial,
}

impl TextMeshAtlas<BitmapTextGenerator> {
    /// Create a text mesh with the stock quad generator
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Configuration`](super::TextMeshError::Configuration)
    /// when `options` has no font, or a layout error when the font cannot be
    /// turned into geometry.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use text_atlas::prelude::*;
    ///
    /// # fn run(font: BitmapFont) -> TextMeshResult<()> {
    /// let options = TextLayoutOptions::with_font(Arc::new(font)).text("Hi").width(200.0);
    /// let mut text = TextMeshAtlas::new(options, TextureHandle(1), RenderMode::Sdf, white())?;
    /// text.set_text("Hello")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        options: TextLayoutOptions,
        texture: TextureHandle,
        mode: RenderMode,
        color: Vec3,
    ) -> TextMeshResult<Self> {
        Self::with_generator(options, texture, mode, color, BitmapTextGenerator::default())
    }
}

impl<G: GeometryGenerator> TextMeshAtlas<G> {
    /// Create a text mesh with a custom geometry generator
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Configuration`](super::TextMeshError::Configuration)
    /// when `options` has no font, or a layout error when `generator` cannot
    /// build geometry for it.
    pub fn with_generator(
        options: TextLayoutOptions,
        texture: TextureHandle,
        mode: RenderMode,
        color: Vec3,
        generator: G,
    ) -> TextMeshResult<Self> {
        let config = TextLayoutConfig::from_options(options)?;
        let geometry = generator.generate(&config)?;

        let mut mesh = Mesh::default();
        mesh.replace(geometry.vertices(), &geometry.indices);

        log::debug!(
            "Created {:?} text mesh: {} glyphs, {} lines",
            mode,
            geometry.quad_count(),
            geometry.metrics.lines_total
        );

        Ok(Self {
            config,
            generator,
            geometry,
            mesh,
            material: TextMaterial::new(mode, texture, color),
        })
    }

    /// Regenerate the mesh from the current config
    ///
    /// Running it twice in a row yields identical geometry.
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the current config; the mesh is left as it was.
    pub fn update_geometry(&mut self) -> TextMeshResult<()> {
        let geometry = self.generator.generate(&self.config)?;
        self.commit(geometry);
        Ok(())
    }

    /// Apply a layout change and regenerate
    ///
    /// All layout setters go through here. If generation fails the previous
    /// config is restored and the error returned.
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn edit_layout<F>(&mut self, edit: F) -> TextMeshResult<()>
    where
        F: FnOnce(&mut TextLayoutConfig),
    {
        let previous = self.config.clone();
        edit(&mut self.config);

        match self.generator.generate(&self.config) {
            Ok(geometry) => {
                self.commit(geometry);
                Ok(())
            }
            Err(err) => {
                log::warn!("Text layout rejected, keeping previous config: {}", err);
                self.config = previous;
                Err(err.into())
            }
        }
    }

    fn commit(&mut self, geometry: TextGeometry) {
        self.mesh.replace(geometry.vertices(), &geometry.indices);
        log::debug!(
            "Regenerated text geometry: {} glyphs, {} lines, {}x{}",
            geometry.quad_count(),
            geometry.metrics.lines_total,
            geometry.metrics.width,
            geometry.metrics.height
        );
        self.geometry = geometry;
    }

    /// Apply a loaded style
    ///
    /// Layout values are applied with a single regeneration; shading values
    /// go to the material. A style authored for another render mode is still
    /// applied, with a warning.
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// style's layout values are rejected; nothing from the style is applied.
    pub fn apply_style(&mut self, style: &TextStyle) -> TextMeshResult<()> {
        if let Some(mode) = style.mode.filter(|&mode| mode != self.mode()) {
            log::warn!(
                "Style targets {:?} but this text renders as {:?}",
                mode,
                self.mode()
            );
        }

        if style.touches_layout() {
            self.edit_layout(|config| {
                if let Some(text) = &style.text {
                    config.set_text(text.as_str());
                }
                if let Some(width) = style.width {
                    config.set_width(width);
                }
                if let Some(align) = style.align {
                    config.set_align(align);
                }
                if let Some(line_height) = style.line_height {
                    config.set_line_height(line_height);
                }
                if let Some(letter_spacing) = style.letter_spacing {
                    config.set_letter_spacing(letter_spacing);
                }
                if let Some(wrap_mode) = style.wrap_mode {
                    config.set_wrap_mode(wrap_mode);
                }
                if let Some(tab_size) = style.tab_size {
                    config.set_tab_size(tab_size);
                }
            })?;
        }

        if let Some(color) = style.color() {
            self.material.set_color(color);
        }
        if let Some(threshold) = style.threshold {
            self.material.set_threshold(threshold);
        }
        if let Some(smoothing) = style.smoothing {
            self.material.set_smoothing(smoothing);
        }

        Ok(())
    }

    // Layout fields

    /// Font atlas metadata
    pub const fn font(&self) -> &Arc<BitmapFont> {
        self.config.font()
    }

    /// Swap the font and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_font(&mut self, font: Arc<BitmapFont>) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_font(font))
    }

    /// Text content
    pub fn text(&self) -> &str {
        self.config.text()
    }

    /// Replace the text content and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_text(&mut self, text: impl Into<String>) -> TextMeshResult<()> {
        let text = text.into();
        self.edit_layout(|config| config.set_text(text))
    }

    /// Distance between baselines
    pub const fn line_height(&self) -> f32 {
        self.config.line_height()
    }

    /// Set the distance between baselines and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_line_height(&mut self, line_height: f32) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_line_height(line_height))
    }

    /// Extra spacing after each glyph
    pub const fn letter_spacing(&self) -> f32 {
        self.config.letter_spacing()
    }

    /// Set the letter spacing and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_letter_spacing(&mut self, letter_spacing: f32) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_letter_spacing(letter_spacing))
    }

    /// Line alignment
    pub const fn align(&self) -> TextAlign {
        self.config.align()
    }

    /// Set the line alignment and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_align(&mut self, align: TextAlign) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_align(align))
    }

    /// Wrap width
    pub const fn width(&self) -> f32 {
        self.config.width()
    }

    /// Set the wrap width and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_width(&mut self, width: f32) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_width(width))
    }

    /// Wrapping behaviour
    pub const fn wrap_mode(&self) -> WrapMode {
        self.config.wrap_mode()
    }

    /// Set the wrapping behaviour and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_wrap_mode(&mut self, wrap_mode: WrapMode) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_wrap_mode(wrap_mode))
    }

    /// Tab width in space advances
    pub const fn tab_size(&self) -> u32 {
        self.config.tab_size()
    }

    /// Set the tab width and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_tab_size(&mut self, tab_size: u32) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_tab_size(tab_size))
    }

    /// Character range being laid out
    pub const fn range(&self) -> (Option<usize>, Option<usize>) {
        self.config.range()
    }

    /// Restrict layout to a character range and regenerate
    ///
    /// # Errors
    ///
    /// [`TextMeshError::Layout`](super::TextMeshError::Layout) when the
    /// generator rejects the new config; the previous config is kept.
    pub fn set_range(&mut self, start: Option<usize>, end: Option<usize>) -> TextMeshResult<()> {
        self.edit_layout(|config| config.set_range(start, end))
    }

    // Shading fields

    /// Tint color
    pub const fn color(&self) -> &Vec3 {
        self.material.color()
    }

    /// Set the tint color
    pub fn set_color(&mut self, color: Vec3) {
        self.material.set_color(color);
    }

    /// Set the tint from a packed `0xRRGGBB` value
    pub fn set_color_hex(&mut self, hex: u32) {
        self.material.set_color(rgb_from_hex(hex));
    }

    /// Distance field edge
    pub const fn threshold(&self) -> f32 {
        self.material.threshold()
    }

    /// Set the distance field edge
    pub fn set_threshold(&mut self, threshold: f32) {
        self.material.set_threshold(threshold);
    }

    /// Distance field edge softness
    pub const fn smoothing(&self) -> f32 {
        self.material.smoothing()
    }

    /// Set the distance field edge softness
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.material.set_smoothing(smoothing);
    }

    /// Opacity multiplier
    pub const fn opacity(&self) -> f32 {
        self.material.opacity()
    }

    /// Set the opacity multiplier
    pub fn set_opacity(&mut self, opacity: f32) {
        self.material.set_opacity(opacity);
    }

    // Pass-through accessors

    /// Complete layout config
    pub const fn config(&self) -> &TextLayoutConfig {
        &self.config
    }

    /// Drawable mesh
    pub const fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Flat geometry buffers
    pub const fn geometry(&self) -> &TextGeometry {
        &self.geometry
    }

    /// Metrics of the current layout
    pub const fn metrics(&self) -> &TextLayoutMetrics {
        &self.geometry.metrics
    }

    /// Material bound at construction
    pub const fn material(&self) -> &TextMaterial {
        &self.material
    }

    /// Render mode, fixed for the life of the mesh
    pub const fn mode(&self) -> RenderMode {
        self.material.mode()
    }

    /// Atlas texture
    pub const fn texture(&self) -> TextureHandle {
        self.material.texture()
    }

    /// Shader program for the render mode
    pub const fn shader_program(&self) -> &ShaderProgram {
        self.material.program()
    }

    /// Uniform block for the material
    pub fn material_ubo(&self) -> TextMaterialUBO {
        self.material.ubo()
    }

    /// Geometry generator
    pub const fn generator(&self) -> &G {
        &self.generator
    }
}
