//! Error types for text layout and text meshes

/// Result type for text mesh operations
pub type TextMeshResult<T> = Result<T, TextMeshError>;

/// Errors raised while turning a layout config into geometry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The atlas texture size cannot be used to normalize UVs
    #[error("Invalid atlas size {width}x{height}")]
    InvalidAtlasSize {
        /// Atlas width from the font's common block
        width: f32,
        /// Atlas height from the font's common block
        height: f32,
    },

    /// Line or glyph metrics are malformed
    #[error("Invalid font metrics{}: {reason}", .id.map(|id| format!(" for glyph {id}")).unwrap_or_default())]
    InvalidMetrics {
        /// Offending glyph, `None` for font-wide metrics
        id: Option<u32>,
        /// What is wrong with the metrics
        reason: String,
    },
}

/// Errors that can occur while building or updating a text mesh
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextMeshError {
    /// The layout options are incomplete, e.g. no font was given
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The geometry generator rejected the current config
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}
