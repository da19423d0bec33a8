//! Text atlas demo
//!
//! Loads a BMFont description and an optional style, builds a text mesh and
//! logs what a renderer would upload. Usage:
//!
//! ```text
//! text_demo [font.ron|font.toml] [style.toml|style.ron]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use text_atlas::foundation::logging;
use text_atlas::foundation::math::rgb_to_hex;
use text_atlas::prelude::*;
use text_atlas::render::resources::materials::FilterMode;

const DEFAULT_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/demo_font.ron");
const DEFAULT_STYLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/demo_style.toml");

/// Errors surfaced by the demo
#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Text(#[from] TextMeshError),
}

fn load<T: Config>(path: PathBuf) -> Result<T, DemoError> {
    T::load_from_file(&path).map_err(|source| DemoError::Load { path, source })
}

/// Mode implied by the font's distance field block
fn font_mode(font: &BitmapFont) -> RenderMode {
    match font.distance_field().map(|field| field.field_type.as_str()) {
        Some("msdf") => RenderMode::Msdf,
        Some("sdf" | "psdf") => RenderMode::Sdf,
        _ => RenderMode::Bitmap,
    }
}

fn report(label: &str, text: &TextMeshAtlas) {
    let metrics = text.metrics();
    let bounds = text.geometry().bounds;
    log::info!(
        "[{}] {} lines, {} glyphs, {} triangles, block {}x{}, bounds {:.1}x{:.1}",
        label,
        metrics.lines_total,
        metrics.glyph_count,
        text.mesh().triangle_count(),
        metrics.width,
        metrics.height,
        bounds.width(),
        bounds.height()
    );
}

fn main() -> Result<(), DemoError> {
    logging::init("info");

    let mut args = std::env::args().skip(1);
    let font_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_FONT), PathBuf::from);
    let style_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_STYLE), PathBuf::from);

    let font: Arc<BitmapFont> = Arc::new(load(font_path)?);
    log::info!(
        "Loaded font '{}' ({} glyphs, {} kerning pairs)",
        font.info().face,
        font.chars().len(),
        font.kernings().len()
    );

    let style: TextStyle = if style_path.exists() {
        load(style_path)?
    } else {
        log::warn!("No style at {}, using defaults", style_path.display());
        TextStyle::default()
    };

    let mode = style.mode.unwrap_or_else(|| font_mode(&font));
    let color = style.color().unwrap_or_else(white);
    let options = style.layout_options(font.clone());

    let mut text = TextMeshAtlas::new(options, TextureHandle(0), mode, color)?;
    // Layout values already went in through the options
    text.apply_style(&style.shading())?;

    let program = text.shader_program();
    log::info!(
        "Render mode {:?}: '{}' fragment stage, {} texture filtering",
        text.mode(),
        program.mode.shader_variant(),
        match text.mode().filter_mode() {
            FilterMode::Nearest => "nearest",
            FilterMode::Linear => "linear",
        }
    );
    report("styled", &text);

    text.set_align(TextAlign::Right)?;
    text.set_width(text.width() / 2.0)?;
    report("narrow right", &text);

    text.set_wrap_mode(WrapMode::NoWrap)?;
    report("nowrap", &text);

    let ubo = text.material_ubo();
    log::info!(
        "Material: color #{:06X}, threshold {}, smoothing {}, derivatives {}",
        rgb_to_hex(text.color()),
        text.threshold(),
        text.smoothing(),
        text.mode().requires_derivatives()
    );
    log::info!(
        "Upload: {} vertex bytes, {} index bytes, {} uniform bytes",
        text.mesh().vertex_bytes().len(),
        text.mesh().index_bytes().len(),
        ubo.as_bytes().len()
    );

    Ok(())
}
