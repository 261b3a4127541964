//! SVG to JPEG conversion with an mtime artifact cache.
//!
//! The WeChat uploader only accepts raster formats, so SVG references are
//! converted up front. Artifacts land in a flat output directory named by
//! source stem and are reused while they are at least as new as their
//! source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use resvg::tiny_skia;

use super::fallback::load_svg_with_fallback;
use super::is_svg_path;
use crate::freshness;

/// JPEG quality for produced artifacts.
pub const JPEG_QUALITY: u8 = 95;

/// Options for SVG rasterization.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Directory artifacts are written into, created on demand.
    pub out_dir: PathBuf,
    /// Quality for JPEG encoding (0-100).
    pub quality: u8,
    /// DPI for unit resolution while parsing.
    pub dpi: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data/svg"),
            quality: JPEG_QUALITY,
            dpi: 96.0,
        }
    }
}

/// Ensure an image reference points at a raster file.
///
/// Non-SVG paths (case-insensitive extension check) pass through
/// untouched, without any filesystem access. SVG paths go through
/// [`convert_svg_to_jpg`]; on any failure the error is logged and the
/// original path is returned so a publishing pipeline can proceed in
/// degraded mode instead of halting.
pub fn ensure_raster_image(image_path: &Path, options: &RasterOptions) -> PathBuf {
    if !is_svg_path(image_path) {
        return image_path.to_path_buf();
    }

    match convert_svg_to_jpg(image_path, options) {
        Ok(jpg_path) => jpg_path,
        Err(err) => {
            log::warn!(
                "svg conversion failed: source={} error={err:#}",
                image_path.display()
            );
            image_path.to_path_buf()
        }
    }
}

/// Convert an SVG file to a JPEG artifact and return the artifact path.
///
/// The artifact is `<out_dir>/<stem>.jpg`. An existing artifact at least
/// as new as the source is returned without re-encoding. Concurrent calls
/// on the same source are not coordinated: both may regenerate, the last
/// writer wins, and the output is deterministic per input.
pub fn convert_svg_to_jpg(svg_path: &Path, options: &RasterOptions) -> Result<PathBuf> {
    fs::create_dir_all(&options.out_dir).with_context(|| {
        format!(
            "Failed to create output directory `{}`",
            options.out_dir.display()
        )
    })?;

    let stem = svg_path
        .file_stem()
        .with_context(|| format!("SVG path `{}` has no file name", svg_path.display()))?;
    // Not `set_extension`: a stem like `a.b` must become `a.b.jpg`.
    let mut jpg_name = stem.to_os_string();
    jpg_name.push(".jpg");
    let jpg_path = options.out_dir.join(jpg_name);

    let source_mtime = freshness::get_mtime(svg_path)
        .with_context(|| format!("Failed to stat SVG `{}`", svg_path.display()))?;
    if freshness::is_artifact_fresh(&jpg_path, source_mtime) {
        log::debug!("svg cache hit: {}", jpg_path.display());
        return Ok(jpg_path);
    }

    let svg_bytes = load_svg_with_fallback(svg_path)?;
    let jpeg_bytes = render_jpeg(&svg_bytes, options)?;

    // All transforms succeeded; a failure before this point leaves any
    // pre-existing artifact untouched.
    fs::write(&jpg_path, jpeg_bytes)
        .with_context(|| format!("Failed to write artifact `{}`", jpg_path.display()))?;

    Ok(jpg_path)
}

/// Render SVG bytes to an encoded JPEG buffer.
fn render_jpeg(svg_data: &[u8], options: &RasterOptions) -> Result<Vec<u8>> {
    let mut usvg_options = usvg::Options {
        dpi: options.dpi,
        ..Default::default()
    };
    usvg_options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_data(svg_data, &usvg_options).context("Failed to parse SVG")?;

    let size = tree.size();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (width, height) = (size.width().ceil() as u32, size.height().ceil() as u32);
    if width == 0 || height == 0 {
        anyhow::bail!("Invalid SVG dimensions: {}x{}", size.width(), size.height());
    }

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).context("Failed to allocate pixmap")?;
    // Pre-fill with opaque white: rendering composites onto it, which
    // flattens any alpha the SVG produces (JPEG has no alpha channel).
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgb = pixmap_to_rgb(&pixmap)?;

    let mut jpeg_bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_bytes, options.quality);
    rgb.write_with_encoder(encoder)
        .context("Failed to encode JPEG")?;
    Ok(jpeg_bytes)
}

/// Drop the alpha channel of a rendered pixmap.
///
/// The pixmap is opaque after the white pre-fill, but demultiplication is
/// still applied before discarding alpha.
fn pixmap_to_rgb(pixmap: &tiny_skia::Pixmap) -> Result<image::RgbImage> {
    let mut buf = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        buf.extend_from_slice(&[color.red(), color.green(), color.blue()]);
    }
    image::RgbImage::from_raw(pixmap.width(), pixmap.height(), buf)
        .context("Pixmap buffer size mismatch")
}
