//! SVG rasterization for the WeChat article renderer.
//!
//! WeChat's renderer does not display SVG, and the servers that render
//! article previews rarely carry the fonts an SVG was authored with. This
//! module closes both gaps:
//!
//! - [`fallback`]: rewrites the SVG source so every text-bearing element
//!   falls back to a stack of CJK-capable font families
//! - [`convert`]: rasterizes the rewritten SVG to a JPEG artifact, cached
//!   on disk by modification time
//!
//! # Architecture
//!
//! ```text
//! SVG source file
//!         │
//!         ▼
//!    ┌──────────┐
//!    │ fallback │ ──► inject font-family style block (idempotent)
//!    └────┬─────┘
//!         │
//!         ▼
//!    ┌─────────┐
//!    │ convert │ ──► usvg/resvg render, white flatten, JPEG q95
//!    └────┬────┘
//!         │
//!         ▼
//!    data/svg/<stem>.jpg (reused while newer than the source)
//! ```

pub mod convert;
pub mod fallback;

pub use convert::{RasterOptions, convert_svg_to_jpg, ensure_raster_image};
pub use fallback::{inject_font_fallback, load_svg_with_fallback};

/// Check whether a path names an SVG file (case-insensitive extension).
pub fn is_svg_path(path: &std::path::Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::is_svg_path;

    #[test]
    fn test_is_svg_path() {
        assert!(is_svg_path(Path::new("diagram.svg")));
        assert!(is_svg_path(Path::new("DIAGRAM.SVG")));
        assert!(is_svg_path(Path::new("dir.svg/photo.Svg")));
        assert!(!is_svg_path(Path::new("photo.jpg")));
        assert!(!is_svg_path(Path::new("photo.svg.png")));
        assert!(!is_svg_path(Path::new("no_extension")));
    }
}
