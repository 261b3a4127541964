//! CJK font-fallback injection for SVG text.
//!
//! SVGs authored on one machine routinely name fonts the rendering host
//! does not have. Before rasterizing, a `<style>` block is injected that
//! forces every text-bearing element onto a stack of widely available
//! CJK families, ending in generic `sans-serif`. The block carries a
//! sentinel attribute so a second pass leaves an already-processed
//! document untouched.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// Preferred font families, most specific first. Whatever is installed
/// wins; `sans-serif` closes the stack.
pub const FALLBACK_FONT_FAMILIES: &[&str] = &[
    "PingFang SC",
    "Heiti SC",
    "STHeiti",
    "Hiragino Sans GB",
    "Microsoft YaHei",
    "SimHei",
    "Source Han Sans SC",
    "Noto Sans CJK SC",
    "WenQuanYi Micro Hei",
];

/// Sentinel attribute on the injected style block. Its presence anywhere
/// in a document marks it as already processed.
pub const FALLBACK_MARKER: &str = r#"data-wechat-font-fallback="true""#;

/// First `<svg ...>` open tag, case-insensitive.
static SVG_OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<svg[^>]*>").expect("valid SVG tag pattern"));

/// Build the CSS rule forcing the fallback stack onto text-bearing
/// elements: `text`, `tspan`, `foreignObject`, everything via `*`, and
/// the `.t` / `.f` class names some exporters emit.
fn build_font_fallback_css() -> String {
    let family_stack = FALLBACK_FONT_FAMILIES
        .iter()
        .map(|name| format!("\"{name}\""))
        .chain(std::iter::once("\"sans-serif\"".to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("text, tspan, foreignObject, *, .t, .f {{ font-family: {family_stack} !important; }}")
}

/// Inject the fallback style block into an SVG document.
///
/// Idempotent: a document carrying [`FALLBACK_MARKER`] is returned
/// unmodified. Insertion position, in priority order:
///
/// 1. immediately before the first `<style` open tag;
/// 2. immediately after the first `<svg ...>` open tag;
/// 3. prepended to the document (no root tag found).
pub fn inject_font_fallback(svg_text: &str) -> Cow<'_, str> {
    if svg_text.contains(FALLBACK_MARKER) {
        return Cow::Borrowed(svg_text);
    }

    let style_block = format!(
        r#"<style type="text/css" {FALLBACK_MARKER}>{}</style>"#,
        build_font_fallback_css()
    );

    let insert_pos = if let Some(pos) = svg_text.find("<style") {
        pos
    } else if let Some(m) = SVG_OPEN_TAG.find(svg_text) {
        m.end()
    } else {
        0
    };

    let mut patched = String::with_capacity(svg_text.len() + style_block.len());
    patched.push_str(&svg_text[..insert_pos]);
    patched.push_str(&style_block);
    patched.push_str(&svg_text[insert_pos..]);
    Cow::Owned(patched)
}

/// Read an SVG file and inject the fallback fonts when absent.
///
/// Decoding is strict UTF-8 first; on invalid byte sequences it falls
/// back to lossy decoding instead of failing. Returns UTF-8 bytes ready
/// for the rasterizer.
pub fn load_svg_with_fallback(svg_path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(svg_path)
        .with_context(|| format!("Failed to read SVG `{}`", svg_path.display()))?;

    let svg_text = match String::from_utf8(raw) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };

    Ok(inject_font_fallback(&svg_text).into_owned().into_bytes())
}
