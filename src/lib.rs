//! wxpub - WeChat Official Account publishing toolkit.
//!
//! Two halves:
//!
//! - [`image`]: converts SVG assets into JPEGs that the WeChat article
//!   renderer can display, injecting a CJK font-fallback stack so embedded
//!   text survives on systems without the authored font. Artifacts are
//!   cached on disk and reused while they are at least as new as their
//!   source.
//! - [`wechat`]: blocking, sequential wrappers around the WeChat CMS API
//!   (access token with disk cache, permanent material upload and listing,
//!   draft-box management, publishing).
//!
//! The pieces compose but do not depend on each other: a publishing
//! pipeline calls [`ensure_raster_image`] on every image reference, then
//! uploads the returned path via [`WechatClient`].

pub mod config;
pub mod freshness;
pub mod image;
pub mod wechat;

pub use config::{Config, Credentials};
pub use self::image::svg::{RasterOptions, convert_svg_to_jpg, ensure_raster_image};
pub use wechat::{Article, MaterialType, WechatClient};
