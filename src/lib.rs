//! Newsframe renders headline graphics for social feeds.
//!
//! A render takes a headline, an optional subheading and background image, and a template
//! configuration, and produces either:
//!
//! - an opaque PNG post ([`Renderer::render`]), or
//! - a transparent PNG overlay with the same layout for compositing over video
//!   ([`Renderer::render_overlay`]).
//!
//! The headline is fitted to the largest font size that wraps into the configured line cap, and
//! a run of words starting at the first one is marked with a colored badge whose color is
//! guaranteed light enough for dark text.
#![forbid(unsafe_code)]

mod assets;
mod color;
mod compose;
mod config;
mod foundation;
mod layout;
mod pipeline;
mod render;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8};
pub use crate::foundation::error::{NewsframeError, NewsframeResult};

pub use crate::assets::decode::{decode_image, encode_png, load_image_file};
pub use crate::assets::font::{
    FixedAdvance, FontFace, FontMetrics, FontOrigin, FontWeight, TextEngine, TextMeasure,
};
pub use crate::color::accent::{
    AccentColor, LIGHT_THRESHOLD, force_light_color, is_light, resolve_accent_color,
};
pub use crate::color::names::{NamedColorMatch, lookup_color_name};
pub use crate::color::palette::{PaletteEntry, dominant_palette};
pub use crate::compose::background::{
    BackgroundKind, apply_gradient, cover_crop, gradient_overlay, prepare_background,
};
pub use crate::compose::logo::{load_logo, stamp_logo};
pub use crate::config::loader::{
    ConfigLoader, FileConfigLoader, StaticConfigLoader, USER_TEMPLATE_FILE, merge_json,
};
pub use crate::config::model::{LayoutConfig, LogoPlacement, TemplateConfig};
pub use crate::layout::footer::{FooterPlan, plan_footer, wrap_by_chars};
pub use crate::layout::headline::{
    BadgePadding, HeadlineParams, HeadlinePlan, HighlightStrategy, PlacedLine, PlacedWord,
    plan_headline, resolve_span_end,
};
pub use crate::pipeline::archive::{Archive, ArchiveRecord, safe_title};
pub use crate::pipeline::render::{RenderOutput, RenderReport, Renderer};
pub use crate::pipeline::request::{BackgroundSource, ImageFetcher, NoFetcher, RenderRequest};
pub use crate::render::footer::draw_footer;
pub use crate::render::headline::draw_headline;
pub use crate::render::surface::TextLayer;
