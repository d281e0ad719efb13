use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rgb8};

/// Serde model of the nested template configuration bundle.
///
/// Every section and every key is optional; `{}` yields a fully renderable template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub canvas: CanvasSection,
    pub gradient: GradientSection,
    pub fonts: FontsSection,
    pub colors: ColorsSection,
    pub subheading: SubheadingSection,
    pub layout: LayoutSection,
    pub logo: LogoSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSection {
    pub width: u32,
    pub height: u32,
    pub bg_color: Rgb8,
    /// Per-canvas override of `gradient.height_ratio`.
    pub gradient_height: Option<f64>,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1350,
            bg_color: Rgb8::new(20, 20, 20),
            gradient_height: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientSection {
    pub height_ratio: f64,
    pub max_alpha: u8,
    pub start_color: Rgb8,
}

impl Default for GradientSection {
    fn default() -> Self {
        Self {
            height_ratio: 0.85,
            max_alpha: 255,
            start_color: Rgb8::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsSection {
    pub headline_path: String,
    pub headline_size_start: u32,
    pub headline_size_min: u32,
    pub headline_size_step: u32,
}

impl Default for FontsSection {
    fn default() -> Self {
        Self {
            headline_path: "arialbd.ttf".to_owned(),
            headline_size_start: 65,
            headline_size_min: 35,
            headline_size_step: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsSection {
    pub accent_default: Rgb8,
    pub text_headline_body: Rgb8,
    pub text_headline_box: Rgb8,
}

impl Default for ColorsSection {
    fn default() -> Self {
        Self {
            accent_default: Rgb8::new(0, 120, 215),
            text_headline_body: Rgb8::WHITE,
            text_headline_box: Rgb8::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubheadingSection {
    pub font_path: String,
    pub font_size: u32,
    pub color: Rgb8,
    pub margin_bottom: u32,
    /// Falls back to `layout.safe_zone_margin` when unset.
    pub margin_x: Option<u32>,
}

impl Default for SubheadingSection {
    fn default() -> Self {
        Self {
            font_path: "arial.ttf".to_owned(),
            font_size: 35,
            color: Rgb8::new(200, 200, 200),
            margin_bottom: 120,
            margin_x: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    pub safe_zone_margin: u32,
    pub element_spacing_y: u32,
    pub headline_summary_gap: u32,
    pub max_headline_lines: usize,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            safe_zone_margin: 50,
            element_spacing_y: 8,
            headline_summary_gap: 100,
            max_headline_lines: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoSection {
    pub path: String,
    pub target_width: u32,
    pub margin_top: i64,
    pub margin_left: i64,
}

impl Default for LogoSection {
    fn default() -> Self {
        Self {
            path: String::new(),
            target_width: 150,
            margin_top: 40,
            margin_left: 40,
        }
    }
}

/// Fully resolved settings consumed by the layout and render stages.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub canvas: Canvas,
    pub bg_color: Rgb8,
    pub safe_margin: u32,

    pub gradient_ratio: f64,
    pub gradient_max_alpha: u8,
    pub gradient_color: Rgb8,

    pub headline_font: PathBuf,
    pub headline_size_start: u32,
    pub headline_size_min: u32,
    pub headline_size_step: u32,
    pub max_headline_lines: usize,

    pub accent_default: Rgb8,
    pub headline_body_color: Rgb8,
    pub headline_box_color: Rgb8,

    pub subheading_font: PathBuf,
    pub subheading_size: u32,
    pub subheading_color: Rgb8,
    pub subheading_margin_bottom: u32,
    pub subheading_margin_x: u32,

    pub line_spacing: u32,
    pub headline_gap: u32,

    pub logo: Option<LogoPlacement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogoPlacement {
    pub path: PathBuf,
    pub target_width: u32,
    pub x: i64,
    pub y: i64,
}

impl LayoutConfig {
    /// Flatten a template into engine settings.
    ///
    /// Relative font and logo paths are joined onto `assets_root` when one is given. Values that
    /// cannot produce a sensible layout are replaced by their defaults rather than rejected.
    pub fn resolve(cfg: &TemplateConfig, assets_root: Option<&Path>) -> Self {
        let defaults = TemplateConfig::default();
        let canvas = Canvas::new(cfg.canvas.width, cfg.canvas.height).unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid canvas size in template, using default");
            Canvas {
                width: defaults.canvas.width,
                height: defaults.canvas.height,
            }
        });

        let ratio = match cfg.canvas.gradient_height {
            Some(r) if r != 0.0 && r.is_finite() => r,
            _ => cfg.gradient.height_ratio,
        };
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            defaults.gradient.height_ratio
        };

        let (mut start, mut min) = (
            cfg.fonts.headline_size_start.max(1),
            cfg.fonts.headline_size_min.max(1),
        );
        if min > start {
            std::mem::swap(&mut start, &mut min);
        }

        let resolve_path = |p: &str| -> PathBuf {
            let p = Path::new(p);
            match assets_root {
                Some(root) if p.is_relative() => root.join(p),
                _ => p.to_path_buf(),
            }
        };

        let logo = (!cfg.logo.path.trim().is_empty()).then(|| LogoPlacement {
            path: resolve_path(cfg.logo.path.trim()),
            target_width: cfg.logo.target_width,
            x: cfg.logo.margin_left,
            y: cfg.logo.margin_top,
        });

        Self {
            canvas,
            bg_color: cfg.canvas.bg_color,
            safe_margin: cfg.layout.safe_zone_margin,
            gradient_ratio: ratio,
            gradient_max_alpha: cfg.gradient.max_alpha,
            gradient_color: cfg.gradient.start_color,
            headline_font: resolve_path(&cfg.fonts.headline_path),
            headline_size_start: start,
            headline_size_min: min,
            headline_size_step: cfg.fonts.headline_size_step.max(1),
            max_headline_lines: cfg.layout.max_headline_lines.max(1),
            accent_default: cfg.colors.accent_default,
            headline_body_color: cfg.colors.text_headline_body,
            headline_box_color: cfg.colors.text_headline_box,
            subheading_font: resolve_path(&cfg.subheading.font_path),
            subheading_size: cfg.subheading.font_size.max(1),
            subheading_color: cfg.subheading.color,
            subheading_margin_bottom: cfg.subheading.margin_bottom,
            subheading_margin_x: cfg
                .subheading
                .margin_x
                .unwrap_or(cfg.layout.safe_zone_margin),
            line_spacing: cfg.layout.element_spacing_y,
            headline_gap: cfg.layout.headline_summary_gap,
            logo,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::resolve(&TemplateConfig::default(), None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
