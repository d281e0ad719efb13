use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;

use crate::assets::decode::load_image_file;
use crate::assets::svg_raster::{parse_svg, rasterize_svg_to_width};
use crate::compose::background::blend_over;
use crate::config::model::LogoPlacement;
use crate::foundation::error::{NewsframeError, NewsframeResult};

/// Paste the configured logo onto `canvas`, using the logo's own alpha as the mask.
///
/// Best-effort: any failure is logged and leaves `canvas` untouched. Returns whether a logo was
/// drawn.
pub fn stamp_logo(canvas: &mut RgbaImage, placement: Option<&LogoPlacement>) -> bool {
    let Some(placement) = placement else {
        return false;
    };
    if !placement.path.exists() {
        tracing::warn!(path = %placement.path.display(), "logo path not found");
        return false;
    }
    match load_logo(&placement.path, placement.target_width) {
        Ok(logo) => {
            blend_over(canvas, &logo, placement.x, placement.y);
            true
        }
        Err(err) => {
            tracing::error!(path = %placement.path.display(), %err, "failed to draw logo");
            false
        }
    }
}

/// Decode a raster or SVG logo scaled to `target_width`, aspect ratio preserved.
pub fn load_logo(path: &Path, target_width: u32) -> NewsframeResult<RgbaImage> {
    if target_width == 0 {
        return Err(NewsframeError::validation("logo target width must be > 0"));
    }
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let bytes = std::fs::read(path)?;
        let tree = parse_svg(&bytes)?;
        return rasterize_svg_to_width(&tree, target_width);
    }

    let logo = load_image_file(path)?.to_rgba8();
    if logo.width() == 0 {
        return Err(NewsframeError::decode("logo has zero width"));
    }
    let scale = f64::from(target_width) / f64::from(logo.width());
    let h = ((f64::from(logo.height()) * scale) as u32).max(1);
    Ok(image::imageops::resize(&logo, target_width, h, FilterType::Lanczos3))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/logo.rs"]
mod tests;
