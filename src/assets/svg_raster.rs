use crate::foundation::error::{NewsframeError, NewsframeResult};

/// Largest raster edge an SVG logo may be rendered at.
const MAX_DIM: u32 = 16_384;

pub fn parse_svg(bytes: &[u8]) -> NewsframeResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| NewsframeError::decode(format!("parse svg tree: {e}")))
}

/// Rasterize `tree` at `target_width`, keeping its aspect ratio.
///
/// Returns straight-alpha RGBA so the result can be pasted like any decoded logo.
pub fn rasterize_svg_to_width(
    tree: &usvg::Tree,
    target_width: u32,
) -> NewsframeResult<image::RgbaImage> {
    let size = tree.size();
    let (sw, sh) = (size.width(), size.height());
    if !sw.is_finite() || !sh.is_finite() || sw <= 0.0 || sh <= 0.0 {
        return Err(NewsframeError::decode("svg has invalid width/height"));
    }

    let scale = target_width as f32 / sw;
    let height = ((sh * scale) as u32).max(1);
    if target_width == 0 || target_width > MAX_DIM || height > MAX_DIM {
        return Err(NewsframeError::validation(format!(
            "svg raster size out of range: {target_width}x{height}"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(target_width, height)
        .ok_or_else(|| NewsframeError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied RGBA.
    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    image::RgbaImage::from_raw(target_width, height, data)
        .ok_or_else(|| NewsframeError::render("svg pixmap byte len mismatch"))
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
