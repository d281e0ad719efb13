use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::config::model::LayoutConfig;
use crate::foundation::core::Rgb8;

/// What sits under the gradient: a photo, the flat fallback fill, or nothing (overlays).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundKind {
    Photo,
    Solid,
    Transparent,
}

/// Canvas-sized opaque background: the cover-cropped `source`, or a flat `fill`.
pub fn prepare_background(
    source: Option<&DynamicImage>,
    width: u32,
    height: u32,
    fill: Rgb8,
) -> (RgbaImage, BackgroundKind) {
    match source {
        Some(img) if img.width() > 0 && img.height() > 0 => {
            let mut out = cover_crop(img, width, height);
            for px in out.pixels_mut() {
                px[3] = 255;
            }
            (out, BackgroundKind::Photo)
        }
        Some(_) => {
            tracing::warn!("background image is empty, using solid fill");
            (solid_fill(width, height, fill), BackgroundKind::Solid)
        }
        None => (solid_fill(width, height, fill), BackgroundKind::Solid),
    }
}

pub fn solid_fill(width: u32, height: u32, fill: Rgb8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, fill.to_rgba(255))
}

/// Center-crop to the target aspect ratio, then resize to exactly `width` x `height`.
///
/// Wider sources lose columns on both sides; taller (or equal) sources lose rows. The crop is
/// taken in source pixels so extreme aspect ratios never allocate more than the source.
pub fn cover_crop(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = (img.width(), img.height());
    let img_ratio = f64::from(sw) / f64::from(sh);
    let target_ratio = f64::from(width) / f64::from(height);

    let (crop_w, crop_h) = if img_ratio > target_ratio {
        let w = (f64::from(sh) * target_ratio).round() as u32;
        (w.clamp(1, sw), sh)
    } else {
        let h = (f64::from(sw) / target_ratio).round() as u32;
        (sw, h.clamp(1, sh))
    };
    let left = (sw - crop_w) / 2;
    let top = (sh - crop_h) / 2;

    img.crop_imm(left, top, crop_w, crop_h)
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgba8()
}

/// Transparent layer whose alpha ramps from 0 to `max_alpha` over the bottom `ratio` of the height.
pub fn gradient_overlay(
    width: u32,
    height: u32,
    ratio: f64,
    max_alpha: u8,
    color: Rgb8,
) -> RgbaImage {
    let mut overlay = RgbaImage::new(width, height);
    let gradient_height = ((height as f64) * ratio.clamp(0.0, 1.0)) as u32;
    if gradient_height == 0 {
        return overlay;
    }
    let start_y = height - gradient_height;
    for y in start_y..height {
        let t = f64::from(y - start_y) / f64::from(gradient_height);
        let alpha = (t * f64::from(max_alpha)) as u8;
        let px = color.to_rgba(alpha);
        for x in 0..width {
            overlay.put_pixel(x, y, px);
        }
    }
    overlay
}

/// Alpha-composite the configured gradient over `canvas`.
pub fn apply_gradient(canvas: &mut RgbaImage, cfg: &LayoutConfig) {
    let overlay = gradient_overlay(
        canvas.width(),
        canvas.height(),
        cfg.gradient_ratio,
        cfg.gradient_max_alpha,
        cfg.gradient_color,
    );
    blend_over(canvas, &overlay, 0, 0);
}

/// Source-over composite of straight-alpha `layer` onto `base` with its origin at (`x`, `y`).
///
/// Opaque base pixels stay exactly opaque. Parts of `layer` outside `base` are clipped.
pub fn blend_over(base: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    let (bw, bh) = (i64::from(base.width()), i64::from(base.height()));
    for (lx, ly, src) in layer.enumerate_pixels() {
        let (dx, dy) = (x + i64::from(lx), y + i64::from(ly));
        if dx < 0 || dy < 0 || dx >= bw || dy >= bh {
            continue;
        }
        let sa = src[3];
        if sa == 0 {
            continue;
        }
        // In range after the bounds check.
        let dst = base.get_pixel_mut(dx as u32, dy as u32);
        if sa == 255 {
            *dst = *src;
            continue;
        }

        let sa = f32::from(sa) / 255.0;
        let da = f32::from(dst[3]) / 255.0;
        let oa = sa + da * (1.0 - sa);
        for c in 0..3 {
            let v = (f32::from(src[c]) * sa + f32::from(dst[c]) * da * (1.0 - sa)) / oa;
            dst[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = if dst[3] == 255 {
            255
        } else {
            (oa * 255.0).round().clamp(0.0, 255.0) as u8
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/background.rs"]
mod tests;
