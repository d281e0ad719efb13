//! CPU drawing surface for badges and text.
//!
//! Vector work (badge rectangles, glyph runs) goes through a `vello_cpu` context on a transparent
//! layer that is then read back as straight-alpha RGBA and composited onto the raster canvas.

use crate::assets::font::{TextBrushRgba8, TextEngine};
use crate::assets::svg_raster::unpremultiply_rgba8_in_place;
use crate::compose::background::blend_over;
use crate::foundation::core::{Canvas, Rect, Rgb8};
use crate::foundation::error::{NewsframeError, NewsframeResult};

pub struct TextLayer {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl TextLayer {
    pub fn new(canvas: Canvas) -> NewsframeResult<Self> {
        let width = u16::try_from(canvas.width)
            .map_err(|_| NewsframeError::render(format!("layer width exceeds u16: {}", canvas.width)))?;
        let height = u16::try_from(canvas.height).map_err(|_| {
            NewsframeError::render(format!("layer height exceeds u16: {}", canvas.height))
        })?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    /// Draw `text` on one line with its layout box's top-left at `(x, y)`, at the engine's
    /// current size.
    ///
    /// Returns `false` when nothing could be drawn (no outline font).
    pub fn draw_text(&mut self, engine: &mut TextEngine, text: &str, x: f64, y: f64, color: Rgb8) -> bool {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        };
        let Some(layout) = engine.layout(text, brush) else {
            return false;
        };
        let Some(font) = engine.paint_font() else {
            return false;
        };

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        true
    }

    /// Rasterize everything drawn so far into a straight-alpha image.
    pub fn finish(mut self) -> NewsframeResult<image::RgbaImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut straight = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), straight)
            .ok_or_else(|| NewsframeError::render("invalid rgba buffer size"))
    }
}

/// Alpha-composite `layer` over `base`, both anchored at the origin.
pub fn composite_onto(base: &mut image::RgbaImage, layer: &image::RgbaImage) {
    blend_over(base, layer, 0, 0);
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
