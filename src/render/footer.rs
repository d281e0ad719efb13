use crate::assets::font::{FontWeight, TextEngine};
use crate::config::model::LayoutConfig;
use crate::layout::footer::{FooterPlan, plan_footer};
use crate::render::surface::TextLayer;

/// Draw the subheading block and return its anchor Y for the headline to stack on.
pub fn draw_footer(layer: &mut TextLayer, text: &str, cfg: &LayoutConfig) -> f64 {
    let mut engine = TextEngine::load(&cfg.subheading_font, FontWeight::Regular);
    draw_footer_with(layer, &mut engine, text, cfg).anchor_y
}

pub fn draw_footer_with(
    layer: &mut TextLayer,
    engine: &mut TextEngine,
    text: &str,
    cfg: &LayoutConfig,
) -> FooterPlan {
    let plan = plan_footer(text, cfg, engine);
    for line in &plan.lines {
        layer.draw_text(engine, &line.text, line.x, line.y, cfg.subheading_color);
    }
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/render/footer.rs"]
mod tests;
