use crate::assets::font::{FontWeight, TextEngine, TextMeasure};
use crate::config::model::LayoutConfig;
use crate::foundation::core::Rgb8;
use crate::layout::headline::{HeadlineParams, HeadlinePlan, plan_headline};
use crate::render::surface::TextLayer;

/// Lay out and draw the headline above `footer_anchor_y`.
///
/// Loads the configured headline font (bold preferred on fallback). Never fails: a missing font
/// degrades to a single line measured with built-in metrics.
#[tracing::instrument(skip(layer, cfg))]
pub fn draw_headline(
    layer: &mut TextLayer,
    footer_anchor_y: f64,
    text: &str,
    badge_color: Rgb8,
    cfg: &LayoutConfig,
    highlight_phrase: Option<&str>,
    highlight_padding: Option<u32>,
) -> HeadlinePlan {
    let mut engine = TextEngine::load(&cfg.headline_font, FontWeight::Bold);
    draw_headline_with(
        layer,
        &mut engine,
        footer_anchor_y,
        text,
        badge_color,
        cfg,
        highlight_phrase,
        highlight_padding,
    )
}

/// [`draw_headline`] with a caller-provided engine.
#[allow(clippy::too_many_arguments)]
pub fn draw_headline_with(
    layer: &mut TextLayer,
    engine: &mut TextEngine,
    footer_anchor_y: f64,
    text: &str,
    badge_color: Rgb8,
    cfg: &LayoutConfig,
    highlight_phrase: Option<&str>,
    highlight_padding: Option<u32>,
) -> HeadlinePlan {
    let params = HeadlineParams::from_config(cfg, highlight_padding);
    let naive = engine.is_builtin();
    if naive {
        tracing::warn!("headline font unavailable, drawing single naive line");
    }
    let plan = plan_headline(text, footer_anchor_y, &params, engine, highlight_phrase, naive);
    engine.set_size(plan.font_size as f32);

    for line in &plan.lines {
        // Badges first so text sits on top.
        for badge in &line.badges {
            layer.fill_rect(*badge, badge_color);
        }
        for word in &line.words {
            let color = if word.highlighted {
                cfg.headline_box_color
            } else {
                cfg.headline_body_color
            };
            layer.draw_text(engine, &word.text, word.x, line.y, color);
        }
    }
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/render/headline.rs"]
mod tests;
