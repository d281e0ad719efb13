use crate::assets::font::TextMeasure;
use crate::config::model::LayoutConfig;

/// Greedy word wrap on a character budget. Words are never split; one longer than the budget
/// sits on its own line.
pub fn wrap_by_chars(text: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let len = word.chars().count();
        let cur_len = current.chars().count();
        if current.is_empty() {
            current.push_str(word);
        } else if cur_len + 1 + len <= budget {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Approximate characters per line: half an em per glyph.
pub fn char_budget(max_width: f64, font_size: u32) -> usize {
    let per_char = f64::from(font_size.max(1)) * 0.5;
    (max_width.max(0.0) / per_char) as usize
}

#[derive(Clone, Debug, PartialEq)]
pub struct FooterLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Subheading layout. `anchor_y` is where the block starts, and what the headline stacks on.
#[derive(Clone, Debug, PartialEq)]
pub struct FooterPlan {
    pub anchor_y: f64,
    pub lines: Vec<FooterLine>,
}

impl FooterPlan {
    /// Bottom edge of the last line; may run past the canvas for long text.
    pub fn bottom(&self) -> f64 {
        self.lines
            .last()
            .map_or(self.anchor_y, |l| l.y + l.height)
    }
}

/// Wrap and center `text`, growing downward from `height - margin_bottom`.
///
/// Each line steps down by its own measured height plus `line_spacing`. The returned anchor does
/// not depend on how many lines the text wraps into.
pub fn plan_footer(text: &str, cfg: &LayoutConfig, measure: &mut dyn TextMeasure) -> FooterPlan {
    let width = f64::from(cfg.canvas.width);
    let anchor_y = f64::from(cfg.canvas.height) - f64::from(cfg.subheading_margin_bottom);
    measure.set_size(cfg.subheading_size as f32);

    let max_width = width - 2.0 * f64::from(cfg.subheading_margin_x);
    let budget = char_budget(max_width, cfg.subheading_size);
    let spacing = f64::from(cfg.line_spacing);

    let mut y = anchor_y;
    let mut lines = Vec::new();
    for text in wrap_by_chars(text, budget) {
        let lw = f64::from(measure.text_width(&text));
        let lh = f64::from(measure.text_height(&text));
        lines.push(FooterLine {
            x: (width - lw) / 2.0,
            y,
            width: lw,
            height: lh,
            text,
        });
        y += lh + spacing;
    }

    tracing::debug!(lines = lines.len(), budget, anchor_y, "footer laid out");
    FooterPlan { anchor_y, lines }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/footer.rs"]
mod tests;
