//! Headline fitting: font-size search, greedy line packing and highlight badges.
//!
//! Everything here is pure layout. The plan produced by [`plan_headline`] holds final pixel
//! positions for every word and badge; drawing lives in `render::headline`.

use crate::assets::font::TextMeasure;
use crate::config::model::LayoutConfig;
use crate::foundation::core::Rect;

/// Horizontal badge padding when the caller does not override it.
pub const DEFAULT_PADDING_X: f64 = 3.0;
/// Vertical badge padding paired with [`DEFAULT_PADDING_X`].
pub const DEFAULT_PADDING_Y: f64 = 1.0;

/// A headline token with its source-order index and measured width.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub index: usize,
    pub text: String,
    pub width: f32,
}

/// Words that share one rendered line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub words: Vec<Word>,
}

impl Line {
    /// Word widths plus one space between neighbours.
    pub fn width(&self, space: f32) -> f32 {
        let words: f32 = self.words.iter().map(|w| w.width).sum();
        words + space * self.words.len().saturating_sub(1) as f32
    }
}

/// Which words get a badge. Resolved once, before any line is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightStrategy {
    /// Nothing is highlighted (phrase given but blank or not found).
    None,
    /// Words `0..=end` are highlighted wherever they wrap to.
    Span { end: usize },
    /// Legacy behaviour without a phrase: every word of line 0.
    FirstLine,
}

impl HighlightStrategy {
    /// Pick the strategy for `words` and an optional highlight phrase.
    ///
    /// Only a missing phrase selects the first-line highlight; a blank one highlights nothing.
    pub fn resolve(words: &[&str], phrase: Option<&str>) -> Self {
        match phrase {
            None => Self::FirstLine,
            Some(p) => match resolve_span_end(words, p) {
                Some(end) => Self::Span { end },
                None => Self::None,
            },
        }
    }

    pub fn is_highlighted(self, line_index: usize, word_index: usize) -> bool {
        match self {
            Self::None => false,
            Self::Span { end } => word_index <= end,
            Self::FirstLine => line_index == 0,
        }
    }

    /// Contiguous highlighted runs of `line`, as inclusive positions within the line.
    pub fn runs(self, line_index: usize, line: &Line) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start: Option<usize> = None;
        for (pos, word) in line.words.iter().enumerate() {
            match (self.is_highlighted(line_index, word.index), start) {
                (true, None) => start = Some(pos),
                (false, Some(s)) => {
                    runs.push((s, pos - 1));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, line.words.len() - 1));
        }
        runs
    }
}

fn normalize_token(word: &str) -> String {
    word.to_lowercase().replace(['.', ','], "")
}

/// Index of the last headline word covered by `phrase`, if the phrase occurs.
///
/// Matching ignores case, `.` and `,`. The phrase must appear as a contiguous run of words; a
/// single-word phrase additionally matches its first standalone occurrence.
pub fn resolve_span_end(words: &[&str], phrase: &str) -> Option<usize> {
    let haystack: Vec<String> = words.iter().map(|w| normalize_token(w)).collect();
    let needle: Vec<String> = normalize_token(phrase)
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    if let Some(start) = haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
    {
        return Some(start + needle.len() - 1);
    }
    if let [single] = needle.as_slice() {
        return haystack.iter().position(|w| w == single);
    }
    None
}

/// Badge padding in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgePadding {
    pub x: f64,
    pub y: f64,
}

impl BadgePadding {
    /// Tight default, or `y` derived as 60% of an explicit `x` (at least 2px).
    pub fn from_override(padding: Option<u32>) -> Self {
        match padding {
            Some(px) => Self {
                x: f64::from(px),
                y: ((f64::from(px) * 0.6) as u32).max(2) as f64,
            },
            None => Self {
                x: DEFAULT_PADDING_X,
                y: DEFAULT_PADDING_Y,
            },
        }
    }
}

/// Font-size search bounds and limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub size_start: u32,
    pub size_min: u32,
    pub size_step: u32,
    pub max_lines: usize,
    pub max_width: f32,
}

/// Outcome of greedy line packing at one size.
#[derive(Clone, Debug, PartialEq)]
pub struct Packing {
    pub lines: Vec<Line>,
    /// `false` when some word is wider than the line on its own.
    pub all_fit: bool,
    pub space_width: f32,
}

/// Greedily pack `words` into lines no wider than `max_width`.
///
/// A word that does not fit on a non-empty line starts a new one. A word wider than the whole
/// line still gets a line of its own, but marks the packing as not fitting.
pub fn pack_lines(words: &[&str], measure: &mut dyn TextMeasure, max_width: f32) -> Packing {
    let space = measure.space_width();
    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut current_w = 0.0f32;
    let mut all_fit = true;

    for (index, text) in words.iter().enumerate() {
        let width = measure.text_width(text);
        let word = Word {
            index,
            text: (*text).to_owned(),
            width,
        };
        if width > max_width {
            all_fit = false;
        }
        let added = if current.words.is_empty() {
            width
        } else {
            width + space
        };
        if current.words.is_empty() || current_w + added <= max_width {
            current.words.push(word);
            current_w += added;
        } else {
            lines.push(std::mem::take(&mut current));
            current.words.push(word);
            current_w = width;
        }
    }
    if !current.words.is_empty() {
        lines.push(current);
    }

    Packing {
        lines,
        all_fit,
        space_width: space,
    }
}

/// Result of the font-size search.
#[derive(Clone, Debug, PartialEq)]
pub struct Fit {
    pub font_size: u32,
    pub packing: Packing,
    /// `false` when no size satisfied both constraints and the smallest attempt was kept.
    pub fitted: bool,
}

/// Candidate sizes: `start`, `start - step`, ... down to `min` inclusive.
pub fn candidate_sizes(start: u32, min: u32, step: u32) -> impl Iterator<Item = u32> {
    let step = step.max(1);
    std::iter::successors(Some(start), move |s| s.checked_sub(step))
        .take_while(move |s| *s >= min && *s > 0)
}

/// Largest candidate size at which every word fits and the line count stays within the cap.
///
/// Falls back to the smallest attempted size and its packing when none qualifies.
pub fn fit_headline(words: &[&str], measure: &mut dyn TextMeasure, params: &FitParams) -> Fit {
    let mut last: Option<Fit> = None;
    for size in candidate_sizes(params.size_start, params.size_min, params.size_step) {
        measure.set_size(size as f32);
        let packing = pack_lines(words, measure, params.max_width);
        let fitted = packing.all_fit && packing.lines.len() <= params.max_lines;
        tracing::debug!(
            size,
            lines = packing.lines.len(),
            all_fit = packing.all_fit,
            "headline size attempt"
        );
        let fit = Fit {
            font_size: size,
            packing,
            fitted,
        };
        if fitted {
            return fit;
        }
        last = Some(fit);
    }

    match last {
        Some(fit) => {
            tracing::warn!(
                font_size = fit.font_size,
                lines = fit.packing.lines.len(),
                "headline does not fit any size, keeping smallest attempt"
            );
            fit
        }
        // Empty size range: measure once at the start size.
        None => {
            let size = params.size_start.max(1);
            measure.set_size(size as f32);
            let packing = pack_lines(words, measure, params.max_width);
            Fit {
                font_size: size,
                packing,
                fitted: false,
            }
        }
    }
}

/// Every word on one line, measured at `size`. Used when no outline font is available.
pub fn naive_single_line(words: &[&str], measure: &mut dyn TextMeasure, size: u32) -> Fit {
    measure.set_size(size as f32);
    let space = measure.space_width();
    let line = Line {
        words: words
            .iter()
            .enumerate()
            .map(|(index, text)| Word {
                index,
                text: (*text).to_owned(),
                width: measure.text_width(text),
            })
            .collect(),
    };
    Fit {
        font_size: size,
        packing: Packing {
            lines: if line.words.is_empty() {
                Vec::new()
            } else {
                vec![line]
            },
            all_fit: true,
            space_width: space,
        },
        fitted: false,
    }
}

/// Inputs for [`plan_headline`] beyond the text itself.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlineParams {
    pub canvas_width: u32,
    pub safe_margin: u32,
    pub size_start: u32,
    pub size_min: u32,
    pub size_step: u32,
    pub max_lines: usize,
    pub line_spacing: u32,
    pub gap: u32,
    pub padding: BadgePadding,
}

impl HeadlineParams {
    pub fn from_config(cfg: &LayoutConfig, padding: Option<u32>) -> Self {
        Self {
            canvas_width: cfg.canvas.width,
            safe_margin: cfg.safe_margin,
            size_start: cfg.headline_size_start,
            size_min: cfg.headline_size_min,
            size_step: cfg.headline_size_step,
            max_lines: cfg.max_headline_lines,
            line_spacing: cfg.line_spacing,
            gap: cfg.headline_gap,
            padding: BadgePadding::from_override(padding),
        }
    }

    /// Usable line width: canvas minus both safe margins and both horizontal badge paddings.
    pub fn max_line_width(&self) -> f32 {
        let w = f64::from(self.canvas_width)
            - 2.0 * f64::from(self.safe_margin)
            - 2.0 * self.padding.x;
        w.max(0.0) as f32
    }
}

/// A word with its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub index: usize,
    pub text: String,
    pub x: f64,
    pub width: f64,
    pub highlighted: bool,
}

/// A line with its top edge and placed words.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub y: f64,
    pub words: Vec<PlacedWord>,
    /// Badge rectangles for this line, drawn before its text.
    pub badges: Vec<Rect>,
}

/// Complete headline layout.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlinePlan {
    pub font_size: u32,
    pub fitted: bool,
    /// Set when no outline font was available and the naive single-line layout was used.
    pub naive: bool,
    pub strategy: HighlightStrategy,
    pub line_height: f64,
    pub space_width: f64,
    pub top: f64,
    pub lines: Vec<PlacedLine>,
}

impl HeadlinePlan {
    /// Source-order indices of highlighted words.
    pub fn highlighted_indices(&self) -> Vec<usize> {
        self.lines
            .iter()
            .flat_map(|l| l.words.iter())
            .filter(|w| w.highlighted)
            .map(|w| w.index)
            .collect()
    }

    pub fn badges(&self) -> impl Iterator<Item = &Rect> {
        self.lines.iter().flat_map(|l| l.badges.iter())
    }

    /// Line texts joined with single spaces.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| {
                l.words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Lay out `text` so that its block ends `gap` pixels above `anchor_y`.
///
/// `naive` requests the single-line layout used when no outline font could be loaded.
pub fn plan_headline(
    text: &str,
    anchor_y: f64,
    params: &HeadlineParams,
    measure: &mut dyn TextMeasure,
    phrase: Option<&str>,
    naive: bool,
) -> HeadlinePlan {
    let words: Vec<&str> = text.split_whitespace().collect();
    let strategy = HighlightStrategy::resolve(&words, phrase);

    let fit = if naive {
        naive_single_line(&words, measure, params.size_start)
    } else {
        fit_headline(
            &words,
            measure,
            &FitParams {
                size_start: params.size_start,
                size_min: params.size_min,
                size_step: params.size_step,
                max_lines: params.max_lines,
                max_width: params.max_line_width(),
            },
        )
    };

    let line_height = f64::from(measure.metrics().line_height());
    let spacing = f64::from(params.line_spacing);
    let space = f64::from(fit.packing.space_width);
    let n = fit.packing.lines.len();
    let total_height = if n == 0 {
        0.0
    } else {
        n as f64 * line_height + (n - 1) as f64 * spacing
    };
    let top = anchor_y - total_height - f64::from(params.gap);
    let center_x = f64::from(params.canvas_width / 2);
    let pad = params.padding;

    let mut lines = Vec::with_capacity(n);
    let mut y = top;
    for (line_index, line) in fit.packing.lines.iter().enumerate() {
        let line_w = f64::from(line.width(fit.packing.space_width));
        let start_x = center_x - line_w / 2.0;

        let mut words = Vec::with_capacity(line.words.len());
        let mut x = start_x;
        for w in &line.words {
            words.push(PlacedWord {
                index: w.index,
                text: w.text.clone(),
                x,
                width: f64::from(w.width),
                highlighted: strategy.is_highlighted(line_index, w.index),
            });
            x += f64::from(w.width) + space;
        }

        let badges = strategy
            .runs(line_index, line)
            .into_iter()
            .map(|(first, last)| {
                let left = words[first].x;
                let right = words[last].x + words[last].width;
                Rect::new(
                    left - pad.x,
                    y - pad.y,
                    right + pad.x,
                    y + line_height + pad.y,
                )
            })
            .collect();

        lines.push(PlacedLine { y, words, badges });
        y += line_height + spacing;
    }

    tracing::info!(
        font_size = fit.font_size,
        lines = n,
        fitted = fit.fitted,
        ?strategy,
        "headline laid out"
    );

    HeadlinePlan {
        font_size: fit.font_size,
        fitted: fit.fitted,
        naive,
        strategy,
        line_height,
        space_width: space,
        top,
        lines,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/headline.rs"]
mod tests;
