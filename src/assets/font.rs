use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::foundation::error::{NewsframeError, NewsframeResult};

/// Ascent and descent of a line at the current size, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    /// Integer line height, ascent and descent rounded separately.
    pub fn line_height(self) -> f32 {
        self.ascent.round() + self.descent.round()
    }
}

/// Text measurement at an adjustable pixel size.
///
/// Layout code only talks to this trait so the fitting logic can be exercised without font files.
pub trait TextMeasure {
    fn set_size(&mut self, size_px: f32);

    fn size(&self) -> f32;

    /// Advance width of `text` on a single line.
    fn text_width(&mut self, text: &str) -> f32;

    fn metrics(&mut self) -> FontMetrics;

    /// Height of `text` set on one line. Empty text has no height.
    fn text_height(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            0.0
        } else {
            self.metrics().line_height()
        }
    }

    /// Width of one inter-word space.
    fn space_width(&mut self) -> f32 {
        let pair = self.text_width("x x");
        let single = self.text_width("x");
        let w = pair - 2.0 * single;
        if w.is_finite() && w > 0.0 {
            w
        } else {
            self.size() * 0.25
        }
    }
}

/// Monospace-style measurer: every char advances by `advance_em * size`.
///
/// Backs the built-in fallback face and deterministic layout tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub advance_em: f32,
    pub ascent_em: f32,
    pub descent_em: f32,
    size: f32,
}

impl FixedAdvance {
    pub fn new(advance_em: f32, ascent_em: f32, descent_em: f32) -> Self {
        Self {
            advance_em,
            ascent_em,
            descent_em,
            size: 16.0,
        }
    }

    /// Metrics used when no outline font could be loaded.
    pub fn builtin() -> Self {
        Self::new(0.55, 0.8, 0.2)
    }
}

impl TextMeasure for FixedAdvance {
    fn set_size(&mut self, size_px: f32) {
        self.size = size_px;
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn text_width(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance_em * self.size
    }

    fn metrics(&mut self) -> FontMetrics {
        FontMetrics {
            ascent: self.ascent_em * self.size,
            descent: self.descent_em * self.size,
        }
    }

    /// Cap height only, plus the descent when the text has a descending glyph.
    fn text_height(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let m = self.metrics();
        if text.chars().any(|c| DESCENDERS.contains(&c)) {
            m.line_height()
        } else {
            m.ascent.round()
        }
    }

    fn space_width(&mut self) -> f32 {
        self.advance_em * self.size
    }
}

const DESCENDERS: [char; 7] = ['g', 'j', 'p', 'q', 'y', ',', ';'];

/// Preferred weight when falling back to a system face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Where a loaded face came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    File(PathBuf),
    System(String),
    /// No outline data; measures with [`FixedAdvance::builtin`] and draws no glyphs.
    Builtin,
}

/// Raw font bytes plus provenance.
#[derive(Clone, Debug)]
pub struct FontFace {
    pub origin: FontOrigin,
    data: Option<Arc<Vec<u8>>>,
    index: u32,
}

impl FontFace {
    pub fn builtin() -> Self {
        Self {
            origin: FontOrigin::Builtin,
            data: None,
            index: 0,
        }
    }

    pub fn from_bytes(origin: FontOrigin, bytes: Vec<u8>, index: u32) -> Self {
        Self {
            origin,
            data: Some(Arc::new(bytes)),
            index,
        }
    }

    /// Load `path`, falling back to a system sans-serif face, then to the built-in metrics face.
    pub fn resolve(path: &Path, weight: FontWeight) -> Self {
        match std::fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => {
                return Self::from_bytes(FontOrigin::File(path.to_path_buf()), bytes, 0);
            }
            Ok(_) => tracing::warn!(path = %path.display(), "font file is empty"),
            Err(err) => tracing::warn!(path = %path.display(), %err, "font unavailable"),
        }
        match system_face(weight) {
            Some(face) => {
                tracing::info!(origin = ?face.origin, "using system fallback font");
                face
            }
            None => {
                tracing::warn!("no system fonts found, using built-in metrics");
                Self::builtin()
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.data.is_none()
    }
}

fn system_face(weight: FontWeight) -> Option<FontFace> {
    static REGULAR: OnceLock<Option<FontFace>> = OnceLock::new();
    static BOLD: OnceLock<Option<FontFace>> = OnceLock::new();
    let cell = match weight {
        FontWeight::Regular => &REGULAR,
        FontWeight::Bold => &BOLD,
    };
    cell.get_or_init(|| load_system_face(weight)).clone()
}

fn load_system_face(weight: FontWeight) -> Option<FontFace> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: match weight {
            FontWeight::Regular => fontdb::Weight::NORMAL,
            FontWeight::Bold => fontdb::Weight::BOLD,
        },
        ..Default::default()
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let name = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    db.with_face_data(id, |data, index| {
        FontFace::from_bytes(FontOrigin::System(name), data.to_vec(), index)
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

struct ParleyFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    paint_font: vello_cpu::peniko::FontData,
}

enum Backend {
    Parley(Box<ParleyFont>),
    Fixed(FixedAdvance),
}

/// Shapes, measures and lays out text with one face at an adjustable size.
pub struct TextEngine {
    backend: Backend,
    size: f32,
    metrics: Option<FontMetrics>,
    origin: FontOrigin,
}

impl TextEngine {
    /// Build an engine for `face`. Faces Parley cannot register degrade to built-in metrics.
    pub fn new(face: &FontFace) -> Self {
        let backend = match &face.data {
            Some(bytes) => match register_parley_font(bytes, face.index) {
                Ok(font) => Backend::Parley(Box::new(font)),
                Err(err) => {
                    tracing::warn!(origin = ?face.origin, %err, "font rejected, using built-in metrics");
                    Backend::Fixed(FixedAdvance::builtin())
                }
            },
            None => Backend::Fixed(FixedAdvance::builtin()),
        };
        let origin = match backend {
            Backend::Parley(_) => face.origin.clone(),
            Backend::Fixed(_) => FontOrigin::Builtin,
        };
        Self {
            backend,
            size: 16.0,
            metrics: None,
            origin,
        }
    }

    /// Resolve and load in one step.
    pub fn load(path: &Path, weight: FontWeight) -> Self {
        Self::new(&FontFace::resolve(path, weight))
    }

    pub fn builtin() -> Self {
        Self::new(&FontFace::builtin())
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// `true` when no outline font is available and glyphs cannot be drawn.
    pub fn is_builtin(&self) -> bool {
        matches!(self.backend, Backend::Fixed(_))
    }

    /// Paint-side font data, for drawing glyph runs produced by [`TextEngine::layout`].
    pub(crate) fn paint_font(&self) -> Option<&vello_cpu::peniko::FontData> {
        match &self.backend {
            Backend::Parley(p) => Some(&p.paint_font),
            Backend::Fixed(_) => None,
        }
    }

    /// Shape `text` on a single unbroken line at the current size.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        brush: TextBrushRgba8,
    ) -> Option<parley::Layout<TextBrushRgba8>> {
        let size = self.size;
        let Backend::Parley(p) = &mut self.backend else {
            return None;
        };
        let mut builder = p
            .layout_ctx
            .ranged_builder(&mut p.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(p.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }
}

fn register_parley_font(bytes: &Arc<Vec<u8>>, index: u32) -> NewsframeResult<ParleyFont> {
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| NewsframeError::font("no font families registered from font bytes"))?;
    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| NewsframeError::font("registered font family has no name"))?
        .to_string();

    let paint_font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
        index,
    );
    Ok(ParleyFont {
        font_ctx,
        layout_ctx: parley::LayoutContext::new(),
        family_name,
        paint_font,
    })
}

impl TextMeasure for TextEngine {
    fn set_size(&mut self, size_px: f32) {
        if self.size != size_px {
            self.size = size_px;
            self.metrics = None;
        }
        if let Backend::Fixed(f) = &mut self.backend {
            f.set_size(size_px);
        }
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn text_width(&mut self, text: &str) -> f32 {
        if let Backend::Fixed(f) = &mut self.backend {
            return f.text_width(text);
        }
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text, TextBrushRgba8::default())
            .map(|l| l.full_width())
            .unwrap_or(0.0)
    }

    fn metrics(&mut self) -> FontMetrics {
        if let Some(m) = self.metrics {
            return m;
        }
        let fallback = FontMetrics {
            ascent: self.size * 0.8,
            descent: self.size * 0.2,
        };
        let m = if let Backend::Fixed(f) = &mut self.backend {
            f.metrics()
        } else {
            self.layout("Hg", TextBrushRgba8::default())
                .and_then(|l| {
                    l.lines().next().map(|line| {
                        let lm = line.metrics();
                        FontMetrics {
                            ascent: lm.ascent,
                            descent: lm.descent,
                        }
                    })
                })
                .unwrap_or(fallback)
        };
        self.metrics = Some(m);
        m
    }

    fn text_height(&mut self, text: &str) -> f32 {
        if let Backend::Fixed(f) = &mut self.backend {
            return f.text_height(text);
        }
        if text.is_empty() {
            return 0.0;
        }
        match self.layout(text, TextBrushRgba8::default()) {
            Some(l) if l.height() > 0.0 => l.height().round(),
            _ => self.metrics().line_height(),
        }
    }

    fn space_width(&mut self) -> f32 {
        if let Backend::Fixed(f) = &mut self.backend {
            return f.space_width();
        }
        let pair = self.text_width("x x");
        let single = self.text_width("x");
        let w = pair - 2.0 * single;
        if w.is_finite() && w > 0.0 {
            w
        } else {
            self.size * 0.25
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
