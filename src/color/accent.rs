use crate::color::names::lookup_color_name;
use crate::color::palette::dominant_palette;
use crate::foundation::core::Rgb8;

/// Luminance a badge color must exceed to stay readable under dark text.
pub const LIGHT_THRESHOLD: f64 = 200.0;

/// Palette size used for dominant color extraction.
pub const PALETTE_COLORS: usize = 5;

/// Blending stops once every channel is above this, to avoid collapsing to pure white.
const NEAR_WHITE: u8 = 250;

const MAX_LIGHTEN_STEPS: usize = 16;

pub fn is_light(c: Rgb8) -> bool {
    c.luminance() > LIGHT_THRESHOLD
}

/// Blend `c` halfway toward white until it passes [`is_light`].
///
/// Converges in at most 8 steps for any input; the step cap only guards the loop.
pub fn force_light_color(c: Rgb8) -> Rgb8 {
    let mut c = c;
    for _ in 0..MAX_LIGHTEN_STEPS {
        if is_light(c) {
            break;
        }
        let mix = |v: u8| ((f64::from(v) * 0.5) + 127.5) as u8;
        c = Rgb8::new(mix(c.r), mix(c.g), mix(c.b));
        if c.r > NEAR_WHITE && c.g > NEAR_WHITE && c.b > NEAR_WHITE {
            break;
        }
    }
    c
}

/// Caller-supplied highlight color, resolved once into RGB at the request boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccentColor {
    /// `#RRGGBB` / `#RGB` (the `#` is optional for six digits).
    Hex(String),
    Rgb(Rgb8),
    /// Web color name, matched exactly first and fuzzily second.
    Named(String),
}

impl AccentColor {
    /// Classify free-form user input.
    ///
    /// `#...` or six bare hex digits are hex, `r,g,b` is a triple, anything else is a name.
    pub fn parse(input: &str) -> Self {
        let s = input.trim();
        if s.starts_with('#') || (s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())) {
            return Self::Hex(s.to_owned());
        }
        let parts: Vec<&str> = s
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .map(str::trim)
            .collect();
        if parts.len() == 3 {
            let channels: Vec<u8> = parts.iter().filter_map(|p| p.parse().ok()).collect();
            if let [r, g, b] = channels[..] {
                return Self::Rgb(Rgb8::new(r, g, b));
            }
        }
        Self::Named(s.to_owned())
    }

    /// Canonical RGB, or `None` when the input names no color.
    pub fn to_rgb(&self) -> Option<Rgb8> {
        match self {
            Self::Hex(h) => Rgb8::from_hex(h).ok(),
            Self::Rgb(c) => Some(*c),
            Self::Named(n) => lookup_color_name(n).and_then(|m| m.rgb()),
        }
    }
}

impl From<Rgb8> for AccentColor {
    fn from(c: Rgb8) -> Self {
        Self::Rgb(c)
    }
}

/// Pick a badge color that is light enough for dark text.
///
/// An explicit color wins and is force-lightened. Otherwise the background palette is scanned
/// by frequency for an already-light entry, falling back to lightening the most frequent one.
/// Without an image, or with an empty palette, the lightened `default` is used. Never fails.
pub fn resolve_accent_color(
    background: Option<&image::RgbaImage>,
    explicit: Option<&AccentColor>,
    default: Rgb8,
) -> Rgb8 {
    if let Some(explicit) = explicit {
        match explicit.to_rgb() {
            Some(c) => return force_light_color(c),
            None => tracing::warn!(?explicit, "unrecognized accent color, extracting from image"),
        }
    }

    let Some(img) = background else {
        return force_light_color(default);
    };
    if img.width() == 0 || img.height() == 0 {
        tracing::warn!("empty background image, using default accent");
        return force_light_color(default);
    }

    let palette = dominant_palette(img, PALETTE_COLORS);
    if let Some(entry) = palette.iter().find(|e| is_light(e.color)) {
        tracing::info!(color = %entry.color, "found naturally light dominant color");
        return entry.color;
    }
    match palette.first() {
        Some(entry) => force_light_color(entry.color),
        None => force_light_color(default),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/accent.rs"]
mod tests;
