use crate::foundation::error::{NewsframeError, NewsframeResult};

pub use kurbo::{Point, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Both dimensions must fit the `u16` raster surface.
    pub fn new(width: u32, height: u32) -> NewsframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(NewsframeError::validation("canvas dimensions must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(NewsframeError::validation(format!(
                "canvas {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }
}

/// Straight (non-premultiplied) opaque RGB color.
///
/// Serialized as a `[r, g, b]` array, which is how template configs spell colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived luminance (ITU-R BT.601 weights), in `0.0..=255.0`.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// Parse `#RGB`, `#RRGGBB` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> NewsframeResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn nibble(c: u8) -> Option<u8> {
            (c as char).to_digit(16).map(|d| d as u8)
        }

        let bytes = s.as_bytes();
        let bad = || NewsframeError::validation(format!("invalid hex color \"{s}\""));
        match bytes.len() {
            3 => {
                let mut out = [0u8; 3];
                for (dst, &c) in out.iter_mut().zip(bytes) {
                    let n = nibble(c).ok_or_else(bad)?;
                    *dst = n * 17;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            6 => {
                let mut out = [0u8; 3];
                for (dst, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
                    let hi = nibble(pair[0]).ok_or_else(bad)?;
                    let lo = nibble(pair[1]).ok_or_else(bad)?;
                    *dst = hi * 16 + lo;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            _ => Err(NewsframeError::validation(
                "hex color must be #RGB or #RRGGBB (case-insensitive)",
            )),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self, a: u8) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, a])
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<(u8, u8, u8)> for Rgb8 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
