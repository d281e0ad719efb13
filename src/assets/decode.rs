use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{NewsframeError, NewsframeResult};

/// Decode any supported raster format from memory.
pub fn decode_image(bytes: &[u8]) -> NewsframeResult<image::DynamicImage> {
    if bytes.is_empty() {
        return Err(NewsframeError::decode("image buffer is empty"));
    }
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    if img.width() == 0 || img.height() == 0 {
        return Err(NewsframeError::decode("decoded image has zero size"));
    }
    Ok(img)
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> NewsframeResult<image::DynamicImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Encode straight-alpha RGBA as PNG. Opaque output drops the alpha channel.
pub fn encode_png(img: &image::RgbaImage, opaque: bool) -> NewsframeResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut out);
    if opaque {
        image::DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .write_to(&mut cursor, image::ImageFormat::Png)?;
    } else {
        img.write_to(&mut cursor, image::ImageFormat::Png)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
