use crate::foundation::core::Rgb8;

/// Side length images are downsampled to before quantization.
pub const SAMPLE_SIZE: u32 = 150;

/// One adaptive palette color and how many sampled pixels it represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Rgb8,
    pub count: usize,
}

/// Downsample `img` and quantize it to at most `max_colors` entries, most frequent first.
pub fn dominant_palette(img: &image::RgbaImage, max_colors: usize) -> Vec<PaletteEntry> {
    let small = image::imageops::resize(
        img,
        SAMPLE_SIZE,
        SAMPLE_SIZE,
        image::imageops::FilterType::Triangle,
    );
    let pixels: Vec<[u8; 3]> = small.pixels().map(|p| [p[0], p[1], p[2]]).collect();
    median_cut(pixels, max_colors)
}

/// Median-cut quantization.
///
/// Repeatedly splits the box with the widest channel extent at the median of that channel until
/// `max_colors` boxes exist or no box can be split. Each box contributes its mean color, every
/// pixel is then counted toward its nearest palette color. Ordering is by descending count, ties
/// broken by palette order; colors that attract no pixels are dropped.
pub(crate) fn median_cut(pixels: Vec<[u8; 3]>, max_colors: usize) -> Vec<PaletteEntry> {
    if pixels.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut boxes: Vec<Vec<[u8; 3]>> = vec![pixels];
    while boxes.len() < max_colors {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .map(|(i, b)| {
                let (channel, extent) = widest_channel(b);
                (i, channel, extent)
            })
            .filter(|&(_, _, extent)| extent > 0)
            .max_by(|a, b| a.2.cmp(&b.2).then(b.0.cmp(&a.0)));
        let Some((i, channel, _)) = candidate else {
            break;
        };

        let mut target = std::mem::take(&mut boxes[i]);
        target.sort_unstable_by_key(|p| p[channel]);
        let upper = target.split_off(target.len() / 2);
        boxes[i] = target;
        boxes.push(upper);
    }

    let colors: Vec<Rgb8> = boxes
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| mean_color(b))
        .collect();
    let mut counts = vec![0usize; colors.len()];
    for p in boxes.iter().flatten() {
        counts[nearest(&colors, *p)] += 1;
    }

    let mut out: Vec<PaletteEntry> = colors
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(color, count)| PaletteEntry { color, count })
        .collect();
    // Stable sort keeps palette order among equal counts.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Index of the palette color closest to `p` (squared RGB distance, first wins on ties).
fn nearest(colors: &[Rgb8], p: [u8; 3]) -> usize {
    let dist = |c: &Rgb8| {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
        d(c.r, p[0]) + d(c.g, p[1]) + d(c.b, p[2])
    };
    colors
        .iter()
        .enumerate()
        .min_by_key(|(i, c)| (dist(c), *i))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn widest_channel(pixels: &[[u8; 3]]) -> (usize, u8) {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for p in pixels {
        for c in 0..3 {
            lo[c] = lo[c].min(p[c]);
            hi[c] = hi[c].max(p[c]);
        }
    }
    (0..3)
        .map(|c| (c, hi[c] - lo[c]))
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .unwrap_or((0, 0))
}

fn mean_color(pixels: &[[u8; 3]]) -> Rgb8 {
    let mut sum = [0u64; 3];
    for p in pixels {
        for c in 0..3 {
            sum[c] += u64::from(p[c]);
        }
    }
    let n = pixels.len().max(1) as u64;
    let avg = |s: u64| ((s + n / 2) / n) as u8;
    Rgb8::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
