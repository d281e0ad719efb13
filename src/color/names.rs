//! Web color names with exact and fuzzy lookup.

use crate::foundation::core::Rgb8;

/// Minimum similarity for a fuzzy name match.
pub const FUZZY_CUTOFF: f64 = 0.6;

/// Standard HTML/CSS color names, lowercase without spaces.
pub const HTML_COLORS: &[(&str, &str)] = &[
    ("indianred", "#CD5C5C"),
    ("lightcoral", "#F08080"),
    ("salmon", "#FA8072"),
    ("darksalmon", "#E9967A"),
    ("lightsalmon", "#FFA07A"),
    ("crimson", "#DC143C"),
    ("red", "#FF0000"),
    ("firebrick", "#B22222"),
    ("darkred", "#8B0000"),
    ("pink", "#FFC0CB"),
    ("lightpink", "#FFB6C1"),
    ("hotpink", "#FF69B4"),
    ("deeppink", "#FF1493"),
    ("mediumvioletred", "#C71585"),
    ("palevioletred", "#DB7093"),
    ("coral", "#FF7F50"),
    ("tomato", "#FF6347"),
    ("orangered", "#FF4500"),
    ("darkorange", "#FF8C00"),
    ("orange", "#FFA500"),
    ("gold", "#FFD700"),
    ("yellow", "#FFFF00"),
    ("lightyellow", "#FFFFE0"),
    ("lemonchiffon", "#FFFACD"),
    ("lightgoldenrodyellow", "#FAFAD2"),
    ("papayawhip", "#FFEFD5"),
    ("moccasin", "#FFE4B5"),
    ("peachpuff", "#FFDAB9"),
    ("palegoldenrod", "#EEE8AA"),
    ("khaki", "#F0E68C"),
    ("darkkhaki", "#BDB76B"),
    ("lavender", "#E6E6FA"),
    ("thistle", "#D8BFD8"),
    ("plum", "#DDA0DD"),
    ("violet", "#EE82EE"),
    ("orchid", "#DA70D6"),
    ("fuchsia", "#FF00FF"),
    ("magenta", "#FF00FF"),
    ("mediumorchid", "#BA55D3"),
    ("mediumpurple", "#9370DB"),
    ("rebeccapurple", "#663399"),
    ("blueviolet", "#8A2BE2"),
    ("darkviolet", "#9400D3"),
    ("darkorchid", "#9932CC"),
    ("darkmagenta", "#8B008B"),
    ("purple", "#800080"),
    ("indigo", "#4B0082"),
    ("slateblue", "#6A5ACD"),
    ("darkslateblue", "#483D8B"),
    ("mediumslateblue", "#7B68EE"),
    ("greenyellow", "#ADFF2F"),
    ("chartreuse", "#7FFF00"),
    ("lawngreen", "#7CFC00"),
    ("lime", "#00FF00"),
    ("limegreen", "#32CD32"),
    ("palegreen", "#98FB98"),
    ("lightgreen", "#90EE90"),
    ("mediumspringgreen", "#00FA9A"),
    ("springgreen", "#00FF7F"),
    ("mediumseagreen", "#3CB371"),
    ("seagreen", "#2E8B57"),
    ("forestgreen", "#228B22"),
    ("green", "#008000"),
    ("darkgreen", "#006400"),
    ("yellowgreen", "#9ACD32"),
    ("olivedrab", "#6B8E23"),
    ("olive", "#808000"),
    ("darkolivegreen", "#556B2F"),
    ("mediumaquamarine", "#66CDAA"),
    ("darkseagreen", "#8FBC8B"),
    ("lightseagreen", "#20B2AA"),
    ("darkcyan", "#008B8B"),
    ("teal", "#008080"),
    ("aqua", "#00FFFF"),
    ("cyan", "#00FFFF"),
    ("lightcyan", "#E0FFFF"),
    ("paleturquoise", "#AFEEEE"),
    ("aquamarine", "#7FFFD4"),
    ("turquoise", "#40E0D0"),
    ("mediumturquoise", "#48D1CC"),
    ("darkturquoise", "#00CED1"),
    ("cadetblue", "#5F9EA0"),
    ("steelblue", "#4682B4"),
    ("lightsteelblue", "#B0C4DE"),
    ("powderblue", "#B0E0E6"),
    ("lightblue", "#ADD8E6"),
    ("skyblue", "#87CEEB"),
    ("lightskyblue", "#87CEFA"),
    ("deepskyblue", "#00BFFF"),
    ("dodgerblue", "#1E90FF"),
    ("cornflowerblue", "#6495ED"),
    ("royalblue", "#4169E1"),
    ("blue", "#0000FF"),
    ("mediumblue", "#0000CD"),
    ("darkblue", "#00008B"),
    ("navy", "#000080"),
    ("midnightblue", "#191970"),
    ("cornsilk", "#FFF8DC"),
    ("blanchedalmond", "#FFEBCD"),
    ("bisque", "#FFE4C4"),
    ("navajowhite", "#FFDEAD"),
    ("wheat", "#F5DEB3"),
    ("burlywood", "#DEB887"),
    ("tan", "#D2B48C"),
    ("rosybrown", "#BC8F8F"),
    ("sandybrown", "#F4A460"),
    ("goldenrod", "#DAA520"),
    ("darkgoldenrod", "#B8860B"),
    ("peru", "#CD853F"),
    ("chocolate", "#D2691E"),
    ("saddlebrown", "#8B4513"),
    ("sienna", "#A0522D"),
    ("brown", "#A52A2A"),
    ("maroon", "#800000"),
    ("white", "#FFFFFF"),
    ("snow", "#FFFAFA"),
    ("honeydew", "#F0FFF0"),
    ("mintcream", "#F5FFFA"),
    ("azure", "#F0FFFF"),
    ("aliceblue", "#F0F8FF"),
    ("ghostwhite", "#F8F8FF"),
    ("whitesmoke", "#F5F5F5"),
    ("seashell", "#FFF5EE"),
    ("beige", "#F5F5DC"),
    ("oldlace", "#FDF5E6"),
    ("floralwhite", "#FFFAF0"),
    ("ivory", "#FFFFF0"),
    ("antiquewhite", "#FAEBD7"),
    ("linen", "#FAF0E6"),
    ("lavenderblush", "#FFF0F5"),
    ("mistyrose", "#FFE4E1"),
    ("gainsboro", "#DCDCDC"),
    ("lightgray", "#D3D3D3"),
    ("silver", "#C0C0C0"),
    ("darkgray", "#A9A9A9"),
    ("gray", "#808080"),
    ("dimgray", "#696969"),
    ("lightslategray", "#778899"),
    ("slategray", "#708090"),
    ("darkslategray", "#2F4F4F"),
    ("black", "#000000"),
];

/// Result of a color-name lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedColorMatch {
    /// Canonical table name that matched.
    pub name: &'static str,
    /// Table hex value, `#RRGGBB`.
    pub hex: &'static str,
    /// `false` when the match came from the fuzzy fallback.
    pub exact: bool,
}

impl NamedColorMatch {
    pub fn rgb(&self) -> Option<Rgb8> {
        Rgb8::from_hex(self.hex).ok()
    }
}

/// Find a table color by name.
///
/// Input is lowercased and stripped of whitespace. Exact hits win; otherwise the most similar
/// name scoring at least [`FUZZY_CUTOFF`] is returned (first in table order on ties).
pub fn lookup_color_name(input: &str) -> Option<NamedColorMatch> {
    let clean: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if clean.is_empty() {
        return None;
    }

    if let Some(&(name, hex)) = HTML_COLORS.iter().find(|(name, _)| *name == clean) {
        return Some(NamedColorMatch {
            name,
            hex,
            exact: true,
        });
    }

    let mut best: Option<(f64, &'static str, &'static str)> = None;
    for &(name, hex) in HTML_COLORS {
        let score = similarity(&clean, name);
        if score >= FUZZY_CUTOFF && best.is_none_or(|(s, _, _)| score > s) {
            best = Some((score, name, hex));
        }
    }
    best.map(|(score, name, hex)| {
        tracing::debug!(input, name, score, "fuzzy color name match");
        NamedColorMatch {
            name,
            hex,
            exact: false,
        }
    })
}

/// `1 - distance / longest`, where distance is the optimal-string-alignment edit distance.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - (osa_distance(&a, &b) as f64) / (longest as f64)
}

/// Levenshtein distance that also counts an adjacent transposition as one edit.
fn osa_distance(a: &[char], b: &[char]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut d = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        d[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut v = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                v = v.min(d[i - 2][j - 2] + 1);
            }
            d[i][j] = v;
        }
    }
    d[n][m]
}

#[cfg(test)]
#[path = "../../tests/unit/color/names.rs"]
mod tests;
