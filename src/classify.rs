use serde::{Deserialize, Serialize};

use crate::color::{luminance, to_hex, Color};

pub const FALLBACK_PRIMARY: &str = "#2563EB";
pub const FALLBACK_SECONDARY: &str = "#1E40AF";
pub const FALLBACK_ACCENT: &str = "#F59E0B";
pub const FALLBACK_TEXT: &str = "#1F2937";
pub const FALLBACK_BACKGROUND: &str = "#FFFFFF";

/// The darkest color is only used for text below this luminance.
pub const TEXT_MAX_LUMINANCE: f64 = 0.3;
/// The lightest color is only used as background above this luminance.
pub const BACKGROUND_MIN_LUMINANCE: f64 = 0.8;

/// Named brand roles plus every dominant color, all as `#RRGGBB`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    /// Dominant colors in extraction order.
    pub all_colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: FALLBACK_PRIMARY.to_string(),
            secondary: FALLBACK_SECONDARY.to_string(),
            accent: FALLBACK_ACCENT.to_string(),
            text: FALLBACK_TEXT.to_string(),
            background: FALLBACK_BACKGROUND.to_string(),
            all_colors: Vec::new(),
        }
    }
}

impl Palette {
    /// Number of dominant colors behind this palette.
    pub fn num_colors(&self) -> usize {
        self.all_colors.len()
    }
}

/// Map ordered centroids onto palette roles.
///
/// `primary`, `secondary` and `accent` follow extraction order. `text` and
/// `background` come from the darkest and lightest centroid when they are
/// dark or light enough, otherwise from the fallback constants.
pub fn classify(centroids: &[Color]) -> Palette {
    let Some(&first) = centroids.first() else {
        return Palette::default();
    };

    let role = |idx: usize, fallback: &str| {
        centroids.get(idx).map_or_else(|| fallback.to_string(), |&c| to_hex(c))
    };

    // stable: equal luminances keep extraction order
    let mut by_luminance = centroids.to_vec();
    by_luminance.sort_by(|a, b| luminance(*b).total_cmp(&luminance(*a)));
    let lightest = by_luminance[0];
    let darkest = by_luminance[by_luminance.len() - 1];

    let text = if luminance(darkest) < TEXT_MAX_LUMINANCE {
        to_hex(darkest)
    } else {
        FALLBACK_TEXT.to_string()
    };
    let background = if luminance(lightest) > BACKGROUND_MIN_LUMINANCE {
        to_hex(lightest)
    } else {
        FALLBACK_BACKGROUND.to_string()
    };

    Palette {
        primary: to_hex(first),
        secondary: role(1, FALLBACK_SECONDARY),
        accent: role(2, FALLBACK_ACCENT),
        text,
        background,
        all_colors: centroids.iter().map(|&c| to_hex(c)).collect(),
    }
}
