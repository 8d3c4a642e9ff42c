use crate::color::{luminance, saturation, Color};

pub const MAX_LUMINANCE: f64 = 0.95;
pub const MIN_LUMINANCE: f64 = 0.05;
pub const MIN_SATURATION: f64 = 0.15;

/// Close enough to white to say nothing about the brand.
#[inline(always)]
pub fn is_too_light(c: Color) -> bool {
    luminance(c) > MAX_LUMINANCE
}

#[inline(always)]
pub fn is_too_dark(c: Color) -> bool {
    luminance(c) < MIN_LUMINANCE
}

#[inline(always)]
pub fn is_too_gray(c: Color) -> bool {
    saturation(c) < MIN_SATURATION
}

#[inline(always)]
pub fn is_informative(c: Color) -> bool {
    !is_too_light(c) && !is_too_dark(c) && !is_too_gray(c)
}

/// Keep only the informative colors, in order.
///
/// Returns `None` when nothing survives so the caller can fall back to the
/// unfiltered sample.
pub fn filter_colors(sampled: &[Color]) -> Option<Vec<Color>> {
    let kept: Vec<Color> = sampled.iter().copied().filter(|&c| is_informative(c)).collect();
    if kept.is_empty() { None } else { Some(kept) }
}
