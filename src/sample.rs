use crate::color::Color;

/// Target size of the working set handed to the filter and k-means.
/// This is the only latency knob of the pipeline.
pub const SAMPLE_CAP: usize = 5000;

/// Deterministic stride subsample.
///
/// Buffers of at most [`SAMPLE_CAP`] pixels pass through untouched. Larger
/// ones keep every `floor(N / SAMPLE_CAP)`-th pixel in scan order across the
/// whole buffer, so the last rows are sampled too. The result stays below
/// `2 * SAMPLE_CAP`.
pub fn sample_pixels(pixels: &[Color]) -> Vec<Color> {
    if pixels.len() <= SAMPLE_CAP {
        return pixels.to_vec();
    }
    let step = pixels.len() / SAMPLE_CAP;
    pixels.iter().step_by(step).copied().collect()
}
