use wasm_bindgen::prelude::*;
use image::{DynamicImage, GenericImageView, imageops::FilterType};
use js_sys::{Array, Object, Reflect};
use log::debug;
use palette::Srgb;

pub mod classify;
pub mod color;
pub mod error;
pub mod filter;
pub mod kmeans;
pub mod sample;

pub use classify::{classify, Palette};
pub use color::Color;
pub use error::LoadError;
pub use kmeans::{dominant_colors, Dominant};

/// Number of dominant colors extracted when the caller has no preference.
pub const DEFAULT_NUM_COLORS: usize = 6;

/// Decoded images are shrunk so their longest side is at most this many pixels.
pub const DEFAULT_MAX_SIDE: u32 = 200;

// ------------------------------------------------------------
// Palette pipeline
// ------------------------------------------------------------

/// Extract a brand palette from decoded pixels.
///
/// Steps performed:
/// 1. Stride-sample the buffer down to roughly [`sample::SAMPLE_CAP`] pixels.
/// 2. Drop near-white, near-black and low-saturation colors.
/// 3. Run deterministic k-means (`k = num_colors`, capped by distinct colors).
/// 4. Assign the centroids to palette roles.
///
/// If the filter removes every pixel, the roles fall back to the default
/// palette while `all_colors` still lists the first `num_colors` sampled
/// colors. Never fails: an empty buffer yields [`Palette::default`].
pub fn extract_palette(pixels: &[Color], num_colors: usize) -> Palette {
    match dominant_colors(pixels, num_colors) {
        Dominant::Clustered(centroids) => classify(&centroids),
        Dominant::Unfiltered(raw) => Palette {
            all_colors: raw.into_iter().map(color::to_hex).collect(),
            ..Palette::default()
        },
    }
}

// ------------------------------------------------------------
// Pixel buffer adapters
// ------------------------------------------------------------

/// Channel layout of a raw interleaved 8-bit buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// Read interleaved bytes as colors, discarding alpha. A trailing partial
/// pixel is ignored.
pub fn colors_from_raw(raw: &[u8], layout: PixelLayout) -> Vec<Color> {
    raw.chunks_exact(layout.channels())
        .map(|chunk| Srgb::new(chunk[0], chunk[1], chunk[2]))
        .collect()
}

/// Make sure `raw` holds at least `width * height` pixels.
pub fn check_raw_len(raw: &[u8], width: u32, height: u32, layout: PixelLayout) -> error::Result<()> {
    let expected = width as usize * height as usize * layout.channels();
    if raw.len() < expected {
        return Err(LoadError::BufferTooShort { expected, actual: raw.len() });
    }
    Ok(())
}

/// [`extract_palette`] over a `width × height` interleaved buffer. Only the
/// first `width * height` pixels are read.
pub fn extract_palette_raw(
    raw: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    num_colors: usize,
) -> Palette {
    let n_bytes = (width as usize * height as usize * layout.channels()).min(raw.len());
    extract_palette(&colors_from_raw(&raw[..n_bytes], layout), num_colors)
}

/// Pixels of a decoded image in scan order, alpha dropped.
pub fn pixels_from_image(img: &DynamicImage) -> Vec<Color> {
    img.to_rgb8()
        .pixels()
        .map(|p| Srgb::new(p[0], p[1], p[2]))
        .collect()
}

/// [`extract_palette`] over an already decoded image.
pub fn extract_palette_image(img: &DynamicImage, num_colors: usize) -> Palette {
    extract_palette(&pixels_from_image(img), num_colors)
}

/// Shrink (never enlarge) so the longest side is at most `max_side`, keeping
/// the aspect ratio.
pub fn bound_size(img: DynamicImage, max_side: u32) -> DynamicImage {
    let (orig_w, orig_h) = img.dimensions();
    let longest = orig_w.max(orig_h);
    if max_side == 0 || longest <= max_side {
        return img;
    }
    let ratio = max_side as f32 / longest as f32;
    let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
    let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
    debug!("downscaling {orig_w}x{orig_h} to {w}x{h}");
    DynamicImage::ImageRgba8(image::imageops::resize(&img, w, h, FilterType::Nearest))
}

// ------------------------------------------------------------
// WebAssembly bindings
// ------------------------------------------------------------

/// Build `{ palette, all_colors, num_colors_extracted }` for JavaScript.
fn palette_to_js(p: &Palette) -> Result<Object, JsValue> {
    let roles = Object::new();
    for (key, value) in [
        ("primary", &p.primary),
        ("secondary", &p.secondary),
        ("accent", &p.accent),
        ("text", &p.text),
        ("background", &p.background),
    ] {
        Reflect::set(&roles, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }

    let all_colors = Array::new();
    for hex in &p.all_colors {
        all_colors.push(&JsValue::from_str(hex));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &roles)?;
    Reflect::set(&result, &JsValue::from_str("all_colors"), &all_colors)?;
    Reflect::set(
        &result,
        &JsValue::from_str("num_colors_extracted"),
        &JsValue::from_f64(p.num_colors() as f64),
    )?;
    Ok(result)
}

/// Extract a palette from encoded image bytes (PNG, JPEG, ...).
///
/// The image is first bounded to `max_side` (default 200) pixels on its
/// longest side.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    input: Vec<u8>,
    num_colors: Option<usize>,
    max_side: Option<u32>,
) -> Result<Object, JsValue> {
    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&LoadError::from(e).to_string()))?;
    let img = bound_size(img, max_side.unwrap_or(DEFAULT_MAX_SIDE));
    let palette = extract_palette_image(&img, num_colors.unwrap_or(DEFAULT_NUM_COLORS));
    palette_to_js(&palette)
}

/// Extract a palette from canvas `ImageData` bytes (RGBA, row-major).
#[wasm_bindgen(js_name = extractPaletteRgba)]
pub fn extract_palette_rgba_js(
    data: Vec<u8>,
    width: u32,
    height: u32,
    num_colors: Option<usize>,
) -> Result<Object, JsValue> {
    check_raw_len(&data, width, height, PixelLayout::Rgba)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let palette = extract_palette_raw(
        &data,
        width,
        height,
        PixelLayout::Rgba,
        num_colors.unwrap_or(DEFAULT_NUM_COLORS),
    );
    palette_to_js(&palette)
}

// ------------------------------------------------------------
// Native loader
// ------------------------------------------------------------

/// Decode `input`, optionally bound its size, and extract a palette.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(
    input: &[u8],
    num_colors: usize,
    max_side: Option<u32>,
) -> error::Result<Palette> {
    let img = image::load_from_memory(input)?;
    let img = match max_side {
        Some(side) => bound_size(img, side),
        None => img,
    };
    Ok(extract_palette_image(&img, num_colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn raw_rgba_drops_alpha_and_partial_pixels() {
        let raw = [200, 30, 30, 0, 30, 30, 200, 255, 9, 9];
        assert_eq!(
            colors_from_raw(&raw, PixelLayout::Rgba),
            vec![Srgb::new(200, 30, 30), Srgb::new(30, 30, 200)]
        );
    }

    #[test]
    fn raw_extraction_reads_only_declared_pixels() {
        // 1x1 red image followed by a stray blue pixel
        let raw = [200, 30, 30, 30, 30, 200];
        let p = extract_palette_raw(&raw, 1, 1, PixelLayout::Rgb, 3);
        assert_eq!(p.all_colors, vec!["#C81E1E"]);
    }

    #[test]
    fn short_buffers_are_reported() {
        let err = check_raw_len(&[0; 7], 2, 1, PixelLayout::Rgba).unwrap_err();
        assert!(matches!(err, LoadError::BufferTooShort { expected: 8, actual: 7 }));
        assert!(check_raw_len(&[0; 8], 2, 1, PixelLayout::Rgba).is_ok());
    }

    #[test]
    fn bound_size_keeps_aspect_and_never_enlarges() {
        let big = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 100, Rgb([1, 2, 3])));
        assert_eq!(bound_size(big, 200).dimensions(), (200, 50));

        let small = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 10, Rgb([1, 2, 3])));
        assert_eq!(bound_size(small.clone(), 200).dimensions(), (40, 10));
        assert_eq!(bound_size(small, 0).dimensions(), (40, 10));
    }

    #[test]
    fn all_filtered_keeps_default_roles_but_reports_sample() {
        let gray = Srgb::new(128, 128, 128);
        let p = extract_palette(&[gray; 50], 2);
        assert_eq!(p.primary, classify::FALLBACK_PRIMARY);
        assert_eq!(p.all_colors, vec!["#808080", "#808080"]);
    }
}
