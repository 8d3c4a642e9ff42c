use palette::Srgb;

/// An 8-bit sRGB triple. Alpha is dropped as soon as pixels enter the pipeline.
pub type Color = Srgb<u8>;

/// Normalized perceptual brightness in `[0, 1]` (Rec. 601 weights).
#[inline(always)]
pub fn luminance(c: Color) -> f64 {
    (0.299 * c.red as f64 + 0.587 * c.green as f64 + 0.114 * c.blue as f64) / 255.0
}

/// `(max - min) / max` over the three channels, `0.0` for black.
#[inline(always)]
pub fn saturation(c: Color) -> f64 {
    let max = c.red.max(c.green).max(c.blue);
    let min = c.red.min(c.green).min(c.blue);
    if max == 0 {
        return 0.0;
    }
    (max - min) as f64 / max as f64
}

/// Squared Euclidean distance in RGB space. Orders pairs exactly like the
/// true distance, without the square root.
#[inline(always)]
pub fn distance_sq(a: Color, b: Color) -> u32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// `#RRGGBB`, uppercase.
pub fn to_hex(c: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_spans_unit_range() {
        assert_eq!(luminance(Srgb::new(0, 0, 0)), 0.0);
        assert!((luminance(Srgb::new(255, 255, 255)) - 1.0).abs() < 1e-9);
        // green dominates the weighting
        assert!(luminance(Srgb::new(0, 255, 0)) > luminance(Srgb::new(255, 0, 0)));
    }

    #[test]
    fn saturation_of_grays_and_black_is_zero() {
        assert_eq!(saturation(Srgb::new(0, 0, 0)), 0.0);
        assert_eq!(saturation(Srgb::new(128, 128, 128)), 0.0);
        assert!((saturation(Srgb::new(200, 30, 30)) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Srgb::new(10, 20, 30);
        let b = Srgb::new(13, 24, 30);
        assert_eq!(distance_sq(a, b), 25);
        assert_eq!(distance_sq(b, a), 25);
        assert_eq!(distance_sq(a, a), 0);
    }

    #[test]
    fn hex_is_zero_padded_uppercase() {
        assert_eq!(to_hex(Srgb::new(0, 10, 255)), "#000AFF");
        assert_eq!(to_hex(Srgb::new(171, 205, 239)), "#ABCDEF");
    }
}
