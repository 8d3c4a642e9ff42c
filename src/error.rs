//! Errors raised while turning encoded image bytes into pixels.
//!
//! The palette pipeline itself never fails; these only come from decoding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// The bytes are not an image format `image` can decode.
    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// A raw pixel buffer is shorter than its stated dimensions.
    #[error("Pixel buffer too short: expected {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, LoadError>;
