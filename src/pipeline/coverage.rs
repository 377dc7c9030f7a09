//! Approximate CMYK ink coverage from RGB pixel data.
//!
//! This is a naive RGB→CMYK split, not a colour-managed conversion:
//! 1. K = 1 - max(R, G, B)
//! 2. C = (1 - R - K) / (1 - K + ε), likewise M from G and Y from B
//! 3. C/M/Y coverage averages only pixels with a positive value for that channel,
//!    so white background does not dilute it
//! 4. K coverage averages every pixel

use crate::models::{CoverageResult, PerChannel};
use crate::pipeline::round2;
use image::{ImageFormat, Rgb, RgbImage};

/// Keeps the C/M/Y denominator non-zero for pure black pixels.
pub const EPSILON: f64 = 1e-10;

const SUPPORTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Tiff,
    ImageFormat::Bmp,
];

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("unsupported image format: {0} (expected PNG, JPEG, TIFF or BMP)")]
    Unsupported(String),

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug)]
pub struct DecodedImage {
    pub format: ImageFormat,
    pub pixels: RgbImage,
}

/// Decode uploaded bytes into 8-bit RGB. The format is sniffed from the content.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes)?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(DecodeError::Unsupported(format!("{:?}", format)));
    }

    let pixels = image::load_from_memory_with_format(bytes, format)?.to_rgb8();
    Ok(DecodedImage { format, pixels })
}

/// Per-pixel CMYK in [0, 1].
pub fn pixel_to_cmyk(pixel: &Rgb<u8>) -> PerChannel<f64> {
    let [r, g, b] = pixel.0.map(|v| f64::from(v) / 255.0);
    let k = 1.0 - r.max(g).max(b);
    let denom = 1.0 - k + EPSILON;
    PerChannel {
        cyan: (1.0 - r - k) / denom,
        magenta: (1.0 - g - k) / denom,
        yellow: (1.0 - b - k) / denom,
        black: k,
    }
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Percentage of the mean; an empty set counts as no ink.
    fn percent(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round2(self.sum / self.count as f64 * 100.0)
        }
    }
}

pub fn estimate(image: &RgbImage) -> CoverageResult {
    let mut cyan = Mean::default();
    let mut magenta = Mean::default();
    let mut yellow = Mean::default();
    let mut black = Mean::default();

    for pixel in image.pixels() {
        let cmyk = pixel_to_cmyk(pixel);
        for (mean, value) in [
            (&mut cyan, cmyk.cyan),
            (&mut magenta, cmyk.magenta),
            (&mut yellow, cmyk.yellow),
        ] {
            if value > 0.0 {
                mean.add(value);
            }
        }
        black.add(cmyk.black);
    }

    PerChannel {
        cyan: cyan.percent(),
        magenta: magenta.percent(),
        yellow: yellow.percent(),
        black: black.percent(),
    }
}
