//! Average colour of a backdrop image.

use anyhow::{Context, Result};

/// Sampling stride over the thumbnail's pixels.
const SAMPLE_STRIDE: usize = 10;

/// Alpha threshold below which pixels are ignored.
const MIN_ALPHA: u8 = 128;

/// Fallback for images without opaque pixels.
const FALLBACK_COLOUR: &str = "#808080";

/// Decodes an encoded image and returns its average opaque colour as `#rrggbb`.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded as an image.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn average_colour(bytes: &[u8]) -> Result<String> {
    let image = image::load_from_memory(bytes).context("failed to decode backdrop image")?;
    let rgba = image.thumbnail(160, 90).to_rgba8();

    let (mut r_sum, mut g_sum, mut b_sum, mut count) = (0u64, 0u64, 0u64, 0u64);
    for pixel in rgba.pixels().step_by(SAMPLE_STRIDE) {
        let [r, g, b, a] = pixel.0;
        if a > MIN_ALPHA {
            r_sum = r_sum.saturating_add(u64::from(r));
            g_sum = g_sum.saturating_add(u64::from(g));
            b_sum = b_sum.saturating_add(u64::from(b));
            count = count.saturating_add(1);
        }
    }

    let Some(divisor) = std::num::NonZeroU64::new(count) else {
        return Ok(String::from(FALLBACK_COLOUR));
    };

    // Averages of u8 samples always fit in u8.
    let r = (r_sum / divisor) as u8;
    let g = (g_sum / divisor) as u8;
    let b = (b_sum / divisor) as u8;
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}
