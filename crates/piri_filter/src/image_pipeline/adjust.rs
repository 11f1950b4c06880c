use image::{ImageBuffer, Pixel};
use log::debug;

use super::clamp::saturate;
use crate::FilterError;

/// Mid-gray value the contrast stretch pivots around.
const PIVOT: f64 = 128.0;

/// Additive channel offset for a brightness factor.
pub fn brightness_offset(factor: f64) -> i32 {
    (256.0 * (factor - 1.0)).floor() as i32
}

fn contrast_level(factor: f64) -> i32 {
    (256.0 * (factor - 1.0)).floor() as i32
}

/// Multiplicative gain applied around the pivot for a contrast factor.
pub fn contrast_gain(factor: f64) -> Result<f64, FilterError> {
    let level = contrast_level(factor);
    if level == 259 {
        return Err(FilterError::ContrastDomain { factor });
    }

    let level = f64::from(level);
    Ok((259.0 * (level + 255.0)) / (255.0 * (259.0 - level)))
}

/// Shifts every color channel by the offset derived from `factor`.
///
/// Works on grayscale and RGBA buffers alike; alpha is never touched.
pub fn brighten<P>(buffer: &mut ImageBuffer<P, Vec<u8>>, factor: f64)
where
    P: Pixel<Subpixel = u8>,
{
    let offset = brightness_offset(factor);
    if offset == 0 {
        return;
    }
    debug!("brightness factor {factor} -> offset {offset}");

    let offset = f64::from(offset);
    for pixel in buffer.pixels_mut() {
        pixel.apply_without_alpha(|channel| saturate(f64::from(channel) + offset));
    }
}

/// Stretches every color channel away from (or toward) mid-gray.
///
/// Fails before touching the buffer when the factor has no finite gain.
pub fn apply_contrast<P>(
    buffer: &mut ImageBuffer<P, Vec<u8>>,
    factor: f64,
) -> Result<(), FilterError>
where
    P: Pixel<Subpixel = u8>,
{
    let gain = contrast_gain(factor)?;
    debug!("contrast factor {factor} -> gain {gain:.4}");

    for pixel in buffer.pixels_mut() {
        pixel.apply_without_alpha(|channel| saturate(gain * (f64::from(channel) - PIVOT) + PIVOT));
    }

    Ok(())
}
