use image::{Rgba, RgbaImage};

use super::clamp::{saturate, saturate_to};
use crate::FilterError;

pub const RED: [u8; 3] = [255, 0, 0];

/// Builds a layer of uniform `color` whose opacity is `alpha_fraction`.
pub fn make_overlay(width: u32, height: u32, color: [u8; 3], alpha_fraction: f64) -> RgbaImage {
    let [r, g, b] = color;
    let alpha = saturate_to(256.0 * alpha_fraction, u8::MAX);
    RgbaImage::from_pixel(width, height, Rgba([r, g, b, alpha]))
}

/// Composites `overlay` over `base` into a new image.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage) -> Result<RgbaImage, FilterError> {
    if base.dimensions() != overlay.dimensions() {
        return Err(FilterError::DimensionMismatch {
            base: base.dimensions(),
            overlay: overlay.dimensions(),
        });
    }

    let (width, height) = base.dimensions();
    let mut output = RgbaImage::new(width, height);
    for ((out, below), above) in output.pixels_mut().zip(base.pixels()).zip(overlay.pixels()) {
        *out = over(below, above);
    }

    Ok(output)
}

/// Porter-Duff "over" on straight (non-premultiplied) alpha.
fn over(below: &Rgba<u8>, above: &Rgba<u8>) -> Rgba<u8> {
    let above_alpha = f64::from(above.0[3]) / 255.0;
    let below_alpha = f64::from(below.0[3]) / 255.0;
    let below_weight = below_alpha * (1.0 - above_alpha);
    let alpha = above_alpha + below_weight;
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let mixed = f64::from(above.0[c]) * above_alpha + f64::from(below.0[c]) * below_weight;
        out[c] = saturate(mixed / alpha);
    }
    out[3] = saturate(alpha * 255.0);
    Rgba(out)
}
