mod image_pipeline;
mod pipeline;

use std::path::PathBuf;

use log::warn;

pub use image_pipeline::{
    adjust::{apply_contrast, brighten, brightness_offset, contrast_gain},
    clamp::{saturate, saturate_to},
    loader::{load_rgba, save_rgba},
    overlay::{composite, make_overlay, RED},
};
pub use pipeline::{Pipeline, PipelineConfig, PipelineEvent, PipelineReport, ProcessedPair};

/// 18% brighter using the offset model.
pub const DEFAULT_BRIGHTNESS_FACTOR: f64 = 1.18;
/// 16% more contrast.
pub const DEFAULT_CONTRAST_FACTOR: f64 = 1.16;
/// 20% overlay opacity.
pub const DEFAULT_ALPHA: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("input image {} does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("failed to load image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("overlay is {}x{} but the base image is {}x{}", .overlay.0, .overlay.1, .base.0, .base.1)]
    DimensionMismatch { base: (u32, u32), overlay: (u32, u32) },
    #[error("contrast factor {factor} puts the contrast level at 259, which has no finite gain")]
    ContrastDomain { factor: f64 },
    #[error("{name} factor must be a finite, non-negative number (got {value})")]
    InvalidFactor { name: &'static str, value: f64 },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Scalar settings for one run of the filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Factors {
    /// Brightness factor; `1.0` leaves the image unchanged.
    pub brightness: f64,
    /// Contrast factor; `1.0` leaves the image unchanged.
    pub contrast: f64,
    /// Overlay opacity; `0.0` is invisible, values of `1.0` and above are fully opaque.
    pub alpha: f64,
}

impl Default for Factors {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS_FACTOR,
            contrast: DEFAULT_CONTRAST_FACTOR,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Factors {
    /// Rejects factors the transforms cannot work with.
    pub fn validate(&self) -> Result<(), FilterError> {
        let named =
            [("brightness", self.brightness), ("contrast", self.contrast), ("alpha", self.alpha)];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(FilterError::InvalidFactor { name, value });
            }
        }

        contrast_gain(self.contrast)?;

        if brightness_offset(self.brightness) >= i32::from(u8::MAX) {
            warn!("brightness factor {} saturates every channel to white", self.brightness);
        }
        if self.alpha > 1.0 {
            warn!("alpha {} is above 1.0, the overlay will be fully opaque", self.alpha);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let factors = Factors::default();
        assert_eq!(factors.brightness, 1.18);
        assert_eq!(factors.contrast, 1.16);
        assert_eq!(factors.alpha, 0.2);
        assert!(factors.validate().is_ok());
    }

    #[test]
    fn rejects_negative_and_non_finite_factors() {
        let factors = Factors { brightness: -0.5, ..Factors::default() };
        assert!(matches!(
            factors.validate(),
            Err(FilterError::InvalidFactor { name: "brightness", .. })
        ));

        let factors = Factors { alpha: f64::NAN, ..Factors::default() };
        assert!(matches!(factors.validate(), Err(FilterError::InvalidFactor { name: "alpha", .. })));

        let factors = Factors { contrast: f64::INFINITY, ..Factors::default() };
        assert!(matches!(
            factors.validate(),
            Err(FilterError::InvalidFactor { name: "contrast", .. })
        ));
    }

    #[test]
    fn alpha_above_one_is_accepted_as_opaque() {
        let factors = Factors { alpha: 1.5, ..Factors::default() };
        assert!(factors.validate().is_ok());
        assert_eq!(make_overlay(1, 1, RED, factors.alpha).get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn rejects_contrast_with_zero_denominator() {
        // 1 + 259/256 lands exactly on level 259.
        let factors = Factors { contrast: 1.0 + 259.0 / 256.0, ..Factors::default() };
        assert!(matches!(factors.validate(), Err(FilterError::ContrastDomain { .. })));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = FilterError::DimensionMismatch { base: (3, 3), overlay: (2, 2) };
        assert_eq!(err.to_string(), "overlay is 2x2 but the base image is 3x3");

        let err = FilterError::InputNotFound(PathBuf::from("missing.png"));
        assert_eq!(err.to_string(), "input image missing.png does not exist");
    }
}
