use std::path::Path;

use image::RgbaImage;
use log::debug;

use crate::FilterError;

/// Decodes the image at `path` and converts it to RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, FilterError> {
    if !path.exists() {
        return Err(FilterError::InputNotFound(path.to_path_buf()));
    }

    let image = image::open(path)?.into_rgba8();
    debug!("loaded {}x{} image from {}", image.width(), image.height(), path.display());
    Ok(image)
}

/// Encodes `image` to `path`, picking the format from the extension.
pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<(), FilterError> {
    image
        .save(path)
        .map_err(|source| FilterError::Write { path: path.to_path_buf(), source })?;
    debug!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}
