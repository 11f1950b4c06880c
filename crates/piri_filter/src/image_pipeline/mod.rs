pub mod adjust;
pub mod clamp;
pub mod loader;
pub mod overlay;
