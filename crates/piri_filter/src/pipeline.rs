use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;

use crate::image_pipeline::{adjust, loader, overlay};
use crate::{Factors, FilterError};

const GRAYSCALE_PREFIX: &str = "grayscale_";
const COLOR_PREFIX: &str = "color_";

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub input: PathBuf,
    /// Base file name; the outputs are written as `grayscale_<output>` and `color_<output>`.
    pub output: String,
    /// Directory for the outputs. `None` writes to the working directory.
    pub output_dir: Option<PathBuf>,
    pub factors: Factors,
    pub overlay_color: [u8; 3],
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: String::from("output.png"),
            output_dir: None,
            factors: Factors::default(),
            overlay_color: overlay::RED,
        }
    }

    pub fn grayscale_path(&self) -> PathBuf {
        self.output_path(GRAYSCALE_PREFIX)
    }

    pub fn color_path(&self) -> PathBuf {
        self.output_path(COLOR_PREFIX)
    }

    fn output_path(&self, prefix: &str) -> PathBuf {
        let name = format!("{prefix}{}", self.output);
        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Progress notifications emitted while the pipeline runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineEvent {
    Loaded(PathBuf),
    SavedGrayscale(PathBuf),
    SavedColor(PathBuf),
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::Loaded(path) => write!(f, "[*] Loaded image '{}'", path.display()),
            PipelineEvent::SavedGrayscale(path) => {
                write!(f, "[*] Saved processed image for grayscale print to '{}'", path.display())
            },
            PipelineEvent::SavedColor(path) => write!(
                f,
                "[*] Saved processed image with red layer for color print to '{}'",
                path.display()
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    pub grayscale_path: PathBuf,
    pub color_path: PathBuf,
}

/// The two variants produced from one input.
#[derive(Clone, Debug)]
pub struct ProcessedPair {
    /// Brightness and contrast adjusted, still RGBA.
    pub grayscale: RgbaImage,
    /// `grayscale` with the overlay composited on top.
    pub color: RgbaImage,
}

#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, FilterError> {
        config.factors.validate()?;
        Ok(Self { config })
    }

    /// Runs every step in memory, without touching the filesystem.
    pub fn process_image(&self, mut image: RgbaImage) -> Result<ProcessedPair, FilterError> {
        self.adjust(&mut image)?;
        let color = self.overlay(&image)?;
        Ok(ProcessedPair { grayscale: image, color })
    }

    /// Runs the pipeline and prints progress to stdout.
    pub fn run(&self) -> Result<PipelineReport, FilterError> {
        self.run_with(|event| println!("{event}"))
    }

    /// Runs the pipeline, reporting each completed step to `observer`.
    ///
    /// Outputs are not rolled back: if the color output fails, the grayscale
    /// output stays on disk.
    pub fn run_with<F>(&self, mut observer: F) -> Result<PipelineReport, FilterError>
    where
        F: FnMut(&PipelineEvent),
    {
        let input = self.config.input.as_path();
        let mut image = loader::load_rgba(input)?;
        observer(&PipelineEvent::Loaded(input.to_path_buf()));

        self.adjust(&mut image)?;

        let grayscale_path = self.config.grayscale_path();
        loader::save_rgba(&image, &grayscale_path)?;
        observer(&PipelineEvent::SavedGrayscale(grayscale_path.clone()));

        let color = self.overlay(&image)?;
        let color_path = self.config.color_path();
        loader::save_rgba(&color, &color_path)?;
        observer(&PipelineEvent::SavedColor(color_path.clone()));

        Ok(PipelineReport { grayscale_path, color_path })
    }

    fn adjust(&self, image: &mut RgbaImage) -> Result<(), FilterError> {
        adjust::brighten(image, self.config.factors.brightness);
        adjust::apply_contrast(image, self.config.factors.contrast)
    }

    fn overlay(&self, image: &RgbaImage) -> Result<RgbaImage, FilterError> {
        let layer = overlay::make_overlay(
            image.width(),
            image.height(),
            self.config.overlay_color,
            self.config.factors.alpha,
        );
        overlay::composite(image, &layer)
    }
}
