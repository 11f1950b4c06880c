use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use piri_filter::{
    Factors, Pipeline, PipelineConfig, DEFAULT_ALPHA, DEFAULT_BRIGHTNESS_FACTOR,
    DEFAULT_CONTRAST_FACTOR,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prepare near-infrared images for grayscale and color printing")]
struct Cli {
    /// Input image
    #[arg(short, long)]
    input: PathBuf,
    /// Output image; written as grayscale_<output> and color_<output>
    #[arg(short, long, default_value = "output.png")]
    output: String,
    /// Brightness factor
    #[arg(short, long, default_value_t = DEFAULT_BRIGHTNESS_FACTOR)]
    brightness_factor: f64,
    /// Contrast factor
    #[arg(short, long, default_value_t = DEFAULT_CONTRAST_FACTOR)]
    contrast_factor: f64,
    /// Alpha value for the red layer
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
    /// Log debug details to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    println!("PIRI v{}", env!("CARGO_PKG_VERSION"));

    let pipeline = Pipeline::new(cli.to_config()).context("invalid filter settings")?;
    pipeline.run().with_context(|| format!("failed to process {:?}", cli.input))?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

impl Cli {
    fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(&self.input);
        config.output = self.output.clone();
        config.factors = Factors {
            brightness: self.brightness_factor,
            contrast: self.contrast_factor,
            alpha: self.alpha,
        };
        config
    }
}
