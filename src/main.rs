//! Render a scene to an image
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use weekend_tracer::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Recursive path tracer", long_about = None)]
struct Args {
    /// YAML scene description. Defaults to the built-in three spheres scene
    #[arg(short, long, conflicts_with = "cover")]
    scene: Option<PathBuf>,

    /// Render the built-in random spheres cover scene
    #[arg(long)]
    cover: bool,

    /// Output image (.ppm, .png, ...). Writes PPM to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for every random draw, the same seed renders the same image
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum number of bounces
    #[arg(long)]
    max_depth: Option<u32>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut rng = StdRng::seed_from_u64(args.seed);

    let mut scene = if let Some(path) = &args.scene {
        let config = SceneConfig::from_path(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?;
        Scene::from_config(config)?
    } else if args.cover {
        Scene::cover(&mut rng)
    } else {
        Scene::three_spheres()
    };

    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.camera.max_depth = max_depth;
    }

    let camera = Camera::from_config(&scene.camera).context("invalid camera")?;
    info!("{} objects, seed {}", scene.world.len(), args.seed);

    let bar = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(camera.image_height() as u64)
    };
    bar.set_style(
        ProgressStyle::with_template("{elapsed_precise} [{bar:40}] {pos}/{len} scanlines")?
            .progress_chars("=> "),
    );
    let image = camera.render_with_progress(&scene.world, &mut rng, |remaining| {
        bar.set_position((camera.image_height() - remaining) as u64)
    });
    bar.finish();

    match &args.output {
        Some(path) => image.save(path)?,
        None => image.write_ppm(&mut io::stdout().lock())?,
    }
    Ok(())
}
