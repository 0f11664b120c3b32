//! carousel - render a markdown file into SVG carousel slides

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::prelude::*;
use clap::Parser;
use serde::de::DeserializeOwned;

use carousel_tools::config::Limits;
use carousel_tools::render::{HrefAvatarLoader, SvgSurfaceFactory};
use carousel_tools::{generate_carousel, resolve_avatar, CarouselConfig, CarouselSettings};

#[derive(Parser)]
#[command(name = "carousel")]
#[command(version, about = "Render markdown into carousel slides", long_about = None)]
#[command(after_help = "EXAMPLES:
    carousel post.md                         Write slides to ./carousel
    carousel post.md -o out -s settings.json Use brand color and author from settings")]
struct Cli {
    /// Markdown input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory for slide_N.svg files and carousel.json
    #[arg(short, long, default_value = "carousel")]
    out_dir: PathBuf,

    /// Request settings as JSON (brandColor, authorUsername, finalSlide, ...)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Canvas, font and limit configuration as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable text length, slide count and deadline limits
    #[arg(long)]
    no_limits: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let settings: CarouselSettings = read_json_or_default(cli.settings.as_deref())?;
    let mut config: CarouselConfig = read_json_or_default(cli.config.as_deref())?;
    if cli.no_limits {
        config.limits = Limits::unlimited();
    }

    let avatar = resolve_avatar(&HrefAvatarLoader, &settings);
    let factory = SvgSurfaceFactory::new(config.fonts.family.clone());
    let carousel = generate_carousel(&factory, &config, &text, &settings, avatar.as_ref())?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let mut images = Vec::with_capacity(carousel.surfaces.len());
    for (i, surface) in carousel.surfaces.into_iter().enumerate() {
        let svg = surface.finish();
        let path = cli.out_dir.join(format!("slide_{}.svg", i + 1));
        fs::write(&path, &svg).with_context(|| format!("writing {}", path.display()))?;
        log::debug!("Slide {} saved to {}", i + 1, path.display());
        images.push(BASE64_STANDARD.encode(svg.as_bytes()));
    }

    let manifest = serde_json::json!({
        "slides": carousel.slides,
        "images": images,
        "metadata": carousel.metadata,
    });
    let manifest_path = cli.out_dir.join("carousel.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    log::info!(
        "Wrote {} slides to {}",
        carousel.metadata.total_slides,
        cli.out_dir.display()
    );
    Ok(())
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
