//! Rendering: the canvas abstraction, slide layouts and carousel orchestration.

pub mod canvas;
pub mod layout;
pub mod slide;
pub mod svg;

#[cfg(test)]
pub(crate) mod testing;

use indexmap::IndexMap;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::time::Duration;
use web_time::Instant;

use crate::config::CarouselConfig;
use crate::converters::final_slide::{append_final_slide, fallback_slide};
use crate::converters::markdown::{transform_with, CommonMarkTokenizer};
use crate::constants::{PROGRESS_LOG_EVERY, PROGRESS_LOG_MIN_SLIDES};
use crate::errors::{CarouselError, Result};
use crate::models::settings::CarouselSettings;
use crate::models::slide::{Slide, SlideType};
use crate::text::font::FontCache;
use crate::validation::ensure_valid;

pub use canvas::{AvatarImage, AvatarLoader, Canvas, HrefAvatarLoader, SurfaceFactory, TextMeasure};
pub use slide::{render_slide, Palette, SlidePosition};
pub use svg::{SvgCanvas, SvgSurfaceFactory};

/// Summary of one carousel run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselMetadata {
    pub total_slides: usize,
    /// Slide count per type, in order of first appearance.
    pub slide_types: IndexMap<SlideType, usize>,
    pub parse_time_ms: u64,
    pub render_time_ms: u64,
    pub total_time_ms: u64,
}

/// The slides, one drawn surface per slide, and run metadata.
#[derive(Debug)]
pub struct Carousel<S> {
    pub slides: Vec<Slide>,
    pub surfaces: Vec<S>,
    pub metadata: CarouselMetadata,
}

/// Turns markdown into drawn slides.
///
/// Steps run in order: validation, markdown transformation, the optional closing
/// slide, the fallback slide when nothing was produced, the slide limit, then
/// rendering. The request deadline is checked before each slide, and the first
/// failing slide aborts the whole carousel.
pub fn generate_carousel<F: SurfaceFactory>(
    factory: &F,
    config: &CarouselConfig,
    text: &str,
    settings: &CarouselSettings,
    avatar: Option<&AvatarImage>,
) -> Result<Carousel<F::Surface>> {
    let started = Instant::now();
    info!(
        "Generating carousel ({} bytes, settings: {:?})",
        text.len(),
        settings.redacted()
    );

    ensure_valid(Some(text), settings, &config.limits)?;

    let mut slides = transform_with(&CommonMarkTokenizer, text, &config.quote)?;
    append_final_slide(&mut slides, settings.final_slide.as_ref());
    if slides.is_empty() {
        slides.push(fallback_slide(text));
    }
    if let Some(max) = config.limits.max_slides {
        if slides.len() > max {
            return Err(CarouselError::TooManySlides {
                count: slides.len(),
                max,
            });
        }
    }

    let parse_time = started.elapsed();
    let slide_types = count_types(&slides);
    info!(
        "Slides parsed: {} ({:?}) in {:?}",
        slides.len(),
        slide_types,
        parse_time
    );

    let render_started = Instant::now();
    let surfaces = render_all(factory, config, settings, &slides, avatar, started)?;
    let render_time = render_started.elapsed();

    let metadata = CarouselMetadata {
        total_slides: slides.len(),
        slide_types,
        parse_time_ms: millis(parse_time),
        render_time_ms: millis(render_time),
        total_time_ms: millis(started.elapsed()),
    };
    info!(
        "Carousel generation completed: {} slides in {}ms (render {}ms)",
        metadata.total_slides, metadata.total_time_ms, metadata.render_time_ms
    );

    Ok(Carousel {
        slides,
        surfaces,
        metadata,
    })
}

fn render_all<F: SurfaceFactory>(
    factory: &F,
    config: &CarouselConfig,
    settings: &CarouselSettings,
    slides: &[Slide],
    avatar: Option<&AvatarImage>,
    started: Instant,
) -> Result<Vec<F::Surface>> {
    let timeout = config.limits.request_timeout();
    let total = slides.len();
    let mut fonts = FontCache::new(config.fonts.family.clone());
    let mut surfaces = Vec::with_capacity(total);

    for (index, slide) in slides.iter().enumerate() {
        let number = index + 1;
        if let Some(timeout) = timeout {
            if started.elapsed() >= timeout {
                error!("Deadline exceeded before slide {} of {}", number, total);
                return Err(CarouselError::Timeout(timeout));
            }
        }

        let mut surface = factory
            .new_surface(config.canvas.width, config.canvas.height)
            .map_err(|err| CarouselError::render_failed(slide.slide_type, err).at_slide(number))?;
        render_slide(
            &mut surface,
            &mut fonts,
            config,
            settings,
            slide,
            SlidePosition { number, total },
            avatar,
        )?;
        surfaces.push(surface);

        if total > PROGRESS_LOG_MIN_SLIDES && number % PROGRESS_LOG_EVERY == 0 {
            info!(
                "Rendering progress: {}/{} ({}%)",
                number,
                total,
                number * 100 / total
            );
        }
    }
    debug!("Font cache holds {} entries", fonts.len());
    Ok(surfaces)
}

/// Loads the avatar named in `settings`. Failures are logged and yield `None`.
pub fn resolve_avatar<L: AvatarLoader + ?Sized>(
    loader: &L,
    settings: &CarouselSettings,
) -> Option<AvatarImage> {
    let url = settings.avatar_url.as_deref().filter(|u| !u.is_empty())?;
    let started = Instant::now();
    match loader.load(url) {
        Ok(image) => {
            debug!(
                "Avatar loaded in {:?} ({}x{})",
                started.elapsed(),
                image.width,
                image.height
            );
            Some(image)
        }
        Err(err) => {
            warn!("Avatar loading failed, continuing without avatar: {}", err);
            None
        }
    }
}

fn count_types(slides: &[Slide]) -> IndexMap<SlideType, usize> {
    let mut counts = IndexMap::new();
    for slide in slides {
        *counts.entry(slide.slide_type).or_insert(0) += 1;
    }
    counts
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
