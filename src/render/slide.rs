//! Draws one complete slide: background, header, content and footer.

use log::{debug, error, warn};
use web_time::Instant;

use super::canvas::{AvatarImage, Canvas, CanvasError, CanvasResult, TextAlign};
use super::layout::{layout_slide, LayoutContext};
use crate::config::{CanvasConfig, CarouselConfig, ColorsConfig, FontRole};
use crate::constants::{
    AVATAR_BASELINE_OFFSET, AVATAR_SIZE, AVATAR_TEXT_GAP, CHROME_ALPHA, NEXT_SLIDE_ARROW,
};
use crate::errors::{CarouselError, Result};
use crate::models::settings::CarouselSettings;
use crate::models::slide::Slide;
use crate::text::color::contrast_color;
use crate::text::font::FontCache;

/// Resolved colors for one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub text: String,
    /// Color for bold+underline runs.
    pub accent: String,
    pub slide_is_accent: bool,
}

impl Palette {
    /// Accent slides sit on the brand color with contrasting text; default slides use
    /// the configured colors and keep the brand color for emphasis.
    pub fn for_slide(slide: &Slide, settings: &CarouselSettings, colors: &ColorsConfig) -> Self {
        let brand = settings.brand_color_or(&colors.accent_fallback);
        if slide.is_accent() {
            let text = contrast_color(brand).to_string();
            Self {
                background: brand.to_string(),
                accent: text.clone(),
                text,
                slide_is_accent: true,
            }
        } else {
            Self {
                background: colors.default_background.clone(),
                text: colors.default_text.clone(),
                accent: brand.to_string(),
                slide_is_accent: false,
            }
        }
    }
}

/// Position of a slide within its carousel, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePosition {
    pub number: usize,
    pub total: usize,
}

impl SlidePosition {
    pub fn is_last(&self) -> bool {
        self.number >= self.total
    }
}

/// Draws `slide` onto a fresh canvas.
///
/// Any failure is reported as `RenderFailed` carrying the slide number.
pub fn render_slide<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    config: &CarouselConfig,
    settings: &CarouselSettings,
    slide: &Slide,
    position: SlidePosition,
    avatar: Option<&AvatarImage>,
) -> Result<()> {
    let started = Instant::now();
    debug!("Rendering slide {} ({})", position.number, slide.slide_type);

    let outcome = draw_slide(canvas, fonts, config, settings, slide, position, avatar);
    match outcome {
        Ok(()) => {
            debug!(
                "Slide {} rendered in {:?} (avatar: {})",
                position.number,
                started.elapsed(),
                avatar.is_some()
            );
            Ok(())
        }
        Err(err) => {
            error!("Failed to render slide {}: {}", position.number, err);
            Err(err.at_slide(position.number))
        }
    }
}

fn draw_slide<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    config: &CarouselConfig,
    settings: &CarouselSettings,
    slide: &Slide,
    position: SlidePosition,
    avatar: Option<&AvatarImage>,
) -> Result<()> {
    let failed = |err: CanvasError| CarouselError::render_failed(slide.slide_type, err);
    let palette = Palette::for_slide(slide, settings, &config.colors);

    draw_background(canvas, &config.canvas, &palette).map_err(failed)?;
    draw_header(canvas, fonts, config, settings, &palette, position, avatar).map_err(failed)?;

    let ctx = LayoutContext {
        config,
        region: config.canvas.content_region(),
        palette: &palette,
    };
    layout_slide(canvas, fonts, &ctx, slide)?;

    draw_footer(canvas, fonts, config, settings, &palette, position).map_err(failed)
}

fn draw_background<C: Canvas + ?Sized>(
    canvas: &mut C,
    geometry: &CanvasConfig,
    palette: &Palette,
) -> CanvasResult<()> {
    canvas.set_fill_color(&palette.background)?;
    canvas.fill_rounded_rect(
        0.0,
        0.0,
        geometry.width as f32,
        geometry.height as f32,
        geometry.border_radius,
    )
}

/// Username (after the avatar, if any) on the left, `n/total` on the right.
fn draw_header<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    config: &CarouselConfig,
    settings: &CarouselSettings,
    palette: &Palette,
    position: SlidePosition,
    avatar: Option<&AvatarImage>,
) -> CanvasResult<()> {
    let geometry = &config.canvas;
    let baseline = geometry.header_footer_padding;
    begin_chrome(canvas, fonts, config, palette)?;

    let mut x = geometry.padding;
    if let Some(image) = avatar {
        let top = baseline - AVATAR_SIZE / 2.0 - AVATAR_BASELINE_OFFSET;
        draw_avatar(canvas, image, x, top)?;
        x += AVATAR_SIZE + AVATAR_TEXT_GAP;
    }
    canvas.fill_text(settings.author_username(), x, baseline)?;

    canvas.set_text_align(TextAlign::Right)?;
    let counter = format!("{}/{}", position.number, position.total);
    canvas.fill_text(&counter, geometry.width as f32 - geometry.padding, baseline)?;
    end_chrome(canvas)
}

/// Author name on the left, a continuation arrow on the right of all but the last slide.
fn draw_footer<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    config: &CarouselConfig,
    settings: &CarouselSettings,
    palette: &Palette,
    position: SlidePosition,
) -> CanvasResult<()> {
    let geometry = &config.canvas;
    let baseline = geometry.height as f32 - geometry.header_footer_padding;
    begin_chrome(canvas, fonts, config, palette)?;

    canvas.fill_text(settings.author_full_name(), geometry.padding, baseline)?;
    if !position.is_last() {
        canvas.set_text_align(TextAlign::Right)?;
        canvas.fill_text(
            NEXT_SLIDE_ARROW,
            geometry.width as f32 - geometry.padding,
            baseline,
        )?;
    }
    end_chrome(canvas)
}

fn begin_chrome<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    config: &CarouselConfig,
    palette: &Palette,
) -> CanvasResult<()> {
    let spec = config.fonts.spec(FontRole::HeaderFooter);
    canvas.set_font(&fonts.font(spec.weight, spec.size))?;
    canvas.set_fill_color(&palette.text)?;
    canvas.set_alpha(CHROME_ALPHA)?;
    canvas.set_text_align(TextAlign::Left)
}

fn end_chrome<C: Canvas + ?Sized>(canvas: &mut C) -> CanvasResult<()> {
    canvas.set_alpha(1.0)?;
    canvas.set_text_align(TextAlign::Left)
}

/// Circle-clipped avatar. A drawing failure only loses the avatar.
fn draw_avatar<C: Canvas + ?Sized>(
    canvas: &mut C,
    image: &AvatarImage,
    x: f32,
    y: f32,
) -> CanvasResult<()> {
    let radius = AVATAR_SIZE / 2.0;
    let drawn = canvas
        .clip_circle(x + radius, y + radius, radius)
        .and_then(|_| canvas.draw_image(image, x, y, AVATAR_SIZE, AVATAR_SIZE));
    if let Err(err) = drawn {
        warn!("Avatar rendering failed, continuing without it: {}", err);
    }
    canvas.reset_clip()
}
