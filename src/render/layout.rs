//! Per-type content layouts: intro, text and quote.
//!
//! Each layout starts at the top of the content region and manages its own vertical
//! cursor. Empty titles and bodies are skipped without leaving a gap. Canvas failures
//! surface as `CarouselError::RenderFailed` for the slide's type.

use log::error;

use super::canvas::{Canvas, CanvasResult, TextAlign};
use super::slide::Palette;
use crate::config::{CarouselConfig, ContentRegion, FontRole, FontSpec};
use crate::constants::{
    BULLET_ARROW, BULLET_MARKER, INTRO_TITLE_HEIGHT_SHARE, SUBTITLE_ALPHA, TEXT_TITLE_HEIGHT_SHARE,
};
use crate::errors::{CarouselError, Result};
use crate::models::slide::{QuoteSize, Slide, SlideType};
use crate::text::fit::{select_font_size, SizeRequest};
use crate::text::font::{FontCache, FontWeight};
use crate::text::rich::{compose_rich_text, RichTextBlock};
use crate::text::wrap::try_wrap_text;

/// Everything a layout needs besides the canvas and the slide.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub config: &'a CarouselConfig,
    pub region: ContentRegion,
    pub palette: &'a Palette,
}

impl LayoutContext<'_> {
    fn font(&self, role: FontRole) -> &FontSpec {
        self.config.fonts.spec(role)
    }
}

/// Lays out the content of `slide` according to its type.
pub fn layout_slide<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    ctx: &LayoutContext<'_>,
    slide: &Slide,
) -> Result<()> {
    let outcome = match slide.slide_type {
        SlideType::Intro => layout_intro(canvas, fonts, ctx, slide),
        SlideType::Text => layout_text(canvas, fonts, ctx, slide),
        SlideType::Quote => layout_quote(canvas, fonts, ctx, slide),
    };
    outcome.map_err(|err| {
        error!("{} slide layout failed: {}", slide.slide_type, err);
        CarouselError::render_failed(slide.slide_type, err)
    })
}

/// Title against 60% of the region, then the subtitle in the remaining height.
pub fn layout_intro<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    ctx: &LayoutContext<'_>,
    slide: &Slide,
) -> CanvasResult<()> {
    let region = ctx.region;
    begin_content(canvas, ctx)?;

    let mut y = region.y;
    let title = slide.title_text();
    if !title.trim().is_empty() {
        let max_height = region.height * INTRO_TITLE_HEIGHT_SHARE;
        let spec = ctx.font(FontRole::TitleIntro);
        y = draw_plain_block(canvas, fonts, ctx, title, spec, max_height, y)?;
    }

    if !slide.text.trim().is_empty() {
        if y > region.y {
            y += ctx.config.spacing.heading_to_body;
        }
        let remaining = region.height - (y - region.y);
        canvas.set_alpha(SUBTITLE_ALPHA)?;
        let spec = ctx.font(FontRole::SubtitleIntro);
        draw_plain_block(canvas, fonts, ctx, &slide.text, spec, remaining, y)?;
        canvas.set_alpha(1.0)?;
    }
    Ok(())
}

/// Optional title against 30% of the region, then body paragraphs with rich text.
///
/// The body size is chosen once for the whole text. Paragraphs starting with the
/// bullet marker get a bold arrow and a hanging indent instead.
pub fn layout_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    ctx: &LayoutContext<'_>,
    slide: &Slide,
) -> CanvasResult<()> {
    let region = ctx.region;
    let spacing = &ctx.config.spacing;
    begin_content(canvas, ctx)?;

    let mut y = region.y;
    let title = slide.title_text();
    if !title.trim().is_empty() {
        let max_height = region.height * TEXT_TITLE_HEIGHT_SHARE;
        let spec = ctx.font(FontRole::TitleText);
        y = draw_plain_block(canvas, fonts, ctx, title, spec, max_height, y)?;
        y += spacing.heading_to_body;
    }

    if slide.text.trim().is_empty() {
        return Ok(());
    }

    let spec = ctx.font(FontRole::Text);
    let remaining = region.height - (y - region.y);
    let size = fit_size(canvas, fonts, ctx, &slide.text, spec, region.width, remaining);
    let line_height = spec.line_height(size);

    let paragraphs: Vec<&str> = slide
        .text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let mut x = region.x;
        let mut max_width = region.width;
        let mut text = *paragraph;

        if let Some(rest) = paragraph.strip_prefix(BULLET_MARKER) {
            canvas.set_font(&fonts.font(FontWeight::Bold, size))?;
            canvas.set_fill_color(&ctx.palette.text)?;
            canvas.fill_text(BULLET_ARROW, x, y)?;
            let indent = canvas.measure_text(&format!("{} ", BULLET_ARROW))? + spacing.bullet_indent;
            x += indent;
            max_width -= indent;
            text = rest.trim_start();
        }

        let block = RichTextBlock {
            text,
            x,
            y,
            max_width,
            font_size: size,
            line_height,
            base_color: &ctx.palette.text,
            accent_color: &ctx.palette.accent,
            slide_is_accent: ctx.palette.slide_is_accent,
        };
        let used = compose_rich_text(canvas, fonts, &block)?;
        y += used as f32 * line_height;

        if index + 1 < paragraphs.len() {
            y += spacing.paragraph_gap;
        }
    }
    Ok(())
}

/// One block sized against the full region and centered vertically.
pub fn layout_quote<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    ctx: &LayoutContext<'_>,
    slide: &Slide,
) -> CanvasResult<()> {
    let region = ctx.region;
    if slide.text.trim().is_empty() {
        return Ok(());
    }
    begin_content(canvas, ctx)?;

    let mut spec = *ctx.font(FontRole::Quote);
    if slide.size == Some(QuoteSize::Small) {
        spec.size *= ctx.config.quote.small_scale;
    }
    let size = fit_size(canvas, fonts, ctx, &slide.text, &spec, region.width, region.height);
    canvas.set_font(&fonts.font(spec.weight, size))?;

    let lines = try_wrap_text(&*canvas, &slide.text, region.width)?;
    let line_height = spec.line_height(size);
    let mut y = region.y + (region.height - lines.len() as f32 * line_height) / 2.0;
    for line in &lines {
        canvas.fill_text(line, region.x, y)?;
        y += line_height;
    }
    Ok(())
}

fn begin_content<C: Canvas + ?Sized>(canvas: &mut C, ctx: &LayoutContext<'_>) -> CanvasResult<()> {
    canvas.set_text_align(TextAlign::Left)?;
    canvas.set_fill_color(&ctx.palette.text)
}

fn fit_size<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    ctx: &LayoutContext<'_>,
    text: &str,
    spec: &FontSpec,
    max_width: f32,
    max_height: f32,
) -> f32 {
    let request = SizeRequest {
        text,
        max_width,
        max_height,
        base_size: spec.size,
        min_size: spec.min_size,
        weight: spec.weight,
        line_height_ratio: spec.line_height_ratio,
    };
    select_font_size(canvas, fonts, ctx.config.fit_strategy, &request)
}

/// Sizes, wraps and draws `text` without inline styling. Returns the cursor below it.
fn draw_plain_block<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    ctx: &LayoutContext<'_>,
    text: &str,
    spec: &FontSpec,
    max_height: f32,
    mut y: f32,
) -> CanvasResult<f32> {
    let region = ctx.region;
    let size = fit_size(canvas, fonts, ctx, text, spec, region.width, max_height);
    canvas.set_font(&fonts.font(spec.weight, size))?;

    let line_height = spec.line_height(size);
    for line in try_wrap_text(&*canvas, text, region.width)? {
        canvas.fill_text(&line, region.x, y)?;
        y += line_height;
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::CarouselSettings;
    use crate::render::testing::{DrawOp, RecordingCanvas};

    fn render(slide: &Slide, canvas: &mut RecordingCanvas) -> Result<()> {
        let config = CarouselConfig::default();
        let palette = Palette::for_slide(slide, &CarouselSettings::default(), &config.colors);
        let ctx = LayoutContext {
            config: &config,
            region: config.canvas.content_region(),
            palette: &palette,
        };
        let mut fonts = FontCache::new(config.fonts.family.clone());
        layout_slide(canvas, &mut fonts, &ctx, slide)
    }

    fn texts(slide: &Slide) -> Vec<(String, f32, f32)> {
        let mut canvas = RecordingCanvas::new();
        render(slide, &mut canvas).unwrap();
        canvas.texts()
    }

    #[test]
    fn intro_places_subtitle_below_title() {
        let mut canvas = RecordingCanvas::new();
        render(&Slide::intro("Hello", "World"), &mut canvas).unwrap();
        // Title line height round(128 * 1.1) = 141, then the 80px gap.
        assert_eq!(
            canvas.texts(),
            vec![
                ("Hello".to_string(), 144.0, 420.0),
                ("World".to_string(), 144.0, 641.0),
            ]
        );
        let alpha: Vec<_> = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Alpha(_)))
            .cloned()
            .collect();
        assert_eq!(alpha, vec![DrawOp::Alpha(0.9), DrawOp::Alpha(1.0)]);
    }

    #[test]
    fn intro_without_title_starts_subtitle_at_top() {
        assert_eq!(
            texts(&Slide::intro("", "Sub")),
            vec![("Sub".to_string(), 144.0, 420.0)]
        );
        assert_eq!(
            texts(&Slide::intro("Only", "")),
            vec![("Only".to_string(), 144.0, 420.0)]
        );
    }

    #[test]
    fn text_slide_with_paragraph_and_bullet() {
        let slide = Slide::text("Tips", "Intro line\n\n• item one");
        // Title line height round(96 * 1.2) = 115, gap 80, body at 64px with
        // line height 90. The bold "→ " marker is 80px wide, plus 32 indent.
        assert_eq!(
            texts(&slide),
            vec![
                ("Tips".to_string(), 144.0, 420.0),
                ("Intro ".to_string(), 144.0, 615.0),
                ("line ".to_string(), 336.0, 615.0),
                ("→".to_string(), 144.0, 729.0),
                ("item ".to_string(), 256.0, 729.0),
                ("one ".to_string(), 416.0, 729.0),
            ]
        );
    }

    #[test]
    fn bullet_glyph_is_never_drawn() {
        let slide = Slide::text("", "• item one\n•second\n  • third  ");
        let drawn = texts(&slide);
        assert!(drawn.iter().all(|(text, _, _)| !text.contains('•')));
        assert_eq!(drawn.iter().filter(|(text, _, _)| text == "→").count(), 3);
        assert!(drawn.iter().any(|(text, _, _)| text == "second "));
    }

    #[test]
    fn text_slide_without_title_starts_body_at_top() {
        let drawn = texts(&Slide::text("", "Body"));
        assert_eq!(drawn, vec![("Body ".to_string(), 144.0, 420.0)]);
    }

    #[test]
    fn empty_text_slide_draws_nothing() {
        assert!(texts(&Slide::text("", "  \n ")).is_empty());
    }

    #[test]
    fn quote_is_vertically_centered() {
        // 96px bold fits; line height round(115.2) = 115.
        let y = 420.0 + (1388.0 - 115.0) / 2.0;
        assert_eq!(
            texts(&Slide::quote("Be bold", 100)),
            vec![("Be bold".to_string(), 144.0, y)]
        );
    }

    #[test]
    fn small_quote_starts_from_reduced_size() {
        let text = vec!["word"; 30].join(" ");
        let slide = Slide::quote(text, 100);
        assert_eq!(slide.size, Some(QuoteSize::Small));
        let mut canvas = RecordingCanvas::new();
        render(&slide, &mut canvas).unwrap();
        assert!(canvas.ops.contains(&DrawOp::Font(FontWeight::Bold, 96.0 * 0.7)));
        assert!(!canvas.ops.contains(&DrawOp::Font(FontWeight::Bold, 96.0)));
    }

    #[test]
    fn empty_quote_draws_nothing() {
        assert!(texts(&Slide::quote("", 100)).is_empty());
    }

    #[test]
    fn measurement_failure_is_render_failed_for_slide_type() {
        let mut canvas = RecordingCanvas::failing_measure_after(0);
        let err = render(&Slide::quote("Be bold", 100), &mut canvas).unwrap_err();
        assert!(matches!(
            err,
            CarouselError::RenderFailed {
                slide_type: SlideType::Quote,
                slide_number: None,
                ..
            }
        ));
    }
}
