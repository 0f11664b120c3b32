//! Lays out inline-styled text into lines and draws it, underlines last.

use log::warn;

use super::font::{FontCache, FontWeight};
use super::inline::parse_inline;
use super::wrap::split_oversized_word;
use crate::constants::{UNDERLINE_MIN_THICKNESS, UNDERLINE_OFFSET_RATIO, UNDERLINE_THICKNESS_RATIO};
use crate::models::segment::{LaidOutLine, StyledSegment, UnderlineStroke};
use crate::render::canvas::{Canvas, CanvasResult};

/// A block of inline-marked text and where to draw it.
#[derive(Debug, Clone, Copy)]
pub struct RichTextBlock<'a> {
    pub text: &'a str,
    pub x: f32,
    /// Baseline of the first line.
    pub y: f32,
    pub max_width: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub base_color: &'a str,
    pub accent_color: &'a str,
    /// Set on accent-background slides, where accent-colored text would disappear.
    pub slide_is_accent: bool,
}

impl RichTextBlock<'_> {
    fn fragment_color(&self, fragment: &StyledSegment) -> &str {
        if fragment.underline && fragment.bold && !self.slide_is_accent {
            self.accent_color
        } else {
            self.base_color
        }
    }
}

/// Draws `block` and returns how many lines it used (at least one).
///
/// The whole block is laid out and measured before anything is drawn. If that fails,
/// the raw text is drawn as a single plain line instead; only a failure of that
/// fallback is returned as an error. A backend failure part way through drawing is
/// logged and leaves the fragments drawn so far, so text is never drawn twice.
pub fn compose_rich_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    block: &RichTextBlock<'_>,
) -> CanvasResult<usize> {
    let segments = parse_inline(block.text);
    let lines = match layout_rich_lines(canvas, fonts, &segments, block.font_size, block.max_width)
    {
        Ok(lines) => lines,
        Err(err) => {
            warn!(
                "Rich text layout failed ({}), drawing plain text: {:.100}",
                err, block.text
            );
            canvas.set_font(&fonts.font(FontWeight::Normal, block.font_size))?;
            canvas.set_fill_color(block.base_color)?;
            canvas.fill_text(block.text, block.x, block.y)?;
            return Ok(1);
        }
    };
    if let Err(err) = draw_rich_lines(canvas, fonts, block, &lines) {
        warn!(
            "Rich text drawing stopped part way ({}): {:.100}",
            err, block.text
        );
    }
    Ok(lines.len().max(1))
}

/// Packs styled words into lines no wider than `max_width`.
///
/// Each word is measured with its trailing space under its own weight. A word wider
/// than a whole line is split between characters the way [`wrap_text`] does it, each
/// full piece on its own line ending in a hyphen and keeping the word's style.
///
/// [`wrap_text`]: super::wrap::wrap_text
pub fn layout_rich_lines<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    segments: &[StyledSegment],
    font_size: f32,
    max_width: f32,
) -> CanvasResult<Vec<LaidOutLine>> {
    let mut lines = Vec::new();
    let mut current = LaidOutLine::default();

    for segment in segments {
        canvas.set_font(&fonts.font(segment.weight(), font_size))?;
        for word in segment.text.split_whitespace() {
            let fragment = segment.with_text(format!("{} ", word));
            let width = canvas.measure_text(&fragment.text)?;

            if width > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = split_rich_word(&*canvas, segment, word, max_width, &mut lines)?;
                continue;
            }
            if current.width + width > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push(fragment, width);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Pushes the full pieces of an oversized word as lines and returns the open line
/// holding its remainder.
fn split_rich_word<C: Canvas + ?Sized>(
    canvas: &C,
    segment: &StyledSegment,
    word: &str,
    max_width: f32,
    lines: &mut Vec<LaidOutLine>,
) -> CanvasResult<LaidOutLine> {
    let mut pieces = Vec::new();
    let rest = split_oversized_word(canvas, word, max_width, &mut pieces)?;
    for piece in pieces {
        let mut line = LaidOutLine::default();
        let width = canvas.measure_text(&piece)?;
        line.push(segment.with_text(piece), width);
        lines.push(line);
    }

    let mut current = LaidOutLine::default();
    let spaced = format!("{} ", rest);
    let width = canvas.measure_text(&spaced)?;
    if width <= max_width {
        current.push(segment.with_text(spaced), width);
    } else {
        // No room for the trailing space: the remainder closes its line.
        let width = canvas.measure_text(&rest)?;
        let mut line = LaidOutLine::default();
        line.push(segment.with_text(rest), width);
        lines.push(line);
    }
    Ok(current)
}

fn draw_rich_lines<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    block: &RichTextBlock<'_>,
    lines: &[LaidOutLine],
) -> CanvasResult<()> {
    let mut strokes = Vec::new();
    let mut y = block.y;
    for line in lines {
        let mut x = block.x;
        for (fragment, &width) in line.fragments.iter().zip(&line.advances) {
            canvas.set_font(&fonts.font(fragment.weight(), block.font_size))?;
            let color = block.fragment_color(fragment);
            canvas.set_fill_color(color)?;
            canvas.fill_text(&fragment.text, x, y)?;

            if fragment.underline {
                strokes.push(UnderlineStroke {
                    x,
                    y: y + block.font_size * UNDERLINE_OFFSET_RATIO,
                    width,
                    color: color.to_string(),
                });
            }
            x += width;
        }
        y += block.line_height;
    }

    draw_underlines(canvas, &strokes, block.font_size)
}

/// Strokes every underline of a block in one pass after its text.
fn draw_underlines<C: Canvas + ?Sized>(
    canvas: &mut C,
    strokes: &[UnderlineStroke],
    font_size: f32,
) -> CanvasResult<()> {
    if strokes.is_empty() {
        return Ok(());
    }
    canvas.set_line_width((font_size * UNDERLINE_THICKNESS_RATIO).max(UNDERLINE_MIN_THICKNESS))?;
    for stroke in strokes {
        canvas.set_stroke_color(&stroke.color)?;
        canvas.stroke_line(stroke.x, stroke.y, stroke.x + stroke.width, stroke.y)?;
    }
    Ok(())
}
