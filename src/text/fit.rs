//! Adaptive font-size selection.
//!
//! The search walks down from the base size in fixed steps, re-wrapping the text at
//! every candidate because line count depends on glyph metrics. Width is satisfied
//! exactly by wrapping. Height is checked with the configured [`FitStrategy`]; the
//! default estimate does not measure rendered line boxes, so tight slides can still
//! overflow slightly.

use log::warn;
use serde::{Deserialize, Serialize};

use super::font::{FontCache, FontWeight};
use super::wrap::try_wrap_text;
use crate::constants::{ESTIMATED_LINE_HEIGHT_FACTOR, FONT_SIZE_STEP};
use crate::render::canvas::{Canvas, CanvasResult};

/// How the height of a wrapped block is computed during the size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitStrategy {
    /// `lines * size * 1.4`, regardless of the role's line-height ratio.
    #[default]
    Estimated,
    /// Sum of the rounded per-line heights the layout will actually advance by.
    Exact,
}

impl FitStrategy {
    pub fn block_height(&self, lines: usize, size: f32, line_height_ratio: f32) -> f32 {
        match self {
            FitStrategy::Estimated => lines as f32 * size * ESTIMATED_LINE_HEIGHT_FACTOR,
            FitStrategy::Exact => lines as f32 * (size * line_height_ratio).round(),
        }
    }
}

/// Inputs to [`select_font_size`].
#[derive(Debug, Clone, Copy)]
pub struct SizeRequest<'a> {
    pub text: &'a str,
    pub max_width: f32,
    pub max_height: f32,
    pub base_size: f32,
    pub min_size: f32,
    pub weight: FontWeight,
    pub line_height_ratio: f32,
}

/// Returns the largest candidate size whose wrapped text fits the box.
///
/// The result is always within `[min_size, base_size]`; `min_size` is returned when
/// nothing fits, or when measurement fails.
pub fn select_font_size<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    strategy: FitStrategy,
    request: &SizeRequest<'_>,
) -> f32 {
    let floor = request.min_size.min(request.base_size);
    search_font_size(canvas, fonts, strategy, request, floor).unwrap_or_else(|err| {
        warn!(
            "Font size calculation failed ({}), using minimum size {}",
            err, floor
        );
        floor
    })
}

fn search_font_size<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &mut FontCache,
    strategy: FitStrategy,
    request: &SizeRequest<'_>,
    floor: f32,
) -> CanvasResult<f32> {
    let mut size = request.base_size;
    while size >= floor {
        canvas.set_font(&fonts.font(request.weight, size))?;
        let lines = try_wrap_text(&*canvas, request.text, request.max_width)?;
        let height = strategy.block_height(lines.len().max(1), size, request.line_height_ratio);
        if height <= request.max_height {
            return Ok(size);
        }
        size -= FONT_SIZE_STEP;
    }
    Ok(floor)
}
