//! Recording canvas with fixed per-character metrics for layout tests.

use super::canvas::{
    AvatarImage, Canvas, CanvasError, CanvasResult, SurfaceFactory, TextAlign, TextMeasure,
};
use crate::text::font::{FontDescriptor, FontWeight};
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    Font(FontWeight, f32),
    Fill(String),
    Stroke(String),
    LineWidth(f32),
    Alpha(f32),
    Align(TextAlign),
    Text { text: String, x: f32, y: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Rect,
    RoundedRect,
    Clip,
    ResetClip,
    Image,
}

/// Every character is `0.5em` wide in normal weight and `0.625em` in bold.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
    pub font: Option<(FontWeight, f32)>,
    /// Measurement calls left before every further measurement fails.
    pub measure_budget: Option<Cell<usize>>,
    /// `fill_text` calls left before every further call fails.
    pub fill_text_budget: Option<usize>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_measure_after(calls: usize) -> Self {
        Self {
            measure_budget: Some(Cell::new(calls)),
            ..Self::default()
        }
    }

    pub fn failing_fill_text_after(calls: usize) -> Self {
        Self {
            fill_text_budget: Some(calls),
            ..Self::default()
        }
    }

    pub fn char_width(weight: FontWeight, size: f32) -> f32 {
        match weight {
            FontWeight::Normal => size * 0.5,
            FontWeight::Bold => size * 0.625,
        }
    }

    pub fn texts(&self) -> Vec<(String, f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(f32, f32, f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, y1, x2, y2 } => Some((*x1, *y1, *x2, *y2)),
                _ => None,
            })
            .collect()
    }
}

impl TextMeasure for RecordingCanvas {
    fn measure_text(&self, text: &str) -> CanvasResult<f32> {
        if let Some(budget) = &self.measure_budget {
            if budget.get() == 0 {
                return Err(CanvasError::Measurement("budget exhausted".into()));
            }
            budget.set(budget.get() - 1);
        }
        let (weight, size) = self.font.unwrap_or((FontWeight::Normal, 10.0));
        Ok(text.chars().count() as f32 * Self::char_width(weight, size))
    }
}

impl Canvas for RecordingCanvas {
    fn set_font(&mut self, font: &FontDescriptor) -> CanvasResult<()> {
        self.font = Some((font.weight, font.size));
        self.ops.push(DrawOp::Font(font.weight, font.size));
        Ok(())
    }

    fn set_fill_color(&mut self, color: &str) -> CanvasResult<()> {
        self.ops.push(DrawOp::Fill(color.to_string()));
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &str) -> CanvasResult<()> {
        self.ops.push(DrawOp::Stroke(color.to_string()));
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::LineWidth(width));
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::Alpha(alpha));
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) -> CanvasResult<()> {
        self.ops.push(DrawOp::Align(align));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> CanvasResult<()> {
        if let Some(budget) = self.fill_text_budget.as_mut() {
            if *budget == 0 {
                return Err(CanvasError::Backend("fill_text budget exhausted".into()));
            }
            *budget -= 1;
        }
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::Rect);
        Ok(())
    }

    fn fill_rounded_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _r: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::RoundedRect);
        Ok(())
    }

    fn clip_circle(&mut self, _cx: f32, _cy: f32, _r: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::Clip);
        Ok(())
    }

    fn reset_clip(&mut self) -> CanvasResult<()> {
        self.ops.push(DrawOp::ResetClip);
        Ok(())
    }

    fn draw_image(&mut self, _image: &AvatarImage, _x: f32, _y: f32, _w: f32, _h: f32) -> CanvasResult<()> {
        self.ops.push(DrawOp::Image);
        Ok(())
    }
}

/// Hands out fresh recording canvases.
pub(crate) struct RecordingFactory;

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingCanvas;

    fn new_surface(&self, _width: u32, _height: u32) -> CanvasResult<RecordingCanvas> {
        Ok(RecordingCanvas::new())
    }
}

/// A plain measurer for wrapping tests: every character is `width` wide.
pub(crate) struct FixedWidth(pub f32);

impl TextMeasure for FixedWidth {
    fn measure_text(&self, text: &str) -> CanvasResult<f32> {
        Ok(text.chars().count() as f32 * self.0)
    }
}
