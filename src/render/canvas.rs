//! The drawing and measurement capabilities the layout code needs from a graphics backend.

use thiserror::Error;

use crate::errors::{CarouselError, Result};
use crate::text::font::FontDescriptor;

/// Errors reported by a drawing backend.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Formatting error while writing drawing commands: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("Text measurement failed: {0}")]
    Measurement(String),
    #[error("Drawing backend error: {0}")]
    Backend(String),
}

/// A specialized Result type for canvas operations.
pub type CanvasResult<T> = std::result::Result<T, CanvasError>;

/// Width of a string under the currently active font.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> CanvasResult<f32>;
}

/// Horizontal anchoring for `fill_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// A drawable surface with 2D-context-like state (font, colors, alpha, clip).
///
/// `y` coordinates passed to `fill_text` are alphabetic baselines.
pub trait Canvas: TextMeasure {
    fn set_font(&mut self, font: &FontDescriptor) -> CanvasResult<()>;
    fn set_fill_color(&mut self, color: &str) -> CanvasResult<()>;
    fn set_stroke_color(&mut self, color: &str) -> CanvasResult<()>;
    fn set_line_width(&mut self, width: f32) -> CanvasResult<()>;
    fn set_alpha(&mut self, alpha: f32) -> CanvasResult<()>;
    fn set_text_align(&mut self, align: TextAlign) -> CanvasResult<()>;

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> CanvasResult<()>;
    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> CanvasResult<()>;
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> CanvasResult<()>;

    /// Backends without rounded rectangles fall back to a plain rectangle.
    fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        _radius: f32,
    ) -> CanvasResult<()> {
        self.fill_rect(x, y, width, height)
    }

    /// Restricts subsequent drawing to a circle until `reset_clip`.
    fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32) -> CanvasResult<()>;
    fn reset_clip(&mut self) -> CanvasResult<()>;
    fn draw_image(
        &mut self,
        image: &AvatarImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> CanvasResult<()>;
}

/// Creates one exclusive surface per slide.
pub trait SurfaceFactory {
    type Surface: Canvas;

    fn new_surface(&self, width: u32, height: u32) -> CanvasResult<Self::Surface>;
}

/// An already-decoded avatar image handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    /// Reference the backend draws from (URL or data URI).
    pub href: String,
    pub width: u32,
    pub height: u32,
}

/// Fetches and decodes avatar images. Errors are reported as
/// [`CarouselError::ResourceUnavailable`] and never fail a carousel.
pub trait AvatarLoader {
    fn load(&self, url: &str) -> Result<AvatarImage>;
}

/// Loader for vector backends that can reference the image by URL without fetching it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HrefAvatarLoader;

impl AvatarLoader for HrefAvatarLoader {
    fn load(&self, url: &str) -> Result<AvatarImage> {
        let url = url.trim();
        if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:image/")
        {
            Ok(AvatarImage {
                href: url.to_string(),
                width: 0,
                height: 0,
            })
        } else {
            Err(CarouselError::ResourceUnavailable(format!(
                "unsupported avatar reference: {url}"
            )))
        }
    }
}
