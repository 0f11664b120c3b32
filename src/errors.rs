use std::time::Duration;
use thiserror::Error;

use crate::converters::markdown::MarkupError;
use crate::models::slide::SlideType;

/// Represents errors that can occur while turning markdown into a rendered carousel.
#[derive(Error, Debug)]
pub enum CarouselError {
    /// The request failed validation. Every reason found is listed.
    #[error("Invalid input: {}", .reasons.join(", "))]
    InvalidInput { reasons: Vec<String> },

    /// The markup tokenizer rejected the text.
    #[error("Failed to process markdown text: {0}")]
    InvalidMarkup(#[from] MarkupError),

    /// The text produced more slides than the configured maximum.
    #[error("Too many slides ({count}), maximum is {max}")]
    TooManySlides { count: usize, max: usize },

    /// Layout or drawing of one slide failed. Aborts the whole carousel.
    #[error(
        "Failed to render {slide_type} slide{}: {reason}",
        .slide_number.map(|n| format!(" {n}")).unwrap_or_default()
    )]
    RenderFailed {
        /// 1-based slide position, once known to the orchestration layer.
        slide_number: Option<usize>,
        slide_type: SlideType,
        reason: String,
    },

    /// An external resource (the avatar) could not be loaded.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The request deadline passed between two slides.
    #[error("Request deadline of {0:?} exceeded")]
    Timeout(Duration),
}

impl CarouselError {
    /// Builds a `RenderFailed` that does not yet know its slide position.
    pub fn render_failed(slide_type: SlideType, reason: impl ToString) -> Self {
        CarouselError::RenderFailed {
            slide_number: None,
            slide_type,
            reason: reason.to_string(),
        }
    }

    /// Attaches the slide position to a `RenderFailed`; other variants pass through.
    pub fn at_slide(self, number: usize) -> Self {
        match self {
            CarouselError::RenderFailed {
                slide_type, reason, ..
            } => CarouselError::RenderFailed {
                slide_number: Some(number),
                slide_type,
                reason,
            },
            other => other,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CarouselError::InvalidInput { .. } | CarouselError::InvalidMarkup(_) => "INVALID_INPUT",
            CarouselError::TooManySlides { .. } => "TEXT_TOO_LONG",
            CarouselError::RenderFailed { .. } => "RENDER_FAILED",
            CarouselError::ResourceUnavailable(_) => "AVATAR_LOAD_FAILED",
            CarouselError::Timeout(_) => "TIMEOUT_ERROR",
        }
    }

    /// HTTP-equivalent status for callers that expose the pipeline over a network.
    pub fn status_code(&self) -> u16 {
        match self {
            CarouselError::InvalidInput { .. }
            | CarouselError::InvalidMarkup(_)
            | CarouselError::TooManySlides { .. } => 400,
            CarouselError::Timeout(_) => 408,
            CarouselError::RenderFailed { .. } | CarouselError::ResourceUnavailable(_) => 500,
        }
    }
}

/// A type alias for `Result<T, CarouselError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, CarouselError>;
