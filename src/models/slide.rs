use serde::{Deserialize, Serialize};
use std::fmt;

/// The layout family of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    /// Title slide opened by a level-1 heading.
    Intro,
    /// Section slide opened by a level-2 heading, with paragraphs and bullet lists.
    Text,
    /// Standalone blockquote, vertically centered.
    Quote,
}

impl SlideType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Intro => "intro",
            SlideType::Text => "text",
            SlideType::Quote => "quote",
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background scheme: plain background or the brand (accent) color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideColor {
    #[default]
    Default,
    Accent,
}

/// Quote text scale. Long quotes start from a reduced base size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSize {
    Small,
    Large,
}

/// One unit of carousel content, destined to become one image.
///
/// Slides are produced by the markdown transformer and are read-only during rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(rename = "type")]
    pub slide_type: SlideType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Body text. For intro slides this is the subtitle.
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub color: SlideColor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<QuoteSize>,
}

impl Slide {
    pub fn intro(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            slide_type: SlideType::Intro,
            title: Some(title.into()),
            text: subtitle.into(),
            color: SlideColor::Accent,
            size: None,
        }
    }

    pub fn text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            slide_type: SlideType::Text,
            title: Some(title.into()),
            text: body.into(),
            color: SlideColor::Default,
            size: None,
        }
    }

    /// A quote slide; quotes longer than `small_threshold` characters are `Small`.
    pub fn quote(text: impl Into<String>, small_threshold: usize) -> Self {
        let text = text.into();
        let size = if text.chars().count() > small_threshold {
            QuoteSize::Small
        } else {
            QuoteSize::Large
        };
        Self {
            slide_type: SlideType::Quote,
            title: None,
            text,
            color: SlideColor::Accent,
            size: Some(size),
        }
    }

    pub fn with_color(mut self, color: SlideColor) -> Self {
        self.color = color;
        self
    }

    pub fn is_accent(&self) -> bool {
        self.color == SlideColor::Accent
    }

    /// Title text, empty when absent.
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
