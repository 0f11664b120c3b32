//! Canvas geometry, typography and limits for carousel generation.
//!
//! Every field has a default, so a partial JSON document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::text::fit::FitStrategy;
use crate::text::font::FontWeight;

/// Typography for one text role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub weight: FontWeight,
    /// Starting size in pixels for the adaptive size search.
    pub size: f32,
    pub line_height_ratio: f32,
    /// Floor for the adaptive size search.
    pub min_size: f32,
}

impl FontSpec {
    pub const fn new(weight: FontWeight, size: f32, line_height_ratio: f32, min_size: f32) -> Self {
        Self {
            weight,
            size,
            line_height_ratio,
            min_size,
        }
    }

    /// Baseline-to-baseline distance at `size`, rounded to whole pixels.
    pub fn line_height(&self, size: f32) -> f32 {
        (size * self.line_height_ratio).round()
    }
}

/// The text roles that carry their own [`FontSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    TitleIntro,
    SubtitleIntro,
    TitleText,
    Text,
    Quote,
    HeaderFooter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontsConfig {
    pub family: String,
    pub title_intro: FontSpec,
    pub subtitle_intro: FontSpec,
    pub title_text: FontSpec,
    pub text: FontSpec,
    pub quote: FontSpec,
    pub header_footer: FontSpec,
}

impl Default for FontsConfig {
    fn default() -> Self {
        use FontWeight::{Bold, Normal};
        Self {
            family: "Arial".to_string(),
            title_intro: FontSpec::new(Bold, 128.0, 1.1, 80.0),
            subtitle_intro: FontSpec::new(Normal, 64.0, 1.25, 40.0),
            title_text: FontSpec::new(Bold, 96.0, 1.2, 60.0),
            text: FontSpec::new(Normal, 64.0, 1.4, 40.0),
            quote: FontSpec::new(Bold, 96.0, 1.2, 60.0),
            header_footer: FontSpec::new(Normal, 48.0, 1.4, 48.0),
        }
    }
}

impl FontsConfig {
    pub fn spec(&self, role: FontRole) -> &FontSpec {
        match role {
            FontRole::TitleIntro => &self.title_intro,
            FontRole::SubtitleIntro => &self.subtitle_intro,
            FontRole::TitleText => &self.title_text,
            FontRole::Text => &self.text,
            FontRole::Quote => &self.quote,
            FontRole::HeaderFooter => &self.header_footer,
        }
    }
}

/// Pixel geometry of every slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub padding: f32,
    pub border_radius: f32,
    /// Baseline distance of the header and footer from the top and bottom edges.
    pub header_footer_padding: f32,
    pub content_start_y: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 2000,
            padding: 144.0,
            border_radius: 64.0,
            header_footer_padding: 192.0,
            content_start_y: 420.0,
        }
    }
}

/// The rectangle available for title, body and quote text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasConfig {
    pub fn content_region(&self) -> ContentRegion {
        ContentRegion {
            x: self.padding,
            y: self.content_start_y,
            width: self.width as f32 - self.padding * 2.0,
            height: self.height as f32 - self.content_start_y - self.header_footer_padding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingConfig {
    /// Gap between a title block and what follows it.
    pub heading_to_body: f32,
    /// Gap between consecutive body paragraphs.
    pub paragraph_gap: f32,
    /// Extra indent after the bullet arrow, on top of the arrow's own width.
    pub bullet_indent: f32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            heading_to_body: 80.0,
            paragraph_gap: 24.0,
            bullet_indent: 32.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorsConfig {
    pub default_background: String,
    pub default_text: String,
    /// Brand color used when the request does not supply one.
    pub accent_fallback: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            default_background: "#ffffff".to_string(),
            default_text: "#000000".to_string(),
            accent_fallback: "#6366F1".to_string(),
        }
    }
}

/// Request limits. `None` disables the corresponding check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    pub max_text_length: Option<usize>,
    pub max_slides: Option<usize>,
    pub request_timeout_ms: Option<u64>,
    pub max_username_length: Option<usize>,
    pub max_full_name_length: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_text_length: Some(50_000),
            max_slides: Some(25),
            request_timeout_ms: Some(30_000),
            max_username_length: Some(50),
            max_full_name_length: Some(100),
        }
    }
}

impl Limits {
    pub fn unlimited() -> Self {
        Self {
            max_text_length: None,
            max_slides: None,
            request_timeout_ms: None,
            max_username_length: None,
            max_full_name_length: None,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Full configuration for a carousel generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    pub canvas: CanvasConfig,
    pub fonts: FontsConfig,
    pub spacing: SpacingConfig,
    pub colors: ColorsConfig,
    pub limits: Limits,
    pub fit_strategy: FitStrategy,
    pub quote: QuoteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteConfig {
    /// Quotes longer than this many characters are marked `small`.
    pub small_threshold: usize,
    /// Base-size multiplier for `small` quotes.
    pub small_scale: f32,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            small_threshold: 100,
            small_scale: 0.7,
        }
    }
}

impl CarouselConfig {
    /// Default geometry and typography with every limit disabled.
    pub fn minimal() -> Self {
        Self {
            limits: Limits::unlimited(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_region() {
        let region = CanvasConfig::default().content_region();
        assert_eq!(region.x, 144.0);
        assert_eq!(region.y, 420.0);
        assert_eq!(region.width, 1312.0);
        assert_eq!(region.height, 1388.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: CarouselConfig = serde_json::from_str(
            r#"{ "canvas": { "width": 1080 }, "limits": { "maxSlides": null }, "fitStrategy": "exact" }"#,
        )
        .unwrap();
        assert_eq!(config.canvas.width, 1080);
        assert_eq!(config.canvas.height, 2000);
        assert_eq!(config.limits.max_slides, None);
        assert_eq!(config.limits.max_text_length, Some(50_000));
        assert_eq!(config.fit_strategy, FitStrategy::Exact);
        assert_eq!(config.fonts.text.size, 64.0);
    }

    #[test]
    fn minimal_config_has_no_limits() {
        let config = CarouselConfig::minimal();
        assert_eq!(config.limits, Limits::unlimited());
        assert_eq!(config.limits.request_timeout(), None);
        assert_eq!(
            CarouselConfig::default().limits.request_timeout(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn font_roles_resolve_to_configured_specs() {
        let config: CarouselConfig = serde_json::from_str(
            r#"{ "fonts": { "quote": { "weight": "normal", "size": 80, "lineHeightRatio": 1.3, "minSize": 50 } } }"#,
        )
        .unwrap();
        assert_eq!(
            *config.fonts.spec(FontRole::Quote),
            FontSpec::new(FontWeight::Normal, 80.0, 1.3, 50.0)
        );
        assert_eq!(config.fonts.spec(FontRole::Text), &config.fonts.text);
        assert_eq!(config.fonts.spec(FontRole::HeaderFooter).size, 48.0);
        assert_eq!(config.fonts.spec(FontRole::TitleIntro).weight, FontWeight::Bold);
        assert_eq!(config.fonts.spec(FontRole::SubtitleIntro).weight, FontWeight::Normal);
    }

    #[test]
    fn line_height_rounds() {
        let spec = FontSpec::new(FontWeight::Normal, 64.0, 1.4, 40.0);
        assert_eq!(spec.line_height(64.0), 90.0);
        assert_eq!(spec.line_height(60.0), 84.0);
    }
}
