use serde::{Deserialize, Serialize};

use crate::models::slide::SlideColor;

pub const DEFAULT_AUTHOR_USERNAME: &str = "@username";
pub const DEFAULT_AUTHOR_FULL_NAME: &str = "Your Name";

/// Per-request presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSettings {
    /// Brand color as `#RRGGBB`; accent slides use it as their background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_full_name: Option<String>,

    /// Avatar shown in the header. Resolved by an `AvatarLoader`; failures degrade to no avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_slide: Option<FinalSlideSettings>,
}

impl CarouselSettings {
    pub fn author_username(&self) -> &str {
        self.author_username
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AUTHOR_USERNAME)
    }

    pub fn author_full_name(&self) -> &str {
        self.author_full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AUTHOR_FULL_NAME)
    }

    /// The brand color, or `fallback` when unset or empty.
    pub fn brand_color_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.brand_color
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
    }

    /// Copy suitable for echoing back in response metadata: the avatar URL is masked.
    pub fn redacted(&self) -> Self {
        Self {
            avatar_url: self.avatar_url.as_ref().map(|_| "[PROVIDED]".to_string()),
            ..self.clone()
        }
    }
}

/// Template family for the optional closing slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalSlideKind {
    /// Call to action: follow the author.
    #[default]
    Cta,
    /// Contact details.
    Contact,
    /// Brand sign-off.
    Brand,
    /// Unrecognized template names; treated as `Cta`.
    #[serde(other)]
    Unknown,
}

/// Settings for the closing slide appended after the transformed content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSlideSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(rename = "type", default)]
    pub kind: FinalSlideKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SlideColor>,
}
