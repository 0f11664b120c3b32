//! Closing and fallback slides added around the transformed content.

use log::{info, warn};

use crate::constants::{FALLBACK_SLIDE_TEXT_CHARS, FALLBACK_SLIDE_TITLE};
use crate::models::settings::{FinalSlideKind, FinalSlideSettings};
use crate::models::slide::{Slide, SlideColor};

struct Template {
    title: &'static str,
    text: &'static str,
    color: SlideColor,
}

fn template(kind: FinalSlideKind) -> Template {
    match kind {
        FinalSlideKind::Contact => Template {
            title: "Get in touch:",
            text: "email@example.com\n\nTelegram: @username",
            color: SlideColor::Default,
        },
        FinalSlideKind::Brand => Template {
            title: "Thanks for reading!",
            text: "Helping businesses grow",
            color: SlideColor::Accent,
        },
        FinalSlideKind::Cta | FinalSlideKind::Unknown => Template {
            title: "Follow for more!",
            text: "More content in my profile",
            color: SlideColor::Accent,
        },
    }
}

/// Builds the closing slide, or `None` when it is absent or disabled.
///
/// Empty title or text overrides fall back to the template.
pub fn final_slide(settings: Option<&FinalSlideSettings>) -> Option<Slide> {
    let settings = settings.filter(|s| s.enabled)?;
    let template = template(settings.kind);
    let pick = |value: &Option<String>, default: &str| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    Some(
        Slide::text(
            pick(&settings.title, template.title),
            pick(&settings.text, template.text),
        )
        .with_color(settings.color.unwrap_or(template.color)),
    )
}

/// Appends the closing slide when enabled.
pub fn append_final_slide(slides: &mut Vec<Slide>, settings: Option<&FinalSlideSettings>) {
    if let Some(slide) = final_slide(settings) {
        info!("Final slide added ({:?})", settings.map(|s| s.kind));
        slides.push(slide);
    }
}

/// The single slide used when the markup produced none.
pub fn fallback_slide(text: &str) -> Slide {
    warn!("No slides generated, creating fallback slide");
    let excerpt: String = text.chars().take(FALLBACK_SLIDE_TEXT_CHARS).collect();
    Slide::text(FALLBACK_SLIDE_TITLE, excerpt)
}
