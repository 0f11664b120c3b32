//! Request validation. Every problem is reported, not just the first.

use crate::config::Limits;
use crate::errors::{CarouselError, Result};
use crate::models::settings::CarouselSettings;

/// Collects a human-readable reason for every invalid field. Empty means valid.
///
/// Lengths are counted in characters.
pub fn validate_input(
    text: Option<&str>,
    settings: &CarouselSettings,
    limits: &Limits,
) -> Vec<String> {
    let mut reasons = Vec::new();

    match text {
        None => reasons.push("Text is required".to_string()),
        Some(text) if text.trim().is_empty() => reasons.push("Text must not be empty".to_string()),
        Some(text) => {
            if let Some(max) = limits.max_text_length {
                if text.chars().count() > max {
                    reasons.push(format!("Text is too long (maximum {} characters)", max));
                }
            }
        }
    }

    if let Some(color) = settings.brand_color.as_deref().filter(|c| !c.is_empty()) {
        if !is_hex_rrggbb(color) {
            reasons.push("brandColor must be in #RRGGBB format".to_string());
        }
    }

    check_length(
        &mut reasons,
        "authorUsername",
        settings.author_username.as_deref(),
        limits.max_username_length,
    );
    check_length(
        &mut reasons,
        "authorFullName",
        settings.author_full_name.as_deref(),
        limits.max_full_name_length,
    );

    if let Some(url) = settings.avatar_url.as_deref().filter(|u| !u.is_empty()) {
        if !is_http_url(url) {
            reasons.push("avatarUrl must be a valid http(s) URL".to_string());
        }
    }

    reasons
}

/// Runs [`validate_input`] and turns any reasons into `CarouselError::InvalidInput`.
pub fn ensure_valid(text: Option<&str>, settings: &CarouselSettings, limits: &Limits) -> Result<()> {
    let reasons = validate_input(text, settings, limits);
    if reasons.is_empty() {
        Ok(())
    } else {
        Err(CarouselError::InvalidInput { reasons })
    }
}

fn check_length(reasons: &mut Vec<String>, field: &str, value: Option<&str>, max: Option<usize>) {
    if let (Some(value), Some(max)) = (value, max) {
        if value.chars().count() > max {
            reasons.push(format!("{} must be at most {} characters", field, max));
        }
    }
}

fn is_hex_rrggbb(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_has_no_reasons() {
        let settings = CarouselSettings {
            brand_color: Some("#ff5500".into()),
            author_username: Some("@me".into()),
            avatar_url: Some("https://example.com/a.png".into()),
            ..Default::default()
        };
        assert!(validate_input(Some("# Hi"), &settings, &Limits::default()).is_empty());
    }

    #[test]
    fn missing_and_empty_text() {
        let settings = CarouselSettings::default();
        assert_eq!(
            validate_input(None, &settings, &Limits::default()),
            vec!["Text is required"]
        );
        assert_eq!(
            validate_input(Some("  \n"), &settings, &Limits::default()),
            vec!["Text must not be empty"]
        );
    }

    #[test]
    fn collects_every_reason() {
        let settings = CarouselSettings {
            brand_color: Some("#GGGGGG".into()),
            author_username: Some("u".repeat(51)),
            author_full_name: Some("n".repeat(101)),
            avatar_url: Some("ftp://example.com/a.png".into()),
            ..Default::default()
        };
        let text = "x".repeat(50_001);
        let reasons = validate_input(Some(&text), &settings, &Limits::default());
        assert_eq!(reasons.len(), 5);
        assert!(reasons[0].starts_with("Text is too long"));
    }

    #[test]
    fn unlimited_skips_length_checks() {
        let settings = CarouselSettings {
            author_username: Some("u".repeat(500)),
            ..Default::default()
        };
        let text = "x".repeat(60_000);
        assert!(validate_input(Some(&text), &settings, &Limits::unlimited()).is_empty());
    }

    #[test]
    fn color_and_url_formats() {
        assert!(is_hex_rrggbb("#A1b2C3"));
        assert!(!is_hex_rrggbb("#abc"));
        assert!(!is_hex_rrggbb("a1b2c3"));
        assert!(!is_hex_rrggbb("#ééé"));
        assert!(is_http_url("http://x"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("data:image/png;base64,AAAA"));
    }

    #[test]
    fn ensure_valid_wraps_reasons() {
        let err = ensure_valid(None, &CarouselSettings::default(), &Limits::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(err.to_string(), "Invalid input: Text is required");
    }
}
