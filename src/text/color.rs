//! Hex color parsing and WCAG relative-luminance contrast selection.

use log::warn;

use crate::constants::{CONTRAST_DARK_TEXT, CONTRAST_LIGHT_TEXT, FALLBACK_ACCENT_RGB};

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#rgb` or `#rrggbb` (the leading `#` is optional).
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Like [`parse_hex`], but clamps malformed input to the fallback accent color.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or_else(|| {
        warn!("Invalid color format {:?}, using fallback", hex);
        FALLBACK_ACCENT_RGB
    })
}

/// WCAG 2.0 relative luminance in `[0, 1]`.
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// Picks black or white text for legibility on `background`.
pub fn contrast_color(background: &str) -> &'static str {
    if relative_luminance(hex_to_rgb(background)) > 0.5 {
        CONTRAST_DARK_TEXT
    } else {
        CONTRAST_LIGHT_TEXT
    }
}
