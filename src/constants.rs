//! Fixed values used across layout and rendering.
//! Anything a caller may want to tune lives in [`crate::config`] instead.

use crate::text::color::Rgb;

// Font-size search
pub const FONT_SIZE_STEP: f32 = 4.0; // Decrement between candidate sizes
pub const ESTIMATED_LINE_HEIGHT_FACTOR: f32 = 1.4; // Closed-form height estimate per line

// Rich text decorations
pub const UNDERLINE_OFFSET_RATIO: f32 = 0.1; // Underline sits this far below the baseline, in ems
pub const UNDERLINE_THICKNESS_RATIO: f32 = 0.03;
pub const UNDERLINE_MIN_THICKNESS: f32 = 2.0;

// Layout proportions
pub const INTRO_TITLE_HEIGHT_SHARE: f32 = 0.6;
pub const TEXT_TITLE_HEIGHT_SHARE: f32 = 0.3;
pub const SUBTITLE_ALPHA: f32 = 0.9;
pub const CHROME_ALPHA: f32 = 0.7; // Header and footer opacity

// Markers
pub const BULLET_MARKER: char = '•';
pub const BULLET_ARROW: &str = "→";
pub const NEXT_SLIDE_ARROW: &str = "→";

// Avatar placement in the header
pub const AVATAR_SIZE: f32 = 100.0;
pub const AVATAR_TEXT_GAP: f32 = 16.0;
pub const AVATAR_BASELINE_OFFSET: f32 = 9.0;

// Colors
pub const CONTRAST_DARK_TEXT: &str = "#000000";
pub const CONTRAST_LIGHT_TEXT: &str = "#ffffff";
pub const FALLBACK_ACCENT_RGB: Rgb = Rgb::new(99, 102, 241);

// Transformation
pub const FALLBACK_SLIDE_TITLE: &str = "Your content";
pub const FALLBACK_SLIDE_TEXT_CHARS: usize = 200;
pub const PROGRESS_LOG_MIN_SLIDES: usize = 10;
pub const PROGRESS_LOG_EVERY: usize = 5;
