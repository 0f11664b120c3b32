//! Text handling for slides: inline markup, wrapping, adaptive sizing and rich-text composition.
//!
//! These helpers do not fail outward for degenerate input or backend hiccups. They
//! clamp to a safe result (single line, minimum size, plain text) and log a warning.

pub mod color;
pub mod fit;
pub mod font;
pub mod inline;
pub mod rich;
pub mod wrap;

pub use color::{contrast_color, hex_to_rgb, Rgb};
pub use fit::{select_font_size, FitStrategy, SizeRequest};
pub use font::{FontCache, FontDescriptor, FontWeight};
pub use inline::parse_inline;
pub use rich::{compose_rich_text, layout_rich_lines, RichTextBlock};
pub use wrap::{try_wrap_text, wrap_text};
