//! Markdown input: block tokenizer and slide grouping.

pub mod lexer;
pub mod slides;

pub use lexer::{Block, CommonMarkTokenizer, ListItem, MarkupError, MarkupTokenizer};
pub use slides::{markdown_to_slides, transform_with};
