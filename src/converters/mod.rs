pub mod final_slide;
pub mod markdown;

pub use final_slide::{append_final_slide, fallback_slide, final_slide};
pub use markdown::{markdown_to_slides, transform_with};
