pub mod config;
pub mod constants;
pub mod converters;
pub mod errors;
pub mod models;
pub mod render;
pub mod text;
pub mod validation;
pub mod wasm;

pub use config::CarouselConfig;
pub use converters::markdown::markdown_to_slides;
pub use errors::{CarouselError, Result};
pub use models::{CarouselSettings, Slide, SlideType};
pub use render::{generate_carousel, resolve_avatar, Carousel, CarouselMetadata};
pub use validation::validate_input;
