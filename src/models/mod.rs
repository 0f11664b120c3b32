//! Data carried through the carousel pipeline: slides, styled text and request settings.

pub mod segment;
pub mod settings;
pub mod slide;

pub use segment::{LaidOutLine, StyledSegment, UnderlineStroke};
pub use settings::{CarouselSettings, FinalSlideKind, FinalSlideSettings};
pub use slide::{QuoteSize, Slide, SlideColor, SlideType};
