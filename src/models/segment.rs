use serde::{Deserialize, Serialize};

use crate::text::font::FontWeight;

/// A contiguous run of text sharing one inline style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSegment {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
}

impl StyledSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            underline: false,
        }
    }

    /// Same style, different text. Used when a segment is split into words.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: self.bold,
            underline: self.underline,
        }
    }

    pub fn weight(&self) -> FontWeight {
        FontWeight::from_bold(self.bold)
    }
}

/// One wrapped line of styled fragments. Each fragment is a word plus its trailing space,
/// or a hyphenated piece of a word too wide for any line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutLine {
    pub fragments: Vec<StyledSegment>,
    /// Measured width of each fragment, in the same order.
    pub advances: Vec<f32>,
    /// Sum of the measured fragment widths.
    pub width: f32,
}

impl LaidOutLine {
    pub fn push(&mut self, fragment: StyledSegment, width: f32) {
        self.fragments.push(fragment);
        self.advances.push(width);
        self.width += width;
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The line's text with fragment styling discarded.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Geometry for the underline beneath one rendered fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlineStroke {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub color: String,
}
