//! Font descriptors and the per-session font key cache.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Weight of the single supported font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn from_bold(bold: bool) -> Self {
        if bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved font: weight, pixel size and the CSS `font` shorthand handed to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub weight: FontWeight,
    pub size: f32,
    pub css: Arc<str>,
}

impl FontDescriptor {
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

/// Memoizes `(weight, size)` to font descriptors.
///
/// Owned by a rendering session rather than shared process-wide. Entries are only
/// ever added, so a descriptor handed out once stays valid for the session.
#[derive(Debug, Clone)]
pub struct FontCache {
    family: String,
    entries: HashMap<(FontWeight, u32), FontDescriptor>,
}

impl FontCache {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            entries: HashMap::new(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the descriptor for `weight` at `size` pixels, creating it on first use.
    pub fn font(&mut self, weight: FontWeight, size: f32) -> FontDescriptor {
        let family = &self.family;
        self.entries
            .entry((weight, size.to_bits()))
            .or_insert_with(|| FontDescriptor {
                weight,
                size,
                css: Arc::from(format!("{} {}px {}", weight, size, family)),
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_uses_css_shorthand() {
        let mut cache = FontCache::new("Arial");
        let font = cache.font(FontWeight::Bold, 64.0);
        assert_eq!(&*font.css, "bold 64px Arial");
        assert!(font.is_bold());

        let fractional = cache.font(FontWeight::Normal, 67.2);
        assert_eq!(&*fractional.css, "normal 67.2px Arial");
        assert_eq!(cache.family(), "Arial");
    }

    #[test]
    fn repeated_lookups_are_memoized() {
        let mut cache = FontCache::new("Arial");
        let first = cache.font(FontWeight::Normal, 48.0);
        let second = cache.font(FontWeight::Normal, 48.0);
        assert!(Arc::ptr_eq(&first.css, &second.css));
        assert_eq!(cache.len(), 1);

        cache.font(FontWeight::Bold, 48.0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn caches_are_independent_per_session() {
        let mut a = FontCache::new("Arial");
        let b = FontCache::new("Arial");
        a.font(FontWeight::Normal, 10.0);
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
