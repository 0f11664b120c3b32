//! Groups markdown blocks into slides.
//!
//! A level-1 heading opens an intro slide, a level-2 heading opens a text slide that
//! collects the paragraphs and lists after it, and every blockquote becomes a quote
//! slide on its own. Content before the first level-2 heading is dropped.

use log::{debug, error, info};
use web_time::Instant;

use super::lexer::{Block, CommonMarkTokenizer, MarkupTokenizer};
use crate::config::QuoteConfig;
use crate::constants::BULLET_MARKER;
use crate::errors::Result;
use crate::models::slide::Slide;

/// Converts markdown into slides using the CommonMark tokenizer and default quote sizing.
pub fn markdown_to_slides(markup: &str) -> Result<Vec<Slide>> {
    transform_with(&CommonMarkTokenizer, markup, &QuoteConfig::default())
}

/// Converts markdown into slides with an explicit tokenizer.
///
/// A tokenizer failure becomes `CarouselError::InvalidMarkup`.
pub fn transform_with<T: MarkupTokenizer + ?Sized>(
    tokenizer: &T,
    markup: &str,
    quote: &QuoteConfig,
) -> Result<Vec<Slide>> {
    let started = Instant::now();
    info!("Parsing markdown to slides ({} bytes)", markup.len());

    let blocks = tokenizer.tokenize(markup).map_err(|err| {
        error!("Markdown parsing failed: {}", err);
        err
    })?;
    let slides = group_blocks(&blocks, quote);

    debug!(
        "Markdown parsing completed in {:?}: {} slides from {} tokens",
        started.elapsed(),
        slides.len(),
        blocks.len()
    );
    Ok(slides)
}

/// Paragraphs and lists gathered for one text slide.
#[derive(Debug)]
struct Section {
    slide: usize,
    paragraphs: Vec<String>,
    items: Vec<String>,
}

impl Section {
    fn body(&self) -> String {
        let paragraphs = self.paragraphs.join("\n\n");
        let bullets = self
            .items
            .iter()
            .map(|item| format!("{} {}", BULLET_MARKER, item))
            .collect::<Vec<_>>()
            .join("\n");

        match (paragraphs.is_empty(), bullets.is_empty()) {
            (_, true) => paragraphs,
            (true, false) => bullets,
            (false, false) => format!("{}\n\n{}", paragraphs, bullets),
        }
    }
}

fn group_blocks(blocks: &[Block], quote: &QuoteConfig) -> Vec<Slide> {
    let mut slides = Vec::new();
    let mut sections: Vec<Section> = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        match block {
            Block::Heading { depth: 1, text } => {
                // The following paragraph doubles as the subtitle but is still
                // processed on its own turn.
                let subtitle = match blocks.get(index + 1) {
                    Some(Block::Paragraph { text }) => text.as_str(),
                    _ => "",
                };
                slides.push(Slide::intro(text.as_str(), subtitle));
            }
            Block::Heading { depth: 2, text } => {
                sections.push(Section {
                    slide: slides.len(),
                    paragraphs: Vec::new(),
                    items: Vec::new(),
                });
                slides.push(Slide::text(text.as_str(), ""));
            }
            Block::Blockquote { blocks } => {
                let text = blocks.first().and_then(Block::text).unwrap_or("");
                slides.push(Slide::quote(text, quote.small_threshold));
            }
            Block::Paragraph { text } => {
                if let Some(section) = sections.last_mut() {
                    section.paragraphs.push(text.clone());
                }
            }
            Block::List { items } => {
                if let Some(section) = sections.last_mut() {
                    section.items.extend(items.iter().map(|item| item.text.clone()));
                }
            }
            Block::Heading { .. } | Block::Other => {}
        }
    }

    for section in &sections {
        if let Some(slide) = slides.get_mut(section.slide) {
            slide.text = section.body();
        }
    }
    slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::markdown::lexer::MarkupError;
    use crate::errors::CarouselError;
    use crate::models::slide::{QuoteSize, SlideColor, SlideType};

    #[test]
    fn intro_takes_following_paragraph_as_subtitle() {
        let slides = markdown_to_slides("# Title\nSubtitle para\n\n## Section\nBody text").unwrap();
        assert_eq!(
            slides,
            vec![
                Slide::intro("Title", "Subtitle para"),
                Slide::text("Section", "Body text"),
            ]
        );
        assert_eq!(slides[0].color, SlideColor::Accent);
        assert_eq!(slides[1].color, SlideColor::Default);
    }

    #[test]
    fn intro_without_paragraph_has_empty_subtitle() {
        let slides = markdown_to_slides("# Only a title\n\n## Next").unwrap();
        assert_eq!(slides[0], Slide::intro("Only a title", ""));
    }

    #[test]
    fn subtitle_paragraph_is_not_consumed() {
        let slides = markdown_to_slides("## First\n\n# Intro\n\nShared line").unwrap();
        assert_eq!(slides[0], Slide::text("First", "Shared line"));
        assert_eq!(slides[1], Slide::intro("Intro", "Shared line"));
    }

    #[test]
    fn content_before_first_section_is_dropped() {
        let slides = markdown_to_slides("Loose paragraph\n\n- loose item\n\n## S\nKept").unwrap();
        assert_eq!(slides, vec![Slide::text("S", "Kept")]);
    }

    #[test]
    fn paragraphs_then_bullets() {
        let markup = "## Tips\n\nFirst para\n\n- one\n- two\n\nSecond para\n\n1. three\n";
        let slides = markdown_to_slides(markup).unwrap();
        assert_eq!(
            slides[0].text,
            "First para\n\nSecond para\n\n• one\n• two\n• three"
        );
    }

    #[test]
    fn list_only_section() {
        let slides = markdown_to_slides("## L\n- a\n- **b**\n").unwrap();
        assert_eq!(slides[0].text, "• a\n• **b**");
    }

    #[test]
    fn empty_section_keeps_empty_text() {
        let slides = markdown_to_slides("## Empty").unwrap();
        assert_eq!(slides, vec![Slide::text("Empty", "")]);
    }

    #[test]
    fn blockquotes_become_quote_slides_in_order() {
        let long = "x".repeat(150);
        let markup = format!("## S\nBody\n\n> short quote\n\nafter\n\n> {}\n", long);
        let slides = markdown_to_slides(&markup).unwrap();
        let types: Vec<_> = slides.iter().map(|s| s.slide_type).collect();
        assert_eq!(types, vec![SlideType::Text, SlideType::Quote, SlideType::Quote]);
        // Paragraphs after a quote still belong to the open section.
        assert_eq!(slides[0].text, "Body\n\nafter");
        assert_eq!(slides[1].text, "short quote");
        assert_eq!(slides[1].size, Some(QuoteSize::Large));
        assert_eq!(slides[2].size, Some(QuoteSize::Small));
        assert!(slides[1].is_accent());
    }

    #[test]
    fn multi_line_quote_text_has_no_markers() {
        let slides = markdown_to_slides("> line one\n> line two").unwrap();
        assert_eq!(slides[0].text, "line one\nline two");

        let slides = markdown_to_slides("## S\n> a\n> b").unwrap();
        assert_eq!(slides[1].text, "a\nb");

        // 49 + 1 + 49 characters: the markers must not push it past the threshold.
        let line = "y".repeat(49);
        let slides = markdown_to_slides(&format!("> {}\n> {}", line, line)).unwrap();
        assert!(!slides[0].text.contains('>'));
        assert_eq!(slides[0].size, Some(QuoteSize::Large));
    }

    #[test]
    fn deeper_headings_are_ignored() {
        let slides = markdown_to_slides("## S\n\n### Sub\n\ntext").unwrap();
        assert_eq!(slides, vec![Slide::text("S", "text")]);
    }

    #[test]
    fn empty_input_yields_no_slides() {
        assert!(markdown_to_slides("").unwrap().is_empty());
    }

    struct Rejecting;

    impl MarkupTokenizer for Rejecting {
        fn tokenize(&self, _markup: &str) -> std::result::Result<Vec<Block>, MarkupError> {
            Err(MarkupError::Rejected("unterminated construct".into()))
        }
    }

    #[test]
    fn tokenizer_failure_is_invalid_markup() {
        let err = transform_with(&Rejecting, "# x", &QuoteConfig::default()).unwrap_err();
        assert!(matches!(err, CarouselError::InvalidMarkup(_)));
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}
