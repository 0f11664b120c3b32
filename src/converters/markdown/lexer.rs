//! Flattens markdown into the block tokens the slide transformer understands.
//!
//! Text carried by tokens is rebuilt from the raw source ranges of the block's inline
//! events, so inline markers such as `**bold**` and `__underline__` survive for the
//! slide-level inline parser. Line breaks become `\n` and container prefixes (`> `, list
//! indentation) on continuation lines are left out.

use pulldown_cmark::{Event, Options, Parser, Tag};
use std::ops::Range;
use thiserror::Error;

/// Errors reported by a markup tokenizer.
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Markup was rejected by the tokenizer: {0}")]
    Rejected(String),
}

/// A top-level markdown block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { depth: u8, text: String },
    Paragraph { text: String },
    List { items: Vec<ListItem> },
    Blockquote { blocks: Vec<Block> },
    /// Code blocks, rules, tables, HTML and anything else the slides ignore.
    Other,
}

impl Block {
    /// Inline text of headings and paragraphs.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
}

/// Turns markup text into an ordered stream of top-level blocks.
pub trait MarkupTokenizer {
    fn tokenize(&self, markup: &str) -> Result<Vec<Block>, MarkupError>;
}

/// CommonMark tokenizer backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkTokenizer;

impl MarkupTokenizer for CommonMarkTokenizer {
    fn tokenize(&self, markup: &str) -> Result<Vec<Block>, MarkupError> {
        let events = Parser::new_ext(markup, Options::ENABLE_STRIKETHROUGH)
            .into_offset_iter()
            .collect();
        let mut cursor = EventCursor {
            source: markup,
            events,
            pos: 0,
        };
        Ok(cursor.read_blocks())
    }
}

struct EventCursor<'a> {
    source: &'a str,
    events: Vec<(Event<'a>, Range<usize>)>,
    pos: usize,
}

impl<'a> EventCursor<'a> {
    fn next(&mut self) -> Option<(Event<'a>, Range<usize>)> {
        let item = self.events.get(self.pos).cloned();
        self.pos += 1;
        item
    }

    /// Reads sibling blocks until the enclosing container ends (its `End` is consumed).
    fn read_blocks(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        while let Some((event, _)) = self.next() {
            match event {
                Event::Start(tag) => blocks.push(self.read_block(tag)),
                Event::End(_) => break,
                Event::Rule | Event::Html(_) => blocks.push(Block::Other),
                _ => {}
            }
        }
        blocks
    }

    /// Reads the body of a block whose `Start` was just consumed.
    fn read_block(&mut self, tag: Tag<'a>) -> Block {
        match tag {
            Tag::Heading { level, .. } => Block::Heading {
                depth: level as u8,
                text: self.read_inline(),
            },
            Tag::Paragraph => Block::Paragraph {
                text: self.read_inline(),
            },
            Tag::List(_) => Block::List {
                items: self.read_items(),
            },
            Tag::BlockQuote(_) => Block::Blockquote {
                blocks: self.read_blocks(),
            },
            _ => {
                self.skip_container();
                Block::Other
            }
        }
    }

    /// Raw source of the inline content up to the end of the current block.
    fn read_inline(&mut self) -> String {
        let mut text = InlineText::new(self.source);
        let mut depth = 0usize;
        while let Some((event, range)) = self.next() {
            match event {
                Event::Start(_) => {
                    depth += 1;
                    text.open(range);
                }
                Event::End(_) if depth == 0 => break,
                Event::End(_) => {
                    depth -= 1;
                    text.close(range);
                }
                Event::SoftBreak | Event::HardBreak => text.line_break(range),
                _ => text.leaf(range),
            }
        }
        text.finish()
    }

    fn read_items(&mut self) -> Vec<ListItem> {
        let mut items = Vec::new();
        while let Some((event, _)) = self.next() {
            match event {
                Event::Start(Tag::Item) => items.push(self.read_item()),
                Event::Start(_) => self.skip_container(),
                Event::End(_) => break,
                _ => {}
            }
        }
        items
    }

    /// Tight items carry inline events directly, loose items wrap them in paragraphs.
    /// Nested lists and other blocks inside an item are not part of its text.
    fn read_item(&mut self) -> ListItem {
        let mut tight = InlineText::new(self.source);
        let mut paragraphs = Vec::new();
        let mut depth = 0usize;
        while let Some((event, range)) = self.next() {
            match event {
                Event::Start(Tag::Paragraph) if depth == 0 => paragraphs.push(self.read_inline()),
                Event::Start(tag) if depth == 0 && !is_inline(&tag) => {
                    self.read_block(tag);
                }
                Event::Start(_) => {
                    depth += 1;
                    tight.open(range);
                }
                Event::End(_) if depth == 0 => break,
                Event::End(_) => {
                    depth -= 1;
                    tight.close(range);
                }
                Event::SoftBreak | Event::HardBreak => tight.line_break(range),
                _ => tight.leaf(range),
            }
        }

        let mut parts = Vec::with_capacity(paragraphs.len() + 1);
        let tight = tight.finish();
        if !tight.is_empty() {
            parts.push(tight);
        }
        parts.extend(paragraphs.into_iter().filter(|p| !p.is_empty()));
        ListItem {
            text: parts.join("\n"),
        }
    }

    fn skip_container(&mut self) {
        let mut depth = 0usize;
        while let Some((event, _)) = self.next() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                _ => {}
            }
        }
    }
}

/// Source text of one inline run, collected line by line.
///
/// Each line is the union of the event ranges seen since the last break. Inline
/// containers contribute only the delimiters on the line they open or close, so a
/// range spanning several lines never pulls in the next line's container prefix.
struct InlineText<'a> {
    source: &'a str,
    lines: Vec<String>,
    span: Option<Range<usize>>,
    /// Where content resumes after the last line break.
    resume: usize,
}

impl<'a> InlineText<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: Vec::new(),
            span: None,
            resume: 0,
        }
    }

    fn leaf(&mut self, range: Range<usize>) {
        extend(&mut self.span, range);
    }

    /// Opening delimiters sit between the element start and its first child.
    fn open(&mut self, range: Range<usize>) {
        extend(&mut self.span, range.start..range.start);
    }

    /// Closing delimiters (`**`, `](url)`) run from the last content to the element end.
    fn close(&mut self, range: Range<usize>) {
        let from = self.span.as_ref().map_or(self.resume, |span| span.end);
        extend(&mut self.span, from.min(range.end)..range.end);
    }

    fn line_break(&mut self, range: Range<usize>) {
        self.flush();
        let rest = self.source.get(range.end..).unwrap_or_default();
        let prefix = rest.len()
            - rest
                .trim_start_matches(|c: char| c == '>' || c == ' ' || c == '\t')
                .len();
        self.resume = range.end + prefix;
    }

    fn flush(&mut self) {
        let line = self
            .span
            .take()
            .and_then(|r| self.source.get(r))
            .map(str::trim)
            .unwrap_or_default();
        self.lines.push(line.to_string());
    }

    fn finish(mut self) -> String {
        self.flush();
        self.lines.join("\n").trim().to_string()
    }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn extend(span: &mut Option<Range<usize>>, range: Range<usize>) {
    *span = Some(match span.take() {
        Some(current) => current.start.min(range.start)..current.end.max(range.end),
        None => range,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(markup: &str) -> Vec<Block> {
        CommonMarkTokenizer.tokenize(markup).unwrap()
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph { text: text.into() }
    }

    #[test]
    fn headings_and_paragraphs() {
        assert_eq!(
            tokenize("# Title\nSubtitle para\n\n## Section\nBody text"),
            vec![
                Block::Heading { depth: 1, text: "Title".into() },
                paragraph("Subtitle para"),
                Block::Heading { depth: 2, text: "Section".into() },
                paragraph("Body text"),
            ]
        );
    }

    #[test]
    fn inline_markers_are_preserved() {
        assert_eq!(
            tokenize("Some **bold** and __**key**__ words"),
            vec![paragraph("Some **bold** and __**key**__ words")]
        );
        assert_eq!(
            tokenize("## A **strong** title"),
            vec![Block::Heading { depth: 2, text: "A **strong** title".into() }]
        );
    }

    #[test]
    fn soft_breaks_stay_in_paragraph_text() {
        assert_eq!(tokenize("line one\nline two"), vec![paragraph("line one\nline two")]);
    }

    #[test]
    fn tight_and_loose_lists() {
        let items = |texts: &[&str]| Block::List {
            items: texts.iter().map(|t| ListItem { text: t.to_string() }).collect(),
        };
        assert_eq!(tokenize("- one\n- **two**\n"), vec![items(&["one", "**two**"])]);
        assert_eq!(tokenize("1. first\n\n2. second\n"), vec![items(&["first", "second"])]);
    }

    #[test]
    fn nested_list_items_are_not_flattened_into_parent_text() {
        assert_eq!(
            tokenize("- outer\n  - inner\n- next\n"),
            vec![Block::List {
                items: vec![
                    ListItem { text: "outer".into() },
                    ListItem { text: "next".into() },
                ]
            }]
        );
    }

    #[test]
    fn blockquote_keeps_its_children() {
        assert_eq!(
            tokenize("> Be **bold**.\n>\n> Second"),
            vec![Block::Blockquote {
                blocks: vec![paragraph("Be **bold**."), paragraph("Second")]
            }]
        );
    }

    #[test]
    fn blockquote_continuation_lines_drop_their_markers() {
        assert_eq!(
            tokenize("> a\n> b"),
            vec![Block::Blockquote {
                blocks: vec![paragraph("a\nb")]
            }]
        );
        // Emphasis spanning the break keeps its delimiters but not the `> `.
        assert_eq!(
            tokenize("> **a\n> b** c"),
            vec![Block::Blockquote {
                blocks: vec![paragraph("**a\nb** c")]
            }]
        );
    }

    #[test]
    fn list_inside_blockquote() {
        assert_eq!(
            tokenize("> - x\n> - y\n>   more"),
            vec![Block::Blockquote {
                blocks: vec![Block::List {
                    items: vec![
                        ListItem { text: "x".into() },
                        ListItem { text: "y\nmore".into() },
                    ]
                }]
            }]
        );
    }

    #[test]
    fn links_and_hard_breaks() {
        assert_eq!(
            tokenize("see [the **docs**](https://example.com)  \nnow"),
            vec![paragraph("see [the **docs**](https://example.com)\nnow")]
        );
    }

    #[test]
    fn unsupported_blocks_become_other() {
        assert_eq!(
            tokenize("```\ncode\n```\n\n---\n\ntext"),
            vec![Block::Other, Block::Other, paragraph("text")]
        );
    }

    #[test]
    fn text_accessor() {
        assert_eq!(paragraph("x").text(), Some("x"));
        assert_eq!(Block::Other.text(), None);
    }
}
