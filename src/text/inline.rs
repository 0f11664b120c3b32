//! Inline markup within slide text: `__**x**__`, `__x__`, `**x**` and plain runs.
//!
//! Scanning is a single greedy left-to-right pass. At each position the openers are
//! tried longest first; each requires at least one character before its closer and
//! never spans a line break. Marker characters that do not open a complete run are
//! kept as literal text.

use crate::models::segment::StyledSegment;

const UNDERLINE_BOLD: (&str, &str) = ("__**", "**__");
const UNDERLINE: (&str, &str) = ("__", "__");
const BOLD: (&str, &str) = ("**", "**");

/// Splits `text` into styled segments. Never fails; empty input yields no segments.
pub fn parse_inline(text: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if let Some((chunk_len, segment)) = match_run(rest) {
            flush_plain(&mut plain, &mut segments);
            if let Some(segment) = segment {
                segments.push(segment);
            }
            pos += chunk_len;
            continue;
        }

        // Plain run up to the next potential marker, or a lone marker character.
        let run_len = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| is_marker(*c))
            .map_or(rest.len(), |(i, _)| i);
        let run = &rest[..run_len];
        if is_marker_start(run) {
            plain.push_str(&run[..1]);
            pos += 1;
        } else {
            plain.push_str(run);
            pos += run_len;
        }
    }
    flush_plain(&mut plain, &mut segments);
    segments
}

fn is_marker(c: char) -> bool {
    c == '*' || c == '_'
}

fn is_marker_start(run: &str) -> bool {
    run.starts_with(is_marker)
}

fn flush_plain(plain: &mut String, segments: &mut Vec<StyledSegment>) {
    if !plain.is_empty() {
        segments.push(StyledSegment::plain(std::mem::take(plain)));
    }
}

/// Tries the three styled openers at the start of `rest`. On a match returns the
/// byte length consumed and the segment, or `None` for the segment when the
/// stripped content is empty.
fn match_run(rest: &str) -> Option<(usize, Option<StyledSegment>)> {
    if let Some((len, inner)) = delimited(rest, UNDERLINE_BOLD) {
        return Some((len, non_empty(inner, true, true)));
    }
    if let Some((len, inner)) = delimited(rest, UNDERLINE) {
        // `__**x__` style partial nesting only counts as bold when both ends carry `**`.
        let segment = match inner
            .strip_prefix(BOLD.0)
            .and_then(|s| s.strip_suffix(BOLD.1))
        {
            Some(bold_inner) if inner.len() >= BOLD.0.len() + BOLD.1.len() => {
                non_empty(bold_inner, true, true)
            }
            _ => non_empty(inner, false, true),
        };
        return Some((len, segment));
    }
    if let Some((len, inner)) = delimited(rest, BOLD) {
        return Some((len, non_empty(inner, true, false)));
    }
    None
}

/// Lazily matches `open .+? close` on a single line, returning the total length and
/// the content between the delimiters.
fn delimited<'a>(rest: &'a str, (open, close): (&str, &str)) -> Option<(usize, &'a str)> {
    let body = rest.strip_prefix(open)?;
    let first = body.chars().next()?;
    if first == '\n' {
        return None;
    }
    let search_from = first.len_utf8();
    let line_end = body.find('\n').unwrap_or(body.len());
    let close_at = body[search_from..line_end].find(close)? + search_from;
    Some((open.len() + close_at + close.len(), &body[..close_at]))
}

fn non_empty(text: &str, bold: bool, underline: bool) -> Option<StyledSegment> {
    (!text.is_empty()).then(|| StyledSegment {
        text: text.to_string(),
        bold,
        underline,
    })
}
