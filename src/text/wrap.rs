//! Greedy word wrapping against a pixel width.

use log::warn;

use crate::render::canvas::{CanvasResult, TextMeasure};

const HYPHEN: char = '-';

/// Wraps `text` into lines no wider than `max_width` under the active font.
///
/// Words are packed greedily with single spaces. A word wider than the whole line
/// is split between characters, each full chunk ending in a hyphen. A single
/// character wider than `max_width` still gets a line of its own.
///
/// Measurement failures are logged and the text is returned as one line.
pub fn wrap_text<M: TextMeasure + ?Sized>(measure: &M, text: &str, max_width: f32) -> Vec<String> {
    try_wrap_text(measure, text, max_width).unwrap_or_else(|err| {
        warn!(
            "Text wrapping failed ({}), keeping text on one line: {:.100}",
            err, text
        );
        if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        }
    })
}

/// Like [`wrap_text`], but reports measurement failures to the caller.
pub fn try_wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    max_width: f32,
) -> CanvasResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure.measure_text(&candidate)? <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current = if measure.measure_text(word)? > max_width {
            split_oversized_word(measure, word, max_width, &mut lines)?
        } else {
            word.to_string()
        };
    }

    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Emits full hyphenated chunks of `word` into `lines` and returns the remainder,
/// which stays open so following words can join it.
pub(crate) fn split_oversized_word<M: TextMeasure + ?Sized>(
    measure: &M,
    word: &str,
    max_width: f32,
    lines: &mut Vec<String>,
) -> CanvasResult<String> {
    let mut chunk = String::new();
    // False only while `chunk` is a lone character too wide to share a line with a hyphen.
    let mut chunk_takes_hyphen = true;

    for c in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(c);
        candidate.push(HYPHEN);
        if measure.measure_text(&candidate)? <= max_width {
            candidate.pop();
            chunk = candidate;
            continue;
        }

        if !chunk.is_empty() {
            let mut line = std::mem::take(&mut chunk);
            if chunk_takes_hyphen {
                line.push(HYPHEN);
            }
            lines.push(line);
        }
        chunk.push(c);
        let mut with_hyphen = chunk.clone();
        with_hyphen.push(HYPHEN);
        chunk_takes_hyphen = measure.measure_text(&with_hyphen)? <= max_width;
    }
    Ok(chunk)
}
