//! # Text Layout
//!
//! Greedy word wrapping against a pixel width.
//!
//! ## Algorithm
//!
//! ```text
//! text ──split '\n'──► paragraphs ──trim──► tokens (split ' ')
//!                                              │
//!            candidate = line + token + " " ◄──┘
//!            width(candidate) > max ? commit line, restart with token
//!                                   : line = candidate
//! ```
//!
//! Authored paragraph breaks always survive as line breaks, and a blank
//! paragraph becomes one empty line. Spaces are the only break
//! opportunities: text without spaces (most CJK prose) stays on one line and
//! may overflow. There is no hyphenation or kerning-aware reflow.
//!
//! Accumulation carries one trailing space after every token; committed
//! lines have it stripped, so `"A\n\nB"` wraps to `["A", "", "B"]`.
//!
//! ## Example
//!
//! ```
//! use undersign::layout::wrap;
//!
//! // Ten pixels per character
//! let measure = |s: &str| s.chars().count() as f32 * 10.0;
//! let lines = wrap("the quick brown fox", &measure, 100.0);
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

/// Text measurement capability: the rendered width of a string, in pixels.
pub trait MeasureText {
    fn text_width(&self, text: &str) -> f32;
}

impl<F> MeasureText for F
where
    F: Fn(&str) -> f32,
{
    fn text_width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Wrap `text` so every line fits within `max_width` under `measure`.
///
/// A single token wider than `max_width` is emitted alone on its own line
/// rather than split or truncated.
pub fn wrap<M>(text: &str, measure: &M, max_width: f32) -> Vec<String>
where
    M: MeasureText + ?Sized,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for token in paragraph.split(' ') {
            let candidate = format!("{}{} ", current, token);
            if current.is_empty() || measure.text_width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(commit(&current));
                current = format!("{} ", token);
            }
        }
        lines.push(commit(&current));
    }

    lines
}

/// Strip the trailing separator added during accumulation.
fn commit(line: &str) -> String {
    line.strip_suffix(' ').unwrap_or(line).to_string()
}
