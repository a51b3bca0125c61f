//! Layout-aware text reconstruction.
//!
//! Two steps live here: grouping positioned glyphs into words
//! ([`WordExtractor`]), and turning each page's words back into a line of
//! text ([`extract_page_line`], [`extract_raw_text`]).

use crate::{Page, PositionedWord};

/// Default horizontal gap (in PDF units) above which a space is inserted.
pub const DEFAULT_GAP_THRESHOLD: f32 = 1.0;
/// Default clustering tolerance on both axes.
pub const DEFAULT_TOLERANCE: f32 = 2.0;

/// A single glyph with its bounding box, as reported by a PDF backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedChar {
    pub ch: char,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Groups glyphs into words.
///
/// Glyphs whose `top` values are within `y_tolerance` of the previous glyph
/// share a line. Within a line, glyphs are ordered by `x0`, and a new word
/// starts at every whitespace glyph or wherever the horizontal gap to the
/// previous glyph exceeds `x_tolerance`.
#[derive(Debug, Clone, Copy)]
pub struct WordExtractor {
    x_tolerance: f32,
    y_tolerance: f32,
}

impl Default for WordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_TOLERANCE)
    }
}

impl WordExtractor {
    pub fn new(x_tolerance: f32, y_tolerance: f32) -> Self {
        Self {
            x_tolerance,
            y_tolerance,
        }
    }

    pub fn extract_words(&self, chars: &[PositionedChar]) -> Vec<PositionedWord> {
        let mut sorted: Vec<&PositionedChar> = chars.iter().collect();
        sorted.sort_by(|a, b| a.top.total_cmp(&b.top));

        let mut lines: Vec<Vec<&PositionedChar>> = Vec::new();
        let mut last_top: Option<f32> = None;
        for c in sorted {
            match (last_top, lines.last_mut()) {
                (Some(top), Some(line)) if c.top - top <= self.y_tolerance => line.push(c),
                _ => lines.push(vec![c]),
            }
            last_top = Some(c.top);
        }

        let mut words = Vec::new();
        for mut line in lines {
            line.sort_by(|a, b| a.x0.total_cmp(&b.x0));

            let mut current: Option<WordBuilder> = None;
            for c in line {
                if c.ch.is_whitespace() {
                    if let Some(word) = current.take() {
                        words.push(word.finish());
                    }
                    continue;
                }

                if let Some(word) = current.as_ref() {
                    if c.x0 > word.last_x1 + self.x_tolerance {
                        if let Some(word) = current.take() {
                            words.push(word.finish());
                        }
                    }
                }

                match current.as_mut() {
                    Some(word) => word.push(c),
                    None => current = Some(WordBuilder::start(c)),
                }
            }
            if let Some(word) = current {
                words.push(word.finish());
            }
        }

        words
    }
}

struct WordBuilder {
    text: String,
    x0: f32,
    x1: f32,
    top: f32,
    bottom: f32,
    last_x1: f32,
}

impl WordBuilder {
    fn start(c: &PositionedChar) -> Self {
        Self {
            text: c.ch.to_string(),
            x0: c.x0,
            x1: c.x1,
            top: c.top,
            bottom: c.bottom,
            last_x1: c.x1,
        }
    }

    fn push(&mut self, c: &PositionedChar) {
        self.text.push(c.ch);
        self.x0 = self.x0.min(c.x0);
        self.x1 = self.x1.max(c.x1);
        self.top = self.top.min(c.top);
        self.bottom = self.bottom.max(c.bottom);
        self.last_x1 = c.x1;
    }

    fn finish(self) -> PositionedWord {
        PositionedWord {
            text: self.text,
            x0: self.x0,
            x1: self.x1,
            top: self.top,
            bottom: self.bottom,
        }
    }
}

/// Rebuild one page's text from its words.
///
/// A space goes in front of a word only when the gap from the previous
/// word's right edge exceeds `gap_threshold`; otherwise the word is glued on.
/// The previous word is tracked across the whole page.
pub fn extract_page_line(words: &[PositionedWord], gap_threshold: f32) -> String {
    let mut line = String::new();
    let mut last_x1: Option<f32> = None;

    for word in words {
        if let Some(x1) = last_x1 {
            if word.x0 - x1 > gap_threshold {
                line.push(' ');
            }
        }
        line.push_str(&word.text);
        last_x1 = Some(word.x1);
    }

    line
}

/// Rebuild the whole document: one line per page, each followed by `'\n'`.
pub fn extract_raw_text(pages: &[Page], gap_threshold: f32) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&extract_page_line(page, gap_threshold));
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char, x0: f32, x1: f32, top: f32) -> PositionedChar {
        PositionedChar {
            ch,
            x0,
            x1,
            top,
            bottom: top + 10.0,
        }
    }

    /// Lay out `text` as monospaced glyphs of width 5 starting at `x`.
    fn run(text: &str, x: f32, top: f32) -> Vec<PositionedChar> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| {
                let x0 = x + i as f32 * 5.0;
                glyph(ch, x0, x0 + 5.0, top)
            })
            .collect()
    }

    // ── extract_page_line ──

    #[test]
    fn gap_above_threshold_inserts_space() {
        let words = vec![
            PositionedWord::new("AI", 0.0, 10.0),
            PositionedWord::new("is", 12.0, 20.0),
        ];
        assert_eq!(extract_page_line(&words, 1.0), "AI is");
    }

    #[test]
    fn gap_within_threshold_glues_words() {
        let words = vec![
            PositionedWord::new("trans", 0.0, 10.0),
            PositionedWord::new("former", 10.5, 30.0),
        ];
        assert_eq!(extract_page_line(&words, 1.0), "transformer");
    }

    #[test]
    fn gap_exactly_at_threshold_glues_words() {
        let words = vec![
            PositionedWord::new("a", 0.0, 5.0),
            PositionedWord::new("b", 6.0, 10.0),
        ];
        assert_eq!(extract_page_line(&words, 1.0), "ab");
    }

    #[test]
    fn line_wrap_glues_to_previous_word() {
        // Second word starts left of the first word's right edge (next line).
        let words = vec![
            PositionedWord::new("end", 400.0, 420.0),
            PositionedWord::new("start", 50.0, 70.0),
        ];
        assert_eq!(extract_page_line(&words, 1.0), "endstart");
    }

    #[test]
    fn empty_page_is_empty_line() {
        assert_eq!(extract_page_line(&[], 1.0), "");
    }

    // ── extract_raw_text ──

    #[test]
    fn pages_are_newline_terminated() {
        let pages = vec![
            vec![
                PositionedWord::new("Hello", 0.0, 25.0),
                PositionedWord::new("world", 30.0, 55.0),
            ],
            vec![],
            vec![PositionedWord::new("Bye", 0.0, 15.0)],
        ];
        assert_eq!(extract_raw_text(&pages, 1.0), "Hello world\n\nBye\n");
    }

    #[test]
    fn no_pages_is_empty_text() {
        assert_eq!(extract_raw_text(&[], 1.0), "");
    }

    // ── WordExtractor ──

    #[test]
    fn splits_on_whitespace_glyph() {
        let chars = run("AI is", 0.0, 100.0);
        let words = WordExtractor::default().extract_words(&chars);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["AI", "is"]);
        assert_eq!(words[0].x0, 0.0);
        assert_eq!(words[0].x1, 10.0);
        assert_eq!(words[1].x0, 15.0);
        assert_eq!(words[1].x1, 25.0);
    }

    #[test]
    fn splits_on_gap_beyond_x_tolerance() {
        let mut chars = run("foo", 0.0, 100.0);
        chars.extend(run("bar", 18.0, 100.0)); // gap of 3 after x1=15
        let words = WordExtractor::new(2.0, 2.0).extract_words(&chars);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["foo", "bar"]);
    }

    #[test]
    fn small_gap_stays_in_word() {
        let mut chars = run("foo", 0.0, 100.0);
        chars.extend(run("bar", 16.5, 100.0)); // gap of 1.5
        let words = WordExtractor::new(2.0, 2.0).extract_words(&chars);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "foobar");
    }

    #[test]
    fn groups_lines_by_top_and_orders_by_x() {
        // Emitted out of order: second line first, first line reversed.
        let mut chars = run("down", 0.0, 120.0);
        chars.extend(run("up", 30.0, 100.5));
        chars.extend(run("go", 0.0, 100.0));
        let words = WordExtractor::default().extract_words(&chars);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["go", "up", "down"]);
    }

    #[test]
    fn word_box_spans_all_glyphs() {
        let chars = vec![glyph('a', 0.0, 5.0, 100.0), glyph('b', 5.0, 10.0, 101.0)];
        let words = WordExtractor::default().extract_words(&chars);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].top, 100.0);
        assert_eq!(words[0].bottom, 111.0);
    }

    #[test]
    fn words_feed_page_line() {
        let mut chars = run("Deep", 0.0, 50.0);
        chars.extend(run("learning", 24.0, 50.0));
        let words = WordExtractor::default().extract_words(&chars);
        assert_eq!(extract_page_line(&words, 1.0), "Deep learning");
    }
}
