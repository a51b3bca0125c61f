//! Spacing repair for model-produced summaries.
//!
//! Each rule is a standalone `&str -> String` function. [`postprocess_summary`]
//! runs them in a fixed order; later rules expect the output of earlier ones.

use once_cell::sync::Lazy;
use regex::Regex;

/// `aB` → `a B`.
pub fn split_lower_upper(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
    RE.replace_all(text, "${1} ${2}").into_owned()
}

/// `xB` → `x B` for any non-whitespace `x`, including runs such as `ABC`.
pub fn split_before_upper(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S)([A-Z])").unwrap());
    // Matches cannot overlap, so `ABC` needs a second pass for the `BC` pair.
    let mut out = RE.replace_all(text, "${1} ${2}").into_owned();
    while RE.is_match(&out) {
        out = RE.replace_all(&out, "${1} ${2}").into_owned();
    }
    out
}

/// `a1` → `a 1`. Any Unicode decimal digit counts, not just ASCII.
pub fn split_letter_digit(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-zA-Z])(\d)").unwrap());
    RE.replace_all(text, "${1} ${2}").into_owned()
}

/// `1a` → `1 a`.
pub fn split_digit_letter(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)([a-zA-Z])").unwrap());
    RE.replace_all(text, "${1} ${2}").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
    RE.replace_all(text, " ").into_owned()
}

/// Re-insert spaces a summarization model dropped, then tidy whitespace.
pub fn postprocess_summary(summary: &str) -> String {
    let text = split_lower_upper(summary);
    let text = split_before_upper(&text);
    let text = split_letter_digit(&text);
    let text = split_digit_letter(&text);
    let text = collapse_whitespace(&text);
    text.trim().to_string()
}
