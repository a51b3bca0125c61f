use once_cell::sync::Lazy;
use regex::Regex;

/// Collapse a raw text blob into single-line, single-spaced text.
///
/// - `"summa-\nrization"` → `"summarization"` (line-break hyphenation)
/// - remaining newlines become spaces
/// - whitespace runs collapse to one space, ends are trimmed
pub fn normalize_text(raw: &str) -> String {
    static HYPHEN_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\n").unwrap());
    static NEWLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n").unwrap());
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

    let text = HYPHEN_BREAK_RE.replace_all(raw, "");
    let text = NEWLINE_RE.replace_all(&text, " ");
    let text = WS_RE.replace_all(&text, " ");
    text.trim().to_string()
}
