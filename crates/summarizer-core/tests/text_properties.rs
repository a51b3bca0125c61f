//! Property tests for the pure text stages: normalizer, chunker and
//! summary postprocessor.

use proptest::prelude::*;
use summarizer_core::{chunk_text, normalize_text, postprocess_summary};

/// Text shaped like PDF output: words, hyphenated line breaks, stray whitespace.
fn pdf_like_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 \\-\\n\\t]{0,300}",
        "\\PC{0,200}",
    ]
}

#[test]
fn proptest_normalize_is_idempotent() {
    proptest!(|(text in pdf_like_text())| {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
        prop_assert!(!once.contains('\n'));
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    });
}

#[test]
fn proptest_chunks_reassemble_input() {
    proptest!(|(text in "\\PC{0,400}", size in 1usize..64)| {
        let chunks = chunk_text(&text, size);
        let n = text.chars().count();

        prop_assert_eq!(chunks.len(), n.div_ceil(size));
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        prop_assert_eq!(joined, text);

        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.index, i);
            if i + 1 < chunks.len() {
                prop_assert_eq!(chunk.char_len(), size);
            } else {
                prop_assert!(chunk.char_len() >= 1 && chunk.char_len() <= size);
            }
        }
    });
}

#[test]
fn proptest_postprocess_leaves_no_glued_capitals() {
    proptest!(|(text in prop_oneof!["[a-zA-Z0-9 .,;()\\t]{0,200}", "\\PC{0,150}"])| {
        let out = postprocess_summary(&text);
        let chars: Vec<char> = out.chars().collect();

        for pair in chars.windows(2) {
            prop_assert!(
                pair[0].is_whitespace() || !pair[1].is_ascii_uppercase(),
                "unspaced capital {:?} in {:?}", pair, out
            );
            prop_assert!(
                !(pair[0].is_whitespace() && pair[1].is_whitespace()),
                "whitespace run in {:?}", out
            );
        }
        prop_assert_eq!(out.trim(), out.as_str());
    });
}
