use crate::Chunk;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 2500;

/// Split `text` into consecutive windows of at most `max_chars` characters.
///
/// Boundaries are counted in characters and may fall mid-word. Concatenating
/// the chunks in order gives back `text`. Empty input yields no chunks.
///
/// # Panics
///
/// Panics if `max_chars` is zero; [`crate::SummarizerConfig::validate`]
/// rejects that before a pipeline is built.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    assert!(max_chars > 0, "chunk size must be positive");

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (byte_idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(Chunk {
                index: chunks.len(),
                text: text[start..byte_idx].to_string(),
            });
            start = byte_idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(Chunk {
            index: chunks.len(),
            text: text[start..].to_string(),
        });
    }

    chunks
}

/// Keep at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
