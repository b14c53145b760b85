//! Whitespace-preserving word tokenizer.
//!
//! Text is split into maximal runs of whitespace and maximal runs of
//! non-whitespace. Whitespace runs are kept as tokens of their own, so
//! concatenating the tokens always reproduces the input exactly.

/// Split `text` into alternating word and whitespace tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        if current.is_some_and(|prev| prev != ws) {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        current = Some(ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
