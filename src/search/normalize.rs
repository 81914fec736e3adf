/// Canonicalize `text` for matching: lowercase, `_` and `-` become spaces,
/// whitespace runs collapse to a single space, leading/trailing space is
/// trimmed.
///
/// Idempotent: `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        let ch = match ch {
            '_' | '-' => ' ',
            c => c,
        };
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        for lc in ch.to_lowercase() {
            out.push(lc);
        }
    }

    out
}

/// Split `text` into normalized query tokens, dropping empty ones.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
