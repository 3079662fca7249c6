//! Heading anchor slugs.

/// Builds the anchor for a heading's flattened text.
///
/// The text is lowercased and each run of whitespace becomes a single `-`.
/// Punctuation is kept as is.
pub fn base_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() || ch == '\u{0B}' {
            if !in_space {
                anchor.push('-');
                in_space = true;
            }
        } else {
            anchor.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    anchor
}
