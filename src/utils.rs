//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use std::collections::HashMap;

/// Lowercase a string after composing it to NFC.
///
/// Composition makes "é" typed as `e` + combining acute match the precomposed
/// "é" that most editors emit, so queries and indexed text agree byte for byte.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value.nfc().collect::<String>().to_lowercase()
}

/// Lightweight normalization without unicode-normalization: lowercase only.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn heading text into an HTML anchor id.
///
/// Alphanumerics, `_` and `-` are kept (ASCII-lowercased), whitespace becomes
/// `-`, everything else is dropped: "What You'll Find" → "what-youll-find".
pub fn normalize_id(content: &str) -> String {
    content
        .chars()
        .filter_map(|ch| {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                Some(ch.to_ascii_lowercase())
            } else if ch.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

/// Anchor id for `content`, suffixed `-1`, `-2`, ... when already taken on the page.
pub fn unique_id(content: &str, seen: &mut HashMap<String, usize>) -> String {
    let id = normalize_id(content);
    match seen.get_mut(&id) {
        Some(count) => {
            let unique = format!("{}-{}", id, count);
            *count += 1;
            unique
        }
        None => {
            seen.insert(id.clone(), 1);
            id
        }
    }
}
