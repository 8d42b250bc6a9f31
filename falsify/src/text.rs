// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Text normalization applied before any article reaches a classifier
//!
//! The cleaned form keeps ASCII letters, ASCII digits and the plain space,
//! lowercased. Everything else (punctuation, tabs, newlines, non-ASCII
//! characters) is dropped rather than replaced.

/// Returns true for characters that survive normalization
#[inline]
fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Normalize raw article text into the cleaned form fed to the classifiers.
///
/// Total over all strings: the result only contains `[a-z0-9 ]`, is never
/// longer than the input, and `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|&c| is_kept(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Check whether `text` is already in cleaned form
pub fn is_normalized(text: &str) -> bool {
    text.chars()
        .all(|c| c == ' ' || c.is_ascii_digit() || c.is_ascii_lowercase())
}

/// Split cleaned text into words
pub fn words(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned.split(' ').filter(|w| !w.is_empty())
}
