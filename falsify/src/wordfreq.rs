// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Word-frequency view of an analyzed article
//!
//! Follows the usual word-cloud preprocessing: English stop words and
//! purely numeric tokens are dropped, and a plural `xs` is folded into `x`
//! when both forms occur. Frequencies are scaled so the most common word
//! has weight 1.0.

use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Default number of words shown
pub const DEFAULT_TOP_WORDS: usize = 20;

/// Shorter words are never counted
const MIN_WORD_LEN: usize = 2;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "arent", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "cant", "com", "could", "couldnt", "did", "didnt",
    "do", "does", "doesnt", "doing", "dont", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadnt", "has", "hasnt", "have", "havent", "having",
    "he", "hed", "hell", "her", "here", "heres", "hers", "herself", "hes", "him", "himself",
    "his", "how", "hows", "however", "http", "i", "id", "if", "ill", "im", "in", "into", "is",
    "isnt", "it", "its", "itself", "ive", "just", "k", "lets", "like", "me", "more", "most",
    "mustnt", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "r", "same",
    "shall", "shant", "she", "shed", "shell", "shes", "should", "shouldnt", "since", "so",
    "some", "such", "than", "that", "thats", "the", "their", "theirs", "them", "themselves",
    "then", "there", "theres", "therefore", "these", "they", "theyd", "theyll", "theyre",
    "theyve", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "wasnt", "we", "wed", "well", "were", "werent", "weve", "what", "whats", "when", "whens",
    "where", "wheres", "which", "while", "who", "whom", "whos", "why", "whys", "with", "wont",
    "would", "wouldnt", "www", "you", "youd", "youll", "your", "youre", "yours", "yourself",
    "yourselves", "youve",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// One entry of the frequency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
    /// Count relative to the most frequent word, in (0, 1]
    pub weight: f64,
}

/// Most frequent content words of a cleaned article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordFrequencies {
    pub words: Vec<WordWeight>,
    /// Content words counted before truncation
    pub total_words: usize,
}

impl WordFrequencies {
    /// Count content words in normalized text and keep the `top_n` most frequent
    pub fn from_cleaned(cleaned: &str, top_n: usize) -> Self {
        let stop = stop_words();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total_words = 0;

        for word in text::words(cleaned) {
            if word.len() < MIN_WORD_LEN || stop.contains(word) || word.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
            total_words += 1;
        }

        fold_plurals(&mut counts);

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(top_n);

        let max = ranked.first().map(|(_, c)| *c).unwrap_or(1) as f64;
        let words = ranked
            .into_iter()
            .map(|(word, count)| WordWeight {
                word: word.to_string(),
                count,
                weight: count as f64 / max,
            })
            .collect();

        Self { words, total_words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Render as horizontal bars, one word per line
    pub fn render_bars(&self, width: usize) -> String {
        let label_width = self.words.iter().map(|w| w.word.len()).max().unwrap_or(0);
        let mut output = String::new();

        for entry in &self.words {
            let bar_len = ((entry.weight * width as f64).round() as usize).max(1);
            output.push_str(&format!(
                "{:<label_width$} {} {}\n",
                entry.word,
                "█".repeat(bar_len),
                entry.count,
                label_width = label_width
            ));
        }

        output
    }
}

/// Merge `word + "s"` into `word` when the singular was also seen
fn fold_plurals(counts: &mut HashMap<&str, usize>) {
    let plurals: Vec<&str> = counts
        .keys()
        .copied()
        .filter(|w| w.len() > 3 && w.ends_with('s') && !w.ends_with("ss"))
        .filter(|w| counts.contains_key(&w[..w.len() - 1]))
        .collect();

    for plural in plurals {
        if let Some(n) = counts.remove(plural) {
            if let Some(singular) = counts.get_mut(&plural[..plural.len() - 1]) {
                *singular += n;
            }
        }
    }
}
