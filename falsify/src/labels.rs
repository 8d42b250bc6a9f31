// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Label sets produced by the two classifiers
//!
//! Both classifiers emit bare integers. The mappings here are total and
//! checked: a value outside the documented range yields `None` instead of
//! falling back to a default label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// News category, in the positional order the category model was trained with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLabel {
    Business,
    Entertainment,
    Politics,
    Sport,
    Tech,
}

impl CategoryLabel {
    /// All categories, indexed by classifier output
    pub const ALL: [CategoryLabel; 5] = [
        CategoryLabel::Business,
        CategoryLabel::Entertainment,
        CategoryLabel::Politics,
        CategoryLabel::Sport,
        CategoryLabel::Tech,
    ];

    /// Map a classifier output index to a category
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Business => "business",
            CategoryLabel::Entertainment => "entertainment",
            CategoryLabel::Politics => "politics",
            CategoryLabel::Sport => "sport",
            CategoryLabel::Tech => "tech",
        }
    }

    /// Title-cased name for display
    pub fn title(&self) -> &'static str {
        match self {
            CategoryLabel::Business => "Business",
            CategoryLabel::Entertainment => "Entertainment",
            CategoryLabel::Politics => "Politics",
            CategoryLabel::Sport => "Sport",
            CategoryLabel::Tech => "Tech",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of the fake/real classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthenticityLabel {
    /// Classifier output 0
    Fake,
    /// Classifier output 1
    Real,
}

/// Color used when rendering an authenticity verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Red,
    Green,
}

impl AuthenticityLabel {
    /// Map a binary classifier output (0 = fake, 1 = real)
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(AuthenticityLabel::Fake),
            1 => Some(AuthenticityLabel::Real),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticityLabel::Fake => "FAKE",
            AuthenticityLabel::Real => "REAL",
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            AuthenticityLabel::Fake => DisplayColor::Red,
            AuthenticityLabel::Real => DisplayColor::Green,
        }
    }

    /// Label prefixed with a colored square, for plain-text and markdown output
    pub fn badge(&self) -> &'static str {
        match self {
            AuthenticityLabel::Fake => "🟥 FAKE",
            AuthenticityLabel::Real => "🟩 REAL",
        }
    }
}

impl fmt::Display for AuthenticityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_positional_order() {
        let names: Vec<_> = CategoryLabel::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["business", "entertainment", "politics", "sport", "tech"]);

        for (i, label) in CategoryLabel::ALL.iter().enumerate() {
            assert_eq!(CategoryLabel::from_index(i as i64), Some(*label));
        }
    }

    #[test]
    fn test_category_out_of_range() {
        assert_eq!(CategoryLabel::from_index(5), None);
        assert_eq!(CategoryLabel::from_index(7), None);
        assert_eq!(CategoryLabel::from_index(-1), None);
        assert_eq!(CategoryLabel::from_index(i64::MAX), None);
    }

    #[test]
    fn test_authenticity_mapping() {
        assert_eq!(AuthenticityLabel::from_value(0), Some(AuthenticityLabel::Fake));
        assert_eq!(AuthenticityLabel::from_value(1), Some(AuthenticityLabel::Real));
        assert_eq!(AuthenticityLabel::from_value(2), None);
        assert_eq!(AuthenticityLabel::from_value(-1), None);

        assert_eq!(AuthenticityLabel::Fake.color(), DisplayColor::Red);
        assert_eq!(AuthenticityLabel::Real.color(), DisplayColor::Green);
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&CategoryLabel::Sport).unwrap();
        assert_eq!(json, "\"sport\"");
        let json = serde_json::to_string(&AuthenticityLabel::Fake).unwrap();
        assert_eq!(json, "\"FAKE\"");
    }
}
