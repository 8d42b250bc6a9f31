// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Classifier seam and the linear TF-IDF model loaded from exported artifacts
//!
//! Implements:
//! - `Classifier`: batch-in, one-integer-per-text-out prediction contract
//! - `TfIdfVectorizer`: sparse TF-IDF features over cleaned text
//! - `LinearTextModel`: logistic-regression style decision over those features
//!
//! Artifacts are JSON exports of a trained vectorizer + linear model pipeline.

use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact `{model}`: {reason}")]
    InvalidArtifact { model: String, reason: String },
}

/// Prediction contract shared by both collaborators.
///
/// Implementations must be pure: the same batch always yields the same
/// outputs, and a prediction never mutates the classifier.
pub trait Classifier: Send + Sync {
    /// Predict one label value per input text
    fn predict(&self, batch: &[String]) -> Result<Vec<i64>, ModelError>;

    /// Get classifier name
    fn name(&self) -> &str;

    /// Get classifier description
    fn description(&self) -> &str {
        ""
    }
}

fn default_norm() -> Norm {
    Norm::L2
}

fn default_min_token_len() -> usize {
    2
}

/// Row normalization applied to TF-IDF vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L2,
    None,
}

/// TF-IDF vectorizer with a fixed, pre-fitted vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Term -> feature column
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature column
    pub idf: Vec<f64>,
    /// Use 1 + ln(tf) instead of raw counts
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Norm,
    /// Shorter tokens are ignored
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default)]
    pub stop_words: HashSet<String>,
}

impl TfIdfVectorizer {
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn tokenize<'a>(&'a self, cleaned: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text::words(cleaned)
            .filter(move |w| w.len() >= self.min_token_len)
            .filter(move |w| !self.stop_words.contains(*w))
    }

    /// Sparse TF-IDF vector as (column, weight) pairs sorted by column
    pub fn transform(&self, cleaned: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in self.tokenize(cleaned) {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (col, tf * self.idf[col])
            })
            .collect();
        features.sort_by_key(|(col, _)| *col);

        if self.norm == Norm::L2 {
            let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut features {
                    *w /= norm;
                }
            }
        }

        features
    }

    fn validate(&self, model: &str) -> Result<(), ModelError> {
        let n = self.n_features();
        if self.vocabulary.len() != n {
            return Err(invalid(
                model,
                format!("vocabulary has {} terms but idf has {} entries", self.vocabulary.len(), n),
            ));
        }
        if let Some((term, col)) = self.vocabulary.iter().find(|(_, &col)| col >= n) {
            return Err(invalid(model, format!("term '{}' maps to column {} (features: {})", term, col, n)));
        }
        let distinct: HashSet<usize> = self.vocabulary.values().copied().collect();
        if distinct.len() != n {
            return Err(invalid(model, "vocabulary columns are not unique".to_string()));
        }
        Ok(())
    }
}

fn invalid(model: &str, reason: String) -> ModelError {
    ModelError::InvalidArtifact {
        model: model.to_string(),
        reason,
    }
}

/// Linear text classifier: TF-IDF features followed by a logistic-regression
/// decision function.
///
/// A single coefficient row is a binary model (positive score selects
/// `classes[1]`); `k` rows are one-vs-rest over `k` classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearTextModel {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub vectorizer: TfIdfVectorizer,
    /// One row per decision function, each `n_features` wide
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    /// Output value for each class
    pub classes: Vec<i64>,
}

impl LinearTextModel {
    /// Load and validate a model artifact from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;

        tracing::info!(
            "Loaded model '{}' from {} ({} features, {} classes)",
            model.name,
            path.display(),
            model.vectorizer.n_features(),
            model.classes.len()
        );
        Ok(model)
    }

    /// Save model artifact as JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check that vectorizer and weights agree in shape
    pub fn validate(&self) -> Result<(), ModelError> {
        self.vectorizer.validate(&self.name)?;

        let n_features = self.vectorizer.n_features();
        let rows = self.coefficients.len();
        if rows == 0 {
            return Err(invalid(&self.name, "no coefficient rows".to_string()));
        }
        if let Some((i, row)) = self.coefficients.iter().enumerate().find(|(_, r)| r.len() != n_features) {
            return Err(invalid(
                &self.name,
                format!("coefficient row {} has {} weights, expected {}", i, row.len(), n_features),
            ));
        }
        if self.intercepts.len() != rows {
            return Err(invalid(
                &self.name,
                format!("{} intercepts for {} coefficient rows", self.intercepts.len(), rows),
            ));
        }
        let expected_classes = if rows == 1 { 2 } else { rows };
        if self.classes.len() != expected_classes {
            return Err(invalid(
                &self.name,
                format!("{} classes, expected {}", self.classes.len(), expected_classes),
            ));
        }
        Ok(())
    }

    /// Raw decision scores, one per coefficient row
    pub fn decision_function(&self, cleaned: &str) -> Result<Vec<f64>, ModelError> {
        self.validate()?;
        Ok(self.scores(cleaned))
    }

    /// Caller must have validated the shapes
    fn scores(&self, cleaned: &str) -> Vec<f64> {
        let features = self.vectorizer.transform(cleaned);
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| b + features.iter().map(|&(col, w)| row[col] * w).sum::<f64>())
            .collect()
    }

    fn predict_one(&self, cleaned: &str) -> i64 {
        let scores = self.scores(cleaned);
        if scores.len() == 1 {
            return if scores[0] > 0.0 { self.classes[1] } else { self.classes[0] };
        }

        // First maximum wins ties
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        self.classes[best]
    }

    /// Terms with the largest weights for each class, most influential first
    pub fn top_terms(&self, n: usize) -> Vec<(i64, Vec<(String, f64)>)> {
        let mut by_column = vec![""; self.vectorizer.n_features()];
        for (term, &col) in &self.vectorizer.vocabulary {
            by_column[col] = term.as_str();
        }

        let ranked = |row: &[f64], sign: f64| -> Vec<(String, f64)> {
            let mut terms: Vec<(String, f64)> = row
                .iter()
                .enumerate()
                .map(|(col, w)| (by_column[col].to_string(), w * sign))
                .filter(|(_, w)| *w > 0.0)
                .collect();
            terms.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            terms.truncate(n);
            terms
        };

        if self.coefficients.len() == 1 {
            let row = &self.coefficients[0];
            vec![
                (self.classes[0], ranked(row.as_slice(), -1.0)),
                (self.classes[1], ranked(row.as_slice(), 1.0)),
            ]
        } else {
            self.classes
                .iter()
                .zip(&self.coefficients)
                .map(|(&class, row)| (class, ranked(row.as_slice(), 1.0)))
                .collect()
        }
    }
}

impl Classifier for LinearTextModel {
    fn predict(&self, batch: &[String]) -> Result<Vec<i64>, ModelError> {
        // Fields are public and may have changed since load
        self.validate()?;
        Ok(batch.iter().map(|t| self.predict_one(t)).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn vectorizer(terms: &[&str]) -> TfIdfVectorizer {
        TfIdfVectorizer {
            vocabulary: terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect(),
            idf: vec![1.0; terms.len()],
            sublinear_tf: false,
            norm: Norm::L2,
            min_token_len: 2,
            stop_words: HashSet::new(),
        }
    }

    /// Five-class model that votes on one keyword per category
    pub(crate) fn category_model() -> LinearTextModel {
        let terms = ["shares", "film", "election", "match", "software"];
        let coefficients = (0..5)
            .map(|row| (0..5).map(|col| if row == col { 3.0 } else { -0.5 }).collect())
            .collect();
        LinearTextModel {
            name: "news-category".to_string(),
            description: "TF-IDF + logistic regression".to_string(),
            vectorizer: vectorizer(&terms),
            coefficients,
            intercepts: vec![0.0; 5],
            classes: vec![0, 1, 2, 3, 4],
        }
    }

    /// Binary model: "shocking" pushes towards fake, "according" towards real
    pub(crate) fn authenticity_model() -> LinearTextModel {
        LinearTextModel {
            name: "fake-news".to_string(),
            description: "TF-IDF + logistic regression".to_string(),
            vectorizer: vectorizer(&["shocking", "according", "miracle", "reported"]),
            coefficients: vec![vec![-2.0, 2.0, -1.5, 1.0]],
            intercepts: vec![0.1],
            classes: vec![0, 1],
        }
    }

    #[test]
    fn test_transform_l2_normalized() {
        let v = vectorizer(&["goal", "match"]);
        let features = v.transform("goal goal match x");
        assert_eq!(features.len(), 2);
        let norm: f64 = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(features[0].1 > features[1].1);
    }

    #[test]
    fn test_transform_ignores_short_and_stop_words() {
        let mut v = vectorizer(&["a", "the", "goal"]);
        v.stop_words.insert("the".to_string());
        let features = v.transform("a the goal");
        assert_eq!(features, vec![(2, 1.0)]);
    }

    #[test]
    fn test_transform_sublinear_tf() {
        let mut v = vectorizer(&["goal"]);
        v.sublinear_tf = true;
        v.norm = Norm::None;
        let features = v.transform("goal goal goal");
        assert!((features[0].1 - (1.0 + 3f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_multiclass_prediction() {
        let model = category_model();
        let batch = vec![
            "shares rose on the stock market".to_string(),
            "the match ended in a late goal".to_string(),
            "new software release".to_string(),
        ];
        assert_eq!(model.predict(&batch).unwrap(), vec![0, 3, 4]);
    }

    #[test]
    fn test_multiclass_tie_picks_first_class() {
        let model = category_model();
        assert_eq!(model.predict(&["nothing known here".to_string()]).unwrap(), vec![0]);
    }

    #[test]
    fn test_binary_prediction() {
        let model = authenticity_model();
        let batch = vec![
            "shocking miracle cure".to_string(),
            "according to officials it was reported".to_string(),
        ];
        assert_eq!(model.predict(&batch).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_validate_rejects_shape_mismatch() {
        let mut model = authenticity_model();
        model.coefficients[0].pop();
        assert!(matches!(model.validate(), Err(ModelError::InvalidArtifact { .. })));

        let mut model = category_model();
        model.classes.pop();
        assert!(matches!(model.validate(), Err(ModelError::InvalidArtifact { .. })));

        let mut model = category_model();
        model.vectorizer.vocabulary.insert("extra".to_string(), 9);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_predict_rejects_reshaped_model() {
        let mut model = category_model();
        model.coefficients[4].truncate(2);
        let err = model.predict(&["new software release".to_string()]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact { .. }));

        let mut model = authenticity_model();
        model.intercepts.clear();
        assert!(model.decision_function("shocking news").is_err());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("category.json");
        category_model().save(&path).unwrap();

        let loaded = LinearTextModel::load(&path).unwrap();
        assert_eq!(loaded.name, "news-category");
        assert_eq!(loaded.predict(&["film premiere".to_string()]).unwrap(), vec![1]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LinearTextModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_load_defaults_optional_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.json");
        std::fs::write(
            &path,
            r#"{
                "name": "fake-news",
                "vectorizer": { "vocabulary": { "hoax": 0 }, "idf": [1.5] },
                "coefficients": [[-1.0]],
                "intercepts": [0.2],
                "classes": [0, 1]
            }"#,
        )
        .unwrap();

        let model = LinearTextModel::load(&path).unwrap();
        assert_eq!(model.vectorizer.norm, Norm::L2);
        assert_eq!(model.vectorizer.min_token_len, 2);
        assert_eq!(model.predict(&["total hoax".to_string()]).unwrap(), vec![0]);
        assert_eq!(model.predict(&["calm report".to_string()]).unwrap(), vec![1]);
    }

    #[test]
    fn test_top_terms_binary() {
        let model = authenticity_model();
        let top = model.top_terms(2);
        assert_eq!(top[0].0, 0);
        assert_eq!(top[0].1[0].0, "shocking");
        assert_eq!(top[1].0, 1);
        assert_eq!(top[1].1[0].0, "according");
    }
}
