// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Two-stage inference over a single article
//!
//! Orchestrates:
//! - Empty-input rejection
//! - Text normalization
//! - Category prediction and fake/real prediction (independent, any order)
//! - Checked mapping of classifier outputs to labels

use crate::classifier::{Classifier, LinearTextModel, ModelError};
use crate::labels::{AuthenticityLabel, CategoryLabel};
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Blank or whitespace-only article; nothing was sent to the classifiers
    #[error("please enter or upload a news article")]
    EmptyInput,
    /// A classifier produced output outside its documented range
    #[error("classifier `{classifier}` violated its output contract: {detail}")]
    ContractViolation { classifier: String, detail: String },
    #[error("classifier `{classifier}` failed")]
    Classifier {
        classifier: String,
        #[source]
        source: ModelError,
    },
}

impl AnalysisError {
    /// Whether the user can fix this by changing the input
    pub fn is_user_error(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput)
    }
}

/// Order in which the two independent predictions are issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Schedule {
    #[default]
    CategoryFirst,
    AuthenticityFirst,
    /// Both predictions on scoped threads
    Concurrent,
}

/// Outcome of analyzing one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub category: CategoryLabel,
    pub authenticity: AuthenticityLabel,
    /// Normalized text both classifiers saw
    pub cleaned_text: String,
}

/// Stateless orchestrator over the two injected classifiers
#[derive(Clone)]
pub struct Analyzer {
    category: Arc<dyn Classifier>,
    authenticity: Arc<dyn Classifier>,
    schedule: Schedule,
}

impl Analyzer {
    pub fn new(category: Arc<dyn Classifier>, authenticity: Arc<dyn Classifier>) -> Self {
        Self {
            category,
            authenticity,
            schedule: Schedule::default(),
        }
    }

    /// Load both model artifacts from disk
    pub fn from_artifacts(category: &Path, authenticity: &Path) -> Result<Self, ModelError> {
        let category = LinearTextModel::load(category)?;
        let authenticity = LinearTextModel::load(authenticity)?;

        // Mismatched label sets still load; the affected outputs are
        // reported as contract violations when they occur.
        if let Some(class) = category.classes.iter().find(|&&c| CategoryLabel::from_index(c).is_none()) {
            tracing::warn!("Category model '{}' can emit unknown class {}", category.name, class);
        }
        if let Some(class) = authenticity.classes.iter().find(|&&c| AuthenticityLabel::from_value(c).is_none()) {
            tracing::warn!("Authenticity model '{}' can emit unknown class {}", authenticity.name, class);
        }

        Ok(Self::new(Arc::new(category), Arc::new(authenticity)))
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Classify one raw article
    pub fn analyze(&self, raw: &str) -> Result<PredictionResult, AnalysisError> {
        if raw.trim().is_empty() {
            tracing::warn!("Rejecting empty article");
            return Err(AnalysisError::EmptyInput);
        }

        let cleaned = normalize(raw);
        let batch = [cleaned];

        let (category, authenticity) = match self.schedule {
            Schedule::CategoryFirst => {
                let category = self.predict_category(&batch);
                let authenticity = self.predict_authenticity(&batch);
                (category, authenticity)
            }
            Schedule::AuthenticityFirst => {
                let authenticity = self.predict_authenticity(&batch);
                let category = self.predict_category(&batch);
                (category, authenticity)
            }
            Schedule::Concurrent => std::thread::scope(|s| {
                let authenticity = s.spawn(|| self.predict_authenticity(&batch));
                let category = self.predict_category(&batch);
                let authenticity = match authenticity.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                };
                (category, authenticity)
            }),
        };

        // Category errors take precedence so the reported failure does not
        // depend on the schedule.
        let category = category?;
        let authenticity = authenticity?;

        let [cleaned_text] = batch;
        tracing::debug!(
            "Analyzed {} cleaned bytes: category={}, authenticity={}",
            cleaned_text.len(),
            category,
            authenticity
        );

        Ok(PredictionResult {
            category,
            authenticity,
            cleaned_text,
        })
    }

    fn predict_category(&self, batch: &[String]) -> Result<CategoryLabel, AnalysisError> {
        let value = single_output(self.category.as_ref(), batch)?;
        CategoryLabel::from_index(value).ok_or_else(|| AnalysisError::ContractViolation {
            classifier: self.category.name().to_string(),
            detail: format!(
                "category index {} outside [0, {})",
                value,
                CategoryLabel::ALL.len()
            ),
        })
    }

    fn predict_authenticity(&self, batch: &[String]) -> Result<AuthenticityLabel, AnalysisError> {
        let value = single_output(self.authenticity.as_ref(), batch)?;
        AuthenticityLabel::from_value(value).ok_or_else(|| AnalysisError::ContractViolation {
            classifier: self.authenticity.name().to_string(),
            detail: format!("authenticity value {} outside {{0, 1}}", value),
        })
    }
}

/// Run a size-one batch and return its only output
fn single_output(classifier: &dyn Classifier, batch: &[String]) -> Result<i64, AnalysisError> {
    let outputs = classifier
        .predict(batch)
        .map_err(|source| AnalysisError::Classifier {
            classifier: classifier.name().to_string(),
            source,
        })?;

    match outputs.as_slice() {
        [value] => Ok(*value),
        _ => Err(AnalysisError::ContractViolation {
            classifier: classifier.name().to_string(),
            detail: format!(
                "returned {} outputs for a batch of {}",
                outputs.len(),
                batch.len()
            ),
        }),
    }
}
