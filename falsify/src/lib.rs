// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! News category classification and fake news detection
//!
//! This crate provides:
//! - Text normalization applied before classification
//! - The `Classifier` seam and a TF-IDF + linear model loaded from JSON artifacts
//! - A stateless analyzer running both classifiers on one article
//! - Word-frequency summaries and report rendering (text, JSON, markdown)
//! - File/stdin input handling and application configuration

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod input;
pub mod labels;
pub mod report;
pub mod text;
pub mod wordfreq;

pub use analyzer::{AnalysisError, Analyzer, PredictionResult, Schedule};
pub use classifier::{Classifier, LinearTextModel, ModelError, TfIdfVectorizer};
pub use config::{AppConfig, ConfigError};
pub use input::{InputError, InputSource};
pub use labels::{AuthenticityLabel, CategoryLabel, DisplayColor};
pub use report::{AnalysisReport, OutputFormat};
pub use text::normalize;
pub use wordfreq::WordFrequencies;
