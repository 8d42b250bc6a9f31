// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Rendering of analysis results for the terminal, JSON and markdown

use crate::analyzer::PredictionResult;
use crate::labels::{AuthenticityLabel, CategoryLabel, DisplayColor};
use crate::wordfreq::WordFrequencies;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

const BAR_WIDTH: usize = 40;

/// Output format for a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

/// Everything shown to the user for one analyzed article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: String,
    pub category: CategoryLabel,
    pub authenticity: AuthenticityLabel,
    pub authenticity_color: DisplayColor,
    pub word_frequencies: WordFrequencies,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl AnalysisReport {
    pub fn new(source: &str, result: &PredictionResult, top_words: usize) -> Self {
        Self {
            source: source.to_string(),
            category: result.category,
            authenticity: result.authenticity,
            authenticity_color: result.authenticity.color(),
            word_frequencies: WordFrequencies::from_cleaned(&result.cleaned_text, top_words),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Terminal rendering; with `color` off no ANSI sequences are emitted
    pub fn render_text(&self, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> ColoredString| {
            if color {
                style(text).to_string()
            } else {
                text.to_string()
            }
        };

        let verdict = match self.authenticity_color {
            DisplayColor::Green => paint(self.authenticity.badge(), |t| t.green().bold()),
            DisplayColor::Red => paint(self.authenticity.badge(), |t| t.red().bold()),
        };

        let mut output = String::new();
        output.push_str(&format!("{}\n", "=".repeat(50)));
        output.push_str(&format!("{}\n", paint("FALSIFY ANALYSIS", |t| t.bold())));
        output.push_str(&format!("{}\n", "=".repeat(50)));
        output.push_str(&format!("Source:    {}\n", self.source));
        output.push_str(&format!("Category:  {}\n", paint(self.category.title(), |t| t.blue().bold())));
        output.push_str(&format!("Verdict:   {}\n", verdict));

        if !self.word_frequencies.is_empty() {
            output.push_str(&format!("\n{}\n", paint("Word frequency", |t| t.bold())));
            output.push_str(&format!("{:-<50}\n", ""));
            output.push_str(&self.word_frequencies.render_bars(BAR_WIDTH));
        }

        output
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_markdown(&self) -> String {
        let mut report = String::new();

        report.push_str("# Falsify Analysis\n\n");
        report.push_str(&format!("**Generated:** {}\n\n", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
        report.push_str(&format!("**Source:** {}\n\n", self.source));

        report.push_str("## News Category Prediction\n\n");
        report.push_str(&format!("**{}**\n\n", self.category.title()));

        report.push_str("## Fake News Detection\n\n");
        report.push_str(&format!("**{}**\n\n", self.authenticity.badge()));

        if !self.word_frequencies.is_empty() {
            report.push_str("## Word Frequency\n\n");
            report.push_str("| Word | Count | Weight |\n");
            report.push_str("|------|-------|--------|\n");
            for entry in &self.word_frequencies.words {
                report.push_str(&format!("| {} | {} | {:.2} |\n", entry.word, entry.count, entry.weight));
            }
            report.push('\n');
        }

        report
    }

    pub fn render(&self, format: OutputFormat, color: bool) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text(color)),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Markdown => Ok(self.render_markdown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(authenticity: AuthenticityLabel) -> PredictionResult {
        PredictionResult {
            category: CategoryLabel::Sport,
            authenticity,
            cleaned_text: "the match ended after a late goal goal".to_string(),
        }
    }

    #[test]
    fn test_text_report_without_color() {
        let report = AnalysisReport::new("pasted text", &sample_result(AuthenticityLabel::Real), 5);
        let text = report.render_text(false);

        assert!(text.contains("Category:  Sport"));
        assert!(text.contains("🟩 REAL"));
        assert!(text.contains("goal"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_category_title_in_text_and_markdown() {
        let result = PredictionResult {
            category: CategoryLabel::Entertainment,
            authenticity: AuthenticityLabel::Fake,
            cleaned_text: String::new(),
        };
        let report = AnalysisReport::new("stdin", &result, 5);

        assert!(report.render_text(false).contains("Category:  Entertainment"));
        assert!(report.render_markdown().contains("**Entertainment**"));
        assert!(report.to_json().unwrap().contains("\"entertainment\""));
    }

    #[test]
    fn test_word_frequency_disabled() {
        let report = AnalysisReport::new("stdin", &sample_result(AuthenticityLabel::Real), 0);
        assert!(report.word_frequencies.is_empty());
        assert!(!report.render_text(false).contains("Word frequency"));
        assert!(!report.render_markdown().contains("Word Frequency"));
    }

    #[test]
    fn test_json_report() {
        let report = AnalysisReport::new("stdin", &sample_result(AuthenticityLabel::Fake), 3);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["category"], "sport");
        assert_eq!(json["authenticity"], "FAKE");
        assert_eq!(json["authenticity_color"], "red");
        assert_eq!(json["word_frequencies"]["words"][0]["word"], "goal");
    }

    #[test]
    fn test_markdown_report() {
        let report = AnalysisReport::new("file article.txt", &sample_result(AuthenticityLabel::Real), 3);
        let md = report.render_markdown();

        assert!(md.contains("## News Category Prediction"));
        assert!(md.contains("**Sport**"));
        assert!(md.contains("**🟩 REAL**"));
        assert!(md.contains("| goal | 2 | 1.00 |"));
    }
}
