// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Standalone model artifact inspector
//!
//! Loads an exported model and prints its shape and most influential terms

use anyhow::{Context, Result};
use clap::Parser;
use falsify::{AuthenticityLabel, CategoryLabel, LinearTextModel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inspect-model")]
#[command(about = "Inspect an exported classifier artifact")]
#[command(version)]
struct Args {
    /// Model artifact to inspect
    model: PathBuf,

    /// Number of top terms to show per class
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// How to label the model's classes
    #[arg(short, long, value_enum)]
    kind: Option<ModelKind>,
}

/// Which label table a model's classes belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ModelKind {
    /// News categories (0-4)
    Category,
    /// Fake/real verdicts (0-1)
    Authenticity,
}

fn class_name(kind: Option<ModelKind>, class: i64) -> String {
    let known = match kind {
        Some(ModelKind::Category) => CategoryLabel::from_index(class).map(|c| c.as_str()),
        Some(ModelKind::Authenticity) => AuthenticityLabel::from_value(class).map(|a| a.as_str()),
        None => None,
    };
    match known {
        Some(name) => format!("{} ({})", class, name),
        None => class.to_string(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let model = LinearTextModel::load(&args.model)
        .with_context(|| format!("Failed to load model from {}", args.model.display()))?;

    let kind = args.kind;

    println!("\nModel: {}", model.name);
    if !model.description.is_empty() {
        println!("{}", model.description);
    }
    println!("{}", "-".repeat(50));
    println!("  Features: {}", model.vectorizer.n_features());
    println!("  Decision rows: {}", model.coefficients.len());
    println!("  Sublinear TF: {}", model.vectorizer.sublinear_tf);
    println!("  Norm: {:?}", model.vectorizer.norm);
    println!("  Stop words: {}", model.vectorizer.stop_words.len());
    println!(
        "  Classes: {}",
        model
            .classes
            .iter()
            .map(|&c| class_name(kind, c))
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("\n{}", "=".repeat(50));
    println!("TOP TERMS");
    println!("{}", "=".repeat(50));

    for (class, terms) in model.top_terms(args.top) {
        println!("\n## {} ##", class_name(kind, class));
        if terms.is_empty() {
            println!("  (no positive weights)");
            continue;
        }
        for (term, weight) in terms {
            println!("  {:<24} {:>10.4}", term, weight);
        }
    }

    Ok(())
}
