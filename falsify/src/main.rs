// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Falsify CLI: classify a news article and flag fake news
//!
//! Usage:
//!   falsify --text "Shares rallied after the announcement..."
//!   falsify --file article.txt --format json
//!   cat article.txt | falsify --schedule concurrent

use anyhow::{Context, Result};
use clap::Parser;
use falsify::{AnalysisReport, Analyzer, AppConfig, InputSource, OutputFormat, Schedule};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "falsify")]
#[command(about = "Detect fake news and classify articles into business, entertainment, politics, sport or tech")]
#[command(version)]
struct Args {
    /// Article text pasted on the command line
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// UTF-8 text file holding the article ("-" reads stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Category model artifact (overrides config)
    #[arg(long)]
    category_model: Option<PathBuf>,

    /// Fake/real model artifact (overrides config)
    #[arg(long)]
    authenticity_model: Option<PathBuf>,

    /// Order of the two predictions (overrides config)
    #[arg(long, value_enum)]
    schedule: Option<Schedule>,

    /// Number of words in the frequency view, 0 disables it (overrides config)
    #[arg(long)]
    top_words: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn input_source(&self) -> Result<InputSource> {
        if let Some(ref text) = self.text {
            return Ok(InputSource::Pasted(text.clone()));
        }
        match self.file {
            Some(ref path) if path.as_os_str() == "-" => Ok(InputSource::Stdin),
            Some(ref path) => Ok(InputSource::File(path.clone())),
            None if !std::io::stdin().is_terminal() => Ok(InputSource::Stdin),
            None => anyhow::bail!("no article given: use --text, --file or pipe text on stdin"),
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load_or_default(self.config.as_deref()).with_context(|| {
            let path = self.config.as_deref().unwrap_or(Path::new(""));
            format!("Failed to load configuration from {}", path.display())
        })?;

        if let Some(ref path) = self.category_model {
            config.category_model = path.clone();
        }
        if let Some(ref path) = self.authenticity_model {
            config.authenticity_model = path.clone();
        }
        if let Some(schedule) = self.schedule {
            config.schedule = schedule;
        }
        if let Some(top_words) = self.top_words {
            config.top_words = top_words;
        }
        if self.no_color {
            config.color = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = args.resolve_config()?;
    let source = args.input_source()?;

    tracing::info!("Category model: {}", config.category_model.display());
    tracing::info!("Authenticity model: {}", config.authenticity_model.display());

    let analyzer = Analyzer::from_artifacts(&config.category_model, &config.authenticity_model)
        .context("Failed to load classifier models")?
        .with_schedule(config.schedule);
    tracing::info!("Schedule: {:?}", analyzer.schedule());

    let article = source
        .read()
        .with_context(|| format!("Failed to read article from {}", source.describe()))?;

    tracing::info!("Analyzing article from {}", source.describe());

    let result = match analyzer.analyze(&article) {
        Ok(result) => result,
        Err(err) if err.is_user_error() => {
            tracing::warn!("{}", err);
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err).context("Analysis failed"),
    };

    tracing::info!(
        "Prediction: category={}, authenticity={}",
        result.category,
        result.authenticity
    );

    let color = config.color && std::io::stdout().is_terminal();
    let report = AnalysisReport::new(&source.describe(), &result, config.top_words);
    let rendered = report.render(args.format, color)?;
    print!("{}", rendered);
    if args.format == OutputFormat::Json {
        println!();
    }

    Ok(ExitCode::SUCCESS)
}
