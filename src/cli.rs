//! Command-line entry point: read texts, run the batch, print and export.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{self, ClassifierConfig, ConfigError, DEFAULT_DELAY_SECS};
use crate::export::{self, ExportError, ExportFormat};
use crate::pipeline::batch::{texts_from_plain_text, AnalysisOutcome, BatchConfig, BatchRunner};
use crate::pipeline::classifier::{HuggingFaceClassifier, SentimentClassifier};
use crate::pipeline::keywords::{DEFAULT_LANGUAGE, DEFAULT_TOP_N};
use crate::pipeline::normalize::{
    compute_sentiment_distribution, explain_outcome, results_to_dataframe, DistributionSummary,
    NormalizedRow,
};

const TABLE_TEXT_CHARS: usize = 50;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No input texts: pass texts as arguments or use --input")]
    NoInput,

    #[error("Invalid delay: {0} (must be a non-negative number of seconds)")]
    InvalidDelay(f64),
}

/// Batch sentiment analysis with keyword extraction
#[derive(Parser, Debug)]
#[command(name = "sentilens", version, about, long_about = None)]
pub struct Args {
    /// Plain-text file with one text per line
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Texts to analyze (appended after the file's lines)
    pub texts: Vec<String>,

    /// Seconds to wait between classifier calls
    #[arg(short, long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: f64,

    /// Keywords extracted per text
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_N)]
    pub keywords: usize,

    /// Language hint for keyword extraction
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Export directory (default: "data/exports")
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Export formats; repeat the flag for several
    #[arg(short, long = "format", value_enum)]
    pub formats: Vec<ExportFormat>,

    /// Print a one-sentence explanation per text
    #[arg(long)]
    pub explain: bool,
}

impl Args {
    pub fn batch_config(&self) -> Result<BatchConfig, AppError> {
        let delay = Duration::try_from_secs_f64(self.delay)
            .map_err(|_| AppError::InvalidDelay(self.delay))?;
        Ok(BatchConfig {
            delay,
            keyword_count: self.keywords,
            keyword_language: self.language.clone(),
        })
    }

    /// File lines first, then positional texts.
    pub fn gather_texts(&self) -> Result<Vec<String>, AppError> {
        let mut texts = match &self.input {
            Some(path) => texts_from_plain_text(&fs::read_to_string(path)?),
            None => Vec::new(),
        };
        texts.extend(
            self.texts
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        );

        if texts.is_empty() {
            return Err(AppError::NoInput);
        }
        Ok(texts)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(config::default_export_dir)
    }
}

/// Everything one run produces.
#[derive(Debug)]
pub struct AnalysisReport {
    pub outcomes: Vec<AnalysisOutcome>,
    pub rows: Vec<NormalizedRow>,
    pub summary: DistributionSummary,
}

/// Run the batch and normalize the results.
pub fn analyze(
    classifier: &dyn SentimentClassifier,
    texts: &[String],
    batch_config: BatchConfig,
) -> AnalysisReport {
    let runner = BatchRunner::new(classifier, batch_config);
    let progress = |completed: usize, total: usize| {
        tracing::info!(completed, total, "Progress");
    };
    let outcomes = runner.run(texts, Some(&progress));

    let rows = results_to_dataframe(&outcomes);
    let summary = compute_sentiment_distribution(&outcomes);
    AnalysisReport {
        outcomes,
        rows,
        summary,
    }
}

/// Table, optional explanations, then the distribution.
pub fn render_report(report: &AnalysisReport, explain: bool) -> String {
    let mut out = String::new();

    for (i, row) in report.rows.iter().enumerate() {
        let confidence = row
            .confidence_percent
            .map(|c| format!("{c:.2}%"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>3}  {:<53}  {:<8}  {:>7}  {}\n",
            i + 1,
            row.display_text(TABLE_TEXT_CHARS),
            row.sentiment_label,
            confidence,
            row.keywords_joined.as_deref().unwrap_or(""),
        ));
        if explain {
            if let Some(outcome) = report.outcomes.get(i) {
                out.push_str(&format!("     {}\n", explain_outcome(outcome)));
            }
        }
    }

    out.push('\n');
    for (sentiment, count) in &report.summary.counts {
        match report.summary.percentage(*sentiment) {
            Some(pct) => out.push_str(&format!("{sentiment:<8} {count:>4}  ({pct:.2}%)\n")),
            None => out.push_str(&format!("{sentiment:<8} {count:>4}\n")),
        }
    }
    out
}

/// Binary entry point.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let args = Args::parse();
    let batch_config = args.batch_config()?;
    let texts = args.gather_texts()?;

    let classifier_config = ClassifierConfig::from_env()?;
    let classifier = HuggingFaceClassifier::new(&classifier_config)?;

    let report = analyze(&classifier, &texts, batch_config);
    print!("{}", render_report(&report, args.explain));

    let dir = args.export_dir();
    for format in &args.formats {
        let path = export::write_export(&dir, *format, &report.rows, Some(&report.summary))?;
        println!("Saved {}", path.display());
    }

    Ok(())
}
