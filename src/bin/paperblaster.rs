// src/bin/paperblaster.rs

//! Extracts normalized plaintext and language from every PDF in a working
//! directory and writes one JSON result per PDF to the output directory.

use std::sync::Arc;

use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

use PaperBlaster::config::worker::Args;
use PaperBlaster::config::{load_extraction_config, ExtractionConfig};
use PaperBlaster::data_model::StatusMessage;
use PaperBlaster::error::{PipelineError, Result};
use PaperBlaster::pipeline::extraction::PdfExtractBackend;
use PaperBlaster::pipeline::steps::WhatlangDetector;
use PaperBlaster::utils::common::{
    list_source_documents, setup_prometheus_metrics, setup_tracing,
};
use PaperBlaster::worker_logic::ExtractionRunner;

/// Tally of the status messages received for one batch.
#[derive(Debug, Default)]
struct BatchSummary {
    complete: u64,
    broken: Vec<(String, String)>,
}

impl BatchSummary {
    fn record(&mut self, status: StatusMessage) {
        match status {
            StatusMessage::Complete { .. } => self.complete += 1,
            StatusMessage::Broken { filename, error } => self.broken.push((filename, error)),
        }
    }
}

fn create_progress_bar(total_items: u64, message: &str, template: &str) -> ProgressBar {
    let pb = if total_items == 0 {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::new(total_items)
    };
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = setup_tracing(args.log_json, args.log_dir.as_deref());

    let config = if args.uses_default_config() && !args.config.exists() {
        warn!(
            "Default configuration {} not found, using built-in defaults.",
            args.config.display()
        );
        ExtractionConfig::default()
    } else {
        info!("Loading extraction configuration from: {}", args.config.display());
        load_extraction_config(&args.config)?
    };
    config.validate()?;
    if args.validate_config {
        info!("Configuration is valid.");
        return Ok(());
    }

    setup_prometheus_metrics(args.metrics_port).await?;
    tokio::fs::create_dir_all(&args.output_dir).await?;

    let filenames = list_source_documents(&args.working_dir)?;
    info!(
        "Found {} PDF files in {}, writing results to {}",
        filenames.len(),
        args.working_dir.display(),
        args.output_dir.display()
    );

    let runner = ExtractionRunner::from_config(
        &config,
        &args.working_dir,
        &args.output_dir,
        Arc::new(PdfExtractBackend::new()),
        Arc::new(WhatlangDetector),
    );

    let started = Instant::now();
    let pb = create_progress_bar(
        filenames.len() as u64,
        "Extracting",
        "{spinner:.green} [{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    );
    let (status_tx, mut status_rx) = mpsc::unbounded_channel::<StatusMessage>();

    let aggregator = tokio::spawn(async move {
        let mut summary = BatchSummary::default();
        while let Some(status) = status_rx.recv().await {
            pb.inc(1);
            summary.record(status);
        }
        pb.finish_with_message("Done");
        summary
    });

    runner.run_batch(filenames, status_tx).await;
    let summary = aggregator
        .await
        .map_err(|e| PipelineError::Unexpected(format!("Status aggregator failed: {}", e)))?;

    for (filename, error) in &summary.broken {
        warn!(%filename, %error, "Broken document");
    }
    info!(
        complete = summary.complete,
        broken = summary.broken.len(),
        "Extraction finished in {}",
        HumanDuration(started.elapsed())
    );

    Ok(())
}
