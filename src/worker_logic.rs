// src/worker_logic.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{mpsc::UnboundedSender, Semaphore};
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

use crate::config::ExtractionConfig;
use crate::data_model::{PaperDocument, ResultRecord, StatusMessage};
use crate::error::Result;
use crate::executor::{PipelineExecutor, ProcessingStep};
use crate::pipeline::extraction::PdfExtractor;
use crate::pipeline::normalize::Normalizer;
use crate::pipeline::steps::{
    LanguageDetectionStep, LanguageDetector, MinLengthFilter, NormalizationStep,
    TextExtractionStep,
};
use crate::pipeline::writers::{BaseWriter, JsonWriter};
use crate::utils::prometheus_metrics::*;

/// Builds the ordered extraction steps: locate and extract, normalize, length
/// check, language detection.
#[instrument(skip_all, fields(max_pages = config.content_start.max_pages))]
pub fn build_pipeline_from_config(
    config: &ExtractionConfig,
    extractor: Arc<dyn PdfExtractor>,
    detector: Arc<dyn LanguageDetector>,
) -> Vec<Box<dyn ProcessingStep>> {
    let normalizer = Arc::new(Normalizer::from_params(&config.normalization));
    debug!(steps = ?normalizer.step_names(), "Built normalizer");

    let steps: Vec<Box<dyn ProcessingStep>> = vec![
        Box::new(TextExtractionStep::new(
            extractor,
            config.content_start.clone(),
        )),
        Box::new(NormalizationStep::new(normalizer)),
        Box::new(MinLengthFilter::new(config.min_plaintext_chars)),
        Box::new(LanguageDetectionStep::new(detector)),
    ];
    info!("Pipeline built successfully with {} steps.", steps.len());
    steps
}

/// What a worker did with a document that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    AlreadyComplete,
    Written,
}

/// Processes exactly one source document and reports the outcome once.
pub struct DocumentWorker {
    filename: String,
    working_dir: PathBuf,
    executor: Arc<PipelineExecutor>,
    writer: Arc<dyn BaseWriter>,
    status_tx: UnboundedSender<StatusMessage>,
}

impl DocumentWorker {
    pub fn new(
        filename: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        executor: Arc<PipelineExecutor>,
        writer: Arc<dyn BaseWriter>,
        status_tx: UnboundedSender<StatusMessage>,
    ) -> Self {
        DocumentWorker {
            filename: filename.into(),
            working_dir: working_dir.into(),
            executor,
            writer,
            status_tx,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Entry point for a worker. Never fails: every error ends up as a
    /// `Broken` status, which is sent on the channel and also returned.
    pub async fn process_data(&self) -> StatusMessage {
        let span = info_span!("process_document", filename = %self.filename);
        async {
            ACTIVE_DOCUMENT_WORKERS.inc();
            let processing_timer = DOCUMENT_PROCESSING_DURATION_SECONDS.start_timer();
            let start = Instant::now();
            info!("Start processing");

            let status = match self.run().await {
                Ok(WorkerOutcome::AlreadyComplete) => {
                    warn!("Result not written, information already present. Skipped");
                    DOCUMENTS_SKIPPED_TOTAL.inc();
                    StatusMessage::Complete {
                        filename: self.filename.clone(),
                    }
                }
                Ok(WorkerOutcome::Written) => {
                    DOCUMENTS_COMPLETED_TOTAL.inc();
                    StatusMessage::Complete {
                        filename: self.filename.clone(),
                    }
                }
                Err(e) => {
                    if e.is_too_short() {
                        DOCUMENTS_TOO_SHORT_TOTAL.inc();
                    }
                    DOCUMENTS_BROKEN_TOTAL.inc();
                    let root = e.into_root();
                    error!(error = %root, "Document processing failed");
                    StatusMessage::Broken {
                        filename: self.filename.clone(),
                        error: root.to_string(),
                    }
                }
            };

            if self.status_tx.send(status.clone()).is_err() {
                warn!("Status channel closed, outcome not reported");
            }

            processing_timer.observe_duration();
            ACTIVE_DOCUMENT_WORKERS.dec();
            info!("Took {:.2}s.", start.elapsed().as_secs_f64());
            status
        }
        .instrument(span)
        .await
    }

    async fn run(&self) -> Result<WorkerOutcome> {
        let existing = self.writer.load(&self.filename).await?;
        if existing.as_ref().is_some_and(ResultRecord::is_complete) {
            return Ok(WorkerOutcome::AlreadyComplete);
        }

        let document = PaperDocument::new(
            self.filename.clone(),
            self.working_dir.join(&self.filename),
        );
        let processed = self.executor.run_single_async(document).await?;
        debug!(
            start_page = ?processed.start_page,
            lang = ?processed.lang,
            metadata = ?processed.metadata,
            "Document processed"
        );

        let mut record = existing.unwrap_or_default();
        record.merge(ResultRecord::from_document(&processed));
        self.writer.persist(&self.filename, &record).await?;
        Ok(WorkerOutcome::Written)
    }
}

/// Shared pieces every worker of a batch runs with.
pub struct ExtractionRunner {
    working_dir: PathBuf,
    executor: Arc<PipelineExecutor>,
    writer: Arc<dyn BaseWriter>,
    concurrency: usize,
}

impl ExtractionRunner {
    pub fn new(
        working_dir: impl Into<PathBuf>,
        executor: Arc<PipelineExecutor>,
        writer: Arc<dyn BaseWriter>,
        concurrency: usize,
    ) -> Self {
        ExtractionRunner {
            working_dir: working_dir.into(),
            executor,
            writer,
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(
        config: &ExtractionConfig,
        working_dir: &Path,
        output_dir: &Path,
        extractor: Arc<dyn PdfExtractor>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        let steps = build_pipeline_from_config(config, extractor, detector);
        ExtractionRunner::new(
            working_dir,
            Arc::new(PipelineExecutor::new(steps)),
            Arc::new(JsonWriter::new(output_dir, config.output_extension.clone())),
            config.concurrency,
        )
    }

    pub fn worker(
        &self,
        filename: impl Into<String>,
        status_tx: UnboundedSender<StatusMessage>,
    ) -> DocumentWorker {
        DocumentWorker::new(
            filename,
            self.working_dir.clone(),
            Arc::clone(&self.executor),
            Arc::clone(&self.writer),
            status_tx,
        )
    }

    /// Runs one worker task per filename, at most `concurrency` at a time, and
    /// waits for all of them. Returns the number of documents handled.
    ///
    /// A worker task that panics is reported as `Broken` here so each filename
    /// still yields one status message.
    pub async fn run_batch(
        &self,
        filenames: Vec<String>,
        status_tx: UnboundedSender<StatusMessage>,
    ) -> usize {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = FuturesUnordered::new();
        info!(
            documents = filenames.len(),
            concurrency = self.concurrency,
            "Dispatching document workers"
        );

        for filename in filenames {
            let worker = self.worker(filename.clone(), status_tx.clone());
            let semaphore = Arc::clone(&semaphore);
            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                worker.process_data().await
            });
            tasks.push(async move { (filename, handle.await) });
        }

        let mut finished = 0;
        while let Some((filename, joined)) = tasks.next().await {
            finished += 1;
            if let Err(e) = joined {
                error!(%filename, error = %e, "Document worker task failed");
                DOCUMENTS_BROKEN_TOTAL.inc();
                let status = StatusMessage::Broken {
                    filename,
                    error: format!("Worker task failed: {}", e),
                };
                if status_tx.send(status).is_err() {
                    warn!("Status channel closed, outcome not reported");
                }
            }
        }
        finished
    }
}
