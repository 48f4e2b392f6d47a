use crate::data_model::PaperDocument;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait ProcessingStep: Send + Sync {
    fn name(&self) -> &'static str; // For logging/error reporting

    async fn process(&self, document: PaperDocument) -> Result<PaperDocument>;
}

pub struct PipelineExecutor {
    steps: Vec<Box<dyn ProcessingStep>>, // Holds the ordered steps
}

impl PipelineExecutor {
    pub fn new(steps: Vec<Box<dyn ProcessingStep>>) -> Self {
        if steps.is_empty() {
            warn!("Pipeline created with no steps.");
        }
        PipelineExecutor { steps }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Runs every step in order. The first failing step stops the run and its
    /// error is wrapped in `PipelineError::StepError`.
    pub async fn run_single_async(&self, initial_document: PaperDocument) -> Result<PaperDocument> {
        let mut current_doc = initial_document;
        for step in &self.steps {
            debug!(filename = %current_doc.filename, "Running async step: {}", step.name());

            current_doc = step
                .process(current_doc)
                .await
                .map_err(|e| PipelineError::StepError {
                    step_name: step.name().to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(current_doc)
    }
}
