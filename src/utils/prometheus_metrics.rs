// src/utils/prometheus_metrics.rs

use once_cell::sync::Lazy;
use prometheus::{register_counter, register_gauge, register_histogram, Counter, Gauge, Histogram};

pub static DOCUMENTS_COMPLETED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "extractor_documents_completed_total",
        "Total number of documents whose result file was written."
    )
    .expect("Failed to register DOCUMENTS_COMPLETED_TOTAL counter")
});

pub static DOCUMENTS_SKIPPED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "extractor_documents_skipped_total",
        "Total number of documents skipped because a complete result already existed."
    )
    .expect("Failed to register DOCUMENTS_SKIPPED_TOTAL counter")
});

pub static DOCUMENTS_TOO_SHORT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "extractor_documents_too_short_total",
        "Total number of documents rejected because their plaintext was too short."
    )
    .expect("Failed to register DOCUMENTS_TOO_SHORT_TOTAL counter")
});

pub static DOCUMENTS_BROKEN_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "extractor_documents_broken_total",
        "Total number of documents reported as broken, too short ones included."
    )
    .expect("Failed to register DOCUMENTS_BROKEN_TOTAL counter")
});

pub static DOCUMENT_PROCESSING_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "extractor_document_processing_duration_seconds",
        "Histogram of per-document processing durations."
    )
    .expect("Failed to register DOCUMENT_PROCESSING_DURATION_SECONDS histogram")
});

pub static ACTIVE_DOCUMENT_WORKERS: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "extractor_active_document_workers",
        "Number of documents currently being processed."
    )
    .expect("Failed to register ACTIVE_DOCUMENT_WORKERS gauge")
});
