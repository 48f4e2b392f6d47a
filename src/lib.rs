#![allow(non_snake_case)]

// Declare the modules that form the library's public API
pub mod config;
pub mod data_model;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod utils;
pub mod worker_logic;

pub use data_model::{PaperDocument, ResultRecord, StatusMessage};
pub use error::{PipelineError, Result};
