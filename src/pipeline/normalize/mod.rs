// src/pipeline/normalize/mod.rs

pub mod transforms;

use crate::config::NormalizationParams;
use tracing::{debug, warn};

/// One named pass of the normalization chain.
pub trait TextTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, text: &str) -> String;
}

/// Wraps a plain `fn(&str) -> String` transform.
pub struct FnTransform {
    name: &'static str,
    transform: fn(&str) -> String,
}

impl FnTransform {
    pub fn new(name: &'static str, transform: fn(&str) -> String) -> Self {
        FnTransform { name, transform }
    }
}

impl TextTransform for FnTransform {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: &str) -> String {
        (self.transform)(text)
    }
}

pub struct ShortTokenTransform {
    min_len: usize,
}

impl ShortTokenTransform {
    pub fn new(min_len: usize) -> Self {
        ShortTokenTransform { min_len }
    }
}

impl TextTransform for ShortTokenTransform {
    fn name(&self) -> &'static str {
        "short_tokens"
    }

    fn apply(&self, text: &str) -> String {
        transforms::short_tokens(text, self.min_len)
    }
}

/// Applies its transforms left to right.
pub struct Normalizer {
    steps: Vec<Box<dyn TextTransform>>,
}

impl Normalizer {
    pub fn new(steps: Vec<Box<dyn TextTransform>>) -> Self {
        if steps.is_empty() {
            warn!("Normalizer created with no steps.");
        }
        Normalizer { steps }
    }

    /// The standard chain used for extracted PDF text.
    pub fn from_params(params: &NormalizationParams) -> Self {
        Normalizer::new(vec![
            Box::new(FnTransform::new("substitutions", transforms::substitutions)),
            Box::new(FnTransform::new("one_char_per_line", transforms::one_char_per_line)),
            Box::new(FnTransform::new("normalize_characters", transforms::normalize_characters)),
            Box::new(FnTransform::new("lower", transforms::lower)),
            Box::new(FnTransform::new("useless_characters", transforms::useless_characters)),
            Box::new(FnTransform::new("multiple_dots", transforms::multiple_dots)),
            Box::new(FnTransform::new("list_enum", transforms::list_enum)),
            Box::new(FnTransform::new("digits", transforms::digits)),
            Box::new(ShortTokenTransform::new(params.min_token_len)),
            Box::new(FnTransform::new("multiple_spaces", transforms::multiple_spaces)),
        ])
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn normalize(&self, text: &str) -> String {
        self.steps.iter().fold(text.to_string(), |current, step| {
            let next = step.apply(&current);
            debug!(
                step = step.name(),
                before = current.len(),
                after = next.len(),
                "Applied normalization step"
            );
            next
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::from_params(&NormalizationParams::default())
    }
}
