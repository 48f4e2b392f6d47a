// src/pipeline/mod.rs

pub mod extraction;
pub mod normalize;
pub mod steps;
pub mod writers;
