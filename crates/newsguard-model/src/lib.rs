#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! newsguard-model
//!
//! Passive-aggressive classifier, training pipeline and artifact I/O. The
//! trained pair is exposed as `FakeNewsModel`, a `Predictor`.
pub mod artifact;
pub mod classifier;
pub mod metrics;
pub mod passive_aggressive;
pub mod pipeline;
pub mod split;

pub use classifier::{FakeNewsModel, NewsClassifier};
pub use metrics::EvaluationReport;
pub use passive_aggressive::PassiveAggressiveClassifier;
pub use pipeline::{Trainer, TrainingOutcome};
