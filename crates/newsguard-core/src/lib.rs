#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Shared configuration, error, and domain types for newsguard.
//!
//! Uses Figment to merge defaults + `config.toml` + `config.<env>.toml` +
//! `APP_*` env vars. The `Predictor`/`Vectorizer`/`Classifier` traits are the
//! seams between the text pipeline, the model, and the HTTP service.

pub mod config;
pub mod data_processor;
pub mod error;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{Label, Sample, SparseVector};
