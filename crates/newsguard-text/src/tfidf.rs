//! TF-IDF vectorizer fitted on normalized training text.
//!
//! Vocabulary indices follow lexicographic term order. IDF is smoothed,
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalized.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use newsguard_core::config::VectorizerConfig;
use newsguard_core::traits::Vectorizer;
use newsguard_core::{Error, Result, SparseVector};

use crate::tokenize::tokenize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_df: f64,
    min_df: usize,
    stop_words: bool,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            max_df: config.max_df,
            min_df: config.min_df.max(1),
            stop_words: config.stop_words,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool { !self.idf.is_empty() }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> { &self.vocabulary }

    pub fn idf(&self) -> &[f64] { &self.idf }

    /// Learn vocabulary and IDF weights. Refits from scratch on every call.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(Error::EmptyVocabulary("no documents to fit on".to_string()));
        }
        let n_docs = documents.len();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: HashSet<String> = tokenize(doc, self.stop_words).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(Error::EmptyVocabulary("documents contain only stop words or no tokens".to_string()));
        }

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_count = (self.max_df * n_docs as f64).floor() as usize;
        if max_count < self.min_df {
            return Err(Error::InvalidConfig(format!(
                "max_df corresponds to {max_count} documents, fewer than min_df {}",
                self.min_df
            )));
        }
        let total_terms = doc_freq.len();
        let kept: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df && *df <= max_count)
            .collect();
        if kept.is_empty() {
            return Err(Error::EmptyVocabulary("after pruning, no terms remain; try a lower min_df or a higher max_df".to_string()));
        }
        debug!(total_terms, pruned = total_terms - kept.len(), "document frequency pruning");

        #[allow(clippy::cast_precision_loss)]
        let n = n_docs as f64;
        self.vocabulary = BTreeMap::new();
        self.idf = Vec::with_capacity(kept.len());
        // BTreeMap iteration is sorted, so indices follow term order.
        for (index, (term, df)) in kept.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let idf = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
            self.idf.push(idf);
            self.vocabulary.insert(term, index);
        }
        info!(documents = n_docs, features = self.idf.len(), "fitted tf-idf vocabulary");
        Ok(())
    }

    /// Transform many documents with a progress bar. Used by the trainer.
    pub fn transform_batch(&self, documents: &[String], show_progress: bool) -> Result<Vec<SparseVector>> {
        let pb = if show_progress { ProgressBar::new(documents.len() as u64) } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} docs ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        let mut rows = Vec::with_capacity(documents.len());
        for doc in documents {
            rows.push(self.transform(doc)?);
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(rows)
    }

    pub fn fit_transform(&mut self, documents: &[String], show_progress: bool) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform_batch(documents, show_progress)
    }

    /// Reject artifacts whose vocabulary and IDF table disagree.
    pub fn validate(&self) -> Result<()> {
        let dim = self.idf.len();
        if dim == 0 {
            return Err(Error::EmptyVocabulary("vectorizer is not fitted".to_string()));
        }
        if self.vocabulary.len() != dim || self.vocabulary.values().any(|&i| i >= dim) {
            return Err(Error::DimensionMismatch { expected: dim, got: self.vocabulary.len() });
        }
        Ok(())
    }
}

impl Vectorizer for TfidfVectorizer {
    fn dim(&self) -> usize { self.idf.len() }

    fn transform(&self, normalized: &str) -> Result<SparseVector> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(normalized, self.stop_words) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }
        let entries = counts.into_iter().map(|(i, tf)| (i, tf * self.idf[i])).collect();
        let mut row = SparseVector::new(self.dim(), entries)?;
        row.l2_normalize();
        Ok(row)
    }
}
