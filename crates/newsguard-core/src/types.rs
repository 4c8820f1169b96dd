//! Domain types shared by the trainer and the service.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// The two classes the model can emit.
///
/// Ordering matters: `Fake < Real`, and the classifier treats the greater
/// class as the positive side of the decision boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Fake, Label::Real];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Fake => "FAKE",
            Label::Real => "REAL",
        }
    }

    /// Signed target used by margin-based learners.
    pub fn sign(self) -> f64 {
        match self {
            Label::Fake => -1.0,
            Label::Real => 1.0,
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Label::Real
        } else {
            Label::Fake
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labeled training row. `text` is raw until the pipeline normalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub text: String,
    pub label: Label,
}

impl Sample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self { text: text.into(), label }
    }
}

/// Sparse feature vector over a fixed vocabulary.
///
/// `indices` are strictly increasing and all `< dim`; `values[i]` belongs to
/// `indices[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        entries.sort_by_key(|(i, _)| *i);
        entries.dedup_by_key(|(i, _)| *i);
        if let Some((last, _)) = entries.last() {
            if *last >= dim {
                return Err(Error::DimensionMismatch { expected: dim, got: last + 1 });
            }
        }
        let (indices, values) = entries.into_iter().unzip();
        Ok(Self { dim, indices, values })
    }

    pub fn zeros(dim: usize) -> Self {
        Self { dim, indices: Vec::new(), values: Vec::new() }
    }

    pub fn dim(&self) -> usize { self.dim }

    pub fn nnz(&self) -> usize { self.indices.len() }

    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Dot product against a dense weight vector of the same dimension.
    pub fn dot(&self, dense: &[f64]) -> Result<f64> {
        if dense.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: dense.len(), got: self.dim });
        }
        Ok(self.iter().map(|(i, v)| dense[i] * v).sum())
    }

    pub(crate) fn scale_in_place(&mut self, factor: f64) {
        for v in &mut self.values { *v *= factor; }
    }

    /// Scale to unit L2 norm; the zero vector is left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.squared_norm().sqrt();
        if norm > 0.0 {
            self.scale_in_place(1.0 / norm);
        }
    }
}
