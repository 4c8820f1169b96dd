//! Passive-Aggressive (PA-I) linear classifier with hinge loss.

use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use newsguard_core::config::ClassifierConfig;
use newsguard_core::traits::Classifier;
use newsguard_core::{Error, Label, Result, SparseVector};

/// Intercept step scale for sparse inputs.
const SPARSE_INTERCEPT_DECAY: f64 = 0.01;
const HINGE_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveAggressiveClassifier {
    params: ClassifierConfig,
    /// Sorted; the decision function is positive for `classes[1]`.
    classes: [Label; 2],
    weights: Vec<f64>,
    intercept: f64,
    n_iter: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub seed: u64,
    pub show_progress: bool,
}

impl PassiveAggressiveClassifier {
    pub fn new(params: ClassifierConfig) -> Self {
        Self { params, classes: Label::ALL, weights: Vec::new(), intercept: 0.0, n_iter: 0 }
    }

    pub fn weights(&self) -> &[f64] { &self.weights }

    pub fn intercept(&self) -> f64 { self.intercept }

    /// Epochs actually run by the last `fit`.
    pub fn n_iter(&self) -> usize { self.n_iter }

    pub fn fit(&mut self, x: &[SparseVector], y: &[Label], opts: FitOptions) -> Result<()> {
        if x.len() != y.len() {
            return Err(Error::DimensionMismatch { expected: x.len(), got: y.len() });
        }
        let first = *y.first().ok_or_else(|| Error::SingleClass("no samples".to_string()))?;
        if y.iter().all(|l| *l == first) {
            return Err(Error::SingleClass(first.to_string()));
        }
        let dim = x[0].dim();
        if let Some(bad) = x.iter().find(|row| row.dim() != dim) {
            return Err(Error::DimensionMismatch { expected: dim, got: bad.dim() });
        }

        self.weights = vec![0.0; dim];
        self.intercept = 0.0;
        self.n_iter = 0;

        let n = x.len();
        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
        let mut best_loss = f64::INFINITY;
        let mut no_improvement = 0usize;

        let pb = if opts.show_progress { ProgressBar::new(self.params.max_iter as u64) } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] epoch {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        for epoch in 1..=self.params.max_iter {
            if self.params.shuffle {
                order.shuffle(&mut rng);
            }
            let mut sum_loss = 0.0;
            for &i in &order {
                sum_loss += self.step(&x[i], y[i].sign())?;
            }
            self.n_iter = epoch;
            pb.set_message(format!("loss {sum_loss:.4}"));
            pb.inc(1);
            debug!(epoch, sum_loss, "pa epoch");

            if let Some(tol) = self.params.tol {
                #[allow(clippy::cast_precision_loss)]
                let required_gain = tol * n as f64;
                if sum_loss > best_loss - required_gain {
                    no_improvement += 1;
                } else {
                    no_improvement = 0;
                }
                if sum_loss < best_loss {
                    best_loss = sum_loss;
                }
                if no_improvement >= self.params.n_iter_no_change {
                    debug!(epoch, "converged");
                    break;
                }
            }
        }
        pb.finish_and_clear();
        info!(samples = n, features = dim, epochs = self.n_iter, "fitted passive-aggressive classifier");
        Ok(())
    }

    /// One PA-I update; returns the hinge loss before the update.
    fn step(&mut self, x: &SparseVector, y: f64) -> Result<f64> {
        let p = x.dot(&self.weights)? + self.intercept;
        let loss = (HINGE_THRESHOLD - y * p).max(0.0);
        let sq_norm = x.squared_norm();
        if loss <= 0.0 || sq_norm == 0.0 {
            return Ok(loss);
        }
        let tau = (loss / sq_norm).min(self.params.c) * y;
        for (i, v) in x.iter() {
            self.weights[i] += tau * v;
        }
        if self.params.fit_intercept {
            self.intercept += tau * SPARSE_INTERCEPT_DECAY;
        }
        Ok(loss)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(Error::EmptyVocabulary("classifier is not fitted".to_string()));
        }
        if self.classes != Label::ALL {
            return Err(Error::SingleClass(format!("unexpected class order {:?}", self.classes)));
        }
        Ok(())
    }
}

impl Classifier for PassiveAggressiveClassifier {
    fn dim(&self) -> usize { self.weights.len() }

    fn decision(&self, features: &SparseVector) -> Result<f64> {
        Ok(features.dot(&self.weights)? + self.intercept)
    }

    fn predict(&self, features: &SparseVector) -> Result<Label> {
        let score = self.decision(features)?;
        Ok(if score > 0.0 { self.classes[1] } else { self.classes[0] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(dim: usize, entries: &[(usize, f64)]) -> SparseVector {
        SparseVector::new(dim, entries.to_vec()).unwrap()
    }

    fn opts() -> FitOptions {
        FitOptions { seed: 42, show_progress: false }
    }

    #[test]
    fn separates_disjoint_features() {
        let x = vec![row(4, &[(0, 1.0)]), row(4, &[(1, 1.0)]), row(4, &[(2, 1.0)]), row(4, &[(3, 1.0)])];
        let y = vec![Label::Fake, Label::Fake, Label::Real, Label::Real];
        let mut clf = PassiveAggressiveClassifier::new(ClassifierConfig::default());
        clf.fit(&x, &y, opts()).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_eq!(clf.predict(xi).unwrap(), *yi);
        }
        assert!(clf.n_iter() <= ClassifierConfig::default().max_iter);
    }

    #[test]
    fn first_update_matches_pa1_rule() {
        // One REAL sample with ||x||^2 = 4: loss 1, tau = min(C, 1/4) = 0.25.
        let mut clf = PassiveAggressiveClassifier::new(ClassifierConfig::default());
        clf.weights = vec![0.0; 2];
        let loss = clf.step(&row(2, &[(0, 2.0)]), 1.0).unwrap();
        assert!((loss - 1.0).abs() < 1e-12);
        assert!((clf.weights[0] - 0.5).abs() < 1e-12);
        assert!((clf.intercept - 0.25 * SPARSE_INTERCEPT_DECAY).abs() < 1e-12);
    }

    #[test]
    fn aggressiveness_is_capped_by_c() {
        let params = ClassifierConfig { c: 0.1, ..ClassifierConfig::default() };
        let mut clf = PassiveAggressiveClassifier::new(params);
        clf.weights = vec![0.0; 1];
        clf.step(&row(1, &[(0, 0.5)]), -1.0).unwrap();
        assert!((clf.weights[0] + 0.05).abs() < 1e-12);
    }

    #[test]
    fn single_class_and_mismatched_dims_are_rejected() {
        let mut clf = PassiveAggressiveClassifier::new(ClassifierConfig::default());
        let x = vec![row(2, &[(0, 1.0)]), row(2, &[(1, 1.0)])];
        assert!(matches!(clf.fit(&x, &[Label::Real, Label::Real], opts()), Err(Error::SingleClass(_))));

        let x = vec![row(2, &[(0, 1.0)]), row(3, &[(1, 1.0)])];
        assert!(matches!(
            clf.fit(&x, &[Label::Fake, Label::Real], opts()),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(clf.fit(&[], &[], opts()).is_err());
    }

    #[test]
    fn same_seed_same_weights() {
        let x: Vec<SparseVector> = (0..20)
            .map(|i| row(6, &[(i % 6, 1.0), ((i * 5 + 1) % 6, 0.5)]))
            .collect();
        let y: Vec<Label> = (0..20).map(|i| if i % 6 < 3 { Label::Fake } else { Label::Real }).collect();
        let mut a = PassiveAggressiveClassifier::new(ClassifierConfig::default());
        let mut b = PassiveAggressiveClassifier::new(ClassifierConfig::default());
        a.fit(&x, &y, opts()).unwrap();
        b.fit(&x, &y, opts()).unwrap();
        assert_eq!(a, b);
    }
}
