//! Evaluation metrics for the held-out partition.
//!
//! Confusion matrix rows are true labels, columns are predictions, both in
//! `Label::ALL` order (FAKE, REAL).

use serde::Serialize;
use std::fmt;

use newsguard_core::Label;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub confusion: [[usize; 2]; 2],
    pub per_class: [ClassMetrics; 2],
    pub macro_f1: f64,
    pub weighted_f1: f64,
    pub total: usize,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 { num as f64 / den as f64 } else { 0.0 }
}

fn index(label: Label) -> usize {
    match label {
        Label::Fake => 0,
        Label::Real => 1,
    }
}

pub fn evaluate(truth: &[Label], predicted: &[Label]) -> EvaluationReport {
    assert_eq!(truth.len(), predicted.len(), "truth and predictions must have same length");

    let mut confusion = [[0usize; 2]; 2];
    for (&t, &p) in truth.iter().zip(predicted) {
        confusion[index(t)][index(p)] += 1;
    }
    let total = truth.len();
    let correct = confusion[0][0] + confusion[1][1];

    let per_class = Label::ALL.map(|label| {
        let k = index(label);
        let tp = confusion[k][k];
        let predicted_k = confusion[0][k] + confusion[1][k];
        let support = confusion[k][0] + confusion[k][1];
        let precision = ratio(tp, predicted_k);
        let recall = ratio(tp, support);
        let f1 = if precision + recall > 0.0 { 2.0 * precision * recall / (precision + recall) } else { 0.0 };
        ClassMetrics { label, precision, recall, f1, support }
    });

    let macro_f1 = per_class.iter().map(|c| c.f1).sum::<f64>() / 2.0;
    #[allow(clippy::cast_precision_loss)]
    let weighted_f1 = if total > 0 {
        per_class.iter().map(|c| c.f1 * c.support as f64).sum::<f64>() / total as f64
    } else {
        0.0
    };

    EvaluationReport { accuracy: ratio(correct, total), confusion, per_class, macro_f1, weighted_f1, total }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy: {:.2}%", self.accuracy * 100.0)?;
        writeln!(f, "Confusion matrix (rows = true, cols = predicted):")?;
        writeln!(f, "{:>8} {:>8} {:>8}", "", "FAKE", "REAL")?;
        for label in Label::ALL {
            let row = self.confusion[index(label)];
            writeln!(f, "{:>8} {:>8} {:>8}", label.as_str(), row[0], row[1])?;
        }
        writeln!(f)?;
        writeln!(f, "{:>12} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        for c in &self.per_class {
            writeln!(f, "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}", c.label.as_str(), c.precision, c.recall, c.f1, c.support)?;
        }
        writeln!(f, "{:>12} {:>9} {:>9} {:>9.2} {:>9}", "macro f1", "", "", self.macro_f1, self.total)?;
        write!(f, "{:>12} {:>9} {:>9} {:>9.2} {:>9}", "weighted f1", "", "", self.weighted_f1, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsguard_core::Label::{Fake as F, Real as R};

    #[test]
    fn perfect_predictions() {
        let m = evaluate(&[F, R, R], &[F, R, R]);
        assert!((m.accuracy - 1.0).abs() < 1e-9);
        assert_eq!(m.confusion, [[1, 0], [0, 2]]);
        assert!((m.macro_f1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mixed() {
        // true FAKE: 2 right, 1 called REAL; true REAL: 1 right, 1 called FAKE
        let m = evaluate(&[F, F, F, R, R], &[F, F, R, R, F]);
        assert_eq!(m.confusion, [[2, 1], [1, 1]]);
        assert!((m.accuracy - 0.6).abs() < 1e-9);
        let fake = m.per_class[0];
        assert!((fake.precision - 2.0 / 3.0).abs() < 1e-9);
        assert!((fake.recall - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(fake.support, 3);
        let real = m.per_class[1];
        assert!((real.precision - 0.5).abs() < 1e-9);
        assert!((real.recall - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_is_all_zero() {
        let m = evaluate(&[], &[]);
        assert_eq!(m.total, 0);
        assert!(m.accuracy.abs() < 1e-9);
        assert!(m.to_string().contains("Accuracy: 0.00%"));
    }
}
