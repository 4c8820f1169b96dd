use crate::error::Result;
use crate::types::{Label, SparseVector};

/// Maps normalized text onto a fixed-dimension feature space.
pub trait Vectorizer: Send + Sync {
    fn dim(&self) -> usize;
    fn transform(&self, normalized: &str) -> Result<SparseVector>;
}

/// Binary decision over a feature vector.
pub trait Classifier: Send + Sync {
    fn dim(&self) -> usize;
    fn decision(&self, features: &SparseVector) -> Result<f64>;

    fn predict(&self, features: &SparseVector) -> Result<Label> {
        self.decision(features).map(Label::from_score)
    }
}

/// Raw text in, label out. The seam the HTTP layer depends on.
pub trait Predictor: Send + Sync {
    fn predict(&self, text: &str) -> Result<Label>;
}
