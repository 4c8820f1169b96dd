use std::path::Path;
use tracing::{info, warn};

use newsguard_core::traits::{Classifier, Predictor, Vectorizer};
use newsguard_core::{Error, Label, Result};
use newsguard_text::{normalize, TfidfVectorizer};

use crate::artifact;
use crate::passive_aggressive::PassiveAggressiveClassifier;

/// Vectorizer and classifier bound together behind [`Predictor`].
#[derive(Debug, Clone)]
pub struct NewsClassifier<V, C> {
    vectorizer: V,
    classifier: C,
}

pub type FakeNewsModel = NewsClassifier<TfidfVectorizer, PassiveAggressiveClassifier>;

impl<V: Vectorizer, C: Classifier> NewsClassifier<V, C> {
    pub fn new(vectorizer: V, classifier: C) -> Result<Self> {
        if vectorizer.dim() != classifier.dim() {
            return Err(Error::DimensionMismatch { expected: classifier.dim(), got: vectorizer.dim() });
        }
        Ok(Self { vectorizer, classifier })
    }

    pub fn vectorizer(&self) -> &V { &self.vectorizer }

    pub fn classifier(&self) -> &C { &self.classifier }

    pub fn into_parts(self) -> (V, C) { (self.vectorizer, self.classifier) }

    /// Classify text that has already been through [`normalize`].
    pub fn classify_normalized(&self, normalized: &str) -> Result<Label> {
        let features = self.vectorizer.transform(normalized)?;
        self.classifier.predict(&features)
    }
}

impl<V: Vectorizer, C: Classifier> Predictor for NewsClassifier<V, C> {
    fn predict(&self, text: &str) -> Result<Label> {
        let normalized = normalize(text);
        let label = self.classify_normalized(&normalized)?;
        let preview: String = normalized.chars().take(50).collect();
        info!(input = %preview, prediction = %label, "classified");
        Ok(label)
    }
}

impl FakeNewsModel {
    pub fn load(vectorizer_path: &Path, model_path: &Path) -> Result<Self> {
        let vectorizer: TfidfVectorizer = artifact::load(vectorizer_path)?;
        vectorizer.validate()?;
        let classifier: PassiveAggressiveClassifier = artifact::load(model_path)?;
        classifier.validate()?;
        Self::new(vectorizer, classifier)
    }

    /// Stage both artifacts before committing either. If the model rename
    /// fails after the vectorizer landed, the vectorizer is rolled back so the
    /// pair on disk always belongs together.
    pub fn save(&self, vectorizer_path: &Path, model_path: &Path) -> Result<()> {
        let staged_vectorizer = artifact::stage(vectorizer_path, &self.vectorizer)?;
        let staged_model = artifact::stage(model_path, &self.classifier)?;
        let previous = artifact::snapshot(vectorizer_path)?;
        let v = staged_vectorizer.commit()?;
        let m = match staged_model.commit() {
            Ok(m) => m,
            Err(e) => {
                if let Err(rollback) = artifact::restore(&v, previous.as_deref()) {
                    warn!(error = %rollback, path = %v.display(), "failed to roll back vectorizer artifact");
                }
                return Err(e);
            }
        };
        info!(vectorizer = %v.display(), model = %m.display(), "saved artifacts");
        Ok(())
    }
}
