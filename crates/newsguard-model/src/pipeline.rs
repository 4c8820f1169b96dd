//! End-to-end training: load, normalize, split, fit, evaluate, save.

use std::path::Path;
use tracing::info;

use newsguard_core::data_processor::DataProcessor;
use newsguard_core::traits::Classifier;
use newsguard_core::{Config, Label, Result, Sample};
use newsguard_text::{normalize, TfidfVectorizer};

use crate::classifier::FakeNewsModel;
use crate::metrics::{evaluate, EvaluationReport};
use crate::passive_aggressive::{FitOptions, PassiveAggressiveClassifier};
use crate::split::train_test_split;

pub struct TrainingOutcome {
    pub model: FakeNewsModel,
    pub report: EvaluationReport,
    pub train_size: usize,
    pub test_size: usize,
}

pub struct Trainer {
    config: Config,
    show_progress: bool,
}

impl Trainer {
    pub fn new(config: Config) -> Self { Self { config, show_progress: false } }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &Config { &self.config }

    /// Fit on an in-memory corpus. Nothing touches disk.
    pub fn train(&self, samples: &[Sample]) -> Result<TrainingOutcome> {
        let texts: Vec<String> = samples.iter().map(|s| normalize(&s.text)).collect();
        let labels: Vec<Label> = samples.iter().map(|s| s.label).collect();

        let t = &self.config.training;
        let split = train_test_split(samples.len(), t.test_size, t.seed);
        info!(train = split.train.len(), test = split.test.len(), "split corpus");

        let pick_text = |idx: &[usize]| idx.iter().map(|&i| texts[i].clone()).collect::<Vec<_>>();
        let pick_label = |idx: &[usize]| idx.iter().map(|&i| labels[i]).collect::<Vec<_>>();
        let (train_text, test_text) = (pick_text(&split.train), pick_text(&split.test));
        let (train_y, test_y) = (pick_label(&split.train), pick_label(&split.test));

        // Vocabulary and IDF come from the training partition only.
        let mut vectorizer = TfidfVectorizer::new(&self.config.vectorizer);
        let train_x = vectorizer.fit_transform(&train_text, self.show_progress)?;
        let test_x = vectorizer.transform_batch(&test_text, self.show_progress)?;

        let mut classifier = PassiveAggressiveClassifier::new(self.config.classifier.clone());
        classifier.fit(&train_x, &train_y, FitOptions { seed: t.seed, show_progress: self.show_progress })?;

        let predicted = test_x.iter().map(|x| classifier.predict(x)).collect::<Result<Vec<_>>>()?;
        let report = evaluate(&test_y, &predicted);
        info!(accuracy = report.accuracy, macro_f1 = report.macro_f1, "evaluated on held-out split");

        Ok(TrainingOutcome {
            model: FakeNewsModel::new(vectorizer, classifier)?,
            report,
            train_size: split.train.len(),
            test_size: split.test.len(),
        })
    }

    /// Load both corpora, train, and write both artifacts. A missing input
    /// file aborts before anything is written.
    pub fn run(&self, fake_csv: &Path, real_csv: &Path, out_dir: &Path) -> Result<TrainingOutcome> {
        let samples = DataProcessor::new(self.config.training.text_column.clone()).load_labeled(fake_csv, real_csv)?;
        let outcome = self.train(&samples)?;
        let a = &self.config.artifacts;
        outcome.model.save(&out_dir.join(&a.vectorizer_file), &out_dir.join(&a.model_file))?;
        Ok(outcome)
    }
}
