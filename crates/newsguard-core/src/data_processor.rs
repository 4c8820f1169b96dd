//! CSV corpus loading for the trainer.
//!
//! Each source file is one class. Rows whose text cell is missing or blank are
//! dropped; everything else is returned raw, in file order, FAKE rows first.

use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Label, Sample};

#[derive(Debug, Clone)]
pub struct CorpusSource {
    pub path: PathBuf,
    pub label: Label,
}

pub struct DataProcessor {
    text_column: String,
}

impl Default for DataProcessor {
    fn default() -> Self { Self::new("text") }
}

impl DataProcessor {
    pub fn new(text_column: impl Into<String>) -> Self {
        Self { text_column: text_column.into() }
    }

    pub fn text_column(&self) -> &str { &self.text_column }

    /// Load the fake and real corpora. Both files are checked for existence
    /// before either is read.
    pub fn load_labeled(&self, fake_path: &Path, real_path: &Path) -> Result<Vec<Sample>> {
        let sources = [
            CorpusSource { path: fake_path.to_path_buf(), label: Label::Fake },
            CorpusSource { path: real_path.to_path_buf(), label: Label::Real },
        ];
        self.load_sources(&sources)
    }

    pub fn load_sources(&self, sources: &[CorpusSource]) -> Result<Vec<Sample>> {
        if let Some(missing) = sources.iter().find(|s| !s.path.is_file()) {
            return Err(Error::MissingDataset(missing.path.clone()));
        }
        let mut samples = Vec::new();
        for source in sources {
            let before = samples.len();
            self.read_csv(&source.path, source.label, &mut samples)?;
            info!(path = %source.path.display(), label = %source.label, rows = samples.len() - before, "loaded corpus");
        }
        Ok(samples)
    }

    fn read_csv(&self, path: &Path, label: Label, out: &mut Vec<Sample>) -> Result<()> {
        let csv_err = |source| Error::Csv { path: path.to_path_buf(), source };
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let column = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .position(|h| h.trim() == self.text_column)
            .ok_or_else(|| Error::MissingColumn { column: self.text_column.clone(), path: path.to_path_buf() })?;

        let mut dropped = 0usize;
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            // whitespace-only cells would normalize to an empty document
            match record.get(column) {
                Some(text) if !text.trim().is_empty() => out.push(Sample::new(text, label)),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(path = %path.display(), dropped, "dropped rows with missing or blank text");
        }
        Ok(())
    }
}
