//! JSON artifact persistence.
//!
//! Writes go to a temp file in the destination directory and are renamed
//! into place, so readers never observe a half-written artifact.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use newsguard_core::{Error, Result};

fn artifact_err(path: &Path, reason: impl ToString) -> Error {
    Error::Artifact { path: path.to_path_buf(), reason: reason.to_string() }
}

/// Serialize into a temp file next to `path`. Nothing is visible at `path`
/// until [`StagedArtifact::commit`].
pub fn stage<T: Serialize>(path: &Path, value: &T) -> Result<StagedArtifact> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;
    let tmp = NamedTempFile::new_in(&dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    Ok(StagedArtifact { tmp, dest: path.to_path_buf() })
}

pub struct StagedArtifact {
    tmp: NamedTempFile,
    dest: PathBuf,
}

impl StagedArtifact {
    pub fn commit(self) -> Result<PathBuf> {
        let dest = self.dest;
        self.tmp.persist(&dest).map_err(|e| artifact_err(&dest, e.error))?;
        Ok(dest)
    }
}

/// Current bytes at `path`, or `None` if nothing is there yet.
pub fn snapshot(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(artifact_err(path, e)),
    }
}

/// Put `path` back to a [`snapshot`]: rewrite the old bytes, or remove the
/// file if there were none.
pub fn restore(path: &Path, previous: Option<&[u8]>) -> Result<()> {
    match previous {
        Some(bytes) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| artifact_err(path, e.error))?;
        }
        None => fs::remove_file(path).map_err(|e| artifact_err(path, e))?,
    }
    Ok(())
}

pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    stage(path, value)?.commit()
}

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| artifact_err(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| artifact_err(path, e))
}
