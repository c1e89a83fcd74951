use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::export_filename;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("artifact directory missing or not writable: {0}")]
    ArtifactDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the artifact directory exists; create if missing.
pub fn ensure_artifact_dir(dir: &Path) -> Result<(), MaterializeError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| MaterializeError::ArtifactDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(MaterializeError::ArtifactDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| MaterializeError::ArtifactDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| MaterializeError::ArtifactDir(e.to_string()))?;
    Ok(())
}

/// Writes received artifacts under `dir` and hands out display handles.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Atomically writes the artifact payload under its deterministic name
    /// by writing a temp file then renaming, and returns the handle that
    /// owns the resulting file.
    pub fn materialize(
        &self,
        theme: Option<&str>,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<DisplayHandle, MaterializeError> {
        ensure_artifact_dir(&self.dir)?;

        let filename = export_filename(theme, bytes, content_type);
        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target)
            .map_err(|e| MaterializeError::Io(e.error))?;
        Ok(DisplayHandle {
            path: target,
            kept: false,
        })
    }
}

/// Scoped handle to a materialized artifact file.
///
/// Dropping the handle removes the file again, so a superseded strip
/// does not linger on disk. `keep` opts out for a permanent export.
#[derive(Debug)]
pub struct DisplayHandle {
    path: PathBuf,
    kept: bool,
}

impl DisplayHandle {
    /// Location of the materialized file, valid while the handle lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leaves the file in place and returns where it ended up.
    pub fn keep(mut self) -> PathBuf {
        self.kept = true;
        self.path.clone()
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        if !self.kept {
            // Best effort. A file the user already deleted is fine.
            let _ = fs::remove_file(&self.path);
        }
    }
}
