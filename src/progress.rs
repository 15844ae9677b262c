use crate::badges::BadgeSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Flat record persisted between sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress
{
    pub score: u32,
    pub found_eggs: BTreeSet<String>,
    pub badges: BadgeSet,
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressError
{
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct ProgressStore
{
    path: PathBuf,
}

impl ProgressStore
{
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    /// A missing file is a fresh start, not an error.
    pub fn load(&self) -> Result<Progress, ProgressError>
    {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no progress file at {}", self.path.display());
                return Ok(Progress::default());
            }
            Err(err) => return Err(err.into()),
        };
        let progress = serde_json::from_str(&text)?;
        log::debug!("progress loaded from {}", self.path.display());
        Ok(progress)
    }

    pub fn save(&self, progress: &Progress) -> Result<(), ProgressError>
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ProgressError>
    {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
