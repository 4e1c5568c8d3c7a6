// crates/pagecraft-runtime/src/save.rs
use std::path::PathBuf;

use anyhow::Context;
use pagecraft_core::PageDocument;
use thiserror::Error;

/// Persists a page snapshot. What "persist" means is up to the host.
pub trait SaveHandler {
    fn save(&mut self, payload: &PageDocument) -> anyhow::Result<()>;
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("A save is already in progress")]
    InFlight,

    #[error("Error saving page: {0:#}")]
    Failed(anyhow::Error),
}

/// Writes the payload as pretty JSON to a fixed path.
#[derive(Debug, Clone)]
pub struct FileSaveHandler {
    path: PathBuf,
}

impl FileSaveHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SaveHandler for FileSaveHandler {
    fn save(&mut self, payload: &PageDocument) -> anyhow::Result<()> {
        payload
            .save(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_keeps_cause_chain() {
        let error = SaveError::Failed(anyhow::anyhow!("disk full").context("Failed to write page.json"));
        assert_eq!(error.to_string(), "Error saving page: Failed to write page.json: disk full");
    }
}
