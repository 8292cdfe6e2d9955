//! Accumulates interactions and writes them out as a cassette.

use std::path::PathBuf;

use super::format::{Cassette, Interaction};

/// Buffers interactions in memory until [`finish`](Self::finish).
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Recorder that will write to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), cassette: Cassette::new(name, commit) }
    }

    /// Appends an interaction; `seq` is its position in the recording.
    pub fn record(
        &mut self,
        port: &str,
        method: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// True before the first [`record`](Self::record).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cassette.interactions.is_empty()
    }

    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        self.cassette.save(&self.path)?;
        Ok(self.path)
    }
}
