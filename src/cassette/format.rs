//! On-disk cassette layout: one YAML document per recording.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One call across a port boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, across all ports.
    pub seq: u64,
    /// Port name (`clock` or `files`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments, kept for readability; replay does not match on them.
    pub input: serde_json::Value,
    /// Return value. Fallible methods use `{"ok": v}` or `{"err": msg}`.
    pub output: serde_json::Value,
}

/// A recorded run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When recording started.
    pub recorded_at: DateTime<Utc>,
    /// Git commit of the recording build, or `unknown`.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Empty cassette stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Reads a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a cassette.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Writes the cassette as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)
    }
}
