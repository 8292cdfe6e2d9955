//! Which cassette file each port replays from.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Cassette path per port. A port without one panics when called.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the project files port cassette file.
    pub files: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the project files port.
    pub files: Option<CassetteReplayer>,
}

/// `<dir>/<port>.cassette.yaml`, the layout a recording session writes.
#[must_use]
pub fn port_cassette(dir: &Path, port: &str) -> PathBuf {
    dir.join(format!("{port}.cassette.yaml"))
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`. Any port called
    /// during replay will panic because no cassette is loaded.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Points every port at the cassettes a [`RecordingSession`] wrote into
    /// `dir` (`clock.cassette.yaml`, `files.cassette.yaml`).
    ///
    /// [`RecordingSession`]: super::session::RecordingSession
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        Self { clock: Some(port_cassette(dir, "clock")), files: Some(port_cassette(dir, "files")) }
    }

    /// Load a cassette file and create a replayer over all its interactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Cassette::load(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            clock: self.clock.as_deref().map(Self::load_cassette).transpose()?,
            files: self.files.as_deref().map(Self::load_cassette).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let mut cassette = Cassette::new("test", "abc");
        cassette.interactions = interactions;
        cassette.save(path).unwrap();
    }

    fn read_file_interaction(output: serde_json::Value) -> Interaction {
        Interaction {
            seq: 0,
            port: "files".into(),
            method: "read_file".into(),
            input: json!({"path": "plan.md"}),
            output,
        }
    }

    #[test]
    fn panic_on_unspecified_returns_all_none() {
        let config = CassetteConfig::panic_on_unspecified();
        assert!(config.clock.is_none());
        assert!(config.files.is_none());
    }

    #[test]
    fn session_dir_names_both_ports() {
        let config = CassetteConfig::from_session_dir(Path::new("/rec"));
        assert_eq!(config.clock.as_deref(), Some(Path::new("/rec/clock.cassette.yaml")));
        assert_eq!(config.files.as_deref(), Some(Path::new("/rec/files.cassette.yaml")));
    }

    #[test]
    fn load_per_port_cassettes() {
        let dir = std::env::temp_dir().join("repotrack_config_test_ports");
        std::fs::create_dir_all(&dir).unwrap();

        let files_path = dir.join("files.cassette.yaml");
        write_cassette(&files_path, vec![read_file_interaction(json!({"ok": "- [ ] a"}))]);

        let config = CassetteConfig { files: Some(files_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let files = replayers.files.as_mut().unwrap();
        let interaction = files.next_interaction("files", "read_file");
        assert_eq!(interaction.output, json!({"ok": "- [ ] a"}));
        assert!(replayers.clock.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_cassette_is_an_error() {
        let dir = std::env::temp_dir().join("repotrack_config_test_bad");
        std::fs::create_dir_all(&dir).unwrap();
        let bad = dir.join("files.cassette.yaml");
        std::fs::write(&bad, "interactions: [").unwrap();

        let config = CassetteConfig {
            clock: Some(dir.join("absent.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.load_all().err().unwrap();
        assert!(err.starts_with("Failed to read cassette file"));

        let err = CassetteConfig::load_cassette(&bad).err().unwrap();
        assert!(err.starts_with("Failed to parse cassette file"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
