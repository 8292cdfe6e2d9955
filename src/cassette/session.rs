//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use super::config::port_cassette;
use super::recorder::CassetteRecorder;

/// Environment variable that switches the binary into recording mode.
///
/// Any value other than empty or `1` is taken as the base directory for
/// cassettes instead of [`DEFAULT_CASSETTE_DIR`].
pub const RECORD_ENV: &str = "REPOTRACK_RECORD";

/// Base directory for recorded cassettes, relative to cwd.
pub const DEFAULT_CASSETTE_DIR: &str = ".repotrack/cassettes";

/// One recorder per port, all writing into a fresh timestamped directory.
///
/// The recording adapters hold clones of these handles; they must be
/// dropped before [`finish`](Self::finish).
pub struct RecordingSession {
    /// Recorder for clock interactions.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for project file interactions.
    pub files: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Base directory selected by a `REPOTRACK_RECORD` value.
    #[must_use]
    pub fn base_dir_for(value: &str) -> PathBuf {
        match value.trim() {
            "" | "1" => PathBuf::from(DEFAULT_CASSETTE_DIR),
            dir => PathBuf::from(dir),
        }
    }

    /// Create a new recording session in `<base>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cassette directory already exists
    /// - The directory cannot be created
    pub fn in_dir(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = get_commit_hash();

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = port_cassette(&output_dir, port);
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, &name, &commit)))
        };

        Ok(Self { clock: make_recorder("clock"), files: make_recorder("files"), output_dir })
    }

    /// Directory the cassettes are written into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// Consumes the session and writes each port's cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette file cannot be written, or if a
    /// recording adapter is still alive.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.clock, "clock")?;
        finish_one(self.files, "files")?;

        Ok(self.output_dir)
    }
}

/// Get the current git commit hash, or "unknown" with a warning if unavailable.
fn get_commit_hash() -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        warn!("could not get git commit hash, using 'unknown'");
        "unknown".to_string()
    })
}
