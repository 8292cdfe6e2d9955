//! The set of port implementations a command runs against.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveClock, LiveProjectFiles};
use crate::adapters::recording::{RecordingClock, RecordingProjectFiles};
use crate::adapters::replaying::{ReplayingClock, ReplayingProjectFiles};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::manifest::ManifestEntry;
use crate::ports::clock::Clock;
use crate::ports::files::{PortResult, ProjectFiles};

/// Every external boundary the pipeline touches, as trait objects.
///
/// The constructors pick the adapter family: live disk and clock, live
/// with recording, or replay from cassettes.
pub struct ServiceContext {
    /// Clock for stamping snapshots.
    pub clock: Box<dyn Clock>,
    /// Read-only access to the checkout.
    pub files: Box<dyn ProjectFiles>,
}

impl ServiceContext {
    /// Creates a live context backed by the system clock and local disk.
    #[must_use]
    pub fn live() -> Self {
        Self { clock: Box::new(LiveClock), files: Box::new(LiveProjectFiles) }
    }

    /// Creates a recording context writing per-port cassettes under `base`.
    ///
    /// Live adapters do the actual work. Drop the context before calling
    /// [`RecordingSession::finish`] so the recorders are released.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(base: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::in_dir(base)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            files: Box::new(RecordingProjectFiles::new(
                Box::new(LiveProjectFiles),
                Arc::clone(&session.files),
            )),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so per-port
    /// cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;

        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            files: Box::new(ReplayingProjectFiles::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Replays each port from its own cassette file.
    ///
    /// A port left out of `config` panics on first use, naming the port.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured cassette cannot be loaded.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        let clock: Box<dyn Clock> = match replayers.clock {
            Some(r) => Box::new(ReplayingClock::new(r)),
            None => Box::new(Unconfigured),
        };
        let files: Box<dyn ProjectFiles> = match replayers.files {
            Some(r) => Box::new(ReplayingProjectFiles::new(r)),
            None => Box::new(Unconfigured),
        };
        Ok(Self { clock, files })
    }
}

/// Stand-in for a port with no cassette.
struct Unconfigured;

fn unconfigured(port: &str) -> ! {
    panic!("{port} port not configured in CassetteConfig: no cassette loaded for {port}");
}

impl Clock for Unconfigured {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        unconfigured("clock")
    }
}

impl ProjectFiles for Unconfigured {
    fn discover_plan_file(
        &self,
        _root: &Path,
        _candidates: &[String],
    ) -> PortResult<Option<String>> {
        unconfigured("files")
    }

    fn discover_manifests(&self, _root: &Path) -> PortResult<Vec<ManifestEntry>> {
        unconfigured("files")
    }

    fn read_file(&self, _root: &Path, _relative_path: &str) -> PortResult<String> {
        unconfigured("files")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let mut cassette = Cassette::new("test", "abc");
        cassette.interactions = interactions;
        cassette.save(path).unwrap();
    }

    #[test]
    fn replaying_context_from_single_cassette() {
        let dir = std::env::temp_dir().join("repotrack_ctx_test_single");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "files".into(),
                    method: "read_file".into(),
                    input: json!({"root": "/checkout", "path": "plan.md"}),
                    output: json!({"ok": "- [ ] Write docs"}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let content = ctx.files.read_file(Path::new("/elsewhere"), "plan.md").unwrap();
        assert_eq!(content, "- [ ] Write docs");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_from_per_port_cassettes() {
        let dir = std::env::temp_dir().join("repotrack_ctx_test_ports");
        std::fs::create_dir_all(&dir).unwrap();

        let clock_path = dir.join("clock.cassette.yaml");
        write_cassette(
            &clock_path,
            vec![Interaction {
                seq: 0,
                port: "clock".into(),
                method: "now".into(),
                input: json!(null),
                output: json!("2024-01-01T00:00:00Z"),
            }],
        );

        let config = CassetteConfig { clock: Some(clock_path), ..CassetteConfig::default() };
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let config = CassetteConfig::panic_on_unspecified();
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let _ = ctx.files.discover_manifests(Path::new("."));
    }

    #[test]
    fn recording_context_releases_recorders_on_drop() {
        let base = std::env::temp_dir().join("repotrack_ctx_test_recording");
        let _ = std::fs::remove_dir_all(&base);

        let (ctx, session) = ServiceContext::recording_at(&base).unwrap();
        let _ = ctx.clock.now();
        drop(ctx);
        let dir = session.finish().unwrap();

        let replay = ServiceContext::replaying_from(&CassetteConfig::from_session_dir(&dir));
        assert!(replay.is_ok());

        let _ = std::fs::remove_dir_all(&base);
    }
}
