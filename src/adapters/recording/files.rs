//! Recording adapter for the `ProjectFiles` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::manifest::ManifestEntry;
use crate::ports::files::{PortResult, ProjectFiles};

/// Records project file interactions while delegating to an inner
/// implementation.
pub struct RecordingProjectFiles {
    inner: Box<dyn ProjectFiles>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProjectFiles {
    /// Creates a new recording adapter wrapping the given implementation.
    pub fn new(inner: Box<dyn ProjectFiles>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RootInput<'a> {
    root: &'a str,
}

#[derive(Serialize)]
struct PlanInput<'a> {
    root: &'a str,
    candidates: &'a [String],
}

#[derive(Serialize)]
struct ReadInput<'a> {
    root: &'a str,
    path: &'a str,
}

impl ProjectFiles for RecordingProjectFiles {
    fn discover_plan_file(
        &self,
        root: &Path,
        candidates: &[String],
    ) -> PortResult<Option<String>> {
        let result = self.inner.discover_plan_file(root, candidates);
        let input = PlanInput { root: &root.display().to_string(), candidates };
        record_result(&self.recorder, "files", "discover_plan_file", &input, &result);
        result
    }

    fn discover_manifests(&self, root: &Path) -> PortResult<Vec<ManifestEntry>> {
        let result = self.inner.discover_manifests(root);
        let input = RootInput { root: &root.display().to_string() };
        record_result(&self.recorder, "files", "discover_manifests", &input, &result);
        result
    }

    fn read_file(&self, root: &Path, relative_path: &str) -> PortResult<String> {
        let result = self.inner.read_file(root, relative_path);
        let input = ReadInput { root: &root.display().to_string(), path: relative_path };
        record_result(&self.recorder, "files", "read_file", &input, &result);
        result
    }
}
