//! One project run: plan file to tasks and progress, manifests to skills.
//!
//! The pipeline owns no parsing logic. It asks the [`ProjectFiles`] port
//! for content, hands it to the extractors, and stamps the snapshot with
//! the [`Clock`] port. Any port failure ends the run with a single
//! [`TrackError`]; manifest parse problems are logged and never fatal.
//!
//! [`ProjectFiles`]: crate::ports::ProjectFiles
//! [`Clock`]: crate::ports::Clock

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::error::{Result, TrackError};
use crate::manifest;
use crate::progress::{ProgressCalculator, ProgressSnapshot};
use crate::skills::{self, Skill};
use crate::tasks::{self, Task};

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Input accepted, nothing read yet.
    Started,
    /// Plan file read and tasks extracted.
    TasksExtracted,
    /// Snapshot computed.
    ProgressComputed,
    /// Manifests read and skills mapped.
    SkillsExtracted,
    /// Finished successfully.
    Completed,
    /// Stopped on an error.
    Failed,
}

impl RunState {
    /// True for `Completed` and `Failed`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Started => "started",
            Self::TasksExtracted => "tasks_extracted",
            Self::ProgressComputed => "progress_computed",
            Self::SkillsExtracted => "skills_extracted",
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

/// What to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Project handle; must parse as a UUID.
    pub project_id: String,
    /// Where the checkout came from, carried through to the report.
    pub repo_url: Option<String>,
    /// Local checkout root.
    pub root: PathBuf,
    /// Plan file to try before the configured candidates.
    pub plan_path: Option<String>,
}

/// Tasks read from one plan file plus their snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    /// Plan file the tasks came from, relative to the checkout root.
    pub plan_path: String,
    /// Extracted tasks.
    pub tasks: Vec<Task>,
    /// Progress over `tasks`.
    pub progress: ProgressSnapshot,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Validated project handle.
    pub project_id: Uuid,
    /// Repository the checkout came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Plan file the tasks came from.
    pub plan_path: String,
    /// Extracted tasks.
    pub tasks: Vec<Task>,
    /// Progress over `tasks`.
    pub progress: ProgressSnapshot,
    /// Deduplicated skills; empty when skill extraction is disabled.
    pub skills: Vec<Skill>,
    /// Wall time of the run.
    pub processing_time_ms: u64,
}

/// Runs the extraction stages against one [`ServiceContext`].
pub struct Pipeline<'a> {
    ctx: &'a ServiceContext,
    config: &'a TrackerConfig,
    calculator: ProgressCalculator,
    state: RunState,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given ports and configuration.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a TrackerConfig) -> Self {
        Self {
            ctx,
            config,
            calculator: ProgressCalculator::new(&config.progress),
            state: RunState::Started,
        }
    }

    /// State reached by the last [`run`](Self::run).
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs every stage for `request`.
    ///
    /// # Errors
    ///
    /// - [`TrackError::InvalidInput`] when `project_id` is not a UUID; nothing
    ///   is read in that case.
    /// - [`TrackError::NotFound`] when no plan file exists.
    /// - [`TrackError::Read`] or [`TrackError::Discovery`] when the checkout
    ///   cannot be read.
    pub fn run(&mut self, request: &PipelineRequest) -> Result<PipelineReport> {
        let started = Instant::now();
        self.state = RunState::Started;
        let result = self.run_stages(request, started);
        if let Err(e) = &result {
            warn!(from = %self.state, error = %e, "run failed");
            self.state = RunState::Failed;
        }
        result
    }

    fn run_stages(
        &mut self,
        request: &PipelineRequest,
        started: Instant,
    ) -> Result<PipelineReport> {
        let project_id = parse_project_id(&request.project_id)?;
        info!(%project_id, root = %request.root.display(), "starting run");

        let plan_path = self.find_plan(&request.root, request.plan_path.as_deref())?;
        let tasks = self.read_tasks(&request.root, &plan_path)?;
        self.advance(RunState::TasksExtracted);

        let progress = self.calculator.calculate(&tasks, self.ctx.clock.now());
        self.advance(RunState::ProgressComputed);

        let skills = if self.config.skills.enabled {
            let skills = self.extract_skills(&request.root)?;
            self.advance(RunState::SkillsExtracted);
            skills
        } else {
            debug!("skill extraction disabled");
            Vec::new()
        };

        let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.advance(RunState::Completed);
        info!(
            tasks = tasks.len(),
            skills = skills.len(),
            status = %progress.project_status,
            processing_time_ms,
            "run completed"
        );

        Ok(PipelineReport {
            project_id,
            repo_url: request.repo_url.clone(),
            plan_path,
            tasks,
            progress,
            skills,
            processing_time_ms,
        })
    }

    /// Task branch only: plan discovery, extraction and progress.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] when no plan file exists, or a
    /// read/discovery error when the checkout cannot be read.
    pub fn extract_tasks(&self, root: &Path, plan_path: Option<&str>) -> Result<TaskReport> {
        let plan_path = self.find_plan(root, plan_path)?;
        let tasks = self.read_tasks(root, &plan_path)?;
        let progress = self.calculator.calculate(&tasks, self.ctx.clock.now());
        Ok(TaskReport { plan_path, tasks, progress })
    }

    /// Skill branch only: every manifest under `root`, mapped and merged.
    ///
    /// A manifest that fails to parse contributes nothing; its siblings
    /// are still processed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Discovery`] if the checkout cannot be walked,
    /// or [`TrackError::Read`] if a discovered manifest cannot be read.
    pub fn extract_skills(&self, root: &Path) -> Result<Vec<Skill>> {
        let entries = self
            .ctx
            .files
            .discover_manifests(root)
            .map_err(|e| TrackError::Discovery(e.to_string()))?;
        debug!(count = entries.len(), "discovered manifests");

        let mut packages = Vec::new();
        for entry in &entries {
            let content = self.ctx.files.read_file(root, &entry.path).map_err(|e| {
                TrackError::Read { path: entry.path.clone(), message: e.to_string() }
            })?;
            let outcome = manifest::parse(entry.kind, &content);
            if let Some(warning) = &outcome.warning {
                warn!(path = %entry.path, %warning, "manifest skipped");
            }
            debug!(path = %entry.path, packages = outcome.packages.len(), "parsed manifest");
            packages.extend(outcome.packages);
        }

        let skills = skills::deduplicate(skills::map_packages(&packages));
        info!(
            manifests = entries.len(),
            packages = packages.len(),
            skills = skills.len(),
            "extracted skills"
        );
        Ok(skills)
    }

    /// Candidate list: the explicit plan path first, then the configured
    /// locations, without repeats.
    fn plan_candidates(&self, explicit: Option<&str>) -> Vec<String> {
        let mut candidates: Vec<String> = explicit.map(str::to_string).into_iter().collect();
        for candidate in &self.config.plan.candidates {
            if !candidates.contains(candidate) {
                candidates.push(candidate.clone());
            }
        }
        candidates
    }

    fn find_plan(&self, root: &Path, explicit: Option<&str>) -> Result<String> {
        let candidates = self.plan_candidates(explicit);
        self.ctx
            .files
            .discover_plan_file(root, &candidates)
            .map_err(|e| TrackError::Discovery(e.to_string()))?
            .ok_or_else(|| TrackError::NotFound { root: root.to_path_buf(), candidates })
    }

    fn read_tasks(&self, root: &Path, plan_path: &str) -> Result<Vec<Task>> {
        let content = self
            .ctx
            .files
            .read_file(root, plan_path)
            .map_err(|e| TrackError::Read { path: plan_path.to_string(), message: e.to_string() })?;
        Ok(tasks::extract(&content, Some(plan_path)))
    }

    fn advance(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "run state");
        self.state = next;
    }
}

/// Parses a project handle.
///
/// # Errors
///
/// Returns [`TrackError::InvalidInput`] if `raw` is not a UUID.
pub fn parse_project_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| TrackError::InvalidInput(format!("project id {raw:?} is not a UUID: {e}")))
}
