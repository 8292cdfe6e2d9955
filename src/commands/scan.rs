//! `repotrack scan` command.

use std::path::Path;

use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::pipeline::{Pipeline, PipelineRequest};

/// Borrowed arguments for [`run_with_context`].
#[derive(Debug, Clone, Copy)]
pub struct ScanArgs<'a> {
    /// Checkout root.
    pub root: &'a Path,
    /// Project UUID; generated when absent.
    pub project_id: Option<&'a str>,
    /// Repository URL carried into the report.
    pub repo_url: Option<&'a str>,
    /// Plan file tried before the configured candidates.
    pub plan: Option<&'a str>,
    /// YAML configuration file.
    pub config: Option<&'a Path>,
}

/// Execute the `scan` command with an explicit service context.
///
/// # Errors
///
/// Returns an error string if the configuration is invalid or any
/// pipeline stage fails.
pub fn run_with_context(ctx: &ServiceContext, args: &ScanArgs<'_>) -> Result<String, String> {
    let config = TrackerConfig::load(args.config).map_err(|e| e.to_string())?;
    let request = PipelineRequest {
        project_id: args
            .project_id
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_string),
        repo_url: args.repo_url.map(str::to_string),
        root: args.root.to_path_buf(),
        plan_path: args.plan.map(str::to_string),
    };
    let report = Pipeline::new(ctx, &config).run(&request).map_err(|e| e.to_string())?;
    super::to_json(&report)
}
