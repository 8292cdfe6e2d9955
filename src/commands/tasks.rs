//! `repotrack tasks` command.

use std::path::Path;

use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

/// Execute the `tasks` command with an explicit service context.
///
/// Finds the plan file under `root` and returns the tasks and their
/// progress snapshot as JSON.
///
/// # Errors
///
/// Returns an error string if the configuration is invalid, no plan file
/// exists, or the plan cannot be read.
pub fn run_with_context(
    ctx: &ServiceContext,
    root: &Path,
    plan: Option<&str>,
    config: Option<&Path>,
) -> Result<String, String> {
    let config = TrackerConfig::load(config).map_err(|e| e.to_string())?;
    let report = Pipeline::new(ctx, &config).extract_tasks(root, plan).map_err(|e| e.to_string())?;
    super::to_json(&report)
}
