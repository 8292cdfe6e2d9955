//! `repotrack skills` command.

use std::path::Path;

use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

/// Execute the `skills` command with an explicit service context.
///
/// Runs regardless of `skills.enabled`; the flag only gates the skill
/// stage of a full scan.
///
/// # Errors
///
/// Returns an error string if the configuration is invalid or the checkout
/// cannot be walked or read.
pub fn run_with_context(
    ctx: &ServiceContext,
    root: &Path,
    config: Option<&Path>,
) -> Result<String, String> {
    let config = TrackerConfig::load(config).map_err(|e| e.to_string())?;
    let skills = Pipeline::new(ctx, &config).extract_skills(root).map_err(|e| e.to_string())?;
    super::to_json(&skills)
}
