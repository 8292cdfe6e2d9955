//! Command dispatch and handlers.

pub mod scan;
pub mod skills;
pub mod tasks;

use std::env;

use serde::Serialize;
use tracing::info;

use crate::cassette::session::{RecordingSession, RECORD_ENV};
use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler and print its JSON output.
///
/// When `REPOTRACK_RECORD` is set, all port interactions are recorded to
/// per-port cassette files (see [`RecordingSession::base_dir_for`]).
///
/// # Errors
///
/// Returns an error string if the selected command handler fails or the
/// recording cannot be written.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let (ctx, session) = if let Ok(value) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(&RecordingSession::base_dir_for(&value))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(command, &ctx).map(|json| println!("{json}"));

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Run a command against the given service context and return its JSON.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<String, String> {
    match command {
        Command::Tasks { root, plan, config } => {
            tasks::run_with_context(ctx, root, plan.as_deref(), config.as_deref())
        }
        Command::Skills { root, config } => skills::run_with_context(ctx, root, config.as_deref()),
        Command::Scan { root, project_id, repo_url, plan, config } => scan::run_with_context(
            ctx,
            &scan::ScanArgs {
                root,
                project_id: project_id.as_deref(),
                repo_url: repo_url.as_deref(),
                plan: plan.as_deref(),
                config: config.as_deref(),
            },
        ),
    }
}

/// Pretty-printed JSON for command output.
fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {e}"))
}

/// Finish a recording session and log the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    info!(dir = %output_dir.display(), "recording saved");
    Ok(())
}
