//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn run_repotrack(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_repotrack");
    Command::new(bin)
        .args(args)
        .env_remove("REPOTRACK_RECORD")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run repotrack binary")
}

fn checkout(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::write(
        root.join("docs/plan.md"),
        "# Roadmap\n\n- [x] Data model\n- [x] REST endpoints\n- [ ] Admin UI\n",
    )
    .unwrap();
    std::fs::write(
        root.join("pyproject.toml"),
        "[project]\nname = \"svc\"\ndependencies = [\"django>=4.2\", \"celery\"]\n",
    )
    .unwrap();
    root
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn path_arg(root: &Path) -> &str {
    root.to_str().unwrap()
}

#[test]
fn tasks_subcommand_prints_json() {
    let root = checkout("repotrack_cli_tasks");
    let output = run_repotrack(&["tasks", path_arg(&root)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = stdout_json(&output);
    assert_eq!(json["plan_path"], "docs/plan.md");
    assert_eq!(json["tasks"][0]["title"], "Data model");
    assert_eq!(json["progress"]["tasks_done"], 2);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn skills_subcommand_prints_json() {
    let root = checkout("repotrack_cli_skills");
    let output = run_repotrack(&["skills", path_arg(&root)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = stdout_json(&output);
    let names: Vec<&str> =
        json.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"django"), "skills: {names:?}");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn scan_with_bad_project_id_fails() {
    let root = checkout("repotrack_cli_scan_bad_id");
    let output = run_repotrack(&["scan", path_arg(&root), "--project-id", "project-7"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("not a UUID"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn scan_prints_report() {
    let root = checkout("repotrack_cli_scan");
    let output = run_repotrack(&[
        "scan",
        path_arg(&root),
        "--project-id",
        "9a4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json = stdout_json(&output);
    assert_eq!(json["project_id"], "9a4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c");
    assert_eq!(json["progress"]["project_status"], "yellow");
    assert!(json["processing_time_ms"].is_u64());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_plan_exits_with_error() {
    let root = std::env::temp_dir().join("repotrack_cli_no_plan");
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();

    let output = run_repotrack(&["tasks", path_arg(&root)]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("no plan file found"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn help_lists_subcommands() {
    let output = run_repotrack(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("tasks"));
    assert!(stdout.contains("skills"));
    assert!(stdout.contains("scan"));
}
