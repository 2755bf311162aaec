//! Integration tests for CLI argument parsing and offline commands.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command with host credentials and overrides stripped, so tests see a
/// clean environment.
fn drover() -> Command {
    let mut cmd = Command::new(cargo_bin("drover"));
    cmd.env_remove("DROVER_API_URL");
    cmd.env_remove("DROVER_API_KEY");
    cmd.env_remove("DROVER_SESSION_TOKEN");
    cmd.env_remove("DROVER_PARAMETER_USE_ENV");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = drover();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sequential ELT run orchestration"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = drover();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_pipeline_help_lists_poll_flags() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = drover();
    cmd.args(["pipeline", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--poll-interval"))
        .stdout(predicate::str::contains("--timeout"));
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = drover();
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = drover();
    cmd.args(["--debug", "--help"]);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_pipeline_without_credentials_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env("HOME", temp.path());
    cmd.env_remove("WAREHOUSE_USER");
    cmd.env_remove("WAREHOUSE_PASSWORD");
    cmd.arg("pipeline");
    cmd.assert()
        .failure()
        // Missing warehouse variables warn, they do not fail the run.
        .stdout(predicate::str::contains("WAREHOUSE_USER is not set"))
        .stdout(predicate::str::contains("WAREHOUSE_PASSWORD is not set"))
        .stderr(predicate::str::contains("DROVER_API_KEY"));
    Ok(())
}

#[test]
fn cli_status_without_credentials_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = drover();
    cmd.env("HOME", temp.path());
    cmd.args(["status", "r-1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DROVER_API_KEY"));
    Ok(())
}

#[test]
fn cli_launch_rejects_malformed_param() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = drover();
    cmd.env("HOME", temp.path());
    cmd.args(["launch", "extract-load", "-P", "NOPE"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
    Ok(())
}

#[test]
fn cli_init_writes_starter_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.arg("init");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote drover.yml"));
    assert!(temp.path().join("drover.yml").exists());
    assert!(temp.path().join("profile.yml").exists());
    assert!(temp.path().join(".env.example").exists());
    Ok(())
}

#[test]
fn cli_init_existing_files_require_force() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("drover.yml"), "stages: []\n")?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.arg("init");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let kept = fs::read_to_string(temp.path().join("drover.yml"))?;
    assert_eq!(kept, "stages: []\n");
    Ok(())
}

#[test]
fn cli_render_masks_secret_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("profile.yml"),
        "user: ${WAREHOUSE_USER}\npassword: ${WAREHOUSE_PASSWORD}\n",
    )?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env("WAREHOUSE_USER", "alice");
    cmd.env("WAREHOUSE_PASSWORD", "hunter2");
    cmd.arg("render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("user: alice"))
        .stdout(predicate::str::contains("[hidden]"))
        .stdout(predicate::str::contains("hunter2").not());
    Ok(())
}

#[test]
fn cli_render_no_mask_shows_secret_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("profile.yml"),
        "password: ${WAREHOUSE_PASSWORD}\n",
    )?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env("WAREHOUSE_PASSWORD", "hunter2");
    cmd.args(["render", "--no-mask"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("password: hunter2"));
    Ok(())
}

#[test]
fn cli_render_quotes_numeric_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("profile.yml"), "port: ${WAREHOUSE_PORT}\n")?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env("WAREHOUSE_PORT", "5439");
    cmd.arg("render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("port: \"5439\""));
    Ok(())
}

#[test]
fn cli_render_preserves_unresolved_placeholders() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("profile.yml"),
        "host: ${DROVER_TEST_UNSET_HOST}\n",
    )?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env_remove("DROVER_TEST_UNSET_HOST");
    cmd.arg("render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Unresolved placeholder"))
        .stdout(predicate::str::contains("${DROVER_TEST_UNSET_HOST}"));
    Ok(())
}

#[test]
fn cli_quiet_render_keeps_data_drops_warnings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("profile.yml"),
        "host: ${DROVER_TEST_UNSET_HOST}\n",
    )?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env_remove("DROVER_TEST_UNSET_HOST");
    cmd.args(["--quiet", "render"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("${DROVER_TEST_UNSET_HOST}"))
        .stdout(predicate::str::contains("Unresolved").not());
    Ok(())
}

#[test]
fn cli_render_missing_profile_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.arg("render");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_render_env_file_overrides_process_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("profile.yml"), "user: ${WAREHOUSE_USER}\n")?;
    fs::write(temp.path().join(".env"), "WAREHOUSE_USER=file_user\n")?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env("WAREHOUSE_USER", "proc_user");
    cmd.arg("render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("user: file_user"));
    Ok(())
}

#[test]
fn cli_render_ignores_env_file_when_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("profile.yml"), "user: ${WAREHOUSE_USER}\n")?;
    fs::write(temp.path().join(".env"), "WAREHOUSE_USER=file_user\n")?;

    let mut cmd = drover();
    cmd.current_dir(temp.path());
    cmd.env("WAREHOUSE_USER", "proc_user");
    cmd.env("DROVER_PARAMETER_USE_ENV", "false");
    cmd.arg("render");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("user: proc_user"));
    Ok(())
}

#[test]
fn cli_project_flag_selects_root() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("profile.yml"), "target: dev\n")?;

    let mut cmd = drover();
    cmd.args(["-p", temp.path().to_str().unwrap(), "render"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("target: dev"));
    Ok(())
}

#[test]
fn cli_completions_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = drover();
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("drover"));
    Ok(())
}
