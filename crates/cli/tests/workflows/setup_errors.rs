//! Startup failures: gomon must exit non-zero before launching anything

use crate::common::GoProject;
use crate::gomon;
use anyhow::Result;

#[test]
fn test_missing_target_fails() -> Result<()> {
    let project = GoProject::empty()?;

    let result = gomon!(project.path(), "does-not-exist").assert_failure()?;

    assert!(result.contains_stderr("cannot access"), "stderr: {}", result.stderr);
    assert!(!result.stdout.contains("exec:"));
    Ok(())
}

#[test]
fn test_directory_without_go_mod_fails() -> Result<()> {
    let project = GoProject::empty()?;
    project.write("main.go", "package main\n")?;

    let result = gomon!(project.path(), ".").assert_failure()?;

    assert!(result.contains_stderr("no go.mod file found"), "stderr: {}", result.stderr);
    assert!(!result.stdout.contains("exec:"));
    Ok(())
}

#[test]
fn test_non_go_file_fails() -> Result<()> {
    let project = GoProject::new()?;
    project.write("main.py", "print('hi')\n")?;

    let result = gomon!(project.path(), "main.py").assert_failure()?;

    assert!(result.contains_stderr("cannot run non-Go file"), "stderr: {}", result.stderr);
    assert!(!result.stdout.contains("exec:"));
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let project = GoProject::new()?;
    project.write(".gomon.toml", "build_tool = [not toml\n")?;

    let result = gomon!(project.path(), ".").assert_failure()?;

    assert!(result.contains_stderr("invalid config"), "stderr: {}", result.stderr);
    Ok(())
}

#[test]
fn test_unknown_config_key_fails() -> Result<()> {
    let project = GoProject::new()?;
    project.write(".gomon.toml", "build_tool = \"sh\"\ndelay_ms = 100\n")?;

    let result = gomon!(project.path(), ".").assert_failure()?;

    assert!(result.contains_stderr("invalid config"), "stderr: {}", result.stderr);
    Ok(())
}
