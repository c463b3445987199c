use super::helpers::TestProject;
use std::fs;

#[test]
fn test_init_writes_preset() {
    let project = TestProject::new();

    let output = project.run_auditor(&["init", "strict"]);
    assert!(output.status.success());

    let content = fs::read_to_string(project.project().join("license-audit.toml")).unwrap();
    assert!(content.contains("Strict License Policy"));
    assert!(content.contains("fail_when_no_license_present = true"));
}

#[test]
fn test_config_show_and_validate() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\n");

    let show = project.run_auditor(&["config", "--show"]);
    assert!(show.status.success());
    assert!(String::from_utf8_lossy(&show.stdout).contains("whitelisted_licenses"));

    let validate = project.run_auditor(&["config", "--validate"]);
    assert!(validate.status.success());
}

#[test]
fn test_config_validate_rejects_bad_pattern() {
    let project = TestProject::new();
    project.write_config("included_packages = [\"github.com/(\"]\n");

    let validate = project.run_auditor(&["config", "--validate"]);
    assert!(!validate.status.success());
}

#[test]
fn test_quiet_check_prints_nothing() {
    let project = TestProject::new();
    project.add_source("main.go", &[]);

    let output = project.run_auditor(&["--quiet", "check"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_check_without_packages_fails() {
    let project = TestProject::new();

    let output = project.run_auditor(&["check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Go packages found"));
}
