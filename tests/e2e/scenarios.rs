use super::helpers::{TestProject, GPL3_TEXT, MIT_TEXT};

#[test]
fn test_license_found_in_ancestor_passes() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\n");
    project.add_dependency("github.com/acme/lib/sub", None);
    project.add_license("github.com/acme", MIT_TEXT);
    project.add_source("main.go", &["github.com/acme/lib/sub"]);

    let (output, report) = project.check_json();

    assert!(output.status.success());
    assert_eq!(report["violations"]["total"], 0);
    assert_eq!(report["licenses"]["MIT"], 1);
}

#[test]
fn test_non_whitelisted_license_reported() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\n");
    project.add_dependency("github.com/copyleft/lib", Some(GPL3_TEXT));
    project.add_source("main.go", &["github.com/copyleft/lib"]);

    let (output, report) = project.check_json();

    assert!(output.status.success());
    assert_eq!(report["violations"]["total"], 1);
    let violation = &report["violations"]["details"][0];
    assert_eq!(violation["import_path"], "github.com/copyleft/lib");
    assert_eq!(violation["category"], "not-whitelisted");
    assert_eq!(violation["license"], "GPL-3.0");
    assert_eq!(violation["position"]["line"], 5);
}

#[test]
fn test_missing_license_ignored_by_default() {
    let project = TestProject::new();
    project.add_dependency("github.com/nolicense/lib", None);
    project.add_source("main.go", &["github.com/nolicense/lib"]);

    let (output, report) = project.check_json();

    assert!(output.status.success());
    assert_eq!(report["violations"]["total"], 0);
}

#[test]
fn test_missing_license_reported_when_strict() {
    let project = TestProject::new();
    project.write_config("fail_when_no_license_present = true\n");
    project.add_dependency("github.com/nolicense/lib", None);
    project.add_source("main.go", &["github.com/nolicense/lib"]);

    let (_, report) = project.check_json();

    assert_eq!(report["violations"]["total"], 1);
    assert_eq!(report["violations"]["details"][0]["category"], "missing-license");
}

#[test]
fn test_repeated_import_reported_once() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\n");
    project.add_dependency("github.com/copyleft/lib", Some(GPL3_TEXT));
    project.add_source("a.go", &["github.com/copyleft/lib"]);
    project.add_source("b.go", &["github.com/copyleft/lib"]);
    project.add_source("cmd/tool/main.go", &["github.com/copyleft/lib"]);

    let (_, report) = project.check_json();

    assert_eq!(report["packages_checked"], 2);
    assert_eq!(report["violations"]["total"], 1);
}

#[test]
fn test_ambiguous_license_uses_its_own_flag() {
    let project = TestProject::new();
    project.add_dependency("github.com/dual/lib", Some(MIT_TEXT));
    std::fs::write(
        project.gopath().join("src/github.com/dual/lib/COPYING"),
        GPL3_TEXT,
    )
    .unwrap();
    project.add_source("main.go", &["github.com/dual/lib"]);

    // Only the missing-license flag set: ambiguity is not reported.
    project.write_config("fail_when_no_license_present = true\n");
    let (_, report) = project.check_json();
    assert_eq!(report["violations"]["total"], 0);

    project.write_config("fail_on_unrecognized_license = true\n");
    let (_, report) = project.check_json();
    assert_eq!(report["violations"]["total"], 1);
    assert_eq!(report["violations"]["details"][0]["category"], "missing-license");
}

#[test]
fn test_unlocatable_import_fails_run() {
    let project = TestProject::new();
    project.add_source("main.go", &["github.com/does/not-exist"]);

    let (output, report) = project.check_json();

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(report["failures"].as_array().map(|f| f.len()), Some(1));
}

#[test]
fn test_fail_on_violations_exit_code() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\nfail_on_violations = true\n");
    project.add_dependency("github.com/copyleft/lib", Some(GPL3_TEXT));
    project.add_source("main.go", &["github.com/copyleft/lib"]);

    let output = project.run_auditor(&["check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("License violations found"));

    let output = project.run_auditor(&["check", "--exit-zero"]);
    assert!(output.status.success());
}

#[test]
fn test_vendored_dependency() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\n");
    // The GOPATH copy is GPL, the vendored copy MIT: vendor wins.
    project.add_dependency("github.com/acme/lib", Some(GPL3_TEXT));
    let vendored = project.project().join("vendor/github.com/acme/lib");
    std::fs::create_dir_all(&vendored).unwrap();
    std::fs::write(vendored.join("LICENSE"), MIT_TEXT).unwrap();
    project.add_source("main.go", &["github.com/acme/lib"]);

    let (output, report) = project.check_json();

    assert!(output.status.success());
    assert_eq!(report["violations"]["total"], 0);
    // vendor/ itself is not a package of the project
    assert_eq!(report["packages_checked"], 1);
}

#[test]
fn test_relative_gopath_walks_above_working_directory() {
    let project = TestProject::new();
    project.write_config(
        "gopath = [\"deps\"]\nwhitelisted_licenses = [\"MIT\"]\nfail_when_no_license_present = true\n",
    );
    std::fs::create_dir_all(project.project().join("deps/src/github.com/acme/lib")).unwrap();
    std::fs::write(project.project().join("LICENSE"), MIT_TEXT).unwrap();
    project.add_source("main.go", &["github.com/acme/lib"]);

    let (output, report) = project.check_json();

    assert!(output.status.success());
    assert_eq!(report["violations"]["total"], 0);
    assert_eq!(report["licenses"]["MIT"], 1);
}

#[test]
fn test_source_with_byte_order_mark_is_checked() {
    let project = TestProject::new();
    project.write_config("whitelisted_licenses = [\"MIT\"]\n");
    project.add_dependency("github.com/copyleft/lib", Some(GPL3_TEXT));
    std::fs::write(
        project.project().join("main.go"),
        "\u{feff}package main\n\nimport \"github.com/copyleft/lib\"\n",
    )
    .unwrap();

    let (_, report) = project.check_json();

    assert_eq!(report["violations"]["total"], 1);
    assert_eq!(report["violations"]["details"][0]["import_path"], "github.com/copyleft/lib");
}
