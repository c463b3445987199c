use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use crate::cli::OutputFormat;
use go_license_auditor::config::load_config;
use go_license_auditor::output::{create_report, format_table_output};
use go_license_auditor::source::{discover_packages, scan_package};
use go_license_auditor::{FsClassifier, LicenseLinter};

pub fn handle_check(
    paths: Vec<String>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    tests: bool,
    verbose: bool,
    quiet: bool,
    exit_zero: bool,
) -> Result<()> {
    // Load configuration from license-audit.toml
    let config = load_config()?;
    config.validate()?;

    // CLI arguments override config values
    let include_tests = tests || config.include_tests;

    let dirs = expand_paths(&paths)?;
    if dirs.is_empty() {
        anyhow::bail!("No Go packages found in {}", paths.join(" "));
    }

    let packages = dirs
        .iter()
        .map(|dir| scan_package(dir, include_tests))
        .collect::<Result<Vec<_>, _>>()?;

    let linter = LicenseLinter::new(
        config.import_filter()?,
        config.policy(),
        config.locator(),
        FsClassifier::new(),
    );
    let report = create_report(packages.len(), linter.lint_packages(&packages));

    if !quiet {
        if report.violations.total > 0 {
            eprintln!(
                "License violations found: {} total ({} not whitelisted, {} missing license)",
                report.violations.total, report.violations.not_whitelisted, report.violations.missing_license
            );
        }
        if !report.failures.is_empty() {
            eprintln!("License check aborted for {} package(s)", report.failures.len());
        }
    }

    // Determine output format
    let format = format.unwrap_or_else(|| match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    });

    let output_content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => format_table_output(&report, verbose),
    };

    match output {
        Some(path) => fs::write(&path, output_content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            if !quiet {
                println!("{}", output_content);
            }
        }
    }

    // A package that could not be checked is never a pass.
    if !report.failures.is_empty() {
        std::process::exit(2);
    }

    if !exit_zero && config.fail_on_violations && report.violations.total > 0 {
        if !quiet {
            eprintln!("Exiting with error due to license violations");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Turn command-line arguments into package directories.
fn expand_paths(paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for arg in paths {
        if let Some(root) = arg.strip_suffix("...") {
            let root = root.trim_end_matches('/');
            let root = if root.is_empty() { "." } else { root };
            dirs.extend(discover_packages(&PathBuf::from(root))?);
        } else if arg.contains(&['*', '?', '['][..]) {
            let entries = glob::glob(arg).with_context(|| format!("Invalid glob pattern: {}", arg))?;
            for entry in entries {
                let path = entry?;
                if path.is_dir() {
                    dirs.push(path);
                }
            }
        } else {
            let path = PathBuf::from(arg);
            if !path.is_dir() {
                anyhow::bail!("Not a directory: {}", arg);
            }
            dirs.push(path);
        }
    }

    // Absolute directories make vendor lookups reach above the working directory.
    let mut dirs = dirs
        .into_iter()
        .map(|dir| fs::canonicalize(&dir).with_context(|| format!("Failed to resolve {}", dir.display())))
        .collect::<Result<Vec<_>>>()?;
    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}
