use indexmap::IndexMap;
use serde::Serialize;

use crate::linter::{LintRun, PackageFailure};
use crate::policy::{ViolationCategory, ViolationSummary};

#[derive(Debug, Default, Serialize)]
pub struct AuditReport {
    pub packages_checked: usize,
    pub imports_checked: usize,
    pub licenses: IndexMap<String, usize>,
    pub violations: ViolationSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PackageFailure>,
}

pub fn create_report(packages_checked: usize, run: LintRun) -> AuditReport {
    AuditReport {
        packages_checked,
        imports_checked: run.imports_checked,
        licenses: run.licenses,
        violations: ViolationSummary::new(run.violations),
        failures: run.failures,
    }
}

pub fn format_table_output(report: &AuditReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "📦 License Summary ({} packages, {} imports checked)\n",
        report.packages_checked, report.imports_checked
    ));
    output.push_str(&format!(
        "🚫 {} not whitelisted  ⚠️ {} missing license  ❌ {} failed packages\n\n",
        report.violations.not_whitelisted,
        report.violations.missing_license,
        report.failures.len()
    ));

    if report.violations.details.is_empty() {
        output.push_str("✅ No violations found!\n");
    } else {
        output.push_str("⚠️  Violations:\n");
        output.push_str(&format_violation_table(report, verbose));
    }

    if !report.failures.is_empty() {
        output.push_str("\n❌ Failed packages:\n");
        for failure in &report.failures {
            output.push_str(&format!("  {}: {}\n", failure.package.display(), failure.error));
        }
    }

    if verbose && !report.licenses.is_empty() {
        output.push_str("\n📜 Licenses:\n");
        for (license, count) in &report.licenses {
            output.push_str(&format!("  {:<12} {}\n", license, count));
        }
    }

    output
}

fn format_violation_table(report: &AuditReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str("┌───────────────────────────────┬─────────────┬─────────────────┐\n");
    output.push_str("│ Import                        │ License     │ Issue           │\n");
    output.push_str("├───────────────────────────────┼─────────────┼─────────────────┤\n");

    for violation in &report.violations.details {
        let import = truncate(&violation.import_path, 29);
        let license = truncate(violation.license.as_deref().unwrap_or("(unknown)"), 11);
        let issue = match violation.category {
            ViolationCategory::NotWhitelisted => "Not whitelisted",
            ViolationCategory::MissingLicense => "Missing license",
        };

        output.push_str(&format!("│ {:<29} │ {:<11} │ {:<15} │\n", import, license, issue));
    }

    output.push_str("└───────────────────────────────┴─────────────┴─────────────────┘\n");

    if verbose {
        for violation in &report.violations.details {
            match &violation.position {
                Some(position) => output.push_str(&format!("  {}: {}\n", position, violation.message)),
                None => output.push_str(&format!("  {}\n", violation.message)),
            }
        }
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{}…", head)
    }
}
