//! Applies the license policy to the imports of Go packages.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::LintError;
use crate::license::LicenseClassifier;
use crate::locator::PackageLocator;
use crate::policy::{ImportFilter, LicensePolicy, Violation};
use crate::resolver::{LicenseResolver, ProcessedImports, Resolution};
use crate::source::{GoPackage, Position};

/// Receives the violations found while linting a package.
pub trait IssueReporter: Sync {
    fn report(&self, violation: Violation);
}

/// Keeps every reported violation in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    violations: Mutex<Vec<Violation>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl IssueReporter for CollectingReporter {
    fn report(&self, violation: Violation) {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(violation);
    }
}

/// A package whose license check was aborted by a fault.
#[derive(Debug, Clone, Serialize)]
pub struct PackageFailure {
    pub package: PathBuf,
    pub error: String,
}

/// Everything a multi-package run produced.
#[derive(Debug, Default, Serialize)]
pub struct LintRun {
    pub violations: Vec<Violation>,
    pub failures: Vec<PackageFailure>,
    /// How many checked imports resolved to each license type, most common first
    pub licenses: IndexMap<String, usize>,
    /// Distinct imports that passed the import filter
    pub imports_checked: usize,
}

/// License linter for one analysis run.
///
/// The license cache and the set of processed imports live as long as the
/// linter, so an import shared by many packages is resolved and reported
/// once.
pub struct LicenseLinter<C, L> {
    filter: ImportFilter,
    policy: LicensePolicy,
    locator: L,
    resolver: LicenseResolver<C>,
    processed: ProcessedImports,
    checked: AtomicUsize,
    tally: Mutex<IndexMap<String, usize>>,
}

impl<C: LicenseClassifier, L: PackageLocator> LicenseLinter<C, L> {
    pub fn new(filter: ImportFilter, policy: LicensePolicy, locator: L, classifier: C) -> Self {
        Self {
            filter,
            policy,
            locator,
            resolver: LicenseResolver::new(classifier),
            processed: ProcessedImports::new(),
            checked: AtomicUsize::new(0),
            tally: Mutex::new(IndexMap::new()),
        }
    }

    pub fn resolver(&self) -> &LicenseResolver<C> {
        &self.resolver
    }

    /// Check one import. Returns `Ok(None)` for imports already processed,
    /// excluded by the filter, or compliant with the policy.
    pub fn lint_import(
        &self,
        import_path: &str,
        from_dir: &Path,
        position: Option<&Position>,
    ) -> Result<Option<Violation>, LintError> {
        if !self.processed.should_process(import_path) || !self.filter.matches(import_path) {
            return Ok(None);
        }
        self.checked.fetch_add(1, Ordering::Relaxed);

        let dir = self.locator.locate(import_path, from_dir)?;
        let resolution = self.resolver.resolve(&dir)?;
        debug!(import = import_path, ?resolution, "resolved import");

        if let Resolution::Found { license, .. } = &resolution {
            *self
                .tally
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(license.clone())
                .or_insert(0) += 1;
        }

        Ok(self.policy.evaluate(import_path, &resolution, position))
    }

    /// Check every import of `package`, stopping at the first fault.
    pub fn lint_package(
        &self,
        package: &GoPackage,
        reporter: &dyn IssueReporter,
    ) -> Result<(), LintError> {
        for import in &package.imports {
            if let Some(violation) = self.lint_import(&import.path, &package.dir, Some(&import.position))? {
                reporter.report(violation);
            }
        }
        Ok(())
    }

    /// Lint packages in parallel. A fault aborts only the package it occurred
    /// in; it is recorded in [`LintRun::failures`].
    pub fn lint_packages(&self, packages: &[GoPackage]) -> LintRun {
        let reporter = CollectingReporter::new();

        let mut failures: Vec<PackageFailure> = packages
            .par_iter()
            .filter_map(|package| match self.lint_package(package, &reporter) {
                Ok(()) => None,
                Err(err) => {
                    warn!(package = %package.dir.display(), error = %err, "license check aborted");
                    Some(PackageFailure {
                        package: package.dir.clone(),
                        error: error_chain(&err),
                    })
                }
            })
            .collect();
        failures.sort_by(|a, b| a.package.cmp(&b.package));

        let mut violations = reporter.into_violations();
        violations.sort_by(|a, b| a.import_path.cmp(&b.import_path));

        let mut licenses: Vec<(String, usize)> = self
            .tally
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(license, count)| (license.clone(), *count))
            .collect();
        licenses.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        LintRun {
            violations,
            failures,
            licenses: licenses.into_iter().collect(),
            imports_checked: self.checked.load(Ordering::Relaxed),
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
