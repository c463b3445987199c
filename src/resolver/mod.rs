//! Locating the license that governs a package directory.
//!
//! A package usually has no license file of its own when it lives inside a
//! larger module, so the resolver walks from the package directory towards
//! the filesystem root until a directory declares a license.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{ClassifyError, LintError};
use crate::license::LicenseClassifier;

pub mod cache;
pub mod tracker;

pub use cache::LicenseCache;
pub use tracker::ProcessedImports;

/// Result of resolving a directory's governing license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Resolution {
    /// A license was found in `dir`, which is the queried directory or one of
    /// its ancestors.
    Found { license: String, dir: PathBuf },
    /// No directory up to the filesystem root has a license file.
    NoLicenseFile,
    /// The nearest directory with license files is not conclusive: several
    /// files, or one whose text matches no known license.
    Ambiguous { reason: String },
}

pub struct LicenseResolver<C> {
    classifier: C,
    cache: LicenseCache,
}

impl<C: LicenseClassifier> LicenseResolver<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            cache: LicenseCache::new(),
        }
    }

    pub fn cache(&self) -> &LicenseCache {
        &self.cache
    }

    /// Resolve the license governing `dir`.
    ///
    /// Only a missing license file moves the search to the parent directory.
    /// An ambiguous directory stops the walk, and any other classifier
    /// failure is returned as an error. A relative `dir` is taken relative to
    /// the working directory, so the walk still ends at the filesystem root.
    pub fn resolve(&self, dir: &Path) -> Result<Resolution, LintError> {
        let mut visited = HashSet::new();
        let mut current = absolute_dir(dir)?;

        loop {
            // The walk is lexical and always ascends, so this only trips if
            // that ever changes.
            if !visited.insert(current.clone()) {
                return Err(LintError::SymlinkCycle {
                    dir: dir.to_path_buf(),
                });
            }

            let outcome = self
                .cache
                .get_or_classify(&current, || self.classifier.classify(&current));

            match outcome {
                Ok(license) => {
                    debug!(dir = %current.display(), license = %license, "license resolved");
                    return Ok(Resolution::Found {
                        license,
                        dir: current,
                    });
                }
                Err(ClassifyError::NoLicenseFile) => match current.parent().map(Path::to_path_buf) {
                    Some(parent) => {
                        debug!(dir = %current.display(), "no license file, trying parent");
                        current = parent;
                    }
                    None => return Ok(Resolution::NoLicenseFile),
                },
                Err(err @ (ClassifyError::MultipleLicenses(_) | ClassifyError::Unrecognized(_))) => {
                    return Ok(Resolution::Ambiguous {
                        reason: err.to_string(),
                    });
                }
                Err(source) => {
                    return Err(LintError::Classifier {
                        dir: current,
                        source,
                    });
                }
            }
        }
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, LintError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| LintError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    // `components` drops interior `.` segments.
    Ok(cwd.join(dir).components().collect())
}
