use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a [`crate::license::LicenseClassifier`].
///
/// `NoLicenseFile`, `MultipleLicenses` and `Unrecognized` are ordinary
/// outcomes the resolver turns into policy decisions. Everything else is a
/// fault.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("no license file found")]
    NoLicenseFile,

    #[error("multiple license files found: {}", display_paths(.0))]
    MultipleLicenses(Vec<PathBuf>),

    #[error("unrecognized license file: {}", .0.display())]
    Unrecognized(PathBuf),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Faults that abort the license check of the current package.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("cannot locate package {import_path}: {reason}")]
    Locator { import_path: String, reason: String },

    #[error("license lookup failed in {}", .dir.display())]
    Classifier {
        dir: PathBuf,
        #[source]
        source: ClassifyError,
    },

    #[error("directory visited twice while walking up from {}", .dir.display())]
    SymlinkCycle { dir: PathBuf },

    #[error("invalid package pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse Go source {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
