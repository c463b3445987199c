pub mod config;
pub mod error;
pub mod init;
pub mod license;
pub mod linter;
pub mod locator;
pub mod output;
pub mod policy;
pub mod resolver;
pub mod source;

// Re-export main types for easy access
pub use error::{ClassifyError, LintError};
pub use license::{FsClassifier, LicenseClassifier};
pub use linter::{CollectingReporter, IssueReporter, LicenseLinter, LintRun};
pub use locator::{GoPathLocator, PackageLocator};
pub use policy::{ImportFilter, LicensePolicy, Severity, Violation, ViolationCategory, ViolationSummary};
pub use resolver::{LicenseCache, LicenseResolver, ProcessedImports, Resolution};
pub use source::{GoPackage, ImportSite, Position};
