pub mod config;
pub mod matcher;
pub mod checker;

// Re-export main types
pub use config::{LicensePolicy, DEFAULT_WHITELISTED_LICENSES};
pub use matcher::{ImportFilter, DEFAULT_INCLUDED_PACKAGES};
pub use checker::{Severity, Violation, ViolationCategory, ViolationSummary};
