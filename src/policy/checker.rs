use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::LicensePolicy;
use crate::resolver::Resolution;
use crate::source::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationCategory {
    /// No license file, or license files that could not be told apart
    MissingLicense,
    /// A license was found but is not on the whitelist
    NotWhitelisted,
}

impl fmt::Display for ViolationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationCategory::MissingLicense => f.write_str("missing-license"),
            ViolationCategory::NotWhitelisted => f.write_str("not-whitelisted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// A policy failure for one import path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub import_path: String,
    pub category: ViolationCategory,
    pub severity: Severity,
    pub message: String,
    pub position: Option<Position>,
    /// Resolved license type, for `not-whitelisted` violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Violation counts per category
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ViolationSummary {
    pub total: usize,
    pub missing_license: usize,
    pub not_whitelisted: usize,
    pub details: Vec<Violation>,
}

impl ViolationSummary {
    pub fn new(mut details: Vec<Violation>) -> Self {
        details.sort_by(|a, b| a.import_path.cmp(&b.import_path));

        let missing_license = details
            .iter()
            .filter(|v| v.category == ViolationCategory::MissingLicense)
            .count();

        Self {
            total: details.len(),
            missing_license,
            not_whitelisted: details.len() - missing_license,
            details,
        }
    }
}

impl LicensePolicy {
    /// Decide whether a resolution breaks the policy.
    ///
    /// `fail_when_no_license_present` only governs [`Resolution::NoLicenseFile`]
    /// and `fail_on_unrecognized_license` only governs
    /// [`Resolution::Ambiguous`].
    pub fn evaluate(
        &self,
        import_path: &str,
        resolution: &Resolution,
        position: Option<&Position>,
    ) -> Option<Violation> {
        let (category, message, license) = match resolution {
            Resolution::NoLicenseFile if self.fail_when_no_license_present => (
                ViolationCategory::MissingLicense,
                format!("no license found for package {}", import_path),
                None,
            ),
            Resolution::Ambiguous { .. } if self.fail_on_unrecognized_license => (
                ViolationCategory::MissingLicense,
                format!(
                    "multiple or unrecognized license file found for package {}",
                    import_path
                ),
                None,
            ),
            Resolution::Found { license, .. } if !self.is_whitelisted(license) => (
                ViolationCategory::NotWhitelisted,
                format!(
                    "{} license found for package {}, which is not whitelisted",
                    license, import_path
                ),
                Some(license.clone()),
            ),
            _ => return None,
        };

        Some(Violation {
            import_path: import_path.to_string(),
            category,
            severity: Severity::Warning,
            message,
            position: position.cloned(),
            license,
        })
    }
}
