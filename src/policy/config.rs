use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::license;

/// Licenses accepted when no whitelist is configured.
pub const DEFAULT_WHITELISTED_LICENSES: &[&str] = &[
    license::MIT,
    license::ISC,
    license::NEW_BSD,
    license::FREE_BSD,
    license::APACHE_2_0,
    license::CDDL_1_0,
    license::EPL_1_0,
    license::UNLICENSE,
];

/// License policy applied to every resolved import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicensePolicy {
    /// Accepted license types, compared case-sensitively
    pub whitelisted_licenses: BTreeSet<String>,
    /// Report imports with no license file anywhere up to the filesystem root
    #[serde(default)]
    pub fail_when_no_license_present: bool,
    /// Report imports whose license files are multiple or unrecognized
    #[serde(default)]
    pub fail_on_unrecognized_license: bool,
}

impl Default for LicensePolicy {
    fn default() -> Self {
        Self {
            whitelisted_licenses: DEFAULT_WHITELISTED_LICENSES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            fail_when_no_license_present: false,
            fail_on_unrecognized_license: false,
        }
    }
}

impl LicensePolicy {
    pub fn new<I, S>(whitelisted_licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelisted_licenses: whitelisted_licenses.into_iter().map(Into::into).collect(),
            fail_when_no_license_present: false,
            fail_on_unrecognized_license: false,
        }
    }

    pub fn fail_when_no_license_present(mut self, fail: bool) -> Self {
        self.fail_when_no_license_present = fail;
        self
    }

    pub fn fail_on_unrecognized_license(mut self, fail: bool) -> Self {
        self.fail_on_unrecognized_license = fail;
        self
    }

    pub fn is_whitelisted(&self, license: &str) -> bool {
        self.whitelisted_licenses.contains(license)
    }
}
