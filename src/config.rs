use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::locator::GoPathLocator;
use crate::policy::{ImportFilter, LicensePolicy, DEFAULT_INCLUDED_PACKAGES, DEFAULT_WHITELISTED_LICENSES};

pub const CONFIG_FILE_NAME: &str = "license-audit.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Regular expressions selecting the imports subject to the policy
    pub included_packages: Vec<String>,

    /// Accepted license types
    pub whitelisted_licenses: Vec<String>,

    /// Report imports without any license file
    pub fail_when_no_license_present: bool,

    /// Report imports with multiple or unrecognized license files
    #[serde(alias = "fail_when_on_unrecognized_license")]
    pub fail_on_unrecognized_license: bool,

    /// GOPATH roots; `$GOPATH` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gopath: Option<Vec<PathBuf>>,

    /// Also scan `_test.go` files
    pub include_tests: bool,

    /// Output format (table, json)
    pub format: Option<String>,

    /// Exit with an error status when violations are found
    pub fail_on_violations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            included_packages: DEFAULT_INCLUDED_PACKAGES.iter().map(|p| p.to_string()).collect(),
            whitelisted_licenses: DEFAULT_WHITELISTED_LICENSES.iter().map(|l| l.to_string()).collect(),
            fail_when_no_license_present: false,
            fail_on_unrecognized_license: false,
            gopath: None,
            include_tests: false,
            format: Some("table".to_string()),
            fail_on_violations: false,
        }
    }
}

impl Config {
    pub fn policy(&self) -> LicensePolicy {
        LicensePolicy::new(self.whitelisted_licenses.iter().cloned())
            .fail_when_no_license_present(self.fail_when_no_license_present)
            .fail_on_unrecognized_license(self.fail_on_unrecognized_license)
    }

    pub fn import_filter(&self) -> Result<ImportFilter> {
        ImportFilter::new(&self.included_packages).context("Invalid included_packages pattern")
    }

    pub fn locator(&self) -> GoPathLocator {
        match &self.gopath {
            Some(roots) => GoPathLocator::new(roots.clone()),
            None => GoPathLocator::from_env(),
        }
    }

    /// Check everything that can be rejected before a run starts.
    pub fn validate(&self) -> Result<()> {
        self.import_filter()?;
        if self.whitelisted_licenses.is_empty() {
            anyhow::bail!("whitelisted_licenses is empty: every resolved license would be reported");
        }
        if let Some(format) = self.format.as_deref() {
            if !matches!(format, "table" | "json") {
                anyhow::bail!("Unknown output format '{}' (expected table or json)", format);
            }
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Load configuration from license-audit.toml in the working directory
pub fn load_config() -> Result<Config> {
    load_config_from(config_path())
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(config)
}
