use regex::Regex;

use crate::error::LintError;

/// Imports checked when no inclusion patterns are configured.
pub const DEFAULT_INCLUDED_PACKAGES: &[&str] = &[r"github\.com/.+$", r"gopkg\.in/.+$"];

/// Decides which imports are subject to the license policy.
#[derive(Debug, Clone)]
pub struct ImportFilter {
    patterns: Vec<Regex>,
}

impl ImportFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self, LintError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| LintError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// An import is included when any pattern matches somewhere in its path.
    pub fn matches(&self, import_path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(import_path))
    }
}

impl Default for ImportFilter {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_INCLUDED_PACKAGES
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
        }
    }
}
