use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LintError;

/// Maps an import path to the directory holding its sources.
pub trait PackageLocator: Send + Sync {
    /// `from_dir` is the directory of the importing package, used for
    /// `vendor` lookups.
    fn locate(&self, import_path: &str, from_dir: &Path) -> Result<PathBuf, LintError>;
}

/// GOPATH-style lookup: `vendor` directories first, then `<root>/src`, then
/// the module cache under `<root>/pkg/mod`.
#[derive(Debug, Clone)]
pub struct GoPathLocator {
    roots: Vec<PathBuf>,
}

impl GoPathLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots from `$GOPATH`, falling back to `$HOME/go`.
    pub fn from_env() -> Self {
        let roots = match std::env::var_os("GOPATH") {
            Some(gopath) if !gopath.is_empty() => std::env::split_paths(&gopath).collect(),
            _ => std::env::var_os("HOME")
                .map(|home| vec![PathBuf::from(home).join("go")])
                .unwrap_or_default(),
        };
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn find_in_vendor(&self, import_path: &str, from_dir: &Path) -> Option<PathBuf> {
        from_dir
            .ancestors()
            .map(|dir| dir.join("vendor").join(import_path))
            .find(|candidate| candidate.is_dir())
    }

    fn find_in_gopath(&self, import_path: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join("src").join(import_path))
            .find(|candidate| candidate.is_dir())
    }

    fn find_in_module_cache(&self, import_path: &str) -> Option<PathBuf> {
        let escaped = escape_module_path(import_path);
        let segments: Vec<&str> = escaped.split('/').collect();

        for root in &self.roots {
            let cache = root.join("pkg").join("mod");
            // Longest module path first: github.com/a/b/c may live in module
            // github.com/a/b/c, github.com/a/b or github.com/a.
            for split in (1..=segments.len()).rev() {
                let (module, rest) = segments.split_at(split);
                let Some((name, parents)) = module.split_last() else {
                    continue;
                };

                let parent_dir = parents.iter().fold(cache.clone(), |dir, s| dir.join(s));
                let Some(module_dir) = latest_version_dir(&parent_dir, name) else {
                    continue;
                };

                let candidate = rest.iter().fold(module_dir, |dir, s| dir.join(s));
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

impl PackageLocator for GoPathLocator {
    fn locate(&self, import_path: &str, from_dir: &Path) -> Result<PathBuf, LintError> {
        let found = self
            .find_in_vendor(import_path, from_dir)
            .or_else(|| self.find_in_gopath(import_path))
            .or_else(|| self.find_in_module_cache(import_path));

        match found {
            Some(dir) => {
                debug!(import = import_path, dir = %dir.display(), "located package");
                Ok(dir)
            }
            None => Err(LintError::Locator {
                import_path: import_path.to_string(),
                reason: format!(
                    "not found in vendor directories or under {} GOPATH root(s)",
                    self.roots.len()
                ),
            }),
        }
    }
}

/// Highest `<name>@<version>` directory inside `dir`, by name.
fn latest_version_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let prefix = format!("{}@", name);
    let mut versions: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    versions.sort();
    versions.pop()
}

/// The module cache stores upper-case letters as `!` + lower-case.
fn escape_module_path(import_path: &str) -> String {
    let mut escaped = String::with_capacity(import_path.len());
    for c in import_path.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}
