use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{identify_license, LicenseClassifier};
use crate::error::ClassifyError;

const LICENSE_FILE_STEMS: &[&str] = &[
    "license",
    "licence",
    "copying",
    "copyright",
    "unlicense",
    "mit-license",
    "license-mit",
];

const LICENSE_FILE_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "rst"];

/// Classifies a directory by the license file it contains on disk.
#[derive(Debug, Default, Clone)]
pub struct FsClassifier;

impl FsClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl LicenseClassifier for FsClassifier {
    fn classify(&self, dir: &Path) -> Result<String, ClassifyError> {
        let mut candidates = find_license_files(dir)?;

        match candidates.len() {
            0 => Err(ClassifyError::NoLicenseFile),
            1 => {
                let path = candidates.remove(0);
                let text = fs::read_to_string(&path).map_err(|source| ClassifyError::Io {
                    path: path.clone(),
                    source,
                })?;
                trace!(file = %path.display(), "read license file");

                identify_license(&text)
                    .map(str::to_string)
                    .ok_or(ClassifyError::Unrecognized(path))
            }
            _ => Err(ClassifyError::MultipleLicenses(candidates)),
        }
    }
}

/// List the license files directly inside `dir`, sorted by path.
pub fn find_license_files(dir: &Path) -> Result<Vec<PathBuf>, ClassifyError> {
    let io_err = |source| ClassifyError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();

        // Follows symlinks, so a linked LICENSE still counts.
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        if is_license_file_name(&file_name.to_string_lossy()) {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

fn is_license_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    let stem = match lower.rsplit_once('.') {
        Some((stem, ext)) if LICENSE_FILE_EXTENSIONS.contains(&ext) => stem,
        _ => lower.as_str(),
    };

    LICENSE_FILE_STEMS.contains(&stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::{APACHE_2_0, MIT};
    use tempfile::TempDir;

    const MIT_TEXT: &str = "MIT License\n\nPermission is hereby granted, free of charge, to any person obtaining a copy\nof this software";

    #[test]
    fn test_license_file_names() {
        assert!(is_license_file_name("LICENSE"));
        assert!(is_license_file_name("License.txt"));
        assert!(is_license_file_name("COPYING.md"));
        assert!(is_license_file_name("UNLICENSE"));
        assert!(is_license_file_name("LICENSE-MIT"));
        assert!(!is_license_file_name("README.md"));
        assert!(!is_license_file_name("license.go"));
        assert!(!is_license_file_name("LICENSE.old"));
    }

    #[test]
    fn test_classify_single_license() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("LICENSE"), MIT_TEXT).unwrap();
        fs::write(temp_dir.path().join("main.go"), "package main").unwrap();

        let license = FsClassifier::new().classify(temp_dir.path()).unwrap();
        assert_eq!(license, MIT);
    }

    #[test]
    fn test_classify_no_license_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("main.go"), "package main").unwrap();
        // A directory named LICENSE is not a license file.
        fs::create_dir(temp_dir.path().join("LICENSE")).unwrap();

        let result = FsClassifier::new().classify(temp_dir.path());
        assert!(matches!(result, Err(ClassifyError::NoLicenseFile)));
    }

    #[test]
    fn test_classify_multiple_license_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("LICENSE"), MIT_TEXT).unwrap();
        fs::write(
            temp_dir.path().join("COPYING"),
            "Apache License\nVersion 2.0, January 2004",
        )
        .unwrap();

        match FsClassifier::new().classify(temp_dir.path()) {
            Err(ClassifyError::MultipleLicenses(files)) => assert_eq!(files.len(), 2),
            other => panic!("expected MultipleLicenses, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unrecognized_license() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("LICENSE.txt"), "Proprietary. All rights reserved.").unwrap();

        let result = FsClassifier::new().classify(temp_dir.path());
        assert!(matches!(result, Err(ClassifyError::Unrecognized(_))));
    }

    #[test]
    fn test_classify_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let result = FsClassifier::new().classify(&missing);
        assert!(matches!(result, Err(ClassifyError::Io { .. })));
    }

    #[test]
    fn test_classify_apache_markdown() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("LICENSE.md"),
            "# Apache License\nVersion 2.0, January 2004",
        )
        .unwrap();

        assert_eq!(FsClassifier::new().classify(temp_dir.path()).unwrap(), APACHE_2_0);
    }
}
