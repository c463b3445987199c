use std::path::Path;

use crate::error::ClassifyError;

pub mod classifier;

pub use classifier::FsClassifier;

pub const MIT: &str = "MIT";
pub const ISC: &str = "ISC";
pub const NEW_BSD: &str = "NewBSD";
pub const FREE_BSD: &str = "FreeBSD";
pub const APACHE_2_0: &str = "Apache-2.0";
pub const MPL_2_0: &str = "MPL-2.0";
pub const GPL_2_0: &str = "GPL-2.0";
pub const GPL_3_0: &str = "GPL-3.0";
pub const LGPL_2_1: &str = "LGPL-2.1";
pub const LGPL_3_0: &str = "LGPL-3.0";
pub const AGPL_3_0: &str = "AGPL-3.0";
pub const CDDL_1_0: &str = "CDDL-1.0";
pub const EPL_1_0: &str = "EPL-1.0";
pub const UNLICENSE: &str = "Unlicense";

/// Determines the license type declared directly inside one directory.
///
/// Implementations only look at `dir` itself; walking up the tree is the
/// resolver's job.
pub trait LicenseClassifier: Send + Sync {
    fn classify(&self, dir: &Path) -> Result<String, ClassifyError>;
}

impl<C: LicenseClassifier + ?Sized> LicenseClassifier for &C {
    fn classify(&self, dir: &Path) -> Result<String, ClassifyError> {
        (**self).classify(dir)
    }
}

// Every phrase of an entry must appear. The GPL family is matched on its
// title line because each of those texts names its siblings in the body.
// The 3-clause BSD text contains the 2-clause one, so it goes first.
const SIGNATURES: &[(&str, &[&str])] = &[
    (AGPL_3_0, &["gnu affero general public license version 3"]),
    (LGPL_3_0, &["gnu lesser general public license version 3"]),
    (LGPL_2_1, &["gnu lesser general public license version 2.1"]),
    (LGPL_2_1, &["gnu library general public license version 2"]),
    (GPL_3_0, &["gnu general public license version 3"]),
    (GPL_2_0, &["gnu general public license version 2"]),
    (MPL_2_0, &["mozilla public license", "2.0"]),
    (APACHE_2_0, &["apache license", "version 2.0"]),
    (CDDL_1_0, &["common development and distribution license"]),
    (EPL_1_0, &["eclipse public license", "1.0"]),
    (UNLICENSE, &["this is free and unencumbered software released into the public domain"]),
    (MIT, &["permission is hereby granted, free of charge, to any person obtaining a copy"]),
    (ISC, &["permission to use, copy, modify, and", "for any purpose with or without fee is hereby granted"]),
    (NEW_BSD, &["redistribution and use in source and binary forms", "neither the name"]),
    (NEW_BSD, &["redistribution and use in source and binary forms", "may be used to endorse or promote"]),
    (FREE_BSD, &["redistribution and use in source and binary forms"]),
];

/// Identify a license type from the text of a license file.
pub fn identify_license(text: &str) -> Option<&'static str> {
    let normalized = normalize_text(text);

    SIGNATURES
        .iter()
        .find(|(_, phrases)| phrases.iter().all(|phrase| normalized.contains(phrase)))
        .map(|(license, _)| *license)
}

/// Lowercase and collapse every whitespace run into a single space, so that
/// hard-wrapped license texts match the single-line signatures.
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
