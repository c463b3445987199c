//! Go package discovery and import scanning.
//!
//! Files are parsed with tree-sitter's Go grammar and only the `import_spec`
//! nodes of the syntax tree are read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

use crate::error::LintError;

/// Location of an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    pub path: String,
    pub position: Position,
}

/// A directory of Go source files and the imports they declare.
#[derive(Debug, Clone, Default)]
pub struct GoPackage {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub imports: Vec<ImportSite>,
}

/// Read the imports of every `.go` file directly inside `dir`.
pub fn scan_package(dir: &Path, include_tests: bool) -> Result<GoPackage, LintError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LintError::Io { path, source }
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        if is_go_source(&path, include_tests) {
            files.push(path);
        }
    }
    files.sort();

    let mut imports = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file).map_err(io_err(file))?;
        imports.extend(parse_imports(file, &text)?);
    }

    Ok(GoPackage {
        dir: dir.to_path_buf(),
        files,
        imports,
    })
}

/// Every directory under `root` (inclusive) containing Go sources, sorted.
///
/// `vendor` and `testdata` trees are skipped, as are directories whose name
/// starts with `.` or `_`, matching what `./...` selects.
pub fn discover_packages(root: &Path) -> Result<Vec<PathBuf>, LintError> {
    let mut found = BTreeSet::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !is_ignored_dir(entry.file_name())
        });

    for entry in walker {
        let entry = entry.map_err(|err| LintError::Io {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: err.into(),
        })?;

        if entry.file_type().is_file() && is_go_source(entry.path(), true) {
            if let Some(dir) = entry.path().parent() {
                found.insert(dir.to_path_buf());
            }
        }
    }

    Ok(found.into_iter().collect())
}

fn is_ignored_dir(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name == "vendor" || name == "testdata" || name.starts_with('.') || name.starts_with('_')
}

fn is_go_source(path: &Path, include_tests: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !name.ends_with(".go") || name.starts_with('.') || name.starts_with('_') {
        return false;
    }
    if !include_tests && name.ends_with("_test.go") {
        return false;
    }
    path.is_file()
}

/// Every import spec of one Go source file, in source order.
///
/// Positions are 1-based; columns count bytes like the Go toolchain does.
/// The parser recovers from syntax errors, so specs outside a broken region
/// are still reported.
pub fn parse_imports(file: &Path, source: &str) -> Result<Vec<ImportSite>, LintError> {
    let parse_err = |reason: String| LintError::Parse {
        path: file.to_path_buf(),
        reason,
    };

    // Go accepts a byte order mark at the very start of a file.
    let (text, bom_len) = match source.strip_prefix(BOM) {
        Some(rest) => (rest, BOM.len_utf8()),
        None => (source, 0),
    };

    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_go::language())
        .map_err(|err| parse_err(err.to_string()))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| parse_err("parser returned no syntax tree".to_string()))?;

    let mut specs = Vec::new();
    collect_import_specs(tree.root_node(), &mut specs);

    let mut imports = Vec::with_capacity(specs.len());
    for spec in specs {
        let Some(path_node) = spec.child_by_field_name("path") else {
            continue;
        };
        let literal = path_node
            .utf8_text(text.as_bytes())
            .map_err(|err| parse_err(err.to_string()))?;
        let path = literal.trim_matches(|c: char| c == '"' || c == '`');
        if path.is_empty() {
            continue;
        }

        let start = path_node.start_position();
        let offset = if start.row == 0 { bom_len } else { 0 };
        imports.push(ImportSite {
            path: path.to_string(),
            position: Position {
                file: file.to_path_buf(),
                line: start.row + 1,
                column: start.column + offset + 1,
            },
        });
    }

    Ok(imports)
}

const BOM: char = '\u{feff}';

fn collect_import_specs<'t>(node: Node<'t>, specs: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_spec" => specs.push(child),
            "import_declaration" | "import_spec_list" | "ERROR" => collect_import_specs(child, specs),
            _ => {}
        }
    }
}
