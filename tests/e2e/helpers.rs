use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const MIT_TEXT: &str = "MIT License\n\nCopyright (c) 2018 Acme\n\nPermission is hereby granted, free of charge, to any person obtaining a copy\nof this software and associated documentation files";

pub const GPL3_TEXT: &str = "                    GNU GENERAL PUBLIC LICENSE\n                       Version 3, 29 June 2007\n";

/// A temporary GOPATH plus a Go project that imports from it.
pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_go-license-auditor").to_string();
        fs::create_dir_all(dir.path().join("gopath/src")).expect("Failed to create GOPATH");
        fs::create_dir_all(dir.path().join("project")).expect("Failed to create project");

        Self { dir, binary_path }
    }

    pub fn gopath(&self) -> PathBuf {
        self.dir.path().join("gopath")
    }

    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    /// Create `$GOPATH/src/<import_path>` with a Go file and, optionally, a
    /// LICENSE file.
    pub fn add_dependency(&self, import_path: &str, license: Option<&str>) {
        let dir = self.gopath().join("src").join(import_path);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("lib.go"), "package lib\n").unwrap();
        if let Some(text) = license {
            fs::write(dir.join("LICENSE"), text).unwrap();
        }
    }

    /// Put a LICENSE file in `$GOPATH/src/<rel_dir>`.
    pub fn add_license(&self, rel_dir: &str, text: &str) {
        let dir = self.gopath().join("src").join(rel_dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("LICENSE"), text).unwrap();
    }

    /// Write a Go file importing `imports` into the project.
    pub fn add_source(&self, rel_file: &str, imports: &[&str]) {
        let path = self.project().join(rel_file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        let mut source = String::from("package main\n\nimport (\n\t\"fmt\"\n");
        for import in imports {
            source.push_str(&format!("\t\"{}\"\n", import));
        }
        source.push_str(")\n\nfunc main() { fmt.Println() }\n");
        fs::write(path, source).unwrap();
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.project().join("license-audit.toml"), content).unwrap();
    }

    pub fn run_auditor(&self, args: &[&str]) -> Output {
        run(&self.binary_path, &self.project(), &self.gopath(), args)
    }

    pub fn check_json(&self) -> (Output, serde_json::Value) {
        let output = self.run_auditor(&["check", "--format", "json"]);
        let report = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "invalid JSON ({}): {}\nstderr: {}",
                e,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )
        });
        (output, report)
    }
}

fn run(binary: &str, cwd: &Path, gopath: &Path, args: &[&str]) -> Output {
    Command::new(binary)
        .args(args)
        .current_dir(cwd)
        .env("GOPATH", gopath)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run go-license-auditor")
}
