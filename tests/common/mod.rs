// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use ark_harness::config::{
    EvalMode, HarnessConfig, RunConfig, SuiteConfig, ToolchainConfig,
};

/// Stub front end: copies the source file to the `--output` path, so the
/// "artifact" is the source text itself.
pub const FRONTEND_OK: &str = r#"#!/bin/sh
src="$2"
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--output" ]; then out="$a"; fi
  prev="$a"
done
cp "$src" "$out"
"#;

/// Stub front end that always rejects the source.
pub const FRONTEND_FAIL: &str = "#!/bin/sh\necho 'SyntaxError: stub rejection' 1>&2\nexit 1\n";

/// Stub VM: prints the artifact contents, so the captured output equals the
/// original source text.
pub const VM_CAT: &str = r#"#!/bin/sh
for a in "$@"; do last="$a"; done
cat "$last"
"#;

/// Stub VM that hangs long enough to trip any short timeout.
pub const VM_SLEEP: &str = "#!/bin/sh\nsleep 30\n";

/// A temporary suite tree with a `suite/test` + `suite/expect` corpus, an
/// output directory and a `bin` directory for stub tools.
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempdir().expect("Failed to create temporary directory");
        for dir in ["suite/test", "suite/expect", "out", "bin"] {
            fs::create_dir_all(root.path().join(dir)).expect("Failed to create sandbox directory");
        }
        // The front-end tool only needs to exist as a path; the stub "node"
        // interpreter does the actual work.
        fs::write(root.path().join("bin/index.js"), "").expect("Failed to write tool stub");
        Sandbox { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn test_dir(&self) -> PathBuf {
        self.path().join("suite/test")
    }

    pub fn expect_dir(&self) -> PathBuf {
        self.path().join("suite/expect")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Adds a test source and its expected output, creating intermediate
    /// directories so nested ids like `a/b` work.
    pub fn add_case(&self, id: &str, source: &str, expected: &str) {
        let source_path = self.test_dir().join(format!("{id}.ts"));
        let expect_path = self.expect_dir().join(format!("{id}.txt"));
        for path in [&source_path, &expect_path] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create case directory");
            }
        }
        fs::write(source_path, source).expect("Failed to write test source");
        fs::write(expect_path, expected).expect("Failed to write expected output");
    }

    /// Writes an executable stub script into `bin` and returns its path.
    #[cfg(unix)]
    pub fn write_stub(&self, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("bin").join(name);
        fs::write(&path, script).expect("Failed to write stub script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub executable");
        path
    }

    /// A configuration pointing the harness at this sandbox and the given
    /// stub tools.
    pub fn config(&self, node: &Path, ark: &Path) -> HarnessConfig {
        HarnessConfig {
            language: "en".to_string(),
            toolchain: ToolchainConfig {
                node: node.to_path_buf(),
                frontend_tool: self.path().join("bin/index.js"),
                ark_tool: ark.to_path_buf(),
                icu_data_dir: None,
                lib_dirs: vec![],
                frontend_args: String::new(),
            },
            suite: SuiteConfig {
                test_dir: self.test_dir(),
                expect_dir: self.expect_dir(),
                out_dir: self.out_dir(),
                result_file: "result.txt".to_string(),
                skip_list: None,
                import_list: None,
                test_list: None,
                sources: vec![],
            },
            run: RunConfig {
                jobs: Some(2),
                timeout_secs: 5,
                mode: EvalMode::Default,
            },
        }
    }
}
