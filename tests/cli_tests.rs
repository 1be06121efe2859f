//! # CLI Integration Tests / CLI 集成测试
//!
//! Drives the `ark-harness` binary end to end: help output, configuration
//! scaffolding, fatal setup errors and a full stub-toolchain run.
//!
//! 端到端驱动 `ark-harness` 可执行文件：帮助输出、配置脚手架、
//! 致命的准备错误和一次完整的桩工具链运行。

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

/// `--help` lists both subcommands.
/// `--help` 会列出两个子命令。
#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("ark-harness").unwrap();
    cmd.arg("--lang").arg("en").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("run").and(predicate::str::contains("init")));
}

/// A missing configuration file is a fatal setup error with a non-zero exit.
/// 配置文件缺失是致命的准备错误，退出码非零。
#[test]
fn test_run_with_missing_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ark-harness").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--lang")
        .arg("en")
        .arg("run")
        .arg("--config")
        .arg("missing.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

/// An unreachable suite source halts the run before any test executes,
/// leaving no result file behind.
/// 无法访问的套件源会在任何测试执行之前中止运行，不会留下结果文件。
#[test]
fn test_unreachable_suite_source_halts_run() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("suite/test")).unwrap();
    fs::create_dir_all(temp_dir.path().join("suite/expect")).unwrap();
    fs::write(
        temp_dir.path().join("Harness.toml"),
        r#"
[toolchain]
frontend_tool = "bin/index.js"
ark_tool = "bin/vm"

[suite]
test_dir = "suite/test"
expect_dir = "suite/expect"
out_dir = "out"

[[suite.sources]]
url = "file:///nonexistent/test262.git"
dir = "corpus"
rev = "HEAD"
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("ark-harness").unwrap();
    cmd.current_dir(temp_dir.path()).arg("--lang").arg("en").arg("run");

    cmd.assert().failure();
    assert!(!temp_dir.path().join("out/result.txt").exists());
}

/// `init --non-interactive` scaffolds a parseable configuration file.
/// `init --non-interactive` 会生成可解析的配置文件。
#[test]
fn test_init_non_interactive_creates_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ark-harness").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--lang")
        .arg("en")
        .arg("init")
        .arg("--non-interactive");

    cmd.assert().success();

    let content = fs::read_to_string(temp_dir.path().join("Harness.toml")).unwrap();
    assert!(content.contains("[toolchain]"));
    assert!(content.contains("frontend_tool"));
    // The scaffold must itself be valid harness configuration.
    let parsed: ark_harness::config::HarnessConfig = toml::from_str(&content).unwrap();
    assert_eq!(parsed.language, "en");
}

/// A full run against the stub toolchain: per-test failures are recorded in
/// the result file but never affect the exit code.
/// 针对桩工具链的完整运行：单个测试的失败会记录在结果文件中，
/// 但绝不影响退出码。
#[cfg(unix)]
#[test]
fn test_run_records_results_end_to_end() {
    let sb = common::Sandbox::new();
    sb.add_case("a", "42\n", "42\n");
    sb.add_case("b", "43\n", "42\n");
    let node = sb.write_stub("frontend", common::FRONTEND_OK);
    let vm = sb.write_stub("vm", common::VM_CAT);
    let config = sb.config(&node, &vm);
    fs::write(
        sb.path().join("Harness.toml"),
        toml::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("ark-harness").unwrap();
    cmd.current_dir(sb.path()).arg("--lang").arg("en").arg("run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 passed, 1 failed"));

    let result = fs::read_to_string(sb.out_dir().join("result.txt")).unwrap();
    assert!(result.contains("a: PASS"));
    assert!(result.contains("b: FAIL"));
    // The persisted diff for the mismatching case is inspectable.
    assert!(sb.out_dir().join("b.diff").exists());
}
