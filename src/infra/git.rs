//! # Version Control Module / 版本控制模块
//!
//! Git operations used to pin the test corpus and toolchain repositories
//! before a run. Clone, checkout and patch application are fatal on failure
//! since they leave the environment unusable; `clean` is best-effort.
//!
//! 在运行前用于固定测试语料和工具链仓库的 git 操作。
//! 克隆、检出和补丁应用失败时是致命的，因为它们会使环境不可用；
//! `clean` 为尽力而为。

use anyhow::{Context, Result};
use colored::*;
use rust_i18n::t;
use std::path::Path;
use tokio::process::Command;

use crate::infra::command::{describe, spawn_and_capture};

/// Runs `git clone <url> <dir>`. A failed clone halts the run.
/// 运行 `git clone <url> <dir>`。克隆失败会中止运行。
pub async fn clone(url: &str, dir: &Path) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.arg("clone").arg(url).arg(dir);
    run_fatal(cmd, t!("git.clone_failed", url = url).to_string()).await
}

/// Runs `git checkout <rev>` in `cwd`. A failed checkout halts the run.
/// 在 `cwd` 中运行 `git checkout <rev>`。检出失败会中止运行。
pub async fn checkout(rev: &str, cwd: &Path) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.arg("checkout").arg(rev).current_dir(cwd);
    run_fatal(cmd, t!("git.checkout_failed", rev = rev).to_string()).await
}

/// Runs `git apply <patch>` in `cwd`. A patch that does not apply halts the run.
/// 在 `cwd` 中运行 `git apply <patch>`。补丁无法应用会中止运行。
pub async fn apply(patch: &Path, cwd: &Path) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.arg("apply").arg(patch).current_dir(cwd);
    run_fatal(cmd, t!("git.apply_failed", patch = patch.display()).to_string()).await
}

/// Runs `git checkout -- .` in `cwd` to discard local modifications.
/// Best-effort: a failure is reported but never aborts the run.
///
/// 在 `cwd` 中运行 `git checkout -- .` 以丢弃本地修改。
/// 尽力而为：失败会被报告，但绝不会中止运行。
pub async fn clean(cwd: &Path) {
    let mut cmd = Command::new("git");
    cmd.arg("checkout").arg("--").arg(".").current_dir(cwd);
    let (status, _output) = spawn_and_capture(cmd).await;
    let ok = matches!(status, Ok(s) if s.success());
    if !ok {
        println!("{}", t!("git.clean_failed", dir = cwd.display()).yellow());
    }
}

/// Runs a fatal git command: logs the argv, and on a non-zero exit surfaces
/// the captured output together with a descriptive message.
///
/// 运行致命的 git 命令：记录参数列表，非零退出时将捕获的输出
/// 与描述性消息一并呈现。
async fn run_fatal(cmd: Command, message: String) -> Result<()> {
    let line = describe(&cmd);
    println!("{} {}", t!("run.command_prefix").blue(), line);

    let (status, output) = spawn_and_capture(cmd).await;
    let status = status.with_context(|| format!("failed to spawn: {line}"))?;
    if status.success() {
        return Ok(());
    }

    if !output.trim().is_empty() {
        eprintln!("{}", output.trim());
    }
    anyhow::bail!("{message} ({line})");
}
