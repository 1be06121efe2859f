//! # Package Install Module / 包安装模块
//!
//! Installs the front-end compiler's node dependencies before a run.
//! The contract is "never abort the run": a missing manifest is a silent
//! no-op and an install failure is surfaced as a structured setup warning
//! the caller records, not as an error.
//!
//! 在运行前安装前端编译器的 node 依赖。
//! 契约是"绝不中止运行"：清单缺失时静默跳过，安装失败则作为
//! 结构化的准备阶段警告交由调用方记录，而非作为错误。

use colored::*;
use rust_i18n::t;
use std::path::Path;
use tokio::process::Command;

use crate::infra::command::spawn_and_capture;

/// Locates the package manifest nearest to the front-end tool and installs
/// its dependencies. The tool usually lives at `<root>/build/src/index.js`,
/// so `package.json` is probed in the build directory and its parent.
///
/// Returns a warning entry when the install failed; `None` when there was
/// nothing to install or the install succeeded.
///
/// 定位距离前端工具最近的包清单并安装其依赖。工具通常位于
/// `<root>/build/src/index.js`，因此会在 build 目录及其父目录中探测
/// `package.json`。
///
/// 安装失败时返回警告条目；无需安装或安装成功时返回 `None`。
pub async fn install_frontend_deps(frontend_tool: &Path) -> Option<String> {
    let tool = std::fs::canonicalize(frontend_tool)
        .unwrap_or_else(|_| frontend_tool.to_path_buf());
    let build_dir = tool.parent()?.parent()?;

    let mut candidates = vec![build_dir];
    if let Some(parent) = build_dir.parent() {
        candidates.push(parent);
    }

    for dir in candidates {
        if dir.join("package.json").exists() {
            return npm_install(dir).await;
        }
    }
    None
}

/// Runs `npm install` scoped to `cwd`. Any failure becomes a warning string.
/// 在 `cwd` 范围内运行 `npm install`。任何失败都会变为警告字符串。
async fn npm_install(cwd: &Path) -> Option<String> {
    println!("{}", t!("npm.installing", dir = cwd.display()).blue());

    let mut cmd = Command::new("npm");
    cmd.arg("install").current_dir(cwd);

    let (status, output) = spawn_and_capture(cmd).await;
    let failure = match status {
        Ok(s) if s.success() => return None,
        Ok(s) => match s.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        },
        Err(e) => e.to_string(),
    };

    if !output.trim().is_empty() {
        eprintln!("{}", output.trim());
    }
    Some(t!("npm.install_failed", dir = cwd.display(), error = failure).to_string())
}
