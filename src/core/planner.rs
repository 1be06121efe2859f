//! # Case Planning Module / 用例规划模块
//!
//! Turns the on-disk test corpus into an execution plan: scans the test
//! directory, derives the expected-output and artifact paths for every
//! source, filters the skip list and expands evaluation-mode variants.
//!
//! 将磁盘上的测试语料转换为执行计划：扫描测试目录，为每个源文件
//! 派生期望输出和产物路径，过滤跳过列表并展开求值模式变体。

use anyhow::{Context, Result};
use rust_i18n::t;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{EvalMode, HarnessConfig, ImportList, SkipList};
use crate::core::models::{TestCase, TestOutcome};

/// The planned work for a run: cases to execute plus the outcomes already
/// decided by the skip list.
///
/// 一次运行的已规划工作：要执行的用例，加上跳过列表已决定的结果。
#[derive(Debug)]
pub struct ExecutionPlan {
    pub cases: Vec<TestCase>,
    pub skipped: Vec<TestOutcome>,
}

/// Builds the execution plan for the configured suite.
///
/// Sources are visited in directory-scan order. When a test-list filter is
/// given, sources outside it are not planned at all. A test id present in
/// the skip list is never compiled or executed; it contributes a `Skipped`
/// outcome instead. In `both` mode every remaining case doubles into a
/// default-mode and a strict-mode variant with distinct artifact paths.
///
/// 为配置的套件构建执行计划。
///
/// 源文件按目录扫描顺序访问。给定测试列表过滤器时，不在其中的源文件
/// 完全不会被规划。出现在跳过列表中的测试 id 永远不会被编译或执行，
/// 而是生成一个 `Skipped` 结果。在 `both` 模式下，其余每个用例都会
/// 展开为默认模式和严格模式两个变体，产物路径互不相同。
pub fn plan_execution(
    config: &HarnessConfig,
    skip_list: &SkipList,
    import_list: &ImportList,
    test_filter: Option<&HashSet<String>>,
) -> Result<ExecutionPlan> {
    let mut sources = Vec::new();
    collect_sources(&config.suite.test_dir, &mut sources)?;

    let mut cases = Vec::new();
    let mut skipped = Vec::new();

    for source in sources {
        let id = case_id(&config.suite.test_dir, &source)?;

        if let Some(filter) = test_filter {
            if !filter.contains(&id) {
                continue;
            }
        }

        if skip_list.contains(&id) {
            let reason = skip_list
                .reason_for(&id)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| t!("run.skip_reason_unspecified").to_string());
            skipped.push(TestOutcome::Skipped { id, reason });
            continue;
        }

        let imports = import_list.get(&id).cloned().unwrap_or_default();
        for &strict in mode_variants(config.run.mode) {
            cases.push(build_case(config, &id, &source, strict, imports.clone()));
        }
    }

    Ok(ExecutionPlan { cases, skipped })
}

/// Which strict-mode variants a case expands into for the given mode.
fn mode_variants(mode: EvalMode) -> &'static [bool] {
    match mode {
        EvalMode::Default => &[false],
        EvalMode::Strict => &[true],
        EvalMode::Both => &[false, true],
    }
}

/// Derives the descriptor for one case variant. The expected-output file is
/// shared between variants; artifact and diff paths carry the variant id.
///
/// 为一个用例变体派生描述符。期望输出文件在变体之间共享；
/// 产物和差异路径带有变体 id。
fn build_case(
    config: &HarnessConfig,
    id: &str,
    source: &Path,
    strict: bool,
    imports: Vec<PathBuf>,
) -> TestCase {
    let variant_id = if strict {
        format!("{id}@strict")
    } else {
        id.to_string()
    };

    TestCase {
        source: source.to_path_buf(),
        expect: config.suite.expect_dir.join(format!("{id}.txt")),
        artifact: config.suite.out_dir.join(format!("{variant_id}.abc")),
        diff_file: config.suite.out_dir.join(format!("{variant_id}.diff")),
        id: variant_id,
        strict,
        imports,
    }
}

/// The test id: the source path relative to the test directory, without
/// extension, with `/` separators on every platform.
///
/// 测试 id：相对于测试目录、去掉扩展名的源文件路径，
/// 在所有平台上都使用 `/` 分隔符。
fn case_id(test_dir: &Path, source: &Path) -> Result<String> {
    let rel = source.strip_prefix(test_dir).with_context(|| {
        format!(
            "test source {} is outside the test directory {}",
            source.display(),
            test_dir.display()
        )
    })?;
    let without_ext = rel.with_extension("");
    Ok(without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Recursively collects `.ts`/`.js` sources in directory-scan order.
/// 按目录扫描顺序递归收集 `.ts`/`.js` 源文件。
fn collect_sources(dir: &Path, sources: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to scan test directory: {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to scan test directory: {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, sources)?;
        } else if is_test_source(&path) {
            sources.push(path);
        }
    }
    Ok(())
}

fn is_test_source(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("ts" | "js")
    )
}
