//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! Runs planned cases through the compile → execute → compare pipeline.
//! Every case is an independent unit of work: a failing case is recorded and
//! the batch continues. The only shared resource is the cumulative result
//! file, whose appends are serialized behind an async mutex.
//!
//! 通过"编译 → 执行 → 比较"流水线运行已规划的用例。
//! 每个用例都是独立的工作单元：失败的用例被记录后批处理继续。
//! 唯一的共享资源是累积结果文件，其追加操作通过异步互斥锁串行化。

use anyhow::{Context, Result};
use colored::*;
use futures::{StreamExt, stream};
use rust_i18n::t;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::core::config::HarnessConfig;
use crate::core::models::{FailureReason, TestCase, TestOutcome};
use crate::infra::{command, fs as fs_util};

/// Runs all planned cases, at most `jobs` at a time, appending one result
/// line per case to the cumulative result file as cases complete.
///
/// Cancelling the token (Ctrl-C) lets in-flight cases record as skipped;
/// outcomes are sorted by case id so summaries are deterministic regardless
/// of completion order.
///
/// 运行所有已规划的用例，并发数不超过 `jobs`，用例完成时向累积结果
/// 文件追加一行结果。
///
/// 取消令牌（Ctrl-C）会让未完成的用例记录为跳过；结果按用例 id 排序，
/// 使摘要与完成顺序无关。
pub async fn run_all(
    cases: Vec<TestCase>,
    config: &HarnessConfig,
    result_path: &Path,
    stop_token: CancellationToken,
) -> Result<Vec<TestOutcome>> {
    let jobs = config
        .run
        .jobs
        .unwrap_or_else(|| num_cpus::get() / 2 + 1)
        .max(1);

    let result_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(result_path)
        .with_context(|| format!("failed to open result file: {}", result_path.display()))?;
    let result_file = Arc::new(Mutex::new(result_file));

    let stream = stream::iter(cases.into_iter().map(|case| {
        let stop_token = stop_token.clone();
        let result_file = Arc::clone(&result_file);
        async move {
            let outcome = if stop_token.is_cancelled() {
                cancelled_outcome(&case)
            } else {
                let fallback = case.clone();
                tokio::select! {
                    biased;
                    _ = stop_token.cancelled() => cancelled_outcome(&fallback),
                    result = run_case(case, config) => match result {
                        Ok(outcome) => outcome,
                        Err(e) => TestOutcome::Failed {
                            case: fallback,
                            output: format!("{e:#}"),
                            reason: FailureReason::Execute,
                            duration: Duration::default(),
                        },
                    },
                }
            };
            append_result(&result_file, &outcome).await;
            outcome
        }
    }));

    let mut outcomes: Vec<TestOutcome> = stream.buffer_unordered(jobs).collect().await;
    outcomes.sort_by(|a, b| a.case_id().cmp(b.case_id()));
    Ok(outcomes)
}

/// Runs a single case: compile the source with the front end, execute the
/// artifact on the VM under the configured timeout, then compare the
/// captured output against the expected-output file.
///
/// Failures are per-case outcomes, never errors: an `Err` from this function
/// means the harness itself is broken, not the case.
///
/// 运行单个用例：用前端编译源文件，在配置的超时内于虚拟机上执行产物，
/// 然后将捕获的输出与期望输出文件进行比较。
///
/// 失败是单用例结果而非错误：此函数返回 `Err` 意味着套件本身损坏，
/// 而不是用例失败。
pub async fn run_case(case: TestCase, config: &HarnessConfig) -> Result<TestOutcome> {
    let start = Instant::now();

    if let Some(parent) = case.artifact.parent() {
        fs_util::mk_dir(parent)?;
    }

    // Compile: node <frontend> <source> [imports..] --output <artifact>
    let mut cmd = Command::new(&config.toolchain.node);
    cmd.arg(&config.toolchain.frontend_tool).arg(&case.source);
    for import in &case.imports {
        cmd.arg(import);
    }
    cmd.arg("--output").arg(&case.artifact);
    if case.strict {
        cmd.arg("--strict-mode");
    }
    for extra in config.frontend_extra_args()? {
        cmd.arg(extra);
    }
    cmd.kill_on_drop(true);

    println!("{}", t!("run.compiling", name = case.id).blue());
    let (status_res, output) = command::spawn_and_capture(cmd).await;
    match status_res {
        Ok(status) if status.success() => {}
        Ok(_) => {
            println!("{}", t!("run.compile_failed", name = case.id).red());
            return Ok(TestOutcome::Failed {
                output,
                case,
                reason: FailureReason::Compile,
                duration: start.elapsed(),
            });
        }
        Err(e) => {
            println!("{}", t!("run.compile_failed", name = case.id).red());
            return Ok(TestOutcome::Failed {
                output: format!("{e}\n{output}"),
                case,
                reason: FailureReason::Compile,
                duration: start.elapsed(),
            });
        }
    }

    // Execute: ark_js_vm [--icu-data-path <dir>] <artifact>
    let mut cmd = Command::new(&config.toolchain.ark_tool);
    if let Some(icu) = &config.toolchain.icu_data_dir {
        cmd.arg("--icu-data-path").arg(icu);
    }
    cmd.arg(&case.artifact);
    if !config.toolchain.lib_dirs.is_empty() {
        let joined = std::env::join_paths(&config.toolchain.lib_dirs)
            .context("failed to build LD_LIBRARY_PATH from toolchain.lib_dirs")?;
        cmd.env("LD_LIBRARY_PATH", joined);
    }
    cmd.kill_on_drop(true);

    let timeout = Duration::from_secs(config.run.timeout_secs);
    let (status_res, actual) =
        match tokio::time::timeout(timeout, command::spawn_and_capture(cmd)).await {
            Ok(captured) => captured,
            Err(_) => {
                println!(
                    "{}",
                    t!("run.case_timeout", name = case.id, secs = timeout.as_secs()).red()
                );
                return Ok(TestOutcome::Failed {
                    output: t!("run.timeout_message", secs = timeout.as_secs()).to_string(),
                    case,
                    reason: FailureReason::Timeout,
                    duration: start.elapsed(),
                });
            }
        };
    if let Err(e) = status_res {
        println!("{}", t!("run.exec_failed", name = case.id).red());
        return Ok(TestOutcome::Failed {
            output: e.to_string(),
            case,
            reason: FailureReason::Execute,
            duration: start.elapsed(),
        });
    }
    // A non-zero VM exit is not a failure by itself: error tests expect the
    // uncaught error text, so the comparison decides.
    // 虚拟机非零退出本身不算失败：错误测试期望未捕获错误的文本，
    // 由比较来判定。

    // Compare captured output against the expected-output file.
    let expected = match std::fs::read_to_string(&case.expect) {
        Ok(content) => content,
        Err(e) => {
            println!(
                "{}",
                t!("run.expect_missing", name = case.id, path = case.expect.display()).red()
            );
            return Ok(TestOutcome::Failed {
                output: format!("cannot read expected output {}: {}", case.expect.display(), e),
                case,
                reason: FailureReason::Mismatch,
                duration: start.elapsed(),
            });
        }
    };

    let expected = normalize_newlines(&expected);
    let actual = normalize_newlines(&actual);
    let duration = start.elapsed();

    if expected == actual {
        println!(
            "{}",
            t!(
                "run.case_passed",
                name = case.id,
                duration = format!("{:.2}", duration.as_secs_f64())
            )
            .green()
        );
        return Ok(TestOutcome::Passed { case, duration });
    }

    let diff = line_diff(&expected, &actual);
    if let Err(e) = fs_util::write_file(&case.diff_file, &diff) {
        eprintln!("{e:#}");
    }
    println!(
        "{}",
        t!("run.case_failed", name = case.id, path = case.diff_file.display()).red()
    );
    Ok(TestOutcome::Failed {
        output: diff,
        case,
        reason: FailureReason::Mismatch,
        duration,
    })
}

/// Normalizes line endings so the comparison is byte-exact modulo `\r\n`.
/// 规范化行结束符，使比较在 `\r\n` 之外按字节精确。
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Renders a position-based line diff between expected (`-`) and actual
/// (`+`) output, with 1-based line markers.
///
/// 渲染期望输出（`-`）与实际输出（`+`）之间基于位置的行差异，
/// 行号从 1 开始。
pub fn line_diff(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut diff = String::new();

    let total = expected_lines.len().max(actual_lines.len());
    for i in 0..total {
        let expected_line = expected_lines.get(i);
        let actual_line = actual_lines.get(i);
        if expected_line == actual_line {
            continue;
        }
        diff.push_str(&format!("@ line {}\n", i + 1));
        if let Some(line) = expected_line {
            diff.push_str(&format!("- {line}\n"));
        }
        if let Some(line) = actual_line {
            diff.push_str(&format!("+ {line}\n"));
        }
    }
    diff
}

fn cancelled_outcome(case: &TestCase) -> TestOutcome {
    TestOutcome::Skipped {
        id: case.id.clone(),
        reason: t!("run.cancelled").to_string(),
    }
}

async fn append_result(result_file: &Arc<Mutex<std::fs::File>>, outcome: &TestOutcome) {
    let mut file = result_file.lock().await;
    if let Err(e) = writeln!(file, "{}", outcome.result_line()) {
        eprintln!("failed to record result for {}: {}", outcome.case_id(), e);
    }
}
