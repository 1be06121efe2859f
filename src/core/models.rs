//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the harness.
//! It includes the per-test case descriptor, failure classification and the
//! final outcome recorded for every planned case.
//!
//! 此模块定义了整个测试套件中使用的核心数据结构。
//! 它包括单个测试的用例描述符、失败分类，以及为每个已规划用例
//! 记录的最终结果。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Describes a single planned test case. All paths are derived from the test
/// source by basename correspondence at planning time; the descriptor is
/// discarded once the case's outcome has been recorded.
///
/// 描述单个已规划的测试用例。所有路径都在规划时通过文件名对应关系从
/// 测试源文件派生；用例结果记录后描述符即被丢弃。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// The case identifier: the source path relative to the test directory,
    /// without extension, with an `@strict` suffix for strict-mode variants.
    /// 用例标识符：相对于测试目录、去掉扩展名的源文件路径，
    /// 严格模式变体带 `@strict` 后缀。
    pub id: String,
    /// The test source file.
    /// 测试源文件。
    pub source: PathBuf,
    /// The expected-output file compared against the captured VM output.
    /// 与捕获的虚拟机输出进行比较的期望输出文件。
    pub expect: PathBuf,
    /// The compiled bytecode artifact produced by the front end.
    /// 前端产生的已编译字节码产物。
    pub artifact: PathBuf,
    /// Where the textual diff is persisted when the comparison fails.
    /// 比较失败时文本差异的持久化位置。
    pub diff_file: PathBuf,
    /// `true` for the strict-mode variant of the case.
    /// 用例的严格模式变体为 `true`。
    pub strict: bool,
    /// Companion sources compiled together with the test, from the import list.
    /// 来自导入列表、与测试一并编译的伴随源文件。
    #[serde(default)]
    pub imports: Vec<PathBuf>,
}

/// Enumerates the possible reasons for a test case failure.
/// This helps in categorizing errors for reporting and handling.
/// 枚举测试用例失败的可能原因。
/// 这有助于对错误进行分类，以便报告和处理。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailureReason {
    /// The front-end compiler rejected the source or exited unsuccessfully.
    /// 前端编译器拒绝了源文件或以失败状态退出。
    Compile,
    /// The VM could not be spawned or its output could not be captured.
    /// 虚拟机无法启动或其输出无法捕获。
    Execute,
    /// The case exceeded the configured per-case timeout.
    /// 用例超出了配置的单用例超时。
    Timeout,
    /// The captured output differed from the expected-output file.
    /// 捕获的输出与期望输出文件不一致。
    Mismatch,
}

/// The final outcome of a single planned case.
/// 单个已规划用例的最终结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TestOutcome {
    /// The captured output matched the expected output exactly.
    /// 捕获的输出与期望输出完全一致。
    Passed {
        /// The executed case / 已执行的用例
        case: TestCase,
        /// Time spent compiling, executing and comparing / 编译、执行和比较所花费的时间
        duration: Duration,
    },
    /// The case failed; the batch continues regardless.
    /// 用例失败；批处理仍会继续。
    Failed {
        /// The failed case / 失败的用例
        case: TestCase,
        /// Captured toolchain output, or the persisted diff for mismatches
        /// 捕获的工具链输出，不一致时为持久化的差异文本
        output: String,
        /// The specific reason for the failure / 失败的具体原因
        reason: FailureReason,
        /// Time spent before the failure occurred / 失败发生前所花费的时间
        duration: Duration,
    },
    /// The case was never compiled or executed.
    /// 用例从未被编译或执行。
    Skipped {
        /// The case identifier / 用例标识符
        id: String,
        /// Why the case was skipped (skip-list reason or cancellation)
        /// 用例被跳过的原因（跳过列表原因或取消）
        reason: String,
    },
}

impl TestOutcome {
    /// Gets the identifier of the case this outcome belongs to.
    /// 获取此结果所属用例的标识符。
    pub fn case_id(&self) -> &str {
        match self {
            TestOutcome::Passed { case, .. } => &case.id,
            TestOutcome::Failed { case, .. } => &case.id,
            TestOutcome::Skipped { id, .. } => id,
        }
    }

    /// Checks if the outcome is any kind of failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestOutcome::Failed { .. })
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, TestOutcome::Passed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TestOutcome::Skipped { .. })
    }

    /// The status token recorded in the result file.
    /// 记录到结果文件中的状态标记。
    pub fn status_label(&self) -> &'static str {
        match self {
            TestOutcome::Passed { .. } => "PASS",
            TestOutcome::Failed { .. } => "FAIL",
            TestOutcome::Skipped { .. } => "SKIP",
        }
    }

    /// The cumulative result file line for this outcome.
    /// 此结果在累积结果文件中的行。
    pub fn result_line(&self) -> String {
        format!("{}: {}", self.case_id(), self.status_label())
    }

    /// Gets the appropriate CSS class for the outcome in the HTML report.
    pub fn status_class(&self) -> &'static str {
        match self {
            TestOutcome::Passed { .. } => "status-passed",
            TestOutcome::Failed { reason, .. } => {
                if *reason == FailureReason::Timeout {
                    "status-timeout"
                } else {
                    "status-failed"
                }
            }
            TestOutcome::Skipped { .. } => "status-skipped",
        }
    }

    /// Gets the captured output. Returns an empty string if there's no output.
    /// 获取捕获的输出。如果没有输出，则返回空字符串。
    pub fn output(&self) -> &str {
        match self {
            TestOutcome::Failed { output, .. } => output,
            _ => "",
        }
    }

    /// Gets the duration of the case. Returns None for skipped cases.
    /// 获取用例的持续时间。跳过的用例返回 None。
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TestOutcome::Passed { duration, .. } => Some(*duration),
            TestOutcome::Failed { duration, .. } => Some(*duration),
            TestOutcome::Skipped { .. } => None,
        }
    }

    /// Gets the failure reason, if any.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            TestOutcome::Failed { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
